use crate::model::transfer::Transfer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone, PartialEq)]
pub struct TransferResponse {
    pub id: i64,
    #[serde(rename = "type")]
    pub transfer_type: String,
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub time: DateTime<Utc>,
}

impl From<Transfer> for TransferResponse {
    fn from(value: Transfer) -> Self {
        TransferResponse {
            id: value.id,
            transfer_type: value.transfer_type,
            from: value.from,
            to: value.to,
            amount: value.amount,
            time: value.time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn serializes_with_wire_field_names() {
        let response = TransferResponse::from(Transfer {
            id: 3,
            transfer_type: "deposit".into(),
            from: "bank".into(),
            to: "alice".into(),
            amount: 100.0,
            time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        });

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "id": 3,
                "type": "deposit",
                "from": "bank",
                "to": "alice",
                "amount": 100.0,
                "time": "2024-01-01T00:00:00Z"
            })
        );
    }
}
