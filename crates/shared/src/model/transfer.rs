use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
pub struct Transfer {
    pub id: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub transfer_type: String,
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub time: DateTime<Utc>,
}
