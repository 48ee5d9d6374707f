use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::utils::{empty_string_as_none, finite_f64_or_none};

/// SQLite binds LIMIT and OFFSET as signed 64-bit integers.
const MAX_ROWS: u64 = i64::MAX as u64;

/// Filter and pagination for listing transfers. Every field is optional and
/// an absent (or empty) value places no constraint on the result.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FindAllTransferRequest {
    /// Exact match on the transfer type.
    #[serde(rename = "type", default, deserialize_with = "empty_string_as_none")]
    pub transfer_type: Option<String>,

    /// Case-insensitive substring of the sender.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub from: Option<String>,

    /// Case-insensitive substring of the recipient.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub to: Option<String>,

    /// Inclusive lower bound on the amount.
    #[serde(default, deserialize_with = "finite_f64_or_none")]
    pub amount_from: Option<f64>,

    /// Inclusive upper bound on the amount.
    #[serde(default, deserialize_with = "finite_f64_or_none")]
    pub amount_to: Option<f64>,

    /// Inclusive lower bound on the transfer time (RFC 3339).
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub time_from: Option<DateTime<Utc>>,

    /// Inclusive upper bound on the transfer time (RFC 3339).
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub time_to: Option<DateTime<Utc>>,

    /// 1-based page number; 0 and 1 both select the first page.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<u64>,

    /// Rows per page; 0 or absent returns every matching row.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page_size: Option<u64>,
}

impl FindAllTransferRequest {
    /// Row cap, if any.
    pub fn limit(&self) -> Option<u64> {
        self.page_size
            .filter(|size| *size > 0)
            .map(|size| size.min(MAX_ROWS))
    }

    /// Rows to skip, only meaningful together with a limit.
    pub fn offset(&self) -> Option<u64> {
        let limit = self.limit()?;
        match self.page {
            Some(page) if page > 1 => Some((page - 1).saturating_mul(limit).min(MAX_ROWS)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateTransferRequest {
    #[serde(rename = "type")]
    pub transfer_type: String,
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateTransferRequest {
    /// Taken from the request path, never from the body.
    #[serde(skip)]
    pub id: i64,

    #[serde(rename = "type")]
    pub transfer_type: String,
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub time: DateTime<Utc>,
}
