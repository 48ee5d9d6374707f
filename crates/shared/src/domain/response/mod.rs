use crate::utils::AppError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod transfer;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub data: T,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ApiResponsePagination<T> {
    pub data: T,
    pub total: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn fail(message: impl Into<String>) -> Self {
        ErrorResponse {
            status: "fail".to_string(),
            message: message.into(),
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        let (status, message) = match error {
            AppError::SqlxError(_) => ("error".to_string(), "Database error occurred".to_string()),
            AppError::NotFound(ref msg) => ("error".to_string(), msg.clone()),
            AppError::InternalError(_) => {
                ("error".to_string(), "Internal server error".to_string())
            }
        };
        ErrorResponse { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_bodies_hide_storage_details() {
        let body = ErrorResponse::from(AppError::SqlxError(sqlx::Error::PoolTimedOut));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "status": "error", "message": "Database error occurred" })
        );

        let body = ErrorResponse::from(AppError::NotFound("Transfer with ID 7 not found".into()));
        assert_eq!(body.message, "Transfer with ID 7 not found");

        let body = ErrorResponse::fail("bad page");
        assert_eq!(body.status, "fail");
    }
}
