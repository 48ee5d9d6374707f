use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::{domain::response::ErrorResponse, utils::AppError};
use thiserror::Error;
use tracing::error;

/// Everything a transfer handler can fail with. Binding failures never reach
/// the service.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    App(#[from] AppError),
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        HttpError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        HttpError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for HttpError {
    fn from(rejection: PathRejection) -> Self {
        HttpError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = match &self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::App(AppError::NotFound(_)) => StatusCode::NOT_FOUND,
            HttpError::App(e) => {
                error!("Request failed: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match self {
            HttpError::BadRequest(message) => ErrorResponse::fail(message),
            HttpError::App(e) => ErrorResponse::from(e),
        };

        (status, Json(body)).into_response()
    }
}
