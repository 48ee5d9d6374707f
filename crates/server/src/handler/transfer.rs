use crate::handler::error::HttpError;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::WithRejection;
use shared::{
    domain::{
        request::{CreateTransferRequest, FindAllTransferRequest, UpdateTransferRequest},
        response::{ApiResponse, ApiResponsePagination, ErrorResponse, transfer::TransferResponse},
    },
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/v1/transfers",
    tag = "Transfer",
    params(FindAllTransferRequest),
    responses(
        (status = 200, description = "Matching transfers and their total count", body = ApiResponsePagination<Vec<TransferResponse>>),
        (status = 400, description = "Malformed filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_transfers(
    State(data): State<Arc<AppState>>,
    WithRejection(Query(params), _): WithRejection<Query<FindAllTransferRequest>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let response = data
        .di_container
        .transfer_service
        .get_transfers(&params)
        .await?;

    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/v1/transfers/{id}",
    tag = "Transfer",
    params(
        ("id" = i64, Path, description = "Transfer ID")
    ),
    responses(
        (status = 200, description = "Transfer details retrieved successfully", body = ApiResponse<TransferResponse>),
        (status = 400, description = "Malformed transfer ID", body = ErrorResponse),
        (status = 404, description = "Transfer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_transfer(
    State(data): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    match data.di_container.transfer_service.get_transfer(id).await {
        Ok(response) => Ok((StatusCode::OK, Json(response))),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/transfers",
    tag = "Transfer",
    request_body = CreateTransferRequest,
    responses(
        (status = 201, description = "Transfer created; Location points at the new record"),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn create_transfer(
    State(data): State<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<CreateTransferRequest>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let created = data
        .di_container
        .transfer_service
        .create_transfer(&body)
        .await?;

    Ok((
        StatusCode::CREATED,
        [(LOCATION, format!("/api/v1/transfers/{}", created.id))],
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/transfers/{id}",
    tag = "Transfer",
    params(
        ("id" = i64, Path, description = "Transfer ID")
    ),
    request_body = UpdateTransferRequest,
    responses(
        (status = 200, description = "Transfer updated successfully"),
        (status = 400, description = "Malformed transfer ID or request body", body = ErrorResponse),
        (status = 404, description = "Transfer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn update_transfer(
    State(data): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, HttpError>,
    WithRejection(Json(mut body), _): WithRejection<Json<UpdateTransferRequest>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.id = id;

    data.di_container
        .transfer_service
        .update_transfer(&body)
        .await?;

    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/api/v1/transfers/{id}",
    tag = "Transfer",
    params(
        ("id" = i64, Path, description = "Transfer ID")
    ),
    responses(
        (status = 200, description = "Transfer deleted successfully"),
        (status = 400, description = "Malformed transfer ID", body = ErrorResponse),
        (status = 404, description = "Transfer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn delete_transfer(
    State(data): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    data.di_container
        .transfer_service
        .delete_transfer(id)
        .await?;

    Ok(StatusCode::OK)
}

pub fn transfers_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(
            "/api/v1/transfers",
            get(get_transfers).post(create_transfer),
        )
        .route(
            "/api/v1/transfers/{id}",
            get(get_transfer)
                .put(update_transfer)
                .delete(delete_transfer),
        )
        .with_state(app_state)
}
