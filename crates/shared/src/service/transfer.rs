use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{error, info};

use crate::{
    abstract_trait::{DynTransferRepository, TransferServiceTrait},
    domain::{
        request::{CreateTransferRequest, FindAllTransferRequest, UpdateTransferRequest},
        response::{ApiResponse, ApiResponsePagination, transfer::TransferResponse},
    },
    utils::{AppError, Method, Metrics, Status},
};

#[derive(Clone)]
pub struct TransferService {
    transfer_repository: DynTransferRepository,
    metrics: Arc<Metrics>,
}

impl std::fmt::Debug for TransferService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferService")
            .field("transfer_repository", &"DynTransferRepository")
            .finish()
    }
}

impl TransferService {
    pub fn new(
        transfer_repository: DynTransferRepository,
        metrics: Arc<Metrics>,
        registry: &mut Registry,
    ) -> Self {
        registry.register(
            "transfer_service_request_counter",
            "Total number of requests to the TransferService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "transfer_service_request_duration",
            "Histogram of request durations for the TransferService",
            metrics.request_duration.clone(),
        );

        Self {
            transfer_repository,
            metrics,
        }
    }

    fn start(&self, operation_name: &str) -> Instant {
        info!("Starting operation: {operation_name}");
        Instant::now()
    }

    fn complete<T>(
        &self,
        started: Instant,
        method: Method,
        operation_name: &str,
        result: &Result<T, AppError>,
    ) {
        let elapsed = started.elapsed().as_secs_f64();

        let status = match result {
            Ok(_) => {
                info!("Operation completed successfully: {operation_name} ({elapsed:.4}s)");
                Status::Success
            }
            Err(e) => {
                error!("Operation failed: {operation_name}: {e}");
                Status::Error
            }
        };

        self.metrics.record(method, status, elapsed);
    }
}

#[async_trait]
impl TransferServiceTrait for TransferService {
    async fn get_transfers(
        &self,
        req: &FindAllTransferRequest,
    ) -> Result<ApiResponsePagination<Vec<TransferResponse>>, AppError> {
        let started = self.start("GetTransfers");

        let result = async {
            let transfers = self.transfer_repository.find_all(req).await?;
            let total = self.transfer_repository.count(req).await?;

            Ok::<_, AppError>(ApiResponsePagination {
                data: transfers
                    .into_iter()
                    .map(TransferResponse::from)
                    .collect::<Vec<_>>(),
                total,
            })
        }
        .await;

        self.complete(started, Method::Get, "GetTransfers", &result);
        result
    }

    async fn get_transfer(&self, id: i64) -> Result<ApiResponse<TransferResponse>, AppError> {
        let started = self.start("GetTransfer");

        let result = self
            .transfer_repository
            .find_by_id(id)
            .await
            .map(|transfer| ApiResponse {
                data: TransferResponse::from(transfer),
            });

        self.complete(started, Method::Get, "GetTransfer", &result);
        result
    }

    async fn create_transfer(
        &self,
        input: &CreateTransferRequest,
    ) -> Result<TransferResponse, AppError> {
        let started = self.start("CreateTransfer");

        let result = self
            .transfer_repository
            .create(input)
            .await
            .map(TransferResponse::from);

        self.complete(started, Method::Post, "CreateTransfer", &result);
        result
    }

    async fn update_transfer(
        &self,
        input: &UpdateTransferRequest,
    ) -> Result<TransferResponse, AppError> {
        let started = self.start("UpdateTransfer");

        let result = self
            .transfer_repository
            .update(input)
            .await
            .map(TransferResponse::from);

        self.complete(started, Method::Put, "UpdateTransfer", &result);
        result
    }

    async fn delete_transfer(&self, id: i64) -> Result<(), AppError> {
        let started = self.start("DeleteTransfer");

        let result = self.transfer_repository.delete_by_id(id).await;

        self.complete(started, Method::Delete, "DeleteTransfer", &result);
        result
    }
}
