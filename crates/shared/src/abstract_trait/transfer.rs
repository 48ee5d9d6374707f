use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        request::{CreateTransferRequest, FindAllTransferRequest, UpdateTransferRequest},
        response::{ApiResponse, ApiResponsePagination, transfer::TransferResponse},
    },
    model::transfer::Transfer,
    utils::AppError,
};

pub type DynTransferRepository = Arc<dyn TransferRepositoryTrait + Send + Sync>;
pub type DynTransferService = Arc<dyn TransferServiceTrait + Send + Sync>;

#[async_trait]
pub trait TransferRepositoryTrait {
    /// Number of transfers matching the filter, ignoring pagination.
    async fn count(&self, filter: &FindAllTransferRequest) -> Result<i64, AppError>;
    /// Matching transfers, newest `time` first, paginated per the filter.
    async fn find_all(&self, filter: &FindAllTransferRequest) -> Result<Vec<Transfer>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Transfer, AppError>;
    async fn create(&self, input: &CreateTransferRequest) -> Result<Transfer, AppError>;
    async fn update(&self, input: &UpdateTransferRequest) -> Result<Transfer, AppError>;
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait TransferServiceTrait {
    async fn get_transfers(
        &self,
        req: &FindAllTransferRequest,
    ) -> Result<ApiResponsePagination<Vec<TransferResponse>>, AppError>;
    async fn get_transfer(&self, id: i64) -> Result<ApiResponse<TransferResponse>, AppError>;
    async fn create_transfer(
        &self,
        input: &CreateTransferRequest,
    ) -> Result<TransferResponse, AppError>;
    async fn update_transfer(
        &self,
        input: &UpdateTransferRequest,
    ) -> Result<TransferResponse, AppError>;
    async fn delete_transfer(&self, id: i64) -> Result<(), AppError>;
}
