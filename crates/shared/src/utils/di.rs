use anyhow::Result;
use prometheus_client::registry::Registry;
use std::sync::Arc;

use crate::{
    abstract_trait::{DynTransferRepository, DynTransferService},
    config::ConnectionPool,
    repository::transfer::TransferRepository,
    service::transfer::TransferService,
    utils::Metrics,
};

#[derive(Clone)]
pub struct DependenciesInject {
    pub transfer_service: DynTransferService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("transfer_service", &"DynTransferService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(
        pool: ConnectionPool,
        metrics: Arc<Metrics>,
        registry: &mut Registry,
    ) -> Result<Self> {
        let transfer_repository =
            Arc::new(TransferRepository::new(pool)) as DynTransferRepository;

        let transfer_service = Arc::new(TransferService::new(
            transfer_repository,
            metrics,
            registry,
        )) as DynTransferService;

        Ok(Self { transfer_service })
    }
}
