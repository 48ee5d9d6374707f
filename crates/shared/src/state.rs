use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    config::ConnectionPool,
    utils::{DependenciesInject, Metrics},
};

#[derive(Clone, Debug)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
}

impl AppState {
    pub async fn new(pool: ConnectionPool) -> Result<Self> {
        let registry = Arc::new(Mutex::new(Registry::default()));
        let metrics = Arc::new(Metrics::new());

        let di_container = {
            let mut registry_guard = registry.lock().await;
            DependenciesInject::new(pool, metrics, &mut registry_guard)
                .context("Failed to initialize dependency injection container")?
        };

        Ok(Self {
            di_container,
            registry,
        })
    }
}
