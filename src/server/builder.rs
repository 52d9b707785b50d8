//! Fluent builder assembling the record API server

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::AppConfig;
use crate::core::service::RecordService;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the record API server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(config)
///     .with_record_service(RecordStore::new(JsonFileStorage::new("mock-post.json")))
///     .build()?;
/// ```
pub struct ServerBuilder {
    record_service: Option<Arc<dyn RecordService>>,
    config: AppConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Builder with default config and no record service
    pub fn new() -> Self {
        Self {
            record_service: None,
            config: AppConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the record service (required)
    pub fn with_record_service(mut self, service: impl RecordService + 'static) -> Self {
        self.record_service = Some(Arc::new(service));
        self
    }

    /// Set an already shared record service
    pub fn with_shared_record_service(mut self, service: Arc<dyn RecordService>) -> Self {
        self.record_service = Some(service);
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    ///
    /// Custom routes are merged at the root, next to `/api`.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(mut self) -> Result<ServerHost> {
        let record_service = self.record_service.take().ok_or_else(|| {
            anyhow::anyhow!("RecordService is required. Call .with_record_service()")
        })?;

        Ok(ServerHost::new(record_service, self.config))
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes)
    }

    /// Bind the configured address and serve until SIGINT or SIGTERM
    ///
    /// In-flight requests, including a mutation holding the store's write
    /// section, run to completion before this returns.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_addr()?;
        let cors = self.config.cors;
        let app = self.build()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;

        tracing::info!(%addr, cors, "Flagged posts API listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server terminated abnormally")?;

        tracing::info!("Flagged posts API stopped");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on the first of Ctrl+C or SIGTERM
///
/// A handler that cannot be installed never resolves, leaving the other
/// signal in charge.
async fn shutdown_signal() {
    use tokio::signal;

    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        _ = interrupt => "SIGINT",
        _ = terminate => "SIGTERM",
    };
    tracing::info!(signal, "Shutdown requested, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecordStore;
    use crate::storage::InMemoryStorage;

    #[test]
    fn test_build_host_requires_record_service() {
        let result = ServerBuilder::new().build_host();
        let err = result.err().expect("should fail without a record service");
        assert!(err.to_string().contains("RecordService is required"));
    }

    #[test]
    fn test_build_host_keeps_config() {
        let config = AppConfig {
            port: 4242,
            ..AppConfig::default()
        };
        let host = ServerBuilder::new()
            .with_config(config)
            .with_record_service(RecordStore::new(InMemoryStorage::new()))
            .build_host()
            .unwrap();
        assert_eq!(host.config.port, 4242);
    }

    #[tokio::test]
    async fn test_shared_record_service_is_not_copied() {
        let service: Arc<dyn RecordService> = Arc::new(RecordStore::new(InMemoryStorage::new()));
        let host = ServerBuilder::new()
            .with_shared_record_service(service.clone())
            .build_host()
            .unwrap();
        assert!(Arc::ptr_eq(&host.records, &service));
    }

    #[test]
    fn test_build_router() {
        let router = ServerBuilder::default()
            .with_record_service(RecordStore::new(InMemoryStorage::new()))
            .with_custom_routes(Router::new())
            .build();
        assert!(router.is_ok());
    }
}
