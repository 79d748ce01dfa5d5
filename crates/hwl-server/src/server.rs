use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use hwl_store::{DocumentStore, FileDocumentStore, InMemoryDocumentStore, RequestContext};
use hwl_types::Hospital;
use tokio::net::TcpListener;

use crate::config::{ServerConfig, StorageConfig};
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

const DISCONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Open the hospital store named by `storage`.
pub async fn open_store(storage: &StorageConfig) -> ServerResult<Arc<dyn DocumentStore<Hospital>>> {
    match storage {
        StorageConfig::Memory => {
            tracing::info!("using in-memory hospital store");
            Ok(Arc::new(InMemoryDocumentStore::<Hospital>::new()))
        }
        StorageConfig::File { data_dir } => {
            tracing::info!(data_dir = %data_dir.display(), "using file hospital store");
            Ok(Arc::new(FileDocumentStore::<Hospital>::open(data_dir).await?))
        }
    }
}

/// Hospital worklist HTTP server.
pub struct HospitalServer {
    config: ServerConfig,
    store: Arc<dyn DocumentStore<Hospital>>,
}

impl HospitalServer {
    pub fn new(config: ServerConfig, store: Arc<dyn DocumentStore<Hospital>>) -> Self {
        Self { config, store }
    }

    /// Open the configured store and build a server on it.
    pub async fn from_config(config: ServerConfig) -> ServerResult<Self> {
        let store = open_store(&config.storage).await?;
        Ok(Self::new(config, store))
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(AppState::new(
            self.store.clone(),
            self.config.request_timeout(),
        ))
    }

    /// Serve until Ctrl-C, then disconnect the store.
    pub async fn serve(self) -> ServerResult<()> {
        self.serve_with_shutdown(shutdown_signal()).await
    }

    /// Serve until `shutdown` resolves. In-flight requests are drained
    /// before the store is disconnected.
    pub async fn serve_with_shutdown(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> ServerResult<()> {
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        self.serve_on(listener, shutdown).await
    }

    pub async fn serve_on(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> ServerResult<()> {
        let app = self.router();
        tracing::info!(
            "hospital worklist server listening on {}",
            listener.local_addr()?
        );
        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()));

        tracing::info!("shutting down, disconnecting store");
        let ctx = RequestContext::with_timeout(DISCONNECT_TIMEOUT);
        if let Err(e) = self.store.disconnect(&ctx).await {
            tracing::error!(error = %e, "failed to disconnect store");
            served?;
            return Err(e.into());
        }
        served
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
