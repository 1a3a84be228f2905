//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::build_router;
use crate::config::StashConfig;
use crate::core::EntitySource;
use crate::inventory::{Asset, Category, Detail, route_table};
use crate::query::{MetadataRegistry, QueryPipeline};
use crate::storage::InMemoryStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the inventory HTTP server
///
/// Sources left unset default to empty in-memory stores.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(StashConfig::from_yaml_file("stash.yaml")?)
///     .with_assets(InMemoryStore::with_entities(assets))
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: StashConfig,
    assets: Option<Arc<dyn EntitySource<Asset>>>,
    categories: Option<Arc<dyn EntitySource<Category>>>,
    details: Option<Arc<dyn EntitySource<Detail>>>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: StashConfig::default(),
            assets: None,
            categories: None,
            details: None,
        }
    }

    pub fn with_config(mut self, config: StashConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_assets(mut self, source: impl EntitySource<Asset> + 'static) -> Self {
        self.assets = Some(Arc::new(source));
        self
    }

    pub fn with_categories(mut self, source: impl EntitySource<Category> + 'static) -> Self {
        self.categories = Some(Arc::new(source));
        self
    }

    pub fn with_details(mut self, source: impl EntitySource<Detail> + 'static) -> Self {
        self.details = Some(Arc::new(source));
        self
    }

    /// Assemble the shared handler state
    ///
    /// Fails when the configuration is invalid, e.g. a relative base URL.
    pub fn build_state(self) -> Result<AppState> {
        self.config.validate()?;

        let routes = route_table(&self.config.server.base_url)?;
        let registry = MetadataRegistry::new()
            .register::<Asset>()
            .register::<Category>()
            .register::<Detail>();

        Ok(AppState {
            assets: self
                .assets
                .unwrap_or_else(|| Arc::new(InMemoryStore::<Asset>::new())),
            categories: self
                .categories
                .unwrap_or_else(|| Arc::new(InMemoryStore::<Category>::new())),
            details: self
                .details
                .unwrap_or_else(|| Arc::new(InMemoryStore::<Detail>::new())),
            pipeline: QueryPipeline::new(Arc::new(registry)),
            routes: Arc::new(routes),
            config: Arc::new(self.config),
        })
    }

    /// Build the final REST router
    pub fn build(self) -> Result<Router> {
        Ok(build_router(self.build_state()?))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `addr`, or to the configured host and port when `None`, and
    /// stops on SIGTERM or Ctrl+C.
    pub async fn serve(self, addr: Option<&str>) -> Result<()> {
        let addr = addr
            .map(str::to_string)
            .unwrap_or_else(|| self.config.server.bind_address());
        let base_url = self.config.server.base_url.clone();

        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!(%base_url, "Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
