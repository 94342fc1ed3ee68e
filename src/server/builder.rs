//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::{build_entry_routes, build_utility_routes};
use crate::core::service::EntryService;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the entry gateway HTTP server
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_entry_service(InMemoryEntryStore::new())
///     .serve("0.0.0.0:5000")
///     .await?;
/// ```
pub struct ServerBuilder {
    entry_service: Option<Arc<dyn EntryService>>,
    cors: bool,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            entry_service: None,
            cors: true,
        }
    }

    /// Set the entry service (required)
    pub fn with_entry_service(self, service: impl EntryService + 'static) -> Self {
        self.with_shared_entry_service(Arc::new(service))
    }

    /// Set an entry service that is already shared
    pub fn with_shared_entry_service(mut self, service: Arc<dyn EntryService>) -> Self {
        self.entry_service = Some(service);
        self
    }

    /// Do not answer cross-origin requests
    ///
    /// CORS is permissive by default: the entry form is served from another
    /// origin than the API.
    pub fn without_cors(mut self) -> Self {
        self.cors = false;
        self
    }

    /// Build the final router
    ///
    /// This generates:
    /// - Entry CRUD routes
    /// - Health and favicon routes
    ///
    /// with request tracing and, unless disabled, permissive CORS.
    pub fn build(self) -> Result<Router> {
        let entry_service = self.entry_service.ok_or_else(|| {
            anyhow::anyhow!("EntryService is required. Call .with_entry_service()")
        })?;

        let app = build_utility_routes()
            .merge(build_entry_routes(AppState::new(entry_service)))
            .layer(TraceLayer::new_for_http());
        Ok(if self.cors {
            app.layer(CorsLayer::permissive())
        } else {
            app
        })
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    /// - Close the entry service once in-flight requests are done
    pub async fn serve(self, addr: &str) -> Result<()> {
        self.serve_with_shutdown(addr, shutdown_signal()).await
    }

    /// Serve until `signal` resolves, then close the entry service
    pub async fn serve_with_shutdown(
        self,
        addr: &str,
        signal: impl Future<Output = ()> + Send + 'static,
    ) -> Result<()> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        tracing::info!("Server running on {}", listener.local_addr()?);
        self.serve_on(listener, signal).await
    }

    async fn serve_on(
        self,
        listener: TcpListener,
        signal: impl Future<Output = ()> + Send + 'static,
    ) -> Result<()> {
        let entry_service = self.entry_service.clone();
        let app = self.build()?;

        axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await?;

        if let Some(service) = entry_service {
            service.shutdown().await?;
        }

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
