//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use biztime_types::BizTimeRepository;

use super::handlers::{self, AppState};
use crate::BizTimeService;

/// HTTP Server for the BizTime API.
pub struct HttpServer<R: BizTimeRepository> {
    state: Arc<AppState<R>>,
}

impl<R: BizTimeRepository> HttpServer<R> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: BizTimeService<R>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .route(
                "/companies",
                get(handlers::list_companies::<R>).post(handlers::create_company::<R>),
            )
            .route(
                "/companies/{code}",
                get(handlers::get_company::<R>)
                    .put(handlers::update_company::<R>)
                    .delete(handlers::delete_company::<R>),
            )
            .route(
                "/invoices",
                get(handlers::list_invoices::<R>).post(handlers::create_invoice::<R>),
            )
            .route(
                "/invoices/{id}",
                get(handlers::get_invoice::<R>)
                    .put(handlers::update_invoice::<R>)
                    .delete(handlers::delete_invoice::<R>),
            )
            .route(
                "/industries",
                get(handlers::list_industries::<R>).post(handlers::create_industry::<R>),
            )
            .route(
                "/industries/{code}/companies",
                post(handlers::associate_company::<R>),
            )
            .fallback(handlers::not_found)
            .method_not_allowed_fallback(handlers::not_found)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}
