//! Read-only HTTP query surface over the live catalog.

mod error;
mod routes;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::catalog::CatalogStore;
use crate::error::{Error, Result};

pub use error::ApiError;
pub use routes::{SearchParams, lookup_handler, search_handler};

/// What: Build the query router.
///
/// Details:
/// - `GET /api/mods?q=` searches, `GET /api/mods/{id}` looks up one record.
/// - Handlers only read the store; they never trigger a sync.
pub fn router(store: Arc<CatalogStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/mods", get(search_handler))
        .route("/api/mods/{id}", get(lookup_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// What: Serve the router on `listener` until `shutdown` resolves.
///
/// # Errors
/// - `Server` when the accept loop fails.
pub async fn serve(
    listener: TcpListener,
    store: Arc<CatalogStore>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr = listener
        .local_addr()
        .map_or_else(|_| "unknown".to_string(), |a| a.to_string());
    info!(%addr, "server running");
    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|source| Error::Server { addr, source })
}

/// What: Bind the listener on `0.0.0.0:<port>`.
///
/// # Errors
/// - `Server` when the address is taken or not permitted.
pub async fn bind(port: u16) -> Result<TcpListener> {
    let addr = format!("0.0.0.0:{port}");
    info!("Binding to {addr}");
    TcpListener::bind(&addr)
        .await
        .map_err(|source| Error::Server { addr, source })
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
