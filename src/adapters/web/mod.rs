//! Config API server adapter.
//!
//! Exposes any [`ConfigSource`] over four read-only GET endpoints answering
//! with the `{message, data}` JSON envelope:
//!
//! - `GET /` sections and default section name
//! - `GET /defaults` options of the default section
//! - `GET /section/{section}` option names of a section
//! - `GET /section/{section}/option/{option}` a single value
//!
//! Path segments are percent-decoded and otherwise used exactly as received.

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::*;

use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::ports::config_source::ConfigSource;

/// Shared handler state. The source is read-only; lookups run on the blocking
/// pool, so a remote [`ConfigClient`] can back the server as well.
///
/// [`ConfigClient`]: crate::adapters::rest_client::ConfigClient
pub struct AppState {
    pub source: Arc<dyn ConfigSource + Send + Sync>,
}

impl AppState {
    pub fn new(source: impl ConfigSource + Send + Sync + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

/// Routes rooted at `/`, without request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/defaults", get(handlers::defaults))
        .route("/section/{section}", get(handlers::section))
        .route("/section/{section}/option/{option}", get(handlers::option))
        .fallback(error::not_found)
        .with_state(Arc::new(state))
}

/// Full application: the API mounted under `prefix` with request tracing.
/// An empty or `/` prefix mounts the API at the root.
pub fn build_app(state: AppState, prefix: &str) -> Router {
    let api = build_router(state);
    let app = match normalize_prefix(prefix) {
        Some(prefix) => Router::new()
            .nest(&prefix, api)
            .fallback(error::not_found),
        None => api,
    };
    app.layer(TraceLayer::new_for_http())
}

/// `config/`, `/config` and ` /config/ ` all become `/config`.
fn normalize_prefix(prefix: &str) -> Option<String> {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{trimmed}"))
    }
}

/// Bind `addr` and serve `app` until the process is stopped.
pub async fn serve(addr: SocketAddr, app: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "config API listening");
    axum::serve(listener, app).await
}
