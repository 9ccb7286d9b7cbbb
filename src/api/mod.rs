//! REST API over the sizing engine.
//!
//! Provides three endpoints:
//! - `POST /selection`: size an evaporator list for every brand
//! - `GET /catalog/{brand}/{orientation}`: condensers and evaporator nominals
//! - `GET /factors`: the loaded diversity-factor table

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

pub use types::{EvaporatorInput, SelectionRequest, SelectionResponse};

use crate::catalog::Catalog;
use crate::diversity::FactorTable;
use crate::provider::LoadedData;
use crate::sizing::Advisory;

/// Immutable application state shared across all request handlers.
///
/// Loaded once at startup and wrapped in `Arc`. Requests never mutate it,
/// so no locks are needed.
pub struct AppState {
    pub catalog: Catalog,
    pub factors: FactorTable,
    /// Degradations recorded while loading data.
    pub load_advisories: Vec<Advisory>,
}

impl From<LoadedData> for AppState {
    fn from(data: LoadedData) -> Self {
        Self {
            catalog: data.catalog,
            factors: data.factors,
            load_advisories: data.advisories,
        }
    }
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/selection", post(handlers::post_selection))
        .route("/catalog/{brand}/{orientation}", get(handlers::get_catalog))
        .route("/factors", get(handlers::get_factors))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
