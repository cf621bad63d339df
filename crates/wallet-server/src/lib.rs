//! HTTP API over the wallet store.
//!
//! Routes live under `/api` and speak JSON. Store calls block on file I/O, so
//! handlers hand them to Tokio's blocking pool.

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use wallet_core::{storage::WalletStorage, CoreError};

use crate::error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn WalletStorage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn WalletStorage>) -> Self {
        Self { storage }
    }

    /// Runs a store operation off the async runtime. `context` is the message
    /// clients see if the operation fails for reasons outside their control.
    pub(crate) async fn run_blocking<T, F>(&self, context: &'static str, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn WalletStorage) -> Result<T, CoreError> + Send + 'static,
    {
        let storage = Arc::clone(&self.storage);
        tokio::task::spawn_blocking(move || op(storage.as_ref()))
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "store task did not complete");
                ApiError::Internal(context.to_string())
            })?
            .map_err(|err| ApiError::from_core(err, context))
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
