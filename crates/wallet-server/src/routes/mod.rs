//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod analytics;
pub mod budgets;
pub mod health;
pub mod metadata;
pub mod transactions;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(metadata::routes())
        .merge(transactions::routes())
        .merge(budgets::routes())
        .merge(analytics::routes())
}
