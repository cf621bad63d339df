use axum::{extract::State, routing::get, Json, Router};
use wallet_domain::Metadata;

use crate::{error::ApiError, AppState};

async fn get_metadata(State(state): State<AppState>) -> Result<Json<Metadata>, ApiError> {
    let metadata = state
        .run_blocking("Unable to load metadata", |storage| storage.metadata())
        .await?;
    Ok(Json(metadata))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/metadata", get(get_metadata))
}
