//! Transaction listing and creation.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use wallet_core::TransactionService;
use wallet_domain::{Transaction, TransactionInput};

use crate::{error::ApiError, AppState};

const INVALID_PAYLOAD: &str = "Invalid transaction payload";

pub fn routes() -> Router<AppState> {
    Router::new().route("/transactions", get(list_transactions).post(create_transaction))
}

/// Latest transaction date first.
async fn list_transactions(State(state): State<AppState>) -> Result<Json<Vec<Transaction>>, ApiError> {
    let transactions = state
        .run_blocking("Unable to load transactions", |storage| storage.list_transactions())
        .await?;
    Ok(Json(transactions))
}

async fn create_transaction(
    State(state): State<AppState>,
    payload: Result<Json<TransactionInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let Json(input) = payload.map_err(|rejection| ApiError::invalid_payload(rejection, INVALID_PAYLOAD))?;
    let draft = TransactionService::validate(input).map_err(|err| ApiError::from_core(err, INVALID_PAYLOAD))?;

    let created = state
        .run_blocking("Unable to create transaction", move |storage| storage.create_transaction(draft))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}
