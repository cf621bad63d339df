//! Budget CRUD plus the derived progress and alert views.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use tracing::info;
use wallet_core::BudgetService;
use wallet_domain::{BudgetInput, BudgetPatch, BudgetRecord, BudgetWithProgress};

use crate::{error::ApiError, AppState};

const INVALID_PAYLOAD: &str = "Invalid budget payload";
const INVALID_ID: &str = "Invalid budget id";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/progress", get(list_progress))
        .route("/budgets/alerts", get(list_alerts))
        .route("/budgets/{id}", patch(update_budget).delete(delete_budget))
}

fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ApiError::bad_request(INVALID_ID))
}

async fn list_budgets(State(state): State<AppState>) -> Result<Json<Vec<BudgetRecord>>, ApiError> {
    let budgets = state
        .run_blocking("Unable to load budgets", |storage| storage.list_budgets())
        .await?;
    Ok(Json(budgets))
}

async fn create_budget(
    State(state): State<AppState>,
    payload: Result<Json<BudgetInput>, JsonRejection>,
) -> Result<(StatusCode, Json<BudgetRecord>), ApiError> {
    let Json(input) = payload.map_err(|rejection| ApiError::invalid_payload(rejection, INVALID_PAYLOAD))?;
    let draft = BudgetService::validate_input(input).map_err(|err| ApiError::from_core(err, INVALID_PAYLOAD))?;

    let created = state
        .run_blocking("Unable to create budget", move |storage| storage.create_budget(draft))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_budget(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<BudgetPatch>, JsonRejection>,
) -> Result<Json<BudgetRecord>, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(patch) = payload.map_err(|rejection| ApiError::invalid_payload(rejection, INVALID_PAYLOAD))?;

    let updated = state
        .run_blocking("Unable to update budget", move |storage| storage.update_budget(id, patch))
        .await?;
    info!(id, "budget updated");
    Ok(Json(updated))
}

async fn delete_budget(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    state
        .run_blocking("Unable to delete budget", move |storage| storage.delete_budget(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn load_progress(state: &AppState) -> Result<Vec<BudgetWithProgress>, ApiError> {
    state
        .run_blocking("Unable to load budget progress", |storage| {
            let budgets = storage.list_budgets()?;
            let transactions = storage.list_transactions()?;
            Ok(BudgetService::build_budgets_with_progress(&budgets, &transactions))
        })
        .await
}

async fn list_progress(State(state): State<AppState>) -> Result<Json<Vec<BudgetWithProgress>>, ApiError> {
    Ok(Json(load_progress(&state).await?))
}

/// Budgets at or past their warning threshold, most urgent first.
async fn list_alerts(State(state): State<AppState>) -> Result<Json<Vec<BudgetWithProgress>>, ApiError> {
    let progress = load_progress(&state).await?;
    Ok(Json(BudgetService::select_budget_alerts(progress)))
}
