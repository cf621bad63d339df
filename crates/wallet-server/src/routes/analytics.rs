//! Dashboard aggregates over an optional date range.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use wallet_core::SummaryService;
use wallet_domain::{CategoryShare, DateRange, FinancialStats, SeriesPoint, WalletSummary};

use crate::{error::ApiError, AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub range: DateRange,
    pub wallet: WalletSummary,
    pub stats: FinancialStats,
    pub categories: Vec<CategoryShare>,
    pub series: Vec<SeriesPoint>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/analytics/summary", get(summary))
}

async fn summary(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<AnalyticsSummary>, ApiError> {
    let range = DateRange::parse(query.start_date.as_deref(), query.end_date.as_deref())
        .map_err(|err| ApiError::bad_request(err.to_string()))?;

    let transactions = state
        .run_blocking("Unable to load transactions", |storage| storage.list_transactions())
        .await?;
    let filtered = SummaryService::filter_by_date_range(&transactions, &range);

    Ok(Json(AnalyticsSummary {
        range,
        wallet: SummaryService::summarize_wallet(&filtered),
        stats: SummaryService::calculate_financial_stats(&filtered),
        categories: SummaryService::group_expenses_by_category(&filtered),
        series: SummaryService::build_income_expense_series(&filtered),
    }))
}
