//! Report rows produced by the analytics services.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One slice of the expense breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub value: f64,
    /// Share of total expenses, one decimal place.
    pub percentage: f64,
}

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub label: String,
    pub income: f64,
    pub expense: f64,
    pub period_start: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStats {
    pub total_transactions: usize,
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub average_transaction: f64,
    pub top_income_category: Option<String>,
    pub top_expense_category: Option<String>,
}

/// Balance card figures for the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub income_count: usize,
    pub expense_count: usize,
    pub last_activity: Option<DateTime<Utc>>,
}
