//! Monthly budget records and their derived progress view.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A monthly spend ceiling, optionally scoped to a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecord {
    pub id: u64,
    pub month: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub alerts_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BudgetRecord {
    pub fn from_new(id: u64, draft: NewBudget, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            month: draft.month,
            amount: draft.amount,
            category: draft.category,
            alerts_enabled: draft.alerts_enabled,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }
}

/// Raw create payload for a budget.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetInput {
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub alerts_enabled: Option<bool>,
    #[serde(default)]
    pub category: Option<String>,
}

/// A validated budget draft.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub month: String,
    pub amount: f64,
    pub alerts_enabled: bool,
    pub category: Option<String>,
}

/// Partial update for the mutable budget fields. `month` and `id` cannot change.
///
/// An empty `category` string removes the category scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPatch {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub alerts_enabled: Option<bool>,
    #[serde(default)]
    pub category: Option<String>,
}

impl BudgetPatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.alerts_enabled.is_none() && self.category.is_none()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Spend classification relative to the budget ceiling.
pub enum BudgetStatus {
    Under,
    Warning,
    Over,
}

impl BudgetStatus {
    /// Higher is more urgent.
    pub fn severity(self) -> u8 {
        match self {
            BudgetStatus::Under => 0,
            BudgetStatus::Warning => 1,
            BudgetStatus::Over => 2,
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::Under => "under",
            BudgetStatus::Warning => "warning",
            BudgetStatus::Over => "over",
        };
        f.write_str(label)
    }
}

/// A budget combined with the spend derived from the current transaction set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetWithProgress {
    #[serde(flatten)]
    pub budget: BudgetRecord,
    pub spent: f64,
    pub progress: f64,
    pub status: BudgetStatus,
}

impl BudgetWithProgress {
    /// Positive while under the ceiling, negative once overspent.
    pub fn remaining(&self) -> f64 {
        self.budget.amount - self.spent
    }
}
