//! The persisted wallet document and its metadata block.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{budget::BudgetRecord, transaction::Transaction};

/// Currency used when a document is created without an explicit one.
pub const DEFAULT_CURRENCY: &str = "IRR";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

impl Metadata {
    pub fn new(currency: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            currency: currency.into().to_uppercase(),
            created_at,
        }
    }
}

/// Everything the store persists, kept as one JSON document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletDocument {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<BudgetRecord>,
    pub metadata: Metadata,
}

impl WalletDocument {
    pub fn empty(metadata: Metadata) -> Self {
        Self {
            transactions: Vec::new(),
            budgets: Vec::new(),
            metadata,
        }
    }

    /// Next transaction id: one past the largest id, or 1 for an empty list.
    pub fn next_transaction_id(&self) -> u64 {
        self.transactions.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    pub fn next_budget_id(&self) -> u64 {
        self.budgets.iter().map(|b| b.id).max().unwrap_or(0) + 1
    }

    pub fn budget_index(&self, id: u64) -> Option<usize> {
        self.budgets.iter().position(|budget| budget.id == id)
    }
}
