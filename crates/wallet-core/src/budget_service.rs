use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;
use wallet_domain::{
    parse_month_key, BudgetInput, BudgetPatch, BudgetRecord, BudgetStatus, BudgetWithProgress,
    NewBudget, Transaction,
};

use crate::error::CoreError;

/// Progress never reports beyond this percentage.
pub const PROGRESS_CAP: f64 = 150.0;
/// Fraction of the ceiling at which a budget turns to `warning`.
pub const WARNING_RATIO: f64 = 0.8;

pub struct BudgetService;

impl BudgetService {
    pub fn validate_input(input: BudgetInput) -> Result<NewBudget, CoreError> {
        let month = input
            .month
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .ok_or_else(|| CoreError::invalid("Budget month is required"))?;
        if parse_month_key(&month).is_none() {
            return Err(CoreError::invalid(format!(
                "Budget month must look like YYYY-MM, got '{month}'"
            )));
        }

        let amount = input
            .amount
            .filter(|a| a.is_finite())
            .ok_or_else(|| CoreError::invalid("Budget amount must be a number"))?;

        Ok(NewBudget {
            month,
            amount,
            alerts_enabled: input.alerts_enabled.unwrap_or(false),
            category: normalize_category(input.category),
        })
    }

    /// Applies the mutable fields of `patch` and bumps `updated_at`.
    pub fn apply_patch(
        record: &mut BudgetRecord,
        patch: BudgetPatch,
        now: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        if let Some(amount) = patch.amount {
            if !amount.is_finite() {
                return Err(CoreError::invalid("Budget amount must be a number"));
            }
            record.amount = amount;
        }
        if let Some(enabled) = patch.alerts_enabled {
            record.alerts_enabled = enabled;
        }
        if let Some(category) = patch.category {
            record.category = normalize_category(Some(category));
        }
        record.updated_at = now;
        Ok(())
    }

    /// Classifies spend against a ceiling. The first matching rule wins.
    pub fn determine_status(amount: f64, spent: f64) -> BudgetStatus {
        if amount <= 0.0 {
            // an empty ceiling only trips once something is spent
            return if spent > 0.0 {
                BudgetStatus::Over
            } else {
                BudgetStatus::Under
            };
        }
        if spent >= amount {
            BudgetStatus::Over
        } else if spent >= amount * WARNING_RATIO {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Under
        }
    }

    pub fn progress(amount: f64, spent: f64) -> f64 {
        let raw = if amount > 0.0 {
            spent / amount * 100.0
        } else {
            100.0
        };
        if raw.is_finite() {
            raw.min(PROGRESS_CAP)
        } else {
            debug!(amount, spent, "non-finite budget progress clamped to zero");
            0.0
        }
    }

    /// Joins every budget with the expense total of its month.
    ///
    /// Category-scoped budgets are measured against the whole month as well.
    pub fn build_budgets_with_progress(
        budgets: &[BudgetRecord],
        transactions: &[Transaction],
    ) -> Vec<BudgetWithProgress> {
        let mut month_totals: HashMap<String, f64> = HashMap::new();
        for txn in transactions.iter().filter(|txn| txn.is_expense()) {
            *month_totals.entry(txn.month_key()).or_insert(0.0) += txn.amount;
        }

        budgets
            .iter()
            .map(|budget| {
                let spent = month_totals.get(&budget.month).copied().unwrap_or(0.0);
                BudgetWithProgress {
                    budget: budget.clone(),
                    spent,
                    progress: Self::progress(budget.amount, spent),
                    status: Self::determine_status(budget.amount, spent),
                }
            })
            .collect()
    }

    /// Drops `under` budgets and orders the rest by urgency: `over` first,
    /// then by progress, highest first.
    pub fn select_budget_alerts(budgets: Vec<BudgetWithProgress>) -> Vec<BudgetWithProgress> {
        let mut alerts: Vec<BudgetWithProgress> = budgets
            .into_iter()
            .filter(|b| b.status != BudgetStatus::Under)
            .collect();
        alerts.sort_by(|a, b| {
            b.status
                .severity()
                .cmp(&a.status.severity())
                .then_with(|| b.progress.total_cmp(&a.progress))
        });
        alerts
    }

    /// Latest month first; budgets sharing a month keep their stored order.
    pub fn sort_by_month_desc(budgets: &mut [BudgetRecord]) {
        budgets.sort_by(|a, b| b.month.cmp(&a.month));
    }

    /// The budget already covering `draft`'s month and category scope, if any.
    pub fn find_same_scope<'a>(budgets: &'a [BudgetRecord], draft: &NewBudget) -> Option<&'a BudgetRecord> {
        budgets
            .iter()
            .find(|budget| budget.month == draft.month && budget.category == draft.category)
    }

    /// Patch that turns an existing budget into `draft`. Month and scope are
    /// already equal, so only the amount and alert flag move.
    pub fn patch_from_draft(draft: &NewBudget) -> BudgetPatch {
        BudgetPatch {
            amount: Some(draft.amount),
            alerts_enabled: Some(draft.alerts_enabled),
            category: None,
        }
    }
}

fn normalize_category(category: Option<String>) -> Option<String> {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}
