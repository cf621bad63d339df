use std::collections::HashSet;

use wallet_domain::{
    BudgetPatch, BudgetRecord, Metadata, NewBudget, NewTransaction, Transaction, WalletDocument,
};

use crate::CoreError;

/// Persistence backend for the wallet document.
///
/// Creation assigns `id = max + 1` (or 1 when empty) and stamps both
/// timestamps. Mutations run one at a time against the latest persisted state.
pub trait WalletStorage: Send + Sync {
    fn list_transactions(&self) -> Result<Vec<Transaction>, CoreError>;
    fn create_transaction(&self, draft: NewTransaction) -> Result<Transaction, CoreError>;
    fn list_budgets(&self) -> Result<Vec<BudgetRecord>, CoreError>;
    fn create_budget(&self, draft: NewBudget) -> Result<BudgetRecord, CoreError>;
    /// Fails with `NotFound` when no budget carries `id`.
    fn update_budget(&self, id: u64, patch: BudgetPatch) -> Result<BudgetRecord, CoreError>;
    fn delete_budget(&self, id: u64) -> Result<(), CoreError>;
    fn metadata(&self) -> Result<Metadata, CoreError>;
}

/// Flags anomalies the store does not enforce: repeated ids and more than one
/// budget for the same month and scope.
pub fn document_warnings(document: &WalletDocument) -> Vec<String> {
    let mut warnings = Vec::new();

    let mut txn_ids = HashSet::new();
    for txn in &document.transactions {
        if !txn_ids.insert(txn.id) {
            warnings.push(format!("transaction id {} appears more than once", txn.id));
        }
    }

    let mut budget_ids = HashSet::new();
    let mut scopes = HashSet::new();
    for budget in &document.budgets {
        if !budget_ids.insert(budget.id) {
            warnings.push(format!("budget id {} appears more than once", budget.id));
        }
        if !scopes.insert((budget.month.as_str(), budget.category.as_deref())) {
            let scope = budget.category.as_deref().unwrap_or("all categories");
            warnings.push(format!(
                "month {} has more than one budget for {}",
                budget.month, scope
            ));
        }
    }
    warnings
}
