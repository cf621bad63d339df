use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};
use wallet_core::{
    storage::{document_warnings, WalletStorage},
    time::{Clock, SystemClock},
    BudgetService, CoreError, TransactionService,
};
use wallet_domain::{
    BudgetPatch, BudgetRecord, Metadata, NewBudget, NewTransaction, Transaction, WalletDocument,
    DEFAULT_CURRENCY,
};

const TMP_SUFFIX: &str = "tmp";

/// Single-file JSON persistence for the wallet document.
///
/// Mutations hold `write_lock` for their whole read-modify-write cycle and
/// always start from what is on disk, so back-to-back writers never lose
/// each other's changes. Reads go straight to the file.
pub struct JsonWalletStorage {
    path: PathBuf,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
    default_currency: String,
    created_at: DateTime<Utc>,
}

impl JsonWalletStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    pub fn with_clock(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        let created_at = clock.now();
        Self {
            path: path.into(),
            clock,
            write_lock: Mutex::new(()),
            default_currency: DEFAULT_CURRENCY.to_string(),
            created_at,
        }
    }

    /// Currency recorded in the metadata of a freshly created document.
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document, falling back to an empty one when the file is
    /// missing or cannot be parsed.
    pub fn read_document(&self) -> WalletDocument {
        match self.load_existing() {
            Ok(document) => document,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "unable to read wallet document, using defaults");
                self.fallback_document()
            }
        }
    }

    /// Only a missing file counts as an empty wallet here; anything unreadable
    /// is an error.
    fn load_existing(&self) -> Result<WalletDocument, CoreError> {
        match load_document_from_path(&self.path) {
            Ok(document) => {
                for warning in document_warnings(&document) {
                    warn!(path = %self.path.display(), "{warning}");
                }
                Ok(document)
            }
            Err(CoreError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "wallet document missing, using defaults");
                Ok(self.fallback_document())
            }
            Err(err) => Err(err),
        }
    }

    fn fallback_document(&self) -> WalletDocument {
        WalletDocument::empty(Metadata::new(
            self.default_currency.clone(),
            self.created_at,
        ))
    }

    /// Runs `mutate` against the latest persisted document and writes the
    /// result back. Nothing is written when `mutate` fails or when the file on
    /// disk cannot be parsed.
    fn queue_write<T>(
        &self,
        mutate: impl FnOnce(&mut WalletDocument, DateTime<Utc>) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut document = self.load_existing().map_err(|err| {
            error!(path = %self.path.display(), error = %err, "wallet document is unreadable, write refused");
            CoreError::Storage(format!(
                "{} could not be read ({err}); fix or move it before saving",
                self.path.display()
            ))
        })?;
        let outcome = mutate(&mut document, self.clock.now())?;
        save_document_to_path(&document, &self.path)?;
        Ok(outcome)
    }
}

impl WalletStorage for JsonWalletStorage {
    fn list_transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        let mut transactions = self.read_document().transactions;
        TransactionService::newest_first(&mut transactions);
        Ok(transactions)
    }

    fn create_transaction(&self, draft: NewTransaction) -> Result<Transaction, CoreError> {
        let created = self.queue_write(|document, now| {
            let txn = Transaction::from_new(document.next_transaction_id(), draft, now);
            document.transactions.insert(0, txn.clone());
            Ok(txn)
        })?;
        info!(id = created.id, kind = %created.kind, "transaction created");
        Ok(created)
    }

    fn list_budgets(&self) -> Result<Vec<BudgetRecord>, CoreError> {
        let mut budgets = self.read_document().budgets;
        BudgetService::sort_by_month_desc(&mut budgets);
        Ok(budgets)
    }

    fn create_budget(&self, draft: NewBudget) -> Result<BudgetRecord, CoreError> {
        let created = self.queue_write(|document, now| {
            let budget = BudgetRecord::from_new(document.next_budget_id(), draft, now);
            document.budgets.insert(0, budget.clone());
            Ok(budget)
        })?;
        info!(id = created.id, month = %created.month, "budget created");
        Ok(created)
    }

    fn update_budget(&self, id: u64, patch: BudgetPatch) -> Result<BudgetRecord, CoreError> {
        self.queue_write(|document, now| {
            let index = document
                .budget_index(id)
                .ok_or_else(|| CoreError::budget_not_found(id))?;
            let budget = &mut document.budgets[index];
            BudgetService::apply_patch(budget, patch, now)?;
            Ok(budget.clone())
        })
    }

    fn delete_budget(&self, id: u64) -> Result<(), CoreError> {
        self.queue_write(|document, _| {
            let before = document.budgets.len();
            document.budgets.retain(|budget| budget.id != id);
            if document.budgets.len() == before {
                return Err(CoreError::budget_not_found(id));
            }
            Ok(())
        })?;
        info!(id, "budget deleted");
        Ok(())
    }

    fn metadata(&self) -> Result<Metadata, CoreError> {
        Ok(self.read_document().metadata)
    }
}

/// Writes the document next to its final location, then renames it into place.
pub fn save_document_to_path(document: &WalletDocument, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = tmp_path(path);
    write_file(&tmp, &serialize_document(document)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_document_from_path(path: &Path) -> Result<WalletDocument, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

fn serialize_document(document: &WalletDocument) -> Result<String, CoreError> {
    serde_json::to_string_pretty(document).map_err(|err| CoreError::Serde(err.to_string()))
}
