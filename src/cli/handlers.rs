use std::{fs, path::PathBuf};

use tracing::debug;
use wallet_config::{app_data_dir, Config, ConfigManager};
use wallet_core::{
    format::{build_transactions_csv, format_budget_month, CurrencyFormatter},
    storage::WalletStorage,
    BudgetService, TransactionService,
};
use wallet_domain::{
    BudgetInput, BudgetPatch, BudgetStatus, DateRange, TransactionInput, TransactionKind,
};
use wallet_storage_json::JsonWalletStorage;

use crate::{
    cli::{
        dashboard::{self, Dashboard},
        output::{self, OutputPreferences},
        Cli, Command,
    },
    errors::CliError,
    utils::build_info,
};

/// Resolved configuration plus the store it points at.
pub struct CliContext {
    pub config: Config,
    pub storage: JsonWalletStorage,
}

impl CliContext {
    /// Loads `config.json` from the app data dir, applies env overrides and
    /// opens the wallet document (`data` wins over the configured path).
    pub fn open(data: Option<PathBuf>) -> Result<Self, CliError> {
        let base = app_data_dir();
        let mut config = ConfigManager::with_base_dir(&base)?.load()?;
        config.apply_env_overrides()?;

        let path = data.unwrap_or_else(|| config.resolve_data_file(&base));
        debug!(path = %path.display(), "opening wallet document");
        let storage = JsonWalletStorage::new(path).with_default_currency(config.currency.clone());
        Ok(Self { config, storage })
    }

    fn dashboard(&self, range: DateRange) -> Result<Dashboard, CliError> {
        let metadata = self.storage.metadata()?;
        let transactions = self.storage.list_transactions()?;
        let budgets = self.storage.list_budgets()?;
        Ok(Dashboard::build(&metadata, &transactions, &budgets, range).with_locale(&self.config.locale))
    }
}

pub fn run(cli: Cli) -> Result<(), CliError> {
    output::set_preferences(OutputPreferences { plain: cli.plain });

    if let Command::Version = cli.command {
        print_version();
        return Ok(());
    }

    let context = CliContext::open(cli.data)?;
    if !context.config.ui_color_enabled {
        output::set_preferences(OutputPreferences { plain: true });
    }

    match cli.command {
        Command::Summary(range) => {
            let board = context.dashboard(range.to_range()?)?;
            output::section("Wallet summary");
            println!("{}", dashboard::render_summary(&board));
        }
        Command::Categories(range) => {
            let board = context.dashboard(range.to_range()?)?;
            output::section("Spending by category");
            println!("{}", dashboard::render_categories(&board.categories, &board.formatter));
        }
        Command::Series(range) => {
            let board = context.dashboard(range.to_range()?)?;
            output::section("Income vs expense");
            println!("{}", dashboard::render_series(&board.series, &board.formatter));
        }
        Command::Transactions { range, limit } => {
            let board = context.dashboard(range.to_range()?)?;
            output::section("Transactions");
            println!(
                "{}",
                dashboard::render_transactions(&board.transactions, &board.formatter, limit)
            );
        }
        Command::Budgets => {
            let board = context.dashboard(DateRange::default())?;
            output::section("Budgets");
            println!("{}", dashboard::render_budgets(&board.budgets, &board.formatter));
        }
        Command::Alerts => {
            let board = context.dashboard(DateRange::default())?;
            output::section("Budget alerts");
            println!("{}", dashboard::render_alerts(&board.alerts(), &board.formatter));
        }
        Command::AddTransaction {
            kind,
            category,
            amount,
            date,
            description,
        } => {
            let kind = TransactionKind::parse(&kind).ok_or_else(|| {
                CliError::InvalidArgument(format!("type must be income or expense, got '{kind}'"))
            })?;
            let draft = TransactionService::validate(TransactionInput {
                category: Some(category),
                amount: Some(amount),
                kind: Some(kind),
                description,
                date: Some(date),
            })?;
            let created = context.storage.create_transaction(draft)?;
            output::success(format!("Transaction #{} recorded", created.id));
            if created.is_expense() {
                warn_if_budget_tripped(&context, &created.month_key())?;
            }
        }
        Command::AddBudget {
            month,
            amount,
            alerts,
            category,
        } => {
            let draft = BudgetService::validate_input(BudgetInput {
                month: Some(month),
                amount: Some(amount),
                alerts_enabled: Some(alerts),
                category,
            })?;
            let budgets = context.storage.list_budgets()?;
            match BudgetService::find_same_scope(&budgets, &draft) {
                Some(existing) => {
                    output::info(format!(
                        "{} already has budget #{}; updating it",
                        format_budget_month(&existing.month),
                        existing.id
                    ));
                    let updated = context
                        .storage
                        .update_budget(existing.id, BudgetService::patch_from_draft(&draft))?;
                    output::success(format!(
                        "Budget #{} for {} updated",
                        updated.id,
                        format_budget_month(&updated.month)
                    ));
                }
                None => {
                    let created = context.storage.create_budget(draft)?;
                    output::success(format!(
                        "Budget #{} created for {}",
                        created.id,
                        format_budget_month(&created.month)
                    ));
                }
            }
        }
        Command::UpdateBudget {
            id,
            amount,
            alerts,
            category,
        } => {
            let patch = BudgetPatch {
                amount,
                alerts_enabled: alerts,
                category,
            };
            if patch.is_empty() {
                return Err(CliError::InvalidArgument(
                    "nothing to update; pass --amount, --alerts or --category".into(),
                ));
            }
            let updated = context.storage.update_budget(id, patch)?;
            output::success(format!(
                "Budget #{} for {} updated",
                updated.id,
                format_budget_month(&updated.month)
            ));
        }
        Command::DeleteBudget { id } => {
            context.storage.delete_budget(id)?;
            output::success(format!("Budget #{id} deleted"));
        }
        Command::Export { range, output: path } => {
            let range = range.to_range()?;
            let board = context.dashboard(range)?;
            let csv = build_transactions_csv(&board.transactions)?;
            match path {
                Some(path) => {
                    fs::write(&path, csv)?;
                    output::success(format!(
                        "Exported {} transactions to {}",
                        board.transactions.len(),
                        path.display()
                    ));
                }
                None => println!("{csv}"),
            }
        }
        Command::Version => print_version(),
    }
    Ok(())
}

/// Prints a warning when the budget for `month` has alerts on and is no
/// longer under its ceiling.
fn warn_if_budget_tripped(context: &CliContext, month: &str) -> Result<(), CliError> {
    let board = context.dashboard(DateRange::default())?;
    for view in board.alerts() {
        if view.budget.month != month || !view.budget.alerts_enabled {
            continue;
        }
        let state = match view.status {
            BudgetStatus::Over => "is over budget",
            _ => "is close to its limit",
        };
        output::warning(format!(
            "{} {state}: {} of {}",
            format_budget_month(month),
            board.formatter.format_amount(view.spent),
            board.formatter.format_amount(view.budget.amount)
        ));
    }
    Ok(())
}

fn print_version() {
    let meta = build_info::current();
    output::section(format!("Wallet tracker {}", meta.version));
    println!("  Build hash : {}", meta.git_hash);
    println!("  Built at   : {}", meta.timestamp);
    println!("  Target     : {}", meta.target);
    println!("  Profile    : {}", meta.profile);
}
