//! Text rendering of the wallet dashboard.
//!
//! A [`Dashboard`] is a plain snapshot built from freshly loaded lists; the
//! `render_*` functions turn its parts into display strings without touching
//! the terminal.

use std::fmt::Write;

use wallet_core::{
    format::{format_budget_month, CurrencyFormatter, DateFormatter, DefaultFormatter},
    BudgetService, SummaryService,
};
use wallet_domain::{
    BudgetRecord, BudgetStatus, BudgetWithProgress, CategoryShare, DateRange, FinancialStats,
    Metadata, SeriesPoint, Transaction, WalletSummary,
};

/// Everything the dashboard shows, derived from one read of the store.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub formatter: DefaultFormatter,
    pub range: DateRange,
    /// Transactions inside `range`, newest first.
    pub transactions: Vec<Transaction>,
    pub summary: WalletSummary,
    pub stats: FinancialStats,
    pub categories: Vec<CategoryShare>,
    pub series: Vec<SeriesPoint>,
    /// Budget progress is measured against every transaction, not just the range.
    pub budgets: Vec<BudgetWithProgress>,
}

impl Dashboard {
    pub fn build(
        metadata: &Metadata,
        transactions: &[Transaction],
        budgets: &[BudgetRecord],
        range: DateRange,
    ) -> Self {
        let filtered = SummaryService::filter_by_date_range(transactions, &range);
        Self {
            formatter: DefaultFormatter::new(metadata.currency.clone()),
            range,
            summary: SummaryService::summarize_wallet(&filtered),
            stats: SummaryService::calculate_financial_stats(&filtered),
            categories: SummaryService::group_expenses_by_category(&filtered),
            series: SummaryService::build_income_expense_series(&filtered),
            budgets: BudgetService::build_budgets_with_progress(budgets, transactions),
            transactions: filtered,
        }
    }

    /// Renders dates in the layout customary for `locale`.
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.formatter = self.formatter.with_locale(locale);
        self
    }

    pub fn alerts(&self) -> Vec<BudgetWithProgress> {
        BudgetService::select_budget_alerts(self.budgets.clone())
    }
}

pub fn render_range(range: &DateRange, dates: &dyn DateFormatter) -> String {
    match (range.start, range.end) {
        (None, None) => "All time".to_string(),
        (Some(start), None) => format!("From {}", dates.format_date(start)),
        (None, Some(end)) => format!("Until {}", dates.format_date(end)),
        (Some(start), Some(end)) => format!(
            "{} to {}",
            dates.format_date(start),
            dates.format_date(end)
        ),
    }
}

pub fn render_summary(dashboard: &Dashboard) -> String {
    let fmt = &dashboard.formatter;
    let summary = &dashboard.summary;
    let stats = &dashboard.stats;
    let mut out = String::new();

    let _ = writeln!(out, "Period        : {}", render_range(&dashboard.range, fmt));
    let _ = writeln!(out, "Balance       : {}", fmt.format_amount(summary.balance));
    let _ = writeln!(
        out,
        "Income        : {} ({} transactions)",
        fmt.format_amount(summary.total_income),
        summary.income_count
    );
    let _ = writeln!(
        out,
        "Expense       : {} ({} transactions)",
        fmt.format_amount(summary.total_expense),
        summary.expense_count
    );
    let _ = writeln!(out, "Average       : {}", fmt.format_amount(stats.average_transaction));
    let _ = writeln!(
        out,
        "Top income    : {}",
        stats.top_income_category.as_deref().unwrap_or("-")
    );
    let _ = writeln!(
        out,
        "Top expense   : {}",
        stats.top_expense_category.as_deref().unwrap_or("-")
    );
    let last = summary
        .last_activity
        .map(|date| fmt.format_date(date))
        .unwrap_or_else(|| "-".to_string());
    let _ = write!(out, "Last activity : {last}");
    out
}

pub fn render_categories(shares: &[CategoryShare], fmt: &dyn CurrencyFormatter) -> String {
    if shares.is_empty() {
        return "No expenses in this period.".to_string();
    }
    let width = shares
        .iter()
        .map(|share| share.category.chars().count())
        .max()
        .unwrap_or(0);
    shares
        .iter()
        .map(|share| {
            format!(
                "{:<width$}  {:>6.1}%  {}",
                share.category,
                share.percentage,
                fmt.format_amount(share.value),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_series(series: &[SeriesPoint], fmt: &dyn CurrencyFormatter) -> String {
    if series.is_empty() {
        return "No data available for the selected date range.".to_string();
    }
    series
        .iter()
        .map(|point| {
            format!(
                "{:<8}  income {}  expense {}",
                point.label,
                fmt.format_amount(point.income),
                fmt.format_amount(point.expense),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn status_label(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::Under => "on track",
        BudgetStatus::Warning => "warning",
        BudgetStatus::Over => "over budget",
    }
}

pub fn render_budgets(budgets: &[BudgetWithProgress], fmt: &dyn CurrencyFormatter) -> String {
    if budgets.is_empty() {
        return "No budgets yet.".to_string();
    }
    budgets
        .iter()
        .map(|view| {
            let budget = &view.budget;
            let scope = budget
                .category
                .as_deref()
                .map(|category| format!(" [{category}]"))
                .unwrap_or_default();
            format!(
                "#{} {}{scope}: {} of {} ({:.0}%, {}), alerts {}",
                budget.id,
                format_budget_month(&budget.month),
                fmt.format_amount(view.spent),
                fmt.format_amount(budget.amount),
                view.progress,
                status_label(view.status),
                if budget.alerts_enabled { "on" } else { "off" },
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per alert: month, mute state, spend and the amount left or over.
pub fn render_alerts(alerts: &[BudgetWithProgress], fmt: &dyn CurrencyFormatter) -> String {
    if alerts.is_empty() {
        return "All budgets are on track.".to_string();
    }
    alerts
        .iter()
        .map(|view| {
            let remaining = view.remaining();
            let direction = if view.status == BudgetStatus::Over {
                "over"
            } else {
                "left"
            };
            format!(
                "{} ({}): {} spent, {} {direction}",
                format_budget_month(&view.budget.month),
                if view.budget.alerts_enabled {
                    "Alerts enabled"
                } else {
                    "Alerts muted"
                },
                fmt.format_amount(view.spent),
                fmt.format_amount(remaining.abs()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_transactions(transactions: &[Transaction], fmt: &DefaultFormatter, limit: Option<usize>) -> String {
    if transactions.is_empty() {
        return "No transactions in this period.".to_string();
    }
    let shown = limit.unwrap_or(transactions.len()).min(transactions.len());
    let mut lines: Vec<String> = transactions[..shown]
        .iter()
        .map(|txn| {
            let sign = if txn.is_expense() { "-" } else { "+" };
            let description = txn
                .description
                .as_deref()
                .map(|text| format!("  {text}"))
                .unwrap_or_default();
            format!(
                "#{:<4} {:<11} {:<7} {:<14} {sign}{}{description}",
                txn.id,
                fmt.format_date(txn.date),
                txn.kind.as_str(),
                txn.category,
                fmt.format_amount(txn.amount),
            )
        })
        .collect();
    if shown < transactions.len() {
        lines.push(format!("... {} more", transactions.len() - shown));
    }
    lines.join("\n")
}
