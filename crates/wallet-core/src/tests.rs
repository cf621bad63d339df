use chrono::{DateTime, TimeZone, Utc};

use crate::{
    budget_service::BudgetService, storage::document_warnings, summary_service::SummaryService,
    time::{Clock, FixedClock},
};
use wallet_domain::{
    BudgetRecord, BudgetStatus, DateRange, FinancialStats, Metadata, Transaction, TransactionKind,
    WalletDocument,
};

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn txn(id: u64, kind: TransactionKind, category: &str, amount: f64, date: DateTime<Utc>) -> Transaction {
    Transaction {
        id,
        category: category.into(),
        amount,
        kind,
        description: None,
        date,
        created_at: date,
        updated_at: date,
    }
}

fn budget(id: u64, month: &str, amount: f64) -> BudgetRecord {
    let created = at(2024, 1, 1);
    BudgetRecord {
        id,
        month: month.into(),
        amount,
        category: None,
        alerts_enabled: true,
        created_at: created,
        updated_at: created,
    }
}

fn household() -> Vec<Transaction> {
    vec![
        txn(1, TransactionKind::Income, "Salary", 1000.0, at(2024, 1, 5)),
        txn(2, TransactionKind::Expense, "Food", 400.0, at(2024, 1, 10)),
        txn(3, TransactionKind::Expense, "Food", 700.0, at(2024, 2, 1)),
    ]
}

#[test]
fn household_scenario_budget_progress() {
    let views = BudgetService::build_budgets_with_progress(&[budget(1, "2024-01", 500.0)], &household());

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].spent, 400.0);
    assert_eq!(views[0].progress, 80.0);
    assert_eq!(views[0].status, BudgetStatus::Warning);
    assert_eq!(views[0].remaining(), 100.0);
}

#[test]
fn household_scenario_categories_and_stats() {
    let transactions = household();

    let shares = SummaryService::group_expenses_by_category(&transactions);
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].category, "Food");
    assert_eq!(shares[0].value, 1100.0);
    assert_eq!(shares[0].percentage, 100.0);

    let stats = SummaryService::calculate_financial_stats(&transactions);
    assert_eq!(stats.total_transactions, 3);
    assert_eq!(stats.balance, -100.0);
    assert_eq!(stats.top_income_category.as_deref(), Some("Salary"));
    assert_eq!(stats.top_expense_category.as_deref(), Some("Food"));
    assert_eq!(stats.balance, stats.total_income - stats.total_expense);
}

#[test]
fn household_scenario_filtered_to_january() {
    let range = DateRange::parse(Some("2024-01-01"), Some("2024-01-31")).unwrap();
    let january = SummaryService::filter_by_date_range(&household(), &range);
    assert_eq!(january.len(), 2);

    let series = SummaryService::build_income_expense_series(&january);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].label, "Jan 2024");
    assert_eq!(series[0].income, 1000.0);
    assert_eq!(series[0].expense, 400.0);
}

#[test]
fn empty_ledger_produces_neutral_stats() {
    let stats = SummaryService::calculate_financial_stats(&[]);
    assert_eq!(stats, FinancialStats::default());
    assert_eq!(stats.top_income_category, None);
    assert!(SummaryService::build_income_expense_series(&[]).is_empty());
    assert!(SummaryService::group_expenses_by_category(&[]).is_empty());
}

#[test]
fn zero_budget_without_spend_is_under_at_full_progress() {
    let views = BudgetService::build_budgets_with_progress(&[budget(9, "2024-05", 0.0)], &household());
    assert_eq!(views[0].spent, 0.0);
    assert_eq!(views[0].status, BudgetStatus::Under);
    assert_eq!(views[0].progress, 100.0);
}

#[test]
fn aggregations_are_idempotent() {
    let transactions = household();
    let budgets = vec![budget(1, "2024-01", 500.0), budget(2, "2024-02", 600.0)];

    assert_eq!(
        SummaryService::group_expenses_by_category(&transactions),
        SummaryService::group_expenses_by_category(&transactions)
    );
    assert_eq!(
        SummaryService::build_income_expense_series(&transactions),
        SummaryService::build_income_expense_series(&transactions)
    );
    assert_eq!(
        SummaryService::calculate_financial_stats(&transactions),
        SummaryService::calculate_financial_stats(&transactions)
    );
    let first = BudgetService::build_budgets_with_progress(&budgets, &transactions);
    let second = BudgetService::build_budgets_with_progress(&budgets, &transactions);
    assert_eq!(first, second);
    assert_eq!(transactions, household());
}

#[test]
fn overspent_month_leads_the_alerts() {
    let budgets = vec![budget(1, "2024-01", 500.0), budget(2, "2024-02", 600.0)];
    let views = BudgetService::build_budgets_with_progress(&budgets, &household());
    let alerts = BudgetService::select_budget_alerts(views);

    let summary: Vec<(u64, BudgetStatus)> = alerts.iter().map(|a| (a.budget.id, a.status)).collect();
    assert_eq!(
        summary,
        vec![(2, BudgetStatus::Over), (1, BudgetStatus::Warning)]
    );
    assert!(alerts[0].progress <= 150.0);
}

#[test]
fn percentages_never_exceed_one_hundred() {
    let transactions: Vec<Transaction> = (1..=7)
        .map(|i| txn(i, TransactionKind::Expense, &format!("C{i}"), i as f64 * 3.3, at(2024, 3, 1)))
        .collect();
    let total: f64 = SummaryService::group_expenses_by_category(&transactions)
        .iter()
        .map(|share| share.percentage)
        .sum();
    assert!(total <= 100.0 + 0.1 * 7.0);
    assert!(total > 99.0);
}

#[test]
fn warnings_flag_duplicate_ids_and_months() {
    let clock = FixedClock(at(2024, 1, 1));
    let mut document = WalletDocument::empty(Metadata::new("irr", clock.now()));
    document.budgets = vec![budget(1, "2024-01", 10.0), budget(1, "2024-01", 20.0)];
    document.transactions = household();

    let warnings = document_warnings(&document);
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().any(|w| w.contains("budget id 1")));
    assert!(warnings.iter().any(|w| w.contains("month 2024-01")));
    assert_eq!(document.metadata.currency, "IRR");
}
