//! Aggregations over a transaction snapshot: range filtering, category
//! breakdown, monthly series and headline statistics.
//!
//! Every function borrows its input and returns fresh values, so calling any
//! of them repeatedly on the same slice yields identical output.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
};

use chrono::NaiveDate;
use wallet_domain::{
    month_start, CategoryShare, DateRange, FinancialStats, SeriesPoint, Transaction,
    TransactionKind, WalletSummary,
};

/// Label format for series buckets, e.g. `Mar 2024`.
pub const SERIES_LABEL_FORMAT: &str = "%b %Y";

pub struct SummaryService;

impl SummaryService {
    /// Keeps transactions dated inside `range` (inclusive). An unbounded range
    /// returns every transaction in its original order.
    pub fn filter_by_date_range(transactions: &[Transaction], range: &DateRange) -> Vec<Transaction> {
        if range.is_unbounded() {
            return transactions.to_vec();
        }
        transactions
            .iter()
            .filter(|txn| range.contains(txn.date))
            .cloned()
            .collect()
    }

    /// Sums expenses per category, largest first. Equal values keep the order
    /// in which their categories were first seen.
    pub fn group_expenses_by_category(transactions: &[Transaction]) -> Vec<CategoryShare> {
        let mut totals = CategoryTotals::default();
        for txn in transactions.iter().filter(|txn| txn.is_expense()) {
            totals.add(&txn.category, txn.amount);
        }

        let overall = totals.sum();
        let mut shares: Vec<CategoryShare> = totals
            .into_entries()
            .into_iter()
            .map(|(category, value)| CategoryShare {
                percentage: share_percentage(value, overall),
                category,
                value,
            })
            .collect();
        shares.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
        shares
    }

    /// Buckets income and expense by calendar month, oldest month first.
    pub fn build_income_expense_series(transactions: &[Transaction]) -> Vec<SeriesPoint> {
        let mut buckets: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
        for txn in transactions {
            let bucket = buckets.entry(month_start(&txn.date)).or_insert((0.0, 0.0));
            match txn.kind {
                TransactionKind::Income => bucket.0 += txn.amount,
                TransactionKind::Expense => bucket.1 += txn.amount,
            }
        }

        buckets
            .into_iter()
            .map(|(period_start, (income, expense))| SeriesPoint {
                label: period_start.format(SERIES_LABEL_FORMAT).to_string(),
                income,
                expense,
                period_start,
            })
            .collect()
    }

    pub fn calculate_financial_stats(transactions: &[Transaction]) -> FinancialStats {
        if transactions.is_empty() {
            return FinancialStats::default();
        }

        let mut total_income = 0.0;
        let mut total_expense = 0.0;
        let mut income_categories = CategoryTotals::default();
        let mut expense_categories = CategoryTotals::default();

        for txn in transactions {
            match txn.kind {
                TransactionKind::Income => {
                    total_income += txn.amount;
                    income_categories.add(&txn.category, txn.amount);
                }
                TransactionKind::Expense => {
                    total_expense += txn.amount;
                    expense_categories.add(&txn.category, txn.amount);
                }
            }
        }

        let total_transactions = transactions.len();
        FinancialStats {
            total_transactions,
            total_income,
            total_expense,
            balance: total_income - total_expense,
            average_transaction: (total_income + total_expense) / total_transactions as f64,
            top_income_category: income_categories.top(),
            top_expense_category: expense_categories.top(),
        }
    }

    /// Balance card: totals, per-kind counts and the latest transaction date.
    pub fn summarize_wallet(transactions: &[Transaction]) -> WalletSummary {
        let mut summary = transactions
            .iter()
            .fold(WalletSummary::default(), |mut acc, txn| {
                match txn.kind {
                    TransactionKind::Income => {
                        acc.total_income += txn.amount;
                        acc.income_count += 1;
                    }
                    TransactionKind::Expense => {
                        acc.total_expense += txn.amount;
                        acc.expense_count += 1;
                    }
                }
                acc
            });
        summary.balance = summary.total_income - summary.total_expense;
        summary.last_activity = transactions.iter().map(|txn| txn.date).max();
        summary
    }
}

fn share_percentage(value: f64, overall: f64) -> f64 {
    if overall == 0.0 || overall.is_nan() {
        return 0.0;
    }
    (value / overall * 1000.0).round() / 10.0
}

/// Per-category sums that remember first-seen order.
#[derive(Default)]
struct CategoryTotals {
    entries: Vec<(String, f64)>,
    slots: HashMap<String, usize>,
}

impl CategoryTotals {
    fn add(&mut self, category: &str, amount: f64) {
        if let Some(&slot) = self.slots.get(category) {
            self.entries[slot].1 += amount;
            return;
        }
        self.slots.insert(category.to_string(), self.entries.len());
        self.entries.push((category.to_string(), amount));
    }

    fn sum(&self) -> f64 {
        self.entries.iter().map(|(_, value)| value).sum()
    }

    /// Category with the largest sum; the earliest one wins a tie.
    fn top(&self) -> Option<String> {
        let mut top: Option<&(String, f64)> = None;
        for entry in &self.entries {
            match top {
                Some((_, best)) if entry.1 <= *best => {}
                _ => top = Some(entry),
            }
        }
        top.map(|(name, _)| name.clone())
    }

    fn into_entries(self) -> Vec<(String, f64)> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
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

    #[test]
    fn unbounded_range_is_identity() {
        let list = vec![
            txn(2, TransactionKind::Expense, "Food", 5.0, at(2024, 3, 1)),
            txn(1, TransactionKind::Income, "Pay", 9.0, at(2023, 1, 1)),
        ];
        let filtered = SummaryService::filter_by_date_range(&list, &DateRange::default());
        assert_eq!(filtered, list);
    }

    #[test]
    fn range_filter_applies_each_bound_independently() {
        let list = vec![
            txn(1, TransactionKind::Expense, "Food", 5.0, at(2024, 1, 1)),
            txn(2, TransactionKind::Expense, "Food", 5.0, at(2024, 2, 1)),
            txn(3, TransactionKind::Expense, "Food", 5.0, at(2024, 3, 1)),
        ];
        let from_feb = DateRange::new(Some(at(2024, 2, 1)), None);
        let ids: Vec<u64> = SummaryService::filter_by_date_range(&list, &from_feb)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![2, 3]);

        let until_feb = DateRange::new(None, Some(at(2024, 2, 1)));
        let ids: Vec<u64> = SummaryService::filter_by_date_range(&list, &until_feb)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn category_ties_keep_first_seen_order() {
        let list = vec![
            txn(1, TransactionKind::Expense, "Rent", 50.0, at(2024, 1, 1)),
            txn(2, TransactionKind::Expense, "Food", 50.0, at(2024, 1, 2)),
            txn(3, TransactionKind::Expense, "Fun", 100.0, at(2024, 1, 3)),
            txn(4, TransactionKind::Income, "Pay", 1000.0, at(2024, 1, 3)),
        ];
        let shares = SummaryService::group_expenses_by_category(&list);
        let names: Vec<&str> = shares.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(names, vec!["Fun", "Rent", "Food"]);
        assert_eq!(shares[0].percentage, 50.0);
        assert_eq!(shares[1].percentage, 25.0);
    }

    #[test]
    fn percentages_round_to_one_decimal() {
        let list = vec![
            txn(1, TransactionKind::Expense, "A", 1.0, at(2024, 1, 1)),
            txn(2, TransactionKind::Expense, "B", 1.0, at(2024, 1, 1)),
            txn(3, TransactionKind::Expense, "C", 1.0, at(2024, 1, 1)),
        ];
        let shares = SummaryService::group_expenses_by_category(&list);
        assert!(shares.iter().all(|s| s.percentage == 33.3));
        let total: f64 = shares.iter().map(|s| s.percentage).sum();
        assert!(total <= 100.0 + 1e-9);
    }

    #[test]
    fn no_expenses_means_no_shares() {
        let list = vec![txn(1, TransactionKind::Income, "Pay", 10.0, at(2024, 1, 1))];
        assert!(SummaryService::group_expenses_by_category(&list).is_empty());
    }

    #[test]
    fn series_is_chronological_not_alphabetical() {
        let list = vec![
            txn(1, TransactionKind::Expense, "Food", 10.0, at(2024, 4, 2)),
            txn(2, TransactionKind::Income, "Pay", 100.0, at(2024, 2, 20)),
            txn(3, TransactionKind::Expense, "Food", 5.0, at(2023, 12, 31)),
            txn(4, TransactionKind::Expense, "Food", 7.0, at(2024, 2, 1)),
        ];
        let series = SummaryService::build_income_expense_series(&list);
        let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Dec 2023", "Feb 2024", "Apr 2024"]);
        assert_eq!(series[1].income, 100.0);
        assert_eq!(series[1].expense, 7.0);
    }

    #[test]
    fn top_category_tie_goes_to_first_reaching_the_maximum() {
        let list = vec![
            txn(1, TransactionKind::Income, "Salary", 500.0, at(2024, 1, 1)),
            txn(2, TransactionKind::Income, "Bonus", 300.0, at(2024, 1, 2)),
            txn(3, TransactionKind::Income, "Bonus", 200.0, at(2024, 1, 3)),
        ];
        let stats = SummaryService::calculate_financial_stats(&list);
        assert_eq!(stats.top_income_category.as_deref(), Some("Salary"));
        assert_eq!(stats.top_expense_category, None);
        assert_eq!(stats.average_transaction, 1000.0 / 3.0);
    }

    #[test]
    fn wallet_summary_counts_and_tracks_last_activity() {
        let list = vec![
            txn(1, TransactionKind::Income, "Pay", 100.0, at(2024, 1, 1)),
            txn(2, TransactionKind::Expense, "Food", 30.0, at(2024, 3, 9)),
            txn(3, TransactionKind::Expense, "Food", 20.0, at(2024, 2, 1)),
        ];
        let summary = SummaryService::summarize_wallet(&list);
        assert_eq!(summary.income_count, 1);
        assert_eq!(summary.expense_count, 2);
        assert_eq!(summary.balance, 50.0);
        assert_eq!(summary.last_activity, Some(at(2024, 3, 9)));
        assert_eq!(SummaryService::summarize_wallet(&[]).last_activity, None);
    }
}
