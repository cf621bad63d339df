//! Domain models for recorded income and expense transactions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::month_key;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Direction of money movement for a transaction.
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single dated income or expense record. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    pub category: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Materializes a validated draft with server-assigned fields.
    pub fn from_new(id: u64, draft: NewTransaction, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            category: draft.category,
            amount: draft.amount,
            kind: draft.kind,
            description: draft.description,
            date: draft.date,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// `YYYY-MM` key of the month the transaction happened in.
    pub fn month_key(&self) -> String {
        month_key(&self.date)
    }
}

/// Raw create payload as received from a client; every field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default, rename = "type")]
    pub kind: Option<TransactionKind>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// A transaction draft that passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub category: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn serializes_with_wire_field_names() {
        let at = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        let draft = NewTransaction {
            category: "Salary".into(),
            amount: 1000.0,
            kind: TransactionKind::Income,
            description: None,
            date: at,
        };
        let txn = Transaction::from_new(7, draft, at);
        let json = serde_json::to_value(&txn).unwrap();

        assert_eq!(json["type"], "income");
        assert_eq!(json["createdAt"], "2024-01-05T00:00:00Z");
        assert!(json.get("description").is_none());
        assert_eq!(txn.month_key(), "2024-01");
    }

    #[test]
    fn input_tolerates_missing_fields() {
        let input: TransactionInput = serde_json::from_str(r#"{"category":"Food"}"#).unwrap();
        assert_eq!(input.category.as_deref(), Some("Food"));
        assert!(input.amount.is_none());
        assert!(input.kind.is_none());
    }

    #[test]
    fn kind_parse_is_case_insensitive() {
        assert_eq!(TransactionKind::parse(" Expense "), Some(TransactionKind::Expense));
        assert_eq!(TransactionKind::parse("transfer"), None);
    }
}
