use wallet_domain::{parse_timestamp, NewTransaction, Transaction, TransactionInput};

use crate::CoreError;

pub struct TransactionService;

impl TransactionService {
    /// Checks a raw create payload. Category, type and date are required and
    /// the amount must be a positive finite number.
    pub fn validate(input: TransactionInput) -> Result<NewTransaction, CoreError> {
        let category = input
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| CoreError::invalid("Transaction category is required"))?;
        let kind = input
            .kind
            .ok_or_else(|| CoreError::invalid("Transaction type is required"))?;
        let amount = input
            .amount
            .filter(|a| a.is_finite())
            .ok_or_else(|| CoreError::invalid("Transaction amount must be a number"))?;
        if amount <= 0.0 {
            return Err(CoreError::invalid("Transaction amount must be positive"));
        }
        let raw_date = input
            .date
            .ok_or_else(|| CoreError::invalid("Transaction date is required"))?;
        let date = parse_timestamp(&raw_date).map_err(|err| CoreError::invalid(err.to_string()))?;

        Ok(NewTransaction {
            category,
            amount,
            kind,
            description: input
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            date,
        })
    }

    /// Orders by transaction date, latest first. Equal dates keep input order.
    pub fn newest_first(transactions: &mut [Transaction]) {
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
    }
}
