//! wallet-domain
//!
//! Pure domain models (Transaction, BudgetRecord, report rows, the persisted document).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod analytics;
pub mod budget;
pub mod common;
pub mod document;
pub mod transaction;

pub use analytics::*;
pub use budget::*;
pub use common::*;
pub use document::*;
pub use transaction::*;
