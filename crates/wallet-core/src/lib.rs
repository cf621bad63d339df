//! wallet-core
//!
//! Business logic and services for the wallet tracker.
//! Depends on wallet-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod budget_service;
pub mod error;
pub mod format;
pub mod storage;
pub mod summary_service;
pub mod time;
pub mod transaction_service;

pub use budget_service::*;
pub use error::CoreError;
pub use summary_service::*;
pub use transaction_service::*;

#[cfg(test)]
mod tests;
