#![doc(test(attr(deny(warnings))))]

//! Wallet tracker: a terminal dashboard and admin tool over the wallet
//! document shared with the HTTP server.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing once per process.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("wallet tracker tracing initialized");
    });
}
