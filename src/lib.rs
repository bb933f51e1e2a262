#![doc(test(attr(deny(warnings))))]

//! Pledge Ledger tracks monthly pledges made by members of a congregation
//! toward a missions fund: who promised what, what each person paid per
//! month, and what is still pending across the whole roster.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod session;
pub mod storage;
pub mod utils;
pub mod views;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Pledge ledger tracing initialized.");
    });
}
