#![doc(test(attr(deny(warnings))))]

//! finboard turns raw transaction and budget records into budget-vs-actual reports:
//! per-category totals, variance rows, trend series and page windows, ready for any
//! presentation layer.

pub mod cli;
pub mod errors;
pub mod services;
pub mod storage;
pub mod utils;

pub use finboard_config as config;
pub use finboard_core as engine;
pub use finboard_domain as domain;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("finboard tracing initialized.");
    });
}
