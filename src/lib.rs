#![doc(test(attr(deny(warnings))))]

//! Budget Store holds a budget document (total budget, per-category allocations and spend,
//! threshold alerts) and persists it to a key-value storage backend after every change.

pub mod config;
pub mod domain;
pub mod errors;
pub mod state;
pub mod storage;
pub mod utils;

use std::sync::Once;

pub use crate::domain::{
    Alert, AlertId, AlertKind, BudgetDocument, BudgetPatch, CategoryBudget, CategoryEntry,
};
pub use crate::errors::{BudgetError, Result};
pub use crate::state::{BudgetAction, BudgetStore, BudgetSummary};
pub use crate::storage::{JsonFileStorage, KeyValueStorage, MemoryStorage, STORAGE_KEY};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Store tracing initialized.");
    });
}

/// Initializes tracing with the directive from `config`.
pub fn init_with_config(config: &config::Config) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing_with(&config.log_directive);
        tracing::info!("Budget Store tracing initialized.");
    });
}
