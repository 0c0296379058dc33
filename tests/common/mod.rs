#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use budget_store::{
    state::FixedClock, BudgetStore, CategoryBudget, CategoryEntry, MemoryStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// 2024-03-01T12:00:00.000Z
pub const NOW_MILLIS: i64 = 1_709_294_400_000;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Returns a fresh directory that is removed when the test binary exits.
pub fn temp_root() -> std::path::PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Opens a store over `storage` with a frozen clock, as a fresh process would.
pub fn store_on(storage: &Arc<MemoryStorage>) -> BudgetStore {
    BudgetStore::load_with_clock(
        Box::new(Arc::clone(storage)),
        Box::new(FixedClock::at_millis(NOW_MILLIS)),
    )
}

/// Empty storage plus a store loaded from it.
pub fn memory_store() -> (Arc<MemoryStorage>, BudgetStore) {
    let storage = Arc::new(MemoryStorage::new());
    let store = store_on(&storage);
    (storage, store)
}

pub fn tracked(allocated: f64, spent: f64) -> CategoryEntry {
    CategoryEntry::Tracked(CategoryBudget { allocated, spent })
}
