//! The budget state container owned by the application's composition root.

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::state::clock::{AlertStamper, Clock, SystemClock};
use crate::state::reducers::{self, BudgetAction, Persistence};
use crate::domain::{BudgetDocument, BudgetPatch};
use crate::storage::{self, KeyValueStorage};

/// Holds the current budget document and writes it to storage after each persisted change.
///
/// Storage failures never reach the caller: a failed read falls back to the default document
/// and a failed write is logged while the in-memory change stands.
pub struct BudgetStore {
    document: BudgetDocument,
    storage: Box<dyn KeyValueStorage>,
    stamper: AlertStamper,
}

impl BudgetStore {
    /// Loads the stored document (or the defaults) using the system clock for alert stamps.
    pub fn load(storage: Box<dyn KeyValueStorage>) -> Self {
        Self::load_with_clock(storage, Box::new(SystemClock))
    }

    pub fn load_with_clock(storage: Box<dyn KeyValueStorage>, clock: Box<dyn Clock>) -> Self {
        let document = load_initial(storage.as_ref());
        let mut stamper = AlertStamper::new(clock);
        if let Some(id) = document.max_alert_id() {
            stamper.observe(id);
        }
        Self {
            document,
            storage,
            stamper,
        }
    }

    pub fn state(&self) -> &BudgetDocument {
        &self.document
    }

    /// Applies `action` and persists the result when the action touched persisted fields.
    pub fn dispatch(&mut self, action: BudgetAction) -> &BudgetDocument {
        let name = action.name();
        let current = std::mem::take(&mut self.document);
        let transition = reducers::reduce(current, action, &mut self.stamper);
        self.document = transition.document;
        debug!(action = name, persistence = ?transition.persistence, "dispatched");
        if transition.persistence == Persistence::Write {
            self.persist();
        }
        &self.document
    }

    pub fn set_budget_data(&mut self, patch: impl Into<BudgetPatch>) -> &BudgetDocument {
        self.dispatch(BudgetAction::SetBudgetData(patch.into()))
    }

    pub fn set_budget(&mut self, amount: f64) {
        self.dispatch(BudgetAction::SetBudget(amount));
    }

    pub fn set_category_budget(&mut self, category: impl Into<String>, amount: f64) {
        self.dispatch(BudgetAction::SetCategoryBudget {
            category: category.into(),
            amount,
        });
    }

    pub fn update_spent_amount(&mut self, category: impl Into<String>, amount: f64) {
        self.dispatch(BudgetAction::UpdateSpentAmount {
            category: category.into(),
            amount,
        });
    }

    pub fn dismiss_alert(&mut self, alert_id: u64) {
        self.dispatch(BudgetAction::DismissAlert(alert_id));
    }

    pub fn set_loading(&mut self, flag: bool) {
        self.dispatch(BudgetAction::SetLoading(flag));
    }

    pub fn set_error(&mut self, error: Option<Value>) {
        self.dispatch(BudgetAction::SetError(error));
    }

    fn persist(&self) {
        match storage::write_document(self.storage.as_ref(), &self.document) {
            Ok(()) => debug!(key = storage::STORAGE_KEY, "budget persisted"),
            Err(err) => error!(
                key = storage::STORAGE_KEY,
                "failed to persist budget, keeping in-memory state: {}", err
            ),
        }
    }
}

impl std::fmt::Debug for BudgetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetStore")
            .field("document", &self.document)
            .field("stamper", &self.stamper)
            .finish_non_exhaustive()
    }
}

/// Reads the stored document, substituting the default document when nothing usable is
/// stored. Never fails.
pub fn load_initial(storage: &dyn KeyValueStorage) -> BudgetDocument {
    match storage::read_document(storage) {
        Ok(Some(document)) => document,
        Ok(None) => {
            debug!(key = storage::STORAGE_KEY, "no stored budget, using defaults");
            BudgetDocument::default()
        }
        Err(err) => {
            warn!(
                key = storage::STORAGE_KEY,
                "failed to load stored budget, using defaults: {}", err
            );
            BudgetDocument::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::state::clock::FixedClock;
    use crate::domain::{AlertId, AlertKind, CategoryBudget, CategoryEntry};
    use crate::storage::{MemoryStorage, STORAGE_KEY};

    const NOW: i64 = 1_709_294_400_000;

    fn store_on(storage: &Arc<MemoryStorage>) -> BudgetStore {
        BudgetStore::load_with_clock(
            Box::new(Arc::clone(storage)),
            Box::new(FixedClock::at_millis(NOW)),
        )
    }

    #[test]
    fn empty_storage_loads_defaults() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_on(&storage);
        assert_eq!(store.state(), &BudgetDocument::default());
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn read_failure_loads_defaults() {
        let storage = Arc::new(MemoryStorage::new().seeded(STORAGE_KEY, "{}"));
        storage.fail_reads(true);
        let store = store_on(&storage);
        assert_eq!(store.state(), &BudgetDocument::default());
    }

    #[test]
    fn write_failure_keeps_in_memory_change() {
        let storage = Arc::new(MemoryStorage::new());
        storage.fail_writes(true);
        let mut store = store_on(&storage);
        store.set_budget(42.0);
        assert_eq!(store.state().total_budget, 42.0);
        assert_eq!(storage.write_count(), 1);
        assert!(storage.peek(STORAGE_KEY).is_none());
    }

    #[test]
    fn stamper_continues_after_loaded_ids() {
        let mut doc = BudgetDocument::default();
        doc.budget_categories.insert(
            "fun".into(),
            CategoryEntry::Tracked(CategoryBudget::new(100.0)),
        );
        doc.alerts[0].id = Some(AlertId::from(NOW as u64 + 50));
        let raw = serde_json::to_string(&doc).unwrap();
        let storage = Arc::new(MemoryStorage::new().seeded(STORAGE_KEY, &raw));

        let mut store = store_on(&storage);
        store.update_spent_amount("fun", 95.0);
        let alert = store.state().alerts.last().unwrap();
        assert_eq!(alert.kind, AlertKind::Danger);
        assert_eq!(alert.numeric_id(), Some(NOW as u64 + 51));
    }

    #[test]
    fn maximal_stored_alert_id_does_not_panic_on_spend() {
        let raw = r#"{"budgetCategories":{"rent":{"allocated":100,"spent":0}},"alerts":[{"id":18446744073709551615,"type":"info","message":"old"}]}"#;
        let storage = Arc::new(MemoryStorage::new().seeded(STORAGE_KEY, raw));

        let mut store = store_on(&storage);
        store.update_spent_amount("rent", 95.0);

        let alert = store.state().alerts.last().unwrap();
        assert_eq!(alert.kind, AlertKind::Danger);
        assert_eq!(alert.numeric_id(), Some(u64::MAX));
        assert_eq!(storage.write_count(), 1);
    }
}
