mod common;

use std::sync::Arc;

use budget_store::{AlertKind, BudgetStore, CategoryEntry, MemoryStorage, STORAGE_KEY};
use common::{memory_store, tracked, NOW_MILLIS};
use insta::assert_snapshot;
use regex::Regex;

fn store_with_category(name: &str, allocated: f64) -> (Arc<MemoryStorage>, BudgetStore) {
    let (storage, mut store) = memory_store();
    store.set_category_budget(name, allocated);
    (storage, store)
}

#[test]
fn ninety_percent_raises_danger() {
    let (_, mut store) = store_with_category("groceries", 100.0);
    let before = store.state().alerts.len();

    store.update_spent_amount("groceries", 90.0);

    let state = store.state();
    assert_eq!(state.budget_categories["groceries"], tracked(100.0, 90.0));
    assert_eq!(state.alerts.len(), before + 1);
    let alert = state.alerts.last().unwrap();
    assert_eq!(alert.kind, AlertKind::Danger);
    assert_eq!(alert.numeric_id(), Some(NOW_MILLIS as u64));
    assert_snapshot!(alert.message.as_str(), @"You've spent 90% of your groceries budget!");
}

#[test]
fn eighty_percent_raises_warning() {
    let (_, mut store) = store_with_category("groceries", 100.0);

    store.update_spent_amount("groceries", 80.0);

    let alert = store.state().alerts.last().unwrap();
    assert_eq!(alert.kind, AlertKind::Warning);
    assert_snapshot!(alert.message.as_str(), @"You've spent 80% of your groceries budget.");
}

#[test]
fn fifty_percent_raises_nothing_but_persists() {
    let (storage, mut store) = store_with_category("groceries", 100.0);
    let before = store.state().alerts.clone();

    store.update_spent_amount("groceries", 50.0);

    assert_eq!(store.state().alerts, before);
    assert_eq!(store.state().budget_categories["groceries"].spent(), 50.0);
    assert_eq!(storage.write_count(), 2);
}

#[test]
fn unknown_category_is_a_no_op() {
    let (storage, mut store) = memory_store();
    let before = store.state().clone();

    store.update_spent_amount("yachts", 10_000.0);

    assert_eq!(store.state(), &before);
    assert_eq!(storage.write_count(), 0);
    assert!(storage.peek(STORAGE_KEY).is_none());
}

#[test]
fn preset_category_accumulates_spend() {
    let (_, mut store) = memory_store();

    store.update_spent_amount("food", 1000.0);
    store.update_spent_amount("food", 500.0);

    let food = &store.state().budget_categories["food"];
    assert_eq!(food, &tracked(3000.0, 1500.0));
    assert_eq!(store.state().alerts.len(), 2);
}

#[test]
fn each_call_adds_at_most_one_alert() {
    let (_, mut store) = store_with_category("travel", 200.0);
    let mut expected_spent = 0.0;

    for step in [10.0, 140.0, 5.0, 30.0, 60.0, -300.0, 250.0] {
        let before = store.state().alerts.len();
        store.update_spent_amount("travel", step);
        expected_spent += step;

        let entry = &store.state().budget_categories["travel"];
        assert_eq!(entry.spent(), expected_spent);
        assert_eq!(entry.allocated(), 200.0);
        assert!(store.state().alerts.len() - before <= 1);
    }
}

#[test]
fn alerts_repeat_while_above_threshold() {
    let (_, mut store) = store_with_category("fun", 100.0);

    store.update_spent_amount("fun", 91.0);
    store.update_spent_amount("fun", 1.0);
    store.update_spent_amount("fun", 0.0);

    let raised: Vec<_> = store
        .state()
        .alerts
        .iter()
        .filter(|alert| alert.id.is_some())
        .collect();
    assert_eq!(raised.len(), 3);
    assert!(raised.iter().all(|alert| alert.kind == AlertKind::Danger));
    assert_eq!(raised[2].message, "You've spent 92% of your fun budget!");

    let mut ids: Vec<u64> = raised.iter().filter_map(|alert| alert.numeric_id()).collect();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[test]
fn alert_timestamps_are_iso_8601() {
    let (_, mut store) = store_with_category("fun", 100.0);
    store.update_spent_amount("fun", 75.0);

    let timestamp = store.state().alerts.last().unwrap().timestamp.clone().unwrap();
    let iso = Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z$").unwrap();
    assert!(iso.is_match(&timestamp), "unexpected timestamp {timestamp}");
    assert_eq!(timestamp, "2024-03-01T12:00:00.000Z");
}

#[test]
fn zero_allocation_reports_infinite_percentage() {
    let (_, mut store) = memory_store();
    store.set_category_budget("misc", 1.0);
    store.set_category_budget("misc", 0.0);
    assert!(matches!(
        store.state().budget_categories["misc"],
        CategoryEntry::Tracked(_)
    ));

    store.update_spent_amount("misc", 5.0);

    let alert = store.state().alerts.last().unwrap();
    assert_eq!(alert.kind, AlertKind::Danger);
    assert_snapshot!(alert.message.as_str(), @"You've spent Infinity% of your misc budget!");
}
