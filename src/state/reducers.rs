//! Pure state transitions for the budget document.
//!
//! Every reducer takes the current document by value and returns the next one. None of them
//! touch storage; the [`Persistence`] attached to a [`Transition`] tells the caller whether the
//! result must be written.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::clock::AlertStamper;
use crate::domain::{Alert, BudgetDocument, BudgetPatch, CategoryBudget, CategoryEntry};

/// Whether a transition changed persisted fields and must be written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    Write,
    Skip,
}

/// Result of applying an action to a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub document: BudgetDocument,
    pub persistence: Persistence,
}

impl Transition {
    fn write(document: BudgetDocument) -> Self {
        Self {
            document,
            persistence: Persistence::Write,
        }
    }

    fn skip(document: BudgetDocument) -> Self {
        Self {
            document,
            persistence: Persistence::Skip,
        }
    }
}

/// The operations a caller can dispatch, in their wire form
/// (`{"type": "budget/setBudget", "payload": 5000}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload")]
pub enum BudgetAction {
    #[serde(rename = "budget/setBudgetData")]
    SetBudgetData(BudgetPatch),
    #[serde(rename = "budget/setBudget")]
    SetBudget(f64),
    #[serde(rename = "budget/setCategoryBudget")]
    SetCategoryBudget { category: String, amount: f64 },
    #[serde(rename = "budget/updateSpentAmount")]
    UpdateSpentAmount { category: String, amount: f64 },
    #[serde(rename = "budget/dismissAlert")]
    DismissAlert(u64),
    #[serde(rename = "budget/setLoading")]
    SetLoading(bool),
    #[serde(rename = "budget/setError")]
    SetError(Option<Value>),
}

impl BudgetAction {
    pub fn name(&self) -> &'static str {
        match self {
            BudgetAction::SetBudgetData(_) => "budget/setBudgetData",
            BudgetAction::SetBudget(_) => "budget/setBudget",
            BudgetAction::SetCategoryBudget { .. } => "budget/setCategoryBudget",
            BudgetAction::UpdateSpentAmount { .. } => "budget/updateSpentAmount",
            BudgetAction::DismissAlert(_) => "budget/dismissAlert",
            BudgetAction::SetLoading(_) => "budget/setLoading",
            BudgetAction::SetError(_) => "budget/setError",
        }
    }
}

/// Applies `action` to `document`.
pub fn reduce(
    document: BudgetDocument,
    action: BudgetAction,
    stamper: &mut AlertStamper,
) -> Transition {
    match action {
        BudgetAction::SetBudgetData(patch) => {
            let document = set_budget_data(document, patch);
            if let Some(id) = document.max_alert_id() {
                stamper.observe(id);
            }
            Transition::write(document)
        }
        BudgetAction::SetBudget(amount) => Transition::write(set_budget(document, amount)),
        BudgetAction::SetCategoryBudget { category, amount } => {
            Transition::write(set_category_budget(document, &category, amount))
        }
        BudgetAction::UpdateSpentAmount { category, amount } => {
            update_spent_amount(document, &category, amount, stamper)
        }
        BudgetAction::DismissAlert(id) => Transition::write(dismiss_alert(document, id)),
        BudgetAction::SetLoading(flag) => Transition::skip(set_loading(document, flag)),
        BudgetAction::SetError(error) => Transition::skip(set_error(document, error)),
    }
}

pub fn set_budget_data(document: BudgetDocument, patch: BudgetPatch) -> BudgetDocument {
    patch.apply_to(document)
}

pub fn set_budget(mut document: BudgetDocument, amount: f64) -> BudgetDocument {
    document.total_budget = amount;
    document
}

/// Overwrites the allocation of an existing category, or creates it with nothing spent.
/// Entries that do not count as present are replaced.
pub fn set_category_budget(
    mut document: BudgetDocument,
    category: &str,
    amount: f64,
) -> BudgetDocument {
    let entry = match document.category(category) {
        Some(existing) => CategoryBudget {
            allocated: amount,
            ..existing.to_budget()
        },
        None => CategoryBudget::new(amount),
    };
    document
        .budget_categories
        .insert(category.to_string(), CategoryEntry::Tracked(entry));
    document
}

/// Adds `amount` to a category's spend and appends an alert when the new spend sits at or
/// above a threshold. Unknown categories leave the document untouched and skip persistence.
pub fn update_spent_amount(
    mut document: BudgetDocument,
    category: &str,
    amount: f64,
    stamper: &mut AlertStamper,
) -> Transition {
    let Some(existing) = document.category(category) else {
        return Transition::skip(document);
    };
    let mut budget = existing.to_budget();
    budget.spent += amount;
    document
        .budget_categories
        .insert(category.to_string(), CategoryEntry::Tracked(budget));

    let percentage = budget.percentage();
    if let Some(alert) = Alert::for_spend(category, percentage, || stamper.next_stamp()) {
        document.alerts.push(alert);
    }
    Transition::write(document)
}

/// Drops every alert carrying `id`, keeping the rest in order.
pub fn dismiss_alert(mut document: BudgetDocument, id: u64) -> BudgetDocument {
    document.alerts.retain(|alert| alert.numeric_id() != Some(id));
    document
}

pub fn set_loading(mut document: BudgetDocument, flag: bool) -> BudgetDocument {
    document.is_loading = flag;
    document
}

pub fn set_error(mut document: BudgetDocument, error: Option<Value>) -> BudgetDocument {
    document.error = error;
    document
}
