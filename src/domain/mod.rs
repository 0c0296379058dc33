//! Serializable types that make up the budget document.

pub mod alert;
pub mod budget;
pub mod patch;

pub use alert::{
    format_percentage, Alert, AlertId, AlertKind, AlertStamp, DANGER_THRESHOLD, WARNING_THRESHOLD,
};
pub use budget::{
    BudgetDocument, CategoryBudget, CategoryEntry, DEFAULT_CATEGORIES, DEFAULT_TOTAL_BUDGET,
};
pub use patch::BudgetPatch;
