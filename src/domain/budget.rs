//! The budget document held by the store and written to storage.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::alert::{Alert, AlertKind};

pub const DEFAULT_TOTAL_BUDGET: f64 = 10_000.0;

/// Preset category allocations used when no stored document exists.
pub const DEFAULT_CATEGORIES: [(&str, f64); 6] = [
    ("food", 3000.0),
    ("transport", 1500.0),
    ("entertainment", 1000.0),
    ("accommodation", 2500.0),
    ("activities", 1000.0),
    ("other", 1000.0),
];

/// Reads a stored number. Non-finite values are written as `null`, so `null` reads back as
/// NaN; numeric strings are parsed and anything else becomes NaN instead of failing the load.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value))
}

fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => text.trim().parse().unwrap_or(f64::NAN),
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        _ => f64::NAN,
    }
}

/// Allocation and cumulative spend tracked for a single category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategoryBudget {
    #[serde(default, deserialize_with = "lenient_number")]
    pub allocated: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub spent: f64,
}

impl CategoryBudget {
    pub fn new(allocated: f64) -> Self {
        Self {
            allocated,
            spent: 0.0,
        }
    }

    /// Spend as a percentage of the allocation. Zero allocations yield infinity or NaN.
    pub fn percentage(&self) -> f64 {
        self.spent / self.allocated * 100.0
    }
}

/// Value stored under a category key.
///
/// Stored documents carry either the full `{allocated, spent}` object or a bare allocation
/// number (the preset categories use the bare form). `null` is accepted as an empty slot and
/// any other value is kept untouched in `Other`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum CategoryEntry {
    Tracked(CategoryBudget),
    Amount(f64),
    Empty,
    Other(Value),
}

impl<'de> Deserialize<'de> for CategoryEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(CategoryEntry::from(Value::deserialize(deserializer)?))
    }
}

impl From<Value> for CategoryEntry {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CategoryEntry::Empty,
            Value::Number(number) => CategoryEntry::Amount(number.as_f64().unwrap_or(f64::NAN)),
            Value::Object(fields) => {
                let value = Value::Object(fields);
                match CategoryBudget::deserialize(&value) {
                    Ok(budget) => CategoryEntry::Tracked(budget),
                    Err(_) => CategoryEntry::Other(value),
                }
            }
            other => CategoryEntry::Other(other),
        }
    }
}

impl CategoryEntry {
    /// Whether the entry counts as an existing category. Objects always do; bare amounts only
    /// when non-zero; empty slots never.
    pub fn is_present(&self) -> bool {
        match self {
            CategoryEntry::Tracked(_) => true,
            CategoryEntry::Amount(amount) => *amount != 0.0 && !amount.is_nan(),
            CategoryEntry::Empty => false,
            CategoryEntry::Other(value) => match value {
                Value::Null => false,
                Value::Bool(flag) => *flag,
                Value::String(text) => !text.is_empty(),
                Value::Number(number) => number
                    .as_f64()
                    .map_or(false, |amount| amount != 0.0 && !amount.is_nan()),
                Value::Array(_) | Value::Object(_) => true,
            },
        }
    }

    pub fn allocated(&self) -> f64 {
        match self {
            CategoryEntry::Tracked(budget) => budget.allocated,
            CategoryEntry::Amount(amount) => *amount,
            CategoryEntry::Empty | CategoryEntry::Other(_) => 0.0,
        }
    }

    pub fn spent(&self) -> f64 {
        match self {
            CategoryEntry::Tracked(budget) => budget.spent,
            _ => 0.0,
        }
    }

    /// Converts the entry to its object form, keeping a bare amount as the allocation.
    pub fn to_budget(&self) -> CategoryBudget {
        match self {
            CategoryEntry::Tracked(budget) => *budget,
            CategoryEntry::Amount(amount) => CategoryBudget::new(*amount),
            CategoryEntry::Empty | CategoryEntry::Other(_) => CategoryBudget::new(0.0),
        }
    }
}

impl From<CategoryBudget> for CategoryEntry {
    fn from(budget: CategoryBudget) -> Self {
        CategoryEntry::Tracked(budget)
    }
}

/// The full budget state: persisted fields plus the transient loading/error flags.
///
/// Every field is defaulted on deserialization and unknown top-level keys are carried through
/// `extra`, so a well-formed document of a different shape still loads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDocument {
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_budget: f64,
    #[serde(default)]
    pub budget_categories: BTreeMap<String, CategoryEntry>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub is_loading: bool,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl BudgetDocument {
    /// Returns the category entry only when it counts as present.
    pub fn category(&self, name: &str) -> Option<&CategoryEntry> {
        self.budget_categories
            .get(name)
            .filter(|entry| entry.is_present())
    }

    /// Highest alert id currently held, if any alert carries one.
    pub fn max_alert_id(&self) -> Option<u64> {
        self.alerts.iter().filter_map(Alert::numeric_id).max()
    }
}

impl Default for BudgetDocument {
    fn default() -> Self {
        let budget_categories = DEFAULT_CATEGORIES
            .iter()
            .map(|(name, amount)| (name.to_string(), CategoryEntry::Amount(*amount)))
            .collect();
        Self {
            total_budget: DEFAULT_TOTAL_BUDGET,
            budget_categories,
            alerts: vec![
                Alert::seed(AlertKind::Warning, "You've used 90% of your food budget!"),
                Alert::seed(AlertKind::Info, "New cashback offer on dining this weekend."),
            ],
            is_loading: false,
            error: None,
            extra: BTreeMap::new(),
        }
    }
}
