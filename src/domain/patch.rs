use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{Alert, BudgetDocument, CategoryEntry};

/// A partial document. Present fields replace the current value wholesale; absent fields are
/// left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_categories: Option<BTreeMap<String, CategoryEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerts: Option<Vec<Alert>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_loading: Option<bool>,
    /// `Some(None)` clears the error; `None` leaves it untouched.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<Option<Value>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl BudgetPatch {
    /// A patch that replaces every field of the target with `document`'s values.
    pub fn from_document(document: BudgetDocument) -> Self {
        Self {
            total_budget: Some(document.total_budget),
            budget_categories: Some(document.budget_categories),
            alerts: Some(document.alerts),
            is_loading: Some(document.is_loading),
            error: Some(document.error),
            extra: document.extra,
        }
    }

    /// Shallow-merges the patch over `document`.
    pub fn apply_to(self, mut document: BudgetDocument) -> BudgetDocument {
        if let Some(total) = self.total_budget {
            document.total_budget = total;
        }
        if let Some(categories) = self.budget_categories {
            document.budget_categories = categories;
        }
        if let Some(alerts) = self.alerts {
            document.alerts = alerts;
        }
        if let Some(flag) = self.is_loading {
            document.is_loading = flag;
        }
        if let Some(error) = self.error {
            document.error = error;
        }
        document.extra.extend(self.extra);
        document
    }
}

impl From<BudgetDocument> for BudgetPatch {
    fn from(document: BudgetDocument) -> Self {
        Self::from_document(document)
    }
}

// Distinguishes an explicit `null` from a missing key.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(Some)
}
