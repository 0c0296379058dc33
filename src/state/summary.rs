use serde::Serialize;

use crate::domain::{AlertKind, BudgetDocument, CategoryEntry};

/// Read-only usage figures derived from a budget document.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BudgetSummary {
    pub total_budget: f64,
    pub total_allocated: f64,
    pub total_spent: f64,
    /// Total budget minus everything spent.
    pub remaining: f64,
    /// Total budget not yet handed out to categories.
    pub unallocated: f64,
    pub categories: Vec<CategoryUsage>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryUsage {
    pub name: String,
    pub allocated: f64,
    pub spent: f64,
    pub remaining: f64,
    pub percent_used: Option<f64>,
    pub status: UsageStatus,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UsageStatus {
    Ok,
    Warning,
    Danger,
    Unallocated,
}

impl BudgetSummary {
    /// Categories that do not count as present (zero or `null` values) are left out.
    pub fn from_document(document: &BudgetDocument) -> Self {
        let categories: Vec<CategoryUsage> = document
            .budget_categories
            .iter()
            .filter(|(_, entry)| entry.is_present())
            .map(|(name, entry)| CategoryUsage::new(name, entry))
            .collect();
        let total_allocated = categories.iter().map(|usage| usage.allocated).sum::<f64>();
        let total_spent = categories.iter().map(|usage| usage.spent).sum::<f64>();
        Self {
            total_budget: document.total_budget,
            total_allocated,
            total_spent,
            remaining: document.total_budget - total_spent,
            unallocated: document.total_budget - total_allocated,
            categories,
        }
    }

    pub fn category(&self, name: &str) -> Option<&CategoryUsage> {
        self.categories.iter().find(|usage| usage.name == name)
    }
}

impl CategoryUsage {
    fn new(name: &str, entry: &CategoryEntry) -> Self {
        let allocated = entry.allocated();
        let spent = entry.spent();
        let percent_used = if allocated.abs() > f64::EPSILON {
            Some(spent / allocated * 100.0)
        } else {
            None
        };
        let status = match percent_used {
            None => UsageStatus::Unallocated,
            Some(percent) => match AlertKind::for_percentage(percent) {
                Some(AlertKind::Danger) => UsageStatus::Danger,
                Some(_) => UsageStatus::Warning,
                None => UsageStatus::Ok,
            },
        };
        Self {
            name: name.to_string(),
            allocated,
            spent,
            remaining: allocated - spent,
            percent_used,
            status,
        }
    }
}
