//! Threshold notifications raised against category spending.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Spend ratio (in percent) at which a warning alert is raised.
pub const WARNING_THRESHOLD: f64 = 75.0;
/// Spend ratio (in percent) at which a danger alert is raised.
pub const DANGER_THRESHOLD: f64 = 90.0;

/// A user-facing notification kept in insertion order on the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AlertId>,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Alert {
    /// Builds an alert without id or timestamp, the shape seed alerts use.
    pub fn seed(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            id: None,
            kind,
            message: message.into(),
            timestamp: None,
        }
    }

    /// Builds the alert for a category whose spend reached `percentage`, if any threshold
    /// was reached. `stamp` is only called when an alert is produced.
    pub fn for_spend(
        category: &str,
        percentage: f64,
        stamp: impl FnOnce() -> AlertStamp,
    ) -> Option<Self> {
        let kind = AlertKind::for_percentage(percentage)?;
        let stamp = stamp();
        let rounded = format_percentage(percentage);
        let message = match kind {
            AlertKind::Danger => {
                format!("You've spent {}% of your {} budget!", rounded, category)
            }
            _ => format!("You've spent {}% of your {} budget.", rounded, category),
        };
        Some(Self {
            id: Some(AlertId::Number(stamp.id)),
            kind,
            message,
            timestamp: Some(stamp.timestamp),
        })
    }

    /// The id as an integer, when it is one.
    pub fn numeric_id(&self) -> Option<u64> {
        self.id.as_ref().and_then(AlertId::as_u64)
    }
}

/// Alert identifier. Integer ids are issued at runtime; anything else a stored document
/// carries (fractional or negative numbers, strings) is kept as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AlertId {
    Number(u64),
    Raw(Value),
}

impl AlertId {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            AlertId::Number(id) => Some(*id),
            AlertId::Raw(_) => None,
        }
    }
}

impl From<u64> for AlertId {
    fn from(id: u64) -> Self {
        AlertId::Number(id)
    }
}

/// Identity assigned to a runtime-generated alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertStamp {
    pub id: u64,
    pub timestamp: String,
}

/// Severity of an alert. Labels other than the three known ones are kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum AlertKind {
    Warning,
    Info,
    Danger,
    Custom(String),
}

impl AlertKind {
    /// Danger at 90% and above, warning from 75%, nothing below. NaN never alerts.
    pub fn for_percentage(percentage: f64) -> Option<Self> {
        if percentage >= DANGER_THRESHOLD {
            Some(AlertKind::Danger)
        } else if percentage >= WARNING_THRESHOLD {
            Some(AlertKind::Warning)
        } else {
            None
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertKind::Warning => "warning",
            AlertKind::Info => "info",
            AlertKind::Danger => "danger",
            AlertKind::Custom(label) => label.as_str(),
        };
        f.write_str(label)
    }
}

impl From<String> for AlertKind {
    fn from(label: String) -> Self {
        match label.as_str() {
            "warning" => AlertKind::Warning,
            "info" => AlertKind::Info,
            "danger" => AlertKind::Danger,
            _ => AlertKind::Custom(label),
        }
    }
}

impl From<AlertKind> for String {
    fn from(kind: AlertKind) -> Self {
        kind.to_string()
    }
}

/// Renders a percentage with no decimals, rounding halves away from zero.
pub fn format_percentage(percentage: f64) -> String {
    if percentage.is_nan() {
        "NaN".to_string()
    } else if percentage.is_infinite() {
        if percentage > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else {
        format!("{}", percentage.round())
    }
}
