use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Ordered severity levels, lowest to highest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity: {0}")]
pub struct ParseSeverityError(String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "critical" => Ok(Severity::Critical),
            other => Err(ParseSeverityError(other.to_string())),
        }
    }
}

/// Immutable dispatch payload offered to every handler in a chain
///
/// A request carries a severity tag plus a numeric magnitude whose meaning
/// depends on the chain: an error code for routing chains, an amount for
/// approval chains. Handlers only ever borrow a request; nothing mutates it
/// after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub severity: Severity,
    pub magnitude: i64,
    pub component: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    /// Correlation id for log lines, not used in routing decisions
    pub trace_id: Uuid,
}

impl Request {
    pub fn new(
        severity: Severity,
        magnitude: i64,
        component: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            magnitude,
            component: component.into(),
            description: description.into(),
            timestamp: Utc::now(),
            trace_id: Uuid::new_v4(),
        }
    }
}
