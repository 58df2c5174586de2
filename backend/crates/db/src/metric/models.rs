use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of validation-metric statuses. `NotStarted` is reserved for
/// metrics without a current value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MetricStatus {
    Success,
    Warning,
    Error,
    #[default]
    NotStarted,
}

impl MetricStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::NotStarted => "not-started",
        }
    }
}

impl FromStr for MetricStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "success" => Ok(Self::Success),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "not-started" => Ok(Self::NotStarted),
            _ => Err(format!("unknown metric status: {value}")),
        }
    }
}

/// A validation metric. Values are kept as the display strings the user
/// entered ("45%", "$1,200") and parsed when evaluated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metric {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub category: String,
    pub current: Option<String>,
    pub target: String,
    pub warning_threshold: Option<String>,
    pub error_threshold: Option<String>,
    pub status: MetricStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
