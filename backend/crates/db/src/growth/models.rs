use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum GrowthStatus {
    OnTrack,
    AtRisk,
    OffTrack,
}

impl GrowthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on-track",
            Self::AtRisk => "at-risk",
            Self::OffTrack => "off-track",
        }
    }
}

impl FromStr for GrowthStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "on-track" => Ok(Self::OnTrack),
            "at-risk" => Ok(Self::AtRisk),
            "off-track" => Ok(Self::OffTrack),
            _ => Err(format!("unknown growth status: {value}")),
        }
    }
}

/// Display unit of a numeric metric value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MetricUnit {
    Currency,
    Percentage,
    Ratio,
    Count,
    Days,
}

impl MetricUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Currency => "currency",
            Self::Percentage => "percentage",
            Self::Ratio => "ratio",
            Self::Count => "count",
            Self::Days => "days",
        }
    }
}

impl FromStr for MetricUnit {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "currency" => Ok(Self::Currency),
            "percentage" => Ok(Self::Percentage),
            "ratio" => Ok(Self::Ratio),
            "count" => Ok(Self::Count),
            "days" => Ok(Self::Days),
            _ => Err(format!("unknown metric unit: {value}")),
        }
    }
}

/// Stable tag identifying growth metrics that feed derived metrics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum WellKnownKind {
    /// Customer acquisition cost.
    Cac,
    /// Customer lifetime value.
    Ltv,
    #[default]
    Other,
}

impl WellKnownKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cac => "cac",
            Self::Ltv => "ltv",
            Self::Other => "other",
        }
    }
}

impl FromStr for WellKnownKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cac" => Ok(Self::Cac),
            "ltv" => Ok(Self::Ltv),
            "other" => Ok(Self::Other),
            _ => Err(format!("unknown metric kind: {value}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthModel {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    /// Growth framework the model follows, e.g. "AARRR" or "North Star".
    pub framework: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GrowthMetric {
    pub id: Uuid,
    pub growth_model_id: Uuid,
    pub name: String,
    pub category: String,
    pub kind: WellKnownKind,
    pub current_value: f64,
    pub target_value: f64,
    pub unit: MetricUnit,
    pub status: GrowthStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
