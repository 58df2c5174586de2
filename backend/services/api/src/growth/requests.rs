use leanval_db::growth::models::{GrowthStatus, MetricUnit, WellKnownKind};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateGrowthModelRequest {
    pub name: String,
    pub framework: String,
    pub description: Option<String>,
}

/// `kind` is inferred from name and category when omitted.
#[derive(Debug, Deserialize)]
pub struct CreateGrowthMetricRequest {
    pub name: String,
    pub category: String,
    pub kind: Option<WellKnownKind>,
    pub current_value: f64,
    pub target_value: f64,
    pub unit: MetricUnit,
    pub status: GrowthStatus,
}

#[derive(Debug, Deserialize)]
pub struct UpdateGrowthMetricRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub kind: Option<WellKnownKind>,
    pub current_value: Option<f64>,
    pub target_value: Option<f64>,
    pub unit: Option<MetricUnit>,
    pub status: Option<GrowthStatus>,
}
