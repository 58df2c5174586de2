use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::growth::models::MetricUnit;

/// Independently tracked indicator of readiness to scale. `status` is
/// free text maintained by the user; conventional values are `achieved`,
/// `in-progress` and `at-risk`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScalingReadinessMetric {
    pub id: Uuid,
    pub project_id: Uuid,
    pub growth_metric_id: Option<Uuid>,
    pub name: String,
    pub category: String,
    pub current_value: f64,
    pub target_value: f64,
    pub unit: MetricUnit,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
