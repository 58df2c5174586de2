use leanval_db::growth::models::MetricUnit;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateScalingMetricRequest {
    pub name: String,
    pub category: String,
    pub current_value: f64,
    pub target_value: f64,
    pub unit: MetricUnit,
    pub status: String,
    pub growth_metric_id: Option<Uuid>,
}

/// `growth_metric_id`: absent keeps the link, `null` removes it.
#[derive(Debug, Deserialize)]
pub struct UpdateScalingMetricRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub current_value: Option<f64>,
    pub target_value: Option<f64>,
    pub unit: Option<MetricUnit>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub growth_metric_id: Option<Option<Uuid>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
