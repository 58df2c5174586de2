use leanval_db::metric::models::{Metric, MetricStatus};
use leanval_evaluation::{evaluate_metric, MetricEvent};
use serde::Serialize;

/// A metric as rendered: `status` is recomputed from the current values,
/// and `evaluation_error` explains a `not-started` caused by bad input.
#[derive(Debug, Serialize)]
pub struct MetricView {
    #[serde(flatten)]
    pub metric: Metric,
    pub stored_status: MetricStatus,
    pub evaluation_error: Option<String>,
}

impl From<Metric> for MetricView {
    fn from(mut metric: Metric) -> Self {
        let stored_status = metric.status;
        let evaluation_error = match evaluate_metric(&metric) {
            Ok(status) => {
                metric.status = status;
                None
            }
            Err(e) => {
                tracing::warn!(metric_id = %metric.id, error = %e, "metric value unparsable");
                metric.status = MetricStatus::NotStarted;
                Some(e.to_string())
            }
        };
        Self {
            metric,
            stored_status,
            evaluation_error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricResponse {
    pub data: MetricView,
}

#[derive(Debug, Serialize)]
pub struct ListMetricsResponse {
    pub data: Vec<MetricView>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub status: MetricStatus,
}

#[derive(Debug, Serialize)]
pub struct RefreshStatusResponse {
    pub changed: usize,
    pub data: Vec<MetricEvent>,
}
