use leanval_db::scaling::models::ScalingReadinessMetric;
use leanval_evaluation::{summarize, ReadinessSummary};
use serde::Serialize;

/// Stored record plus the computed progress, colour and display strings.
#[derive(Debug, Serialize)]
pub struct ScalingMetricView {
    #[serde(flatten)]
    pub metric: ScalingReadinessMetric,
    #[serde(flatten)]
    pub summary: ReadinessSummary,
}

impl From<ScalingReadinessMetric> for ScalingMetricView {
    fn from(metric: ScalingReadinessMetric) -> Self {
        let summary = summarize(&metric);
        Self { metric, summary }
    }
}

#[derive(Debug, Serialize)]
pub struct ScalingMetricResponse {
    pub data: ScalingMetricView,
}

#[derive(Debug, Serialize)]
pub struct ListScalingMetricsResponse {
    pub data: Vec<ScalingMetricView>,
    pub count: usize,
    pub overall_progress: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use leanval_db::growth::models::MetricUnit;
    use uuid::Uuid;

    #[test]
    fn view_flattens_summary_next_to_record() {
        let now = Utc::now();
        let view = ScalingMetricView::from(ScalingReadinessMetric {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            growth_metric_id: None,
            name: "Monthly revenue".to_string(),
            category: "revenue".to_string(),
            current_value: 8000.0,
            target_value: 10000.0,
            unit: MetricUnit::Currency,
            status: "in-progress".to_string(),
            created_at: now,
            updated_at: now,
        });

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["name"], "Monthly revenue");
        assert_eq!(json["progress"], 80);
        assert_eq!(json["color"], "amber");
        assert_eq!(json["current_display"], "$8,000");
        assert_eq!(json["target_display"], "$10,000");
    }
}
