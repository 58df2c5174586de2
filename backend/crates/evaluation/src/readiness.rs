use serde::{Deserialize, Serialize};

use leanval_db::scaling::models::ScalingReadinessMetric;

use crate::format::format_metric_value;

/// Percentage of target reached, rounded and clamped to 0..=100. A zero
/// target reports 0.
pub fn readiness_progress(current: f64, target: f64) -> u8 {
    if target == 0.0 {
        return 0;
    }
    let pct = (current / target * 100.0).round();
    if pct.is_nan() {
        return 0;
    }
    pct.clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Amber,
    Red,
    Gray,
}

impl StatusColor {
    pub fn for_status(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "achieved" => Self::Green,
            "in-progress" => Self::Amber,
            "at-risk" => Self::Red,
            _ => Self::Gray,
        }
    }
}

/// What a readiness table row needs beyond the stored record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadinessSummary {
    pub progress: u8,
    pub color: StatusColor,
    pub current_display: String,
    pub target_display: String,
}

pub fn summarize(metric: &ScalingReadinessMetric) -> ReadinessSummary {
    ReadinessSummary {
        progress: readiness_progress(metric.current_value, metric.target_value),
        color: StatusColor::for_status(&metric.status),
        current_display: format_metric_value(metric.current_value, metric.unit),
        target_display: format_metric_value(metric.target_value, metric.unit),
    }
}

/// Mean progress across all metrics, 0 when there are none.
pub fn overall_progress(metrics: &[ScalingReadinessMetric]) -> u8 {
    if metrics.is_empty() {
        return 0;
    }
    let total: u32 = metrics
        .iter()
        .map(|m| u32::from(readiness_progress(m.current_value, m.target_value)))
        .sum();
    (f64::from(total) / metrics.len() as f64).round() as u8
}
