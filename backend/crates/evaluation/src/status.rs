//! Validation-metric status classification.
//!
//! Without explicit thresholds the warning boundary is 90% of target and
//! higher values are always treated as better. With both thresholds present
//! the direction is inferred: a positive target above the error threshold
//! means higher is better, otherwise lower is better.

use leanval_db::metric::models::{Metric, MetricStatus};

use crate::error::ValueParseError;
use crate::value::{non_blank, parse_metric_value};

/// Fraction of target used as the warning boundary when no thresholds are set.
pub const DEFAULT_WARNING_RATIO: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Classify a metric from its display values.
///
/// A missing or blank `current` yields `NotStarted` without parsing anything
/// else. Thresholds only take effect when both are present and non-blank.
pub fn classify_metric_status(
    current: Option<&str>,
    target: &str,
    warning_threshold: Option<&str>,
    error_threshold: Option<&str>,
) -> Result<MetricStatus, ValueParseError> {
    let Some(current) = non_blank(current) else {
        return Ok(MetricStatus::NotStarted);
    };

    let current = parse_metric_value("current", current)?;
    let target = parse_metric_value("target", target)?;

    match (non_blank(warning_threshold), non_blank(error_threshold)) {
        (Some(warning), Some(error)) => {
            let warning = parse_metric_value("warning_threshold", warning)?;
            let error = parse_metric_value("error_threshold", error)?;
            let direction = if target > 0.0 && target > error {
                Direction::HigherIsBetter
            } else {
                Direction::LowerIsBetter
            };
            Ok(against_bounds(current, target, warning, direction))
        }
        _ => Ok(against_bounds(
            current,
            target,
            target * DEFAULT_WARNING_RATIO,
            Direction::HigherIsBetter,
        )),
    }
}

/// Parse every supplied value, including ones `classify_metric_status`
/// would skip: the target when `current` is blank, and a lone threshold.
pub fn validate_metric_values(
    current: Option<&str>,
    target: &str,
    warning_threshold: Option<&str>,
    error_threshold: Option<&str>,
) -> Result<(), ValueParseError> {
    if let Some(current) = non_blank(current) {
        parse_metric_value("current", current)?;
    }
    parse_metric_value("target", target)?;
    if let Some(warning) = non_blank(warning_threshold) {
        parse_metric_value("warning_threshold", warning)?;
    }
    if let Some(error) = non_blank(error_threshold) {
        parse_metric_value("error_threshold", error)?;
    }
    Ok(())
}

fn against_bounds(current: f64, target: f64, warning: f64, direction: Direction) -> MetricStatus {
    let (meets_target, meets_warning) = match direction {
        Direction::HigherIsBetter => (current >= target, current >= warning),
        Direction::LowerIsBetter => (current <= target, current <= warning),
    };

    if meets_target {
        MetricStatus::Success
    } else if meets_warning {
        MetricStatus::Warning
    } else {
        MetricStatus::Error
    }
}

pub fn evaluate_metric(metric: &Metric) -> Result<MetricStatus, ValueParseError> {
    classify_metric_status(
        metric.current.as_deref(),
        &metric.target,
        metric.warning_threshold.as_deref(),
        metric.error_threshold.as_deref(),
    )
}

/// Status for display paths: unparsable values are logged and shown as
/// `NotStarted` instead of failing the whole listing.
pub fn metric_status_or_default(metric: &Metric) -> MetricStatus {
    match evaluate_metric(metric) {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!(
                metric_id = %metric.id,
                field = e.field(),
                error = %e,
                "metric value unparsable, reporting not-started"
            );
            MetricStatus::NotStarted
        }
    }
}
