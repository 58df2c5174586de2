use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use leanval_db::metric::models::{Metric, MetricStatus};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MetricEventKind {
    Created,
    Updated,
    Deleted,
}

/// Change notification for a single validation metric. Carries the full
/// row so subscribers can merge it without refetching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricEvent {
    pub kind: MetricEventKind,
    pub project_id: Uuid,
    pub metric: Metric,
    pub previous_status: Option<MetricStatus>,
    pub occurred_at: DateTime<Utc>,
}

impl MetricEvent {
    pub fn new(kind: MetricEventKind, metric: Metric, previous_status: Option<MetricStatus>) -> Self {
        Self {
            kind,
            project_id: metric.project_id,
            metric,
            previous_status,
            occurred_at: Utc::now(),
        }
    }

    pub fn status_changed(&self) -> bool {
        self.previous_status
            .is_some_and(|previous| previous != self.metric.status)
    }
}

/// Merge an event into a locally held list by metric id.
///
/// Updates replace the matching row in place; an update for an unknown id
/// is appended, as is a create. Returns whether the list changed.
pub fn apply_metric_event(records: &mut Vec<Metric>, event: &MetricEvent) -> bool {
    let position = records.iter().position(|m| m.id == event.metric.id);

    match (event.kind, position) {
        (MetricEventKind::Deleted, Some(i)) => {
            records.remove(i);
            true
        }
        (MetricEventKind::Deleted, None) => false,
        (_, Some(i)) => {
            if records[i] == event.metric {
                return false;
            }
            records[i] = event.metric.clone();
            true
        }
        (_, None) => {
            records.push(event.metric.clone());
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(name: &str, status: MetricStatus) -> Metric {
        let now = Utc::now();
        Metric {
            id: Uuid::new_v4(),
            project_id: Uuid::nil(),
            name: name.to_string(),
            category: "mvp".to_string(),
            current: Some("10".to_string()),
            target: "20".to_string(),
            warning_threshold: None,
            error_threshold: None,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn update_replaces_matching_row_in_place() {
        let a = metric("a", MetricStatus::Error);
        let b = metric("b", MetricStatus::Warning);
        let mut records = vec![a.clone(), b.clone()];

        let mut changed = a.clone();
        changed.status = MetricStatus::Success;
        let event = MetricEvent::new(
            MetricEventKind::Updated,
            changed.clone(),
            Some(MetricStatus::Error),
        );

        assert!(apply_metric_event(&mut records, &event));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], changed);
        assert_eq!(records[1], b);
        assert!(event.status_changed());
    }

    #[test]
    fn identical_update_is_a_no_op() {
        let a = metric("a", MetricStatus::Error);
        let mut records = vec![a.clone()];
        let event = MetricEvent::new(MetricEventKind::Updated, a, Some(MetricStatus::Error));
        assert!(!apply_metric_event(&mut records, &event));
        assert!(!event.status_changed());
    }

    #[test]
    fn create_and_unknown_update_append() {
        let mut records = Vec::new();
        let created = MetricEvent::new(
            MetricEventKind::Created,
            metric("a", MetricStatus::NotStarted),
            None,
        );
        assert!(apply_metric_event(&mut records, &created));
        let stray = MetricEvent::new(
            MetricEventKind::Updated,
            metric("b", MetricStatus::Success),
            None,
        );
        assert!(apply_metric_event(&mut records, &stray));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn delete_removes_row() {
        let a = metric("a", MetricStatus::Error);
        let mut records = vec![a.clone()];
        let event = MetricEvent::new(MetricEventKind::Deleted, a, None);
        assert!(apply_metric_event(&mut records, &event));
        assert!(records.is_empty());
        assert!(!apply_metric_event(&mut records, &event));
    }

    #[test]
    fn event_serializes_with_kind_tag() {
        let event = MetricEvent::new(
            MetricEventKind::Created,
            metric("a", MetricStatus::NotStarted),
            None,
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "created");
        assert_eq!(json["metric"]["status"], "not-started");
    }
}
