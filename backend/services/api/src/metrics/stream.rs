use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use leanval_evaluation::MetricEvent;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extractors::UserId;
use crate::ownership::owned_project;
use crate::AppState;

/// Server-sent stream of metric changes for one project. Slow subscribers
/// skip what they missed; clients merge each event by metric id.
pub async fn metric_events(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(project_id): Path<Uuid>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    owned_project(&state, user, project_id).await?;

    let rx = state.metric_events.subscribe();
    tracing::debug!(%project_id, "metric event subscriber attached");

    let stream = project_events(rx, project_id)
        .filter_map(|event| to_sse(&event).map(Ok::<Event, Infallible>));

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// Events for one project. A lagging receiver skips what it missed and
/// carries on from the oldest event still buffered.
fn project_events(
    rx: broadcast::Receiver<MetricEvent>,
    project_id: Uuid,
) -> impl Stream<Item = MetricEvent> {
    BroadcastStream::new(rx).filter_map(move |received| match received {
        Ok(event) if event.project_id == project_id => Some(event),
        Ok(_) => None,
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!(%project_id, skipped, "metric event subscriber lagged");
            None
        }
    })
}

fn to_sse(event: &MetricEvent) -> Option<Event> {
    match Event::default().event("metric").json_data(event) {
        Ok(ev) => Some(ev),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode metric event");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use leanval_db::metric::models::{Metric, MetricStatus};
    use leanval_evaluation::MetricEventKind;

    fn metric_in(project_id: Uuid) -> Metric {
        let now = Utc::now();
        Metric {
            id: Uuid::new_v4(),
            project_id,
            name: "Pre-orders".to_string(),
            category: "solution".to_string(),
            current: Some("12".to_string()),
            target: "20".to_string(),
            warning_threshold: None,
            error_threshold: None,
            status: MetricStatus::Error,
            created_at: now,
            updated_at: now,
        }
    }

    fn updated(metric: Metric) -> MetricEvent {
        MetricEvent::new(MetricEventKind::Updated, metric, Some(MetricStatus::Warning))
    }

    #[tokio::test]
    async fn other_projects_events_are_skipped() {
        let project_id = Uuid::new_v4();
        let (tx, rx) = broadcast::channel(16);
        let stream = project_events(rx, project_id);

        let foreign = updated(metric_in(Uuid::new_v4()));
        let own = updated(metric_in(project_id));
        tx.send(foreign).unwrap();
        tx.send(own.clone()).unwrap();
        drop(tx);

        let received: Vec<MetricEvent> = stream.collect().await;
        assert_eq!(received, vec![own]);
    }

    #[tokio::test]
    async fn lagging_subscriber_keeps_only_what_is_buffered() {
        let project_id = Uuid::new_v4();
        let (tx, rx) = broadcast::channel(1);
        let stream = project_events(rx, project_id);

        let events: Vec<MetricEvent> = (0..3).map(|_| updated(metric_in(project_id))).collect();
        for event in &events {
            // The sender never waits on the slow receiver.
            tx.send(event.clone()).unwrap();
        }
        drop(tx);

        let received: Vec<MetricEvent> = stream.collect().await;
        assert_eq!(received, vec![events[2].clone()]);
    }

    #[test]
    fn events_encode_for_sse() {
        let event = updated(metric_in(Uuid::new_v4()));
        assert!(to_sse(&event).is_some());
    }
}
