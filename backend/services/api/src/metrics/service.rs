use leanval_common::error::LeanvalError;
use leanval_db::metric::repositories::MetricRepository;
use leanval_evaluation::{metric_status_or_default, MetricEvent, MetricEventKind};
use uuid::Uuid;

/// A refresh that stopped partway. `persisted` holds the changes written
/// before `error`; they are real and still need to reach subscribers.
#[derive(Debug)]
pub struct RefreshFailure {
    pub persisted: Vec<MetricEvent>,
    pub error: LeanvalError,
}

/// Brings stored metric statuses in line with their current values.
pub struct MetricStatusService<R: MetricRepository> {
    repo: R,
}

impl<R: MetricRepository> MetricStatusService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Reclassify every metric of a project and persist the statuses that
    /// changed. Unparsable values are stored as `not-started`.
    ///
    /// Returns one `Updated` event per changed metric, in listing order.
    pub async fn refresh_project(&self, project_id: Uuid) -> Result<Vec<MetricEvent>, RefreshFailure> {
        let metrics = self
            .repo
            .list_by_project(project_id)
            .await
            .map_err(|error| RefreshFailure {
                persisted: Vec::new(),
                error,
            })?;
        let total = metrics.len();
        let mut events = Vec::new();

        for mut metric in metrics {
            let status = metric_status_or_default(&metric);
            if status == metric.status {
                continue;
            }

            let previous = metric.status;
            if let Err(error) = self.repo.update_status(metric.id, status).await {
                tracing::warn!(
                    %project_id,
                    metric_id = %metric.id,
                    written = events.len(),
                    "metric status refresh interrupted"
                );
                return Err(RefreshFailure {
                    persisted: events,
                    error,
                });
            }
            metric.status = status;
            events.push(MetricEvent::new(
                MetricEventKind::Updated,
                metric,
                Some(previous),
            ));
        }

        tracing::info!(%project_id, total, changed = events.len(), "metric statuses refreshed");
        Ok(events)
    }
}
