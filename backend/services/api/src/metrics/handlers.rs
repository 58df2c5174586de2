use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use leanval_db::metric::models::{Metric, MetricStatus};
use leanval_db::metric::repositories::MetricRepository;
use leanval_evaluation::{
    classify_metric_status, validate_metric_values, MetricEvent, MetricEventKind, ValueParseError,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::extractors::UserId;
use crate::metrics::requests::{CreateMetricRequest, EvaluateRequest, UpdateMetricRequest};
use crate::metrics::responses::{
    EvaluateResponse, ListMetricsResponse, MetricResponse, MetricView, RefreshStatusResponse,
};
use crate::metrics::service::{MetricStatusService, RefreshFailure};
use crate::ownership::{owned_metric, owned_project};
use crate::validation::{normalize_optional, require_non_blank};
use crate::AppState;

/// Keep the stored value when the field is absent; an explicit empty
/// string clears it.
fn merge_optional(update: Option<String>, existing: Option<String>) -> Option<String> {
    match update {
        Some(v) => normalize_optional(Some(v)),
        None => existing,
    }
}

/// Classify for a write path. Every supplied value must parse, even the
/// ones classification itself would not look at.
fn classify_for_write(
    current: Option<&str>,
    target: &str,
    warning_threshold: Option<&str>,
    error_threshold: Option<&str>,
) -> Result<MetricStatus, ValueParseError> {
    validate_metric_values(current, target, warning_threshold, error_threshold)?;
    classify_metric_status(current, target, warning_threshold, error_threshold)
}

pub async fn list_metrics(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ListMetricsResponse>, ApiError> {
    owned_project(&state, user, project_id).await?;

    let data: Vec<MetricView> = state
        .metric_repo
        .list_by_project(project_id)
        .await?
        .into_iter()
        .map(MetricView::from)
        .collect();
    let count = data.len();
    Ok(Json(ListMetricsResponse { data, count }))
}

pub async fn create_metric(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(project_id): Path<Uuid>,
    Json(body): Json<CreateMetricRequest>,
) -> Result<impl IntoResponse, ApiError> {
    owned_project(&state, user, project_id).await?;
    require_non_blank("name", &body.name)?;
    require_non_blank("category", &body.category)?;
    require_non_blank("target", &body.target)?;

    let current = normalize_optional(body.current);
    let warning_threshold = normalize_optional(body.warning_threshold);
    let error_threshold = normalize_optional(body.error_threshold);
    let status = classify_for_write(
        current.as_deref(),
        &body.target,
        warning_threshold.as_deref(),
        error_threshold.as_deref(),
    )?;

    let now = Utc::now();
    let metric = Metric {
        id: Uuid::new_v4(),
        project_id,
        name: body.name.trim().to_string(),
        category: body.category.trim().to_string(),
        current,
        target: body.target.trim().to_string(),
        warning_threshold,
        error_threshold,
        status,
        created_at: now,
        updated_at: now,
    };

    let created = state.metric_repo.create(metric).await?;
    state.publish(MetricEvent::new(MetricEventKind::Created, created.clone(), None));

    Ok((
        StatusCode::CREATED,
        Json(MetricResponse {
            data: MetricView::from(created),
        }),
    ))
}

pub async fn update_metric(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateMetricRequest>,
) -> Result<Json<MetricResponse>, ApiError> {
    let existing = owned_metric(&state, user, id).await?;
    let previous_status = existing.status;

    let name = body.name.unwrap_or(existing.name);
    let category = body.category.unwrap_or(existing.category);
    let target = body.target.unwrap_or(existing.target);
    require_non_blank("name", &name)?;
    require_non_blank("category", &category)?;
    require_non_blank("target", &target)?;

    let current = merge_optional(body.current, existing.current);
    let warning_threshold = merge_optional(body.warning_threshold, existing.warning_threshold);
    let error_threshold = merge_optional(body.error_threshold, existing.error_threshold);
    let status = classify_for_write(
        current.as_deref(),
        &target,
        warning_threshold.as_deref(),
        error_threshold.as_deref(),
    )?;

    let metric = Metric {
        id,
        project_id: existing.project_id,
        name: name.trim().to_string(),
        category: category.trim().to_string(),
        current,
        target: target.trim().to_string(),
        warning_threshold,
        error_threshold,
        status,
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    let updated = state.metric_repo.update(metric).await?;
    if updated.status != previous_status {
        tracing::info!(
            metric_id = %id,
            from = previous_status.as_str(),
            to = updated.status.as_str(),
            "metric status changed"
        );
    }
    state.publish(MetricEvent::new(
        MetricEventKind::Updated,
        updated.clone(),
        Some(previous_status),
    ));

    Ok(Json(MetricResponse {
        data: MetricView::from(updated),
    }))
}

pub async fn delete_metric(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let existing = owned_metric(&state, user, id).await?;
    if !state.metric_repo.delete(id).await? {
        return Err(ApiError::not_found(format!("metric not found: {id}")));
    }
    state.publish(MetricEvent::new(MetricEventKind::Deleted, existing, None));
    Ok(StatusCode::NO_CONTENT)
}

pub async fn refresh_statuses(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(project_id): Path<Uuid>,
) -> Result<Json<RefreshStatusResponse>, ApiError> {
    owned_project(&state, user, project_id).await?;

    let service = MetricStatusService::new(state.metric_repo.clone());
    let events = publish_refresh(&state, service.refresh_project(project_id).await)?;

    Ok(Json(RefreshStatusResponse {
        changed: events.len(),
        data: events,
    }))
}

/// Publish every persisted change, including those written before a
/// refresh failed, then surface the failure.
fn publish_refresh(
    state: &AppState,
    outcome: Result<Vec<MetricEvent>, RefreshFailure>,
) -> Result<Vec<MetricEvent>, ApiError> {
    let (events, error) = match outcome {
        Ok(events) => (events, None),
        Err(RefreshFailure { persisted, error }) => (persisted, Some(error)),
    };
    for event in &events {
        state.publish(event.clone());
    }
    match error {
        Some(error) => Err(error.into()),
        None => Ok(events),
    }
}

pub async fn evaluate(Json(body): Json<EvaluateRequest>) -> Result<Json<EvaluateResponse>, ApiError> {
    let status = classify_for_write(
        body.current.as_deref(),
        &body.target,
        body.warning_threshold.as_deref(),
        body.error_threshold.as_deref(),
    )?;
    Ok(Json(EvaluateResponse { status }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::offline_state;
    use leanval_common::error::LeanvalError;

    fn changed_metric() -> MetricEvent {
        let now = Utc::now();
        let metric = Metric {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            name: "Waitlist signups".to_string(),
            category: "mvp".to_string(),
            current: Some("120".to_string()),
            target: "100".to_string(),
            warning_threshold: None,
            error_threshold: None,
            status: MetricStatus::Success,
            created_at: now,
            updated_at: now,
        };
        MetricEvent::new(MetricEventKind::Updated, metric, Some(MetricStatus::Warning))
    }

    #[tokio::test]
    async fn failed_refresh_still_publishes_persisted_changes() {
        let state = offline_state();
        let mut rx = state.metric_events.subscribe();
        let written = changed_metric();

        let result = publish_refresh(
            &state,
            Err(RefreshFailure {
                persisted: vec![written.clone()],
                error: LeanvalError::Database("connection reset".to_string()),
            }),
        );

        assert!(matches!(result, Err(ApiError(LeanvalError::Database(_)))));
        assert_eq!(rx.try_recv().unwrap(), written);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn completed_refresh_publishes_and_returns_events() {
        let state = offline_state();
        let mut rx = state.metric_events.subscribe();
        let written = changed_metric();

        let events = publish_refresh(&state, Ok(vec![written.clone()])).unwrap();
        assert_eq!(events, vec![written.clone()]);
        assert_eq!(rx.try_recv().unwrap(), written);
    }

    #[test]
    fn write_classification_rejects_values_classification_skips() {
        let err = classify_for_write(None, "garbage", None, None).unwrap_err();
        assert_eq!(err.field(), "target");

        let err = classify_for_write(Some("5"), "50", Some("n/a"), None).unwrap_err();
        assert_eq!(err.field(), "warning_threshold");

        assert_eq!(
            classify_for_write(Some("45%"), "50%", None, None),
            Ok(MetricStatus::Warning)
        );
    }

    #[test]
    fn merge_optional_keeps_clears_or_replaces() {
        let existing = Some("10".to_string());
        assert_eq!(merge_optional(None, existing.clone()), existing);
        assert_eq!(merge_optional(Some(String::new()), existing.clone()), None);
        assert_eq!(
            merge_optional(Some(" 12 ".to_string()), existing),
            Some("12".to_string())
        );
    }
}
