use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use leanval_common::error::LeanvalError;
use leanval_db::scaling::models::ScalingReadinessMetric;
use leanval_db::scaling::repositories::ScalingMetricRepository;
use leanval_evaluation::overall_progress;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extractors::UserId;
use crate::ownership::{owned_growth_metric, owned_project, owned_scaling_metric};
use crate::scaling::requests::{CreateScalingMetricRequest, UpdateScalingMetricRequest};
use crate::scaling::responses::{
    ListScalingMetricsResponse, ScalingMetricResponse, ScalingMetricView,
};
use crate::validation::{require_finite, require_non_blank};
use crate::AppState;

/// A linked growth metric must live under the same project.
async fn check_growth_link(
    state: &AppState,
    user: Uuid,
    project_id: Uuid,
    growth_metric_id: Option<Uuid>,
) -> Result<(), ApiError> {
    let Some(gid) = growth_metric_id else {
        return Ok(());
    };
    match owned_growth_metric(state, user, gid).await {
        Ok((_, owner_project)) if owner_project == project_id => Ok(()),
        Ok(_) | Err(ApiError(LeanvalError::NotFound(_))) => Err(ApiError::validation(format!(
            "growth_metric_id {gid} does not belong to this project"
        ))),
        Err(e) => Err(e),
    }
}

pub async fn list_scaling_metrics(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ListScalingMetricsResponse>, ApiError> {
    owned_project(&state, user, project_id).await?;

    let metrics = state.scaling_repo.list_by_project(project_id).await?;
    let overall = overall_progress(&metrics);
    let data: Vec<ScalingMetricView> = metrics.into_iter().map(ScalingMetricView::from).collect();
    let count = data.len();
    Ok(Json(ListScalingMetricsResponse {
        data,
        count,
        overall_progress: overall,
    }))
}

pub async fn create_scaling_metric(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(project_id): Path<Uuid>,
    Json(body): Json<CreateScalingMetricRequest>,
) -> Result<impl IntoResponse, ApiError> {
    owned_project(&state, user, project_id).await?;
    require_non_blank("name", &body.name)?;
    require_non_blank("category", &body.category)?;
    require_non_blank("status", &body.status)?;
    require_finite("current_value", body.current_value)?;
    require_finite("target_value", body.target_value)?;
    check_growth_link(&state, user, project_id, body.growth_metric_id).await?;

    let now = Utc::now();
    let metric = ScalingReadinessMetric {
        id: Uuid::new_v4(),
        project_id,
        growth_metric_id: body.growth_metric_id,
        name: body.name.trim().to_string(),
        category: body.category.trim().to_string(),
        current_value: body.current_value,
        target_value: body.target_value,
        unit: body.unit,
        status: body.status.trim().to_string(),
        created_at: now,
        updated_at: now,
    };

    let created = state.scaling_repo.create(metric).await?;
    Ok((
        StatusCode::CREATED,
        Json(ScalingMetricResponse {
            data: created.into(),
        }),
    ))
}

pub async fn update_scaling_metric(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateScalingMetricRequest>,
) -> Result<Json<ScalingMetricResponse>, ApiError> {
    let existing = owned_scaling_metric(&state, user, id).await?;

    let name = body.name.unwrap_or(existing.name);
    let category = body.category.unwrap_or(existing.category);
    let status = body.status.unwrap_or(existing.status);
    let current_value = body.current_value.unwrap_or(existing.current_value);
    let target_value = body.target_value.unwrap_or(existing.target_value);
    require_non_blank("name", &name)?;
    require_non_blank("category", &category)?;
    require_non_blank("status", &status)?;
    require_finite("current_value", current_value)?;
    require_finite("target_value", target_value)?;

    let growth_metric_id = body.growth_metric_id.unwrap_or(existing.growth_metric_id);
    check_growth_link(&state, user, existing.project_id, growth_metric_id).await?;

    let metric = ScalingReadinessMetric {
        id,
        project_id: existing.project_id,
        growth_metric_id,
        name: name.trim().to_string(),
        category: category.trim().to_string(),
        current_value,
        target_value,
        unit: body.unit.unwrap_or(existing.unit),
        status: status.trim().to_string(),
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    let updated = state.scaling_repo.update(metric).await?;
    Ok(Json(ScalingMetricResponse {
        data: updated.into(),
    }))
}

pub async fn delete_scaling_metric(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    owned_scaling_metric(&state, user, id).await?;
    if !state.scaling_repo.delete(id).await? {
        return Err(ApiError::not_found(format!("scaling metric not found: {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}
