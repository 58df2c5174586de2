//! Resolve child resources through the caller's projects. Anything not
//! reachable from a project the caller owns is reported as not found.

use leanval_common::error::LeanvalError;
use leanval_db::growth::models::{GrowthMetric, GrowthModel};
use leanval_db::growth::repositories::{GrowthMetricRepository, GrowthModelRepository};
use leanval_db::metric::models::Metric;
use leanval_db::metric::repositories::MetricRepository;
use leanval_db::project::models::Project;
use leanval_db::project::repositories::ProjectRepository;
use leanval_db::scaling::models::ScalingReadinessMetric;
use leanval_db::scaling::repositories::ScalingMetricRepository;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

pub async fn owned_project(
    state: &AppState,
    owner_id: Uuid,
    project_id: Uuid,
) -> Result<Project, ApiError> {
    state
        .project_repo
        .get_by_id(owner_id, project_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("project not found: {project_id}")))
}

pub async fn owned_metric(state: &AppState, owner_id: Uuid, id: Uuid) -> Result<Metric, ApiError> {
    let metric = MetricRepository::get_by_id(&state.metric_repo, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("metric not found: {id}")))?;
    owned_project(state, owner_id, metric.project_id)
        .await
        .map_err(|e| as_missing(e, "metric", id))?;
    Ok(metric)
}

pub async fn owned_growth_model(
    state: &AppState,
    owner_id: Uuid,
    id: Uuid,
) -> Result<GrowthModel, ApiError> {
    let model = GrowthModelRepository::get_by_id(&state.growth_repo, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("growth model not found: {id}")))?;
    owned_project(state, owner_id, model.project_id)
        .await
        .map_err(|e| as_missing(e, "growth model", id))?;
    Ok(model)
}

/// The growth metric together with the project it ultimately belongs to.
pub async fn owned_growth_metric(
    state: &AppState,
    owner_id: Uuid,
    id: Uuid,
) -> Result<(GrowthMetric, Uuid), ApiError> {
    let metric = GrowthMetricRepository::get_by_id(&state.growth_repo, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("growth metric not found: {id}")))?;
    let model = owned_growth_model(state, owner_id, metric.growth_model_id)
        .await
        .map_err(|e| as_missing(e, "growth metric", id))?;
    Ok((metric, model.project_id))
}

pub async fn owned_scaling_metric(
    state: &AppState,
    owner_id: Uuid,
    id: Uuid,
) -> Result<ScalingReadinessMetric, ApiError> {
    let metric = ScalingMetricRepository::get_by_id(&state.scaling_repo, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("scaling metric not found: {id}")))?;
    owned_project(state, owner_id, metric.project_id)
        .await
        .map_err(|e| as_missing(e, "scaling metric", id))?;
    Ok(metric)
}

/// A missing parent hides the child's existence; other failures pass through.
fn as_missing(err: ApiError, what: &str, id: Uuid) -> ApiError {
    match err.0 {
        LeanvalError::NotFound(_) => ApiError::not_found(format!("{what} not found: {id}")),
        other => ApiError(other),
    }
}
