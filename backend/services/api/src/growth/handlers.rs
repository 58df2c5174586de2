use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use leanval_db::growth::models::{GrowthMetric, GrowthModel};
use leanval_db::growth::repositories::{GrowthMetricRepository, GrowthModelRepository};
use leanval_evaluation::{derive_metrics, infer_well_known_kind};
use uuid::Uuid;

use crate::error::ApiError;
use crate::extractors::UserId;
use crate::growth::requests::{
    CreateGrowthMetricRequest, CreateGrowthModelRequest, UpdateGrowthMetricRequest,
};
use crate::growth::responses::{
    GrowthMetricResponse, GrowthModelDetailResponse, GrowthModelResponse,
    ListGrowthMetricsResponse, ListGrowthModelsResponse,
};
use crate::ownership::{owned_growth_metric, owned_growth_model, owned_project};
use crate::validation::{normalize_optional, require_finite, require_non_blank};
use crate::AppState;

// ── Growth models ───────────────────────────────────────────────

pub async fn list_growth_models(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ListGrowthModelsResponse>, ApiError> {
    owned_project(&state, user, project_id).await?;
    let data = state.growth_repo.list_by_project(project_id).await?;
    let count = data.len();
    Ok(Json(ListGrowthModelsResponse { data, count }))
}

pub async fn create_growth_model(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(project_id): Path<Uuid>,
    Json(body): Json<CreateGrowthModelRequest>,
) -> Result<impl IntoResponse, ApiError> {
    owned_project(&state, user, project_id).await?;
    require_non_blank("name", &body.name)?;
    require_non_blank("framework", &body.framework)?;

    let now = Utc::now();
    let model = GrowthModel {
        id: Uuid::new_v4(),
        project_id,
        name: body.name.trim().to_string(),
        framework: body.framework.trim().to_string(),
        description: normalize_optional(body.description),
        created_at: now,
        updated_at: now,
    };

    let created = GrowthModelRepository::create(&state.growth_repo, model).await?;
    Ok((StatusCode::CREATED, Json(GrowthModelResponse { data: created })))
}

pub async fn get_growth_model(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(id): Path<Uuid>,
) -> Result<Json<GrowthModelDetailResponse>, ApiError> {
    let model = owned_growth_model(&state, user, id).await?;
    let metrics = state.growth_repo.list_by_model(id).await?;
    let derived = derive_metrics(&metrics);
    Ok(Json(GrowthModelDetailResponse {
        data: model,
        metrics,
        derived,
    }))
}

pub async fn delete_growth_model(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    owned_growth_model(&state, user, id).await?;
    if !GrowthModelRepository::delete(&state.growth_repo, id).await? {
        return Err(ApiError::not_found(format!("growth model not found: {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ── Growth metrics ──────────────────────────────────────────────

pub async fn list_growth_metrics(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(model_id): Path<Uuid>,
) -> Result<Json<ListGrowthMetricsResponse>, ApiError> {
    owned_growth_model(&state, user, model_id).await?;
    let data = state.growth_repo.list_by_model(model_id).await?;
    let derived = derive_metrics(&data);
    let count = data.len();
    Ok(Json(ListGrowthMetricsResponse {
        data,
        count,
        derived,
    }))
}

pub async fn create_growth_metric(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(model_id): Path<Uuid>,
    Json(body): Json<CreateGrowthMetricRequest>,
) -> Result<impl IntoResponse, ApiError> {
    owned_growth_model(&state, user, model_id).await?;
    require_non_blank("name", &body.name)?;
    require_non_blank("category", &body.category)?;
    require_finite("current_value", body.current_value)?;
    require_finite("target_value", body.target_value)?;

    let kind = body
        .kind
        .unwrap_or_else(|| infer_well_known_kind(&body.name, &body.category));

    let now = Utc::now();
    let metric = GrowthMetric {
        id: Uuid::new_v4(),
        growth_model_id: model_id,
        name: body.name.trim().to_string(),
        category: body.category.trim().to_string(),
        kind,
        current_value: body.current_value,
        target_value: body.target_value,
        unit: body.unit,
        status: body.status,
        created_at: now,
        updated_at: now,
    };

    let created = GrowthMetricRepository::create(&state.growth_repo, metric).await?;
    tracing::info!(
        growth_metric_id = %created.id,
        kind = created.kind.as_str(),
        "growth metric created"
    );
    Ok((StatusCode::CREATED, Json(GrowthMetricResponse { data: created })))
}

pub async fn update_growth_metric(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateGrowthMetricRequest>,
) -> Result<Json<GrowthMetricResponse>, ApiError> {
    let (existing, _project_id) = owned_growth_metric(&state, user, id).await?;

    let name = body.name.unwrap_or(existing.name);
    let category = body.category.unwrap_or(existing.category);
    let current_value = body.current_value.unwrap_or(existing.current_value);
    let target_value = body.target_value.unwrap_or(existing.target_value);
    require_non_blank("name", &name)?;
    require_non_blank("category", &category)?;
    require_finite("current_value", current_value)?;
    require_finite("target_value", target_value)?;

    let metric = GrowthMetric {
        id,
        growth_model_id: existing.growth_model_id,
        name: name.trim().to_string(),
        category: category.trim().to_string(),
        kind: body.kind.unwrap_or(existing.kind),
        current_value,
        target_value,
        unit: body.unit.unwrap_or(existing.unit),
        status: body.status.unwrap_or(existing.status),
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    let updated = GrowthMetricRepository::update(&state.growth_repo, metric).await?;
    Ok(Json(GrowthMetricResponse { data: updated }))
}

pub async fn delete_growth_metric(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    owned_growth_metric(&state, user, id).await?;
    if !GrowthMetricRepository::delete(&state.growth_repo, id).await? {
        return Err(ApiError::not_found(format!("growth metric not found: {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}
