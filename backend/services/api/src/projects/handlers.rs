use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use leanval_db::project::models::{Project, ProjectFilter};
use leanval_db::project::repositories::ProjectRepository;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extractors::UserId;
use crate::ownership::owned_project;
use crate::projects::requests::{CreateProjectRequest, UpdateProjectRequest};
use crate::projects::responses::{ListProjectsResponse, ProjectResponse};
use crate::validation::{normalize_optional, require_non_blank, require_non_negative};
use crate::AppState;

pub async fn list_projects(
    State(state): State<AppState>,
    UserId(user): UserId,
    Query(filter): Query<ProjectFilter>,
) -> Result<Json<ListProjectsResponse>, ApiError> {
    require_non_negative("limit", filter.limit)?;
    require_non_negative("offset", filter.offset)?;
    let data = state.project_repo.list(user, filter).await?;
    let count = data.len();
    Ok(Json(ListProjectsResponse { data, count }))
}

pub async fn get_project(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = owned_project(&state, user, id).await?;
    Ok(Json(ProjectResponse { data: project }))
}

pub async fn create_project(
    State(state): State<AppState>,
    UserId(user): UserId,
    Json(body): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_non_blank("name", &body.name)?;

    let now = Utc::now();
    let project = Project {
        id: Uuid::new_v4(),
        owner_id: user,
        name: body.name.trim().to_string(),
        description: normalize_optional(body.description),
        stage: body.stage.unwrap_or_default(),
        created_at: now,
        updated_at: now,
    };

    let created = state.project_repo.create(project).await?;
    tracing::info!(project_id = %created.id, stage = created.stage.as_str(), "project created");
    Ok((StatusCode::CREATED, Json(ProjectResponse { data: created })))
}

pub async fn update_project(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let existing = owned_project(&state, user, id).await?;

    let name = body.name.unwrap_or(existing.name);
    require_non_blank("name", &name)?;

    let stage = body.stage.unwrap_or(existing.stage);
    if stage != existing.stage {
        tracing::info!(
            project_id = %id,
            from = existing.stage.as_str(),
            to = stage.as_str(),
            "project stage changed"
        );
    }

    let project = Project {
        id,
        owner_id: user,
        name: name.trim().to_string(),
        description: if body.description.is_some() {
            normalize_optional(body.description)
        } else {
            existing.description
        },
        stage,
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    let updated = state.project_repo.update(project).await?;
    Ok(Json(ProjectResponse { data: updated }))
}

pub async fn delete_project(
    State(state): State<AppState>,
    UserId(user): UserId,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !state.project_repo.delete(user, id).await? {
        return Err(ApiError::not_found(format!("project not found: {id}")));
    }
    tracing::info!(project_id = %id, "project deleted");
    Ok(StatusCode::NO_CONTENT)
}
