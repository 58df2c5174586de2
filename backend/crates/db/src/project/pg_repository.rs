use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, QueryBuilder, Row};
use uuid::Uuid;

use crate::db_err;
use crate::project::models::{Project, ProjectFilter, ProjectStage};
use crate::project::repositories::ProjectRepository;
use leanval_common::error::{LeanvalError, LeanvalResult};

const PROJECT_COLUMNS: &str =
    "id, owner_id, name, description, stage, created_at, updated_at";

#[derive(Clone)]
pub struct PgProjectRepository {
    pool: PgPool,
}

impl PgProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> LeanvalResult<Project> {
        let stage_raw: String = row.get("stage");
        let stage = ProjectStage::from_str(&stage_raw).map_err(LeanvalError::Internal)?;

        Ok(Project {
            id: row.get("id"),
            owner_id: row.get("owner_id"),
            name: row.get("name"),
            description: row.get("description"),
            stage,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn get_by_id(&self, owner_id: Uuid, id: Uuid) -> LeanvalResult<Option<Project>> {
        let row = sqlx::query(&format!(
            "select {PROJECT_COLUMNS} from projects where owner_id = $1 and id = $2"
        ))
        .bind(owner_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list(&self, owner_id: Uuid, filter: ProjectFilter) -> LeanvalResult<Vec<Project>> {
        let mut qb = QueryBuilder::new(format!(
            "select {PROJECT_COLUMNS} from projects where owner_id = "
        ));
        qb.push_bind(owner_id);

        if let Some(stage) = filter.stage {
            qb.push(" and stage = ").push_bind(stage.as_str());
        }

        qb.push(" order by updated_at desc");
        qb.push(" limit ").push_bind(filter.limit.unwrap_or(50));
        qb.push(" offset ").push_bind(filter.offset.unwrap_or(0));

        let rows = qb.build().fetch_all(&self.pool).await.map_err(db_err)?;
        rows.iter().map(Self::map_row).collect()
    }

    async fn create(&self, project: Project) -> LeanvalResult<Project> {
        let row = sqlx::query(&format!(
            "insert into projects (id, owner_id, name, description, stage, created_at, updated_at)
             values ($1, $2, $3, $4, $5, $6, $7)
             returning {PROJECT_COLUMNS}"
        ))
        .bind(project.id)
        .bind(project.owner_id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.stage.as_str())
        .bind(project.created_at)
        .bind(project.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Self::map_row(&row)
    }

    async fn update(&self, project: Project) -> LeanvalResult<Project> {
        let row = sqlx::query(&format!(
            "update projects
             set name = $1, description = $2, stage = $3, updated_at = $4
             where owner_id = $5 and id = $6
             returning {PROJECT_COLUMNS}"
        ))
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.stage.as_str())
        .bind(project.updated_at)
        .bind(project.owner_id)
        .bind(project.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        match row {
            Some(r) => Self::map_row(&r),
            None => Err(LeanvalError::NotFound(format!(
                "project not found: {}",
                project.id
            ))),
        }
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> LeanvalResult<bool> {
        let result = sqlx::query("delete from projects where owner_id = $1 and id = $2")
            .bind(owner_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::test_support::test_pool;
    use chrono::Utc;

    pub(crate) fn make_project(owner_id: Uuid) -> Project {
        let now = Utc::now();
        Project {
            id: Uuid::new_v4(),
            owner_id,
            name: "Meal-kit for students".to_string(),
            description: Some("Validate weekly subscription demand".to_string()),
            stage: ProjectStage::ProblemValidation,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_and_get_project() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let repo = PgProjectRepository::new(pool);
        let owner = Uuid::new_v4();

        let created = repo.create(make_project(owner)).await.expect("create");
        let fetched = repo
            .get_by_id(owner, created.id)
            .await
            .expect("get")
            .expect("should exist");
        assert_eq!(fetched.name, "Meal-kit for students");
        assert_eq!(fetched.stage, ProjectStage::ProblemValidation);
    }

    #[tokio::test]
    async fn other_owner_cannot_see_project() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let repo = PgProjectRepository::new(pool);
        let created = repo
            .create(make_project(Uuid::new_v4()))
            .await
            .expect("create");

        let fetched = repo.get_by_id(Uuid::new_v4(), created.id).await.expect("get");
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn list_filters_by_stage() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let repo = PgProjectRepository::new(pool);
        let owner = Uuid::new_v4();

        repo.create(make_project(owner)).await.expect("create p1");
        let mut mvp = make_project(owner);
        mvp.stage = ProjectStage::Mvp;
        repo.create(mvp).await.expect("create p2");

        let filter = ProjectFilter {
            stage: Some(ProjectStage::Mvp),
            ..Default::default()
        };
        let results = repo.list(owner, filter).await.expect("list");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].stage, ProjectStage::Mvp);
    }

    #[tokio::test]
    async fn update_changes_stage_and_delete_removes() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let repo = PgProjectRepository::new(pool);
        let owner = Uuid::new_v4();
        let mut project = repo.create(make_project(owner)).await.expect("create");

        project.stage = ProjectStage::Pivot;
        project.updated_at = Utc::now();
        let updated = repo.update(project.clone()).await.expect("update");
        assert_eq!(updated.stage, ProjectStage::Pivot);

        assert!(repo.delete(owner, project.id).await.expect("delete"));
        assert!(!repo.delete(owner, project.id).await.expect("delete again"));
    }

    #[tokio::test]
    async fn update_missing_project_is_not_found() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let repo = PgProjectRepository::new(pool);
        let result = repo.update(make_project(Uuid::new_v4())).await;
        assert!(matches!(result, Err(LeanvalError::NotFound(_))));
    }
}
