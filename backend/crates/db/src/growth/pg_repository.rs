use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::db_err;
use crate::growth::models::{GrowthMetric, GrowthModel, GrowthStatus, MetricUnit, WellKnownKind};
use crate::growth::repositories::{GrowthMetricRepository, GrowthModelRepository};
use leanval_common::error::{LeanvalError, LeanvalResult};

const MODEL_COLUMNS: &str =
    "id, project_id, name, framework, description, created_at, updated_at";

const METRIC_COLUMNS: &str = "id, growth_model_id, name, category, kind, \
     current_value, target_value, unit, status, created_at, updated_at";

/// Backs both growth models and their metrics.
#[derive(Clone)]
pub struct PgGrowthRepository {
    pool: PgPool,
}

impl PgGrowthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_model_row(row: &PgRow) -> GrowthModel {
        GrowthModel {
            id: row.get("id"),
            project_id: row.get("project_id"),
            name: row.get("name"),
            framework: row.get("framework"),
            description: row.get("description"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    fn map_metric_row(row: &PgRow) -> LeanvalResult<GrowthMetric> {
        let kind_raw: String = row.get("kind");
        let unit_raw: String = row.get("unit");
        let status_raw: String = row.get("status");

        Ok(GrowthMetric {
            id: row.get("id"),
            growth_model_id: row.get("growth_model_id"),
            name: row.get("name"),
            category: row.get("category"),
            kind: WellKnownKind::from_str(&kind_raw).map_err(LeanvalError::Internal)?,
            current_value: row.get("current_value"),
            target_value: row.get("target_value"),
            unit: MetricUnit::from_str(&unit_raw).map_err(LeanvalError::Internal)?,
            status: GrowthStatus::from_str(&status_raw).map_err(LeanvalError::Internal)?,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}

#[async_trait]
impl GrowthModelRepository for PgGrowthRepository {
    async fn list_by_project(&self, project_id: Uuid) -> LeanvalResult<Vec<GrowthModel>> {
        let rows = sqlx::query(&format!(
            "select {MODEL_COLUMNS} from growth_models
             where project_id = $1
             order by created_at desc"
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.iter().map(Self::map_model_row).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> LeanvalResult<Option<GrowthModel>> {
        let row = sqlx::query(&format!(
            "select {MODEL_COLUMNS} from growth_models where id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.as_ref().map(Self::map_model_row))
    }

    async fn create(&self, model: GrowthModel) -> LeanvalResult<GrowthModel> {
        let row = sqlx::query(&format!(
            "insert into growth_models
             (id, project_id, name, framework, description, created_at, updated_at)
             values ($1, $2, $3, $4, $5, $6, $7)
             returning {MODEL_COLUMNS}"
        ))
        .bind(model.id)
        .bind(model.project_id)
        .bind(&model.name)
        .bind(&model.framework)
        .bind(&model.description)
        .bind(model.created_at)
        .bind(model.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(Self::map_model_row(&row))
    }

    async fn delete(&self, id: Uuid) -> LeanvalResult<bool> {
        let result = sqlx::query("delete from growth_models where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl GrowthMetricRepository for PgGrowthRepository {
    async fn list_by_model(&self, growth_model_id: Uuid) -> LeanvalResult<Vec<GrowthMetric>> {
        let rows = sqlx::query(&format!(
            "select {METRIC_COLUMNS} from growth_metrics
             where growth_model_id = $1
             order by category asc, name asc"
        ))
        .bind(growth_model_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(Self::map_metric_row).collect()
    }

    async fn get_by_id(&self, id: Uuid) -> LeanvalResult<Option<GrowthMetric>> {
        let row = sqlx::query(&format!(
            "select {METRIC_COLUMNS} from growth_metrics where id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(Self::map_metric_row).transpose()
    }

    async fn create(&self, metric: GrowthMetric) -> LeanvalResult<GrowthMetric> {
        let row = sqlx::query(&format!(
            "insert into growth_metrics
             (id, growth_model_id, name, category, kind, current_value, target_value,
              unit, status, created_at, updated_at)
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             returning {METRIC_COLUMNS}"
        ))
        .bind(metric.id)
        .bind(metric.growth_model_id)
        .bind(&metric.name)
        .bind(&metric.category)
        .bind(metric.kind.as_str())
        .bind(metric.current_value)
        .bind(metric.target_value)
        .bind(metric.unit.as_str())
        .bind(metric.status.as_str())
        .bind(metric.created_at)
        .bind(metric.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Self::map_metric_row(&row)
    }

    async fn update(&self, metric: GrowthMetric) -> LeanvalResult<GrowthMetric> {
        let row = sqlx::query(&format!(
            "update growth_metrics
             set name = $1, category = $2, kind = $3, current_value = $4, target_value = $5,
                 unit = $6, status = $7, updated_at = $8
             where id = $9
             returning {METRIC_COLUMNS}"
        ))
        .bind(&metric.name)
        .bind(&metric.category)
        .bind(metric.kind.as_str())
        .bind(metric.current_value)
        .bind(metric.target_value)
        .bind(metric.unit.as_str())
        .bind(metric.status.as_str())
        .bind(metric.updated_at)
        .bind(metric.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        match row {
            Some(r) => Self::map_metric_row(&r),
            None => Err(LeanvalError::NotFound(format!(
                "growth metric not found: {}",
                metric.id
            ))),
        }
    }

    async fn delete(&self, id: Uuid) -> LeanvalResult<bool> {
        let result = sqlx::query("delete from growth_metrics where id = $1")
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
    use crate::project::pg_repository::tests::make_project;
    use crate::project::pg_repository::PgProjectRepository;
    use crate::project::repositories::ProjectRepository;
    use crate::test_support::test_pool;
    use chrono::Utc;

    pub(crate) fn make_model(project_id: Uuid) -> GrowthModel {
        let now = Utc::now();
        GrowthModel {
            id: Uuid::new_v4(),
            project_id,
            name: "Paid acquisition".to_string(),
            framework: "AARRR".to_string(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn make_growth_metric(
        growth_model_id: Uuid,
        name: &str,
        kind: WellKnownKind,
        current_value: f64,
    ) -> GrowthMetric {
        let now = Utc::now();
        GrowthMetric {
            id: Uuid::new_v4(),
            growth_model_id,
            name: name.to_string(),
            category: "acquisition".to_string(),
            kind,
            current_value,
            target_value: current_value,
            unit: MetricUnit::Currency,
            status: GrowthStatus::OnTrack,
            created_at: now,
            updated_at: now,
        }
    }

    async fn seeded_model(pool: &PgPool) -> GrowthModel {
        let project = PgProjectRepository::new(pool.clone())
            .create(make_project(Uuid::new_v4()))
            .await
            .expect("create project");
        GrowthModelRepository::create(&PgGrowthRepository::new(pool.clone()), make_model(project.id))
            .await
            .expect("create model")
    }

    #[tokio::test]
    async fn create_and_list_models() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let model = seeded_model(&pool).await;
        let repo = PgGrowthRepository::new(pool);

        let models = repo.list_by_project(model.project_id).await.expect("list");
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].framework, "AARRR");
    }

    #[tokio::test]
    async fn growth_metric_kind_survives_round_trip() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let model = seeded_model(&pool).await;
        let repo = PgGrowthRepository::new(pool);

        GrowthMetricRepository::create(
            &repo,
            make_growth_metric(model.id, "Blended CAC", WellKnownKind::Cac, 50.0),
        )
        .await
        .expect("create cac");
        GrowthMetricRepository::create(
            &repo,
            make_growth_metric(model.id, "Customer LTV", WellKnownKind::Ltv, 200.0),
        )
        .await
        .expect("create ltv");

        let metrics = repo.list_by_model(model.id).await.expect("list");
        assert_eq!(metrics.len(), 2);
        assert!(metrics.iter().any(|m| m.kind == WellKnownKind::Cac));
        assert!(metrics.iter().any(|m| m.kind == WellKnownKind::Ltv));
    }

    #[tokio::test]
    async fn update_growth_metric_value() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let model = seeded_model(&pool).await;
        let repo = PgGrowthRepository::new(pool);
        let mut metric = GrowthMetricRepository::create(
            &repo,
            make_growth_metric(model.id, "Blended CAC", WellKnownKind::Cac, 50.0),
        )
        .await
        .expect("create");

        metric.current_value = 42.5;
        metric.status = GrowthStatus::AtRisk;
        let updated = GrowthMetricRepository::update(&repo, metric).await.expect("update");
        assert!((updated.current_value - 42.5).abs() < f64::EPSILON);
        assert_eq!(updated.status, GrowthStatus::AtRisk);
    }

    #[tokio::test]
    async fn deleting_model_removes_metrics() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let model = seeded_model(&pool).await;
        let repo = PgGrowthRepository::new(pool);
        let metric = GrowthMetricRepository::create(
            &repo,
            make_growth_metric(model.id, "Churn", WellKnownKind::Other, 5.0),
        )
        .await
        .expect("create");

        assert!(GrowthModelRepository::delete(&repo, model.id)
            .await
            .expect("delete"));
        let fetched = GrowthMetricRepository::get_by_id(&repo, metric.id)
            .await
            .expect("get");
        assert!(fetched.is_none());
    }
}
