use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::db_err;
use crate::growth::models::MetricUnit;
use crate::scaling::models::ScalingReadinessMetric;
use crate::scaling::repositories::ScalingMetricRepository;
use leanval_common::error::{LeanvalError, LeanvalResult};

const SCALING_COLUMNS: &str = "id, project_id, growth_metric_id, name, category, \
     current_value, target_value, unit, status, created_at, updated_at";

#[derive(Clone)]
pub struct PgScalingMetricRepository {
    pool: PgPool,
}

impl PgScalingMetricRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> LeanvalResult<ScalingReadinessMetric> {
        let unit_raw: String = row.get("unit");

        Ok(ScalingReadinessMetric {
            id: row.get("id"),
            project_id: row.get("project_id"),
            growth_metric_id: row.get("growth_metric_id"),
            name: row.get("name"),
            category: row.get("category"),
            current_value: row.get("current_value"),
            target_value: row.get("target_value"),
            unit: MetricUnit::from_str(&unit_raw).map_err(LeanvalError::Internal)?,
            status: row.get("status"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}

#[async_trait]
impl ScalingMetricRepository for PgScalingMetricRepository {
    async fn list_by_project(&self, project_id: Uuid) -> LeanvalResult<Vec<ScalingReadinessMetric>> {
        let rows = sqlx::query(&format!(
            "select {SCALING_COLUMNS} from scaling_readiness_metrics
             where project_id = $1
             order by category asc, name asc"
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn get_by_id(&self, id: Uuid) -> LeanvalResult<Option<ScalingReadinessMetric>> {
        let row = sqlx::query(&format!(
            "select {SCALING_COLUMNS} from scaling_readiness_metrics where id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn create(&self, metric: ScalingReadinessMetric) -> LeanvalResult<ScalingReadinessMetric> {
        let row = sqlx::query(&format!(
            "insert into scaling_readiness_metrics
             (id, project_id, growth_metric_id, name, category, current_value, target_value,
              unit, status, created_at, updated_at)
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             returning {SCALING_COLUMNS}"
        ))
        .bind(metric.id)
        .bind(metric.project_id)
        .bind(metric.growth_metric_id)
        .bind(&metric.name)
        .bind(&metric.category)
        .bind(metric.current_value)
        .bind(metric.target_value)
        .bind(metric.unit.as_str())
        .bind(&metric.status)
        .bind(metric.created_at)
        .bind(metric.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Self::map_row(&row)
    }

    async fn update(&self, metric: ScalingReadinessMetric) -> LeanvalResult<ScalingReadinessMetric> {
        let row = sqlx::query(&format!(
            "update scaling_readiness_metrics
             set growth_metric_id = $1, name = $2, category = $3, current_value = $4,
                 target_value = $5, unit = $6, status = $7, updated_at = $8
             where id = $9
             returning {SCALING_COLUMNS}"
        ))
        .bind(metric.growth_metric_id)
        .bind(&metric.name)
        .bind(&metric.category)
        .bind(metric.current_value)
        .bind(metric.target_value)
        .bind(metric.unit.as_str())
        .bind(&metric.status)
        .bind(metric.updated_at)
        .bind(metric.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        match row {
            Some(r) => Self::map_row(&r),
            None => Err(LeanvalError::NotFound(format!(
                "scaling metric not found: {}",
                metric.id
            ))),
        }
    }

    async fn delete(&self, id: Uuid) -> LeanvalResult<bool> {
        let result = sqlx::query("delete from scaling_readiness_metrics where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }
}
