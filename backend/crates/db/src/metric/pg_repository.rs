use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::db_err;
use crate::metric::models::{Metric, MetricStatus};
use crate::metric::repositories::MetricRepository;
use leanval_common::error::{LeanvalError, LeanvalResult};

const METRIC_COLUMNS: &str = "id, project_id, name, category, current, target, \
     warning_threshold, error_threshold, status, created_at, updated_at";

#[derive(Clone)]
pub struct PgMetricRepository {
    pool: PgPool,
}

impl PgMetricRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> LeanvalResult<Metric> {
        let status_raw: String = row.get("status");
        let status = MetricStatus::from_str(&status_raw).map_err(LeanvalError::Internal)?;

        Ok(Metric {
            id: row.get("id"),
            project_id: row.get("project_id"),
            name: row.get("name"),
            category: row.get("category"),
            current: row.get("current"),
            target: row.get("target"),
            warning_threshold: row.get("warning_threshold"),
            error_threshold: row.get("error_threshold"),
            status,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}

#[async_trait]
impl MetricRepository for PgMetricRepository {
    async fn list_by_project(&self, project_id: Uuid) -> LeanvalResult<Vec<Metric>> {
        let rows = sqlx::query(&format!(
            "select {METRIC_COLUMNS} from metrics
             where project_id = $1
             order by category asc, name asc"
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn get_by_id(&self, id: Uuid) -> LeanvalResult<Option<Metric>> {
        let row = sqlx::query(&format!("select {METRIC_COLUMNS} from metrics where id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn create(&self, metric: Metric) -> LeanvalResult<Metric> {
        let row = sqlx::query(&format!(
            "insert into metrics
             (id, project_id, name, category, current, target,
              warning_threshold, error_threshold, status, created_at, updated_at)
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             returning {METRIC_COLUMNS}"
        ))
        .bind(metric.id)
        .bind(metric.project_id)
        .bind(&metric.name)
        .bind(&metric.category)
        .bind(&metric.current)
        .bind(&metric.target)
        .bind(&metric.warning_threshold)
        .bind(&metric.error_threshold)
        .bind(metric.status.as_str())
        .bind(metric.created_at)
        .bind(metric.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Self::map_row(&row)
    }

    async fn update(&self, metric: Metric) -> LeanvalResult<Metric> {
        let row = sqlx::query(&format!(
            "update metrics
             set name = $1, category = $2, current = $3, target = $4,
                 warning_threshold = $5, error_threshold = $6, status = $7, updated_at = $8
             where id = $9
             returning {METRIC_COLUMNS}"
        ))
        .bind(&metric.name)
        .bind(&metric.category)
        .bind(&metric.current)
        .bind(&metric.target)
        .bind(&metric.warning_threshold)
        .bind(&metric.error_threshold)
        .bind(metric.status.as_str())
        .bind(metric.updated_at)
        .bind(metric.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        match row {
            Some(r) => Self::map_row(&r),
            None => Err(LeanvalError::NotFound(format!(
                "metric not found: {}",
                metric.id
            ))),
        }
    }

    async fn delete(&self, id: Uuid) -> LeanvalResult<bool> {
        let result = sqlx::query("delete from metrics where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_status(&self, id: Uuid, status: MetricStatus) -> LeanvalResult<()> {
        let result = sqlx::query("update metrics set status = $1, updated_at = $2 where id = $3")
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(LeanvalError::NotFound(format!("metric not found: {id}")));
        }
        Ok(())
    }
}
