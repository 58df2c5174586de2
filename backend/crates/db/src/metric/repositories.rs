use async_trait::async_trait;
use uuid::Uuid;

use crate::metric::models::{Metric, MetricStatus};
use leanval_common::error::LeanvalResult;

#[async_trait]
pub trait MetricRepository: Send + Sync {
    async fn list_by_project(&self, project_id: Uuid) -> LeanvalResult<Vec<Metric>>;
    async fn get_by_id(&self, id: Uuid) -> LeanvalResult<Option<Metric>>;
    async fn create(&self, metric: Metric) -> LeanvalResult<Metric>;
    async fn update(&self, metric: Metric) -> LeanvalResult<Metric>;
    async fn delete(&self, id: Uuid) -> LeanvalResult<bool>;

    /// Persist only the stored status column.
    async fn update_status(&self, id: Uuid, status: MetricStatus) -> LeanvalResult<()>;
}
