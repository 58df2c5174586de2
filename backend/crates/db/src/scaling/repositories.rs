use async_trait::async_trait;
use uuid::Uuid;

use crate::scaling::models::ScalingReadinessMetric;
use leanval_common::error::LeanvalResult;

#[async_trait]
pub trait ScalingMetricRepository: Send + Sync {
    async fn list_by_project(&self, project_id: Uuid) -> LeanvalResult<Vec<ScalingReadinessMetric>>;
    async fn get_by_id(&self, id: Uuid) -> LeanvalResult<Option<ScalingReadinessMetric>>;
    async fn create(&self, metric: ScalingReadinessMetric) -> LeanvalResult<ScalingReadinessMetric>;
    async fn update(&self, metric: ScalingReadinessMetric) -> LeanvalResult<ScalingReadinessMetric>;
    async fn delete(&self, id: Uuid) -> LeanvalResult<bool>;
}
