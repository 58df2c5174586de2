use async_trait::async_trait;
use uuid::Uuid;

use crate::growth::models::{GrowthMetric, GrowthModel};
use leanval_common::error::LeanvalResult;

#[async_trait]
pub trait GrowthModelRepository: Send + Sync {
    async fn list_by_project(&self, project_id: Uuid) -> LeanvalResult<Vec<GrowthModel>>;
    async fn get_by_id(&self, id: Uuid) -> LeanvalResult<Option<GrowthModel>>;
    async fn create(&self, model: GrowthModel) -> LeanvalResult<GrowthModel>;
    async fn delete(&self, id: Uuid) -> LeanvalResult<bool>;
}

#[async_trait]
pub trait GrowthMetricRepository: Send + Sync {
    async fn list_by_model(&self, growth_model_id: Uuid) -> LeanvalResult<Vec<GrowthMetric>>;
    async fn get_by_id(&self, id: Uuid) -> LeanvalResult<Option<GrowthMetric>>;
    async fn create(&self, metric: GrowthMetric) -> LeanvalResult<GrowthMetric>;
    async fn update(&self, metric: GrowthMetric) -> LeanvalResult<GrowthMetric>;
    async fn delete(&self, id: Uuid) -> LeanvalResult<bool>;
}
