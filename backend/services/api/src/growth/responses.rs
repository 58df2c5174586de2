use leanval_db::growth::models::{GrowthMetric, GrowthModel};
use leanval_evaluation::DerivedMetric;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GrowthModelResponse {
    pub data: GrowthModel,
}

#[derive(Debug, Serialize)]
pub struct ListGrowthModelsResponse {
    pub data: Vec<GrowthModel>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct GrowthModelDetailResponse {
    pub data: GrowthModel,
    pub metrics: Vec<GrowthMetric>,
    pub derived: Vec<DerivedMetric>,
}

#[derive(Debug, Serialize)]
pub struct GrowthMetricResponse {
    pub data: GrowthMetric,
}

#[derive(Debug, Serialize)]
pub struct ListGrowthMetricsResponse {
    pub data: Vec<GrowthMetric>,
    pub count: usize,
    pub derived: Vec<DerivedMetric>,
}
