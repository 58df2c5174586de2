use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateMetricRequest {
    pub name: String,
    pub category: String,
    pub current: Option<String>,
    pub target: String,
    pub warning_threshold: Option<String>,
    pub error_threshold: Option<String>,
}

/// Absent fields keep their stored value. Send an empty string to clear
/// `current` or a threshold.
#[derive(Debug, Deserialize)]
pub struct UpdateMetricRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub current: Option<String>,
    pub target: Option<String>,
    pub warning_threshold: Option<String>,
    pub error_threshold: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub current: Option<String>,
    pub target: String,
    pub warning_threshold: Option<String>,
    pub error_threshold: Option<String>,
}
