use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lean startup lifecycle stage a project is currently in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStage {
    #[default]
    ProblemValidation,
    SolutionValidation,
    Mvp,
    Metrics,
    Growth,
    Pivot,
}

impl ProjectStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProblemValidation => "problem-validation",
            Self::SolutionValidation => "solution-validation",
            Self::Mvp => "mvp",
            Self::Metrics => "metrics",
            Self::Growth => "growth",
            Self::Pivot => "pivot",
        }
    }
}

impl FromStr for ProjectStage {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "problem-validation" => Ok(Self::ProblemValidation),
            "solution-validation" => Ok(Self::SolutionValidation),
            "mvp" => Ok(Self::Mvp),
            "metrics" => Ok(Self::Metrics),
            "growth" => Ok(Self::Growth),
            "pivot" => Ok(Self::Pivot),
            _ => Err(format!("unknown project stage: {value}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub stage: ProjectStage,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectFilter {
    pub stage: Option<ProjectStage>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
