use leanval_db::project::models::Project;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub data: Project,
}

#[derive(Debug, Serialize)]
pub struct ListProjectsResponse {
    pub data: Vec<Project>,
    pub count: usize,
}
