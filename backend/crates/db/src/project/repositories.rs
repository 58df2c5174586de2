use async_trait::async_trait;
use uuid::Uuid;

use crate::project::models::{Project, ProjectFilter};
use leanval_common::error::LeanvalResult;

/// Projects are always addressed through their owner; a project owned by
/// someone else behaves as if it did not exist.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn get_by_id(&self, owner_id: Uuid, id: Uuid) -> LeanvalResult<Option<Project>>;
    async fn list(&self, owner_id: Uuid, filter: ProjectFilter) -> LeanvalResult<Vec<Project>>;
    async fn create(&self, project: Project) -> LeanvalResult<Project>;
    async fn update(&self, project: Project) -> LeanvalResult<Project>;
    async fn delete(&self, owner_id: Uuid, id: Uuid) -> LeanvalResult<bool>;
}
