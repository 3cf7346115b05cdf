use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::manager::Manager;

/// Repository trait for managers
#[async_trait]
pub trait ManagerRepository: Send + Sync {
    /// Save a manager (insert or update, including the cumulative cache)
    async fn save(&self, manager: &Manager) -> DomainResult<()>;

    /// Overwrite only the cumulative cache; a no-op if the manager is gone
    async fn update_cumulative(&self, id: Uuid, total: i64) -> DomainResult<()>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Manager>>;

    async fn find_by_league(&self, league_id: Uuid) -> DomainResult<Vec<Manager>>;

    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
