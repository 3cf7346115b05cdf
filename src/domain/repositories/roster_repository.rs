use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::roster::Roster;

/// Repository trait for the Roster aggregate
///
/// At most one roster per (manager, round): saving a roster whose pair is
/// already taken by a different roster id fails with `Conflict`.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Save a roster (insert or update, including its cached total)
    async fn save(&self, roster: &Roster) -> DomainResult<()>;

    /// Overwrite only the cached total of an existing roster
    ///
    /// A roster deleted in the meantime stays deleted; the call is a no-op.
    async fn update_cached_total(&self, id: Uuid, total: Option<i32>) -> DomainResult<()>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Roster>>;

    async fn find_by_manager_and_round(
        &self,
        manager_id: Uuid,
        round_id: Uuid,
    ) -> DomainResult<Option<Roster>>;

    async fn find_by_manager(&self, manager_id: Uuid) -> DomainResult<Vec<Roster>>;

    async fn find_by_round(&self, round_id: Uuid) -> DomainResult<Vec<Roster>>;

    /// Delete a roster; performance records are left untouched
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
