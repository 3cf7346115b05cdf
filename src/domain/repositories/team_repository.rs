use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::team::{Player, Team};

/// Repository trait for the Team aggregate
///
/// Defines the contract for persisting and retrieving teams.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Save a team (insert or update)
    async fn save(&self, team: &Team) -> DomainResult<()>;

    /// Find a team by its ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Team>>;

    /// Find all teams of a league
    async fn find_by_league(&self, league_id: Uuid) -> DomainResult<Vec<Team>>;

    /// Delete a team together with its players and matches
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}

/// Repository trait for players
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn save(&self, player: &Player) -> DomainResult<()>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Player>>;

    /// Find all players registered with a team
    async fn find_by_team(&self, team_id: Uuid) -> DomainResult<Vec<Player>>;

    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
