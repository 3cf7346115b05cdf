use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::league::{League, Round};

/// Repository trait for the League aggregate
#[async_trait]
pub trait LeagueRepository: Send + Sync {
    /// Save a league (insert or update)
    async fn save(&self, league: &League) -> DomainResult<()>;

    /// Find a league by its ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<League>>;

    /// Find every league
    async fn find_all(&self) -> DomainResult<Vec<League>>;

    /// Delete a league and everything it owns
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}

/// Repository trait for rounds
#[async_trait]
pub trait RoundRepository: Send + Sync {
    /// Save a round; a second round with the same number in a league conflicts
    async fn save(&self, round: &Round) -> DomainResult<()>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Round>>;

    /// Find all rounds of a league, ordered by round number
    async fn find_by_league(&self, league_id: Uuid) -> DomainResult<Vec<Round>>;

    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
