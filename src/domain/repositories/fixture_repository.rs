use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::fixture::{Match, PerformanceRecord};

/// Repository trait for finalized matches
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn save(&self, m: &Match) -> DomainResult<()>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Match>>;

    /// Find all matches scheduled in a round
    async fn find_by_round(&self, round_id: Uuid) -> DomainResult<Vec<Match>>;

    /// Find all matches of every round in a league
    async fn find_by_league(&self, league_id: Uuid) -> DomainResult<Vec<Match>>;

    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}

/// Repository trait for the performance ledger
///
/// Holds at most one record per (player, match). Saving a record whose pair
/// is already taken by a different record id fails with `Conflict`.
#[async_trait]
pub trait PerformanceRepository: Send + Sync {
    async fn save(&self, record: &PerformanceRecord) -> DomainResult<()>;

    async fn find_by_player_and_match(
        &self,
        player_id: Uuid,
        match_id: Uuid,
    ) -> DomainResult<Option<PerformanceRecord>>;

    async fn find_by_player(&self, player_id: Uuid) -> DomainResult<Vec<PerformanceRecord>>;

    async fn find_by_match(&self, match_id: Uuid) -> DomainResult<Vec<PerformanceRecord>>;

    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
