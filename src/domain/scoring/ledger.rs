use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::fixture::PerformanceRecord;
use crate::domain::repositories::{MatchRepository, PerformanceRepository, Repositories};

/// Read-only access to per-(player, match) performance records
///
/// Absence of a record is a normal empty result, never an error.
#[derive(Clone)]
pub struct PerformanceLedger {
    performances: Arc<dyn PerformanceRepository>,
    matches: Arc<dyn MatchRepository>,
}

impl PerformanceLedger {
    pub fn new(
        performances: Arc<dyn PerformanceRepository>,
        matches: Arc<dyn MatchRepository>,
    ) -> Self {
        Self {
            performances,
            matches,
        }
    }

    pub fn from_repositories(repos: &Repositories) -> Self {
        Self::new(repos.performances.clone(), repos.matches.clone())
    }

    /// The record for one player in one match, if any
    pub async fn record_for(
        &self,
        player_id: Uuid,
        match_id: Uuid,
    ) -> DomainResult<Option<PerformanceRecord>> {
        self.performances
            .find_by_player_and_match(player_id, match_id)
            .await
    }

    /// Every record of a player across the season
    pub async fn all_for_player(&self, player_id: Uuid) -> DomainResult<Vec<PerformanceRecord>> {
        self.performances.find_by_player(player_id).await
    }

    /// Every record produced by the matches of a round
    pub async fn all_for_round(&self, round_id: Uuid) -> DomainResult<Vec<PerformanceRecord>> {
        let mut records = Vec::new();
        for m in self.matches.find_by_round(round_id).await? {
            records.extend(self.performances.find_by_match(m.id()).await?);
        }
        Ok(records)
    }

    /// Identifiers of the matches scheduled in a round
    pub async fn round_match_ids(&self, round_id: Uuid) -> DomainResult<HashSet<Uuid>> {
        Ok(self
            .matches
            .find_by_round(round_id)
            .await?
            .iter()
            .map(|m| m.id())
            .collect())
    }

    /// Season aggregate of a player's recorded statistics
    pub async fn player_totals(&self, player_id: Uuid) -> DomainResult<PlayerSeasonTotals> {
        let records = self.all_for_player(player_id).await?;
        Ok(PlayerSeasonTotals::from_records(player_id, &records))
    }
}

/// Season-long sums of a player's ledger entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerSeasonTotals {
    pub player_id: Uuid,
    /// Matches with a ledger entry
    pub matches_recorded: u32,
    /// Matches where the appearance threshold was reached
    pub appearances: u32,
    pub goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub goals_conceded: u32,
    pub total_points: i64,
}

impl PlayerSeasonTotals {
    /// Folds the given records, skipping any that belong to another player
    pub fn from_records(player_id: Uuid, records: &[PerformanceRecord]) -> Self {
        records
            .iter()
            .filter(|r| r.player_id == player_id)
            .fold(
                Self {
                    player_id,
                    ..Self::default()
                },
                |mut acc, r| {
                    acc.matches_recorded += 1;
                    acc.appearances += u32::from(r.stats.played_minimum);
                    acc.goals += r.stats.goals;
                    acc.assists += r.stats.assists;
                    acc.yellow_cards += r.stats.yellow_cards;
                    acc.red_cards += u32::from(r.stats.red_card);
                    acc.goals_conceded += r.stats.goals_conceded;
                    acc.total_points += i64::from(r.points);
                    acc
                },
            )
    }
}
