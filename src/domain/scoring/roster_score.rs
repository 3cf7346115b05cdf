use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use super::ledger::PerformanceLedger;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::fixture::PerformanceRecord;
use crate::domain::repositories::{Repositories, RosterRepository, RoundRepository};
use crate::domain::roster::Roster;

/// Sums the round-score contributions of a set of players
///
/// Only records whose match is in `round_match_ids` count. Players are
/// deduplicated first, so a player listed twice contributes once. A player
/// without qualifying records contributes zero.
pub fn sum_round_points<'a>(
    player_ids: impl IntoIterator<Item = &'a Uuid>,
    records: &[PerformanceRecord],
    round_match_ids: &HashSet<Uuid>,
) -> i32 {
    let players: HashSet<&Uuid> = player_ids.into_iter().collect();

    records
        .iter()
        .filter(|r| players.contains(&r.player_id) && round_match_ids.contains(&r.match_id))
        .fold(0i32, |total, r| total.saturating_add(r.points))
}

/// Computes a roster's round score from the performance ledger
///
/// The only side effect is the write-back of the roster's cached total;
/// ledger entries are never touched.
#[derive(Clone)]
pub struct RosterScoreAggregator {
    ledger: PerformanceLedger,
    rosters: Arc<dyn RosterRepository>,
    rounds: Arc<dyn RoundRepository>,
}

impl RosterScoreAggregator {
    pub fn new(
        ledger: PerformanceLedger,
        rosters: Arc<dyn RosterRepository>,
        rounds: Arc<dyn RoundRepository>,
    ) -> Self {
        Self {
            ledger,
            rosters,
            rounds,
        }
    }

    pub fn from_repositories(repos: &Repositories) -> Self {
        Self::new(
            PerformanceLedger::from_repositories(repos),
            repos.rosters.clone(),
            repos.rounds.clone(),
        )
    }

    /// Computes the round score without touching the roster
    pub async fn compute(&self, roster: &Roster) -> DomainResult<i32> {
        let round_match_ids = self.ledger.round_match_ids(roster.round_id()).await?;
        self.compute_within(roster, &round_match_ids).await
    }

    async fn compute_within(
        &self,
        roster: &Roster,
        round_match_ids: &HashSet<Uuid>,
    ) -> DomainResult<i32> {
        let mut records = Vec::new();
        for player_id in roster.player_ids() {
            records.extend(self.ledger.all_for_player(*player_id).await?);
        }

        Ok(sum_round_points(
            roster.player_ids(),
            &records,
            round_match_ids,
        ))
    }

    /// Computes the round score and writes it onto the roster's cache
    pub async fn score_for(&self, roster: &mut Roster) -> DomainResult<i32> {
        let total = self.compute(roster).await?;
        let event = roster.record_score(total);
        tracing::debug!(roster_id = %event.roster_id(), total, "Roster scored");
        Ok(total)
    }

    /// Loads a roster, recomputes its score and persists the new cache
    ///
    /// Only the cached total is written, so a roster deleted while scoring
    /// is not brought back.
    pub async fn rescore(&self, roster_id: Uuid) -> DomainResult<Roster> {
        let mut roster = self
            .rosters
            .find_by_id(roster_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Roster", roster_id))?;

        let total = self.score_for(&mut roster).await?;
        self.rosters.update_cached_total(roster.id(), Some(total)).await?;

        Ok(roster)
    }

    /// Recomputes every roster of a round
    ///
    /// All scores are computed before any roster is saved, so a ledger
    /// failure leaves every stored cache as it was.
    pub async fn score_round(&self, round_id: Uuid) -> DomainResult<Vec<Roster>> {
        if self.rounds.find_by_id(round_id).await?.is_none() {
            return Err(DomainError::not_found("Round", round_id));
        }

        let mut rosters = self.rosters.find_by_round(round_id).await?;
        let mut totals = Vec::with_capacity(rosters.len());
        let round_match_ids = self.ledger.round_match_ids(round_id).await?;
        for roster in &rosters {
            totals.push(self.compute_within(roster, &round_match_ids).await?);
        }

        for (roster, total) in rosters.iter_mut().zip(totals) {
            roster.record_score(total);
            self.rosters
                .update_cached_total(roster.id(), Some(total))
                .await?;
        }

        tracing::info!(%round_id, rosters = rosters.len(), "Round rosters rescored");
        Ok(rosters)
    }
}
