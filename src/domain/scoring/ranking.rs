use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use super::roster_score::RosterScoreAggregator;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::league::Round;
use crate::domain::manager::Manager;
use crate::domain::repositories::{
    LeagueRepository, ManagerRepository, Repositories, RosterRepository, RoundRepository,
};
use crate::domain::roster::Roster;

/// A manager's score for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundScore {
    pub manager_id: Uuid,
    pub round_id: Uuid,
    pub points: i32,
}

impl RoundScore {
    /// Score carried by a roster's cache, `None` if the cache is stale
    pub fn from_roster(roster: &Roster) -> Option<Self> {
        roster.cached_total().map(|points| Self {
            manager_id: roster.manager_id(),
            round_id: roster.round_id(),
            points,
        })
    }
}

/// One line of the manager leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    /// 1-based position
    pub position: usize,
    pub manager_id: Uuid,
    pub manager_name: String,
    pub total: i64,
}

/// Ranks managers by the sum of their scores in `rounds`
///
/// A manager without a score in a round contributes zero for it. Scores for
/// rounds outside `rounds` are ignored; if a (manager, round) pair appears
/// more than once the last score wins. Order is cumulative total descending,
/// then manager name and id ascending.
pub fn rank_managers(
    managers: &[Manager],
    rounds: &[Round],
    scores: &[RoundScore],
) -> Vec<RankingEntry> {
    let round_ids: HashSet<Uuid> = rounds.iter().map(|r| r.id).collect();
    let per_round: HashMap<(Uuid, Uuid), i32> = scores
        .iter()
        .filter(|s| round_ids.contains(&s.round_id))
        .map(|s| ((s.manager_id, s.round_id), s.points))
        .collect();

    let mut totals: HashMap<Uuid, i64> = HashMap::new();
    for ((manager_id, _), points) in &per_round {
        *totals.entry(*manager_id).or_default() += i64::from(*points);
    }

    let mut seen = HashSet::with_capacity(managers.len());
    let mut entries: Vec<RankingEntry> = managers
        .iter()
        .filter(|m| seen.insert(m.id()))
        .map(|m| RankingEntry {
            position: 0,
            manager_id: m.id(),
            manager_name: m.name().to_string(),
            total: totals.get(&m.id()).copied().unwrap_or(0),
        })
        .collect();

    entries.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.manager_name.cmp(&b.manager_name))
            .then_with(|| a.manager_id.cmp(&b.manager_id))
    });
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.position = i + 1;
    }

    entries
}

/// Repository-backed manager rankings
///
/// Every pass recomputes each roster score from the ledger before summing,
/// then overwrites the roster and manager caches. Nothing is written until
/// the whole ranking has been computed, and only the cache columns are
/// written: rows deleted during the pass stay deleted.
#[derive(Clone)]
pub struct RankingService {
    leagues: Arc<dyn LeagueRepository>,
    managers: Arc<dyn ManagerRepository>,
    rounds: Arc<dyn RoundRepository>,
    rosters: Arc<dyn RosterRepository>,
    aggregator: RosterScoreAggregator,
}

impl RankingService {
    pub fn from_repositories(repos: &Repositories) -> Self {
        Self {
            leagues: repos.leagues.clone(),
            managers: repos.managers.clone(),
            rounds: repos.rounds.clone(),
            rosters: repos.rosters.clone(),
            aggregator: RosterScoreAggregator::from_repositories(repos),
        }
    }

    /// Ranks the given managers over the given rounds
    ///
    /// Updates each manager's cumulative cache in place and persists it,
    /// together with every recomputed roster total.
    pub async fn rank_managers(
        &self,
        managers: &mut [Manager],
        rounds: &[Round],
    ) -> DomainResult<Vec<RankingEntry>> {
        let manager_ids: HashSet<Uuid> = managers.iter().map(|m| m.id()).collect();

        let mut scored: Vec<Roster> = Vec::new();
        for round in rounds {
            for mut roster in self.rosters.find_by_round(round.id).await? {
                if !manager_ids.contains(&roster.manager_id()) {
                    continue;
                }
                let total = self.aggregator.compute(&roster).await?;
                roster.record_score(total);
                scored.push(roster);
            }
        }

        let scores: Vec<RoundScore> = scored.iter().filter_map(RoundScore::from_roster).collect();
        let entries = rank_managers(managers, rounds, &scores);

        for roster in &scored {
            self.rosters
                .update_cached_total(roster.id(), roster.cached_total())
                .await?;
        }

        let totals: HashMap<Uuid, i64> = entries.iter().map(|e| (e.manager_id, e.total)).collect();
        for manager in managers.iter_mut() {
            if let Some(total) = totals.get(&manager.id()) {
                manager.record_cumulative(*total);
                self.managers.update_cumulative(manager.id(), *total).await?;
            }
        }

        tracing::info!(
            managers = entries.len(),
            rounds = rounds.len(),
            "Manager ranking recomputed"
        );
        Ok(entries)
    }

    /// Freshly computed leaderboard of a league over all its rounds
    pub async fn leaderboard(&self, league_id: Uuid) -> DomainResult<Vec<RankingEntry>> {
        if self.leagues.find_by_id(league_id).await?.is_none() {
            return Err(DomainError::not_found("League", league_id));
        }

        let mut managers = self.managers.find_by_league(league_id).await?;
        let rounds = self.rounds.find_by_league(league_id).await?;

        self.rank_managers(&mut managers, &rounds).await
    }

    /// 1-based leaderboard position of a manager in a league
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - If the league does not exist or the
    ///   manager is not part of its ranking
    pub async fn position_of(&self, manager_id: Uuid, league_id: Uuid) -> DomainResult<usize> {
        self.leaderboard(league_id)
            .await?
            .iter()
            .find(|e| e.manager_id == manager_id)
            .map(|e| e.position)
            .ok_or_else(|| DomainError::not_found("Manager", manager_id))
    }
}
