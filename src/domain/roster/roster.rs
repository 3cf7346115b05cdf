use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::events::RosterEvent;
use crate::domain::errors::{DomainError, DomainResult};

/// A manager's selection of players for a single round
///
/// # Invariants
/// - At most one roster per (manager, round); enforced by the repository
/// - Players form a set: duplicates in the input collapse to one entry
/// - `cached_total` is either `None` (stale) or the last full recomputation;
///   it is never patched incrementally
///
/// Positional quotas (one goalkeeper plus four others) are validated
/// upstream, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    id: Uuid,
    manager_id: Uuid,
    round_id: Uuid,
    player_ids: BTreeSet<Uuid>,
    cached_total: Option<i32>,
    submitted_at: DateTime<Utc>,
}

impl Roster {
    /// Creates a roster from a player selection
    ///
    /// # Returns
    /// * `Ok((Roster, Vec<RosterEvent>))` - New roster and a `Submitted` event
    /// * `Err(DomainError::InvalidInput)` - If no players were selected
    pub fn new(
        manager_id: Uuid,
        round_id: Uuid,
        players: impl IntoIterator<Item = Uuid>,
    ) -> DomainResult<(Self, Vec<RosterEvent>)> {
        let player_ids: BTreeSet<Uuid> = players.into_iter().collect();
        if player_ids.is_empty() {
            return Err(DomainError::invalid("Roster must contain at least one player"));
        }

        let roster = Self {
            id: Uuid::new_v4(),
            manager_id,
            round_id,
            player_ids,
            cached_total: None,
            submitted_at: Utc::now(),
        };

        let events = vec![RosterEvent::Submitted {
            roster_id: roster.id,
            manager_id,
            round_id,
            player_count: roster.player_ids.len(),
        }];

        Ok((roster, events))
    }

    /// Replaces the player selection and invalidates the cached total
    pub fn replace_players(
        &mut self,
        players: impl IntoIterator<Item = Uuid>,
    ) -> DomainResult<RosterEvent> {
        let player_ids: BTreeSet<Uuid> = players.into_iter().collect();
        if player_ids.is_empty() {
            return Err(DomainError::invalid("Roster must contain at least one player"));
        }

        self.player_ids = player_ids;
        self.invalidate_score();

        Ok(RosterEvent::PlayersReplaced {
            roster_id: self.id,
            player_count: self.player_ids.len(),
        })
    }

    /// Overwrites the cached total with a freshly computed round score
    pub fn record_score(&mut self, total: i32) -> RosterEvent {
        self.cached_total = Some(total);

        RosterEvent::Scored {
            roster_id: self.id,
            manager_id: self.manager_id,
            round_id: self.round_id,
            total,
        }
    }

    /// Drops the cached total; the next scoring pass recomputes it
    pub fn invalidate_score(&mut self) {
        self.cached_total = None;
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn manager_id(&self) -> Uuid {
        self.manager_id
    }

    pub fn round_id(&self) -> Uuid {
        self.round_id
    }

    pub fn player_ids(&self) -> &BTreeSet<Uuid> {
        &self.player_ids
    }

    /// Last recorded round score, `None` when stale
    pub fn cached_total(&self) -> Option<i32> {
        self.cached_total
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Reconstructs a Roster from persistence layer data
    ///
    /// Accepts any player list, including an empty one, since stored rows
    /// are trusted; duplicates still collapse.
    pub fn from_persistence(
        id: Uuid,
        manager_id: Uuid,
        round_id: Uuid,
        player_ids: impl IntoIterator<Item = Uuid>,
        cached_total: Option<i32>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            manager_id,
            round_id,
            player_ids: player_ids.into_iter().collect(),
            cached_total,
            submitted_at,
        }
    }
}
