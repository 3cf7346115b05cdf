use uuid::Uuid;

/// Domain events that occur within the Roster aggregate
///
/// # Example
/// ```
/// use fantasy_league_api::domain::roster::RosterEvent;
/// use uuid::Uuid;
///
/// let event = RosterEvent::Scored {
///     roster_id: Uuid::new_v4(),
///     manager_id: Uuid::new_v4(),
///     round_id: Uuid::new_v4(),
///     total: 12,
/// };
/// assert_eq!(event.total(), Some(12));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    /// Fired when a manager submits a roster for a round
    Submitted {
        roster_id: Uuid,
        manager_id: Uuid,
        round_id: Uuid,
        player_count: usize,
    },
    /// Fired when the player selection changes and the cached total is dropped
    PlayersReplaced { roster_id: Uuid, player_count: usize },
    /// Fired when the round score has been recomputed from the ledger
    Scored {
        roster_id: Uuid,
        manager_id: Uuid,
        round_id: Uuid,
        total: i32,
    },
}

impl RosterEvent {
    pub fn roster_id(&self) -> Uuid {
        match self {
            RosterEvent::Submitted { roster_id, .. } => *roster_id,
            RosterEvent::PlayersReplaced { roster_id, .. } => *roster_id,
            RosterEvent::Scored { roster_id, .. } => *roster_id,
        }
    }

    /// The recomputed total carried by a `Scored` event
    pub fn total(&self) -> Option<i32> {
        match self {
            RosterEvent::Scored { total, .. } => Some(*total),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitted_event_has_no_total() {
        let roster_id = Uuid::new_v4();
        let event = RosterEvent::Submitted {
            roster_id,
            manager_id: Uuid::new_v4(),
            round_id: Uuid::new_v4(),
            player_count: 5,
        };

        assert_eq!(event.roster_id(), roster_id);
        assert_eq!(event.total(), None);
    }

    #[test]
    fn players_replaced_event() {
        let roster_id = Uuid::new_v4();
        let event = RosterEvent::PlayersReplaced {
            roster_id,
            player_count: 4,
        };

        assert_eq!(event.roster_id(), roster_id);
    }
}
