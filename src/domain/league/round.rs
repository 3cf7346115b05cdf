use serde::Serialize;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};

/// One competition cycle within a league
///
/// Matches and rosters reference their round by id; the round itself holds
/// no embedded collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    pub id: Uuid,
    pub league_id: Uuid,
    /// 1-based sequence number, unique within the league
    pub number: u32,
}

impl Round {
    pub fn new(league_id: Uuid, number: u32) -> DomainResult<Self> {
        if number == 0 {
            return Err(DomainError::invalid("Round number must start at 1"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            league_id,
            number,
        })
    }
}
