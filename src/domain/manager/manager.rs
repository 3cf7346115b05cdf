use serde::Serialize;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};

/// A fantasy participant competing in one league
///
/// `cumulative_score` mirrors the sum of the manager's round scores as of
/// the last ranking pass. It is overwritten on every pass, never incremented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manager {
    id: Uuid,
    league_id: Uuid,
    name: String,
    cumulative_score: Option<i64>,
}

impl Manager {
    pub fn new(league_id: Uuid, name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invalid("Manager name cannot be empty"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            league_id,
            name,
            cumulative_score: None,
        })
    }

    /// Replaces the cached cumulative score with a fresh total
    pub fn record_cumulative(&mut self, total: i64) {
        self.cumulative_score = Some(total);
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn league_id(&self) -> Uuid {
        self.league_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cumulative_score(&self) -> Option<i64> {
        self.cumulative_score
    }

    /// Reconstructs a Manager from persistence layer data
    pub fn from_persistence(
        id: Uuid,
        league_id: Uuid,
        name: String,
        cumulative_score: Option<i64>,
    ) -> Self {
        Self {
            id,
            league_id,
            name,
            cumulative_score,
        }
    }
}
