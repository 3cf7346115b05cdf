use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};

/// Top-level container for a fantasy competition
///
/// Owns its teams, rounds and managers; deleting a league removes all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct League {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl League {
    /// Creates a new league
    ///
    /// # Returns
    /// * `Err(DomainError::InvalidInput)` - If the name is blank
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invalid("League name cannot be empty"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
        })
    }
}
