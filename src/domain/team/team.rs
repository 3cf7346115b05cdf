use serde::Serialize;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};

/// A real-world club competing in the sporting classification
///
/// # Invariants
/// - Name cannot be empty
/// - Belongs to exactly one league for its whole lifetime
///
/// # Example
/// ```
/// use fantasy_league_api::domain::team::Team;
/// use uuid::Uuid;
///
/// let team = Team::new(Uuid::new_v4(), "Harbour City", None).expect("valid team");
/// assert_eq!(team.name(), "Harbour City");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    id: Uuid,
    league_id: Uuid,
    name: String,
    badge: Option<String>,
}

impl Team {
    /// Creates a new Team
    ///
    /// # Arguments
    /// * `league_id` - The league this team belongs to
    /// * `name` - Display name (cannot be empty)
    /// * `badge` - Optional reference to the badge asset
    pub fn new(
        league_id: Uuid,
        name: impl Into<String>,
        badge: Option<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invalid("Team name cannot be empty"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            league_id,
            name,
            badge: badge.filter(|b| !b.trim().is_empty()),
        })
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn league_id(&self) -> Uuid {
        self.league_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn badge(&self) -> Option<&str> {
        self.badge.as_deref()
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// Only to be used by repository implementations.
    pub fn from_persistence(id: Uuid, league_id: Uuid, name: String, badge: Option<String>) -> Self {
        Self {
            id,
            league_id,
            name,
            badge,
        }
    }
}
