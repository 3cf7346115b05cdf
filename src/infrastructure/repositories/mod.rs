// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory;
pub mod postgres_fixture_repository;
pub mod postgres_league_repository;
pub mod postgres_manager_repository;
pub mod postgres_roster_repository;
pub mod postgres_team_repository;

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::errors::DomainError;
use crate::domain::repositories::Repositories;

pub use in_memory::InMemoryStore;
pub use postgres_fixture_repository::{PostgresMatchRepository, PostgresPerformanceRepository};
pub use postgres_league_repository::{PostgresLeagueRepository, PostgresRoundRepository};
pub use postgres_manager_repository::PostgresManagerRepository;
pub use postgres_roster_repository::PostgresRosterRepository;
pub use postgres_team_repository::{PostgresPlayerRepository, PostgresTeamRepository};

/// Repository bundle backed by a PostgreSQL pool
pub fn postgres_repositories(pool: PgPool) -> Repositories {
    Repositories {
        leagues: Arc::new(PostgresLeagueRepository::new(pool.clone())),
        rounds: Arc::new(PostgresRoundRepository::new(pool.clone())),
        teams: Arc::new(PostgresTeamRepository::new(pool.clone())),
        players: Arc::new(PostgresPlayerRepository::new(pool.clone())),
        matches: Arc::new(PostgresMatchRepository::new(pool.clone())),
        performances: Arc::new(PostgresPerformanceRepository::new(pool.clone())),
        rosters: Arc::new(PostgresRosterRepository::new(pool.clone())),
        managers: Arc::new(PostgresManagerRepository::new(pool)),
    }
}

const UNIQUE_VIOLATION: &str = "23505";

/// Maps a driver error onto the domain taxonomy
///
/// Unique violations become `Conflict`; everything else is reported as
/// `StorageUnavailable` and propagated unchanged to the caller.
pub(crate) fn storage_error(context: &str, e: sqlx::Error) -> DomainError {
    let unique_violation = e
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION);

    if unique_violation {
        DomainError::conflict(format!("{}: {}", context, e))
    } else {
        DomainError::storage(format!("{}: {}", context, e))
    }
}

/// Reads a non-negative INTEGER column into a counter
pub(crate) fn counter(value: i32, column: &str) -> Result<u32, DomainError> {
    u32::try_from(value)
        .map_err(|_| DomainError::storage(format!("Negative value in column {}: {}", column, value)))
}
