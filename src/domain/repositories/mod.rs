// Repository ports (interfaces the infrastructure layer implements)
// Services and handlers only ever see these traits

pub mod fixture_repository;
pub mod league_repository;
pub mod manager_repository;
pub mod roster_repository;
pub mod team_repository;

use std::sync::Arc;

pub use fixture_repository::{MatchRepository, PerformanceRepository};
pub use league_repository::{LeagueRepository, RoundRepository};
pub use manager_repository::ManagerRepository;
pub use roster_repository::RosterRepository;
pub use team_repository::{PlayerRepository, TeamRepository};

/// One handle per repository port
///
/// Cheap to clone; every field is reference counted.
#[derive(Clone)]
pub struct Repositories {
    pub leagues: Arc<dyn LeagueRepository>,
    pub rounds: Arc<dyn RoundRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub players: Arc<dyn PlayerRepository>,
    pub matches: Arc<dyn MatchRepository>,
    pub performances: Arc<dyn PerformanceRepository>,
    pub rosters: Arc<dyn RosterRepository>,
    pub managers: Arc<dyn ManagerRepository>,
}
