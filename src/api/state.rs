use crate::domain::repositories::Repositories;
use crate::domain::scoring::{
    PerformanceLedger, RankingService, RosterScoreAggregator, StandingsService,
};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
}

impl AppState {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub fn ledger(&self) -> PerformanceLedger {
        PerformanceLedger::from_repositories(&self.repos)
    }

    pub fn aggregator(&self) -> RosterScoreAggregator {
        RosterScoreAggregator::from_repositories(&self.repos)
    }

    pub fn standings(&self) -> StandingsService {
        StandingsService::from_repositories(&self.repos)
    }

    pub fn rankings(&self) -> RankingService {
        RankingService::from_repositories(&self.repos)
    }
}
