//! Scoring aggregation and ranking engine
//!
//! Data flows one way: ledger entries and match results are folded into
//! per-entity aggregates, which are then sorted into rankings. The pure
//! functions (`sum_round_points`, `build_table`, `build_row`,
//! `rank_managers`) work over already-fetched snapshots; the services wrap
//! them with repository lookups and cache write-backs.

pub mod ledger;
pub mod ranking;
pub mod roster_score;
pub mod standings;

pub use ledger::{PerformanceLedger, PlayerSeasonTotals};
pub use ranking::{rank_managers, RankingEntry, RankingService, RoundScore};
pub use roster_score::{sum_round_points, RosterScoreAggregator};
pub use standings::{build_row, build_table, StandingsRow, StandingsService};
