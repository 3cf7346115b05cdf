// Fixture domain module
// Finalized matches and the per-player performance ledger entries they produce

#![allow(clippy::module_inception)]

pub mod fixture;
pub mod performance;
pub mod value_objects;

pub use fixture::Match;
pub use performance::{PerformanceRecord, PerformanceStats};
pub use value_objects::{MatchOutcome, TeamResult};
