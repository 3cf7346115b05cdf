// Domain layer module exports
// Entities, repository ports and the scoring engine
// Domain is independent of infrastructure concerns

pub mod errors;
pub mod fixture;
pub mod league;
pub mod manager;
pub mod repositories;
pub mod roster;
pub mod scoring;
pub mod team;

pub use errors::{DomainError, DomainResult};
