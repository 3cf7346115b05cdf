// Roster domain module
// A manager's player selection for one round, plus its domain events

#![allow(clippy::module_inception)]

pub mod events;
pub mod roster;

pub use events::RosterEvent;
pub use roster::Roster;
