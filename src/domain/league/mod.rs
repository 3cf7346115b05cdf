// League domain module
// A league scopes teams, managers and rounds

#![allow(clippy::module_inception)]

pub mod league;
pub mod round;

pub use league::League;
pub use round::Round;
