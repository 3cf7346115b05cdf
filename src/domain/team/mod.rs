// Team domain module
// Real-world clubs and the players they field

#![allow(clippy::module_inception)]

pub mod player;
pub mod team;

// Re-export main types for convenience
pub use player::Player;
pub use team::Team;
