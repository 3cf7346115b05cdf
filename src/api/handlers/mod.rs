// HTTP handlers, grouped by resource

pub mod fixtures;
pub mod health;
pub mod leagues;
pub mod rankings;
pub mod rosters;
