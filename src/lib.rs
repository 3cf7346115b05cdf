//! Fantasy League API Library
//!
//! Scoring aggregation and ranking engine for a season-long fantasy
//! competition, with its repository ports, storage adapters and HTTP layer.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
