// Manager domain module
// Fantasy participants and their cumulative-score cache

#![allow(clippy::module_inception)]

pub mod manager;

pub use manager::Manager;
