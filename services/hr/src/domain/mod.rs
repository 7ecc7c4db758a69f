pub mod repository;
pub mod schedule;
pub mod stats;
pub mod types;
