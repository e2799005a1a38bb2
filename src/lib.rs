//! Rating Cycle - threads head-to-head results through a rating update
//!
//! This crate provides a single-pass rating cycle engine with pluggable
//! update functions, lifecycle hooks for observation and persistence, and
//! Elo and Weng-Lin update strategies.

pub mod config;
pub mod cycle;
pub mod error;
pub mod input;
pub mod rating;
pub mod store;
pub mod types;

// Re-export commonly used types and traits
pub use error::{CycleError, Result};
pub use types::*;

// Re-export key components
pub use cycle::{CycleState, RatingCycle};
pub use rating::RatingCalculator;
pub use store::{InMemoryOutcomeStore, JsonLinesOutcomeStore, OutcomeStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
