//! Error types for the rating cycle engine
//!
//! Errors are declared with thiserror and carried through the crate as
//! anyhow errors, so callers can `downcast_ref::<CycleError>()` to recover
//! the specific kind.

use crate::types::ParticipantId;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating cycle scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CycleError {
    #[error("No rating calculation set")]
    MissingCalculator,

    #[error("No participant ratings provided")]
    NoParticipants,

    #[error("No result list provided")]
    NoResults,

    #[error("Participant with id {participant_id} was not provided but appears in result {sequence}")]
    MissingParticipant {
        participant_id: ParticipantId,
        sequence: u32,
    },

    #[error("Rating cycle has already been run")]
    AlreadyRun,

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Invalid cycle input: {reason}")]
    InvalidInput { reason: String },

    #[error("Outcome store failed: {message}")]
    StoreError { message: String },
}

impl CycleError {
    /// Whether this error was raised by the readiness check before any
    /// result was processed
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CycleError::MissingCalculator
                | CycleError::NoParticipants
                | CycleError::NoResults
                | CycleError::ConfigurationError { .. }
        )
    }
}
