//! Rating calculator trait
//!
//! This module defines the single update function a rating cycle needs. Any
//! closure of shape `Fn(f64, f64, bool) -> f64` is a calculator, so callers
//! can plug in a formula without declaring a type for it.

/// Trait for computing a participant's new rating after one result
#[cfg_attr(test, mockall::automock)]
pub trait RatingCalculator {
    /// Calculate the subject's new rating
    ///
    /// # Arguments
    /// * `subject` - Rating of the participant being updated
    /// * `opponent` - Rating of their opponent, as it stood before the result
    /// * `subject_won` - Whether the subject won
    fn compute_rating(&self, subject: f64, opponent: f64, subject_won: bool) -> f64;

    /// Short name used in logs
    fn name(&self) -> &'static str {
        "custom"
    }

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value {
        serde_json::Value::Null
    }
}

impl<F> RatingCalculator for F
where
    F: Fn(f64, f64, bool) -> f64,
{
    fn compute_rating(&self, subject: f64, opponent: f64, subject_won: bool) -> f64 {
        self(subject, opponent, subject_won)
    }
}
