//! Fixed-K Elo rating update

use crate::rating::calculator::RatingCalculator;
use serde::{Deserialize, Serialize};

/// Configuration for the Elo update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EloConfig {
    pub k_factor: f64,
}

impl Default for EloConfig {
    fn default() -> Self {
        Self { k_factor: 32.0 }
    }
}

impl EloConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(self.k_factor > 0.0) || !self.k_factor.is_finite() {
            return Err(crate::error::CycleError::ConfigurationError {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Probability that `subject` beats `opponent` under the logistic Elo model
pub fn expected_score(subject: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - subject) / 400.0))
}

/// Elo rating calculator with a constant K-factor
#[derive(Debug, Clone)]
pub struct EloCalculator {
    config: EloConfig,
}

impl EloCalculator {
    /// Create a new Elo calculator
    pub fn new(config: EloConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn k_factor(&self) -> f64 {
        self.config.k_factor
    }
}

impl RatingCalculator for EloCalculator {
    fn compute_rating(&self, subject: f64, opponent: f64, subject_won: bool) -> f64 {
        let score = if subject_won { 1.0 } else { 0.0 };
        subject + self.config.k_factor * (score - expected_score(subject, opponent))
    }

    fn name(&self) -> &'static str {
        "elo"
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }
}
