//! Weng-Lin (OpenSkill) rating update
//!
//! This module adapts the pairwise Weng-Lin algorithm from the skillratings
//! crate to the single-number update a cycle threads forward. Every
//! participant is treated as carrying the same configured uncertainty.

use crate::rating::calculator::RatingCalculator;
use serde::{Deserialize, Serialize};
use skillratings::weng_lin::{weng_lin, WengLinConfig, WengLinRating};
use skillratings::Outcomes;

/// Extended configuration for the Weng-Lin rating system
/// This wraps the skillratings WengLinConfig with the assumed uncertainty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendedWengLinConfig {
    /// Core Weng-Lin parameters
    pub weng_lin_config: WengLinConfig,
    /// Uncertainty used for both sides of every result
    pub uncertainty: f64,
}

impl Default for ExtendedWengLinConfig {
    fn default() -> Self {
        Self {
            weng_lin_config: WengLinConfig {
                beta: 200.0,
                uncertainty_tolerance: 0.0001,
            },
            uncertainty: 200.0,
        }
    }
}

impl ExtendedWengLinConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(self.weng_lin_config.beta > 0.0) {
            return Err(crate::error::CycleError::ConfigurationError {
                message: "Beta must be positive".to_string(),
            }
            .into());
        }

        if self.weng_lin_config.uncertainty_tolerance < 0.0 {
            return Err(crate::error::CycleError::ConfigurationError {
                message: "Uncertainty tolerance must be non-negative".to_string(),
            }
            .into());
        }

        if !(self.uncertainty > 0.0) {
            return Err(crate::error::CycleError::ConfigurationError {
                message: "Uncertainty must be positive".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Weng-Lin rating calculator implementation
#[derive(Debug, Clone)]
pub struct WengLinCalculator {
    config: ExtendedWengLinConfig,
}

impl WengLinCalculator {
    /// Create a new Weng-Lin rating calculator
    pub fn new(config: ExtendedWengLinConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    fn to_weng_lin(&self, rating: f64) -> WengLinRating {
        WengLinRating {
            rating,
            uncertainty: self.config.uncertainty,
        }
    }
}

impl RatingCalculator for WengLinCalculator {
    fn compute_rating(&self, subject: f64, opponent: f64, subject_won: bool) -> f64 {
        let outcome = if subject_won {
            Outcomes::WIN
        } else {
            Outcomes::LOSS
        };

        let (new_subject, _) = weng_lin(
            &self.to_weng_lin(subject),
            &self.to_weng_lin(opponent),
            &outcome,
            &self.config.weng_lin_config,
        );

        new_subject.rating
    }

    fn name(&self) -> &'static str {
        "weng-lin"
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }
}
