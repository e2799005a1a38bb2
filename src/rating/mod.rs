//! Rating update strategies
//!
//! This module provides the calculator interface a cycle calls for every
//! result, a fixed-K Elo implementation, and a pairwise adaptation of the
//! Weng-Lin (OpenSkill) algorithm from the skillratings crate.

pub mod calculator;
pub mod elo;
pub mod weng_lin;

// Re-export commonly used types
pub use calculator::RatingCalculator;
pub use elo::{EloCalculator, EloConfig};
pub use weng_lin::{ExtendedWengLinConfig, WengLinCalculator};

use crate::config::{RatingAlgorithm, RatingSettings};
use skillratings::weng_lin::WengLinConfig;

/// Build the calculator selected by the rating settings
pub fn calculator_from_settings(
    settings: &RatingSettings,
) -> crate::error::Result<Box<dyn RatingCalculator>> {
    let calculator: Box<dyn RatingCalculator> = match settings.algorithm {
        RatingAlgorithm::Elo => Box::new(EloCalculator::new(EloConfig {
            k_factor: settings.k_factor,
        })?),
        RatingAlgorithm::WengLin => {
            let defaults = ExtendedWengLinConfig::default();
            Box::new(WengLinCalculator::new(ExtendedWengLinConfig {
                weng_lin_config: WengLinConfig {
                    beta: settings.beta,
                    ..defaults.weng_lin_config
                },
                uncertainty: settings.uncertainty,
            })?)
        }
    };

    Ok(calculator)
}
