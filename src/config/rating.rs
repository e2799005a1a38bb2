//! Rating update configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which update strategy the binary wires into a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RatingAlgorithm {
    Elo,
    WengLin,
}

impl fmt::Display for RatingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingAlgorithm::Elo => write!(f, "elo"),
            RatingAlgorithm::WengLin => write!(f, "weng-lin"),
        }
    }
}

impl FromStr for RatingAlgorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "elo" => Ok(RatingAlgorithm::Elo),
            "weng-lin" | "weng_lin" | "wenglin" => Ok(RatingAlgorithm::WengLin),
            other => Err(anyhow::anyhow!("Unknown rating algorithm: {}", other)),
        }
    }
}

/// Parameters for the configured rating update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    pub algorithm: RatingAlgorithm,
    /// Elo K-factor
    pub k_factor: f64,
    /// Weng-Lin beta
    pub beta: f64,
    /// Weng-Lin uncertainty assumed for every participant
    pub uncertainty: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            algorithm: RatingAlgorithm::Elo,
            k_factor: 32.0,
            beta: 200.0,
            uncertainty: 200.0,
        }
    }
}
