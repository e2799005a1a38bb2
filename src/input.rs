//! Loading a cycle's participants and results from JSON

use crate::cycle::RatingCycle;
use crate::error::CycleError;
use crate::types::{RatingEntry, RatingMap, ResultRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized form of one cycle's inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleInput {
    pub cycle_id: u32,
    pub day: u32,
    pub participants: Vec<RatingEntry>,
    pub results: Vec<ResultRecord>,
}

impl CycleInput {
    pub fn from_path(path: &Path) -> crate::error::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CycleError::InvalidInput {
            reason: format!("Failed to read {}: {}", path.display(), e),
        })?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> crate::error::Result<Self> {
        let input: CycleInput =
            serde_json::from_str(contents).map_err(|e| CycleError::InvalidInput {
                reason: format!("Malformed cycle input: {}", e),
            })?;
        Ok(input)
    }

    /// Build the rating map, rejecting duplicate participant ids
    pub fn rating_map(&self) -> crate::error::Result<RatingMap> {
        let mut ratings = RatingMap::with_capacity(self.participants.len());
        for entry in &self.participants {
            if ratings.insert(entry.id(), entry.clone()).is_some() {
                return Err(CycleError::InvalidInput {
                    reason: format!("Participant {} is listed more than once", entry.id()),
                }
                .into());
            }
        }
        Ok(ratings)
    }

    /// Build a cycle with no hooks or calculator set
    pub fn into_cycle<'a>(self) -> crate::error::Result<RatingCycle<'a>> {
        let ratings = self.rating_map()?;
        Ok(RatingCycle::new(self.cycle_id, self.day, ratings, self.results))
    }
}
