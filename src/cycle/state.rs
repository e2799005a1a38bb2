//! Data a rating cycle threads through its hooks

use crate::types::{ParticipantId, RatingEntry, RatingMap, ResultOutcome, ResultRecord};

/// Ratings, pending results and the outcome log for one cycle
#[derive(Debug, Clone, PartialEq)]
pub struct CycleState {
    pub cycle_id: u32,
    pub day: u32,
    pub ratings: RatingMap,
    pub results: Vec<ResultRecord>,
    pub(crate) outcomes: Vec<ResultOutcome>,
}

impl CycleState {
    pub fn new(cycle_id: u32, day: u32, ratings: RatingMap, results: Vec<ResultRecord>) -> Self {
        Self {
            cycle_id,
            day,
            ratings,
            results,
            outcomes: Vec::new(),
        }
    }

    /// Outcomes recorded so far, in result order
    pub fn outcomes(&self) -> &[ResultOutcome] {
        &self.outcomes
    }

    pub fn rating_of(&self, participant_id: ParticipantId) -> Option<f64> {
        self.ratings.get(&participant_id).map(|entry| entry.rating)
    }

    /// Ratings sorted by participant id
    pub fn sorted_ratings(&self) -> Vec<&RatingEntry> {
        let mut entries: Vec<&RatingEntry> = self.ratings.values().collect();
        entries.sort_by_key(|entry| entry.id());
        entries
    }
}
