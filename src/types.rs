//! Common types used throughout the rating cycle

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for participants
pub type ParticipantId = i64;

/// Ratings keyed by participant id
pub type RatingMap = HashMap<ParticipantId, RatingEntry>;

/// Profile data for a participant, owned by the caller's model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    #[serde(default)]
    pub rank: String,
}

impl Participant {
    pub fn new(id: ParticipantId, name: impl Into<String>, rank: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            rank: rank.into(),
        }
    }
}

/// A participant together with their current rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub participant: Participant,
    pub rating: f64,
}

impl RatingEntry {
    pub fn new(participant: Participant, rating: f64) -> Self {
        Self {
            participant,
            rating,
        }
    }

    pub fn id(&self) -> ParticipantId {
        self.participant.id
    }
}

/// One head-to-head result between an east and a west participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub cycle_id: u32,
    pub day: u32,
    pub sequence: u32,
    pub east_id: ParticipantId,
    pub west_id: ParticipantId,
    pub east_win: bool,
    pub west_win: bool,
}

impl ResultRecord {
    /// Exactly one side won
    pub fn is_decisive(&self) -> bool {
        self.east_win != self.west_win
    }
}

/// One side's rating snapshot for a processed result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideOutcome {
    pub participant_id: ParticipantId,
    pub name: String,
    pub rank: String,
    pub score_pre: f64,
    pub score_post: f64,
    pub change: f64,
}

impl SideOutcome {
    /// Snapshot an entry's profile alongside its rating movement
    pub fn new(entry: &RatingEntry, score_post: f64) -> Self {
        Self {
            participant_id: entry.participant.id,
            name: entry.participant.name.clone(),
            rank: entry.participant.rank.clone(),
            score_pre: entry.rating,
            score_post,
            change: score_post - entry.rating,
        }
    }
}

/// Recorded before/after ratings for both sides of one result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultOutcome {
    pub cycle_id: u32,
    pub day: u32,
    pub sequence: u32,
    pub east: SideOutcome,
    pub west: SideOutcome,
}
