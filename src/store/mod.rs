//! Outcome storage interface and implementations
//!
//! The engine never persists anything itself. These stores are meant to be
//! called from `after_result` and `after_cycle` hooks.

use crate::error::CycleError;
use crate::types::{RatingEntry, RatingMap, ResultOutcome};
use serde::Serialize;
use std::io::Write;
use std::sync::{Mutex, RwLock};

/// Trait for persisting cycle outcomes and final ratings
pub trait OutcomeStore {
    /// Store one processed result
    fn store_outcome(&self, outcome: &ResultOutcome) -> crate::error::Result<()>;

    /// Store the ratings as they stand at the end of a cycle
    fn store_ratings(&self, ratings: &RatingMap) -> crate::error::Result<()>;

    /// Number of outcomes stored so far
    fn outcome_count(&self) -> crate::error::Result<usize>;
}

fn sorted_entries(ratings: &RatingMap) -> Vec<RatingEntry> {
    let mut entries: Vec<RatingEntry> = ratings.values().cloned().collect();
    entries.sort_by_key(|entry| entry.id());
    entries
}

/// In-memory outcome store implementation
#[derive(Debug, Default)]
pub struct InMemoryOutcomeStore {
    outcomes: RwLock<Vec<ResultOutcome>>,
    ratings: RwLock<Vec<RatingEntry>>,
}

impl InMemoryOutcomeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all stored outcomes, in the order they were stored
    pub fn outcomes(&self) -> crate::error::Result<Vec<ResultOutcome>> {
        let outcomes = self.outcomes.read().map_err(|_| CycleError::StoreError {
            message: "Failed to acquire outcomes read lock".to_string(),
        })?;

        Ok(outcomes.clone())
    }

    /// Get the last stored ratings, sorted by participant id
    pub fn ratings(&self) -> crate::error::Result<Vec<RatingEntry>> {
        let ratings = self.ratings.read().map_err(|_| CycleError::StoreError {
            message: "Failed to acquire ratings read lock".to_string(),
        })?;

        Ok(ratings.clone())
    }
}

impl OutcomeStore for InMemoryOutcomeStore {
    fn store_outcome(&self, outcome: &ResultOutcome) -> crate::error::Result<()> {
        let mut outcomes = self.outcomes.write().map_err(|_| CycleError::StoreError {
            message: "Failed to acquire outcomes write lock".to_string(),
        })?;

        outcomes.push(outcome.clone());
        Ok(())
    }

    fn store_ratings(&self, ratings: &RatingMap) -> crate::error::Result<()> {
        let mut stored = self.ratings.write().map_err(|_| CycleError::StoreError {
            message: "Failed to acquire ratings write lock".to_string(),
        })?;

        *stored = sorted_entries(ratings);
        Ok(())
    }

    fn outcome_count(&self) -> crate::error::Result<usize> {
        let outcomes = self.outcomes.read().map_err(|_| CycleError::StoreError {
            message: "Failed to acquire outcomes read lock".to_string(),
        })?;

        Ok(outcomes.len())
    }
}

#[derive(Serialize)]
struct RatingsDocument<'a> {
    ratings: &'a [RatingEntry],
}

/// Writes one JSON document per line: each outcome as it is stored, then a
/// `{"ratings": [...]}` document with the final ratings
#[derive(Debug)]
pub struct JsonLinesOutcomeStore<W: Write> {
    writer: Mutex<W>,
    count: Mutex<usize>,
}

impl<W: Write> JsonLinesOutcomeStore<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            count: Mutex::new(0),
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> crate::error::Result<W> {
        self.writer.into_inner().map_err(|_| {
            CycleError::StoreError {
                message: "Writer lock poisoned".to_string(),
            }
            .into()
        })
    }

    fn write_line<T: Serialize>(&self, document: &T) -> crate::error::Result<()> {
        let mut writer = self.writer.lock().map_err(|_| CycleError::StoreError {
            message: "Failed to acquire writer lock".to_string(),
        })?;

        serde_json::to_writer(&mut *writer, document).map_err(|e| CycleError::StoreError {
            message: format!("Failed to serialize document: {}", e),
        })?;
        writer
            .write_all(b"\n")
            .and_then(|_| writer.flush())
            .map_err(|e| CycleError::StoreError {
                message: format!("Failed to write document: {}", e),
            })?;

        Ok(())
    }
}

impl<W: Write> OutcomeStore for JsonLinesOutcomeStore<W> {
    fn store_outcome(&self, outcome: &ResultOutcome) -> crate::error::Result<()> {
        self.write_line(outcome)?;

        let mut count = self.count.lock().map_err(|_| CycleError::StoreError {
            message: "Failed to acquire count lock".to_string(),
        })?;
        *count += 1;
        Ok(())
    }

    fn store_ratings(&self, ratings: &RatingMap) -> crate::error::Result<()> {
        let entries = sorted_entries(ratings);
        self.write_line(&RatingsDocument { ratings: &entries })
    }

    fn outcome_count(&self) -> crate::error::Result<usize> {
        let count = self.count.lock().map_err(|_| CycleError::StoreError {
            message: "Failed to acquire count lock".to_string(),
        })?;

        Ok(*count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Participant, SideOutcome};

    fn create_test_outcome(sequence: u32) -> ResultOutcome {
        let east = RatingEntry::new(Participant::new(1, "East", "O1e"), 1500.0);
        let west = RatingEntry::new(Participant::new(2, "West", "S1w"), 1480.0);
        ResultOutcome {
            cycle_id: 202401,
            day: 1,
            sequence,
            east: SideOutcome::new(&east, 1510.0),
            west: SideOutcome::new(&west, 1470.0),
        }
    }

    fn create_test_ratings() -> RatingMap {
        [
            RatingEntry::new(Participant::new(5, "E", "J1e"), 1400.0),
            RatingEntry::new(Participant::new(2, "B", "M3w"), 1600.0),
            RatingEntry::new(Participant::new(9, "Z", "Y1e"), 1700.0),
        ]
        .into_iter()
        .map(|entry| (entry.id(), entry))
        .collect()
    }

    #[test]
    fn test_in_memory_store() {
        let store = InMemoryOutcomeStore::new();
        assert_eq!(store.outcome_count().unwrap(), 0);

        store.store_outcome(&create_test_outcome(1)).unwrap();
        store.store_outcome(&create_test_outcome(2)).unwrap();
        store.store_ratings(&create_test_ratings()).unwrap();

        assert_eq!(store.outcome_count().unwrap(), 2);
        let outcomes = store.outcomes().unwrap();
        assert_eq!(outcomes[0].sequence, 1);
        assert_eq!(outcomes[1].sequence, 2);

        let ids: Vec<i64> = store.ratings().unwrap().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn test_json_lines_store() {
        let store = JsonLinesOutcomeStore::new(Vec::new());

        store.store_outcome(&create_test_outcome(1)).unwrap();
        store.store_outcome(&create_test_outcome(2)).unwrap();
        store.store_ratings(&create_test_ratings()).unwrap();
        assert_eq!(store.outcome_count().unwrap(), 2);

        let written = String::from_utf8(store.into_inner().unwrap()).unwrap();
        let lines: Vec<serde_json::Value> = written
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["sequence"], 1);
        assert_eq!(lines[1]["east"]["change"], 10.0);
        assert_eq!(lines[2]["ratings"][0]["participant"]["id"], 2);
        assert_eq!(lines[2]["ratings"][2]["rating"], 1700.0);
    }

    #[test]
    fn test_json_lines_write_failure() {
        struct FailingWriter;

        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let store = JsonLinesOutcomeStore::new(FailingWriter);
        let err = store.store_outcome(&create_test_outcome(1)).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CycleError>(),
            Some(CycleError::StoreError { .. })
        ));
        assert_eq!(store.outcome_count().unwrap(), 0);
    }
}
