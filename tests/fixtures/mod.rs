//! Test fixtures for integration testing

use rating_cycle::types::{Participant, RatingEntry, RatingMap, ResultRecord};
use std::cell::RefCell;

/// Participants with varied ratings
pub fn create_test_ratings() -> RatingMap {
    let participants = vec![
        (1, "Terunofuji", "Y1e", 1720.0),
        (2, "Kirishima", "O1e", 1640.0),
        (3, "Hoshoryu", "O1w", 1655.0),
        (4, "Kotonowaka", "S1e", 1580.0),
        (5, "Abi", "K1e", 1510.0),
        (6, "Ura", "M5w", 1455.0),
    ];

    participants
        .into_iter()
        .map(|(id, name, rank, rating)| {
            (
                id,
                RatingEntry::new(Participant::new(id, name, rank), rating),
            )
        })
        .collect()
}

/// Decisive result where the east side wins when `east_win` is set
pub fn create_result(sequence: u32, east_id: i64, west_id: i64, east_win: bool) -> ResultRecord {
    ResultRecord {
        cycle_id: 202403,
        day: 7,
        sequence,
        east_id,
        west_id,
        east_win,
        west_win: !east_win,
    }
}

/// A day's worth of results over the participants from `create_test_ratings`
pub fn create_test_results() -> Vec<ResultRecord> {
    vec![
        create_result(1, 6, 5, true),
        create_result(2, 4, 3, false),
        create_result(3, 2, 1, true),
        create_result(4, 5, 4, true),
        create_result(5, 3, 2, false),
        create_result(6, 1, 6, true),
    ]
}

/// Calculator that records every call it receives
#[derive(Debug, Default)]
pub struct RecordingCalculator {
    pub calls: RefCell<Vec<(f64, f64, bool)>>,
}

impl RecordingCalculator {
    pub fn compute(&self, subject: f64, opponent: f64, won: bool) -> f64 {
        self.calls.borrow_mut().push((subject, opponent, won));
        if won {
            subject + 8.0
        } else {
            subject - 8.0
        }
    }
}
