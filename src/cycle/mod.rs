//! Rating cycle engine
//!
//! A [`RatingCycle`] walks an ordered list of head-to-head results once,
//! asks its [`RatingCalculator`] for both sides' new ratings, and threads
//! the new values forward into the rating map. Four optional hooks let
//! callers observe or prepare the cycle without touching the engine:
//!
//! - `before_cycle` runs once before any result, with mutable access to the state
//! - `before_result` runs before each result with an owned copy of the record
//! - `after_result` runs after each outcome is built but before it is committed,
//!   so the state it sees still holds the pre-result ratings
//! - `after_cycle` runs once after every result has been committed
//!
//! Hooks run synchronously and in program order. A cycle is single-use.

pub mod state;

pub use state::CycleState;

use crate::error::{CycleError, Result};
use crate::rating::RatingCalculator;
use crate::types::{RatingMap, ResultOutcome, ResultRecord, SideOutcome};
use std::fmt;
use tracing::{debug, info, warn};

type BeforeCycleHook<'a> = Box<dyn FnMut(&mut CycleState) + 'a>;
type BeforeResultHook<'a> = Box<dyn FnMut(ResultRecord, usize) + 'a>;
type AfterResultHook<'a> = Box<dyn FnMut(&ResultOutcome, &CycleState) + 'a>;
type AfterCycleHook<'a> = Box<dyn FnMut(&CycleState) + 'a>;

/// Orchestrates one pass of rating updates over a result list
pub struct RatingCycle<'a> {
    state: CycleState,
    calculator: Option<Box<dyn RatingCalculator + 'a>>,
    before_cycle: Option<BeforeCycleHook<'a>>,
    before_result: Option<BeforeResultHook<'a>>,
    after_result: Option<AfterResultHook<'a>>,
    after_cycle: Option<AfterCycleHook<'a>>,
    has_run: bool,
}

impl<'a> RatingCycle<'a> {
    /// Create a cycle with no hooks and no calculator set
    pub fn new(cycle_id: u32, day: u32, ratings: RatingMap, results: Vec<ResultRecord>) -> Self {
        Self {
            state: CycleState::new(cycle_id, day, ratings, results),
            calculator: None,
            before_cycle: None,
            before_result: None,
            after_result: None,
            after_cycle: None,
            has_run: false,
        }
    }

    /// Set the hook executed once before any result is processed
    pub fn before_cycle<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&mut CycleState) + 'a,
    {
        self.before_cycle = Some(Box::new(hook));
        self
    }

    /// Set the hook executed right before each result
    ///
    /// The hook receives its own copy of the record and the record's
    /// zero-based position; changes to that copy are not seen by the engine.
    pub fn before_result<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(ResultRecord, usize) + 'a,
    {
        self.before_result = Some(Box::new(hook));
        self
    }

    /// Set the hook executed after each outcome is built
    ///
    /// The state passed alongside the outcome has not been committed yet.
    pub fn after_result<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&ResultOutcome, &CycleState) + 'a,
    {
        self.after_result = Some(Box::new(hook));
        self
    }

    /// Set the hook executed after all results are committed. It is a good
    /// place to persist final ratings.
    pub fn after_cycle<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&CycleState) + 'a,
    {
        self.after_cycle = Some(Box::new(hook));
        self
    }

    /// Set the function that calculates a participant's new rating
    pub fn calculation<C>(&mut self, calculator: C) -> &mut Self
    where
        C: RatingCalculator + 'a,
    {
        self.calculator = Some(Box::new(calculator));
        self
    }

    /// Set an already boxed calculator, e.g. one built from configuration
    pub fn boxed_calculation(&mut self, calculator: Box<dyn RatingCalculator + 'a>) -> &mut Self {
        self.calculator = Some(calculator);
        self
    }

    pub fn state(&self) -> &CycleState {
        &self.state
    }

    pub fn ratings(&self) -> &RatingMap {
        &self.state.ratings
    }

    pub fn outcomes(&self) -> &[ResultOutcome] {
        self.state.outcomes()
    }

    /// Whether `run` has started processing results
    pub fn has_run(&self) -> bool {
        self.has_run
    }

    /// Hand the state back, dropping the hooks and the calculator
    pub fn into_state(self) -> CycleState {
        self.state
    }

    /// Check the calculator and inputs, then process every result in order
    ///
    /// Errors abort the run immediately. Ratings committed and outcomes
    /// recorded for earlier results are kept.
    pub fn run(&mut self) -> Result<()> {
        if self.has_run {
            return Err(CycleError::AlreadyRun.into());
        }
        self.validate()?;
        self.has_run = true;

        let calculator = self
            .calculator
            .as_deref()
            .ok_or(CycleError::MissingCalculator)?;

        if let Some(hook) = self.before_cycle.as_mut() {
            hook(&mut self.state);
        }

        let total = self.state.results.len();
        for position in 0..total {
            let record = self.state.results[position].clone();

            if let Some(hook) = self.before_result.as_mut() {
                hook(record.clone(), position);
            }

            let east = self.state.ratings.get(&record.east_id).ok_or(
                CycleError::MissingParticipant {
                    participant_id: record.east_id,
                    sequence: record.sequence,
                },
            )?;
            let west = self.state.ratings.get(&record.west_id).ok_or(
                CycleError::MissingParticipant {
                    participant_id: record.west_id,
                    sequence: record.sequence,
                },
            )?;

            if !record.is_decisive() {
                warn!(
                    sequence = record.sequence,
                    east_win = record.east_win,
                    west_win = record.west_win,
                    "Result is not decisive, rating both sides as reported"
                );
            }

            // Both sides are rated against the opponent's pre-result rating
            let east_post = calculator.compute_rating(east.rating, west.rating, record.east_win);
            let west_post = calculator.compute_rating(west.rating, east.rating, record.west_win);

            let outcome = ResultOutcome {
                cycle_id: record.cycle_id,
                day: record.day,
                sequence: record.sequence,
                east: SideOutcome::new(east, east_post),
                west: SideOutcome::new(west, west_post),
            };

            debug!(
                position,
                sequence = outcome.sequence,
                east = outcome.east.participant_id,
                east_change = outcome.east.change,
                west = outcome.west.participant_id,
                west_change = outcome.west.change,
                "Processed result"
            );

            if let Some(hook) = self.after_result.as_mut() {
                hook(&outcome, &self.state);
            }

            if let Some(entry) = self.state.ratings.get_mut(&record.east_id) {
                entry.rating = east_post;
            }
            if let Some(entry) = self.state.ratings.get_mut(&record.west_id) {
                entry.rating = west_post;
            }

            self.state.outcomes.push(outcome);
        }

        if let Some(hook) = self.after_cycle.as_mut() {
            hook(&self.state);
        }

        info!(
            cycle_id = self.state.cycle_id,
            day = self.state.day,
            results = self.state.outcomes.len(),
            "Rating cycle complete"
        );

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.calculator.is_none() {
            return Err(CycleError::MissingCalculator.into());
        }
        if self.state.ratings.is_empty() {
            return Err(CycleError::NoParticipants.into());
        }
        if self.state.results.is_empty() {
            return Err(CycleError::NoResults.into());
        }
        Ok(())
    }
}

impl fmt::Debug for RatingCycle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatingCycle")
            .field("state", &self.state)
            .field("calculator", &self.calculator.as_ref().map(|c| c.name()))
            .field("before_cycle", &self.before_cycle.is_some())
            .field("before_result", &self.before_result.is_some())
            .field("after_result", &self.after_result.is_some())
            .field("after_cycle", &self.after_cycle.is_some())
            .field("has_run", &self.has_run)
            .finish()
    }
}
