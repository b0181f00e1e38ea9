//! Iteration-interval rule

use chrono::{DateTime, Utc};
use tracing::debug;

use super::rule::{Rule, TriggerBudget};
use crate::context::DecisionContext;
use crate::error::{ElicitResult, ElicitationError};

/// Fires on `start, start + interval, start + 2·interval, ...`
///
/// At most `max_triggers` completed elicitations are counted.
#[derive(Clone, Debug)]
pub struct IterationInterval {
    start_iteration: usize,
    interval: usize,
    budget: TriggerBudget,
    pending_iteration: Option<usize>,
    last_completed_iteration: Option<usize>,
}

impl IterationInterval {
    /// Create a rule; `interval` must be positive
    pub fn new(
        start_iteration: usize,
        interval: usize,
        max_triggers: Option<usize>,
    ) -> ElicitResult<Self> {
        if interval == 0 {
            return Err(ElicitationError::configuration(
                "the iteration interval must be positive",
            ));
        }
        Ok(Self {
            start_iteration,
            interval,
            budget: TriggerBudget::new(max_triggers),
            pending_iteration: None,
            last_completed_iteration: None,
        })
    }

    /// Budget bookkeeping
    pub fn budget(&self) -> &TriggerBudget {
        &self.budget
    }

    fn on_schedule(&self, iteration: usize) -> bool {
        iteration >= self.start_iteration
            && (iteration - self.start_iteration) % self.interval == 0
    }
}

impl Rule for IterationInterval {
    fn should_trigger(&mut self, context: &DecisionContext) -> bool {
        let iteration = context.iteration();
        if self.budget.is_exhausted() || self.last_completed_iteration == Some(iteration) {
            return false;
        }
        let due = iteration >= self.start_iteration
            && (self.budget.is_overdue() || self.on_schedule(iteration));
        if due {
            self.budget.mark_fired();
            self.pending_iteration = Some(iteration);
        }
        due
    }

    fn end_elicitation(&mut self, _context: &DecisionContext) {
        if self.budget.commit() {
            self.last_completed_iteration = self.pending_iteration.take();
            debug!(
                rule = %self.description(),
                completed = self.budget.completed(),
                "trigger committed"
            );
        }
    }

    fn elicitation_failed(&mut self, _context: &DecisionContext) {
        self.budget.release();
        self.pending_iteration = None;
    }

    fn postpone(&mut self, reason: &str, iteration: usize, _timestamp: DateTime<Utc>) {
        if self.budget.release() {
            debug!(rule = %self.description(), reason, iteration, "trigger postponed");
        }
        self.pending_iteration = None;
    }

    fn description(&self) -> String {
        match self.budget.max_triggers() {
            Some(max) => format!(
                "IterationInterval(start = {}, interval = {}, limit = {})",
                self.start_iteration, self.interval, max
            ),
            None => format!(
                "IterationInterval(start = {}, interval = {})",
                self.start_iteration, self.interval
            ),
        }
    }
}
