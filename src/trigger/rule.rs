//! Trigger rule trait and trigger budget bookkeeping
//!
//! A firing is held as pending until the caller reports how the elicitation
//! ended. Only a completed elicitation consumes budget. A postponed or failed
//! elicitation releases the pending firing and marks the rule overdue, so the
//! rule fires again on the next check even off its regular schedule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::context::DecisionContext;

/// A finite-state rule deciding whether to elicit preferences
pub trait Rule: Send + Sync {
    /// Check the rule for the current iteration, recording a pending firing
    fn should_trigger(&mut self, context: &DecisionContext) -> bool;

    /// The elicitation started
    fn begin_elicitation(&mut self, _context: &DecisionContext) {}

    /// The elicitation completed
    fn end_elicitation(&mut self, _context: &DecisionContext) {}

    /// The elicitation failed
    fn elicitation_failed(&mut self, _context: &DecisionContext) {}

    /// The elicitation was postponed by the decision maker
    fn postpone(&mut self, _reason: &str, _iteration: usize, _timestamp: DateTime<Utc>) {}

    /// Human-readable description with parameters
    fn description(&self) -> String;
}

/// Trigger budget (completed firings against an optional limit)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerBudget {
    max_triggers: Option<usize>,
    completed: usize,
    pending: bool,
    overdue: bool,
}

impl TriggerBudget {
    /// Budget with an optional limit (`None` is unbounded)
    pub fn new(max_triggers: Option<usize>) -> Self {
        Self {
            max_triggers,
            ..Self::default()
        }
    }

    /// Number of completed firings
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Limit on completed firings
    pub fn max_triggers(&self) -> Option<usize> {
        self.max_triggers
    }

    /// True once the limit has been reached
    pub fn is_exhausted(&self) -> bool {
        self.max_triggers.is_some_and(|max| self.completed >= max)
    }

    /// True while a firing awaits its outcome
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// True after a postponed or failed elicitation
    pub fn is_overdue(&self) -> bool {
        self.overdue
    }

    /// Record a provisional firing
    pub fn mark_fired(&mut self) {
        self.pending = true;
    }

    /// Commit the pending firing; returns true if one was committed
    pub fn commit(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.overdue = false;
        self.completed += 1;
        true
    }

    /// Release the pending firing without consuming budget
    pub fn release(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.overdue = true;
        true
    }
}
