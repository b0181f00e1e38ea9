//! Time-interval rule
//!
//! Wall-clock analogue of [`IterationInterval`](super::iteration::IterationInterval):
//! elapsed time since `start` is split into slots of length `interval`, and
//! the rule fires once per slot, starting with the slot that contains `start`.
//! The clock is the context timestamp, so runs replay deterministically.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::rule::{Rule, TriggerBudget};
use crate::context::DecisionContext;
use crate::error::{ElicitResult, ElicitationError};

/// Fires once per `interval` of elapsed time since `start`
#[derive(Clone, Debug)]
pub struct TimeInterval {
    start: DateTime<Utc>,
    interval: Duration,
    budget: TriggerBudget,
    pending_slot: Option<i64>,
    last_completed_slot: Option<i64>,
}

impl TimeInterval {
    /// Create a rule; `interval` must be positive
    pub fn new(
        start: DateTime<Utc>,
        interval: Duration,
        max_triggers: Option<usize>,
    ) -> ElicitResult<Self> {
        if interval <= Duration::zero() {
            return Err(ElicitationError::configuration(
                "the time interval must be positive",
            ));
        }
        Ok(Self {
            start,
            interval,
            budget: TriggerBudget::new(max_triggers),
            pending_slot: None,
            last_completed_slot: None,
        })
    }

    /// Budget bookkeeping
    pub fn budget(&self) -> &TriggerBudget {
        &self.budget
    }

    fn slot(&self, timestamp: DateTime<Utc>) -> Option<i64> {
        let elapsed = timestamp.signed_duration_since(self.start);
        if elapsed < Duration::zero() {
            return None;
        }
        let interval_ms = self.interval.num_milliseconds().max(1);
        Some(elapsed.num_milliseconds() / interval_ms)
    }
}

impl Rule for TimeInterval {
    fn should_trigger(&mut self, context: &DecisionContext) -> bool {
        if self.budget.is_exhausted() {
            return false;
        }
        let Some(slot) = self.slot(context.timestamp()) else {
            return false;
        };
        let new_slot = self.last_completed_slot.map_or(true, |last| slot > last);
        let due = new_slot || self.budget.is_overdue();
        if due {
            self.budget.mark_fired();
            self.pending_slot = Some(slot);
        }
        due
    }

    fn end_elicitation(&mut self, _context: &DecisionContext) {
        if self.budget.commit() {
            self.last_completed_slot = self.pending_slot.take();
            debug!(
                rule = %self.description(),
                completed = self.budget.completed(),
                "trigger committed"
            );
        }
    }

    fn elicitation_failed(&mut self, _context: &DecisionContext) {
        self.budget.release();
        self.pending_slot = None;
    }

    fn postpone(&mut self, reason: &str, iteration: usize, timestamp: DateTime<Utc>) {
        if self.budget.release() {
            debug!(rule = %self.description(), reason, iteration, %timestamp, "trigger postponed");
        }
        self.pending_slot = None;
    }

    fn description(&self) -> String {
        let limit = self
            .budget
            .max_triggers()
            .map(|max| format!(", limit = {max}"))
            .unwrap_or_default();
        format!(
            "TimeInterval(start = {}, interval = {} ms{})",
            self.start.to_rfc3339(),
            self.interval.num_milliseconds(),
            limit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alternatives::superset::AlternativesSuperset;
    use crate::criteria::criterion::Criteria;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn ctx(seconds: i64) -> DecisionContext {
        DecisionContext::builder()
            .criteria(Criteria::costs(1).unwrap())
            .alternatives(AlternativesSuperset::default())
            .timestamp(start() + Duration::seconds(seconds))
            .build()
            .unwrap()
    }

    fn run(rule: &mut TimeInterval, seconds: i64) -> bool {
        let c = ctx(seconds);
        let fired = rule.should_trigger(&c);
        if fired {
            rule.end_elicitation(&c);
        }
        fired
    }

    #[test]
    fn test_fires_once_per_slot() {
        let mut rule = TimeInterval::new(start(), Duration::seconds(10), None).unwrap();
        let fired: Vec<i64> = [-5, 0, 3, 9, 10, 15, 25, 41]
            .into_iter()
            .filter(|&s| run(&mut rule, s))
            .collect();
        assert_eq!(fired, vec![0, 10, 25, 41]);
    }

    #[test]
    fn test_limit() {
        let mut rule = TimeInterval::new(start(), Duration::seconds(10), Some(2)).unwrap();
        let fired: Vec<i64> = [0, 10, 20, 30]
            .into_iter()
            .filter(|&s| run(&mut rule, s))
            .collect();
        assert_eq!(fired, vec![0, 10]);
    }

    #[test]
    fn test_postponed_fires_again() {
        let mut rule = TimeInterval::new(start(), Duration::seconds(10), Some(1)).unwrap();
        let c = ctx(0);
        assert!(rule.should_trigger(&c));
        rule.postpone("busy", 0, c.timestamp());
        assert_eq!(rule.budget().completed(), 0);
        assert!(run(&mut rule, 2));
        assert_eq!(rule.budget().completed(), 1);
        assert!(!run(&mut rule, 12));
    }

    #[test]
    fn test_non_positive_interval_rejected() {
        assert!(TimeInterval::new(start(), Duration::zero(), None).is_err());
    }
}
