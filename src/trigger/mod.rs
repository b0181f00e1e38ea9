//! Interaction triggering
//!
//! An [`InteractionTrigger`] combines independent [`Rule`]s with OR
//! semantics: if any rule fires, the decision maker should be queried.
//! Every rule is checked on every call so each records its own pending
//! firing. The caller reports how the elicitation ended through the
//! lifecycle methods, which are forwarded to all rules.

pub mod flag;
pub mod iteration;
pub mod rule;
pub mod time;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::context::DecisionContext;
pub use rule::Rule;

/// Outcome of a trigger check
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerResult {
    /// True if preference elicitation should occur
    pub should_elicit: bool,
    /// Descriptions of the rules that fired
    pub fired_rules: Vec<String>,
    /// Iteration of the check
    pub iteration: usize,
    /// Human-readable summary
    pub log: String,
}

/// OR-composition of trigger rules
#[derive(Default)]
pub struct InteractionTrigger {
    rules: Vec<Box<dyn Rule>>,
}

impl InteractionTrigger {
    /// Create a trigger from rules
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Add a rule
    pub fn with_rule(mut self, rule: Box<dyn Rule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Number of rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Decide whether to elicit preferences in this iteration
    pub fn check(&mut self, context: &DecisionContext) -> TriggerResult {
        let fired_rules: Vec<String> = self
            .rules
            .iter_mut()
            .filter_map(|rule| {
                rule.should_trigger(context)
                    .then(|| rule.description())
            })
            .collect();
        let should_elicit = !fired_rules.is_empty();
        let iteration = context.iteration();

        let log = if should_elicit {
            format!(
                "Iteration {}: interaction triggered by {}",
                iteration,
                fired_rules.join(", ")
            )
        } else {
            format!("Iteration {iteration}: no rule fired")
        };

        if should_elicit {
            info!(iteration, rules = %fired_rules.join(", "), "interaction triggered");
        } else {
            debug!(iteration, "no interaction rule fired");
        }

        TriggerResult {
            should_elicit,
            fired_rules,
            iteration,
            log,
        }
    }

    /// Notify rules that elicitation started
    pub fn begin_elicitation(&mut self, context: &DecisionContext) {
        for rule in &mut self.rules {
            rule.begin_elicitation(context);
        }
    }

    /// Notify rules that elicitation completed
    pub fn end_elicitation(&mut self, context: &DecisionContext) {
        for rule in &mut self.rules {
            rule.end_elicitation(context);
        }
    }

    /// Notify rules that elicitation failed
    pub fn elicitation_failed(&mut self, context: &DecisionContext) {
        for rule in &mut self.rules {
            rule.elicitation_failed(context);
        }
    }

    /// Notify rules that elicitation was postponed
    pub fn postpone(&mut self, reason: &str, iteration: usize, timestamp: DateTime<Utc>) {
        info!(iteration, reason, "interaction postponed");
        for rule in &mut self.rules {
            rule.postpone(reason, iteration, timestamp);
        }
    }
}

impl fmt::Debug for InteractionTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: Vec<_> = self.rules.iter().map(|r| r.description()).collect();
        f.debug_struct("InteractionTrigger")
            .field("rules", &rules)
            .finish()
    }
}

/// Prelude for convenient imports
pub mod prelude {
    pub use super::flag::FlagRule;
    pub use super::iteration::IterationInterval;
    pub use super::rule::{Rule, TriggerBudget};
    pub use super::time::TimeInterval;
    pub use super::{InteractionTrigger, TriggerResult};
}
