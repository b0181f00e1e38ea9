//! Externally controlled flag rule

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::rule::Rule;
use crate::context::DecisionContext;

/// Fires exactly when the shared flag is set at query time
///
/// The rule keeps no counters; whoever owns the handle decides when to raise
/// and clear the flag.
#[derive(Clone, Debug, Default)]
pub struct FlagRule {
    flag: Arc<AtomicBool>,
}

impl FlagRule {
    /// Create a rule with a cleared flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rule observing an existing flag
    pub fn with_flag(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    /// Shared handle to the flag
    pub fn handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Set the flag
    pub fn set(&self, value: bool) {
        self.flag.store(value, Ordering::SeqCst);
    }
}

impl Rule for FlagRule {
    fn should_trigger(&mut self, _context: &DecisionContext) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    fn description(&self) -> String {
        "FlagRule".to_string()
    }
}
