//! Termination filters
//!
//! A termination filter inspects the candidate superset and may stop the
//! refinement pipeline before any reduction runs.

use serde::{Deserialize, Serialize};

use crate::alternatives::superset::AlternativesSuperset;
use crate::context::DecisionContext;
use crate::criteria::normalization::normalize_values;
use crate::error::{ElicitResult, ElicitationError};

/// Outcome of a termination filter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationResult {
    /// True if the pipeline must stop
    pub should_terminate: bool,
    /// Human-readable explanation
    pub message: String,
}

impl TerminationResult {
    /// A result that stops the pipeline
    pub fn terminate(message: impl Into<String>) -> Self {
        Self {
            should_terminate: true,
            message: message.into(),
        }
    }

    /// A result that lets the pipeline continue
    pub fn proceed(message: impl Into<String>) -> Self {
        Self {
            should_terminate: false,
            message: message.into(),
        }
    }
}

/// Set-validity predicate evaluated before reduction
pub trait TerminationFilter: Send + Sync {
    /// Check whether `alternatives` should stop the pipeline
    fn should_terminate(
        &self,
        context: &DecisionContext,
        alternatives: &AlternativesSuperset,
    ) -> ElicitResult<TerminationResult>;

    /// Short filter name used in logs
    fn name(&self) -> &'static str;
}

/// Spread threshold, shared or per criterion
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SpreadThreshold {
    /// One threshold for every criterion
    Shared(f64),
    /// One threshold per criterion, in id order
    PerCriterion(Vec<f64>),
}

impl SpreadThreshold {
    fn for_criterion(&self, id: usize) -> Option<f64> {
        match self {
            Self::Shared(t) => Some(*t),
            Self::PerCriterion(ts) => ts.get(id).copied(),
        }
    }
}

/// Terminates when the superset is too concentrated
///
/// The set is invalid only when every criterion's spread (max - min) is
/// strictly below its threshold. An empty set is always valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequiredSpread {
    threshold: SpreadThreshold,
    use_normalization: bool,
}

impl RequiredSpread {
    /// Message reported when the set is rejected
    pub const INVALID_MESSAGE: &'static str = "The set is invalid (not sufficiently spread)";

    /// One threshold shared by all criteria
    pub fn new(threshold: f64) -> ElicitResult<Self> {
        Self::with_threshold(SpreadThreshold::Shared(threshold))
    }

    /// One threshold per criterion
    pub fn per_criterion(thresholds: Vec<f64>) -> ElicitResult<Self> {
        Self::with_threshold(SpreadThreshold::PerCriterion(thresholds))
    }

    /// Create from a threshold specification
    pub fn with_threshold(threshold: SpreadThreshold) -> ElicitResult<Self> {
        let values: &[f64] = match &threshold {
            SpreadThreshold::Shared(t) => std::slice::from_ref(t),
            SpreadThreshold::PerCriterion(ts) => ts,
        };
        if values.is_empty() || values.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(ElicitationError::Configuration(format!(
                "spread thresholds must be finite and non-negative, got {values:?}"
            )));
        }
        Ok(Self {
            threshold,
            use_normalization: false,
        })
    }

    /// Measure spreads on normalized values when the context provides normalizations
    pub fn with_normalization(mut self, use_normalization: bool) -> Self {
        self.use_normalization = use_normalization;
        self
    }
}

impl TerminationFilter for RequiredSpread {
    fn should_terminate(
        &self,
        context: &DecisionContext,
        alternatives: &AlternativesSuperset,
    ) -> ElicitResult<TerminationResult> {
        let criteria = context.criteria();
        if let SpreadThreshold::PerCriterion(ts) = &self.threshold {
            if ts.len() != criteria.count() {
                return Err(ElicitationError::Configuration(format!(
                    "required spread has {} thresholds but there are {} criteria",
                    ts.len(),
                    criteria.count()
                )));
            }
        }
        if alternatives.is_empty() {
            return Ok(TerminationResult::proceed("The set is empty (considered valid)"));
        }

        let normalizations = if self.use_normalization {
            context.normalizations()
        } else {
            None
        };
        let count = criteria.count();
        let mut min = vec![f64::INFINITY; count];
        let mut max = vec![f64::NEG_INFINITY; count];
        for alternative in alternatives {
            let values = normalize_values(alternative.performance_vector(), normalizations, count);
            for (c, v) in values.into_iter().enumerate() {
                min[c] = min[c].min(v);
                max[c] = max[c].max(v);
            }
        }

        let exceeding: Vec<&str> = criteria
            .iter()
            .filter(|criterion| {
                let id = criterion.id();
                let threshold = self.threshold.for_criterion(id).unwrap_or(0.0);
                max[id] - min[id] >= threshold
            })
            .map(|criterion| criterion.name())
            .collect();

        if exceeding.is_empty() {
            Ok(TerminationResult::terminate(Self::INVALID_MESSAGE))
        } else {
            Ok(TerminationResult::proceed(format!(
                "The set is valid (required spread reached on: {})",
                exceeding.join(", ")
            )))
        }
    }

    fn name(&self) -> &'static str {
        "RequiredSpread"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::criterion::Criteria;
    use crate::criteria::normalization::Normalization;

    fn context(vectors: Vec<Vec<f64>>) -> DecisionContext {
        DecisionContext::builder()
            .criteria(Criteria::costs(2).unwrap())
            .alternatives(AlternativesSuperset::from_vectors(vectors))
            .build()
            .unwrap()
    }

    #[test]
    fn test_concentrated_set_terminates() {
        let ctx = context(vec![vec![0.0, 0.0], vec![1.0, 1.0]]);
        let filter = RequiredSpread::new(10.0).unwrap();
        let result = filter
            .should_terminate(&ctx, ctx.alternatives_superset())
            .unwrap();
        assert!(result.should_terminate);
        assert_eq!(result.message, "The set is invalid (not sufficiently spread)");
    }

    #[test]
    fn test_spread_set_proceeds() {
        let ctx = context(vec![vec![0.0, 0.0], vec![1.0, 1.0]]);
        let filter = RequiredSpread::new(0.01).unwrap();
        let result = filter
            .should_terminate(&ctx, ctx.alternatives_superset())
            .unwrap();
        assert!(!result.should_terminate);
        assert!(result.message.contains("C0, C1"));
    }

    #[test]
    fn test_one_criterion_is_enough() {
        let ctx = context(vec![vec![0.0, 0.0], vec![5.0, 0.5]]);
        let filter = RequiredSpread::new(1.0).unwrap();
        let result = filter
            .should_terminate(&ctx, ctx.alternatives_superset())
            .unwrap();
        assert!(!result.should_terminate);
        assert!(result.message.contains("C0"));
        assert!(!result.message.contains("C1"));
    }

    #[test]
    fn test_spread_equal_to_threshold_is_valid() {
        let ctx = context(vec![vec![0.0, 0.0], vec![1.0, 1.0]]);
        let filter = RequiredSpread::new(1.0).unwrap();
        let result = filter
            .should_terminate(&ctx, ctx.alternatives_superset())
            .unwrap();
        assert!(!result.should_terminate);
    }

    #[test]
    fn test_empty_set_is_valid() {
        let ctx = context(vec![]);
        let filter = RequiredSpread::new(10.0).unwrap();
        let result = filter
            .should_terminate(&ctx, ctx.alternatives_superset())
            .unwrap();
        assert!(!result.should_terminate);
    }

    #[test]
    fn test_per_criterion_thresholds() {
        let ctx = context(vec![vec![0.0, 0.0], vec![1.0, 1.0]]);
        let filter = RequiredSpread::per_criterion(vec![2.0, 0.5]).unwrap();
        let result = filter
            .should_terminate(&ctx, ctx.alternatives_superset())
            .unwrap();
        assert!(!result.should_terminate);
        assert!(result.message.contains("C1"));

        let mismatched = RequiredSpread::per_criterion(vec![2.0]).unwrap();
        assert!(mismatched
            .should_terminate(&ctx, ctx.alternatives_superset())
            .is_err());
    }

    #[test]
    fn test_uses_normalizations_when_enabled() {
        let ctx = DecisionContext::builder()
            .criteria(Criteria::costs(2).unwrap())
            .alternatives(AlternativesSuperset::from_vectors(vec![
                vec![0.0, 0.0],
                vec![1.0, 1.0],
            ]))
            .normalizations(vec![
                Normalization::linear(0.0, 100.0),
                Normalization::linear(0.0, 100.0),
            ])
            .build()
            .unwrap();
        let raw = RequiredSpread::new(0.5).unwrap();
        assert!(!raw
            .should_terminate(&ctx, ctx.alternatives_superset())
            .unwrap()
            .should_terminate);
        let normalized = RequiredSpread::new(0.5).unwrap().with_normalization(true);
        assert!(normalized
            .should_terminate(&ctx, ctx.alternatives_superset())
            .unwrap()
            .should_terminate);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        assert!(RequiredSpread::new(-1.0).is_err());
        assert!(RequiredSpread::new(f64::NAN).is_err());
        assert!(RequiredSpread::per_criterion(vec![]).is_err());
    }
}
