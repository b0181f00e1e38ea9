//! Reduction filters
//!
//! Each reduction filter consumes an alternative set and produces a new,
//! possibly smaller one. Filters never reorder the alternatives they keep.

use serde::{Deserialize, Serialize};

use crate::alternatives::dominance::{dominates, values_equal};
use crate::alternatives::superset::AlternativesSuperset;
use crate::context::DecisionContext;
use crate::error::{ElicitResult, ElicitationError};
use crate::DEFAULT_EPSILON;

/// Alternative-set transform applied after the termination stage
pub trait ReductionFilter: Send + Sync {
    /// Produce the reduced set
    fn reduce(
        &self,
        context: &DecisionContext,
        alternatives: &AlternativesSuperset,
    ) -> ElicitResult<AlternativesSuperset>;

    /// Short filter name used in logs
    fn name(&self) -> &'static str;
}

/// Removes alternatives equal in objective space to an earlier kept one
///
/// Two alternatives are equal when every criterion differs by at most
/// `epsilon`. The first occurrence is kept.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemoveDuplicatesInOS {
    epsilon: f64,
}

impl RemoveDuplicatesInOS {
    /// Use the library-wide tolerance
    pub fn new() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Use a custom tolerance
    pub fn with_epsilon(epsilon: f64) -> ElicitResult<Self> {
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(ElicitationError::Configuration(format!(
                "duplicate tolerance must be finite and non-negative, got {epsilon}"
            )));
        }
        Ok(Self { epsilon })
    }

    /// The tolerance in use
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Default for RemoveDuplicatesInOS {
    fn default() -> Self {
        Self::new()
    }
}

impl ReductionFilter for RemoveDuplicatesInOS {
    fn reduce(
        &self,
        context: &DecisionContext,
        alternatives: &AlternativesSuperset,
    ) -> ElicitResult<AlternativesSuperset> {
        let count = context.criteria().count();
        let mut kept = AlternativesSuperset::default();
        for alternative in alternatives {
            let duplicate = kept.iter().any(|k| {
                values_equal(
                    k.performance_vector(),
                    alternative.performance_vector(),
                    count,
                    self.epsilon,
                )
            });
            if !duplicate {
                kept.push(alternative.clone());
            }
        }
        Ok(kept)
    }

    fn name(&self) -> &'static str {
        "RemoveDuplicatesInOS"
    }
}

/// Keeps only the non-dominated alternatives
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveDominated;

impl RemoveDominated {
    /// Create the filter
    pub fn new() -> Self {
        Self
    }
}

impl ReductionFilter for RemoveDominated {
    fn reduce(
        &self,
        context: &DecisionContext,
        alternatives: &AlternativesSuperset,
    ) -> ElicitResult<AlternativesSuperset> {
        let criteria = context.criteria();
        Ok(alternatives
            .iter()
            .filter(|candidate| {
                !alternatives.iter().any(|other| {
                    dominates(
                        other.performance_vector(),
                        candidate.performance_vector(),
                        criteria,
                    )
                })
            })
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "RemoveDominated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::criterion::Criteria;

    fn context(criteria: Criteria, vectors: Vec<Vec<f64>>) -> DecisionContext {
        DecisionContext::builder()
            .criteria(criteria)
            .alternatives(AlternativesSuperset::from_vectors(vectors))
            .build()
            .unwrap()
    }

    #[test]
    fn test_remove_duplicates_keeps_first() {
        let ctx = context(
            Criteria::costs(2).unwrap(),
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![1.0, 2.0], vec![3.0, 4.0 + 1e-12]],
        );
        let reduced = RemoveDuplicatesInOS::new()
            .reduce(&ctx, ctx.alternatives_superset())
            .unwrap();
        assert_eq!(reduced.names(), vec!["A0", "A1"]);
    }

    #[test]
    fn test_remove_duplicates_epsilon() {
        let ctx = context(
            Criteria::costs(1).unwrap(),
            vec![vec![1.0], vec![1.05], vec![1.2]],
        );
        let reduced = RemoveDuplicatesInOS::with_epsilon(0.1)
            .unwrap()
            .reduce(&ctx, ctx.alternatives_superset())
            .unwrap();
        assert_eq!(reduced.names(), vec!["A0", "A2"]);
        assert!(RemoveDuplicatesInOS::with_epsilon(-0.1).is_err());
    }

    #[test]
    fn test_duplicates_ignore_trailing_values() {
        // only the criteria part of the vector is compared
        let ctx = context(
            Criteria::costs(1).unwrap(),
            vec![vec![1.0, 7.0], vec![1.0, 9.0]],
        );
        let reduced = RemoveDuplicatesInOS::new()
            .reduce(&ctx, ctx.alternatives_superset())
            .unwrap();
        assert_eq!(reduced.size(), 1);
    }

    #[test]
    fn test_remove_dominated_cost() {
        let ctx = context(
            Criteria::costs(2).unwrap(),
            vec![vec![0.0, 11.0], vec![3.0, 7.0], vec![3.0, 3.0], vec![11.0, 1.0]],
        );
        let reduced = RemoveDominated::new()
            .reduce(&ctx, ctx.alternatives_superset())
            .unwrap();
        assert_eq!(reduced.names(), vec!["A0", "A2", "A3"]);
    }

    #[test]
    fn test_remove_dominated_gain() {
        let ctx = context(
            Criteria::gains(2).unwrap(),
            vec![vec![0.0, 11.0], vec![3.0, 7.0], vec![3.0, 3.0], vec![11.0, 1.0]],
        );
        let reduced = RemoveDominated::new()
            .reduce(&ctx, ctx.alternatives_superset())
            .unwrap();
        assert_eq!(reduced.names(), vec!["A0", "A1", "A3"]);
    }

    #[test]
    fn test_remove_dominated_keeps_exact_duplicates() {
        let ctx = context(Criteria::costs(2).unwrap(), vec![vec![1.0, 1.0], vec![1.0, 1.0]]);
        let reduced = RemoveDominated::new()
            .reduce(&ctx, ctx.alternatives_superset())
            .unwrap();
        assert_eq!(reduced.size(), 2);
    }
}
