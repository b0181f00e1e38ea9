//! Per-iteration decision context
//!
//! The caller builds one `DecisionContext` per iteration and passes it
//! explicitly to the trigger, the refiner and the model constructor. The
//! random number generator travels alongside it as a `&mut R` argument, so
//! every component draws from the caller's seeded stream.

use chrono::{DateTime, Utc};

use crate::alternatives::superset::AlternativesSuperset;
use crate::criteria::criterion::Criteria;
use crate::criteria::normalization::Normalization;
use crate::error::{ElicitResult, ElicitationError};

/// Immutable snapshot of one decision iteration
#[derive(Clone, Debug)]
pub struct DecisionContext {
    iteration: usize,
    criteria: Criteria,
    alternatives_superset: AlternativesSuperset,
    normalizations: Option<Vec<Normalization>>,
    objective_space_changed: bool,
    timestamp: DateTime<Utc>,
}

impl DecisionContext {
    /// Create a builder
    pub fn builder() -> DecisionContextBuilder {
        DecisionContextBuilder::default()
    }

    /// Current iteration
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Criteria of the problem
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Candidate alternatives supplied by the search
    pub fn alternatives_superset(&self) -> &AlternativesSuperset {
        &self.alternatives_superset
    }

    /// Per-criterion normalizations, if any
    pub fn normalizations(&self) -> Option<&[Normalization]> {
        self.normalizations.as_deref()
    }

    /// True if the objective space (and hence the normalizations) changed
    pub fn objective_space_changed(&self) -> bool {
        self.objective_space_changed
    }

    /// Moment at which the context was created
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Builder for [`DecisionContext`]
///
/// `build` fails with a configuration error naming the missing piece.
#[derive(Clone, Debug, Default)]
pub struct DecisionContextBuilder {
    iteration: usize,
    criteria: Option<Criteria>,
    alternatives_superset: Option<AlternativesSuperset>,
    normalizations: Option<Vec<Normalization>>,
    objective_space_changed: bool,
    timestamp: Option<DateTime<Utc>>,
}

impl DecisionContextBuilder {
    /// Set the iteration number
    pub fn iteration(mut self, iteration: usize) -> Self {
        self.iteration = iteration;
        self
    }

    /// Set the criteria
    pub fn criteria(mut self, criteria: Criteria) -> Self {
        self.criteria = Some(criteria);
        self
    }

    /// Set the candidate alternatives
    pub fn alternatives(mut self, superset: AlternativesSuperset) -> Self {
        self.alternatives_superset = Some(superset);
        self
    }

    /// Set the per-criterion normalizations
    pub fn normalizations(mut self, normalizations: Vec<Normalization>) -> Self {
        self.normalizations = Some(normalizations);
        self
    }

    /// Flag the objective space as changed in this iteration
    pub fn objective_space_changed(mut self, changed: bool) -> Self {
        self.objective_space_changed = changed;
        self
    }

    /// Set the timestamp (defaults to now)
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Validate and build the context
    pub fn build(self) -> ElicitResult<DecisionContext> {
        let criteria = self
            .criteria
            .ok_or_else(|| ElicitationError::configuration("the criteria are not provided"))?;
        let alternatives_superset = self.alternatives_superset.ok_or_else(|| {
            ElicitationError::configuration("the alternatives superset is not provided")
        })?;
        alternatives_superset.check_dimensions(criteria.count())?;
        if let Some(norms) = &self.normalizations {
            if norms.len() != criteria.count() {
                return Err(ElicitationError::Configuration(format!(
                    "expected {} normalizations (one per criterion), got {}",
                    criteria.count(),
                    norms.len()
                )));
            }
        }

        Ok(DecisionContext {
            iteration: self.iteration,
            criteria,
            alternatives_superset,
            normalizations: self.normalizations,
            objective_space_changed: self.objective_space_changed,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
        })
    }
}
