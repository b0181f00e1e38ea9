//! Reference-set refinement
//!
//! The refiner runs the termination filters over the candidate superset in
//! list order. If none of them fires, the reduction filters are chained, each
//! consuming the previous filter's output.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::alternatives::superset::AlternativesSuperset;
use crate::context::DecisionContext;
use crate::error::{ElicitResult, ElicitationError};
use crate::filter::reduction::ReductionFilter;
use crate::filter::termination::TerminationFilter;

/// How the refinement pipeline ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefinerStatus {
    /// A termination filter rejected the superset; no reduction ran
    TerminatedDueToTerminationFilter,
    /// All reduction filters ran
    ProcessEndedSuccessfully,
}

/// Per-stage wall-clock timings (milliseconds)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTimings {
    /// Time spent on termination filters (ms)
    pub termination_ms: f64,
    /// Time spent on reduction filters (ms)
    pub reduction_ms: f64,
    /// Total refinement time (ms)
    pub total_ms: f64,
}

impl StageTimings {
    fn from_durations(termination: Duration, reduction: Duration, total: Duration) -> Self {
        Self {
            termination_ms: termination.as_secs_f64() * 1000.0,
            reduction_ms: reduction.as_secs_f64() * 1000.0,
            total_ms: total.as_secs_f64() * 1000.0,
        }
    }
}

/// Output size of one reduction filter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOutcome {
    /// Filter name
    pub filter: String,
    /// Size of the filter's output set
    pub output_size: usize,
}

/// Result of one refinement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RefinerReport {
    /// How the pipeline ended
    pub status: RefinerStatus,
    /// Reference set (empty when terminated)
    pub refined_alternatives: AlternativesSuperset,
    /// Message of the filter that terminated the pipeline
    pub termination_message: Option<String>,
    /// Output size after each reduction filter, in order
    pub reduction_outcomes: Vec<FilterOutcome>,
    /// Timing information
    pub timings: StageTimings,
    /// Iteration the refinement was run for
    pub iteration: usize,
}

impl RefinerReport {
    /// True if the reference set is ready for querying
    pub fn is_successful(&self) -> bool {
        self.status == RefinerStatus::ProcessEndedSuccessfully
    }
}

/// Two-stage alternative-set pipeline
pub struct Refiner {
    termination_filters: Vec<Box<dyn TerminationFilter>>,
    reduction_filters: Vec<Box<dyn ReductionFilter>>,
}

impl Refiner {
    /// Create a refiner from both filter lists
    pub fn new(
        termination_filters: Vec<Box<dyn TerminationFilter>>,
        reduction_filters: Vec<Box<dyn ReductionFilter>>,
    ) -> Self {
        Self {
            termination_filters,
            reduction_filters,
        }
    }

    /// Create a builder
    pub fn builder() -> RefinerBuilder {
        RefinerBuilder::default()
    }

    /// Number of termination filters
    pub fn termination_filter_count(&self) -> usize {
        self.termination_filters.len()
    }

    /// Number of reduction filters
    pub fn reduction_filter_count(&self) -> usize {
        self.reduction_filters.len()
    }

    /// Refine the context's superset into a reference set
    pub fn refine(&self, context: &DecisionContext) -> ElicitResult<RefinerReport> {
        let start = Instant::now();
        let superset = context.alternatives_superset();

        for filter in &self.termination_filters {
            let result = filter.should_terminate(context, superset)?;
            debug!(
                filter = filter.name(),
                should_terminate = result.should_terminate,
                message = %result.message,
                "termination filter evaluated"
            );
            if result.should_terminate {
                let elapsed = start.elapsed();
                info!(
                    iteration = context.iteration(),
                    filter = filter.name(),
                    message = %result.message,
                    "refinement terminated by termination filter"
                );
                return Ok(RefinerReport {
                    status: RefinerStatus::TerminatedDueToTerminationFilter,
                    refined_alternatives: AlternativesSuperset::default(),
                    termination_message: Some(result.message),
                    reduction_outcomes: Vec::new(),
                    timings: StageTimings::from_durations(elapsed, Duration::ZERO, elapsed),
                    iteration: context.iteration(),
                });
            }
        }
        let termination_time = start.elapsed();

        let reduction_start = Instant::now();
        let mut current = superset.clone();
        let mut outcomes = Vec::with_capacity(self.reduction_filters.len());
        for filter in &self.reduction_filters {
            current = filter.reduce(context, &current)?;
            debug!(
                filter = filter.name(),
                output_size = current.size(),
                "reduction filter applied"
            );
            outcomes.push(FilterOutcome {
                filter: filter.name().to_string(),
                output_size: current.size(),
            });
        }
        let reduction_time = reduction_start.elapsed();

        info!(
            iteration = context.iteration(),
            input_size = superset.size(),
            output_size = current.size(),
            "refinement completed"
        );

        Ok(RefinerReport {
            status: RefinerStatus::ProcessEndedSuccessfully,
            refined_alternatives: current,
            termination_message: None,
            reduction_outcomes: outcomes,
            timings: StageTimings::from_durations(termination_time, reduction_time, start.elapsed()),
            iteration: context.iteration(),
        })
    }
}

impl fmt::Debug for Refiner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let termination: Vec<_> = self.termination_filters.iter().map(|x| x.name()).collect();
        let reduction: Vec<_> = self.reduction_filters.iter().map(|x| x.name()).collect();
        f.debug_struct("Refiner")
            .field("termination_filters", &termination)
            .field("reduction_filters", &reduction)
            .finish()
    }
}

/// Builder for [`Refiner`]
///
/// Both filter lists must be supplied (possibly empty).
#[derive(Default)]
pub struct RefinerBuilder {
    termination_filters: Option<Vec<Box<dyn TerminationFilter>>>,
    reduction_filters: Option<Vec<Box<dyn ReductionFilter>>>,
}

impl RefinerBuilder {
    /// Set the termination filters
    pub fn termination_filters(mut self, filters: Vec<Box<dyn TerminationFilter>>) -> Self {
        self.termination_filters = Some(filters);
        self
    }

    /// Set the reduction filters
    pub fn reduction_filters(mut self, filters: Vec<Box<dyn ReductionFilter>>) -> Self {
        self.reduction_filters = Some(filters);
        self
    }

    /// Build the refiner
    pub fn build(self) -> ElicitResult<Refiner> {
        let termination = self.termination_filters.ok_or_else(|| {
            ElicitationError::configuration("the termination filters are not provided")
        })?;
        let reduction = self.reduction_filters.ok_or_else(|| {
            ElicitationError::configuration("the reduction filters are not provided")
        })?;
        Ok(Refiner::new(termination, reduction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::criterion::Criteria;
    use crate::filter::reduction::{RemoveDominated, RemoveDuplicatesInOS};
    use crate::filter::termination::{RequiredSpread, TerminationResult};

    fn dataset_context() -> DecisionContext {
        DecisionContext::builder()
            .iteration(5)
            .criteria(Criteria::costs(2).unwrap())
            .alternatives(AlternativesSuperset::from_vectors(vec![
                vec![0.0, 11.0],
                vec![1.0, 5.0],
                vec![3.0, 3.0],
                vec![3.0, 7.0],
                vec![7.0, 7.0],
                vec![11.0, 1.0],
                vec![5.0, 2.0],
                vec![5.0, 2.0],
                vec![9.0, 9.0],
                vec![3.0, 7.0],
                vec![1.0, 5.0],
            ]))
            .build()
            .unwrap()
    }

    fn standard_refiner(threshold: f64) -> Refiner {
        Refiner::builder()
            .termination_filters(vec![Box::new(RequiredSpread::new(threshold).unwrap())])
            .reduction_filters(vec![
                Box::new(RemoveDuplicatesInOS::new()),
                Box::new(RemoveDominated::new()),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn test_dataset_refinement() {
        let ctx = dataset_context();
        let report = standard_refiner(0.0001).refine(&ctx).unwrap();
        assert_eq!(report.status, RefinerStatus::ProcessEndedSuccessfully);
        assert_eq!(
            report.refined_alternatives.names(),
            vec!["A0", "A1", "A2", "A5", "A6"]
        );
        assert_eq!(report.iteration, 5);
        assert!(report.termination_message.is_none());
        let sizes: Vec<_> = report.reduction_outcomes.iter().map(|o| o.output_size).collect();
        assert_eq!(sizes, vec![8, 5]);
    }

    #[test]
    fn test_termination_skips_reduction() {
        let ctx = dataset_context();
        let report = standard_refiner(100.0).refine(&ctx).unwrap();
        assert_eq!(report.status, RefinerStatus::TerminatedDueToTerminationFilter);
        assert!(report.refined_alternatives.is_empty());
        assert!(report.reduction_outcomes.is_empty());
        assert_eq!(
            report.termination_message.as_deref(),
            Some(RequiredSpread::INVALID_MESSAGE)
        );
        assert!(!report.is_successful());
    }

    struct AlwaysTerminate(&'static str);

    impl TerminationFilter for AlwaysTerminate {
        fn should_terminate(
            &self,
            _context: &DecisionContext,
            _alternatives: &AlternativesSuperset,
        ) -> ElicitResult<TerminationResult> {
            Ok(TerminationResult::terminate(self.0))
        }

        fn name(&self) -> &'static str {
            "AlwaysTerminate"
        }
    }

    #[test]
    fn test_first_terminating_filter_wins() {
        let ctx = dataset_context();
        let refiner = Refiner::builder()
            .termination_filters(vec![
                Box::new(RequiredSpread::new(0.0001).unwrap()),
                Box::new(AlwaysTerminate("first")),
                Box::new(AlwaysTerminate("second")),
            ])
            .reduction_filters(vec![])
            .build()
            .unwrap();
        let report = refiner.refine(&ctx).unwrap();
        assert_eq!(report.termination_message.as_deref(), Some("first"));
    }

    #[test]
    fn test_empty_reduction_chain_returns_input() {
        let ctx = dataset_context();
        let refiner = Refiner::builder()
            .termination_filters(vec![])
            .reduction_filters(vec![])
            .build()
            .unwrap();
        let report = refiner.refine(&ctx).unwrap();
        assert_eq!(&report.refined_alternatives, ctx.alternatives_superset());
    }

    #[test]
    fn test_missing_filter_lists() {
        let err = Refiner::builder()
            .reduction_filters(vec![])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ElicitationError::configuration("the termination filters are not provided")
        );
        assert!(Refiner::builder().termination_filters(vec![]).build().is_err());
    }

    #[test]
    fn test_filter_errors_propagate() {
        let ctx = dataset_context();
        let refiner = Refiner::new(
            vec![Box::new(RequiredSpread::per_criterion(vec![1.0, 1.0, 1.0]).unwrap())],
            vec![],
        );
        assert!(refiner.refine(&ctx).is_err());
    }
}
