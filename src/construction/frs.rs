//! Fast rejection sampling (FRS)
//!
//! Each round first re-validates the models held from the previous round and
//! then draws fresh candidates from the random model generator until the
//! population is full or the sampling limit is spent. A candidate is accepted
//! when its most discriminative compatibility with the preference history is
//! `None` or strictly positive.
//!
//! # Example
//!
//! ```rust,ignore
//! use pref_elicit::prelude::*;
//!
//! let mut frs = FrsBuilder::new()
//!     .feasible_samples_to_generate(50)
//!     .sampling_limit(10_000)
//!     .generator(LNormGenerator::linear(vec![0.0, 0.0])?)
//!     .build()?;
//!
//! let report = frs.construct(&context, &history, &mut rng)?;
//! if report.inconsistency_detected {
//!     // contradictory or insufficient feedback
//! }
//! ```

use std::fmt;
use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::report::{ConstructionReport, ConstructionTiming, PreservationStats, SamplingStats};
use crate::context::DecisionContext;
use crate::criteria::normalization::Normalization;
use crate::error::{ElicitResult, ElicitationError};
use crate::model::compatibility::{is_compatible, CompatibilityAnalyzer};
use crate::model::traits::{InternalModel, RandomModelGenerator};
use crate::preference::information::{
    PreferenceHistory, PreferenceInformation, PreferenceInformationWrapper,
};

/// Configuration for fast rejection sampling
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrsConfig {
    /// Maximum number of candidate draws per round
    pub sampling_limit: usize,
    /// Target population size
    pub feasible_samples_to_generate: usize,
    /// A population of at most this size flags inconsistency
    pub inconsistency_threshold: usize,
    /// Re-validate held models before sampling new ones
    pub validate_already_existing_samples_first: bool,
}

impl Default for FrsConfig {
    fn default() -> Self {
        Self {
            sampling_limit: 10_000,
            feasible_samples_to_generate: 100,
            inconsistency_threshold: 0,
            validate_already_existing_samples_first: true,
        }
    }
}

impl FrsConfig {
    /// Apply documented parameter clamping
    ///
    /// The target is raised to at least 1 and the sampling limit to at least
    /// the target.
    pub fn clamped(mut self) -> Self {
        if self.feasible_samples_to_generate < 1 {
            warn!(
                requested = self.feasible_samples_to_generate,
                "feasible samples to generate clamped to 1"
            );
            self.feasible_samples_to_generate = 1;
        }
        if self.sampling_limit < self.feasible_samples_to_generate {
            warn!(
                requested = self.sampling_limit,
                clamped = self.feasible_samples_to_generate,
                "sampling limit clamped to the feasible samples target"
            );
            self.sampling_limit = self.feasible_samples_to_generate;
        }
        self
    }
}

/// Fast rejection sampling preference model constructor
pub struct FastRejectionSampling<G>
where
    G: RandomModelGenerator,
{
    config: FrsConfig,
    generator: G,
    analyzer: CompatibilityAnalyzer,
    models: Vec<G::Model>,
    normalizations: Option<Vec<Normalization>>,
    /// History length seen by the previous round
    history_mark: usize,
    /// Previous round flagged inconsistency
    inconsistent: bool,
}

impl<G> FastRejectionSampling<G>
where
    G: RandomModelGenerator,
{
    /// Create a constructor; the configuration is clamped
    pub fn new(config: FrsConfig, generator: G, analyzer: CompatibilityAnalyzer) -> Self {
        Self {
            config: config.clamped(),
            generator,
            analyzer,
            models: Vec::new(),
            normalizations: None,
            history_mark: 0,
            inconsistent: false,
        }
    }

    /// The effective (clamped) configuration
    pub fn config(&self) -> &FrsConfig {
        &self.config
    }

    /// Current model population
    pub fn models(&self) -> &[G::Model] {
        &self.models
    }

    /// The random model generator
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// True if the last round flagged inconsistency
    pub fn is_inconsistent(&self) -> bool {
        self.inconsistent
    }

    /// Run one construction round
    pub fn construct<R: Rng>(
        &mut self,
        context: &DecisionContext,
        history: &PreferenceHistory,
        rng: &mut R,
    ) -> ElicitResult<ConstructionReport> {
        let start = Instant::now();
        let count = context.criteria().count();
        if self.generator.dimension() != count {
            return Err(ElicitationError::Configuration(format!(
                "the random model generator covers {} criteria but there are {}",
                self.generator.dimension(),
                count
            )));
        }
        validate_history(context, history)?;

        let normalizations_updated = self.propagate_normalizations(context);

        let preservation_start = Instant::now();
        let (preserved, preservation) = self.preservation_pass(history, normalizations_updated);
        let preservation_time = preservation_start.elapsed();

        let target = self.config.feasible_samples_to_generate;
        let remaining = target.saturating_sub(preserved.len());

        let sampling_start = Instant::now();
        let mut population = preserved;
        let sampling = if remaining > 0 {
            Some(self.sampling_pass(history.statements(), remaining, &mut population, rng))
        } else {
            None
        };
        let sampling_time = sampling_start.elapsed();

        let inconsistency_detected = population.len() <= self.config.inconsistency_threshold;
        self.models = population;
        self.history_mark = history.len();
        self.inconsistent = inconsistency_detected;

        let report = ConstructionReport {
            iteration: context.iteration(),
            normalizations_updated,
            preservation,
            sampling,
            population_size: self.models.len(),
            inconsistency_detected,
            timing: ConstructionTiming {
                preservation_ms: preservation_time.as_secs_f64() * 1000.0,
                sampling_ms: sampling_time.as_secs_f64() * 1000.0,
                total_ms: start.elapsed().as_secs_f64() * 1000.0,
            },
        };

        if inconsistency_detected {
            warn!(
                iteration = report.iteration,
                population_size = report.population_size,
                threshold = self.config.inconsistency_threshold,
                "preference information may be inconsistent"
            );
        }
        info!(
            iteration = report.iteration,
            preserved = report.preserved(),
            accepted = report.accepted(),
            population_size = report.population_size,
            "construction round completed"
        );
        Ok(report)
    }

    fn propagate_normalizations(&mut self, context: &DecisionContext) -> bool {
        let Some(normalizations) = context.normalizations() else {
            return false;
        };
        if self.normalizations.is_some() && !context.objective_space_changed() {
            return false;
        }
        self.generator.receive_normalizations(normalizations);
        for model in &mut self.models {
            model.receive_normalizations(normalizations);
        }
        self.normalizations = Some(normalizations.to_vec());
        debug!(iteration = context.iteration(), "normalizations propagated");
        true
    }

    fn preservation_pass(
        &mut self,
        history: &PreferenceHistory,
        normalizations_updated: bool,
    ) -> (Vec<G::Model>, Option<PreservationStats>) {
        let previous = std::mem::take(&mut self.models);
        if !self.config.validate_already_existing_samples_first || previous.is_empty() {
            return (Vec::new(), None);
        }

        let recent = history.since(self.history_mark);
        let incremental = !recent.is_empty() && !self.inconsistent && !normalizations_updated;
        let reference = if incremental {
            recent
        } else {
            history.statements()
        };

        let examined = previous.len();
        let mut preserved: Vec<G::Model> = previous
            .into_iter()
            .filter(|model| {
                is_compatible(self.analyzer.most_discriminative_compatibility(reference, model))
            })
            .collect();
        preserved.truncate(self.config.feasible_samples_to_generate);

        let stats = PreservationStats {
            examined,
            preserved: preserved.len(),
            rejected: examined - preserved.len(),
            success_rate: preserved.len() as f64 / examined as f64,
            incremental,
        };
        debug!(
            examined,
            preserved = stats.preserved,
            incremental,
            "preservation pass completed"
        );
        (preserved, Some(stats))
    }

    fn sampling_pass<R: Rng>(
        &self,
        history: &[PreferenceInformationWrapper],
        target: usize,
        population: &mut Vec<G::Model>,
        rng: &mut R,
    ) -> SamplingStats {
        let mut accepted = 0;
        let mut rejected = 0;
        for _ in 0..self.config.sampling_limit {
            if accepted == target {
                break;
            }
            let candidate = self.generator.generate(rng);
            let compatibility = self
                .analyzer
                .most_discriminative_compatibility(history, &candidate);
            if is_compatible(compatibility) {
                population.push(candidate);
                accepted += 1;
            } else {
                rejected += 1;
            }
        }

        let drawn = accepted + rejected;
        SamplingStats {
            target,
            accepted,
            rejected,
            success_rate: (drawn > 0).then(|| accepted as f64 / drawn as f64),
            limit_exhausted: accepted < target,
        }
    }
}

impl<G> fmt::Debug for FastRejectionSampling<G>
where
    G: RandomModelGenerator + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastRejectionSampling")
            .field("config", &self.config)
            .field("generator", &self.generator)
            .field("population_size", &self.models.len())
            .field("history_mark", &self.history_mark)
            .field("inconsistent", &self.inconsistent)
            .finish()
    }
}

fn validate_history(context: &DecisionContext, history: &PreferenceHistory) -> ElicitResult<()> {
    let count = context.criteria().count();
    for wrapper in history.statements() {
        if let PreferenceInformation::Ranking(ranked) = &wrapper.preference_information {
            if ranked.len() < 2 {
                return Err(ElicitationError::Configuration(format!(
                    "a ranking collected in iteration {} has {} alternatives, at least two are needed",
                    wrapper.iteration,
                    ranked.len()
                )));
            }
        }
        for (preferred, other) in wrapper.preference_information.pairs() {
            preferred.check_dimension(count)?;
            other.check_dimension(count)?;
        }
    }
    Ok(())
}

/// Builder for [`FastRejectionSampling`]
#[derive(Debug)]
pub struct FrsBuilder<G> {
    config: FrsConfig,
    generator: Option<G>,
    analyzer: Option<CompatibilityAnalyzer>,
}

impl FrsBuilder<()> {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: FrsConfig::default(),
            generator: None,
            analyzer: None,
        }
    }
}

impl Default for FrsBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> FrsBuilder<G> {
    /// Replace the whole configuration
    pub fn config(mut self, config: FrsConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the maximum number of draws per round
    pub fn sampling_limit(mut self, limit: usize) -> Self {
        self.config.sampling_limit = limit;
        self
    }

    /// Set the target population size
    pub fn feasible_samples_to_generate(mut self, count: usize) -> Self {
        self.config.feasible_samples_to_generate = count;
        self
    }

    /// Set the inconsistency threshold
    pub fn inconsistency_threshold(mut self, threshold: usize) -> Self {
        self.config.inconsistency_threshold = threshold;
        self
    }

    /// Enable or disable re-validation of held models
    pub fn validate_already_existing_samples_first(mut self, validate: bool) -> Self {
        self.config.validate_already_existing_samples_first = validate;
        self
    }

    /// Set the compatibility analyzer
    pub fn compatibility_analyzer(mut self, analyzer: CompatibilityAnalyzer) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Set the random model generator
    pub fn generator<NewG>(self, generator: NewG) -> FrsBuilder<NewG>
    where
        NewG: RandomModelGenerator,
    {
        FrsBuilder {
            config: self.config,
            generator: Some(generator),
            analyzer: self.analyzer,
        }
    }
}

impl<G> FrsBuilder<G>
where
    G: RandomModelGenerator,
{
    /// Build the constructor
    pub fn build(self) -> ElicitResult<FastRejectionSampling<G>> {
        let generator = self.generator.ok_or_else(|| {
            ElicitationError::configuration("the random model generator is not provided")
        })?;
        Ok(FastRejectionSampling::new(
            self.config,
            generator,
            self.analyzer.unwrap_or_default(),
        ))
    }
}
