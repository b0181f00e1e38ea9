//! Serializable configuration
//!
//! [`ElicitationConfig`] gathers the trigger rules, the refiner filter chain
//! and the FRS parameters in one JSON document and builds the live
//! components from it.
//!
//! ```json
//! {
//!   "trigger": [{ "type": "iteration_interval", "start_iteration": 5, "interval": 10 }],
//!   "refiner": { "spread_threshold": { "Shared": 0.001 }, "remove_dominated": true },
//!   "frs": { "feasible_samples_to_generate": 50 }
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::construction::frs::{FastRejectionSampling, FrsBuilder, FrsConfig};
use crate::error::{ElicitResult, ElicitationError};
use crate::filter::reduction::{ReductionFilter, RemoveDominated, RemoveDuplicatesInOS};
use crate::filter::termination::{RequiredSpread, SpreadThreshold, TerminationFilter};
use crate::model::compatibility::CompatibilityAnalyzer;
use crate::model::traits::RandomModelGenerator;
use crate::refiner::Refiner;
use crate::trigger::flag::FlagRule;
use crate::trigger::iteration::IterationInterval;
use crate::trigger::time::TimeInterval;
use crate::trigger::{InteractionTrigger, Rule};

/// One interaction rule
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleConfig {
    /// See [`IterationInterval`]
    IterationInterval {
        /// First iteration on which the rule may fire
        start_iteration: usize,
        /// Iterations between firings
        interval: usize,
        /// Limit on completed elicitations
        #[serde(default)]
        max_triggers: Option<usize>,
    },
    /// See [`TimeInterval`]
    TimeInterval {
        /// Start of the first slot
        start: DateTime<Utc>,
        /// Slot length in milliseconds
        interval_ms: u64,
        /// Limit on completed elicitations
        #[serde(default)]
        max_triggers: Option<usize>,
    },
    /// See [`FlagRule`]; the flag handle is returned by
    /// [`ElicitationConfig::build_trigger`]
    Flag,
}

impl RuleConfig {
    fn build(&self, flags: &mut Vec<Arc<AtomicBool>>) -> ElicitResult<Box<dyn Rule>> {
        Ok(match self {
            Self::IterationInterval {
                start_iteration,
                interval,
                max_triggers,
            } => Box::new(IterationInterval::new(*start_iteration, *interval, *max_triggers)?),
            Self::TimeInterval {
                start,
                interval_ms,
                max_triggers,
            } => {
                let millis = i64::try_from(*interval_ms).map_err(|_| {
                    ElicitationError::configuration(format!(
                        "time interval of {interval_ms} ms is out of range"
                    ))
                })?;
                Box::new(TimeInterval::new(
                    *start,
                    Duration::milliseconds(millis),
                    *max_triggers,
                )?)
            }
            Self::Flag => {
                let rule = FlagRule::new();
                flags.push(rule.handle());
                Box::new(rule)
            }
        })
    }
}

/// Refiner filter chain settings
///
/// Termination: an optional spread check. Reduction, in this order:
/// duplicate removal, then dominance removal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinerConfig {
    /// Spread threshold; `None` disables the spread check
    pub spread_threshold: Option<SpreadThreshold>,
    /// Measure spreads on normalized values
    pub normalize_spread: bool,
    /// Remove duplicates in objective space
    pub remove_duplicates: bool,
    /// Tolerance of the duplicate check
    pub duplicate_epsilon: f64,
    /// Remove dominated alternatives
    pub remove_dominated: bool,
}

impl Default for RefinerConfig {
    fn default() -> Self {
        Self {
            spread_threshold: None,
            normalize_spread: false,
            remove_duplicates: true,
            duplicate_epsilon: crate::DEFAULT_EPSILON,
            remove_dominated: true,
        }
    }
}

impl RefinerConfig {
    /// Enable the spread check with a shared threshold
    pub fn spread_threshold(mut self, threshold: f64) -> Self {
        self.spread_threshold = Some(SpreadThreshold::Shared(threshold));
        self
    }

    /// Enable the spread check with per-criterion thresholds
    pub fn per_criterion_spread(mut self, thresholds: Vec<f64>) -> Self {
        self.spread_threshold = Some(SpreadThreshold::PerCriterion(thresholds));
        self
    }

    /// Measure spreads on normalized values
    pub fn normalize_spread(mut self, normalize: bool) -> Self {
        self.normalize_spread = normalize;
        self
    }

    /// Toggle duplicate removal
    pub fn remove_duplicates(mut self, enabled: bool) -> Self {
        self.remove_duplicates = enabled;
        self
    }

    /// Set the duplicate tolerance
    pub fn duplicate_epsilon(mut self, epsilon: f64) -> Self {
        self.duplicate_epsilon = epsilon;
        self
    }

    /// Toggle dominance removal
    pub fn remove_dominated(mut self, enabled: bool) -> Self {
        self.remove_dominated = enabled;
        self
    }

    /// Build the refiner
    pub fn build(&self) -> ElicitResult<Refiner> {
        let mut termination: Vec<Box<dyn TerminationFilter>> = Vec::new();
        if let Some(threshold) = &self.spread_threshold {
            termination.push(Box::new(
                RequiredSpread::with_threshold(threshold.clone())?
                    .with_normalization(self.normalize_spread),
            ));
        }

        let mut reduction: Vec<Box<dyn ReductionFilter>> = Vec::new();
        if self.remove_duplicates {
            reduction.push(Box::new(RemoveDuplicatesInOS::with_epsilon(
                self.duplicate_epsilon,
            )?));
        }
        if self.remove_dominated {
            reduction.push(Box::new(RemoveDominated::new()));
        }

        Refiner::builder()
            .termination_filters(termination)
            .reduction_filters(reduction)
            .build()
    }
}

/// Full elicitation configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElicitationConfig {
    /// Interaction rules, combined with OR
    pub trigger: Vec<RuleConfig>,
    /// Refiner filter chain
    pub refiner: RefinerConfig,
    /// Model constructor parameters
    pub frs: FrsConfig,
}

impl ElicitationConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interaction rule
    pub fn rule(mut self, rule: RuleConfig) -> Self {
        self.trigger.push(rule);
        self
    }

    /// Replace the refiner settings
    pub fn refiner(mut self, refiner: RefinerConfig) -> Self {
        self.refiner = refiner;
        self
    }

    /// Replace the FRS parameters
    pub fn frs(mut self, frs: FrsConfig) -> Self {
        self.frs = frs;
        self
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> ElicitResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse from a JSON reader
    pub fn from_reader<R: Read>(reader: R) -> ElicitResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> ElicitResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> ElicitResult<Self> {
        let file = File::open(path)?;
        let config = Self::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> ElicitResult<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Build the trigger and return the handles of its flag rules, in order
    pub fn build_trigger(&self) -> ElicitResult<(InteractionTrigger, Vec<Arc<AtomicBool>>)> {
        let mut flags = Vec::new();
        let rules = self
            .trigger
            .iter()
            .map(|rule| rule.build(&mut flags))
            .collect::<ElicitResult<Vec<_>>>()?;
        Ok((InteractionTrigger::new(rules), flags))
    }

    /// Build the refiner
    pub fn build_refiner(&self) -> ElicitResult<Refiner> {
        self.refiner.build()
    }

    /// Build the FRS constructor around `generator`
    pub fn build_constructor<G>(&self, generator: G) -> ElicitResult<FastRejectionSampling<G>>
    where
        G: RandomModelGenerator,
    {
        FrsBuilder::new()
            .config(self.frs.clone())
            .compatibility_analyzer(CompatibilityAnalyzer::default())
            .generator(generator)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::lnorm::LNormGenerator;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_default_refiner_chain() {
        let refiner = ElicitationConfig::default().build_refiner().unwrap();
        assert_eq!(refiner.termination_filter_count(), 0);
        assert_eq!(refiner.reduction_filter_count(), 2);
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "trigger": [
                { "type": "iteration_interval", "start_iteration": 5, "interval": 10, "max_triggers": 3 },
                { "type": "time_interval", "start": "2024-01-01T00:00:00Z", "interval_ms": 60000 },
                { "type": "flag" }
            ],
            "refiner": { "spread_threshold": { "Shared": 0.001 }, "remove_dominated": false },
            "frs": {
                "sampling_limit": 500,
                "feasible_samples_to_generate": 20,
                "inconsistency_threshold": 0,
                "validate_already_existing_samples_first": true
            }
        }"#;
        let config = ElicitationConfig::from_json(json).unwrap();
        assert_eq!(config.trigger.len(), 3);
        assert_eq!(
            config.trigger[0],
            RuleConfig::IterationInterval {
                start_iteration: 5,
                interval: 10,
                max_triggers: Some(3)
            }
        );
        assert!(config.refiner.remove_duplicates);
        assert!(!config.refiner.remove_dominated);
        assert_eq!(config.frs.sampling_limit, 500);

        let (trigger, flags) = config.build_trigger().unwrap();
        assert_eq!(trigger.rule_count(), 3);
        assert_eq!(flags.len(), 1);
        assert!(!flags[0].load(Ordering::SeqCst));

        let refiner = config.build_refiner().unwrap();
        assert_eq!(refiner.termination_filter_count(), 1);
        assert_eq!(refiner.reduction_filter_count(), 1);

        let frs = config
            .build_constructor(LNormGenerator::linear(vec![0.0, 0.0]).unwrap())
            .unwrap();
        assert_eq!(frs.config().feasible_samples_to_generate, 20);
    }

    #[test]
    fn test_json_round_trip() {
        let config = ElicitationConfig::new()
            .rule(RuleConfig::Flag)
            .refiner(RefinerConfig::default().per_criterion_spread(vec![0.1, 0.2]))
            .frs(FrsConfig {
                sampling_limit: 42,
                ..FrsConfig::default()
            });
        let json = config.to_json().unwrap();
        assert_eq!(ElicitationConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_rules_are_rejected() {
        let config = ElicitationConfig::new().rule(RuleConfig::IterationInterval {
            start_iteration: 0,
            interval: 0,
            max_triggers: None,
        });
        assert!(matches!(
            config.build_trigger().unwrap_err(),
            ElicitationError::Configuration(_)
        ));

        let config = ElicitationConfig::new().rule(RuleConfig::TimeInterval {
            start: Utc::now(),
            interval_ms: 0,
            max_triggers: None,
        });
        assert!(config.build_trigger().is_err());
    }

    #[test]
    fn test_invalid_refiner_settings() {
        let config = RefinerConfig::default().spread_threshold(-1.0);
        assert!(config.build().is_err());
        let config = RefinerConfig::default().duplicate_epsilon(f64::NAN);
        assert!(config.build().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = ElicitationConfig::from_json("{ \"trigger\": 3 }").unwrap_err();
        assert!(matches!(err, ElicitationError::Serialization(_)));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "pref-elicit-config-{}.json",
            std::process::id()
        ));
        let config = ElicitationConfig::new().rule(RuleConfig::Flag);
        config.save(&path).unwrap();
        let loaded = ElicitationConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }
}
