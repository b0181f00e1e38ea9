//! Per-round construction telemetry

use serde::{Deserialize, Serialize};

/// Outcome of the preservation pass
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreservationStats {
    /// Models held before the round
    pub examined: usize,
    /// Models kept
    pub preserved: usize,
    /// Models discarded
    pub rejected: usize,
    /// `preserved / examined`
    pub success_rate: f64,
    /// True if only the newly appended statements were checked
    pub incremental: bool,
}

/// Outcome of the sampling pass
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplingStats {
    /// Models still needed when sampling started
    pub target: usize,
    /// Newly accepted models
    pub accepted: usize,
    /// Newly rejected models
    pub rejected: usize,
    /// `accepted / (accepted + rejected)`, `None` if nothing was drawn
    pub success_rate: Option<f64>,
    /// True if the sampling limit ran out before the target was reached
    pub limit_exhausted: bool,
}

/// Timing information (milliseconds)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstructionTiming {
    /// Time spent re-validating held models (ms)
    pub preservation_ms: f64,
    /// Time spent sampling new models (ms)
    pub sampling_ms: f64,
    /// Total round time (ms)
    pub total_ms: f64,
}

/// Telemetry of one construction round
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstructionReport {
    /// Iteration of the round
    pub iteration: usize,
    /// True if normalizations were pushed to the generator and models
    pub normalizations_updated: bool,
    /// Preservation pass statistics, `None` if the pass was skipped
    pub preservation: Option<PreservationStats>,
    /// Sampling pass statistics, `None` if no sampling was needed
    pub sampling: Option<SamplingStats>,
    /// Size of the new population
    pub population_size: usize,
    /// True if the population size is at or below the inconsistency threshold
    pub inconsistency_detected: bool,
    /// Timing information
    pub timing: ConstructionTiming,
}

impl ConstructionReport {
    /// Models kept from the previous round
    pub fn preserved(&self) -> usize {
        self.preservation.as_ref().map_or(0, |p| p.preserved)
    }

    /// Models newly accepted in this round
    pub fn accepted(&self) -> usize {
        self.sampling.as_ref().map_or(0, |s| s.accepted)
    }
}
