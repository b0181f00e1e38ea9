//! Compatibility of internal models with elicited preferences
//!
//! A compatibility score is positive when a model reproduces a statement and
//! non-positive when the statement is violated or borderline. The analyzer
//! reduces a whole history to its most discriminative (minimum) score.

use std::fmt;

use super::traits::InternalModel;
use crate::preference::information::{PreferenceInformation, PreferenceInformationWrapper};

/// Per-statement compatibility scoring primitive
pub trait CompatibilityScore: Send + Sync {
    /// Score how well `model` agrees with one statement
    fn score(&self, preference: &PreferenceInformation, model: &dyn InternalModel) -> f64;
}

/// Signed margin by which the model ranks the preferred alternative first
///
/// For a ranking the score is the smallest margin over consecutive pairs.
#[derive(Clone, Copy, Debug, Default)]
pub struct SignedMargin;

impl CompatibilityScore for SignedMargin {
    fn score(&self, preference: &PreferenceInformation, model: &dyn InternalModel) -> f64 {
        preference
            .pairs()
            .into_iter()
            .map(|(preferred, other)| {
                let (p, o) = (model.evaluate(preferred), model.evaluate(other));
                if model.is_less_preferred() {
                    o - p
                } else {
                    p - o
                }
            })
            .fold(f64::INFINITY, f64::min)
    }
}

/// Scores models against a preference history
pub struct CompatibilityAnalyzer {
    scorer: Box<dyn CompatibilityScore>,
}

impl CompatibilityAnalyzer {
    /// Create an analyzer with a custom scoring primitive
    pub fn new(scorer: Box<dyn CompatibilityScore>) -> Self {
        Self { scorer }
    }

    /// Worst-case compatibility of `model` over `history`
    ///
    /// Returns `None` when there is nothing to check against.
    pub fn most_discriminative_compatibility(
        &self,
        history: &[PreferenceInformationWrapper],
        model: &dyn InternalModel,
    ) -> Option<f64> {
        history
            .iter()
            .map(|wrapper| self.scorer.score(&wrapper.preference_information, model))
            .reduce(f64::min)
    }
}

impl Default for CompatibilityAnalyzer {
    fn default() -> Self {
        Self::new(Box::new(SignedMargin))
    }
}

impl fmt::Debug for CompatibilityAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompatibilityAnalyzer").finish_non_exhaustive()
    }
}

/// Acceptance rule shared by preservation and sampling
pub fn is_compatible(compatibility: Option<f64>) -> bool {
    compatibility.map_or(true, |c| c > 0.0)
}
