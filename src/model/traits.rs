//! Internal model traits
//!
//! This module defines the contract between the model constructor and the
//! preference model family it samples from.

use rand::Rng;

use crate::alternatives::alternative::Alternative;
use crate::criteria::normalization::Normalization;

/// An evaluable preference function
pub trait InternalModel: Send + Sync {
    /// Score an alternative
    fn evaluate(&self, alternative: &Alternative) -> f64;

    /// True if lower scores mean more preferred (distance-like models)
    fn is_less_preferred(&self) -> bool;

    /// Replace the per-criterion normalizations used during evaluation
    fn receive_normalizations(&mut self, normalizations: &[Normalization]);

    /// Check if `a` is strictly preferred to `b` under this model
    fn prefers(&self, a: &Alternative, b: &Alternative) -> bool {
        let (ea, eb) = (self.evaluate(a), self.evaluate(b));
        if self.is_less_preferred() {
            ea < eb
        } else {
            ea > eb
        }
    }
}

/// Draws candidate models for rejection sampling
///
/// The generator must draw all randomness from the supplied `rng`.
pub trait RandomModelGenerator: Send + Sync {
    /// The model family produced
    type Model: InternalModel + Clone;

    /// Number of criteria the generated models evaluate
    fn dimension(&self) -> usize;

    /// Draw one candidate model
    fn generate<R: Rng>(&self, rng: &mut R) -> Self::Model;

    /// Replace the normalizations handed to newly generated models
    fn receive_normalizations(&mut self, normalizations: &[Normalization]);
}
