//! Weighted L-p norm models
//!
//! An `LNormModel` scores an alternative by its weighted L-p distance to an
//! ideal point, measured in normalized space:
//!
//! ```text
//! d(x) = ( Σ_i w_i · |n_i(x_i) − n_i(z_i)|^p )^(1/p)
//! ```
//!
//! With `p = ∞` this is the weighted Chebyshev distance `max_i w_i · |…|`.
//! Smaller distances are better.

use rand::Rng;
use rand_distr::{Distribution, Exp1};
use serde::{Deserialize, Serialize};

use super::traits::{InternalModel, RandomModelGenerator};
use crate::alternatives::alternative::Alternative;
use crate::criteria::normalization::Normalization;
use crate::error::{ElicitResult, ElicitationError};

/// Weighted distance-to-ideal model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LNormModel {
    weights: Vec<f64>,
    ideal: Vec<f64>,
    power: f64,
    normalizations: Option<Vec<Normalization>>,
}

impl LNormModel {
    /// Create a model from weights, an ideal point (raw values) and a power `p >= 1`
    pub fn new(weights: Vec<f64>, ideal: Vec<f64>, power: f64) -> ElicitResult<Self> {
        validate_parameters(weights.len(), &ideal, power)?;
        if weights.iter().any(|w| *w < 0.0 || !w.is_finite()) {
            return Err(ElicitationError::configuration(
                "L-norm weights must be finite and non-negative",
            ));
        }
        Ok(Self {
            weights,
            ideal,
            power,
            normalizations: None,
        })
    }

    /// Attach normalizations at construction
    pub fn with_normalizations(mut self, normalizations: Vec<Normalization>) -> Self {
        self.normalizations = Some(normalizations);
        self
    }

    /// Model weights
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The norm power
    pub fn power(&self) -> f64 {
        self.power
    }

    fn normalized(&self, id: usize, value: f64) -> f64 {
        match self.normalizations.as_ref().and_then(|n| n.get(id)) {
            Some(n) => n.normalize(value),
            None => value,
        }
    }
}

impl InternalModel for LNormModel {
    fn evaluate(&self, alternative: &Alternative) -> f64 {
        let distances = alternative
            .performance_vector()
            .iter()
            .zip(self.ideal.iter())
            .zip(self.weights.iter())
            .enumerate()
            .map(|(id, ((&x, &z), &w))| {
                (w, (self.normalized(id, x) - self.normalized(id, z)).abs())
            });

        if self.power.is_infinite() {
            distances.map(|(w, d)| w * d).fold(0.0, f64::max)
        } else {
            distances
                .map(|(w, d)| w * d.powf(self.power))
                .sum::<f64>()
                .powf(1.0 / self.power)
        }
    }

    fn is_less_preferred(&self) -> bool {
        true
    }

    fn receive_normalizations(&mut self, normalizations: &[Normalization]) {
        self.normalizations = Some(normalizations.to_vec());
    }
}

/// Generates L-norm models with weights drawn uniformly from the simplex
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LNormGenerator {
    ideal: Vec<f64>,
    power: f64,
    normalizations: Option<Vec<Normalization>>,
}

impl LNormGenerator {
    /// Create a generator for models sharing `ideal` and `power`
    pub fn new(ideal: Vec<f64>, power: f64) -> ElicitResult<Self> {
        validate_parameters(ideal.len(), &ideal, power)?;
        Ok(Self {
            ideal,
            power,
            normalizations: None,
        })
    }

    /// Weighted-sum style generator (`p = 1`)
    pub fn linear(ideal: Vec<f64>) -> ElicitResult<Self> {
        Self::new(ideal, 1.0)
    }

    /// Chebyshev generator (`p = ∞`)
    pub fn chebyshev(ideal: Vec<f64>) -> ElicitResult<Self> {
        Self::new(ideal, f64::INFINITY)
    }

    /// Draw a weight vector uniformly from the unit simplex
    ///
    /// Normalized i.i.d. exponential samples are Dirichlet(1, ..., 1).
    pub fn sample_weights<R: Rng>(dimension: usize, rng: &mut R) -> Vec<f64> {
        let raw: Vec<f64> = (0..dimension).map(|_| Exp1.sample(&mut *rng)).collect();
        let total: f64 = raw.iter().sum();
        if total <= 0.0 {
            return vec![1.0 / dimension as f64; dimension];
        }
        raw.into_iter().map(|w: f64| w / total).collect()
    }
}

impl RandomModelGenerator for LNormGenerator {
    type Model = LNormModel;

    fn dimension(&self) -> usize {
        self.ideal.len()
    }

    fn generate<R: Rng>(&self, rng: &mut R) -> Self::Model {
        LNormModel {
            weights: Self::sample_weights(self.ideal.len(), rng),
            ideal: self.ideal.clone(),
            power: self.power,
            normalizations: self.normalizations.clone(),
        }
    }

    fn receive_normalizations(&mut self, normalizations: &[Normalization]) {
        self.normalizations = Some(normalizations.to_vec());
    }
}

fn validate_parameters(dimension: usize, ideal: &[f64], power: f64) -> ElicitResult<()> {
    if ideal.is_empty() {
        return Err(ElicitationError::configuration("the ideal point is empty"));
    }
    if dimension != ideal.len() {
        return Err(ElicitationError::Configuration(format!(
            "expected {} ideal point values, got {}",
            dimension,
            ideal.len()
        )));
    }
    if power.is_nan() || power < 1.0 {
        return Err(ElicitationError::Configuration(format!(
            "the L-norm power must be >= 1, got {power}"
        )));
    }
    Ok(())
}
