//! Per-criterion normalization functions
//!
//! A normalization maps a raw criterion value into a comparable range.
//! Normalizations are supplied 1:1 with criteria and may change between
//! iterations when the objective space moves.

use serde::{Deserialize, Serialize};

use crate::alternatives::superset::AlternativesSuperset;
use crate::criteria::criterion::Criteria;
use crate::error::ElicitResult;
use crate::DEFAULT_EPSILON;

/// Normalization of a single criterion
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Normalization {
    /// Raw values are used directly
    Identity,
    /// Linear rescaling so that `min` maps to 0 and `max` maps to 1
    Linear {
        /// Value mapped to 0
        min: f64,
        /// Value mapped to 1
        max: f64,
    },
}

impl Default for Normalization {
    fn default() -> Self {
        Self::Identity
    }
}

impl Normalization {
    /// Create a linear min-max normalization
    pub fn linear(min: f64, max: f64) -> Self {
        Self::Linear { min, max }
    }

    /// Normalize a raw value
    ///
    /// A degenerate linear range (`|max - min| < DEFAULT_EPSILON`) maps every
    /// value to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        match *self {
            Self::Identity => value,
            Self::Linear { min, max } => {
                let range = max - min;
                if range.abs() < DEFAULT_EPSILON {
                    0.0
                } else {
                    (value - min) / range
                }
            }
        }
    }

    /// Build one linear normalization per criterion from the superset's bounds
    ///
    /// Returns identity normalizations for an empty superset. Fails when a
    /// performance vector is shorter than the criteria count.
    pub fn from_superset(
        criteria: &Criteria,
        superset: &AlternativesSuperset,
    ) -> ElicitResult<Vec<Self>> {
        superset.check_dimensions(criteria.count())?;
        Ok((0..criteria.count())
            .map(|c| {
                let mut values = superset.iter().map(|a| a.performance(c));
                match values.next() {
                    None => Self::Identity,
                    Some(first) => {
                        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
                        Self::linear(min, max)
                    }
                }
            })
            .collect())
    }
}

/// Apply optional normalizations to the first `count` values of a vector
///
/// When `normalizations` is `None` the raw values are returned.
pub fn normalize_values(
    values: &[f64],
    normalizations: Option<&[Normalization]>,
    count: usize,
) -> Vec<f64> {
    match normalizations {
        Some(norms) => values
            .iter()
            .take(count)
            .zip(norms.iter())
            .map(|(&v, n)| n.normalize(v))
            .collect(),
        None => values.iter().take(count).copied().collect(),
    }
}
