//! A candidate solution described by its performance vector

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ElicitResult, ElicitationError};

/// A named alternative with one performance value per criterion
///
/// The performance vector may be longer than the number of criteria; only
/// the leading `criteria.count()` values take part in refinement and
/// evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    name: String,
    performance_vector: Vec<f64>,
}

impl Alternative {
    /// Create a new alternative
    pub fn new(name: impl Into<String>, performance_vector: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            performance_vector,
        }
    }

    /// Alternative name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full performance vector
    pub fn performance_vector(&self) -> &[f64] {
        &self.performance_vector
    }

    /// Performance on criterion `id`
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range; contexts validate vector lengths
    /// against the criteria before any filter or model reads them.
    pub fn performance(&self, id: usize) -> f64 {
        self.performance_vector[id]
    }

    /// Check that the vector covers `criteria_count` criteria
    pub fn check_dimension(&self, criteria_count: usize) -> ElicitResult<()> {
        if self.performance_vector.len() < criteria_count {
            return Err(ElicitationError::DimensionMismatch {
                alternative: self.name.clone(),
                expected: criteria_count,
                actual: self.performance_vector.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.name, self.performance_vector)
    }
}
