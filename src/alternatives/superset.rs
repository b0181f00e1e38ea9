//! Ordered collections of alternatives

use serde::{Deserialize, Serialize};

use super::alternative::Alternative;
use crate::error::ElicitResult;

/// Ordered collection of alternatives
///
/// Insertion order is significant: filters preserve it so that refinement is
/// reproducible. `Clone` is a deep copy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AlternativesSuperset {
    alternatives: Vec<Alternative>,
}

impl AlternativesSuperset {
    /// Create a superset from alternatives
    pub fn new(alternatives: Vec<Alternative>) -> Self {
        Self { alternatives }
    }

    /// Create a superset from raw vectors, naming them `A0, A1, ...`
    pub fn from_vectors(vectors: Vec<Vec<f64>>) -> Self {
        Self::new(
            vectors
                .into_iter()
                .enumerate()
                .map(|(i, v)| Alternative::new(format!("A{i}"), v))
                .collect(),
        )
    }

    /// Number of alternatives
    pub fn size(&self) -> usize {
        self.alternatives.len()
    }

    /// Check if the superset is empty
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// Get an alternative by index
    pub fn get(&self, index: usize) -> Option<&Alternative> {
        self.alternatives.get(index)
    }

    /// Append an alternative
    pub fn push(&mut self, alternative: Alternative) {
        self.alternatives.push(alternative);
    }

    /// Iterate over alternatives in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Alternative> {
        self.alternatives.iter()
    }

    /// Alternatives as a slice
    pub fn as_slice(&self) -> &[Alternative] {
        &self.alternatives
    }

    /// Names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.alternatives.iter().map(|a| a.name()).collect()
    }

    /// Consume into the underlying vector
    pub fn into_vec(self) -> Vec<Alternative> {
        self.alternatives
    }

    /// Check every alternative covers `criteria_count` criteria
    pub fn check_dimensions(&self, criteria_count: usize) -> ElicitResult<()> {
        self.alternatives
            .iter()
            .try_for_each(|a| a.check_dimension(criteria_count))
    }
}

impl From<Vec<Alternative>> for AlternativesSuperset {
    fn from(alternatives: Vec<Alternative>) -> Self {
        Self::new(alternatives)
    }
}

impl FromIterator<Alternative> for AlternativesSuperset {
    fn from_iter<I: IntoIterator<Item = Alternative>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AlternativesSuperset {
    type Item = &'a Alternative;
    type IntoIter = std::slice::Iter<'a, Alternative>;

    fn into_iter(self) -> Self::IntoIter {
        self.alternatives.iter()
    }
}
