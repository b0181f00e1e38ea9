//! Criterion and criteria collections
//!
//! A criterion is one objective dimension. Criteria are immutable once built
//! and their ids always equal their position (0-based, contiguous).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ElicitResult, ElicitationError};

/// A single objective dimension
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Criterion {
    name: String,
    is_gain: bool,
    id: usize,
}

impl Criterion {
    /// Create a new criterion
    pub fn new(id: usize, name: impl Into<String>, is_gain: bool) -> Self {
        Self {
            name: name.into(),
            is_gain,
            id,
        }
    }

    /// Criterion name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if larger values are better
    pub fn is_gain(&self) -> bool {
        self.is_gain
    }

    /// Stable 0-based index of the criterion
    pub fn id(&self) -> usize {
        self.id
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.is_gain { "gain" } else { "cost" };
        write!(f, "{} ({}, id = {})", self.name, direction, self.id)
    }
}

/// Ordered, fixed-size collection of criteria
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Criterion>", into = "Vec<Criterion>")]
pub struct Criteria {
    criteria: Vec<Criterion>,
}

impl Criteria {
    /// Create a criteria collection, checking that ids are contiguous and 0-based
    pub fn new(criteria: Vec<Criterion>) -> ElicitResult<Self> {
        if criteria.is_empty() {
            return Err(ElicitationError::configuration(
                "the criteria collection is empty",
            ));
        }
        for (index, criterion) in criteria.iter().enumerate() {
            if criterion.id != index {
                return Err(ElicitationError::Configuration(format!(
                    "criterion {} has id {} but is stored at position {}",
                    criterion.name, criterion.id, index
                )));
            }
        }
        Ok(Self { criteria })
    }

    /// Build criteria named `C0, C1, ...` from a list of gain flags
    pub fn from_directions(gains: &[bool]) -> ElicitResult<Self> {
        Self::new(
            gains
                .iter()
                .enumerate()
                .map(|(id, &is_gain)| Criterion::new(id, format!("C{id}"), is_gain))
                .collect(),
        )
    }

    /// `count` cost criteria (smaller is better)
    pub fn costs(count: usize) -> ElicitResult<Self> {
        Self::from_directions(&vec![false; count])
    }

    /// `count` gain criteria (larger is better)
    pub fn gains(count: usize) -> ElicitResult<Self> {
        Self::from_directions(&vec![true; count])
    }

    /// Number of criteria (objectives)
    pub fn count(&self) -> usize {
        self.criteria.len()
    }

    /// Get a criterion by id
    pub fn get(&self, id: usize) -> Option<&Criterion> {
        self.criteria.get(id)
    }

    /// Iterate over criteria in id order
    pub fn iter(&self) -> std::slice::Iter<'_, Criterion> {
        self.criteria.iter()
    }

    /// Gain flags in id order
    pub fn directions(&self) -> Vec<bool> {
        self.criteria.iter().map(|c| c.is_gain).collect()
    }
}

impl TryFrom<Vec<Criterion>> for Criteria {
    type Error = ElicitationError;

    fn try_from(criteria: Vec<Criterion>) -> Result<Self, Self::Error> {
        Self::new(criteria)
    }
}

impl From<Criteria> for Vec<Criterion> {
    fn from(criteria: Criteria) -> Self {
        criteria.criteria
    }
}

impl<'a> IntoIterator for &'a Criteria {
    type Item = &'a Criterion;
    type IntoIter = std::slice::Iter<'a, Criterion>;

    fn into_iter(self) -> Self::IntoIter {
        self.criteria.iter()
    }
}
