//! Elicited preference statements
//!
//! Statements are tagged with the iteration in which they were collected and
//! kept in an append-only [`PreferenceHistory`].

use serde::{Deserialize, Serialize};

use crate::alternatives::alternative::Alternative;
use crate::error::{ElicitResult, ElicitationError};

/// A single preference statement made by the decision maker
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PreferenceInformation {
    /// `preferred` is preferred to `other`
    Pairwise {
        /// The better alternative
        preferred: Alternative,
        /// The worse alternative
        other: Alternative,
    },
    /// Alternatives ordered from best to worst
    Ranking(Vec<Alternative>),
}

impl PreferenceInformation {
    /// Create a pairwise comparison
    pub fn pairwise(preferred: Alternative, other: Alternative) -> Self {
        Self::Pairwise { preferred, other }
    }

    /// Create a ranking (best first); at least two alternatives are required
    pub fn ranking(alternatives: Vec<Alternative>) -> ElicitResult<Self> {
        if alternatives.len() < 2 {
            return Err(ElicitationError::Configuration(format!(
                "a ranking needs at least two alternatives, got {}",
                alternatives.len()
            )));
        }
        Ok(Self::Ranking(alternatives))
    }

    /// The statement decomposed into (preferred, other) pairs
    ///
    /// A ranking yields its consecutive pairs.
    pub fn pairs(&self) -> Vec<(&Alternative, &Alternative)> {
        match self {
            Self::Pairwise { preferred, other } => vec![(preferred, other)],
            Self::Ranking(ranked) => ranked.windows(2).map(|w| (&w[0], &w[1])).collect(),
        }
    }
}

/// A statement tagged with the iteration it was collected in
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreferenceInformationWrapper {
    /// The statement
    pub preference_information: PreferenceInformation,
    /// Iteration of collection
    pub iteration: usize,
}

impl PreferenceInformationWrapper {
    /// Wrap a statement
    pub fn new(preference_information: PreferenceInformation, iteration: usize) -> Self {
        Self {
            preference_information,
            iteration,
        }
    }
}

/// Append-only, ordered log of preference statements
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceHistory {
    statements: Vec<PreferenceInformationWrapper>,
}

impl PreferenceHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a statement collected in `iteration`
    pub fn push(&mut self, information: PreferenceInformation, iteration: usize) {
        self.statements
            .push(PreferenceInformationWrapper::new(information, iteration));
    }

    /// Append several statements collected in `iteration`
    pub fn extend(&mut self, information: impl IntoIterator<Item = PreferenceInformation>, iteration: usize) {
        for info in information {
            self.push(info, iteration);
        }
    }

    /// All statements in collection order
    pub fn statements(&self) -> &[PreferenceInformationWrapper] {
        &self.statements
    }

    /// Statements appended after the first `mark` entries
    pub fn since(&self, mark: usize) -> &[PreferenceInformationWrapper] {
        &self.statements[mark.min(self.statements.len())..]
    }

    /// Number of statements
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check if the history is empty
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Iteration of the most recent statement
    pub fn latest_iteration(&self) -> Option<usize> {
        self.statements.last().map(|s| s.iteration)
    }
}
