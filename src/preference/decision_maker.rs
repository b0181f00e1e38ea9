//! Decision maker seam
//!
//! The core never polls a human. The caller (or [`DecisionSupportSystem`])
//! presents the reference set to a [`DecisionMaker`] and feeds its response
//! back in.
//!
//! [`DecisionSupportSystem`]: crate::system::DecisionSupportSystem

use std::cmp::Ordering;

use crate::alternatives::alternative::Alternative;
use crate::alternatives::superset::AlternativesSuperset;
use crate::context::DecisionContext;
use crate::model::traits::InternalModel;
use crate::preference::information::PreferenceInformation;

/// Answer of a decision maker to a query
#[derive(Clone, Debug, PartialEq)]
pub enum DecisionMakerResponse {
    /// Preference statements about the reference set
    Statements(Vec<PreferenceInformation>),
    /// The decision maker asked to be queried later
    Postponed {
        /// Why the query was postponed
        reason: String,
    },
    /// The query could not be answered
    Failed {
        /// Why the query failed
        reason: String,
    },
}

/// Black box returning preference statements about a reference set
pub trait DecisionMaker {
    /// Answer a query about `reference_set`
    fn elicit(
        &mut self,
        context: &DecisionContext,
        reference_set: &AlternativesSuperset,
    ) -> DecisionMakerResponse;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QueryStyle {
    Pairwise { max_pairs: usize },
    Ranking,
}

/// Simulated decision maker answering with a hidden internal model
#[derive(Clone, Debug)]
pub struct ArtificialDecisionMaker<M: InternalModel> {
    model: M,
    style: QueryStyle,
}

impl<M: InternalModel> ArtificialDecisionMaker<M> {
    /// Compare up to `max_pairs` consecutive pairs of the reference set
    pub fn pairwise(model: M, max_pairs: usize) -> Self {
        Self {
            model,
            style: QueryStyle::Pairwise {
                max_pairs: max_pairs.max(1),
            },
        }
    }

    /// Rank the whole reference set
    ///
    /// Tied alternatives split the answer into several strict rankings.
    pub fn ranking(model: M) -> Self {
        Self {
            model,
            style: QueryStyle::Ranking,
        }
    }

    /// The hidden model
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Sort best first and split at ties into strictly ordered runs
    ///
    /// Runs of a single alternative carry no preference and are dropped.
    fn strict_rankings(&self, reference_set: &AlternativesSuperset) -> Vec<PreferenceInformation> {
        let mut ranked = reference_set.as_slice().to_vec();
        ranked.sort_by(|a, b| self.compare(a, b));

        let mut runs: Vec<Vec<Alternative>> = Vec::new();
        let mut current: Vec<Alternative> = Vec::new();
        for alternative in ranked {
            let tied = current
                .last()
                .is_some_and(|last| self.compare(last, &alternative) != Ordering::Less);
            if tied {
                runs.push(std::mem::take(&mut current));
            }
            current.push(alternative);
        }
        runs.push(current);

        runs.into_iter()
            .filter(|run| run.len() >= 2)
            .map(PreferenceInformation::Ranking)
            .collect()
    }

    fn compare(&self, a: &Alternative, b: &Alternative) -> Ordering {
        let (ea, eb) = (self.model.evaluate(a), self.model.evaluate(b));
        let ordering = ea.partial_cmp(&eb).unwrap_or(Ordering::Equal);
        if self.model.is_less_preferred() {
            ordering
        } else {
            ordering.reverse()
        }
    }
}

impl<M: InternalModel> DecisionMaker for ArtificialDecisionMaker<M> {
    fn elicit(
        &mut self,
        _context: &DecisionContext,
        reference_set: &AlternativesSuperset,
    ) -> DecisionMakerResponse {
        if reference_set.size() < 2 {
            return DecisionMakerResponse::Failed {
                reason: format!(
                    "at least two alternatives are needed, got {}",
                    reference_set.size()
                ),
            };
        }

        let statements = match self.style {
            QueryStyle::Pairwise { max_pairs } => reference_set
                .as_slice()
                .windows(2)
                .take(max_pairs)
                .filter_map(|pair| match self.compare(&pair[0], &pair[1]) {
                    Ordering::Less => Some(PreferenceInformation::pairwise(
                        pair[0].clone(),
                        pair[1].clone(),
                    )),
                    Ordering::Greater => Some(PreferenceInformation::pairwise(
                        pair[1].clone(),
                        pair[0].clone(),
                    )),
                    Ordering::Equal => None,
                })
                .collect(),
            QueryStyle::Ranking => self.strict_rankings(reference_set),
        };

        if statements.is_empty() {
            DecisionMakerResponse::Postponed {
                reason: "the compared alternatives are indifferent".to_string(),
            }
        } else {
            DecisionMakerResponse::Statements(statements)
        }
    }
}
