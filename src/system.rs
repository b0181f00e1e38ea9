//! One decision iteration end to end
//!
//! `DecisionSupportSystem` wires the trigger, the refiner and the model
//! constructor around a caller-owned preference history. Each call to
//! [`run_iteration`](DecisionSupportSystem::run_iteration) performs, in
//! order: trigger check, refinement, elicitation, history update and model
//! construction.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::construction::frs::FastRejectionSampling;
use crate::construction::report::ConstructionReport;
use crate::context::DecisionContext;
use crate::error::ElicitResult;
use crate::model::traits::RandomModelGenerator;
use crate::preference::decision_maker::{DecisionMaker, DecisionMakerResponse};
use crate::preference::information::PreferenceHistory;
use crate::refiner::{Refiner, RefinerReport};
use crate::trigger::{InteractionTrigger, TriggerResult};

/// What happened to the elicitation in one iteration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElicitationOutcome {
    /// No rule fired
    NotTriggered,
    /// The refiner found the superset unfit for querying
    ReferenceSetRejected {
        /// Message of the terminating filter
        message: String,
    },
    /// The decision maker answered
    Completed {
        /// Number of statements appended to the history
        statements: usize,
    },
    /// The decision maker postponed the query
    Postponed {
        /// Reason given
        reason: String,
    },
    /// The query failed
    Failed {
        /// Reason given
        reason: String,
    },
}

/// Telemetry of one iteration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IterationReport {
    /// Iteration number
    pub iteration: usize,
    /// Trigger decision
    pub trigger: TriggerResult,
    /// Refinement result, if the trigger fired
    pub refinement: Option<RefinerReport>,
    /// Elicitation outcome
    pub elicitation: ElicitationOutcome,
    /// Construction round, if one ran
    pub construction: Option<ConstructionReport>,
}

/// Trigger, refiner and FRS constructor driven together
pub struct DecisionSupportSystem<G>
where
    G: RandomModelGenerator,
{
    trigger: InteractionTrigger,
    refiner: Refiner,
    constructor: FastRejectionSampling<G>,
    history: PreferenceHistory,
    constructed: bool,
}

impl<G> DecisionSupportSystem<G>
where
    G: RandomModelGenerator,
{
    /// Create a system with an empty preference history
    pub fn new(
        trigger: InteractionTrigger,
        refiner: Refiner,
        constructor: FastRejectionSampling<G>,
    ) -> Self {
        Self {
            trigger,
            refiner,
            constructor,
            history: PreferenceHistory::new(),
            constructed: false,
        }
    }

    /// Collected preference statements
    pub fn history(&self) -> &PreferenceHistory {
        &self.history
    }

    /// The model constructor
    pub fn constructor(&self) -> &FastRejectionSampling<G> {
        &self.constructor
    }

    /// Current model population
    pub fn models(&self) -> &[G::Model] {
        self.constructor.models()
    }

    /// Run one decision iteration
    ///
    /// A construction round runs after a completed elicitation, on the first
    /// call, and whenever the objective space changed.
    pub fn run_iteration<D, R>(
        &mut self,
        context: &DecisionContext,
        decision_maker: &mut D,
        rng: &mut R,
    ) -> ElicitResult<IterationReport>
    where
        D: DecisionMaker,
        R: Rng,
    {
        let trigger = self.trigger.check(context);
        let mut refinement = None;
        let elicitation = if trigger.should_elicit {
            let report = self.refiner.refine(context)?;
            let outcome = self.elicit(context, &report, decision_maker);
            refinement = Some(report);
            outcome
        } else {
            ElicitationOutcome::NotTriggered
        };

        let needs_construction = !self.constructed
            || context.objective_space_changed()
            || matches!(elicitation, ElicitationOutcome::Completed { .. });
        let construction = if needs_construction {
            self.constructed = true;
            Some(self.constructor.construct(context, &self.history, rng)?)
        } else {
            None
        };

        info!(
            iteration = context.iteration(),
            outcome = ?elicitation,
            history = self.history.len(),
            "decision iteration completed"
        );

        Ok(IterationReport {
            iteration: context.iteration(),
            trigger,
            refinement,
            elicitation,
            construction,
        })
    }

    fn elicit<D: DecisionMaker>(
        &mut self,
        context: &DecisionContext,
        refinement: &RefinerReport,
        decision_maker: &mut D,
    ) -> ElicitationOutcome {
        if !refinement.is_successful() {
            let message = refinement.termination_message.clone().unwrap_or_default();
            self.trigger
                .postpone(&message, context.iteration(), context.timestamp());
            return ElicitationOutcome::ReferenceSetRejected { message };
        }

        self.trigger.begin_elicitation(context);
        match decision_maker.elicit(context, &refinement.refined_alternatives) {
            DecisionMakerResponse::Statements(statements) => {
                let count = statements.len();
                self.history.extend(statements, context.iteration());
                self.trigger.end_elicitation(context);
                ElicitationOutcome::Completed { statements: count }
            }
            DecisionMakerResponse::Postponed { reason } => {
                self.trigger
                    .postpone(&reason, context.iteration(), context.timestamp());
                ElicitationOutcome::Postponed { reason }
            }
            DecisionMakerResponse::Failed { reason } => {
                self.trigger.elicitation_failed(context);
                ElicitationOutcome::Failed { reason }
            }
        }
    }
}
