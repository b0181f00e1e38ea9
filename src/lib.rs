//! # pref-elicit
//!
//! Interactive preference elicitation for evolutionary multi-objective
//! optimization.
//!
//! An optimizer runs undisturbed while three components decide when and how
//! the decision maker is consulted:
//!
//! - **Interaction trigger**: rules deciding whether to query on this iteration
//! - **Refiner**: termination and reduction filters turning the current
//!   alternatives superset into a small reference set
//! - **Fast rejection sampling**: maintains a population of preference models
//!   compatible with every statement collected so far
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pref_elicit::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let config = ElicitationConfig::from_json(&std::fs::read_to_string("elicitation.json")?)?;
//! let (trigger, _flags) = config.build_trigger()?;
//! let mut dss = DecisionSupportSystem::new(
//!     trigger,
//!     config.build_refiner()?,
//!     config.build_constructor(LNormGenerator::linear(vec![0.0, 0.0])?)?,
//! );
//!
//! let context = DecisionContext::builder()
//!     .iteration(generation)
//!     .criteria(Criteria::costs(2)?)
//!     .alternatives(AlternativesSuperset::from_vectors(front))
//!     .build()?;
//! let report = dss.run_iteration(&context, &mut decision_maker, &mut rng)?;
//! ```

pub mod alternatives;
pub mod config;
pub mod construction;
pub mod context;
pub mod criteria;
pub mod error;
pub mod filter;
pub mod model;
pub mod preference;
pub mod refiner;
pub mod system;
pub mod trigger;

/// Default tolerance for objective-space equality checks
pub const DEFAULT_EPSILON: f64 = 1.0e-10;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::alternatives::prelude::*;
    pub use crate::config::{ElicitationConfig, RefinerConfig, RuleConfig};
    pub use crate::construction::prelude::*;
    pub use crate::context::{DecisionContext, DecisionContextBuilder};
    pub use crate::criteria::prelude::*;
    pub use crate::error::*;
    pub use crate::filter::prelude::*;
    pub use crate::model::prelude::*;
    pub use crate::preference::prelude::*;
    pub use crate::refiner::{
        FilterOutcome, Refiner, RefinerBuilder, RefinerReport, RefinerStatus, StageTimings,
    };
    pub use crate::system::{DecisionSupportSystem, ElicitationOutcome, IterationReport};
    pub use crate::trigger::prelude::*;
    pub use crate::DEFAULT_EPSILON;
}
