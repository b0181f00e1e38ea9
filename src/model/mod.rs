//! Internal preference models
//!
//! An internal model is one concrete parameterization of the decision
//! maker's utility function. The constructor only relies on the
//! [`InternalModel`] contract; [`lnorm`] provides a reference family.

pub mod compatibility;
pub mod lnorm;
pub mod traits;

/// Prelude for convenient imports
pub mod prelude {
    pub use super::compatibility::{
        is_compatible, CompatibilityAnalyzer, CompatibilityScore, SignedMargin,
    };
    pub use super::lnorm::{LNormGenerator, LNormModel};
    pub use super::traits::{InternalModel, RandomModelGenerator};
}
