//! Preference statements, their history, and the decision maker seam

pub mod decision_maker;
pub mod information;

/// Prelude for convenient imports
pub mod prelude {
    pub use super::decision_maker::{ArtificialDecisionMaker, DecisionMaker, DecisionMakerResponse};
    pub use super::information::{
        PreferenceHistory, PreferenceInformation, PreferenceInformationWrapper,
    };
}
