//! Preference model construction
//!
//! The fast rejection sampling (FRS) constructor keeps a population of
//! internal models compatible with the collected preference statements.

pub mod frs;
pub mod report;

/// Prelude for convenient imports
pub mod prelude {
    pub use super::frs::{FastRejectionSampling, FrsBuilder, FrsConfig};
    pub use super::report::{ConstructionReport, ConstructionTiming, PreservationStats, SamplingStats};
}
