//! Alternative-set filters used by the refiner
//!
//! Termination filters decide whether a superset is fit for querying at all;
//! reduction filters shrink a fit superset into a reference set.

pub mod reduction;
pub mod termination;

/// Prelude for convenient imports
pub mod prelude {
    pub use super::reduction::{ReductionFilter, RemoveDominated, RemoveDuplicatesInOS};
    pub use super::termination::{RequiredSpread, SpreadThreshold, TerminationFilter, TerminationResult};
}
