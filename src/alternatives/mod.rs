//! Alternatives, alternative supersets and the numeric relations over them

pub mod alternative;
pub mod dominance;
pub mod superset;

/// Prelude for convenient imports
pub mod prelude {
    pub use super::alternative::Alternative;
    pub use super::dominance::{dominates, values_equal};
    pub use super::superset::AlternativesSuperset;
}
