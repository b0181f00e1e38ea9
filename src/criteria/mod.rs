//! Criteria definitions and per-criterion normalizations

pub mod criterion;
pub mod normalization;

/// Prelude for convenient imports
pub mod prelude {
    pub use super::criterion::{Criteria, Criterion};
    pub use super::normalization::Normalization;
}
