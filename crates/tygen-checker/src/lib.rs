//! Spec checker for the tygen type-generation engine.
//!
//! For a function registered with argument and return types, drives a
//! bounded randomized campaign: draw argument tuples, invoke the callable,
//! assert the return inhabits the declared return type. Overloads are
//! checked independently and aggregated.

pub mod report;
pub use report::{CheckConfig, SpecFailure, SpecMeta, SpecReport};

mod checker;
pub use checker::{check_spec, check_spec_with};
