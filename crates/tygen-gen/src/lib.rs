//! Generator builder for the tygen type-generation engine.
//!
//! Interprets a normalized type as a proptest strategy over terms. The
//! work happens in two stages:
//! - lowering (`plan`): all fallible work - remote resolution through the
//!   registry, protocol refusal, uninhabited/unsupported refusal, opaque
//!   handle splicing - producing a closed plan
//! - folding (`build`): the infallible translation of a plan into a boxed
//!   strategy; recursive shapes unfold depth-bounded from their base case

mod plan;

pub mod strategies;

mod build;
pub use build::{generator_for, node_generator};
