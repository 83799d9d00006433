//! Validator builder for the tygen type-generation engine.
//!
//! Mirrors the generator builder's two stages, predicate-wise:
//! - lowering (`check`): resolve references and aliases into a closed
//!   check tree, refusing the same inputs the generator refuses
//! - evaluation (`eval`): interpret the check tree as a total predicate;
//!   recursive types route their self-references back into the whole
//!   predicate, depth-bounded so pathological definitions stay total

mod check;

mod eval;
pub use eval::is_iolist;

mod build;
pub use build::{node_validator, validator_for};
