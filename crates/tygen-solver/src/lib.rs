//! Type normalizer for the tygen type-generation engine.
//!
//! Turns a raw type reference into a canonical, recursion-aware AST ready
//! for interpretation by the generator and validator builders:
//! - caller-language argument rewriting (`rewrite_args`)
//! - definition selection and parameter substitution
//! - user-type inlining with self-reference markers
//! - union flattening
//! - recursion detection and base-case rewriting

pub mod rewrite;
pub use rewrite::{rewrite_arg, rewrite_args};

pub mod substitute;
pub use substitute::{assert_no_vars, substitute_params, substitute_vars};

pub mod inline;
pub use inline::inline_refs;

pub mod recursion;
pub use recursion::{contains_self, flatten_unions, prune_self};

pub mod normalize;
pub use normalize::{Normalized, Shape, normalize, normalize_def};

pub mod walk;
