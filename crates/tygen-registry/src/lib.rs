//! Type registry collaborator for the tygen type-generation engine.
//!
//! This crate provides:
//! - `ModuleSource` - the trait through which type definitions, function
//!   signatures, callables, and the protocol predicate are discovered
//! - `Registry` - per-module memoization over a source; population is
//!   idempotent under concurrent first access
//! - `StaticModules` - an in-memory source with a builder, used both as
//!   the test double and as the way embedders register modules

pub mod source;
pub use source::{CallResult, ModuleSource, NativeFun, Raise};

pub mod registry;
pub use registry::{ModuleTypes, Registry};

pub mod static_modules;
pub use static_modules::{StaticModule, StaticModules};
