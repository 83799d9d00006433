//! tygen: structural-type-driven value generators, membership validators,
//! and spec checking.
//!
//! Given a module's named type definitions, tygen derives:
//! - a randomized generator of well-typed sample terms ([`from_type`])
//! - a total membership predicate ([`validator_for_type`])
//! - a property-based campaign over a function's argument and return
//!   types ([`validate`])
//!
//! Types are described with the caller language of [`ArgSpec`]; modules
//! are registered through [`StaticModules`] (or any [`ModuleSource`]).
//!
//! ```
//! use tygen::{ArgSpec, Atom, Registry, StaticModule, StaticModules, TypeDef, TypeNode};
//!
//! let mut modules = StaticModules::new();
//! modules.add(StaticModule::new("m").with_type(TypeDef::new(
//!     "pair",
//!     vec![],
//!     TypeNode::tuple(vec![TypeNode::Atom, TypeNode::Int]),
//! )));
//! let reg = Registry::from_source(modules);
//!
//! let generator = tygen::from_type(&reg, Atom::new("m"), Atom::new("pair"), &[]).unwrap();
//! let validator = tygen::validator_for_type(&reg, Atom::new("m"), Atom::new("pair"), &[]).unwrap();
//! for term in generator.sample(8).unwrap() {
//!     assert!(validator.check(&term));
//! }
//! ```

mod api;
pub use api::{from_type, from_type_with_validator, validate, validate_with, validator_for_type};

pub use tygen_ast::{ArgSpec, ContainerKind, FunSpec, MapArgField, MapField, OpaqueType, TypeDef, TypeNode};
pub use tygen_checker::{CheckConfig, SpecFailure, SpecMeta, SpecReport};
pub use tygen_common::{
    Atom, Bits, Error, ErrorKind, GeneratorHandle, Term, TermMap, ValidatorHandle,
};
pub use tygen_registry::{
    CallResult, ModuleSource, NativeFun, Raise, Registry, StaticModule, StaticModules,
};

// The underlying crates, for callers that need the pipeline pieces.
pub use tygen_gen::strategies;
pub use tygen_solver as solver;
pub use tygen_valid as valid;
