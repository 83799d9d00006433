//! The module-discovery collaborator.

use std::fmt;
use std::sync::Arc;
use tygen_ast::{FunSpec, TypeDef};
use tygen_common::{Atom, Error, Term};

/// A raised exception from a registered callable. During spec-check
/// campaigns raises are absorbed, never surfaced as build errors.
#[derive(Clone, Debug)]
pub struct Raise {
    pub reason: String,
}

impl Raise {
    pub fn new(reason: impl Into<String>) -> Raise {
        Raise { reason: reason.into() }
    }
}

impl fmt::Display for Raise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "** raised: {}", self.reason)
    }
}

/// What a callable invocation produced.
pub type CallResult = Result<Term, Raise>;

/// A function-like callable registered for spec checking.
pub type NativeFun = Arc<dyn Fn(&[Term]) -> CallResult + Send + Sync>;

/// Discovery interface for named types, function signatures, and
/// callables, scoped by module.
pub trait ModuleSource: Send + Sync {
    /// All named type definitions of `module`. `UnknownModule` when the
    /// module cannot be located.
    fn lookup_types(&self, module: Atom) -> Result<Vec<TypeDef>, Error>;

    /// Every overload signature of `module.name/arity`. An empty list
    /// means the function exists without a spec (or not at all); the spec
    /// checker turns that into `MissingSpec`.
    fn lookup_specs(&self, module: Atom, name: Atom, arity: u32) -> Result<Vec<FunSpec>, Error>;

    /// The callable behind `module.name/arity`.
    fn lookup_fun(&self, module: Atom, name: Atom, arity: u32) -> Result<NativeFun, Error>;

    /// Whether `module` names a protocol (an open dispatch surface whose
    /// inhabitants cannot be sampled).
    fn is_protocol(&self, module: Atom) -> bool;
}
