//! The caller language for type arguments.
//!
//! Public entry points accept a convenient argument vocabulary rather than
//! raw `TypeNode`s: built-in names, literals, containers of subarguments,
//! user and remote type references, map field lists, and pre-built opaque
//! generators/validators. The normalizer rewrites these into well-formed
//! `TypeNode`s, failing with `BadArgument` for shapes not covered here.

use tygen_common::{Atom, GeneratorHandle, Term, ValidatorHandle};

/// One type argument in caller form.
#[derive(Clone, Debug)]
pub enum ArgSpec {
    /// An atom naming a built-in type (`int`, `atom`, ...).
    Builtin(Atom),
    /// A singleton literal.
    Literal(Term),
    /// A container wrapper with recursively rewritten subarguments.
    Container(ContainerKind, Vec<ArgSpec>),
    /// A map described by its fields.
    MapArg(Vec<MapArgField>),
    /// A named type of the module being queried.
    UserType(Atom, Vec<ArgSpec>),
    /// A fully qualified type of another module.
    RemoteType(Atom, Atom, Vec<ArgSpec>),
    /// A pre-built generator, usable where only generation is needed.
    Generator(GeneratorHandle),
    /// A pre-built validator, usable where only validation is needed.
    Validator(ValidatorHandle),
    /// A generator/validator pair, required by entry points that build both.
    Pair(GeneratorHandle, ValidatorHandle),
}

impl ArgSpec {
    pub fn builtin(name: &str) -> ArgSpec {
        ArgSpec::Builtin(Atom::new(name))
    }

    pub fn literal(term: Term) -> ArgSpec {
        ArgSpec::Literal(term)
    }

    pub fn list_of(elem: ArgSpec) -> ArgSpec {
        ArgSpec::Container(ContainerKind::List, vec![elem])
    }

    pub fn tuple_of(elems: Vec<ArgSpec>) -> ArgSpec {
        ArgSpec::Container(ContainerKind::Tuple, elems)
    }

    pub fn user(name: &str) -> ArgSpec {
        ArgSpec::UserType(Atom::new(name), Vec::new())
    }

    pub fn user_with(name: &str, args: Vec<ArgSpec>) -> ArgSpec {
        ArgSpec::UserType(Atom::new(name), args)
    }

    pub fn remote(module: &str, name: &str) -> ArgSpec {
        ArgSpec::RemoteType(Atom::new(module), Atom::new(name), Vec::new())
    }

    pub fn remote_with(module: &str, name: &str, args: Vec<ArgSpec>) -> ArgSpec {
        ArgSpec::RemoteType(Atom::new(module), Atom::new(name), args)
    }

    pub fn map_of(fields: Vec<MapArgField>) -> ArgSpec {
        ArgSpec::MapArg(fields)
    }
}

/// Container kinds accepted in tuple-argument form.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    List,
    NonemptyList,
    ImproperList,
    NonemptyImproperList,
    MaybeImproperList,
    NonemptyMaybeImproperList,
    Tuple,
}

/// One map field in caller form: `{k, v}` is required, `{optional, {k, v}}`
/// is optional.
#[derive(Clone, Debug)]
pub enum MapArgField {
    Required(ArgSpec, ArgSpec),
    Optional(ArgSpec, ArgSpec),
}
