//! Named definitions and function signatures.

use crate::node::TypeNode;
use tygen_common::Atom;

/// A named, possibly parameterized type definition.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeDef {
    pub name: Atom,
    pub params: Vec<Atom>,
    pub body: TypeNode,
}

impl TypeDef {
    pub fn new(name: &str, params: Vec<&str>, body: TypeNode) -> TypeDef {
        TypeDef {
            name: Atom::new(name),
            params: params.into_iter().map(Atom::new).collect(),
            body,
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// One overload of a function's argument-and-return signature.
#[derive(Clone, Debug, PartialEq)]
pub struct FunSpec {
    pub args: Vec<TypeNode>,
    pub ret: TypeNode,
    /// Bounded type variables; each is substituted at its occurrences in
    /// `args` and `ret` before normalization.
    pub vars: Vec<(Atom, TypeNode)>,
}

impl FunSpec {
    pub fn new(args: Vec<TypeNode>, ret: TypeNode) -> FunSpec {
        FunSpec { args, ret, vars: Vec::new() }
    }

    pub fn with_vars(args: Vec<TypeNode>, ret: TypeNode, vars: Vec<(Atom, TypeNode)>) -> FunSpec {
        FunSpec { args, ret, vars }
    }

    pub fn arity(&self) -> u32 {
        self.args.len() as u32
    }
}
