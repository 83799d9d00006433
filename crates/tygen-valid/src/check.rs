//! Lowering of normalized types into closed check trees.
//!
//! The same resolution the generator's lowering performs, producing a
//! predicate-shaped tree instead: map fields are partitioned into exact
//! (literal-key required) and general (open) checks, references become
//! embedded sub-validators, and `SelfRef` marks the recursion holes.

use crate::build::validator_with_depth;
use tygen_ast::{MapField, TypeNode};
use tygen_common::limits::MAX_REMOTE_DEPTH;
use tygen_common::{Atom, Error, Term, ValidatorHandle};
use tygen_registry::Registry;

#[derive(Clone, Debug)]
pub(crate) enum Check {
    Any,
    AtomName,
    Int,
    PosInt,
    NegInt,
    NonNegInt,
    Float,
    Bool,
    Ref,
    Bitstring,
    Binary,
    BinaryPattern(u32, u32),
    Lit(Term),
    IntRange(i64, i64),
    Nil,
    List { elem: Box<Check>, nonempty: bool },
    Improper { head: Box<Check>, tail: Box<Check>, nonempty: bool, maybe: bool },
    Tuple(Vec<Check>),
    TupleAny,
    Map { exact: Vec<(Term, Check)>, general: Vec<GeneralField> },
    MapAny,
    EmptyMap,
    Union(Vec<Check>),
    Iolist,
    Iodata,
    /// Hole routed back into the whole predicate.
    SelfRef,
    /// A resolved reference or caller-provided validator.
    External(ValidatorHandle),
}

#[derive(Clone, Debug)]
pub(crate) enum GeneralField {
    /// At least one remaining entry must match key and value.
    Required(Check, Check),
    /// Every remaining entry whose key matches must have a matching value.
    Optional(Check, Check),
}

pub(crate) struct Lowerer<'r> {
    pub reg: &'r Registry,
    pub module: Atom,
    pub depth: u32,
}

impl<'r> Lowerer<'r> {
    pub fn new(reg: &'r Registry, module: Atom, depth: u32) -> Lowerer<'r> {
        Lowerer { reg, module, depth }
    }

    pub fn lower(&self, node: &TypeNode, self_name: Option<Atom>) -> Result<Check, Error> {
        match node {
            TypeNode::Any => Ok(Check::Any),
            TypeNode::None => Err(Error::no_inhabitants("none()")),
            TypeNode::Atom => Ok(Check::AtomName),
            TypeNode::AtomLit(a) => Ok(Check::Lit(Term::Atom(*a))),
            TypeNode::Int => Ok(Check::Int),
            TypeNode::PosInt => Ok(Check::PosInt),
            TypeNode::NegInt => Ok(Check::NegInt),
            TypeNode::NonNegInt => Ok(Check::NonNegInt),
            TypeNode::IntLit(n) => Ok(Check::Lit(Term::Int(*n))),
            TypeNode::Range(lo, hi) => {
                if lo > hi {
                    return Err(Error::bad_argument(format!("empty range {lo}..{hi}")));
                }
                Ok(Check::IntRange(*lo, *hi))
            }
            TypeNode::Float => Ok(Check::Float),
            TypeNode::Bool => Ok(Check::Bool),
            TypeNode::Byte | TypeNode::Arity => Ok(Check::IntRange(0, 255)),
            TypeNode::Char => Ok(Check::IntRange(0, 0x10FFFF)),
            TypeNode::Bitstring => Ok(Check::Bitstring),
            TypeNode::Binary => Ok(Check::Binary),
            TypeNode::BinaryPattern(size, unit) => Ok(Check::BinaryPattern(*size, *unit)),
            TypeNode::Ref => Ok(Check::Ref),
            TypeNode::Nil => Ok(Check::Nil),
            TypeNode::List(t) => Ok(Check::List {
                elem: Box::new(self.lower(t, self_name)?),
                nonempty: false,
            }),
            TypeNode::NonemptyList(t) => Ok(Check::List {
                elem: Box::new(self.lower(t, self_name)?),
                nonempty: true,
            }),
            TypeNode::ImproperList(h, t) => self.improper(h, t, self_name, true, false),
            TypeNode::NonemptyImproperList(h, t) => self.improper(h, t, self_name, true, false),
            TypeNode::MaybeImproperList(h, t) => self.improper(h, t, self_name, false, true),
            TypeNode::NonemptyMaybeImproperList(h, t) => {
                self.improper(h, t, self_name, true, true)
            }
            TypeNode::Tuple(elems) => Ok(Check::Tuple(
                elems
                    .iter()
                    .map(|e| self.lower(e, self_name))
                    .collect::<Result<Vec<_>, Error>>()?,
            )),
            TypeNode::TupleAny => Ok(Check::TupleAny),
            TypeNode::Map(fields) => self.lower_map(fields, self_name),
            TypeNode::MapAny => Ok(Check::MapAny),
            TypeNode::EmptyMap => Ok(Check::EmptyMap),
            TypeNode::Union(alts) => Ok(Check::Union(
                alts.iter()
                    .map(|a| self.lower(a, self_name))
                    .collect::<Result<Vec<_>, Error>>()?,
            )),
            TypeNode::UserRef { name, .. } if Some(*name) == self_name => Ok(Check::SelfRef),
            TypeNode::UserRef { name, args } => {
                let handle =
                    validator_with_depth(self.reg, self.module, *name, args.clone(), self.next_depth()?)?;
                Ok(Check::External(handle))
            }
            TypeNode::RemoteRef { module, name, args } => {
                if self.reg.is_protocol(*module) {
                    return Err(Error::protocol(*module));
                }
                tracing::debug!("resolving remote reference {}.{}", module, name);
                let handle =
                    validator_with_depth(self.reg, *module, *name, args.clone(), self.next_depth()?)?;
                Ok(Check::External(handle))
            }
            TypeNode::Var(name) => Err(Error::bad_argument(format!(
                "unsubstituted type variable {name}"
            ))),
            TypeNode::Charlist | TypeNode::Str => Ok(char_list(false)),
            TypeNode::NonemptyCharlist | TypeNode::NonemptyStr => Ok(char_list(true)),
            TypeNode::Iolist => Ok(Check::Iolist),
            TypeNode::Iodata => Ok(Check::Iodata),
            TypeNode::Mfa => Ok(Check::Tuple(vec![
                Check::AtomName,
                Check::AtomName,
                Check::IntRange(0, 255),
            ])),
            TypeNode::ModuleName | TypeNode::NodeName => Ok(Check::AtomName),
            TypeNode::Number => Ok(Check::Union(vec![Check::Int, Check::Float])),
            TypeNode::Timeout => Ok(Check::Union(vec![
                Check::NonNegInt,
                Check::Lit(Term::atom("infinity")),
            ])),
            TypeNode::Pid => Err(Error::unsupported("pid()")),
            TypeNode::Port => Err(Error::unsupported("port()")),
            TypeNode::Fun => Err(Error::unsupported("fun()")),
            TypeNode::Opaque(opaque) => match &opaque.validator {
                Some(handle) => Ok(Check::External(handle.clone())),
                None => Err(Error::bad_argument(
                    "opaque argument provides a generator only; a validator is required here",
                )),
            },
        }
    }

    fn lower_map(&self, fields: &[MapField], self_name: Option<Atom>) -> Result<Check, Error> {
        let mut exact = Vec::new();
        let mut general = Vec::new();
        for field in fields {
            match field {
                MapField::Required(k, v) => match k.as_literal_term() {
                    Some(key) => exact.push((key, self.lower(v, self_name)?)),
                    None => general.push(GeneralField::Required(
                        self.lower(k, self_name)?,
                        self.lower(v, self_name)?,
                    )),
                },
                MapField::Optional(k, v) => general.push(GeneralField::Optional(
                    self.lower(k, self_name)?,
                    self.lower(v, self_name)?,
                )),
            }
        }
        Ok(Check::Map { exact, general })
    }

    fn improper(
        &self,
        head: &TypeNode,
        tail: &TypeNode,
        self_name: Option<Atom>,
        nonempty: bool,
        maybe: bool,
    ) -> Result<Check, Error> {
        Ok(Check::Improper {
            head: Box::new(self.lower(head, self_name)?),
            tail: Box::new(self.lower(tail, self_name)?),
            nonempty,
            maybe,
        })
    }

    fn next_depth(&self) -> Result<u32, Error> {
        if self.depth >= MAX_REMOTE_DEPTH {
            return Err(Error::new(
                tygen_common::ErrorKind::InfiniteType,
                "reference resolution exceeded its depth budget; \
                 mutually recursive references have no finite rendering",
            ));
        }
        Ok(self.depth + 1)
    }
}

fn char_list(nonempty: bool) -> Check {
    Check::List { elem: Box::new(Check::IntRange(0, 0x10FFFF)), nonempty }
}
