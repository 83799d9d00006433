//! Lowering of normalized types into closed generation plans.
//!
//! A `Plan` contains no names: user and remote references have been
//! resolved into embedded generators by re-entering the build pipeline,
//! aliases are expanded, and unsampleable types have been refused. The
//! only marker left is `SelfRef`, which the recursive fold replaces with
//! the previous depth's generator.

use crate::build::generator_with_depth;
use tygen_ast::{MapField, TypeNode};
use tygen_common::limits::{MAX_REMOTE_DEPTH, TIMEOUT_INFINITY_WEIGHT, TIMEOUT_INT_WEIGHT};
use tygen_common::{Atom, Error, GeneratorHandle, Term};
use tygen_registry::Registry;

#[derive(Clone, Debug)]
pub(crate) enum Plan {
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
    Constant(Term),
    IntRange(i64, i64),
    Nil,
    List { elem: Box<Plan>, nonempty: bool },
    Improper { head: Box<Plan>, tail: Box<Plan>, nonempty: bool, maybe: bool },
    Tuple(Vec<Plan>),
    TupleAny,
    Map(Vec<PlanField>),
    MapAny,
    Union(Vec<Plan>),
    Weighted(Vec<(u32, Plan)>),
    Iolist,
    Iodata,
    /// Hole filled with the previous depth's generator.
    SelfRef,
    /// A resolved reference or caller-provided generator.
    External(GeneratorHandle),
}

#[derive(Clone, Debug)]
pub(crate) enum PlanField {
    /// Literal-key required field: exactly this key, drawn value.
    RequiredLiteral(Term, Plan),
    /// Open required field: at least one drawn entry.
    Required(Plan, Plan),
    /// Open optional field: any number of drawn entries.
    Optional(Plan, Plan),
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

    /// Lowers `node`, treating references to `self_name` as recursion
    /// holes. Everything else that names a type is resolved here.
    pub fn lower(&self, node: &TypeNode, self_name: Option<Atom>) -> Result<Plan, Error> {
        match node {
            TypeNode::Any => Ok(Plan::Any),
            TypeNode::None => Err(Error::no_inhabitants("none()")),
            TypeNode::Atom => Ok(Plan::AtomName),
            TypeNode::AtomLit(a) => Ok(Plan::Constant(Term::Atom(*a))),
            TypeNode::Int => Ok(Plan::Int),
            TypeNode::PosInt => Ok(Plan::PosInt),
            TypeNode::NegInt => Ok(Plan::NegInt),
            TypeNode::NonNegInt => Ok(Plan::NonNegInt),
            TypeNode::IntLit(n) => Ok(Plan::Constant(Term::Int(*n))),
            TypeNode::Range(lo, hi) => {
                if lo > hi {
                    return Err(Error::bad_argument(format!("empty range {lo}..{hi}")));
                }
                Ok(Plan::IntRange(*lo, *hi))
            }
            TypeNode::Float => Ok(Plan::Float),
            TypeNode::Bool => Ok(Plan::Bool),
            TypeNode::Byte | TypeNode::Arity => Ok(Plan::IntRange(0, 255)),
            TypeNode::Char => Ok(Plan::IntRange(0, 0x10FFFF)),
            TypeNode::Bitstring => Ok(Plan::Bitstring),
            TypeNode::Binary => Ok(Plan::Binary),
            TypeNode::BinaryPattern(size, unit) => Ok(Plan::BinaryPattern(*size, *unit)),
            TypeNode::Ref => Ok(Plan::Ref),
            TypeNode::Nil => Ok(Plan::Nil),
            TypeNode::List(t) => Ok(Plan::List {
                elem: Box::new(self.lower(t, self_name)?),
                nonempty: false,
            }),
            TypeNode::NonemptyList(t) => Ok(Plan::List {
                elem: Box::new(self.lower(t, self_name)?),
                nonempty: true,
            }),
            TypeNode::ImproperList(h, t) => self.improper(h, t, self_name, true, false),
            TypeNode::NonemptyImproperList(h, t) => self.improper(h, t, self_name, true, false),
            TypeNode::MaybeImproperList(h, t) => self.improper(h, t, self_name, false, true),
            TypeNode::NonemptyMaybeImproperList(h, t) => {
                self.improper(h, t, self_name, true, true)
            }
            TypeNode::Tuple(elems) => Ok(Plan::Tuple(
                elems
                    .iter()
                    .map(|e| self.lower(e, self_name))
                    .collect::<Result<Vec<_>, Error>>()?,
            )),
            TypeNode::TupleAny => Ok(Plan::TupleAny),
            TypeNode::Map(fields) => Ok(Plan::Map(
                fields
                    .iter()
                    .map(|f| self.lower_field(f, self_name))
                    .collect::<Result<Vec<_>, Error>>()?,
            )),
            TypeNode::MapAny => Ok(Plan::MapAny),
            TypeNode::EmptyMap => Ok(Plan::Constant(Term::map([]))),
            TypeNode::Union(alts) => Ok(Plan::Union(
                alts.iter()
                    .map(|a| self.lower(a, self_name))
                    .collect::<Result<Vec<_>, Error>>()?,
            )),
            // The marker stands for the definition at its current
            // instantiation.
            TypeNode::UserRef { name, .. } if Some(*name) == self_name => Ok(Plan::SelfRef),
            TypeNode::UserRef { name, args } => {
                let handle =
                    generator_with_depth(self.reg, self.module, *name, args.clone(), self.next_depth()?)?;
                Ok(Plan::External(handle))
            }
            TypeNode::RemoteRef { module, name, args } => {
                if self.reg.is_protocol(*module) {
                    return Err(Error::protocol(*module));
                }
                tracing::debug!("resolving remote reference {}.{}", module, name);
                let handle =
                    generator_with_depth(self.reg, *module, *name, args.clone(), self.next_depth()?)?;
                Ok(Plan::External(handle))
            }
            TypeNode::Var(name) => Err(Error::bad_argument(format!(
                "unsubstituted type variable {name}"
            ))),
            TypeNode::Charlist => Ok(char_list(false)),
            TypeNode::NonemptyCharlist => Ok(char_list(true)),
            TypeNode::Str => Ok(char_list(false)),
            TypeNode::NonemptyStr => Ok(char_list(true)),
            TypeNode::Iolist => Ok(Plan::Iolist),
            TypeNode::Iodata => Ok(Plan::Iodata),
            TypeNode::Mfa => Ok(Plan::Tuple(vec![
                Plan::AtomName,
                Plan::AtomName,
                Plan::IntRange(0, 255),
            ])),
            TypeNode::ModuleName | TypeNode::NodeName => Ok(Plan::AtomName),
            TypeNode::Number => Ok(Plan::Union(vec![Plan::Int, Plan::Float])),
            TypeNode::Timeout => Ok(Plan::Weighted(vec![
                (TIMEOUT_INT_WEIGHT, Plan::NonNegInt),
                (TIMEOUT_INFINITY_WEIGHT, Plan::Constant(Term::atom("infinity"))),
            ])),
            TypeNode::Pid => Err(Error::unsupported("pid()")),
            TypeNode::Port => Err(Error::unsupported("port()")),
            TypeNode::Fun => Err(Error::unsupported("fun()")),
            TypeNode::Opaque(opaque) => match &opaque.generator {
                Some(handle) => Ok(Plan::External(handle.clone())),
                None => Err(Error::bad_argument(
                    "opaque argument provides a validator only; a generator is required here",
                )),
            },
        }
    }

    fn lower_field(&self, field: &MapField, self_name: Option<Atom>) -> Result<PlanField, Error> {
        match field {
            MapField::Required(k, v) => match k.as_literal_term() {
                Some(key) => Ok(PlanField::RequiredLiteral(key, self.lower(v, self_name)?)),
                None => Ok(PlanField::Required(
                    self.lower(k, self_name)?,
                    self.lower(v, self_name)?,
                )),
            },
            MapField::Optional(k, v) => Ok(PlanField::Optional(
                self.lower(k, self_name)?,
                self.lower(v, self_name)?,
            )),
        }
    }

    fn improper(
        &self,
        head: &TypeNode,
        tail: &TypeNode,
        self_name: Option<Atom>,
        nonempty: bool,
        maybe: bool,
    ) -> Result<Plan, Error> {
        Ok(Plan::Improper {
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

fn char_list(nonempty: bool) -> Plan {
    Plan::List { elem: Box::new(Plan::IntRange(0, 0x10FFFF)), nonempty }
}
