//! The canonical type AST.
//!
//! `TypeNode` is an immutable tagged tree covering every supported type
//! form. The normalizer rewrites caller input into this shape; both
//! builders interpret it.

use std::sync::atomic::{AtomicU64, Ordering};
use tygen_common::{Atom, GeneratorHandle, Term, ValidatorHandle};

// =============================================================================
// TypeNode
// =============================================================================

/// A structural type.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeNode {
    /// Universal top type.
    Any,
    /// Empty type; no inhabitants.
    None,

    Atom,
    AtomLit(Atom),

    Int,
    PosInt,
    NegInt,
    NonNegInt,
    IntLit(i64),
    /// Inclusive integer bounds.
    Range(i64, i64),
    Float,
    Bool,
    Byte,
    Char,
    Arity,

    Bitstring,
    Binary,
    /// Bit sizes `s` with `s = size + unit * k`; empty when both are zero.
    BinaryPattern(u32, u32),

    /// Opaque identity token.
    Ref,

    /// Empty ordered sequence.
    Nil,
    List(Box<TypeNode>),
    NonemptyList(Box<TypeNode>),
    ImproperList(Box<TypeNode>, Box<TypeNode>),
    NonemptyImproperList(Box<TypeNode>, Box<TypeNode>),
    MaybeImproperList(Box<TypeNode>, Box<TypeNode>),
    NonemptyMaybeImproperList(Box<TypeNode>, Box<TypeNode>),

    Tuple(Vec<TypeNode>),
    TupleAny,

    Map(Vec<MapField>),
    MapAny,
    EmptyMap,

    /// Sum type; kept flat by the normalizer.
    Union(Vec<TypeNode>),

    /// Reference to a named definition in the current module. Retained
    /// through normalization only as a self-reference marker.
    UserRef { name: Atom, args: Vec<TypeNode> },
    /// Fully qualified cross-module reference.
    RemoteRef { module: Atom, name: Atom, args: Vec<TypeNode> },
    /// Type-parameter placeholder; gone after substitution.
    Var(Atom),

    // Convenience aliases with fixed meanings.
    Charlist,
    NonemptyCharlist,
    Iolist,
    Iodata,
    Mfa,
    ModuleName,
    NodeName,
    Number,
    Timeout,
    Str,
    NonemptyStr,

    // Representable but not sampleable.
    Pid,
    Port,
    Fun,

    /// Caller-provided generator and/or validator used as a type argument.
    Opaque(OpaqueType),
}

impl TypeNode {
    pub fn list(elem: TypeNode) -> TypeNode {
        TypeNode::List(Box::new(elem))
    }

    pub fn nonempty_list(elem: TypeNode) -> TypeNode {
        TypeNode::NonemptyList(Box::new(elem))
    }

    pub fn tuple(elems: Vec<TypeNode>) -> TypeNode {
        TypeNode::Tuple(elems)
    }

    pub fn atom_lit(name: &str) -> TypeNode {
        TypeNode::AtomLit(Atom::new(name))
    }

    pub fn user(name: &str) -> TypeNode {
        TypeNode::UserRef { name: Atom::new(name), args: Vec::new() }
    }

    pub fn user_with(name: &str, args: Vec<TypeNode>) -> TypeNode {
        TypeNode::UserRef { name: Atom::new(name), args }
    }

    pub fn remote(module: &str, name: &str, args: Vec<TypeNode>) -> TypeNode {
        TypeNode::RemoteRef { module: Atom::new(module), name: Atom::new(name), args }
    }

    pub fn var(name: &str) -> TypeNode {
        TypeNode::Var(Atom::new(name))
    }

    /// Merges alternatives into a flat union; a single alternative stays
    /// bare. Nested unions are spliced so no union is a direct child of
    /// another.
    pub fn union(alts: Vec<TypeNode>) -> TypeNode {
        let mut flat = Vec::with_capacity(alts.len());
        for alt in alts {
            match alt {
                TypeNode::Union(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            flat.into_iter().next().unwrap_or(TypeNode::None)
        } else {
            TypeNode::Union(flat)
        }
    }

    /// The singleton term for literal nodes.
    pub fn as_literal_term(&self) -> Option<Term> {
        match self {
            TypeNode::AtomLit(a) => Some(Term::Atom(*a)),
            TypeNode::IntLit(n) => Some(Term::Int(*n)),
            _ => None,
        }
    }
}

// =============================================================================
// MapField
// =============================================================================

/// One key/value constraint of a map type.
#[derive(Clone, Debug, PartialEq)]
pub enum MapField {
    /// At least one entry whose key inhabits K and value V must exist; for
    /// a literal key exactly that key must be present.
    Required(TypeNode, TypeNode),
    /// Every entry whose key inhabits K must have a value inhabiting V;
    /// zero such entries is permitted.
    Optional(TypeNode, TypeNode),
}

impl MapField {
    pub fn key(&self) -> &TypeNode {
        match self {
            MapField::Required(k, _) | MapField::Optional(k, _) => k,
        }
    }

    pub fn value(&self) -> &TypeNode {
        match self {
            MapField::Required(_, v) | MapField::Optional(_, v) => v,
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, MapField::Required(_, _))
    }

    /// For the literal-key required form, the concrete key term.
    pub fn literal_key(&self) -> Option<Term> {
        self.key().as_literal_term()
    }
}

// =============================================================================
// Opaque arguments
// =============================================================================

static NEXT_OPAQUE_ID: AtomicU64 = AtomicU64::new(0);

/// A caller-provided generator and/or validator spliced into a type as an
/// argument. A generator does not implicitly supply a validator; a builder
/// that needs the missing half refuses at build time.
#[derive(Clone, Debug)]
pub struct OpaqueType {
    id: u64,
    pub generator: Option<GeneratorHandle>,
    pub validator: Option<ValidatorHandle>,
}

impl OpaqueType {
    fn with_parts(generator: Option<GeneratorHandle>, validator: Option<ValidatorHandle>) -> OpaqueType {
        OpaqueType {
            id: NEXT_OPAQUE_ID.fetch_add(1, Ordering::Relaxed),
            generator,
            validator,
        }
    }

    pub fn from_generator(generator: GeneratorHandle) -> OpaqueType {
        OpaqueType::with_parts(Some(generator), None)
    }

    pub fn from_validator(validator: ValidatorHandle) -> OpaqueType {
        OpaqueType::with_parts(None, Some(validator))
    }

    pub fn pair(generator: GeneratorHandle, validator: ValidatorHandle) -> OpaqueType {
        OpaqueType::with_parts(Some(generator), Some(validator))
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

// Identity, not structure: two opaques are the same only if they are the
// same splice.
impl PartialEq for OpaqueType {
    fn eq(&self, other: &OpaqueType) -> bool {
        self.id == other.id
    }
}
