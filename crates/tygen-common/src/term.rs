//! The dynamic term vocabulary.
//!
//! Generators produce `Term` values and validators judge them. Terms model
//! the untyped runtime values structural types range over: atoms, integers,
//! floats, tuples, proper and improper lists, maps, bitstrings, and opaque
//! references.
//!
//! `Term` implements total `Eq` and `Hash` (floats compare by bit pattern,
//! maps hash order-independently) so terms can key maps.

use crate::interner::Atom;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Key/value bag with deterministic iteration order.
pub type TermMap = IndexMap<Term, Term, FxBuildHasher>;

/// A dynamically shaped runtime value.
#[derive(Clone, Debug)]
pub enum Term {
    Atom(Atom),
    Int(i64),
    Float(f64),
    Tuple(Vec<Term>),
    /// Proper list; `List(vec![])` is the empty sequence.
    List(Vec<Term>),
    /// Improper list: a nonempty head chain ending in a non-list tail.
    Improper(Vec<Term>, Box<Term>),
    Map(TermMap),
    Bits(Bits),
    /// Opaque identity token.
    Ref(u64),
}

impl Term {
    pub fn atom(name: &str) -> Term {
        Term::Atom(Atom::new(name))
    }

    pub fn int(value: i64) -> Term {
        Term::Int(value)
    }

    pub fn float(value: f64) -> Term {
        Term::Float(value)
    }

    pub fn nil() -> Term {
        Term::List(Vec::new())
    }

    pub fn list(items: Vec<Term>) -> Term {
        Term::List(items)
    }

    pub fn tuple(items: Vec<Term>) -> Term {
        Term::Tuple(items)
    }

    pub fn map(pairs: impl IntoIterator<Item = (Term, Term)>) -> Term {
        Term::Map(pairs.into_iter().collect())
    }

    pub fn bool_atom(value: bool) -> Term {
        Term::atom(if value { "true" } else { "false" })
    }

    pub fn binary(bytes: Vec<u8>) -> Term {
        Term::Bits(Bits::from_bytes(bytes))
    }

    /// Builds a list with the given head chain and tail, normalizing so that
    /// a list-shaped tail is spliced into the chain. With an empty head
    /// chain the tail itself is returned.
    pub fn improper(heads: Vec<Term>, tail: Term) -> Term {
        match tail {
            Term::List(rest) => {
                let mut items = heads;
                items.extend(rest);
                Term::List(items)
            }
            Term::Improper(rest, end) => {
                let mut items = heads;
                items.extend(rest);
                Term::Improper(items, end)
            }
            other if heads.is_empty() => other,
            other => Term::Improper(heads, Box::new(other)),
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Term::Atom(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Term::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Term::Float(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Term::Int(_) | Term::Float(_))
    }

    /// Proper list.
    pub fn is_list(&self) -> bool {
        matches!(self, Term::List(_))
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, Term::Tuple(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Term::Map(_))
    }

    pub fn is_bitstring(&self) -> bool {
        matches!(self, Term::Bits(_))
    }

    /// Bitstring whose length is a whole number of bytes.
    pub fn is_binary(&self) -> bool {
        matches!(self, Term::Bits(bits) if bits.is_binary())
    }

    pub fn is_ref(&self) -> bool {
        matches!(self, Term::Ref(_))
    }

    pub fn is_bool(&self) -> bool {
        self.atom_is("true") || self.atom_is("false")
    }

    /// Integer in `0..=255`.
    pub fn is_byte(&self) -> bool {
        matches!(self, Term::Int(n) if (0..=255).contains(n))
    }

    pub fn atom_is(&self, name: &str) -> bool {
        matches!(self, Term::Atom(a) if &*a.as_str() == name)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Term::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_atom(&self) -> Option<Atom> {
        match self {
            Term::Atom(a) => Some(*a),
            _ => None,
        }
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Term) -> bool {
        match (self, other) {
            (Term::Atom(a), Term::Atom(b)) => a == b,
            (Term::Int(a), Term::Int(b)) => a == b,
            (Term::Float(a), Term::Float(b)) => a.to_bits() == b.to_bits(),
            (Term::Tuple(a), Term::Tuple(b)) => a == b,
            (Term::List(a), Term::List(b)) => a == b,
            (Term::Improper(ah, at), Term::Improper(bh, bt)) => ah == bh && at == bt,
            (Term::Map(a), Term::Map(b)) => a == b,
            (Term::Bits(a), Term::Bits(b)) => a == b,
            (Term::Ref(a), Term::Ref(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Term::Atom(a) => a.hash(state),
            Term::Int(n) => n.hash(state),
            Term::Float(f) => f.to_bits().hash(state),
            Term::Tuple(items) | Term::List(items) => items.hash(state),
            Term::Improper(heads, tail) => {
                heads.hash(state);
                tail.hash(state);
            }
            Term::Map(map) => {
                // Maps are unordered: combine per-entry hashes commutatively.
                let mut combined: u64 = 0;
                for (k, v) in map {
                    let mut entry = rustc_hash::FxHasher::default();
                    k.hash(&mut entry);
                    v.hash(&mut entry);
                    combined ^= entry.finish();
                }
                combined.hash(state);
                map.len().hash(state);
            }
            Term::Bits(bits) => bits.hash(state),
            Term::Ref(id) => id.hash(state),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(a) => write!(f, ":{a}"),
            Term::Int(n) => write!(f, "{n}"),
            Term::Float(x) => write!(f, "{x:?}"),
            Term::Tuple(items) => {
                f.write_str("{")?;
                write_joined(f, items)?;
                f.write_str("}")
            }
            Term::List(items) => {
                f.write_str("[")?;
                write_joined(f, items)?;
                f.write_str("]")
            }
            Term::Improper(heads, tail) => {
                f.write_str("[")?;
                write_joined(f, heads)?;
                write!(f, " | {tail}]")
            }
            Term::Map(map) => {
                f.write_str("%{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k} => {v}")?;
                }
                f.write_str("}")
            }
            Term::Bits(bits) => write!(f, "{bits}"),
            Term::Ref(id) => write!(f, "#Ref<{id}>"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Term]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// A bit sequence. Stores whole bytes plus the total length in bits; unused
/// low bits of the final partial byte are always zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bits {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl Bits {
    /// Builds a bit sequence of exactly `bit_len` bits from `bytes`,
    /// truncating or zero-padding and masking the trailing partial byte.
    pub fn new(mut bytes: Vec<u8>, bit_len: usize) -> Bits {
        let needed = bit_len.div_ceil(8);
        bytes.resize(needed, 0);
        let rem = bit_len % 8;
        if rem != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= 0xFFu8 << (8 - rem);
            }
        }
        Bits { bytes, bit_len }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Bits {
        let bit_len = bytes.len() * 8;
        Bits { bytes, bit_len }
    }

    pub fn empty() -> Bits {
        Bits::default()
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Whole number of bytes.
    pub fn is_binary(&self) -> bool {
        self.bit_len % 8 == 0
    }
}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<<")?;
        let rem = self.bit_len % 8;
        let whole = self.bit_len / 8;
        for (i, byte) in self.bytes.iter().take(whole).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{byte}")?;
        }
        if rem != 0 {
            if whole > 0 {
                f.write_str(", ")?;
            }
            let partial = self.bytes[whole] >> (8 - rem);
            write!(f, "{partial}::size({rem})")?;
        }
        f.write_str(">>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_equality_by_bits() {
        assert_eq!(Term::float(1.5), Term::float(1.5));
        assert_ne!(Term::float(0.0), Term::float(-0.0));
        assert_eq!(Term::float(f64::NAN), Term::float(f64::NAN));
    }

    #[test]
    fn test_map_equality_ignores_order() {
        let a = Term::map([(Term::atom("x"), Term::int(1)), (Term::atom("y"), Term::int(2))]);
        let b = Term::map([(Term::atom("y"), Term::int(2)), (Term::atom("x"), Term::int(1))]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_improper_normalizes_list_tail() {
        let spliced = Term::improper(vec![Term::int(1)], Term::list(vec![Term::int(2)]));
        assert_eq!(spliced, Term::list(vec![Term::int(1), Term::int(2)]));

        let improper = Term::improper(vec![Term::int(1)], Term::atom("tail"));
        assert!(matches!(improper, Term::Improper(_, _)));
    }

    #[test]
    fn test_bits_masks_trailing_byte() {
        let bits = Bits::new(vec![0xFF, 0xFF], 12);
        assert_eq!(bits.bit_len(), 12);
        assert_eq!(bits.bytes(), &[0xFF, 0xF0]);
        assert!(!bits.is_binary());
        assert!(Bits::from_bytes(vec![1, 2]).is_binary());
    }

    #[test]
    fn test_display_round_trip_shapes() {
        let t = Term::tuple(vec![Term::atom("ok"), Term::int(3)]);
        assert_eq!(t.to_string(), "{:ok, 3}");
        let l = Term::improper(vec![Term::int(1), Term::int(2)], Term::atom("x"));
        assert_eq!(l.to_string(), "[1, 2 | :x]");
        let m = Term::map([(Term::atom("k"), Term::int(1))]);
        assert_eq!(m.to_string(), "%{:k => 1}");
    }
}
