//! Check-tree interpretation.
//!
//! Evaluation is total: it consumes term structure, and the only
//! non-structural recursion (a self-reference that consumes nothing) is
//! depth-bounded.

use crate::check::{Check, GeneralField};
use tygen_common::limits::{MAX_VALIDATOR_DEPTH, STACK_GROW_SIZE, STACK_RED_ZONE};
use tygen_common::Term;

/// A compiled recursive predicate: the base accepts the non-recursive
/// rendition, the nodes re-enter the whole predicate at their `SelfRef`
/// holes.
pub(crate) struct RecPredicate {
    pub base: Check,
    pub nodes: Vec<Check>,
}

impl RecPredicate {
    pub fn accept(&self, term: &Term, depth: u32) -> bool {
        eval(&self.base, term, None, depth)
            || self
                .nodes
                .iter()
                .any(|node| eval(node, term, Some(self), depth))
    }
}

pub(crate) fn eval(check: &Check, term: &Term, rec: Option<&RecPredicate>, depth: u32) -> bool {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
        eval_inner(check, term, rec, depth)
    })
}

fn eval_inner(check: &Check, term: &Term, rec: Option<&RecPredicate>, depth: u32) -> bool {
    match check {
        Check::Any => true,
        Check::AtomName => term.is_atom(),
        Check::Int => term.is_int(),
        Check::PosInt => term.as_int().is_some_and(|n| n > 0),
        Check::NegInt => term.as_int().is_some_and(|n| n < 0),
        Check::NonNegInt => term.as_int().is_some_and(|n| n >= 0),
        Check::Float => term.is_float(),
        Check::Bool => term.is_bool(),
        Check::Ref => term.is_ref(),
        Check::Bitstring => term.is_bitstring(),
        Check::Binary => term.is_binary(),
        Check::BinaryPattern(size, unit) => match term {
            Term::Bits(bits) => {
                let len = bits.bit_len();
                let size = *size as usize;
                let unit = *unit as usize;
                if size == 0 && unit == 0 {
                    len == 0
                } else if unit == 0 {
                    len == size
                } else {
                    len >= size && (len - size) % unit == 0
                }
            }
            _ => false,
        },
        Check::Lit(expected) => term == expected,
        Check::IntRange(lo, hi) => term.as_int().is_some_and(|n| (*lo..=*hi).contains(&n)),
        Check::Nil => matches!(term, Term::List(items) if items.is_empty()),
        Check::List { elem, nonempty } => match term {
            Term::List(items) => {
                (!nonempty || !items.is_empty())
                    && items.iter().all(|item| eval(elem, item, rec, depth))
            }
            _ => false,
        },
        Check::Improper { head, tail, nonempty, maybe } => {
            eval_improper(head, tail, *nonempty, *maybe, term, rec, depth)
        }
        Check::Tuple(checks) => match term {
            Term::Tuple(items) => {
                items.len() == checks.len()
                    && checks
                        .iter()
                        .zip(items)
                        .all(|(check, item)| eval(check, item, rec, depth))
            }
            _ => false,
        },
        Check::TupleAny => term.is_tuple(),
        Check::Map { exact, general } => eval_map(exact, general, term, rec, depth),
        Check::MapAny => term.is_map(),
        Check::EmptyMap => matches!(term, Term::Map(map) if map.is_empty()),
        Check::Union(alts) => alts.iter().any(|alt| eval(alt, term, rec, depth)),
        Check::Iolist => is_iolist(term),
        Check::Iodata => term.is_binary() || is_iolist(term),
        Check::SelfRef => match rec {
            Some(predicate) if depth < MAX_VALIDATOR_DEPTH => {
                predicate.accept(term, depth + 1)
            }
            _ => false,
        },
        Check::External(handle) => handle.check(term),
    }
}

// The recursive head/tail walk over proper and improper chains. A proper
// list [h1..hn] can terminate properly (maybe-improper forms) or be read
// as [h1..hk | rest] with the rest inhabiting the tail type; an improper
// chain splits the same way with its final non-list tail.
fn eval_improper(
    head: &Check,
    tail: &Check,
    nonempty: bool,
    maybe: bool,
    term: &Term,
    rec: Option<&RecPredicate>,
    depth: u32,
) -> bool {
    let head_ok = |item: &Term| eval(head, item, rec, depth);
    match term {
        Term::List(items) => {
            if items.is_empty() {
                return maybe && !nonempty;
            }
            if maybe && items.iter().all(head_ok) {
                return true;
            }
            (1..=items.len()).any(|k| {
                items[..k].iter().all(head_ok)
                    && eval(tail, &Term::List(items[k..].to_vec()), rec, depth)
            })
        }
        Term::Improper(heads, last) => (1..=heads.len()).any(|k| {
            if !heads[..k].iter().all(head_ok) {
                return false;
            }
            let rest = if k == heads.len() {
                (**last).clone()
            } else {
                Term::Improper(heads[k..].to_vec(), last.clone())
            };
            eval(tail, &rest, rec, depth)
        }),
        _ => false,
    }
}

fn eval_map(
    exact: &[(Term, Check)],
    general: &[GeneralField],
    term: &Term,
    rec: Option<&RecPredicate>,
    depth: u32,
) -> bool {
    let map = match term {
        Term::Map(map) => map,
        _ => return false,
    };
    // Exact fields: present with a valid value, then removed so the open
    // fields only see the remainder.
    let mut remaining = map.clone();
    for (key, value_check) in exact {
        match remaining.shift_remove(key) {
            Some(value) if eval(value_check, &value, rec, depth) => {}
            _ => return false,
        }
    }
    general.iter().all(|field| match field {
        GeneralField::Required(key_check, value_check) => remaining.iter().any(|(k, v)| {
            eval(key_check, k, rec, depth) && eval(value_check, v, rec, depth)
        }),
        GeneralField::Optional(key_check, value_check) => remaining.iter().all(|(k, v)| {
            !eval(key_check, k, rec, depth) || eval(value_check, v, rec, depth)
        }),
    })
}

/// The inductive iolist predicate: the empty list, or a chain whose
/// elements are bytes, binaries, or iolists, terminated properly or by a
/// binary.
pub fn is_iolist(term: &Term) -> bool {
    let elem_ok = |t: &Term| t.is_byte() || t.is_binary() || is_iolist(t);
    match term {
        Term::List(items) => items.iter().all(elem_ok),
        Term::Improper(heads, tail) => heads.iter().all(elem_ok) && tail.is_binary(),
        _ => false,
    }
}
