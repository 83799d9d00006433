//! Reusable term strategies.
//!
//! The primitive building blocks the plan fold composes: alphanumeric
//! atoms, arbitrary terms, iolists, bit sequences, and the fold-zip for
//! fixed-arity tuples.

use proptest::collection::vec;
use proptest::prelude::*;
use proptest::strategy::Union;
use tygen_common::limits::{
    MAX_ATOM_LEN, MAX_CONTAINER_LEN, MAX_RECURSIVE_GEN_DEPTH, MAX_TUPLE_ANY_LEN,
    RECURSIVE_GEN_BRANCH_SIZE, RECURSIVE_GEN_TARGET_SIZE,
};
use tygen_common::{Bits, Term, TermMap};

/// Alphanumeric atoms: a lowercase letter followed by letters, digits, and
/// underscores.
pub fn atom_strategy() -> BoxedStrategy<Term> {
    let first = proptest::char::range('a', 'z');
    let rest = vec(
        prop_oneof![
            proptest::char::range('a', 'z'),
            proptest::char::range('A', 'Z'),
            proptest::char::range('0', '9'),
            Just('_'),
        ],
        0..MAX_ATOM_LEN,
    );
    (first, rest)
        .prop_map(|(first, rest)| {
            let mut name = String::with_capacity(1 + rest.len());
            name.push(first);
            name.extend(rest);
            Term::atom(&name)
        })
        .boxed()
}

/// Bit sequences of exactly `bit_len` bits.
pub fn exact_bits(bit_len: usize) -> BoxedStrategy<Term> {
    vec(any::<u8>(), bit_len.div_ceil(8))
        .prop_map(move |bytes| Term::Bits(Bits::new(bytes, bit_len)))
        .boxed()
}

/// Bit sequences of any small length, byte-aligned or not.
pub fn bitstring_strategy() -> BoxedStrategy<Term> {
    (0usize..=MAX_CONTAINER_LEN * 8)
        .prop_flat_map(exact_bits)
        .boxed()
}

/// Byte-aligned bit sequences.
pub fn binary_strategy() -> BoxedStrategy<Term> {
    vec(any::<u8>(), 0..=MAX_CONTAINER_LEN)
        .prop_map(Term::binary)
        .boxed()
}

/// Arbitrary terms: atoms, numbers, and binaries at the leaves; lists,
/// tuples, and maps grown recursively on top.
pub fn term_strategy() -> BoxedStrategy<Term> {
    let leaf = Union::new(vec![
        atom_strategy(),
        any::<i64>().prop_map(Term::Int).boxed(),
        any::<f64>().prop_map(Term::Float).boxed(),
        vec(any::<u8>(), 0..=4).prop_map(Term::binary).boxed(),
    ])
    .boxed();
    leaf.prop_recursive(
        MAX_RECURSIVE_GEN_DEPTH,
        RECURSIVE_GEN_TARGET_SIZE,
        RECURSIVE_GEN_BRANCH_SIZE,
        |inner| {
            Union::new(vec![
                vec(inner.clone(), 0..=MAX_TUPLE_ANY_LEN)
                    .prop_map(Term::List)
                    .boxed(),
                vec(inner.clone(), 0..=MAX_TUPLE_ANY_LEN)
                    .prop_map(Term::Tuple)
                    .boxed(),
                vec((inner.clone(), inner), 0..=MAX_TUPLE_ANY_LEN)
                    .prop_map(|pairs| Term::Map(pairs.into_iter().collect::<TermMap>()))
                    .boxed(),
            ])
        },
    )
    .boxed()
}

/// Iolists: proper or binary-terminated improper lists of bytes, binaries,
/// and nested iolists.
pub fn iolist_strategy() -> BoxedStrategy<Term> {
    let byte = (0i64..=255).prop_map(Term::Int).boxed();
    let binary = vec(any::<u8>(), 0..=4).prop_map(Term::binary).boxed();
    let leaf_elem = Union::new(vec![byte.clone(), binary.clone()]).boxed();
    let leaf = vec(leaf_elem, 0..=MAX_CONTAINER_LEN)
        .prop_map(Term::List)
        .boxed();
    leaf.prop_recursive(
        MAX_RECURSIVE_GEN_DEPTH,
        RECURSIVE_GEN_TARGET_SIZE,
        RECURSIVE_GEN_BRANCH_SIZE,
        move |inner| {
            let elem = Union::new(vec![byte.clone(), binary.clone(), inner]).boxed();
            let proper = vec(elem.clone(), 0..=MAX_CONTAINER_LEN)
                .prop_map(Term::List)
                .boxed();
            let improper = (vec(elem, 1..=MAX_CONTAINER_LEN), binary.clone())
                .prop_map(|(heads, tail)| Term::improper(heads, tail))
                .boxed();
            Union::new(vec![proper, improper])
        },
    )
    .boxed()
}

/// Zips per-element strategies into a fixed-arity draw.
pub fn zip_all(gens: Vec<BoxedStrategy<Term>>) -> BoxedStrategy<Vec<Term>> {
    let mut acc: BoxedStrategy<Vec<Term>> = Just(Vec::new()).boxed();
    for strategy in gens {
        acc = (acc, strategy)
            .prop_map(|(mut items, next)| {
                items.push(next);
                items
            })
            .boxed();
    }
    acc
}
