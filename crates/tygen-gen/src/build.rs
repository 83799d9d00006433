//! Folding plans into strategies.

use crate::plan::{Lowerer, Plan, PlanField};
use crate::strategies::{
    atom_strategy, binary_strategy, bitstring_strategy, exact_bits, iolist_strategy,
    term_strategy, zip_all,
};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::strategy::Union;
use tygen_ast::TypeNode;
use tygen_common::limits::{
    MAX_BINARY_PATTERN_REPEATS, MAX_CONTAINER_LEN, MAX_RECURSIVE_GEN_DEPTH, MAX_TUPLE_ANY_LEN,
    RECURSIVE_GEN_BRANCH_SIZE, RECURSIVE_GEN_TARGET_SIZE,
};
use tygen_common::{Atom, Bits, Error, GeneratorHandle, Term, TermMap};
use tygen_registry::Registry;
use tygen_solver::normalize::{Normalized, Shape};

/// Builds a generator for the named type. The full pipeline: normalize,
/// lower, fold.
pub fn generator_for(
    reg: &Registry,
    module: Atom,
    name: Atom,
    args: Vec<TypeNode>,
) -> Result<GeneratorHandle, Error> {
    generator_with_depth(reg, module, name, args, 0)
}

/// Builds a generator for a bare type expression (no named definition),
/// as the spec checker does for argument and return positions.
pub fn node_generator(reg: &Registry, module: Atom, node: &TypeNode) -> Result<GeneratorHandle, Error> {
    node_generator_with_depth(reg, module, node, 0)
}

pub(crate) fn generator_with_depth(
    reg: &Registry,
    module: Atom,
    name: Atom,
    args: Vec<TypeNode>,
    depth: u32,
) -> Result<GeneratorHandle, Error> {
    let normalized = tygen_solver::normalize(reg, module, name, args)?;
    build_normalized(reg, &normalized, depth)
}

pub(crate) fn node_generator_with_depth(
    reg: &Registry,
    module: Atom,
    node: &TypeNode,
    depth: u32,
) -> Result<GeneratorHandle, Error> {
    let lowerer = Lowerer::new(reg, module, depth);
    let plan = lowerer.lower(node, None)?;
    Ok(GeneratorHandle::from_boxed(fold(&plan, None)))
}

fn build_normalized(
    reg: &Registry,
    normalized: &Normalized,
    depth: u32,
) -> Result<GeneratorHandle, Error> {
    let lowerer = Lowerer::new(reg, normalized.module, depth);
    match &normalized.shape {
        Shape::Plain(node) => {
            let plan = lowerer.lower(node, None)?;
            Ok(GeneratorHandle::from_boxed(fold(&plan, None)))
        }
        Shape::RecursiveUnion { leaves, nodes } => {
            let leaf_plans = leaves
                .iter()
                .map(|leaf| lowerer.lower(leaf, None))
                .collect::<Result<Vec<_>, Error>>()?;
            let node_plans = nodes
                .iter()
                .map(|node| lowerer.lower(node, Some(normalized.name)))
                .collect::<Result<Vec<_>, Error>>()?;
            let base = fold_union(&leaf_plans, None);
            let grown = base
                .prop_recursive(
                    MAX_RECURSIVE_GEN_DEPTH,
                    RECURSIVE_GEN_TARGET_SIZE,
                    RECURSIVE_GEN_BRANCH_SIZE,
                    move |inner| {
                        Union::new(
                            node_plans
                                .iter()
                                .map(|plan| fold(plan, Some(&inner)))
                                .collect::<Vec<_>>(),
                        )
                    },
                )
                .boxed();
            Ok(GeneratorHandle::from_boxed(grown))
        }
        Shape::RecursiveWrap { rewritten, original } => {
            let base_plan = lowerer.lower(rewritten, None)?;
            let grow_plan = lowerer.lower(original, Some(normalized.name))?;
            let base = fold(&base_plan, None);
            let grown = base
                .prop_recursive(
                    MAX_RECURSIVE_GEN_DEPTH,
                    RECURSIVE_GEN_TARGET_SIZE,
                    RECURSIVE_GEN_BRANCH_SIZE,
                    move |inner| fold(&grow_plan, Some(&inner)),
                )
                .boxed();
            Ok(GeneratorHandle::from_boxed(grown))
        }
    }
}

fn fold_union(plans: &[Plan], slot: Option<&BoxedStrategy<Term>>) -> BoxedStrategy<Term> {
    match plans {
        [single] => fold(single, slot),
        many => Union::new(many.iter().map(|p| fold(p, slot)).collect::<Vec<_>>()).boxed(),
    }
}

fn fold(plan: &Plan, slot: Option<&BoxedStrategy<Term>>) -> BoxedStrategy<Term> {
    match plan {
        Plan::Any => term_strategy(),
        Plan::AtomName => atom_strategy(),
        Plan::Int => any::<i64>().prop_map(Term::Int).boxed(),
        Plan::PosInt => (1i64..=i64::MAX).prop_map(Term::Int).boxed(),
        Plan::NegInt => (i64::MIN..=-1i64).prop_map(Term::Int).boxed(),
        Plan::NonNegInt => (0i64..=i64::MAX).prop_map(Term::Int).boxed(),
        Plan::Float => any::<f64>().prop_map(Term::Float).boxed(),
        Plan::Bool => any::<bool>().prop_map(Term::bool_atom).boxed(),
        Plan::Ref => any::<u64>().prop_map(Term::Ref).boxed(),
        Plan::Bitstring => bitstring_strategy(),
        Plan::Binary => binary_strategy(),
        Plan::BinaryPattern(size, unit) => binary_pattern(*size, *unit),
        Plan::Constant(term) => Just(term.clone()).boxed(),
        Plan::IntRange(lo, hi) => (*lo..=*hi).prop_map(Term::Int).boxed(),
        Plan::Nil => Just(Term::nil()).boxed(),
        Plan::List { elem, nonempty } => {
            let min = usize::from(*nonempty);
            vec(fold(elem, slot), min..=MAX_CONTAINER_LEN)
                .prop_map(Term::List)
                .boxed()
        }
        Plan::Improper { head, tail, nonempty, maybe } => {
            fold_improper(head, tail, *nonempty, *maybe, slot)
        }
        Plan::Tuple(plans) => {
            zip_all(plans.iter().map(|p| fold(p, slot)).collect())
                .prop_map(Term::Tuple)
                .boxed()
        }
        Plan::TupleAny => vec(term_strategy(), 0..=MAX_TUPLE_ANY_LEN)
            .prop_map(Term::Tuple)
            .boxed(),
        Plan::Map(fields) => fold_map(fields, slot),
        Plan::MapAny => vec((term_strategy(), term_strategy()), 0..=MAX_TUPLE_ANY_LEN)
            .prop_map(|pairs| Term::Map(pairs.into_iter().collect::<TermMap>()))
            .boxed(),
        Plan::Union(plans) => fold_union(plans, slot),
        Plan::Weighted(pairs) => Union::new_weighted(
            pairs
                .iter()
                .map(|(weight, p)| (*weight, fold(p, slot)))
                .collect::<Vec<_>>(),
        )
        .boxed(),
        Plan::Iolist => iolist_strategy(),
        Plan::Iodata => Union::new(vec![binary_strategy(), iolist_strategy()]).boxed(),
        // Self references survive lowering only inside recursive shapes,
        // where the fold always supplies the previous depth's generator.
        Plan::SelfRef => match slot {
            Some(prev) => prev.clone(),
            None => Just(Term::nil()).boxed(),
        },
        Plan::External(handle) => handle.strategy(),
    }
}

fn fold_improper(
    head: &Plan,
    tail: &Plan,
    nonempty: bool,
    maybe: bool,
    slot: Option<&BoxedStrategy<Term>>,
) -> BoxedStrategy<Term> {
    let head_gen = fold(head, slot);
    let tail_gen = fold(tail, slot);
    let improper = (vec(head_gen.clone(), 1..=MAX_CONTAINER_LEN), tail_gen)
        .prop_map(|(heads, tail)| Term::improper(heads, tail))
        .boxed();
    if !maybe {
        return improper;
    }
    let min = usize::from(nonempty);
    let proper = vec(head_gen, min..=MAX_CONTAINER_LEN)
        .prop_map(Term::List)
        .boxed();
    Union::new(vec![proper, improper]).boxed()
}

// Per-field maps drawn independently, later fields left-merged into
// earlier ones so earlier required fields keep their keys.
fn fold_map(fields: &[PlanField], slot: Option<&BoxedStrategy<Term>>) -> BoxedStrategy<Term> {
    let mut acc: BoxedStrategy<TermMap> = Just(TermMap::default()).boxed();
    for field in fields {
        let drawn: BoxedStrategy<TermMap> = match field {
            PlanField::RequiredLiteral(key, value) => {
                let key = key.clone();
                fold(value, slot)
                    .prop_map(move |v| {
                        let mut m = TermMap::default();
                        m.insert(key.clone(), v);
                        m
                    })
                    .boxed()
            }
            PlanField::Required(key, value) => {
                vec((fold(key, slot), fold(value, slot)), 1..=MAX_CONTAINER_LEN)
                    .prop_map(|pairs| pairs.into_iter().collect::<TermMap>())
                    .boxed()
            }
            PlanField::Optional(key, value) => {
                vec((fold(key, slot), fold(value, slot)), 0..=MAX_CONTAINER_LEN)
                    .prop_map(|pairs| pairs.into_iter().collect::<TermMap>())
                    .boxed()
            }
        };
        acc = (acc, drawn)
            .prop_map(|(mut earlier, later)| {
                for (k, v) in later {
                    earlier.entry(k).or_insert(v);
                }
                earlier
            })
            .boxed();
    }
    acc.prop_map(Term::Map).boxed()
}

fn binary_pattern(size: u32, unit: u32) -> BoxedStrategy<Term> {
    if size == 0 && unit == 0 {
        return Just(Term::Bits(Bits::empty())).boxed();
    }
    if unit == 0 {
        return exact_bits(size as usize);
    }
    let size = size as usize;
    let unit = unit as usize;
    (0..=MAX_BINARY_PATTERN_REPEATS)
        .prop_flat_map(move |k| exact_bits(size + unit * k as usize))
        .boxed()
}
