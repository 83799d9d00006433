//! Assembling validators from normalized types.

use crate::check::{Check, Lowerer};
use crate::eval::{RecPredicate, eval};
use std::sync::Arc;
use tygen_ast::TypeNode;
use tygen_common::{Atom, Error, ValidatorHandle};
use tygen_registry::Registry;
use tygen_solver::normalize::Shape;

/// Builds a validator for the named type. Shares the generator's
/// normalized AST and failure set.
pub fn validator_for(
    reg: &Registry,
    module: Atom,
    name: Atom,
    args: Vec<TypeNode>,
) -> Result<ValidatorHandle, Error> {
    validator_with_depth(reg, module, name, args, 0)
}

/// Builds a validator for a bare type expression, as the spec checker does
/// for return positions.
pub fn node_validator(reg: &Registry, module: Atom, node: &TypeNode) -> Result<ValidatorHandle, Error> {
    node_validator_with_depth(reg, module, node, 0)
}

pub(crate) fn node_validator_with_depth(
    reg: &Registry,
    module: Atom,
    node: &TypeNode,
    depth: u32,
) -> Result<ValidatorHandle, Error> {
    let lowerer = Lowerer::new(reg, module, depth);
    let check = lowerer.lower(node, None)?;
    Ok(plain_handle(check))
}

pub(crate) fn validator_with_depth(
    reg: &Registry,
    module: Atom,
    name: Atom,
    args: Vec<TypeNode>,
    depth: u32,
) -> Result<ValidatorHandle, Error> {
    let normalized = tygen_solver::normalize(reg, module, name, args)?;
    let lowerer = Lowerer::new(reg, normalized.module, depth);
    match &normalized.shape {
        Shape::Plain(node) => {
            let check = lowerer.lower(node, None)?;
            Ok(plain_handle(check))
        }
        Shape::RecursiveUnion { leaves, nodes } => {
            let base = union_check(
                leaves
                    .iter()
                    .map(|leaf| lowerer.lower(leaf, None))
                    .collect::<Result<Vec<_>, Error>>()?,
            );
            let nodes = nodes
                .iter()
                .map(|node| lowerer.lower(node, Some(normalized.name)))
                .collect::<Result<Vec<_>, Error>>()?;
            Ok(recursive_handle(base, nodes))
        }
        Shape::RecursiveWrap { rewritten, original } => {
            let base = lowerer.lower(rewritten, None)?;
            let node = lowerer.lower(original, Some(normalized.name))?;
            Ok(recursive_handle(base, vec![node]))
        }
    }
}

fn plain_handle(check: Check) -> ValidatorHandle {
    ValidatorHandle::new(move |term| eval(&check, term, None, 0))
}

// The fixed point: the predicate closes over itself through RecPredicate,
// so SelfRef holes re-enter the whole predicate.
fn recursive_handle(base: Check, nodes: Vec<Check>) -> ValidatorHandle {
    let predicate = Arc::new(RecPredicate { base, nodes });
    ValidatorHandle::new(move |term| predicate.accept(term, 0))
}

fn union_check(mut checks: Vec<Check>) -> Check {
    if checks.len() == 1 {
        checks.remove(0)
    } else {
        Check::Union(checks)
    }
}
