//! The normalization pipeline.
//!
//! `raw reference -> select definition -> substitute parameters -> inline
//! user types -> flatten unions -> classify recursion`. The output is a
//! canonical, recursion-aware shape both builders interpret.

use crate::inline::inline_refs;
use crate::recursion::{contains_self, flatten_unions, prune_self};
use crate::substitute::substitute_params;
use smallvec::SmallVec;
use tygen_ast::{TypeDef, TypeNode};
use tygen_common::{Atom, Error};
use tygen_registry::Registry;

/// How the normalized body recurses.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// No self-reference; interpret directly.
    Plain(TypeNode),
    /// A union split into non-recursive `leaves` and self-referential
    /// `nodes`; generated by depth-bounded unfolding from the leaves.
    RecursiveUnion { leaves: Vec<TypeNode>, nodes: Vec<TypeNode> },
    /// Self-reference outside any union. `rewritten` is the pruned,
    /// non-recursive base; `original` keeps the self markers for growth.
    RecursiveWrap { rewritten: TypeNode, original: TypeNode },
}

/// A normalized type, tagged with where it came from so builders can
/// substitute self-references.
#[derive(Clone, Debug, PartialEq)]
pub struct Normalized {
    pub module: Atom,
    pub name: Atom,
    pub shape: Shape,
}

pub fn normalize(
    reg: &Registry,
    module: Atom,
    name: Atom,
    args: Vec<TypeNode>,
) -> Result<Normalized, Error> {
    let def = reg.select(module, name, args.len() as u32)?;
    normalize_def(reg, module, &def, args)
}

/// Normalizes a selected definition against already-rewritten argument
/// nodes. Exposed separately so the pipeline can be exercised on local
/// definitions in tests.
pub fn normalize_def(
    reg: &Registry,
    module: Atom,
    def: &TypeDef,
    args: Vec<TypeNode>,
) -> Result<Normalized, Error> {
    let body = substitute_params(def, args)?;
    let body = inline_refs(reg, module, def.name, body)?;
    let body = flatten_unions(body);
    let shape = classify(def.name, body)?;
    tracing::debug!(
        "normalized {}.{} as {}",
        module,
        def.name,
        match &shape {
            Shape::Plain(_) => "plain",
            Shape::RecursiveUnion { .. } => "recursive union",
            Shape::RecursiveWrap { .. } => "recursive wrap",
        }
    );
    Ok(Normalized { module, name: def.name, shape })
}

fn classify(name: Atom, body: TypeNode) -> Result<Shape, Error> {
    if !contains_self(&body, name) {
        return Ok(Shape::Plain(body));
    }
    match body {
        TypeNode::Union(alts) => {
            let mut leaves: SmallVec<[TypeNode; 8]> = SmallVec::new();
            let mut nodes: SmallVec<[TypeNode; 8]> = SmallVec::new();
            for alt in alts {
                if contains_self(&alt, name) {
                    nodes.push(alt);
                } else {
                    leaves.push(alt);
                }
            }
            if leaves.is_empty() {
                return Err(Error::infinite_type(name));
            }
            Ok(Shape::RecursiveUnion {
                leaves: leaves.into_vec(),
                nodes: nodes.into_vec(),
            })
        }
        other => match prune_self(&other, name) {
            Some(rewritten) => Ok(Shape::RecursiveWrap { rewritten, original: other }),
            None => Err(Error::infinite_type(name)),
        },
    }
}
