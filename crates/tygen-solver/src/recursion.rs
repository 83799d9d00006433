//! Recursion detection and base-case rewriting.
//!
//! After inlining, a self-reference survives only as `UserRef` naming the
//! definition being normalized. Classification needs to know where those
//! markers sit; non-union recursion additionally needs a pruned,
//! non-recursive rendition of the body to serve as the unfolding base.

use crate::walk::{any_node, map_nodes};
use tygen_ast::{MapField, TypeNode};
use tygen_common::Atom;

/// Whether `node` structurally contains a reference to `name`.
pub fn contains_self(node: &TypeNode, name: Atom) -> bool {
    any_node(node, &|n| matches!(n, TypeNode::UserRef { name: n, .. } if *n == name))
}

/// Splices nested unions so no union is a direct child of another.
pub fn flatten_unions(node: TypeNode) -> TypeNode {
    map_nodes(node, &mut |n| match n {
        TypeNode::Union(alts) => TypeNode::union(alts),
        other => other,
    })
}

/// Rewrites away self-recursion to obtain a finite base case:
/// a list whose element mentions the definition becomes `[]`, a map drops
/// every optional field that mentions it, union alternatives mentioning it
/// are discarded, and other wrappers recurse into their children.
///
/// `None` means no prunable position exists and the recursion has no base
/// case.
pub fn prune_self(node: &TypeNode, name: Atom) -> Option<TypeNode> {
    if !contains_self(node, name) {
        return Some(node.clone());
    }
    match node {
        TypeNode::UserRef { .. } => None,
        TypeNode::List(_) | TypeNode::MaybeImproperList(_, _) => Some(TypeNode::Nil),
        TypeNode::NonemptyList(_)
        | TypeNode::ImproperList(_, _)
        | TypeNode::NonemptyImproperList(_, _)
        | TypeNode::NonemptyMaybeImproperList(_, _) => None,
        TypeNode::Tuple(elems) => {
            let pruned = elems
                .iter()
                .map(|e| prune_self(e, name))
                .collect::<Option<Vec<_>>>()?;
            Some(TypeNode::Tuple(pruned))
        }
        TypeNode::Map(fields) => {
            let mut kept = Vec::with_capacity(fields.len());
            for field in fields {
                match field {
                    MapField::Optional(k, v)
                        if contains_self(k, name) || contains_self(v, name) =>
                    {
                        // Prunable: zero matching entries is a legal map.
                    }
                    MapField::Optional(k, v) => {
                        kept.push(MapField::Optional(k.clone(), v.clone()));
                    }
                    MapField::Required(k, v) => {
                        kept.push(MapField::Required(
                            prune_self(k, name)?,
                            prune_self(v, name)?,
                        ));
                    }
                }
            }
            Some(TypeNode::Map(kept))
        }
        TypeNode::Union(alts) => {
            let leaves: Vec<TypeNode> = alts
                .iter()
                .filter_map(|alt| prune_self(alt, name))
                .collect();
            if leaves.is_empty() {
                None
            } else {
                Some(TypeNode::union(leaves))
            }
        }
        // A self-reference buried in reference arguments cannot be pruned.
        TypeNode::RemoteRef { .. } => None,
        _ => None,
    }
}
