//! Shared AST traversal helpers.

use tygen_ast::{MapField, TypeNode};
use tygen_common::Error;

/// Bottom-up rebuild: children are transformed first, then `f` is applied
/// to the rebuilt node. Leaves go straight to `f`.
pub fn try_map_nodes(
    node: TypeNode,
    f: &mut impl FnMut(TypeNode) -> Result<TypeNode, Error>,
) -> Result<TypeNode, Error> {
    let rebuilt = match node {
        TypeNode::List(t) => TypeNode::List(Box::new(try_map_nodes(*t, f)?)),
        TypeNode::NonemptyList(t) => TypeNode::NonemptyList(Box::new(try_map_nodes(*t, f)?)),
        TypeNode::ImproperList(h, t) => TypeNode::ImproperList(
            Box::new(try_map_nodes(*h, f)?),
            Box::new(try_map_nodes(*t, f)?),
        ),
        TypeNode::NonemptyImproperList(h, t) => TypeNode::NonemptyImproperList(
            Box::new(try_map_nodes(*h, f)?),
            Box::new(try_map_nodes(*t, f)?),
        ),
        TypeNode::MaybeImproperList(h, t) => TypeNode::MaybeImproperList(
            Box::new(try_map_nodes(*h, f)?),
            Box::new(try_map_nodes(*t, f)?),
        ),
        TypeNode::NonemptyMaybeImproperList(h, t) => TypeNode::NonemptyMaybeImproperList(
            Box::new(try_map_nodes(*h, f)?),
            Box::new(try_map_nodes(*t, f)?),
        ),
        TypeNode::Tuple(elems) => TypeNode::Tuple(
            elems
                .into_iter()
                .map(|e| try_map_nodes(e, f))
                .collect::<Result<Vec<_>, Error>>()?,
        ),
        TypeNode::Map(fields) => TypeNode::Map(
            fields
                .into_iter()
                .map(|field| {
                    Ok(match field {
                        MapField::Required(k, v) => {
                            MapField::Required(try_map_nodes(k, f)?, try_map_nodes(v, f)?)
                        }
                        MapField::Optional(k, v) => {
                            MapField::Optional(try_map_nodes(k, f)?, try_map_nodes(v, f)?)
                        }
                    })
                })
                .collect::<Result<Vec<_>, Error>>()?,
        ),
        TypeNode::Union(alts) => TypeNode::Union(
            alts.into_iter()
                .map(|a| try_map_nodes(a, f))
                .collect::<Result<Vec<_>, Error>>()?,
        ),
        TypeNode::UserRef { name, args } => TypeNode::UserRef {
            name,
            args: args
                .into_iter()
                .map(|a| try_map_nodes(a, f))
                .collect::<Result<Vec<_>, Error>>()?,
        },
        TypeNode::RemoteRef { module, name, args } => TypeNode::RemoteRef {
            module,
            name,
            args: args
                .into_iter()
                .map(|a| try_map_nodes(a, f))
                .collect::<Result<Vec<_>, Error>>()?,
        },
        leaf => leaf,
    };
    f(rebuilt)
}

/// Infallible variant of [`try_map_nodes`].
pub fn map_nodes(node: TypeNode, f: &mut impl FnMut(TypeNode) -> TypeNode) -> TypeNode {
    // The fallible walker never errors when `f` cannot.
    let mut wrap = |n: TypeNode| Ok(f(n));
    match try_map_nodes(node, &mut wrap) {
        Ok(node) => node,
        Err(_) => TypeNode::None,
    }
}

/// Immediate children of a node, including map field keys and values and
/// reference arguments.
pub fn children(node: &TypeNode) -> Vec<&TypeNode> {
    match node {
        TypeNode::List(t) | TypeNode::NonemptyList(t) => vec![t],
        TypeNode::ImproperList(h, t)
        | TypeNode::NonemptyImproperList(h, t)
        | TypeNode::MaybeImproperList(h, t)
        | TypeNode::NonemptyMaybeImproperList(h, t) => vec![h, t],
        TypeNode::Tuple(elems) | TypeNode::Union(elems) => elems.iter().collect(),
        TypeNode::Map(fields) => fields
            .iter()
            .flat_map(|field| [field.key(), field.value()])
            .collect(),
        TypeNode::UserRef { args, .. } | TypeNode::RemoteRef { args, .. } => args.iter().collect(),
        _ => Vec::new(),
    }
}

/// Whether `pred` holds for `node` or any descendant.
pub fn any_node(node: &TypeNode, pred: &impl Fn(&TypeNode) -> bool) -> bool {
    pred(node) || children(node).into_iter().any(|child| any_node(child, pred))
}
