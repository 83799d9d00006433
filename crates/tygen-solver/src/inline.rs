//! User-type inlining.
//!
//! Replaces every `UserRef` in a body with the referenced definition's
//! (parameter-substituted) body, except:
//! - references to the definition being normalized are kept as
//!   self-reference markers for the recursion engine, and
//! - references that are cyclic without passing through the root are kept
//!   unexpanded; the builders resolve them by re-entering the pipeline,
//!   where the referenced definition gets its own recursion handling.
//!
//! Remote references are never inlined here.

use crate::substitute::substitute_params;
use crate::walk::try_map_nodes;
use tygen_ast::TypeNode;
use tygen_common::limits::{MAX_INLINE_DEPTH, STACK_GROW_SIZE, STACK_RED_ZONE};
use tygen_common::{Atom, Error};
use tygen_registry::Registry;

pub fn inline_refs(
    reg: &Registry,
    module: Atom,
    root: Atom,
    node: TypeNode,
) -> Result<TypeNode, Error> {
    let mut stack = Vec::new();
    inline_node(reg, module, root, node, &mut stack, 0)
}

fn inline_node(
    reg: &Registry,
    module: Atom,
    root: Atom,
    node: TypeNode,
    stack: &mut Vec<(Atom, u32)>,
    depth: u32,
) -> Result<TypeNode, Error> {
    if depth > MAX_INLINE_DEPTH {
        return Err(Error::infinite_type(root));
    }
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
        try_map_nodes(node, &mut |n| match n {
            TypeNode::UserRef { name, args } if name == root => {
                // Self-reference marker; the recursion engine owns it.
                Ok(TypeNode::UserRef { name, args })
            }
            TypeNode::UserRef { name, args } => {
                let key = (name, args.len() as u32);
                if stack.contains(&key) {
                    tracing::trace!("keeping cyclic reference to {name} unexpanded");
                    return Ok(TypeNode::UserRef { name, args });
                }
                let def = reg.select(module, name, args.len() as u32)?;
                let body = substitute_params(&def, args)?;
                stack.push(key);
                let inlined = inline_node(reg, module, root, body, stack, depth + 1);
                stack.pop();
                inlined
            }
            other => Ok(other),
        })
    })
}
