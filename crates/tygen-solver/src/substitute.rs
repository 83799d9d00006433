//! Type-parameter substitution.

use crate::walk::{children, map_nodes};
use rustc_hash::FxHashMap;
use tygen_ast::{TypeDef, TypeNode};
use tygen_common::{Atom, Error};

/// Substitutes `args` for the definition's parameters in its body. Every
/// variable must end up bound; an unbound variable (a body variable not
/// named by the parameter list) is a programmer error in the definition.
pub fn substitute_params(def: &TypeDef, args: Vec<TypeNode>) -> Result<TypeNode, Error> {
    if def.params.len() != args.len() {
        return Err(Error::arity_mismatch(
            def.name,
            format!("expected {} argument(s), got {}", def.params.len(), args.len()),
        ));
    }
    let bindings: FxHashMap<Atom, TypeNode> =
        def.params.iter().copied().zip(args).collect();
    let body = substitute_vars(def.body.clone(), &bindings);
    assert_no_vars(&body, def.name)?;
    Ok(body)
}

/// Replaces each `Var` that `bindings` names; other variables are left in
/// place (the spec checker substitutes bounded variables in several
/// passes).
pub fn substitute_vars(node: TypeNode, bindings: &FxHashMap<Atom, TypeNode>) -> TypeNode {
    map_nodes(node, &mut |n| match n {
        TypeNode::Var(name) => match bindings.get(&name) {
            Some(replacement) => replacement.clone(),
            None => TypeNode::Var(name),
        },
        other => other,
    })
}

/// Fails with a `WrongArity`-kind error if any `Var` survives.
pub fn assert_no_vars(node: &TypeNode, context: Atom) -> Result<(), Error> {
    if let Some(unbound) = first_var(node) {
        return Err(Error::arity_mismatch(
            context,
            format!("unbound type variable {unbound}"),
        ));
    }
    Ok(())
}

fn first_var(node: &TypeNode) -> Option<Atom> {
    if let TypeNode::Var(name) = node {
        return Some(*name);
    }
    children(node).into_iter().find_map(first_var)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitution_binds_in_order() {
        let def = TypeDef::new(
            "dict",
            vec!["k", "v"],
            TypeNode::list(TypeNode::tuple(vec![TypeNode::var("k"), TypeNode::var("v")])),
        );
        let body = substitute_params(&def, vec![TypeNode::Atom, TypeNode::Int]).unwrap();
        assert_eq!(
            body,
            TypeNode::list(TypeNode::tuple(vec![TypeNode::Atom, TypeNode::Int]))
        );
    }

    #[test]
    fn test_wrong_argument_count() {
        let def = TypeDef::new("pair", vec!["a"], TypeNode::var("a"));
        let err = substitute_params(&def, vec![]).unwrap_err();
        assert_eq!(err.kind, tygen_common::ErrorKind::WrongArity);
    }

    #[test]
    fn test_unbound_variable_rejected() {
        let def = TypeDef::new("bad", vec!["a"], TypeNode::tuple(vec![
            TypeNode::var("a"),
            TypeNode::var("phantom"),
        ]));
        let err = substitute_params(&def, vec![TypeNode::Int]).unwrap_err();
        assert_eq!(err.kind, tygen_common::ErrorKind::WrongArity);
        assert!(err.message.contains("phantom"));
    }
}
