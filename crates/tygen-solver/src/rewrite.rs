//! Caller-language argument rewriting.
//!
//! Rewrites `ArgSpec` values into well-formed `TypeNode`s. Anything not
//! covered by the caller language fails with `BadArgument`.

use tygen_ast::{ArgSpec, ContainerKind, MapArgField, MapField, OpaqueType, TypeNode, builtins};
use tygen_common::{Error, Term};

pub fn rewrite_args(args: &[ArgSpec]) -> Result<Vec<TypeNode>, Error> {
    args.iter().map(rewrite_arg).collect()
}

pub fn rewrite_arg(arg: &ArgSpec) -> Result<TypeNode, Error> {
    match arg {
        ArgSpec::Builtin(name) => builtins::lookup(*name).ok_or_else(|| {
            Error::bad_argument(format!(
                "{name} does not name a built-in type; use a user_type argument for local types"
            ))
        }),
        ArgSpec::Literal(term) => literal_node(term),
        ArgSpec::Container(kind, subargs) => container_node(*kind, subargs),
        ArgSpec::MapArg(fields) => {
            let fields = fields
                .iter()
                .map(|field| match field {
                    MapArgField::Required(k, v) => {
                        Ok(MapField::Required(rewrite_arg(k)?, rewrite_arg(v)?))
                    }
                    MapArgField::Optional(k, v) => {
                        Ok(MapField::Optional(rewrite_arg(k)?, rewrite_arg(v)?))
                    }
                })
                .collect::<Result<Vec<_>, Error>>()?;
            Ok(TypeNode::Map(fields))
        }
        ArgSpec::UserType(name, subargs) => Ok(TypeNode::UserRef {
            name: *name,
            args: rewrite_args(subargs)?,
        }),
        ArgSpec::RemoteType(module, name, subargs) => Ok(TypeNode::RemoteRef {
            module: *module,
            name: *name,
            args: rewrite_args(subargs)?,
        }),
        ArgSpec::Generator(generator) => {
            Ok(TypeNode::Opaque(OpaqueType::from_generator(generator.clone())))
        }
        ArgSpec::Validator(validator) => {
            Ok(TypeNode::Opaque(OpaqueType::from_validator(validator.clone())))
        }
        ArgSpec::Pair(generator, validator) => Ok(TypeNode::Opaque(OpaqueType::pair(
            generator.clone(),
            validator.clone(),
        ))),
    }
}

fn literal_node(term: &Term) -> Result<TypeNode, Error> {
    match term {
        Term::Atom(a) => Ok(TypeNode::AtomLit(*a)),
        Term::Int(n) => Ok(TypeNode::IntLit(*n)),
        other => Err(Error::bad_argument(format!(
            "literal type arguments must be atoms or integers, got {other}"
        ))),
    }
}

fn container_node(kind: ContainerKind, subargs: &[ArgSpec]) -> Result<TypeNode, Error> {
    let nodes = rewrite_args(subargs)?;
    match kind {
        ContainerKind::Tuple => Ok(TypeNode::Tuple(nodes)),
        ContainerKind::List | ContainerKind::NonemptyList => {
            let [elem] = one(kind, nodes)?;
            Ok(match kind {
                ContainerKind::List => TypeNode::List(Box::new(elem)),
                _ => TypeNode::NonemptyList(Box::new(elem)),
            })
        }
        ContainerKind::ImproperList
        | ContainerKind::NonemptyImproperList
        | ContainerKind::MaybeImproperList
        | ContainerKind::NonemptyMaybeImproperList => {
            let [head, tail] = two(kind, nodes)?;
            let head = Box::new(head);
            let tail = Box::new(tail);
            Ok(match kind {
                ContainerKind::ImproperList => TypeNode::ImproperList(head, tail),
                ContainerKind::NonemptyImproperList => TypeNode::NonemptyImproperList(head, tail),
                ContainerKind::MaybeImproperList => TypeNode::MaybeImproperList(head, tail),
                _ => TypeNode::NonemptyMaybeImproperList(head, tail),
            })
        }
    }
}

fn one(kind: ContainerKind, nodes: Vec<TypeNode>) -> Result<[TypeNode; 1], Error> {
    <[TypeNode; 1]>::try_from(nodes)
        .map_err(|nodes| wrong_subargs(kind, 1, nodes.len()))
}

fn two(kind: ContainerKind, nodes: Vec<TypeNode>) -> Result<[TypeNode; 2], Error> {
    <[TypeNode; 2]>::try_from(nodes)
        .map_err(|nodes| wrong_subargs(kind, 2, nodes.len()))
}

fn wrong_subargs(kind: ContainerKind, want: usize, got: usize) -> Error {
    Error::bad_argument(format!(
        "{kind:?} container takes {want} subargument(s), got {got}"
    ))
}
