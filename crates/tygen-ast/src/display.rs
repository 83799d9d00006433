//! Rendering of types for error messages and logs.

use crate::node::{MapField, TypeNode};
use std::fmt;

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Any => f.write_str("term()"),
            TypeNode::None => f.write_str("none()"),
            TypeNode::Atom => f.write_str("atom()"),
            TypeNode::AtomLit(a) => write!(f, ":{a}"),
            TypeNode::Int => f.write_str("integer()"),
            TypeNode::PosInt => f.write_str("pos_integer()"),
            TypeNode::NegInt => f.write_str("neg_integer()"),
            TypeNode::NonNegInt => f.write_str("non_neg_integer()"),
            TypeNode::IntLit(n) => write!(f, "{n}"),
            TypeNode::Range(lo, hi) => write!(f, "{lo}..{hi}"),
            TypeNode::Float => f.write_str("float()"),
            TypeNode::Bool => f.write_str("boolean()"),
            TypeNode::Byte => f.write_str("byte()"),
            TypeNode::Char => f.write_str("char()"),
            TypeNode::Arity => f.write_str("arity()"),
            TypeNode::Bitstring => f.write_str("bitstring()"),
            TypeNode::Binary => f.write_str("binary()"),
            TypeNode::BinaryPattern(size, unit) => write!(f, "<<_::{size}, _::_*{unit}>>"),
            TypeNode::Ref => f.write_str("reference()"),
            TypeNode::Nil => f.write_str("[]"),
            TypeNode::List(t) => write!(f, "[{t}]"),
            TypeNode::NonemptyList(t) => write!(f, "[{t}, ...]"),
            TypeNode::ImproperList(h, t) => write!(f, "improper_list({h}, {t})"),
            TypeNode::NonemptyImproperList(h, t) => {
                write!(f, "nonempty_improper_list({h}, {t})")
            }
            TypeNode::MaybeImproperList(h, t) => write!(f, "maybe_improper_list({h}, {t})"),
            TypeNode::NonemptyMaybeImproperList(h, t) => {
                write!(f, "nonempty_maybe_improper_list({h}, {t})")
            }
            TypeNode::Tuple(elems) => {
                f.write_str("{")?;
                write_joined(f, elems, ", ")?;
                f.write_str("}")
            }
            TypeNode::TupleAny => f.write_str("tuple()"),
            TypeNode::Map(fields) => {
                f.write_str("%{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match field {
                        MapField::Required(k, v) => write!(f, "{k} => {v}")?,
                        MapField::Optional(k, v) => write!(f, "optional({k}) => {v}")?,
                    }
                }
                f.write_str("}")
            }
            TypeNode::MapAny => f.write_str("map()"),
            TypeNode::EmptyMap => f.write_str("%{}"),
            TypeNode::Union(alts) => write_joined(f, alts, " | "),
            TypeNode::UserRef { name, args } => write_ref(f, None, *name, args),
            TypeNode::RemoteRef { module, name, args } => write_ref(f, Some(*module), *name, args),
            TypeNode::Var(name) => write!(f, "{name}"),
            TypeNode::Charlist => f.write_str("charlist()"),
            TypeNode::NonemptyCharlist => f.write_str("nonempty_charlist()"),
            TypeNode::Iolist => f.write_str("iolist()"),
            TypeNode::Iodata => f.write_str("iodata()"),
            TypeNode::Mfa => f.write_str("mfa()"),
            TypeNode::ModuleName => f.write_str("module()"),
            TypeNode::NodeName => f.write_str("node()"),
            TypeNode::Number => f.write_str("number()"),
            TypeNode::Timeout => f.write_str("timeout()"),
            TypeNode::Str => f.write_str("string()"),
            TypeNode::NonemptyStr => f.write_str("nonempty_string()"),
            TypeNode::Pid => f.write_str("pid()"),
            TypeNode::Port => f.write_str("port()"),
            TypeNode::Fun => f.write_str("fun()"),
            TypeNode::Opaque(opaque) => write!(f, "opaque#{}", opaque.id()),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[TypeNode], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_ref(
    f: &mut fmt::Formatter<'_>,
    module: Option<tygen_common::Atom>,
    name: tygen_common::Atom,
    args: &[TypeNode],
) -> fmt::Result {
    if let Some(module) = module {
        write!(f, "{module}.")?;
    }
    write!(f, "{name}(")?;
    write_joined(f, args, ", ")?;
    f.write_str(")")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_shapes() {
        let t = TypeNode::tuple(vec![TypeNode::Atom, TypeNode::Int]);
        assert_eq!(t.to_string(), "{atom(), integer()}");
        assert_eq!(TypeNode::Range(0, 10).to_string(), "0..10");
        let u = TypeNode::Union(vec![TypeNode::Nil, TypeNode::user("tt")]);
        assert_eq!(u.to_string(), "[] | tt()");
    }
}
