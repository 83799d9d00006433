//! The built-in type-name table.
//!
//! Maps the zero-argument built-in names of the type language to their
//! `TypeNode` forms. Parameterized built-ins (`list(t)`, tuples, maps)
//! arrive through the container forms of the caller language instead.

use crate::node::TypeNode;
use tygen_common::Atom;

/// Resolves a built-in type name. `None` means the name is not a built-in
/// (the caller may still mean a user type).
pub fn lookup(name: Atom) -> Option<TypeNode> {
    lookup_str(&name.as_str())
}

pub fn lookup_str(name: &str) -> Option<TypeNode> {
    let node = match name {
        "any" | "term" => TypeNode::Any,
        "none" | "no_return" => TypeNode::None,
        "atom" => TypeNode::Atom,
        "module" => TypeNode::ModuleName,
        "node" => TypeNode::NodeName,
        "integer" | "int" => TypeNode::Int,
        "pos_integer" => TypeNode::PosInt,
        "neg_integer" => TypeNode::NegInt,
        "non_neg_integer" => TypeNode::NonNegInt,
        "float" => TypeNode::Float,
        "number" => TypeNode::Number,
        "boolean" | "bool" => TypeNode::Bool,
        "byte" => TypeNode::Byte,
        "char" => TypeNode::Char,
        "arity" => TypeNode::Arity,
        "bitstring" => TypeNode::Bitstring,
        "binary" => TypeNode::Binary,
        "reference" => TypeNode::Ref,
        "nil" => TypeNode::Nil,
        "list" => TypeNode::list(TypeNode::Any),
        "nonempty_list" => TypeNode::nonempty_list(TypeNode::Any),
        "maybe_improper_list" => {
            TypeNode::MaybeImproperList(Box::new(TypeNode::Any), Box::new(TypeNode::Any))
        }
        "nonempty_maybe_improper_list" => {
            TypeNode::NonemptyMaybeImproperList(Box::new(TypeNode::Any), Box::new(TypeNode::Any))
        }
        "tuple" => TypeNode::TupleAny,
        "map" => TypeNode::MapAny,
        "charlist" => TypeNode::Charlist,
        "nonempty_charlist" => TypeNode::NonemptyCharlist,
        "string" => TypeNode::Str,
        "nonempty_string" => TypeNode::NonemptyStr,
        "iolist" => TypeNode::Iolist,
        "iodata" => TypeNode::Iodata,
        "mfa" => TypeNode::Mfa,
        "timeout" => TypeNode::Timeout,
        "pid" => TypeNode::Pid,
        "port" => TypeNode::Port,
        "fun" | "function" => TypeNode::Fun,
        _ => return None,
    };
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names() {
        assert_eq!(lookup_str("int"), Some(TypeNode::Int));
        assert_eq!(lookup_str("term"), Some(TypeNode::Any));
        assert_eq!(lookup_str("no_return"), Some(TypeNode::None));
        assert_eq!(lookup_str("list"), Some(TypeNode::list(TypeNode::Any)));
    }

    #[test]
    fn test_unknown_name_is_none() {
        assert_eq!(lookup_str("definitely_not_a_builtin"), None);
    }
}
