//! Typed error values.
//!
//! Every failure surfaces as an `Error` carrying a machine-readable
//! `ErrorKind` plus a human-readable message. Errors are values, not
//! strings; callers match on the kind.

use crate::interner::Atom;
use serde::Serialize;
use std::fmt;

/// Machine-readable failure categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The registry collaborator knows no such module.
    UnknownModule,
    /// The module has no type definition with the requested name.
    UnknownType,
    /// No definition with the requested parameter count, or substitution
    /// did not exhaust variables and arguments exactly.
    WrongArity,
    /// Malformed caller input to the argument rewriter.
    BadArgument,
    /// The empty type was requested; nothing can be generated.
    NoInhabitants,
    /// The type cannot be fabricated (process handles, ports, callables).
    Unsupported,
    /// A remote reference resolved to a protocol.
    Protocol,
    /// Recursion without a reachable base case.
    InfiniteType,
    /// No function signatures for the requested name/arity.
    MissingSpec,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UnknownModule => "unknown_module",
            ErrorKind::UnknownType => "unknown_type",
            ErrorKind::WrongArity => "wrong_arity",
            ErrorKind::BadArgument => "bad_argument",
            ErrorKind::NoInhabitants => "no_inhabitants",
            ErrorKind::Unsupported => "unsupported",
            ErrorKind::Protocol => "protocol",
            ErrorKind::InfiniteType => "infinite_type",
            ErrorKind::MissingSpec => "missing_spec",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Error {
        Error { kind, message: message.into() }
    }

    pub fn unknown_module(module: Atom) -> Error {
        Error::new(ErrorKind::UnknownModule, format!("unknown module {module}"))
    }

    pub fn unknown_type(module: Atom, name: Atom) -> Error {
        Error::new(
            ErrorKind::UnknownType,
            format!("module {module} has no type named {name}"),
        )
    }

    pub fn wrong_arity(module: Atom, name: Atom, got: usize) -> Error {
        Error::new(
            ErrorKind::WrongArity,
            format!("no definition of {module}.{name} takes {got} argument(s)"),
        )
    }

    pub fn arity_mismatch(name: Atom, detail: impl Into<String>) -> Error {
        Error::new(
            ErrorKind::WrongArity,
            format!("parameter mismatch in {name}: {}", detail.into()),
        )
    }

    pub fn bad_argument(detail: impl Into<String>) -> Error {
        Error::new(ErrorKind::BadArgument, detail)
    }

    pub fn no_inhabitants(what: impl Into<String>) -> Error {
        Error::new(
            ErrorKind::NoInhabitants,
            format!("{} has no inhabitants to draw from", what.into()),
        )
    }

    pub fn unsupported(what: impl Into<String>) -> Error {
        Error::new(
            ErrorKind::Unsupported,
            format!("cannot generate values of {}", what.into()),
        )
    }

    pub fn protocol(module: Atom) -> Error {
        Error::new(
            ErrorKind::Protocol,
            format!("{module} is a protocol; open dispatch has no sampleable inhabitants"),
        )
    }

    pub fn infinite_type(name: Atom) -> Error {
        Error::new(
            ErrorKind::InfiniteType,
            format!("recursive type {name} has no non-recursive base case"),
        )
    }

    pub fn missing_spec(module: Atom, name: Atom, arity: u32) -> Error {
        Error::new(
            ErrorKind::MissingSpec,
            format!("no spec for {module}.{name}/{arity}"),
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)
    }
}

impl std::error::Error for Error {}
