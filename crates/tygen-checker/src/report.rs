//! Campaign configuration and per-overload results.

use tygen_common::limits::{DEFAULT_CHECK_CASES, DEFAULT_MAX_SHRINK_ITERS};
use tygen_common::{Atom, Term};

/// Knobs for one spec-check campaign.
#[derive(Clone, Copy, Debug)]
pub struct CheckConfig {
    /// Argument tuples drawn per overload.
    pub cases: u32,
    /// Shrink budget once a counterexample is found.
    pub max_shrink_iters: u32,
}

impl Default for CheckConfig {
    fn default() -> CheckConfig {
        CheckConfig {
            cases: DEFAULT_CHECK_CASES,
            max_shrink_iters: DEFAULT_MAX_SHRINK_ITERS,
        }
    }
}

/// The outcome of checking one overload.
#[derive(Clone, Debug)]
pub struct SpecMeta {
    pub module: Atom,
    pub name: Atom,
    pub arity: u32,
    /// Index of the overload within the function's signatures.
    pub overload: usize,
    /// Argument tuples drawn.
    pub cases: u32,
    pub failure: Option<SpecFailure>,
}

impl SpecMeta {
    pub fn is_ok(&self) -> bool {
        self.failure.is_none()
    }
}

/// A shrunken counterexample: arguments whose return escaped the declared
/// return type.
#[derive(Clone, Debug)]
pub struct SpecFailure {
    pub args: Vec<Term>,
    /// What the callable returned for `args`; absent when re-invocation
    /// raised instead of returning.
    pub returned: Option<Term>,
}

impl std::fmt::Display for SpecFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "args (")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")?;
        match &self.returned {
            Some(term) => write!(f, " returned {term}"),
            None => f.write_str(" raised"),
        }
    }
}

/// Aggregation across overloads: `Ok` carries every overload's meta,
/// `Failed` carries the failing ones only.
#[derive(Clone, Debug)]
pub enum SpecReport {
    Ok(Vec<SpecMeta>),
    Failed(Vec<SpecMeta>),
}

impl SpecReport {
    pub fn is_ok(&self) -> bool {
        matches!(self, SpecReport::Ok(_))
    }

    pub fn metas(&self) -> &[SpecMeta] {
        match self {
            SpecReport::Ok(metas) | SpecReport::Failed(metas) => metas,
        }
    }
}
