//! The spec-check campaign.

use crate::report::{CheckConfig, SpecFailure, SpecMeta, SpecReport};
use proptest::test_runner::{Config, TestCaseError, TestError, TestRunner};
use rustc_hash::{FxHashMap, FxHashSet};
use tygen_ast::{FunSpec, TypeNode};
use tygen_common::{Atom, Error};
use tygen_gen::strategies::zip_all;
use tygen_registry::{NativeFun, Registry};
use tygen_solver::substitute_vars;
use tygen_solver::walk::children;

/// Checks every overload of `module.name/arity` with default settings.
pub fn check_spec(
    reg: &Registry,
    module: Atom,
    name: Atom,
    arity: u32,
) -> Result<SpecReport, Error> {
    check_spec_with(reg, module, name, arity, &CheckConfig::default())
}

pub fn check_spec_with(
    reg: &Registry,
    module: Atom,
    name: Atom,
    arity: u32,
    config: &CheckConfig,
) -> Result<SpecReport, Error> {
    let specs = reg.specs(module, name, arity)?;
    if specs.is_empty() {
        return Err(Error::missing_spec(module, name, arity));
    }
    let fun = reg.fun(module, name, arity)?;

    let mut metas = Vec::with_capacity(specs.len());
    for (overload, spec) in specs.iter().enumerate() {
        tracing::debug!("checking overload {} of {}.{}/{}", overload, module, name, arity);
        let meta = check_overload(reg, module, name, arity, overload, spec, &fun, config)?;
        if let Some(failure) = &meta.failure {
            tracing::debug!("overload {} failed: {}", overload, failure);
        }
        metas.push(meta);
    }

    if metas.iter().all(SpecMeta::is_ok) {
        Ok(SpecReport::Ok(metas))
    } else {
        Ok(SpecReport::Failed(
            metas.into_iter().filter(|m| !m.is_ok()).collect(),
        ))
    }
}

fn check_overload(
    reg: &Registry,
    module: Atom,
    name: Atom,
    arity: u32,
    overload: usize,
    spec: &FunSpec,
    fun: &NativeFun,
    config: &CheckConfig,
) -> Result<SpecMeta, Error> {
    // Bounded type variables are substituted before anything is built.
    let bindings: FxHashMap<Atom, TypeNode> = spec.vars.iter().cloned().collect();
    let args: Vec<TypeNode> = spec
        .args
        .iter()
        .map(|a| substitute_vars(a.clone(), &bindings))
        .collect();
    let ret = substitute_vars(spec.ret.clone(), &bindings);

    // A return type transitively containing no_return never fails the
    // property: any return is acceptable and raises are expected.
    let no_return = contains_no_return(reg, module, &ret, &mut FxHashSet::default())?;
    let validator = if no_return {
        None
    } else {
        Some(tygen_valid::node_validator(reg, module, &ret)?)
    };

    let arg_gens = args
        .iter()
        .map(|a| tygen_gen::node_generator(reg, module, a).map(|g| g.strategy()))
        .collect::<Result<Vec<_>, Error>>()?;
    let tuple_gen = zip_all(arg_gens);

    let mut runner = TestRunner::new(Config {
        cases: config.cases,
        max_shrink_iters: config.max_shrink_iters,
        failure_persistence: None,
        ..Config::default()
    });

    let campaign_fun = fun.clone();
    let campaign_validator = validator.clone();
    let outcome = runner.run(&tuple_gen, move |drawn| {
        match campaign_fun(&drawn) {
            Ok(returned) => match &campaign_validator {
                Some(v) if !v.check(&returned) => Err(TestCaseError::fail(format!(
                    "returned {returned}, which escapes the declared return type"
                ))),
                _ => Ok(()),
            },
            // Raises are absorbed: only return-value mismatches count.
            Err(_raise) => Ok(()),
        }
    });

    let failure = match outcome {
        Ok(()) => None,
        Err(TestError::Fail(_, shrunken)) => {
            let returned = fun(&shrunken).ok();
            Some(SpecFailure { args: shrunken, returned })
        }
        Err(TestError::Abort(reason)) => {
            return Err(Error::bad_argument(format!("campaign aborted: {reason}")));
        }
    };

    Ok(SpecMeta {
        module,
        name,
        arity,
        overload,
        cases: config.cases,
        failure,
    })
}

// Whether the type mentions no_return anywhere, following local and
// remote references through the registry. The visited set cuts cycles.
fn contains_no_return(
    reg: &Registry,
    module: Atom,
    node: &TypeNode,
    visited: &mut FxHashSet<(Atom, Atom, u32)>,
) -> Result<bool, Error> {
    match node {
        TypeNode::None => Ok(true),
        TypeNode::UserRef { name, args } => {
            ref_contains_no_return(reg, module, *name, args, visited)
        }
        TypeNode::RemoteRef { module: remote, name, args } => {
            ref_contains_no_return(reg, *remote, *name, args, visited)
        }
        other => {
            for child in children(other) {
                if contains_no_return(reg, module, child, visited)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

fn ref_contains_no_return(
    reg: &Registry,
    module: Atom,
    name: Atom,
    args: &[TypeNode],
    visited: &mut FxHashSet<(Atom, Atom, u32)>,
) -> Result<bool, Error> {
    for arg in args {
        if contains_no_return(reg, module, arg, visited)? {
            return Ok(true);
        }
    }
    if !visited.insert((module, name, args.len() as u32)) {
        return Ok(false);
    }
    let def = reg.select(module, name, args.len() as u32)?;
    contains_no_return(reg, module, &def.body, visited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tygen_common::Term;
    use tygen_registry::{Raise, StaticModule, StaticModules};

    fn m() -> Atom {
        Atom::new("kernel")
    }

    fn quick() -> CheckConfig {
        CheckConfig { cases: 50, max_shrink_iters: 256 }
    }

    #[test]
    fn test_faithful_spec_passes() {
        // is_integer(term) -> boolean, implemented honestly.
        let mut modules = StaticModules::new();
        modules.add(
            StaticModule::new("kernel")
                .with_spec(
                    "is_integer",
                    FunSpec::new(vec![TypeNode::Any], TypeNode::Bool),
                )
                .with_fun("is_integer", 1, |args| {
                    Ok(Term::bool_atom(args[0].is_int()))
                }),
        );
        let reg = Registry::from_source(modules);
        let report =
            check_spec_with(&reg, m(), Atom::new("is_integer"), 1, &quick()).unwrap();
        assert!(report.is_ok());
        assert_eq!(report.metas().len(), 1);
    }

    #[test]
    fn test_wrong_return_is_counterexample() {
        // f(integer) -> integer, but f returns :foo.
        let mut modules = StaticModules::new();
        modules.add(
            StaticModule::new("kernel")
                .with_spec("f", FunSpec::new(vec![TypeNode::Int], TypeNode::Int))
                .with_fun("f", 1, |_| Ok(Term::atom("foo"))),
        );
        let reg = Registry::from_source(modules);
        let report = check_spec_with(&reg, m(), Atom::new("f"), 1, &quick()).unwrap();
        match report {
            SpecReport::Failed(metas) => {
                assert_eq!(metas.len(), 1);
                let failure = metas[0].failure.as_ref().expect("counterexample");
                assert_eq!(failure.returned, Some(Term::atom("foo")));
                assert_eq!(failure.args.len(), 1);
            }
            SpecReport::Ok(_) => panic!("expected a failing report"),
        }
    }

    #[test]
    fn test_raises_are_absorbed() {
        // f raises for half its inputs; the campaign still passes.
        let mut modules = StaticModules::new();
        modules.add(
            StaticModule::new("kernel")
                .with_spec("f", FunSpec::new(vec![TypeNode::Int], TypeNode::Int))
                .with_fun("f", 1, |args| match args[0].as_int() {
                    Some(n) if n < 0 => Err(Raise::new("negative input")),
                    Some(n) => Ok(Term::Int(n)),
                    None => Err(Raise::new("not an integer")),
                }),
        );
        let reg = Registry::from_source(modules);
        let report = check_spec_with(&reg, m(), Atom::new("f"), 1, &quick()).unwrap();
        assert!(report.is_ok());
    }

    #[test]
    fn test_no_return_spec_never_fails() {
        let mut modules = StaticModules::new();
        modules.add(
            StaticModule::new("kernel")
                .with_spec(
                    "explode",
                    FunSpec::new(vec![TypeNode::Int], TypeNode::user("crash")),
                )
                .with_type(tygen_ast::TypeDef::new("crash", vec![], TypeNode::None))
                .with_fun("explode", 1, |_| Err(Raise::new("boom"))),
        );
        let reg = Registry::from_source(modules);
        let report = check_spec_with(&reg, m(), Atom::new("explode"), 1, &quick()).unwrap();
        assert!(report.is_ok());
    }

    #[test]
    fn test_missing_spec() {
        let mut modules = StaticModules::new();
        modules.add(StaticModule::new("kernel").with_fun("f", 1, |_| Ok(Term::nil())));
        let reg = Registry::from_source(modules);
        let err = check_spec(&reg, m(), Atom::new("f"), 1).unwrap_err();
        assert_eq!(err.kind, tygen_common::ErrorKind::MissingSpec);
    }

    #[test]
    fn test_overloads_aggregate() {
        // Two overloads; the second lies about its return type.
        let mut modules = StaticModules::new();
        modules.add(
            StaticModule::new("kernel")
                .with_spec("g", FunSpec::new(vec![TypeNode::Int], TypeNode::Int))
                .with_spec("g", FunSpec::new(vec![TypeNode::Int], TypeNode::Atom))
                .with_fun("g", 1, |args| Ok(args[0].clone())),
        );
        let reg = Registry::from_source(modules);
        let report = check_spec_with(&reg, m(), Atom::new("g"), 1, &quick()).unwrap();
        match report {
            SpecReport::Failed(metas) => {
                assert_eq!(metas.len(), 1);
                assert_eq!(metas[0].overload, 1);
            }
            SpecReport::Ok(_) => panic!("expected the atom overload to fail"),
        }
    }

    #[test]
    fn test_bounded_variables_substituted() {
        // g(x) -> x when x: integer
        let mut modules = StaticModules::new();
        modules.add(
            StaticModule::new("kernel")
                .with_spec(
                    "id",
                    FunSpec::with_vars(
                        vec![TypeNode::var("x")],
                        TypeNode::var("x"),
                        vec![(Atom::new("x"), TypeNode::Int)],
                    ),
                )
                .with_fun("id", 1, |args| Ok(args[0].clone())),
        );
        let reg = Registry::from_source(modules);
        let report = check_spec_with(&reg, m(), Atom::new("id"), 1, &quick()).unwrap();
        assert!(report.is_ok());
    }
}
