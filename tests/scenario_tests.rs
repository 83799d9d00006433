//! End-to-end scenarios over the public operations.

use tygen::{
    ArgSpec, Atom, FunSpec, MapArgField, MapField, Registry, SpecReport, StaticModule,
    StaticModules, Term, TypeDef, TypeNode,
};

fn m() -> Atom {
    trace_init();
    Atom::new("sample")
}

fn trace_init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn registry(defs: Vec<TypeDef>) -> Registry {
    let mut modules = StaticModules::new();
    let mut module = StaticModule::new("sample");
    for def in defs {
        module = module.with_type(def);
    }
    modules.add(module);
    Registry::from_source(modules)
}

// =============================================================================
// Scenario 1: t :: {atom, integer}
// =============================================================================

#[test]
fn test_atom_integer_tuple() {
    let reg = registry(vec![TypeDef::new(
        "t",
        vec![],
        TypeNode::tuple(vec![TypeNode::Atom, TypeNode::Int]),
    )]);
    let generator = tygen::from_type(&reg, m(), Atom::new("t"), &[]).unwrap();
    for term in generator.sample(3).unwrap() {
        match term {
            Term::Tuple(items) => {
                assert_eq!(items.len(), 2);
                assert!(items[0].is_atom());
                assert!(items[1].is_int());
            }
            other => panic!("expected tuple, got {other}"),
        }
    }

    let validator = tygen::validator_for_type(&reg, m(), Atom::new("t"), &[]).unwrap();
    assert!(validator.check(&Term::tuple(vec![Term::atom("a"), Term::int(1)])));
    assert!(!validator.check(&Term::tuple(vec![Term::int(1), Term::atom("a")])));
    assert!(!validator.check(&Term::tuple(vec![Term::atom("a")])));
}

// =============================================================================
// Scenario 2: r :: 0..10
// =============================================================================

#[test]
fn test_integer_range() {
    let reg = registry(vec![TypeDef::new("r", vec![], TypeNode::Range(0, 10))]);
    let (generator, validator) =
        tygen::from_type_with_validator(&reg, m(), Atom::new("r"), &[]).unwrap();

    for term in generator.sample(25).unwrap() {
        let n = term.as_int().expect("integer draw");
        assert!((0..=10).contains(&n));
    }
    for accepted in [0, 5, 10] {
        assert!(validator.check(&Term::int(accepted)));
    }
    assert!(!validator.check(&Term::int(-1)));
    assert!(!validator.check(&Term::int(11)));
    assert!(!validator.check(&Term::float(3.0)));
    assert!(!validator.check(&Term::binary(b"hi".to_vec())));
}

// =============================================================================
// Scenario 3: tt :: nil | {integer, tt}
// =============================================================================

#[test]
fn test_recursive_union() {
    let reg = registry(vec![TypeDef::new(
        "tt",
        vec![],
        TypeNode::union(vec![
            TypeNode::Nil,
            TypeNode::tuple(vec![TypeNode::Int, TypeNode::user("tt")]),
        ]),
    )]);
    let (generator, validator) =
        tygen::from_type_with_validator(&reg, m(), Atom::new("tt"), &[]).unwrap();

    // Every draw is finite and already validated structurally here.
    for term in generator.sample(30).unwrap() {
        let mut depth = 0usize;
        let mut cursor = term.clone();
        loop {
            match cursor {
                Term::List(items) if items.is_empty() => break,
                Term::Tuple(items) if items.len() == 2 && items[0].is_int() => {
                    depth += 1;
                    assert!(depth < 10_000, "draw is not finite");
                    cursor = items[1].clone();
                }
                other => panic!("not a tt value: {other}"),
            }
        }
        assert!(validator.check(&term));
    }

    assert!(validator.check(&Term::nil()));
    assert!(validator.check(&Term::tuple(vec![Term::int(1), Term::nil()])));
    assert!(validator.check(&Term::tuple(vec![
        Term::int(1),
        Term::tuple(vec![Term::int(2), Term::nil()]),
    ])));
    assert!(!validator.check(&Term::tuple(vec![Term::int(1), Term::atom("x")])));
}

// =============================================================================
// Scenario 4: dict(k, v) :: [{k, v}] at (atom, integer)
// =============================================================================

#[test]
fn test_parametric_dict() {
    let reg = registry(vec![TypeDef::new(
        "dict",
        vec!["k", "v"],
        TypeNode::list(TypeNode::tuple(vec![TypeNode::var("k"), TypeNode::var("v")])),
    )]);
    let args = [ArgSpec::builtin("atom"), ArgSpec::builtin("int")];
    let (generator, validator) =
        tygen::from_type_with_validator(&reg, m(), Atom::new("dict"), &args).unwrap();

    for term in generator.sample(20).unwrap() {
        match term {
            Term::List(pairs) => {
                for pair in pairs {
                    match pair {
                        Term::Tuple(kv) => {
                            assert_eq!(kv.len(), 2);
                            assert!(kv[0].is_atom());
                            assert!(kv[1].is_int());
                        }
                        other => panic!("expected pair, got {other}"),
                    }
                }
            }
            other => panic!("expected list, got {other}"),
        }
    }

    assert!(validator.check(&Term::list(vec![Term::tuple(vec![
        Term::atom("a"),
        Term::int(1),
    ])])));
    assert!(!validator.check(&Term::list(vec![Term::tuple(vec![
        Term::int(1),
        Term::atom("x"),
    ])])));
}

// =============================================================================
// Scenario 5: %{:key => integer, optional(float) => integer}
// =============================================================================

#[test]
fn test_map_with_required_and_optional_fields() {
    let reg = registry(vec![TypeDef::new(
        "t",
        vec![],
        TypeNode::Map(vec![
            MapField::Required(TypeNode::atom_lit("key"), TypeNode::Int),
            MapField::Optional(TypeNode::Float, TypeNode::Int),
        ]),
    )]);
    let (generator, validator) =
        tygen::from_type_with_validator(&reg, m(), Atom::new("t"), &[]).unwrap();

    for term in generator.sample(25).unwrap() {
        assert!(validator.check(&term), "incoherent draw: {term}");
    }

    assert!(!validator.check(&Term::map([])));
    assert!(validator.check(&Term::map([
        (Term::atom("key"), Term::int(1)),
        (Term::float(1.5), Term::int(2)),
    ])));
    assert!(!validator.check(&Term::map([(Term::atom("key"), Term::atom("oops"))])));
}

// The caller-language map form builds the same type.
#[test]
fn test_map_through_caller_language() {
    let reg = registry(vec![TypeDef::new(
        "wrap",
        vec!["x"],
        TypeNode::var("x"),
    )]);
    let arg = ArgSpec::map_of(vec![
        MapArgField::Required(
            ArgSpec::literal(Term::atom("key")),
            ArgSpec::builtin("int"),
        ),
        MapArgField::Optional(ArgSpec::builtin("float"), ArgSpec::builtin("int")),
    ]);
    let validator =
        tygen::validator_for_type(&reg, m(), Atom::new("wrap"), &[arg]).unwrap();
    assert!(validator.check(&Term::map([(Term::atom("key"), Term::int(1))])));
    assert!(!validator.check(&Term::map([])));
}

// =============================================================================
// Scenario 6: spec checking
// =============================================================================

#[test]
fn test_spec_check_outcomes() {
    let mut modules = StaticModules::new();
    modules.add(
        StaticModule::new("kernel")
            .with_spec(
                "is_integer",
                FunSpec::new(vec![TypeNode::Any], TypeNode::Bool),
            )
            .with_fun("is_integer", 1, |args| Ok(Term::bool_atom(args[0].is_int())))
            .with_spec("f", FunSpec::new(vec![TypeNode::Int], TypeNode::Int))
            .with_fun("f", 1, |_| Ok(Term::atom("foo"))),
    );
    let reg = Registry::from_source(modules);
    let kernel = Atom::new("kernel");

    let report = tygen::validate(&reg, kernel, Atom::new("is_integer"), 1).unwrap();
    assert!(report.is_ok());

    match tygen::validate(&reg, kernel, Atom::new("f"), 1).unwrap() {
        SpecReport::Failed(metas) => {
            let failure = metas[0].failure.as_ref().expect("counterexample");
            assert_eq!(failure.returned, Some(Term::atom("foo")));
        }
        SpecReport::Ok(_) => panic!("lying spec must fail"),
    }
}

// =============================================================================
// Opaque arguments
// =============================================================================

#[test]
fn test_opaque_pair_round_trip() {
    use proptest::prelude::Just;
    let reg = registry(vec![TypeDef::new(
        "wrap",
        vec!["x"],
        TypeNode::list(TypeNode::var("x")),
    )]);
    let generator = tygen::GeneratorHandle::new(Just(Term::int(42)));
    let validator = tygen::ValidatorHandle::new(|t: &Term| t == &Term::int(42));
    let args = [ArgSpec::Pair(generator, validator)];
    let (generator, validator) =
        tygen::from_type_with_validator(&reg, m(), Atom::new("wrap"), &args).unwrap();
    for term in generator.sample(10).unwrap() {
        assert!(validator.check(&term));
        match term {
            Term::List(items) => assert!(items.iter().all(|i| i == &Term::int(42))),
            other => panic!("expected list, got {other}"),
        }
    }
}

#[test]
fn test_lone_opaque_halves_refused() {
    let reg = registry(vec![TypeDef::new(
        "wrap",
        vec!["x"],
        TypeNode::list(TypeNode::var("x")),
    )]);
    // A generator alone cannot serve the validator build.
    let args = [ArgSpec::Generator(tygen::GeneratorHandle::new(
        proptest::prelude::Just(Term::int(1)),
    ))];
    let err = tygen::from_type_with_validator(&reg, m(), Atom::new("wrap"), &args).unwrap_err();
    assert_eq!(err.kind, tygen::ErrorKind::BadArgument);
    // ... but is fine when only generation is requested.
    assert!(tygen::from_type(&reg, m(), Atom::new("wrap"), &args).is_ok());
    // And the mirror image for validators.
    let args = [ArgSpec::Validator(tygen::ValidatorHandle::new(|t: &Term| t.is_int()))];
    assert!(tygen::validator_for_type(&reg, m(), Atom::new("wrap"), &args).is_ok());
    let err = tygen::from_type(&reg, m(), Atom::new("wrap"), &args).unwrap_err();
    assert_eq!(err.kind, tygen::ErrorKind::BadArgument);
}

// =============================================================================
// Failure kinds surface from the public entry points
// =============================================================================

#[test]
fn test_error_kinds() {
    let reg = registry(vec![
        TypeDef::new("none_t", vec![], TypeNode::None),
        TypeDef::new("pid_t", vec![], TypeNode::Pid),
        TypeDef::new("loop", vec![], TypeNode::tuple(vec![TypeNode::user("loop")])),
    ]);
    let cases = [
        ("missing", tygen::ErrorKind::UnknownType),
        ("none_t", tygen::ErrorKind::NoInhabitants),
        ("pid_t", tygen::ErrorKind::Unsupported),
        ("loop", tygen::ErrorKind::InfiniteType),
    ];
    for (name, kind) in cases {
        let err = tygen::from_type(&reg, m(), Atom::new(name), &[]).unwrap_err();
        assert_eq!(err.kind, kind, "for type {name}");
    }

    let err = tygen::from_type(&reg, Atom::new("ghost_module"), Atom::new("t"), &[]).unwrap_err();
    assert_eq!(err.kind, tygen::ErrorKind::UnknownModule);

    let err = tygen::from_type(&reg, m(), Atom::new("none_t"), &[ArgSpec::builtin("int")])
        .unwrap_err();
    assert_eq!(err.kind, tygen::ErrorKind::WrongArity);
}
