//! Universal properties of the generator/validator pairs.

use tygen::{ArgSpec, Atom, MapField, Registry, StaticModule, StaticModules, Term, TypeDef, TypeNode};

fn m() -> Atom {
    Atom::new("props")
}

fn registry(defs: Vec<TypeDef>) -> Registry {
    let mut modules = StaticModules::new();
    let mut module = StaticModule::new("props");
    for def in defs {
        module = module.with_type(def);
    }
    modules.add(module);
    Registry::from_source(modules)
}

fn covered_types() -> Vec<TypeNode> {
    vec![
        TypeNode::Any,
        TypeNode::Atom,
        TypeNode::atom_lit("ok"),
        TypeNode::Int,
        TypeNode::PosInt,
        TypeNode::NegInt,
        TypeNode::NonNegInt,
        TypeNode::IntLit(-3),
        TypeNode::Range(-5, 5),
        TypeNode::Float,
        TypeNode::Bool,
        TypeNode::Byte,
        TypeNode::Char,
        TypeNode::Arity,
        TypeNode::Bitstring,
        TypeNode::Binary,
        TypeNode::BinaryPattern(3, 4),
        TypeNode::BinaryPattern(0, 0),
        TypeNode::Ref,
        TypeNode::Nil,
        TypeNode::list(TypeNode::Int),
        TypeNode::nonempty_list(TypeNode::Atom),
        TypeNode::ImproperList(Box::new(TypeNode::Int), Box::new(TypeNode::Atom)),
        TypeNode::NonemptyImproperList(Box::new(TypeNode::Byte), Box::new(TypeNode::Binary)),
        TypeNode::MaybeImproperList(Box::new(TypeNode::Int), Box::new(TypeNode::Atom)),
        TypeNode::NonemptyMaybeImproperList(Box::new(TypeNode::Int), Box::new(TypeNode::Atom)),
        TypeNode::tuple(vec![]),
        TypeNode::tuple(vec![TypeNode::Atom, TypeNode::Int, TypeNode::Float]),
        TypeNode::TupleAny,
        TypeNode::Map(vec![
            MapField::Required(TypeNode::atom_lit("id"), TypeNode::Int),
            MapField::Optional(TypeNode::Atom, TypeNode::Bool),
        ]),
        TypeNode::Map(vec![MapField::Required(TypeNode::Int, TypeNode::Atom)]),
        TypeNode::MapAny,
        TypeNode::EmptyMap,
        TypeNode::union(vec![TypeNode::Int, TypeNode::Atom, TypeNode::Float]),
        TypeNode::Charlist,
        TypeNode::NonemptyCharlist,
        TypeNode::Iolist,
        TypeNode::Iodata,
        TypeNode::Mfa,
        TypeNode::ModuleName,
        TypeNode::Number,
        TypeNode::Timeout,
        TypeNode::Str,
    ]
}

// =============================================================================
// P1 membership + P2 termination: every draw validates, and drawing
// finishes at all.
// =============================================================================

#[test]
fn test_every_draw_is_a_member() {
    for (i, ty) in covered_types().into_iter().enumerate() {
        let name = format!("t{i}");
        let rendering = ty.to_string();
        let reg = registry(vec![TypeDef::new(&name, vec![], ty)]);
        let (generator, validator) =
            tygen::from_type_with_validator(&reg, m(), Atom::new(&name), &[]).unwrap();
        for term in generator.sample(40).unwrap() {
            assert!(
                validator.check(&term),
                "draw {term} is not a member of {rendering}"
            );
        }
    }
}

#[test]
fn test_recursive_draws_are_members() {
    let defs = vec![
        TypeDef::new(
            "tree",
            vec![],
            TypeNode::union(vec![
                TypeNode::Nil,
                TypeNode::tuple(vec![TypeNode::Int, TypeNode::user("tree"), TypeNode::user("tree")]),
            ]),
        ),
        TypeDef::new("deep", vec![], TypeNode::list(TypeNode::user("deep"))),
        TypeDef::new(
            "forest",
            vec![],
            TypeNode::list(TypeNode::user("tree")),
        ),
    ];
    for name in ["tree", "deep", "forest"] {
        let reg = registry(defs.clone());
        let (generator, validator) =
            tygen::from_type_with_validator(&reg, m(), Atom::new(name), &[]).unwrap();
        for term in generator.sample(30).unwrap() {
            assert!(validator.check(&term), "draw {term} escapes {name}");
        }
    }
}

// =============================================================================
// P3 totality + P4 foreign rejection: validators answer on everything,
// and reject terms of the wrong shape.
// =============================================================================

#[test]
fn test_validators_total_over_arbitrary_terms() {
    use proptest::strategy::{Strategy, ValueTree};
    use proptest::test_runner::TestRunner;

    let mut runner = TestRunner::default();
    let arbitrary = tygen::strategies::term_strategy();
    let mut foreign = Vec::new();
    for _ in 0..60 {
        foreign.push(arbitrary.new_tree(&mut runner).unwrap().current());
    }

    for (i, ty) in covered_types().into_iter().enumerate() {
        let name = format!("t{i}");
        let reg = registry(vec![TypeDef::new(&name, vec![], ty)]);
        let validator = tygen::validator_for_type(&reg, m(), Atom::new(&name), &[]).unwrap();
        for term in &foreign {
            // Answers without panicking; the value is irrelevant.
            let _ = validator.check(term);
        }
    }
}

#[test]
fn test_foreign_shapes_rejected() {
    let reg = registry(vec![
        TypeDef::new("ints", vec![], TypeNode::list(TypeNode::Int)),
        TypeDef::new("pair", vec![], TypeNode::tuple(vec![TypeNode::Atom, TypeNode::Int])),
        TypeDef::new("bits", vec![], TypeNode::Bitstring),
    ]);
    let ints = tygen::validator_for_type(&reg, m(), Atom::new("ints"), &[]).unwrap();
    let pair = tygen::validator_for_type(&reg, m(), Atom::new("pair"), &[]).unwrap();
    let bits = tygen::validator_for_type(&reg, m(), Atom::new("bits"), &[]).unwrap();

    let non_lists = [Term::int(1), Term::atom("a"), Term::map([]), Term::Ref(1)];
    for term in &non_lists {
        assert!(!ints.check(term));
    }
    assert!(!ints.check(&Term::list(vec![Term::atom("x")])));
    assert!(!pair.check(&Term::nil()));
    assert!(!bits.check(&Term::int(0)));
}

// =============================================================================
// P5 alias equivalence
// =============================================================================

#[test]
fn test_alias_expansion_agreement() {
    let aliases: Vec<(TypeNode, TypeNode)> = vec![
        (
            TypeNode::Bool,
            TypeNode::union(vec![TypeNode::atom_lit("true"), TypeNode::atom_lit("false")]),
        ),
        (TypeNode::Byte, TypeNode::Range(0, 255)),
        (TypeNode::Char, TypeNode::Range(0, 0x10FFFF)),
        (TypeNode::Arity, TypeNode::Range(0, 255)),
        (TypeNode::Number, TypeNode::union(vec![TypeNode::Int, TypeNode::Float])),
        (
            TypeNode::Timeout,
            TypeNode::union(vec![TypeNode::NonNegInt, TypeNode::atom_lit("infinity")]),
        ),
        (TypeNode::Charlist, TypeNode::list(TypeNode::Char)),
        (TypeNode::NonemptyCharlist, TypeNode::nonempty_list(TypeNode::Char)),
        (TypeNode::Str, TypeNode::Charlist),
        (
            TypeNode::Mfa,
            TypeNode::tuple(vec![TypeNode::ModuleName, TypeNode::ModuleName, TypeNode::Arity]),
        ),
    ];

    for (i, (alias, expansion)) in aliases.into_iter().enumerate() {
        let alias_name = format!("alias{i}");
        let expanded_name = format!("expanded{i}");
        let reg = registry(vec![
            TypeDef::new(&alias_name, vec![], alias.clone()),
            TypeDef::new(&expanded_name, vec![], expansion),
        ]);
        let (alias_gen, alias_validator) =
            tygen::from_type_with_validator(&reg, m(), Atom::new(&alias_name), &[]).unwrap();
        let (expanded_gen, expanded_validator) =
            tygen::from_type_with_validator(&reg, m(), Atom::new(&expanded_name), &[]).unwrap();

        // Draws from either side satisfy both validators.
        for term in alias_gen.sample(30).unwrap() {
            assert!(alias_validator.check(&term));
            assert!(
                expanded_validator.check(&term),
                "{term} drawn from {alias} rejected by its expansion"
            );
        }
        for term in expanded_gen.sample(30).unwrap() {
            assert!(
                alias_validator.check(&term),
                "{term} drawn from the expansion rejected by {alias}"
            );
        }
    }
}

// =============================================================================
// P6 union commutativity and flattening
// =============================================================================

#[test]
fn test_union_order_and_nesting_equivalent() {
    let reg = registry(vec![
        TypeDef::new("ab", vec![], TypeNode::union(vec![TypeNode::Int, TypeNode::Atom])),
        TypeDef::new("ba", vec![], TypeNode::union(vec![TypeNode::Atom, TypeNode::Int])),
        // Raw nested union; the normalizer flattens it.
        TypeDef::new(
            "nested",
            vec![],
            TypeNode::Union(vec![
                TypeNode::Union(vec![TypeNode::Int, TypeNode::Atom]),
                TypeNode::Float,
            ]),
        ),
        TypeDef::new(
            "flat",
            vec![],
            TypeNode::union(vec![TypeNode::Int, TypeNode::Atom, TypeNode::Float]),
        ),
    ]);
    let handles: Vec<_> = ["ab", "ba", "nested", "flat"]
        .into_iter()
        .map(|name| tygen::from_type_with_validator(&reg, m(), Atom::new(name), &[]).unwrap())
        .collect();

    // ab and ba accept exactly the same terms; nested and flat likewise.
    for term in handles[0].0.sample(40).unwrap() {
        assert!(handles[1].1.check(&term));
    }
    for term in handles[1].0.sample(40).unwrap() {
        assert!(handles[0].1.check(&term));
    }
    for term in handles[2].0.sample(40).unwrap() {
        assert!(handles[3].1.check(&term));
    }
    for term in handles[3].0.sample(40).unwrap() {
        assert!(handles[2].1.check(&term));
    }
}

// =============================================================================
// P7 parameter substitution
// =============================================================================

#[test]
fn test_instantiation_matches_substitution() {
    let reg = registry(vec![
        TypeDef::new(
            "dict",
            vec!["k", "v"],
            TypeNode::list(TypeNode::tuple(vec![TypeNode::var("k"), TypeNode::var("v")])),
        ),
        // dict with the substitution done by hand
        TypeDef::new(
            "hand",
            vec![],
            TypeNode::list(TypeNode::tuple(vec![TypeNode::Atom, TypeNode::Int])),
        ),
    ]);
    let args = [ArgSpec::builtin("atom"), ArgSpec::builtin("int")];
    let (instantiated_gen, instantiated_validator) =
        tygen::from_type_with_validator(&reg, m(), Atom::new("dict"), &args).unwrap();
    let (hand_gen, hand_validator) =
        tygen::from_type_with_validator(&reg, m(), Atom::new("hand"), &[]).unwrap();

    for term in instantiated_gen.sample(30).unwrap() {
        assert!(hand_validator.check(&term));
    }
    for term in hand_gen.sample(30).unwrap() {
        assert!(instantiated_validator.check(&term));
    }
}

// =============================================================================
// P8 normalization idempotence
// =============================================================================

#[test]
fn test_normalize_is_idempotent() {
    use tygen::solver::{flatten_unions, normalize_def, Shape};

    let messy = TypeNode::union(vec![
        TypeNode::Union(vec![TypeNode::Int, TypeNode::Union(vec![TypeNode::Atom])]),
        TypeNode::Float,
    ]);
    let once = flatten_unions(messy);
    assert_eq!(once.clone(), flatten_unions(once.clone()));

    // Re-normalizing a definition whose body is the already-normalized
    // output changes nothing.
    let reg = registry(vec![TypeDef::new("t", vec![], once.clone())]);
    let def = TypeDef::new("t", vec![], once.clone());
    let normalized = normalize_def(&reg, m(), &def, vec![]).unwrap();
    match normalized.shape {
        Shape::Plain(body) => assert_eq!(body, once),
        other => panic!("expected plain shape, got {other:?}"),
    }
}
