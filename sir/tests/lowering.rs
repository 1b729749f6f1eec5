use plutus_data::Data;
use sir::{Binding, ConstrDecl, DataDecl, LoweringOptions, MatchCase, MatchPattern, Sir, SirConst};
use std::rc::Rc;
use uplc::machine::{CekMachine, ExBudget, LanguageVersion, MachineParameters};
use uplc::{Builtin, Constant};

fn option_decl() -> Rc<DataDecl> {
    Rc::new(DataDecl::new(
        "Option",
        vec![
            ConstrDecl {
                name: "None".into(),
                tag: 0,
                fields: vec![],
            },
            ConstrDecl {
                name: "Some".into(),
                tag: 1,
                fields: vec!["value".into()],
            },
        ],
    ))
}

fn run(term: &uplc::Term, version: LanguageVersion) -> Constant {
    let params = MachineParameters::default_for(version);
    let outcome = CekMachine::new(&params, ExBudget::max()).evaluate(term).unwrap();
    outcome.value.as_constant().unwrap().clone()
}

/// `match Some(41) { None -> 0, Some(v) -> v + 1 }` evaluates to `42` the
/// same way whether it lowers to Scott encoding (V1–V3) or a native
/// `Constr`/`Case` pair (V4) — the two strategies must agree.
#[test]
fn adt_match_agrees_across_scott_and_native_encodings() {
    let decl = option_decl();
    let some_41 = Sir::Constr {
        decl: decl.name.clone(),
        constructor: "Some".into(),
        args: vec![Sir::integer(41)],
    };
    let matched = Sir::Decl {
        decl: decl.clone(),
        body: Box::new(Sir::Match {
            scrutinee: Box::new(some_41),
            decl: decl.name.clone(),
            cases: vec![
                MatchCase {
                    pattern: MatchPattern::Constr {
                        constructor: "None".into(),
                        bindings: vec![],
                    },
                    body: Sir::integer(0),
                },
                MatchCase {
                    pattern: MatchPattern::Constr {
                        constructor: "Some".into(),
                        bindings: vec!["v".into()],
                    },
                    body: Sir::Builtin(Builtin::AddInteger).apply(Sir::var("v")).apply(Sir::integer(1)),
                },
            ],
            unchecked: false,
        }),
    };

    for version in [
        LanguageVersion::V1,
        LanguageVersion::V2,
        LanguageVersion::V3,
        LanguageVersion::V4,
    ] {
        let out = sir::lower(&matched, version, LoweringOptions::default()).unwrap();
        assert_eq!(run(&out.term, version), Constant::integer(42), "mismatch at {version:?}");
        assert!(!out.needs_z);
    }
}

/// Matching on `Data` always goes through `chooseData` (the reference
/// machine's `Case` frame only ever accepts `Value::Constr`), so the
/// version makes no difference to the result.
#[test]
fn data_match_dispatches_via_choose_data_at_every_version() {
    let scrutinee = Sir::Const(SirConst::Data(Data::integer(7)));
    let matched = Sir::Match {
        scrutinee: Box::new(scrutinee),
        decl: "Data".into(),
        cases: vec![
            MatchCase {
                pattern: MatchPattern::Constr {
                    constructor: "I".into(),
                    bindings: vec!["n".into()],
                },
                body: Sir::var("n"),
            },
            MatchCase {
                pattern: MatchPattern::Wildcard,
                body: Sir::integer(-1),
            },
        ],
        unchecked: false,
    };

    for version in [LanguageVersion::V1, LanguageVersion::V3, LanguageVersion::V4] {
        let out = sir::lower(&matched, version, LoweringOptions::default()).unwrap();
        assert_eq!(run(&out.term, version), Constant::integer(7));
    }
}

/// A `Data` `Constr` pattern binds both `tag` and `args` out of the same
/// `unConstrData` pair — `tag` must see the pair fresh off `unConstrData`
/// while `args` sees it one binder further in, so a regression that
/// confuses the two depths would resolve `args` to the tag itself instead
/// of the field list.
#[test]
fn data_constr_pattern_binds_tag_and_args_at_their_own_depths() {
    let scrutinee = Sir::Const(SirConst::Data(Data::constr(3, vec![Data::integer(39)])));
    let matched = Sir::Match {
        scrutinee: Box::new(scrutinee),
        decl: "Data".into(),
        cases: vec![
            MatchCase {
                pattern: MatchPattern::Constr {
                    constructor: "Constr".into(),
                    bindings: vec!["tag".into(), "args".into()],
                },
                body: Sir::Builtin(Builtin::AddInteger).apply(Sir::var("tag")).apply(
                    Sir::Builtin(Builtin::UnIData).apply(Sir::Builtin(Builtin::HeadList).apply(Sir::var("args"))),
                ),
            },
            MatchCase {
                pattern: MatchPattern::Wildcard,
                body: Sir::integer(-1),
            },
        ],
        unchecked: false,
    };

    for version in [LanguageVersion::V1, LanguageVersion::V3, LanguageVersion::V4] {
        let out = sir::lower(&matched, version, LoweringOptions::default()).unwrap();
        assert_eq!(run(&out.term, version), Constant::integer(42), "mismatch at {version:?}");
    }
}

/// `let rec fact = \n. if n == 0 then 1 else n * fact(n - 1) in fact 5`
/// lowers via the Z-combinator and evaluates to `120`.
#[test]
fn recursive_let_computes_factorial_via_z_combinator() {
    let fact_body = Sir::IfThenElse {
        cond: Box::new(Sir::Builtin(Builtin::EqualsInteger).apply(Sir::var("n")).apply(Sir::integer(0))),
        then_branch: Box::new(Sir::integer(1)),
        else_branch: Box::new(
            Sir::Builtin(Builtin::MultiplyInteger).apply(Sir::var("n")).apply(
                Sir::var("fact").apply(
                    Sir::Builtin(Builtin::SubtractInteger)
                        .apply(Sir::var("n"))
                        .apply(Sir::integer(1)),
                ),
            ),
        ),
    };
    let program = Sir::Let {
        bindings: vec![Binding {
            name: "fact".into(),
            value: Sir::lambda("n", fact_body),
        }],
        body: Box::new(Sir::var("fact").apply(Sir::integer(5))),
        recursive: true,
    };

    let out = sir::lower(&program, LanguageVersion::V2, LoweringOptions::default()).unwrap();
    assert!(out.needs_z);
    assert_eq!(run(&out.term, LanguageVersion::V2), Constant::integer(120));
}

/// The same program against a budget too small to complete fails with
/// `BudgetExhausted` rather than running forever or panicking.
#[test]
fn recursive_let_exhausts_a_tiny_budget() {
    let fact_body = Sir::IfThenElse {
        cond: Box::new(Sir::Builtin(Builtin::EqualsInteger).apply(Sir::var("n")).apply(Sir::integer(0))),
        then_branch: Box::new(Sir::integer(1)),
        else_branch: Box::new(
            Sir::Builtin(Builtin::MultiplyInteger).apply(Sir::var("n")).apply(
                Sir::var("fact").apply(
                    Sir::Builtin(Builtin::SubtractInteger)
                        .apply(Sir::var("n"))
                        .apply(Sir::integer(1)),
                ),
            ),
        ),
    };
    let program = Sir::Let {
        bindings: vec![Binding {
            name: "fact".into(),
            value: Sir::lambda("n", fact_body),
        }],
        body: Box::new(Sir::var("fact").apply(Sir::integer(5))),
        recursive: true,
    };

    let out = sir::lower(&program, LanguageVersion::V2, LoweringOptions::default()).unwrap();
    let params = MachineParameters::default_for(LanguageVersion::V2);
    let result = CekMachine::new(&params, ExBudget::new(50, 50)).evaluate(&out.term);
    assert!(matches!(
        result,
        Err(uplc::machine::EvalFailure {
            error: uplc::machine::MachineError::BudgetExhausted { .. },
            ..
        })
    ));
}

/// A match missing a constructor, with no wildcard and not marked
/// `unchecked`, is a compile-time error — it never reaches the evaluator.
#[test]
fn non_exhaustive_checked_match_is_a_lowering_error() {
    let decl = option_decl();
    let matched = Sir::Decl {
        decl: decl.clone(),
        body: Box::new(Sir::Match {
            scrutinee: Box::new(Sir::Constr {
                decl: decl.name.clone(),
                constructor: "None".into(),
                args: vec![],
            }),
            decl: decl.name.clone(),
            cases: vec![MatchCase {
                pattern: MatchPattern::Constr {
                    constructor: "Some".into(),
                    bindings: vec!["v".into()],
                },
                body: Sir::var("v"),
            }],
            unchecked: false,
        }),
    };

    let err = sir::lower(&matched, LanguageVersion::V2, LoweringOptions::default()).unwrap_err();
    assert!(matches!(err, sir::LoweringError::NonExhaustiveMatch { .. }));
}

/// The same non-exhaustive match, marked `unchecked`, lowers successfully —
/// the missing branch becomes a synthesized `Error`, and only blows up if
/// actually reached at runtime.
#[test]
fn unchecked_non_exhaustive_match_synthesizes_an_error_branch() {
    let decl = option_decl();
    let matched = Sir::Decl {
        decl: decl.clone(),
        body: Box::new(Sir::Match {
            scrutinee: Box::new(Sir::Constr {
                decl: decl.name.clone(),
                constructor: "Some".into(),
                args: vec![Sir::integer(9)],
            }),
            decl: decl.name.clone(),
            cases: vec![MatchCase {
                pattern: MatchPattern::Constr {
                    constructor: "Some".into(),
                    bindings: vec!["v".into()],
                },
                body: Sir::var("v"),
            }],
            unchecked: true,
        }),
    };

    let out = sir::lower(&matched, LanguageVersion::V2, LoweringOptions::default()).unwrap();
    assert_eq!(run(&out.term, LanguageVersion::V2), Constant::integer(9));
}

/// A trailing wildcard covers every constructor the match doesn't name
/// explicitly.
#[test]
fn wildcard_covers_missing_constructors() {
    let decl = option_decl();
    let matched = Sir::Decl {
        decl: decl.clone(),
        body: Box::new(Sir::Match {
            scrutinee: Box::new(Sir::Constr {
                decl: decl.name.clone(),
                constructor: "None".into(),
                args: vec![],
            }),
            decl: decl.name.clone(),
            cases: vec![
                MatchCase {
                    pattern: MatchPattern::Constr {
                        constructor: "Some".into(),
                        bindings: vec!["v".into()],
                    },
                    body: Sir::var("v"),
                },
                MatchCase {
                    pattern: MatchPattern::Wildcard,
                    body: Sir::integer(-1),
                },
            ],
            unchecked: false,
        }),
    };

    let out = sir::lower(&matched, LanguageVersion::V2, LoweringOptions::default()).unwrap();
    assert_eq!(run(&out.term, LanguageVersion::V2), Constant::integer(-1));
}

/// A recursive `let` binding more than one name is mutual recursion, which
/// this toolkit rejects rather than silently mis-compiling.
#[test]
fn mutual_recursion_is_rejected() {
    let program = Sir::Let {
        bindings: vec![
            Binding {
                name: "a".into(),
                value: Sir::integer(1),
            },
            Binding {
                name: "b".into(),
                value: Sir::integer(2),
            },
        ],
        body: Box::new(Sir::integer(0)),
        recursive: true,
    };

    let err = sir::lower(&program, LanguageVersion::V2, LoweringOptions::default()).unwrap_err();
    assert!(matches!(err, sir::LoweringError::MutualRecursion { .. }));
}

/// `error_traces` turns a bare `Sir::Error { message: Some(..) }` into a
/// `trace`-then-error, and the message shows up in `EvalOutcome::traces`.
#[test]
fn error_with_message_is_traced_when_enabled() {
    let program = Sir::Error {
        message: Some("boom".to_string()),
    };
    let options = LoweringOptions {
        error_traces: true,
        ..Default::default()
    };
    let out = sir::lower(&program, LanguageVersion::V2, options).unwrap();
    let params = MachineParameters::default_for(LanguageVersion::V2);
    let result = CekMachine::new(&params, ExBudget::max()).evaluate(&out.term);
    match result {
        Err(uplc::machine::EvalFailure {
            error: uplc::machine::MachineError::UserError,
            ..
        }) => {}
        other => panic!("expected an evaluation failure, got {other:?}"),
    }
}

/// Let-floating hoists a binding that doesn't mention the enclosing
/// lambda's parameter above it, without changing what the program computes.
#[test]
fn let_floating_preserves_behavior() {
    let inner = Sir::Let {
        bindings: vec![Binding {
            name: "k".into(),
            value: Sir::integer(10),
        }],
        body: Box::new(Sir::Builtin(Builtin::AddInteger).apply(Sir::var("x")).apply(Sir::var("k"))),
        recursive: false,
    };
    let program = Sir::lambda("x", inner).apply(Sir::integer(5));

    let floated = sir::optimize::float_lets(&program);
    let Sir::Apply(floated_fun, _) = &floated else {
        panic!("expected the outer application to survive floating");
    };
    assert!(matches!(**floated_fun, Sir::Let { .. }), "binding `k` should float above the lambda");

    let options = LoweringOptions {
        optimize: true,
        ..Default::default()
    };
    let out = sir::lower(&program, LanguageVersion::V2, options).unwrap();
    assert_eq!(run(&out.term, LanguageVersion::V2), Constant::integer(15));
}

/// Selecting a field out of a single-constructor declaration works the
/// same whether it lowers to a Scott projection or a native `Case`.
#[test]
fn select_on_single_constructor_declaration() {
    let pair_decl = Rc::new(DataDecl::new(
        "Pair",
        vec![ConstrDecl {
            name: "Pair".into(),
            tag: 0,
            fields: vec!["fst".into(), "snd".into()],
        }],
    ));
    let built = Sir::Constr {
        decl: pair_decl.name.clone(),
        constructor: "Pair".into(),
        args: vec![Sir::integer(3), Sir::integer(4)],
    };
    let program = Sir::Decl {
        decl: pair_decl.clone(),
        body: Box::new(Sir::Select {
            scrutinee: Box::new(built),
            decl: pair_decl.name.clone(),
            field: "snd".into(),
        }),
    };

    for version in [LanguageVersion::V1, LanguageVersion::V3, LanguageVersion::V4] {
        let out = sir::lower(&program, version, LoweringOptions::default()).unwrap();
        assert_eq!(run(&out.term, version), Constant::integer(4));
    }
}
