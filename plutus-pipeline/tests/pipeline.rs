//! End-to-end scenarios through the `compile`/`run` driver (spec §8's
//! seed scenarios), plus the `StrictAscendingIndices` helper's contract
//! against a caller-shaped redeemer index list.

use plutus_data::Data;
use plutus_pipeline::driver::{compile, run, run_term, Failure};
use plutus_pipeline::indices::check_strict_ascending;
use sir::{Binding, LoweringOptions, MatchCase, MatchPattern, Sir, SirConst};
use uplc::machine::{ExBudget, LanguageVersion, MachineError, MachineParameters};
use uplc::{Builtin, Constant, Term};

/// Scenario 1: `(λa. λb. addInteger a b) 2 3` returns `5`.
#[test]
fn integer_arithmetic_scenario() {
    let program = Sir::lambda(
        "a",
        Sir::lambda(
            "b",
            Sir::Builtin(Builtin::AddInteger)
                .apply(Sir::var("a"))
                .apply(Sir::var("b")),
        ),
    )
    .apply(Sir::integer(2))
    .apply(Sir::integer(3));

    let compiled = compile(&program, LanguageVersion::V2, LoweringOptions::default()).unwrap();
    let params = MachineParameters::default_for(LanguageVersion::V2);
    let outcome = run(&compiled, &params, ExBudget::max()).unwrap();

    assert_eq!(outcome.result, Constant::integer(5));
    // A handful of CEK steps at the flat per-step charge, not the near-`max`
    // figure a `remaining`/`spent` mislabel would report here.
    assert!(outcome.spent_budget.mem > 0 && outcome.spent_budget.mem < 1_000_000);
    assert!(outcome.spent_budget.cpu > 0 && outcome.spent_budget.cpu < 1_000_000);
}

/// Scenario 3: `chooseData` branching on `Data.I(7)` returns `1000` for
/// the `I` branch, `Error` elsewhere, at V3 and V4 alike — a `Data` match
/// always desugars through `chooseData` regardless of version (see
/// DESIGN.md's dispatch strategy decision), so V3 and V4 must agree on
/// both the result and the cost, not just the result.
#[test]
fn branching_on_data_scenario() {
    let program = Sir::Match {
        scrutinee: Box::new(Sir::Const(SirConst::Data(Data::integer(7)))),
        decl: "Data".into(),
        cases: vec![
            MatchCase {
                pattern: MatchPattern::Constr {
                    constructor: "I".into(),
                    bindings: vec!["_n".into()],
                },
                body: Sir::integer(1000),
            },
            MatchCase {
                pattern: MatchPattern::Wildcard,
                body: Sir::Error { message: None },
            },
        ],
        unchecked: false,
    };

    let mut spent = Vec::new();
    for version in [LanguageVersion::V3, LanguageVersion::V4] {
        let compiled = compile(&program, version, LoweringOptions::default()).unwrap();
        let params = MachineParameters::default_for(version);
        let outcome = run(&compiled, &params, ExBudget::max()).unwrap();

        assert_eq!(outcome.result, Constant::integer(1000));
        spent.push(outcome.spent_budget);
    }
    assert_eq!(spent[0], spent[1], "V3 and V4 must cost the same on a Data match");
}

fn recursive_factorial() -> Sir {
    let fact_body = Sir::IfThenElse {
        cond: Box::new(
            Sir::Builtin(Builtin::EqualsInteger)
                .apply(Sir::var("n"))
                .apply(Sir::integer(0)),
        ),
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
    Sir::Let {
        bindings: vec![Binding {
            name: "fact".into(),
            value: Sir::lambda("n", fact_body),
        }],
        body: Box::new(Sir::var("fact").apply(Sir::integer(5))),
        recursive: true,
    }
}

/// Scenario 4: recursion via the Z-combinator, `f 5 = 120`, `needsZ` set,
/// driven through `compile`/`run` rather than calling `sir::lower` raw.
#[test]
fn recursion_via_z_scenario() {
    let compiled = compile(&recursive_factorial(), LanguageVersion::V2, LoweringOptions::default()).unwrap();
    assert!(compiled.needs_z);

    let params = MachineParameters::default_for(LanguageVersion::V2);
    let outcome = run(&compiled, &params, ExBudget::max()).unwrap();
    assert_eq!(outcome.result, Constant::integer(120));
}

/// Scenario 5: the same program exhausts a tiny budget; the reported
/// failure carries an empty trace (no `Trace` builtin ever ran) and a spent
/// budget that never exceeds the initial allotment (spec §8 budget
/// monotonicity). `tiny`'s CPU component is below the flat per-step charge,
/// so the very first charge attempt fails without ever committing a spend —
/// `spent_budget` must therefore come back as exactly zero, not as the
/// unspent remainder of `tiny` (which a `remaining`/`spent` mislabel would
/// report instead).
#[test]
fn budget_exhaustion_scenario() {
    let compiled = compile(&recursive_factorial(), LanguageVersion::V2, LoweringOptions::default()).unwrap();
    let params = MachineParameters::default_for(LanguageVersion::V2);
    let tiny = ExBudget::new(1000, 1000);

    let failure = run(&compiled, &params, tiny).unwrap_err();
    assert!(matches!(failure.kind, MachineError::BudgetExhausted { .. }));
    assert_eq!(failure.traces, Vec::<String>::new());
    assert_eq!(failure.spent_budget, ExBudget::new(0, 0));
}

/// Scenario 6: traces come back in source (left-to-right, strict
/// application) order regardless of what the program ultimately returns.
///
/// SIR has no `trace` construct of its own (only `IfThenElse`/`Error`
/// desugar through it internally), so this scenario is driven through
/// [`run_term`] against a hand-built UPLC term — the other accepted input
/// shape spec §6 names alongside a SIR tree.
#[test]
fn trace_ordering_scenario() {
    let traced = |msg: &str, rest: Term| {
        Term::Builtin(Builtin::Trace)
            .force()
            .apply(Term::constant(Constant::string(msg)))
            .apply(rest)
    };
    let program = traced("a", traced("b", traced("c", Term::integer(0))));

    let params = MachineParameters::default_for(LanguageVersion::V2);
    let outcome = run_term(&program, &params, ExBudget::max()).unwrap();

    assert_eq!(
        outcome.traces,
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    );
}

/// A failed lowering (non-exhaustive match) never reaches the evaluator —
/// `compile` rejects it directly, matching spec §7's "rejected before
/// evaluation" row for `LoweringError`.
#[test]
fn lowering_failure_is_rejected_before_evaluation() {
    let program = Sir::Match {
        scrutinee: Box::new(Sir::Const(SirConst::Bool(true))),
        decl: "Data".into(),
        cases: vec![],
        unchecked: false,
    };
    let result = compile(&program, LanguageVersion::V2, LoweringOptions::default());
    assert!(result.is_err());
}

#[test]
fn strict_ascending_indices_accepts_a_well_formed_redeemer_list() {
    assert_eq!(check_strict_ascending(&[0, 1, 2, 3]), Ok(()));
}

#[test]
fn strict_ascending_indices_reports_the_duplicate() {
    let result = check_strict_ascending(&[0, 1, 1, 3]);
    assert_eq!(result, Err(vec![1]));
}

// Ensure `Failure` stays ergonomic to match on by destructuring, not just
// via the `MachineError` field (regression guard for the driver's public
// shape).
#[test]
fn failure_shape_exposes_per_builtin_costs() {
    let compiled = compile(&recursive_factorial(), LanguageVersion::V2, LoweringOptions::default()).unwrap();
    let params = MachineParameters::default_for(LanguageVersion::V2);
    let Failure { per_builtin_costs, .. } = run(&compiled, &params, ExBudget::new(1000, 1000)).unwrap_err();
    assert!(per_builtin_costs.builtin_total(Builtin::MultiplyInteger).cpu >= 0);
}
