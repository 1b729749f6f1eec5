use uplc::machine::{CekMachine, ExBudget, LanguageVersion, MachineParameters};
use uplc::machine::staged;
use uplc::term::Term;
use uplc::Builtin;

fn add_one_and_two() -> Term {
    Term::Builtin(Builtin::AddInteger)
        .apply(Term::integer(1))
        .apply(Term::integer(2))
}

#[test]
fn cek_evaluates_simple_arithmetic() {
    let params = MachineParameters::default_for(LanguageVersion::V2);
    let machine = CekMachine::new(&params, ExBudget::max());
    let outcome = machine.evaluate(&add_one_and_two()).unwrap();
    assert_eq!(
        outcome.value.as_constant().unwrap(),
        &uplc::Constant::integer(3)
    );
}

#[test]
fn staged_evaluator_agrees_with_cek() {
    let params = MachineParameters::default_for(LanguageVersion::V2);
    let term = add_one_and_two();

    let cek = CekMachine::new(&params, ExBudget::max())
        .evaluate(&term)
        .unwrap();
    let program = staged::compile(&term).unwrap();
    let staged_outcome = program.run(&params, ExBudget::max()).unwrap();

    assert_eq!(
        cek.value.as_constant().unwrap(),
        staged_outcome.value.as_constant().unwrap()
    );
    assert_eq!(cek.remaining_budget, staged_outcome.remaining_budget);
    assert_eq!(cek.ledger.step_counts, staged_outcome.ledger.step_counts);
}

#[test]
fn applying_a_lambda_substitutes_the_argument() {
    let identity = Term::lambda(Term::var(0));
    let term = identity.apply(Term::integer(42));

    let params = MachineParameters::default_for(LanguageVersion::V2);
    let outcome = CekMachine::new(&params, ExBudget::max())
        .evaluate(&term)
        .unwrap();
    assert_eq!(outcome.value.as_constant().unwrap(), &uplc::Constant::integer(42));
}

#[test]
fn division_by_zero_is_a_builtin_error() {
    let term = Term::Builtin(Builtin::DivideInteger)
        .apply(Term::integer(1))
        .apply(Term::integer(0));

    let params = MachineParameters::default_for(LanguageVersion::V2);
    let result = CekMachine::new(&params, ExBudget::max()).evaluate(&term);
    assert!(result.is_err());
}

#[test]
fn tiny_budget_is_exhausted() {
    let params = MachineParameters::default_for(LanguageVersion::V2);
    let result = CekMachine::new(&params, ExBudget::new(1, 1)).evaluate(&add_one_and_two());
    assert!(matches!(
        result,
        Err(uplc::EvalFailure {
            error: uplc::MachineError::BudgetExhausted { .. },
            ..
        })
    ));
}

#[test]
fn trace_messages_are_collected_in_emission_order() {
    let inner = Term::Builtin(Builtin::Trace)
        .force()
        .apply(Term::constant(uplc::Constant::string("second")))
        .apply(Term::unit());
    let outer = Term::Builtin(Builtin::Trace)
        .force()
        .apply(Term::constant(uplc::Constant::string("first")))
        .apply(inner);

    let params = MachineParameters::default_for(LanguageVersion::V2);
    let outcome = CekMachine::new(&params, ExBudget::max())
        .evaluate(&outer)
        .unwrap();
    assert_eq!(outcome.traces, vec!["first".to_string(), "second".to_string()]);
}

#[test]
fn native_case_dispatches_on_constructor_tag() {
    let branches = vec![
        Term::lambda(Term::integer(100)),
        Term::lambda(Term::integer(200)),
    ];
    let scrutinee = Term::Constr(1, vec![Term::unit()]);
    let term = Term::Case(Box::new(scrutinee), branches);

    let params = MachineParameters::default_for(LanguageVersion::V4);
    let outcome = CekMachine::new(&params, ExBudget::max())
        .evaluate(&term)
        .unwrap();
    assert_eq!(outcome.value.as_constant().unwrap(), &uplc::Constant::integer(200));
}

#[test]
fn flat_round_trips_a_program_with_data_and_builtins() {
    let data = plutus_data::Data::constr(0, vec![plutus_data::Data::integer(7)]);
    let term = Term::Builtin(Builtin::UnIData).apply(Term::constant(uplc::Constant::data(data)));
    let program = uplc::Program::new((1, 1, 0), term);

    let bytes = uplc::flat::encode_program(&program);
    let back = uplc::flat::decode_program(&bytes).unwrap();
    assert_eq!(back.version, program.version);

    let params = MachineParameters::default_for(LanguageVersion::V2);
    let outcome = CekMachine::new(&params, ExBudget::max())
        .evaluate(&back.term)
        .unwrap();
    assert_eq!(outcome.value.as_constant().unwrap(), &uplc::Constant::integer(7));
}
