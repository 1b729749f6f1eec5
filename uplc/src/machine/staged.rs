//! The staged/JIT evaluator (spec §5 "Staged/JIT evaluator").
//!
//! `compile` walks a [`Term`] exactly once, producing a tree of boxed
//! closures (`Code`); `StagedProgram::run` then drives that tree without
//! ever re-inspecting the original AST. This is the ahead-of-time
//! specialization spec §5 asks for, simplified per `SPEC_FULL.md`: no
//! bump-allocator arena, just `Rc`-shared closures, which is enough to
//! avoid repeated term dispatch without taking on a custom allocator.
//!
//! Budget charging and builtin dispatch reuse exactly the same
//! [`crate::machine::value::Value`] representation and
//! [`crate::builtins::apply`] entry point the reference [`super::cek`]
//! machine uses, so the two evaluators can only diverge in control
//! strategy, never in what a term or builtin *means* — the property spec
//! §8 calls "engine equivalence".
//!
//! Unlike the CEK machine's explicit context stack, this evaluator
//! recurses through Rust's call stack (`Code` closures call each other
//! directly), so it is only safe up to [`MAX_STAGED_TERM_SIZE`] AST nodes;
//! [`compile`] rejects anything larger rather than risk a stack overflow.

use crate::builtin::Builtin;
use crate::builtins;
use crate::machine::budget::{ExBudget, SpendLedger, StepKind};
use crate::machine::cek::{value_memory_usage, EvalFailure, EvalOutcome};
use crate::machine::cost_model::MachineParameters;
use crate::machine::error::{MachineError, MachineResult};
use crate::machine::value::{Body, Env, Value};
use crate::term::Term;
use std::rc::Rc;

/// Above this many AST nodes, `compile` refuses the term rather than build
/// a closure tree whose evaluation could blow the Rust call stack (spec
/// §4.2's "nesting depth in the tens of thousands" is the reference
/// machine's territory, not this one's).
pub const MAX_STAGED_TERM_SIZE: usize = 20_000;

pub type Code = dyn Fn(&Env, &mut Ctx) -> MachineResult<Value>;

/// Threaded through every compiled closure call: the live budget, the
/// spend ledger and any `trace` output, plus the cost tables.
pub struct Ctx<'p> {
    pub params: &'p MachineParameters,
    pub initial_budget: ExBudget,
    pub budget: ExBudget,
    pub ledger: SpendLedger,
    pub traces: Vec<String>,
}

impl<'p> Ctx<'p> {
    /// `initial_budget - budget`, i.e. what this run has actually charged
    /// so far — not to be confused with `budget`, which is what remains.
    fn spent(&self) -> ExBudget {
        self.initial_budget - self.budget
    }

    fn charge_step(&mut self, kind: StepKind) -> MachineResult<()> {
        self.ledger.record_step(kind);
        let cost = self.params.machine_costs.cost_of(kind);
        match self.budget.checked_sub(cost) {
            Some(left) => {
                self.budget = left;
                Ok(())
            }
            None => Err(MachineError::BudgetExhausted {
                spent_mem: self.spent().mem,
                spent_cpu: self.spent().cpu,
            }),
        }
    }

    fn charge_builtin(&mut self, b: Builtin, sizes: &[i64]) -> MachineResult<()> {
        let cost = self.params.cost_of(b, sizes);
        self.ledger.record_builtin(b, cost);
        match self.budget.checked_sub(cost) {
            Some(left) => {
                self.budget = left;
                Ok(())
            }
            None => Err(MachineError::BudgetExhausted {
                spent_mem: self.spent().mem,
                spent_cpu: self.spent().cpu,
            }),
        }
    }
}

pub struct StagedProgram {
    code: Rc<Code>,
}

impl StagedProgram {
    pub fn run(&self, params: &MachineParameters, budget: ExBudget) -> Result<EvalOutcome, EvalFailure> {
        let mut ctx = Ctx {
            params,
            initial_budget: budget,
            budget,
            ledger: SpendLedger::default(),
            traces: Vec::new(),
        };
        match (self.code)(&Env::empty(), &mut ctx) {
            Ok(value) => Ok(EvalOutcome {
                value,
                remaining_budget: ctx.budget,
                traces: ctx.traces,
                ledger: ctx.ledger,
            }),
            Err(error) => Err(EvalFailure {
                error,
                remaining_budget: ctx.budget,
                traces: ctx.traces,
                ledger: ctx.ledger,
            }),
        }
    }
}

pub fn compile(term: &Term) -> MachineResult<StagedProgram> {
    if term.size() > MAX_STAGED_TERM_SIZE {
        return Err(MachineError::DepthOverflow(term.size()));
    }
    Ok(StagedProgram {
        code: compile_term(term),
    })
}

fn compile_term(term: &Term) -> Rc<Code> {
    match term {
        Term::Var(v) => {
            let index = v.index;
            Rc::new(move |env, ctx| {
                ctx.charge_step(StepKind::Var)?;
                env.lookup(index).ok_or(MachineError::FreeVariable(index))
            })
        }
        Term::LamAbs { debug_name, body } => {
            let compiled_body = compile_term(body);
            let name = debug_name.clone();
            Rc::new(move |env, ctx| {
                ctx.charge_step(StepKind::LamAbs)?;
                Ok(Value::Lambda {
                    debug_name: name.clone(),
                    body: Body::Compiled(compiled_body.clone()),
                    env: env.clone(),
                })
            })
        }
        Term::Apply(f, a) => {
            let compiled_f = compile_term(f);
            let compiled_a = compile_term(a);
            Rc::new(move |env, ctx| {
                ctx.charge_step(StepKind::Apply)?;
                let fun = compiled_f(env, ctx)?;
                let arg = compiled_a(env, ctx)?;
                apply_value(fun, arg, env, ctx)
            })
        }
        Term::Delay(t) => {
            let compiled_t = compile_term(t);
            Rc::new(move |env, ctx| {
                ctx.charge_step(StepKind::Delay)?;
                Ok(Value::Delay(Body::Compiled(compiled_t.clone()), env.clone()))
            })
        }
        Term::Force(t) => {
            let compiled_t = compile_term(t);
            Rc::new(move |env, ctx| {
                ctx.charge_step(StepKind::Force)?;
                let value = compiled_t(env, ctx)?;
                force_value(value, ctx)
            })
        }
        Term::Constant(c) => {
            let c = c.clone();
            Rc::new(move |_env, ctx| {
                ctx.charge_step(StepKind::Constant)?;
                Ok(Value::Constant(c.clone()))
            })
        }
        Term::Builtin(b) => {
            let b = *b;
            Rc::new(move |_env, ctx| {
                ctx.charge_step(StepKind::Builtin)?;
                Ok(Value::Builtin {
                    builtin: b,
                    forces_consumed: 0,
                    args: Vec::new(),
                })
            })
        }
        Term::Error => Rc::new(|_env, _ctx| Err(MachineError::UserError)),
        Term::Case(scrutinee, branches) => {
            let compiled_scrutinee = compile_term(scrutinee);
            let compiled_branches: Vec<Rc<Code>> = branches.iter().map(compile_term).collect();
            Rc::new(move |env, ctx| {
                ctx.charge_step(StepKind::Case)?;
                let value = compiled_scrutinee(env, ctx)?;
                match value {
                    Value::Constr { tag, fields } => {
                        let branch = compiled_branches
                            .get(tag as usize)
                            .ok_or(MachineError::MissingCase {
                                tag,
                                available: compiled_branches.len(),
                            })?;
                        let mut result = branch(env, ctx)?;
                        for field in fields {
                            result = apply_value(result, field, env, ctx)?;
                        }
                        Ok(result)
                    }
                    _ => Err(MachineError::TypeMismatch {
                        builtin: Builtin::ChooseData,
                        expected: "constr",
                        got: "other",
                    }),
                }
            })
        }
        Term::Constr(tag, args) => {
            let tag = *tag;
            let compiled_args: Vec<Rc<Code>> = args.iter().map(compile_term).collect();
            Rc::new(move |env, ctx| {
                ctx.charge_step(StepKind::Constr)?;
                let fields = compiled_args
                    .iter()
                    .map(|c| c(env, ctx))
                    .collect::<MachineResult<Vec<_>>>()?;
                Ok(Value::Constr { tag, fields })
            })
        }
    }
}

fn force_value(value: Value, ctx: &mut Ctx) -> MachineResult<Value> {
    match value {
        Value::Delay(Body::Compiled(code), env) => code(&env, ctx),
        Value::Delay(Body::Interpreted(_), _) => Err(MachineError::NotDelayed),
        Value::Builtin {
            builtin,
            forces_consumed,
            args,
        } => maybe_saturate(builtin, forces_consumed + 1, args, ctx),
        _ => Err(MachineError::NotDelayed),
    }
}

fn apply_value(fun: Value, arg: Value, _env: &Env, ctx: &mut Ctx) -> MachineResult<Value> {
    match fun {
        Value::Lambda {
            body: Body::Compiled(code),
            env,
            ..
        } => code(&env.extend(arg), ctx),
        Value::Lambda {
            body: Body::Interpreted(_),
            ..
        } => Err(MachineError::NotAFunction),
        Value::Builtin {
            builtin,
            forces_consumed,
            mut args,
        } => {
            args.push(arg);
            maybe_saturate(builtin, forces_consumed, args, ctx)
        }
        _ => Err(MachineError::NotAFunction),
    }
}

fn maybe_saturate(
    builtin: Builtin,
    forces_consumed: u8,
    args: Vec<Value>,
    ctx: &mut Ctx,
) -> MachineResult<Value> {
    let sig = builtin.signature();
    if forces_consumed == sig.forces && args.len() == sig.arity as usize {
        let sizes: Vec<i64> = args.iter().map(value_memory_usage).collect();
        ctx.charge_builtin(builtin, &sizes)?;
        builtins::apply(builtin, &args, &mut ctx.traces)
    } else {
        Ok(Value::Builtin {
            builtin,
            forces_consumed,
            args,
        })
    }
}
