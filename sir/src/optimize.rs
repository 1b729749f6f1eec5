//! Let-floating (spec §4.1 "Optimizations"): hoist a `let` out of an
//! enclosing lambda when doing so is safe — the bound values don't mention
//! the lambda's parameter, and evaluating them earlier (once, at the
//! lambda's definition site, rather than once per call) cannot change the
//! emitted trace sequence or failure mode.
//!
//! This is the one required rewrite pass (spec §4.1); it runs over the
//! `Sir` tree before lowering and returns a new tree — SIR trees are
//! immutable, rewrite passes produce fresh ones (spec §3.4).

use crate::ast::{Binding, MatchCase, Sir};
use std::collections::HashSet;
use std::rc::Rc;

pub fn float_lets(sir: &Sir) -> Sir {
    match sir {
        Sir::LamAbs { param, body } => {
            let body = float_lets(body);
            float_out_of_lambda(param, body)
        }
        Sir::Apply(f, a) => Sir::Apply(Box::new(float_lets(f)), Box::new(float_lets(a))),
        Sir::Let {
            bindings,
            body,
            recursive,
        } => Sir::Let {
            bindings: bindings
                .iter()
                .map(|b| Binding {
                    name: b.name.clone(),
                    value: float_lets(&b.value),
                })
                .collect(),
            body: Box::new(float_lets(body)),
            recursive: *recursive,
        },
        Sir::Match {
            scrutinee,
            decl,
            cases,
            unchecked,
        } => Sir::Match {
            scrutinee: Box::new(float_lets(scrutinee)),
            decl: decl.clone(),
            cases: cases
                .iter()
                .map(|c| MatchCase {
                    pattern: c.pattern.clone(),
                    body: float_lets(&c.body),
                })
                .collect(),
            unchecked: *unchecked,
        },
        Sir::Constr {
            decl,
            constructor,
            args,
        } => Sir::Constr {
            decl: decl.clone(),
            constructor: constructor.clone(),
            args: args.iter().map(float_lets).collect(),
        },
        Sir::Select {
            scrutinee,
            decl,
            field,
        } => Sir::Select {
            scrutinee: Box::new(float_lets(scrutinee)),
            decl: decl.clone(),
            field: field.clone(),
        },
        Sir::IfThenElse {
            cond,
            then_branch,
            else_branch,
        } => Sir::IfThenElse {
            cond: Box::new(float_lets(cond)),
            then_branch: Box::new(float_lets(then_branch)),
            else_branch: Box::new(float_lets(else_branch)),
        },
        Sir::And(a, b) => Sir::And(Box::new(float_lets(a)), Box::new(float_lets(b))),
        Sir::Or(a, b) => Sir::Or(Box::new(float_lets(a)), Box::new(float_lets(b))),
        Sir::Not(a) => Sir::Not(Box::new(float_lets(a))),
        Sir::Cast(a) => Sir::Cast(Box::new(float_lets(a))),
        Sir::Decl { decl, body } => Sir::Decl {
            decl: decl.clone(),
            body: Box::new(float_lets(body)),
        },
        // Var, ExternalVar, Const, Builtin, Error carry no subtrees to recurse into.
        other => other.clone(),
    }
}

/// If `body` is a non-recursive `Let` whose bindings are safe to hoist
/// above `param`'s binder, swap `LamAbs(param, Let(bs, inner))` into
/// `Let(bs, LamAbs(param, inner))`. Applied once; a binding that still
/// isn't floatable (depends on `param`) stays behind.
fn float_out_of_lambda(param: &Rc<str>, body: Sir) -> Sir {
    let Sir::Let {
        bindings,
        body: inner,
        recursive: false,
    } = &body
    else {
        return Sir::LamAbs {
            param: param.clone(),
            body: Box::new(body),
        };
    };

    let (floatable, stays): (Vec<_>, Vec<_>) = bindings
        .iter()
        .cloned()
        .partition(|b| is_floatable(&b.value) && !mentions(&b.value, param));

    if floatable.is_empty() {
        return Sir::LamAbs {
            param: param.clone(),
            body: Box::new(body),
        };
    }

    let remaining_body = if stays.is_empty() {
        (**inner).clone()
    } else {
        Sir::Let {
            bindings: stays,
            body: inner.clone(),
            recursive: false,
        }
    };

    let lambda = Sir::LamAbs {
        param: param.clone(),
        body: Box::new(remaining_body),
    };

    floatable.into_iter().rev().fold(lambda, |acc, b| Sir::Let {
        bindings: vec![b],
        body: Box::new(acc),
        recursive: false,
    })
}

/// A value is floatable if evaluating it earlier can't change observable
/// behavior: no `Error`, no `Trace` call, no nested `Let`/`Match` (whose own
/// floatability would need re-checking against the new position).
fn is_floatable(sir: &Sir) -> bool {
    match sir {
        Sir::Error { .. } => false,
        Sir::Apply(f, a) => is_floatable(f) && is_floatable(a) && !calls_trace(sir),
        Sir::Var(_) | Sir::ExternalVar { .. } | Sir::Const(_) | Sir::Builtin(_) => true,
        Sir::Constr { args, .. } => args.iter().all(is_floatable),
        Sir::Select { scrutinee, .. } => is_floatable(scrutinee),
        Sir::Cast(inner) => is_floatable(inner),
        Sir::Not(a) => is_floatable(a),
        Sir::And(a, b) | Sir::Or(a, b) => is_floatable(a) && is_floatable(b),
        Sir::IfThenElse {
            cond,
            then_branch,
            else_branch,
        } => is_floatable(cond) && is_floatable(then_branch) && is_floatable(else_branch),
        _ => false,
    }
}

fn calls_trace(sir: &Sir) -> bool {
    match sir {
        Sir::Builtin(uplc::Builtin::Trace) => true,
        Sir::Apply(f, a) => calls_trace(f) || calls_trace(a),
        _ => false,
    }
}

fn mentions(sir: &Sir, name: &str) -> bool {
    free_vars(sir).contains(name)
}

fn free_vars(sir: &Sir) -> HashSet<Rc<str>> {
    let mut out = HashSet::new();
    collect_free_vars(sir, &mut out);
    out
}

fn collect_free_vars(sir: &Sir, out: &mut HashSet<Rc<str>>) {
    match sir {
        Sir::Var(name) => {
            out.insert(name.clone());
        }
        Sir::LamAbs { param, body } => {
            let mut inner = HashSet::new();
            collect_free_vars(body, &mut inner);
            inner.remove(param);
            out.extend(inner);
        }
        Sir::Apply(f, a) => {
            collect_free_vars(f, out);
            collect_free_vars(a, out);
        }
        Sir::Let {
            bindings,
            body,
            recursive: _,
        } => {
            for b in bindings {
                collect_free_vars(&b.value, out);
            }
            let bound: HashSet<_> = bindings.iter().map(|b| b.name.clone()).collect();
            let mut inner = HashSet::new();
            collect_free_vars(body, &mut inner);
            out.extend(inner.into_iter().filter(|n| !bound.contains(n)));
        }
        Sir::Match {
            scrutinee, cases, ..
        } => {
            collect_free_vars(scrutinee, out);
            for c in cases {
                let mut inner = HashSet::new();
                collect_free_vars(&c.body, &mut inner);
                if let crate::ast::MatchPattern::Constr { bindings, .. } = &c.pattern {
                    for b in bindings {
                        inner.remove(b);
                    }
                }
                out.extend(inner);
            }
        }
        Sir::Constr { args, .. } => {
            for a in args {
                collect_free_vars(a, out);
            }
        }
        Sir::Select { scrutinee, .. } => collect_free_vars(scrutinee, out),
        Sir::IfThenElse {
            cond,
            then_branch,
            else_branch,
        } => {
            collect_free_vars(cond, out);
            collect_free_vars(then_branch, out);
            collect_free_vars(else_branch, out);
        }
        Sir::And(a, b) | Sir::Or(a, b) => {
            collect_free_vars(a, out);
            collect_free_vars(b, out);
        }
        Sir::Not(a) | Sir::Cast(a) => collect_free_vars(a, out),
        Sir::Decl { body, .. } => collect_free_vars(body, out),
        Sir::ExternalVar { .. } | Sir::Const(_) | Sir::Builtin(_) | Sir::Error { .. } => {}
    }
}
