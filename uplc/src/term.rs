//! The UPLC term model (spec §3.2).
//!
//! `pallas-validate` only calls into an external `uplc`/`uplc_turbo` crate
//! for this (see `DESIGN.md`) — the shape below is written fresh from
//! spec §3.2, in a plain tagged-sum idiom: one enum, boxed recursive
//! fields, no typeclass tricks.
//!
//! Variables carry a relative de Bruijn index (`0` = the nearest enclosing
//! binder) plus an optional debug name, so the evaluator never needs a name
//! table but error messages and the pretty-printer can still say something
//! better than "variable #3".

use crate::builtin::Builtin;
use crate::constant::Constant;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub struct Var {
    pub index: u32,
    pub debug_name: Option<Rc<str>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Var(Var),
    LamAbs {
        debug_name: Option<Rc<str>>,
        body: Box<Term>,
    },
    Apply(Box<Term>, Box<Term>),
    Force(Box<Term>),
    Delay(Box<Term>),
    Constant(Rc<Constant>),
    Builtin(Builtin),
    Error,
    /// Native sum-of-products case split, available from the protocol
    /// version declared by `LanguageVersion::supports_case_constr` onward
    /// (spec §4.1's "native Constr/Case" strategy).
    Case(Box<Term>, Vec<Term>),
    /// A saturated native constructor application.
    Constr(u64, Vec<Term>),
}

impl Term {
    pub fn var(index: u32) -> Self {
        Term::Var(Var {
            index,
            debug_name: None,
        })
    }

    pub fn named_var(index: u32, name: impl Into<Rc<str>>) -> Self {
        Term::Var(Var {
            index,
            debug_name: Some(name.into()),
        })
    }

    pub fn lambda(body: Term) -> Self {
        Term::LamAbs {
            debug_name: None,
            body: Box::new(body),
        }
    }

    pub fn named_lambda(name: impl Into<Rc<str>>, body: Term) -> Self {
        Term::LamAbs {
            debug_name: Some(name.into()),
            body: Box::new(body),
        }
    }

    pub fn apply(self, arg: Term) -> Self {
        Term::Apply(Box::new(self), Box::new(arg))
    }

    pub fn force(self) -> Self {
        Term::Force(Box::new(self))
    }

    pub fn delay(self) -> Self {
        Term::Delay(Box::new(self))
    }

    pub fn constant(c: Constant) -> Self {
        Term::Constant(Rc::new(c))
    }

    pub fn integer(v: impl Into<num_bigint::BigInt>) -> Self {
        Term::constant(Constant::integer(v))
    }

    pub fn boolean(b: bool) -> Self {
        Term::constant(Constant::Bool(b))
    }

    pub fn unit() -> Self {
        Term::constant(Constant::Unit)
    }

    /// Apply `n` nested lambdas around `body`, the curried-multi-arg
    /// encoding spec §3.2 mandates ("curried multi-arg functions are nested
    /// lambdas").
    pub fn multi_lambda(names: &[Option<Rc<str>>], body: Term) -> Self {
        names.iter().rev().fold(body, |acc, name| Term::LamAbs {
            debug_name: name.clone(),
            body: Box::new(acc),
        })
    }

    pub fn multi_apply(self, args: impl IntoIterator<Item = Term>) -> Self {
        args.into_iter().fold(self, Term::apply)
    }

    /// Number of AST nodes, used to whitelist the staged evaluator's
    /// stack-safety threshold (spec §4.2: nesting depth "in the tens of
    /// thousands").
    pub fn size(&self) -> usize {
        match self {
            Term::Var(_) | Term::Constant(_) | Term::Builtin(_) | Term::Error => 1,
            Term::LamAbs { body, .. } | Term::Force(body) | Term::Delay(body) => 1 + body.size(),
            Term::Apply(f, a) => 1 + f.size() + a.size(),
            Term::Case(scrutinee, branches) => {
                1 + scrutinee.size() + branches.iter().map(Term::size).sum::<usize>()
            }
            Term::Constr(_, args) => 1 + args.iter().map(Term::size).sum::<usize>(),
        }
    }
}

/// A full UPLC program: a version triple header plus its term, matching the
/// flat binary format's header (spec §6).
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub version: (u64, u64, u64),
    pub term: Term,
}

impl Program {
    pub fn new(version: (u64, u64, u64), term: Term) -> Self {
        Program { version, term }
    }

    pub fn apply(self, arg: Term) -> Self {
        Program {
            version: self.version,
            term: self.term.apply(arg),
        }
    }
}
