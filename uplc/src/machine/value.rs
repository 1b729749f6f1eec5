//! Runtime values the CEK machine produces (spec §4.1 "Values").
//!
//! A closure keeps its defining environment by `Rc` so sharing an
//! environment across sibling closures is a pointer copy, the same
//! `Rc`-based sharing `pallas_primitives` uses for `PlutusData` subtrees
//! rather than deep clones.

use crate::builtin::Builtin;
use crate::constant::Constant;
use crate::term::Term;
use std::rc::Rc;

/// The environment is a simple cons-list of values, indexed by the de
/// Bruijn distance recorded on each `Var` (spec §3.2).
#[derive(Debug, Clone, Default)]
pub struct Env(pub Option<Rc<EnvNode>>);

#[derive(Debug)]
pub struct EnvNode {
    pub value: Value,
    pub parent: Env,
}

impl Env {
    pub fn empty() -> Self {
        Env(None)
    }

    pub fn extend(&self, value: Value) -> Self {
        Env(Some(Rc::new(EnvNode {
            value,
            parent: self.clone(),
        })))
    }

    /// `index` is the number of binders to skip, `0` meaning "the nearest".
    pub fn lookup(&self, index: u32) -> Option<Value> {
        let mut node = self.0.clone()?;
        let mut remaining = index;
        loop {
            if remaining == 0 {
                return Some(node.value.clone());
            }
            remaining -= 1;
            node = node.parent.0.clone()?;
        }
    }
}

/// A delayed/lambda body as captured by whichever evaluator produced it:
/// the reference CEK machine stores the raw subterm and re-enters its
/// `Compute` state on it; the staged evaluator stores an already-compiled
/// closure so re-entering costs no further term traversal. Builtins and
/// the outward-facing API never inspect this — only the two evaluators'
/// own `Force`/`Apply` handling does — so a single [`Value`] type serves
/// both without either one knowing about the other's strategy.
#[derive(Clone)]
pub enum Body {
    Interpreted(Rc<Term>),
    Compiled(Rc<crate::machine::staged::Code>),
}

impl std::fmt::Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Body::Interpreted(t) => f.debug_tuple("Body::Interpreted").field(t).finish(),
            Body::Compiled(_) => f.write_str("Body::Compiled(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Constant(Rc<Constant>),
    /// An unevaluated `delay`'d term paired with the environment it closed
    /// over, forced lazily by `Force` (spec §3.2).
    Delay(Body, Env),
    Lambda {
        debug_name: Option<Rc<str>>,
        body: Body,
        env: Env,
    },
    /// A builtin partially applied to `args.len()` of its arguments, with
    /// `forces_consumed` type-forces already seen — tracked separately
    /// because forces and value-args can interleave per the builtin's
    /// signature (spec §4.3).
    Builtin {
        builtin: Builtin,
        forces_consumed: u8,
        args: Vec<Value>,
    },
    /// A saturated native constructor value (spec §4.1's "native Constr"
    /// strategy, available from the protocol version that supports it).
    Constr { tag: u64, fields: Vec<Value> },
}

impl Value {
    pub fn integer(v: impl Into<num_bigint::BigInt>) -> Self {
        Value::Constant(Rc::new(Constant::integer(v)))
    }

    pub fn bool(b: bool) -> Self {
        Value::Constant(Rc::new(Constant::Bool(b)))
    }

    pub fn unit() -> Self {
        Value::Constant(Rc::new(Constant::Unit))
    }

    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Value::Constant(c) => Some(c),
            _ => None,
        }
    }
}
