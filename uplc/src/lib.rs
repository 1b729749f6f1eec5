//! Untyped Plutus Core: term model, builtins, cost model, the CEK and
//! staged evaluators, and the binary ("flat") codec.
//!
//! Mirrors the surrounding workspace's convention of one focused crate
//! per concern (see `pallas-codec`, `pallas-crypto`, `pallas-validate`)
//! rather than a single monolithic module tree.

pub mod bls;
pub mod builtin;
pub mod builtins;
pub mod constant;
pub mod flat;
pub mod machine;
pub mod pretty;
pub mod term;

pub use builtin::Builtin;
pub use constant::{Constant, Type};
pub use machine::{
    CekMachine, EvalFailure, EvalOutcome, ExBudget, LanguageVersion, MachineError, MachineParameters,
};
pub use term::{Program, Term, Var};
