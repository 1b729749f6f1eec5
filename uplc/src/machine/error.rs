//! Evaluation-time failures (spec §7's error taxonomy). Kept separate from
//! `plutus_data::DataError` (a decode-time concern) and from `sir`'s
//! `LoweringError` (a compile-time concern) — this module covers only
//! what the CEK/staged evaluators can raise while running a `Term`.

use crate::builtin::Builtin;

#[derive(Debug, thiserror::Error)]
pub enum MachineError {
    #[error("free variable at de Bruijn index {0} — the term is not closed")]
    FreeVariable(u32),

    #[error("no branch matches constructor tag {tag} ({available} available)")]
    MissingCase { tag: u64, available: usize },

    #[error("type mismatch applying `{builtin}`: expected {expected}, got {got}")]
    TypeMismatch {
        builtin: Builtin,
        expected: &'static str,
        got: &'static str,
    },

    #[error("builtin `{builtin}` failed: {message}")]
    BuiltinError { builtin: Builtin, message: String },

    #[error("explicit `error` term evaluated")]
    UserError,

    #[error("not a function: attempted to apply a non-lambda, non-builtin value")]
    NotAFunction,

    #[error("not a delayed term: attempted to force a non-delay value")]
    NotDelayed,

    #[error("execution budget exhausted after spending {spent_mem} mem / {spent_cpu} cpu")]
    BudgetExhausted { spent_mem: i64, spent_cpu: i64 },

    #[error("evaluation exceeded the maximum term/environment depth ({0})")]
    DepthOverflow(usize),

    #[error("trace sink rejected a message: {0}")]
    TraceSinkFailure(String),
}

pub type MachineResult<T> = Result<T, MachineError>;
