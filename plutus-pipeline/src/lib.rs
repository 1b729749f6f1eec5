//! Driver wiring SIR lowering to UPLC evaluation (spec §4.1 driver
//! contract, §6 external ABI), plus the abstract ports the embedding
//! application implements (spec §6 "Collaborator interfaces consumed").
//!
//! This crate owns nothing about ledgers, transactions or wallets — those
//! are Non-goals (spec §1) represented here only as traits in [`ports`].

pub mod driver;
pub mod error;
pub mod indices;
pub mod ports;

pub use driver::{compile, run, run_flat, run_term, CompiledProgram, Failure, FlatRunError, Outcome};
pub use error::PipelineError;
pub use indices::{check_strict_ascending, check_strict_ascending_or_err};
