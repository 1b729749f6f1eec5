//! The evaluator layer (spec §4 "CEK evaluator", §5 "Staged/JIT evaluator").

pub mod budget;
pub mod cek;
pub mod cost_model;
pub mod error;
pub mod staged;
pub mod value;

pub use budget::ExBudget;
pub use cek::{CekMachine, EvalFailure, EvalOutcome};
pub use cost_model::{LanguageVersion, MachineParameters};
pub use error::{MachineError, MachineResult};
pub use value::{Env, Value};
