//! The pipeline's own error type: a thin union over the two failure
//! sources a driver call can hit (spec §7 "LoweringError: rejected before
//! evaluation"; the rest of the taxonomy surfaces through
//! [`crate::driver::Failure`] instead, since an evaluation failure still
//! carries spent budget and traces that a bare error enum can't hold).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Lowering(#[from] sir::LoweringError),

    #[error("redeemer indices are not strictly ascending: duplicate index {index}")]
    DuplicateRedeemerIndex { index: u32 },
}
