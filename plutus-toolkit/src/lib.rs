//! Rust-native building blocks for lowering a surface intermediate
//! representation down to Untyped Plutus Core and evaluating it.
//!
//! `plutus-toolkit` doesn't provide any particular application logic; it
//! is meant to be used as a base layer by whatever embeds a UPLC
//! evaluator — a wallet, an off-chain transaction builder, a test
//! harness. Each module below is its own published crate; this one just
//! gathers them under a single dependency.

#[doc(inline)]
pub use plutus_data as data;

#[doc(inline)]
pub use uplc;

#[doc(inline)]
pub use sir;

#[doc(inline)]
pub use plutus_pipeline as pipeline;
