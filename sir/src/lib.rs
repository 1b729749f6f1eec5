//! A typed sum-of-products intermediate representation and its lowering to
//! untyped Plutus Core (spec §3.3, §4.1).
//!
//! `sir` sits between a surface language (out of scope here — spec's
//! Non-goals) and `uplc`: it gives rewrite passes and code generators a
//! structured tree to work over instead of raw de Bruijn terms, and
//! funnels everything down to a single entry point, [`lower`].

pub mod ast;
pub mod decl;
pub mod error;
pub mod lower;
pub mod optimize;

pub use ast::{Binding, MatchCase, MatchPattern, Sir, SirConst, Span};
pub use decl::{ConstrDecl, DataDecl};
pub use error::LoweringError;
pub use lower::{lower, LoweringContext, LoweringOptions, LoweringOutput};
