//! `LoweringError` — spec §4.1/§7's compile-time failure taxonomy, carrying
//! a source position when the SIR tree has one. Grounded on `miette`'s
//! `Diagnostic` derive, already a dependency of `pallas-validate/Cargo.toml`
//! though unused by any surviving file there.

use crate::ast::Span;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum LoweringError {
    #[error("unbound variable `{name}`")]
    UnboundVariable { name: String, span: Option<Span> },

    #[error("unresolved external `{module}::{name}`")]
    UnresolvedExternal {
        module: String,
        name: String,
        span: Option<Span>,
    },

    #[error("unknown declaration `{name}`")]
    UnknownDeclaration { name: String, span: Option<Span> },

    #[error("unknown constructor `{constructor}` of declaration `{decl}`")]
    UnknownConstructor {
        decl: String,
        constructor: String,
        span: Option<Span>,
    },

    #[error("constructor `{constructor}` expects {expected} argument(s), got {got}")]
    ArityMismatch {
        constructor: String,
        expected: usize,
        got: usize,
        span: Option<Span>,
    },

    #[error("wildcard pattern must be the final case in a match")]
    WildcardNotLast { span: Option<Span> },

    #[error("match on `{decl}` does not cover constructor `{missing}` and is not marked unchecked")]
    NonExhaustiveMatch {
        decl: String,
        missing: String,
        span: Option<Span>,
    },

    #[error("match has no cases and no wildcard")]
    EmptyMatch { span: Option<Span> },

    #[error("a recursive `let` may bind exactly one name; mutual recursion is not supported")]
    MutualRecursion { span: Option<Span> },

    #[error("`select` on `{decl}` requires a single-constructor declaration")]
    SelectOnMultiConstructor { decl: String, span: Option<Span> },

    #[error("`{decl}` has no field named `{field}`")]
    UnknownField {
        decl: String,
        field: String,
        span: Option<Span>,
    },

    #[error("pattern for `{decl}` binds {bound} name(s) but the constructor has {expected} field(s)")]
    PatternArityMismatch {
        decl: String,
        bound: usize,
        expected: usize,
        span: Option<Span>,
    },

    #[error("constant pattern used against non-primitive declaration `{decl}`")]
    ConstPatternOnNonPrimitive { decl: String, span: Option<Span> },
}
