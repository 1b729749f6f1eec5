//! The SIR tree itself (spec §3.3).
//!
//! This is the system's actual novel core, the reason the toolkit exists.
//! Structured the way `pallas-primitives`'s era enums structure their own
//! tagged sums: a plain enum, boxed recursive fields, `Rc<str>` for names
//! so cloning a subtree during a rewrite pass (let-floating) is cheap.

use num_bigint::BigInt;
use plutus_data::Data;
use std::rc::Rc;

/// Where a SIR node came from, for [`crate::error::LoweringError`]'s
/// source-position reporting (spec §4.1 "Failure semantics").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub file: Option<Rc<str>>,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SirConst {
    Integer(BigInt),
    ByteString(Vec<u8>),
    String(String),
    Bool(bool),
    Unit,
    Data(Data),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: Rc<str>,
    pub value: Sir,
}

/// One `Match` arm. `Wildcard` is only valid as the final case (spec §4.1
/// "a wildcard not in the last position is a compile-time error").
#[derive(Debug, Clone, PartialEq)]
pub enum MatchPattern {
    Constr {
        constructor: Rc<str>,
        bindings: Vec<Rc<str>>,
    },
    Const(SirConst),
    Wildcard,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchCase {
    pub pattern: MatchPattern,
    pub body: Sir,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sir {
    Var(Rc<str>),
    ExternalVar {
        module: Rc<str>,
        name: Rc<str>,
    },
    LamAbs {
        param: Rc<str>,
        body: Box<Sir>,
    },
    Apply(Box<Sir>, Box<Sir>),
    Let {
        bindings: Vec<Binding>,
        body: Box<Sir>,
        recursive: bool,
    },
    /// `decl` names the declaration the scrutinee belongs to — either a
    /// user [`crate::decl::DataDecl`] name or [`crate::decl::DATA_DECL_NAME`]
    /// for a match on the runtime `Data` tagged sum.
    Match {
        scrutinee: Box<Sir>,
        decl: Rc<str>,
        cases: Vec<MatchCase>,
        unchecked: bool,
    },
    Constr {
        decl: Rc<str>,
        constructor: Rc<str>,
        args: Vec<Sir>,
    },
    Select {
        scrutinee: Box<Sir>,
        decl: Rc<str>,
        field: Rc<str>,
    },
    IfThenElse {
        cond: Box<Sir>,
        then_branch: Box<Sir>,
        else_branch: Box<Sir>,
    },
    And(Box<Sir>, Box<Sir>),
    Or(Box<Sir>, Box<Sir>),
    Not(Box<Sir>),
    /// Type ascription, erased at lowering time — SIR's type information
    /// does not survive into untyped UPLC.
    Cast(Box<Sir>),
    Const(SirConst),
    Builtin(uplc::Builtin),
    Error {
        message: Option<String>,
    },
    Decl {
        decl: Rc<crate::decl::DataDecl>,
        body: Box<Sir>,
    },
}

impl Sir {
    pub fn var(name: impl Into<Rc<str>>) -> Self {
        Sir::Var(name.into())
    }

    pub fn apply(self, arg: Sir) -> Self {
        Sir::Apply(Box::new(self), Box::new(arg))
    }

    pub fn lambda(param: impl Into<Rc<str>>, body: Sir) -> Self {
        Sir::LamAbs {
            param: param.into(),
            body: Box::new(body),
        }
    }

    pub fn integer(v: impl Into<BigInt>) -> Self {
        Sir::Const(SirConst::Integer(v.into()))
    }

    pub fn boolean(b: bool) -> Self {
        Sir::Const(SirConst::Bool(b))
    }
}

/// Lowering options (spec §4.1 "options `{ errorTraces, optimize, debug }`").
#[derive(Debug, Clone, Default)]
pub struct LoweringOptions {
    pub error_traces: bool,
    pub optimize: bool,
    /// When set, `debug_name`s survive into the emitted UPLC `Var`/`LamAbs`
    /// nodes for pretty-printing; has no effect on evaluation.
    pub debug: bool,
}
