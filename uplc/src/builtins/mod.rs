//! Builtin semantics (spec §4.3). Each function here implements exactly
//! one saturated builtin call; [`apply`] is the single dispatch point the
//! CEK and staged evaluators both call through, so the two evaluators can
//! never drift on what a builtin actually computes (spec §8 "engine
//! equivalence").
//!
//! Each family below is grounded on the host Rust type it delegates to —
//! `num_bigint`/`num_integer` for the integer family, `cryptoxide` for
//! hashes, `plutus_data` for the `*Data` family, `crate::bls` (itself
//! grounded on `blst`) for the BLS12-381 family.

mod bls_ops;
mod bytestring;
mod control;
mod data_ops;
mod hash;
mod integer;
mod list_pair;
mod string_ops;

use crate::builtin::Builtin;
use crate::constant::Constant;
use crate::machine::error::MachineError;
use crate::machine::value::Value;
use num_bigint::BigInt;
use plutus_data::Data;

pub(crate) type R<T> = Result<T, MachineError>;

pub fn apply(b: Builtin, args: &[Value], traces: &mut Vec<String>) -> R<Value> {
    use Builtin::*;
    match b {
        AddInteger | SubtractInteger | MultiplyInteger | DivideInteger | QuotientInteger
        | RemainderInteger | ModInteger | EqualsInteger | LessThanInteger
        | LessThanEqualsInteger => integer::apply(b, args),

        AppendByteString | ConsByteString | SliceByteString | LengthOfByteString
        | IndexByteString | EqualsByteString | LessThanByteString | LessThanEqualsByteString => {
            bytestring::apply(b, args)
        }

        AppendString | EqualsString | EncodeUtf8 | DecodeUtf8 => string_ops::apply(b, args),

        Sha2_256 | Sha3_256 | Blake2b_224 | Blake2b_256 => hash::apply(b, args),

        IfThenElse | ChooseUnit | Trace => control::apply(b, args, traces),

        FstPair | SndPair | ChooseList | MkCons | HeadList | TailList | NullList | MkNilData
        | MkNilPairData => list_pair::apply(b, args),

        ChooseData | ConstrData | MapData | ListData | IData | BData | UnConstrData | UnMapData
        | UnListData | UnIData | UnBData | EqualsData | SerialiseData => data_ops::apply(b, args),

        Bls12381G1Add | Bls12381G1Neg | Bls12381G1ScalarMul | Bls12381G1Equal
        | Bls12381G1Compress | Bls12381G1Uncompress | Bls12381G1HashToGroup | Bls12381G2Add
        | Bls12381G2Neg | Bls12381G2ScalarMul | Bls12381G2Equal | Bls12381G2Compress
        | Bls12381G2Uncompress | Bls12381G2HashToGroup | Bls12381MillerLoop
        | Bls12381MulMlResult | Bls12381FinalVerify => bls_ops::apply(b, args),
    }
}

fn mismatch(b: Builtin, expected: &'static str) -> MachineError {
    MachineError::TypeMismatch {
        builtin: b,
        expected,
        got: "other",
    }
}

pub(crate) fn as_integer(b: Builtin, v: &Value) -> R<&BigInt> {
    match v.as_constant() {
        Some(Constant::Integer(i)) => Ok(i),
        _ => Err(mismatch(b, "integer")),
    }
}

pub(crate) fn as_bytestring(b: Builtin, v: &Value) -> R<&[u8]> {
    match v.as_constant() {
        Some(Constant::ByteString(bs)) => Ok(bs),
        _ => Err(mismatch(b, "bytestring")),
    }
}

pub(crate) fn as_string(b: Builtin, v: &Value) -> R<&str> {
    match v.as_constant() {
        Some(Constant::String(s)) => Ok(s),
        _ => Err(mismatch(b, "string")),
    }
}

pub(crate) fn as_bool(b: Builtin, v: &Value) -> R<bool> {
    match v.as_constant() {
        Some(Constant::Bool(x)) => Ok(*x),
        _ => Err(mismatch(b, "bool")),
    }
}

pub(crate) fn as_data(b: Builtin, v: &Value) -> R<&Data> {
    match v.as_constant() {
        Some(Constant::Data(d)) => Ok(d),
        _ => Err(mismatch(b, "data")),
    }
}

pub(crate) fn int_value(i: impl Into<BigInt>) -> Value {
    Value::integer(i)
}

pub(crate) fn bytes_value(b: Vec<u8>) -> Value {
    Value::Constant(std::rc::Rc::new(Constant::byte_string(b)))
}

pub(crate) fn string_value(s: impl Into<String>) -> Value {
    Value::Constant(std::rc::Rc::new(Constant::string(s)))
}

pub(crate) fn data_value(d: Data) -> Value {
    Value::Constant(std::rc::Rc::new(Constant::data(d)))
}

pub(crate) fn require_arity<'a>(args: &'a [Value], n: usize) -> R<&'a [Value]> {
    if args.len() == n {
        Ok(args)
    } else {
        Err(MachineError::BuiltinError {
            builtin: Builtin::IfThenElse,
            message: format!("expected {n} arguments, got {}", args.len()),
        })
    }
}
