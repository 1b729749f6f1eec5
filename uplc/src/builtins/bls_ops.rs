//! The `bls12_381_*` builtin family, delegating all curve arithmetic to
//! [`crate::bls`].

use super::{as_bytestring, as_integer, bytes_value, R};
use crate::bls::{Bls12_381G1Element, Bls12_381G2Element, Bls12_381MlResult};
use crate::builtin::Builtin;
use crate::constant::Constant;
use crate::machine::error::MachineError;
use crate::machine::value::Value;
use std::rc::Rc;

fn as_g1(b: Builtin, v: &Value) -> R<&Bls12_381G1Element> {
    match v.as_constant() {
        Some(Constant::Bls12_381G1Element(e)) => Ok(e),
        _ => Err(mismatch(b, "G1 element")),
    }
}

fn as_g2(b: Builtin, v: &Value) -> R<&Bls12_381G2Element> {
    match v.as_constant() {
        Some(Constant::Bls12_381G2Element(e)) => Ok(e),
        _ => Err(mismatch(b, "G2 element")),
    }
}

fn as_ml(b: Builtin, v: &Value) -> R<&Bls12_381MlResult> {
    match v.as_constant() {
        Some(Constant::Bls12_381MlResult(e)) => Ok(e),
        _ => Err(mismatch(b, "miller loop result")),
    }
}

fn mismatch(b: Builtin, expected: &'static str) -> MachineError {
    MachineError::TypeMismatch {
        builtin: b,
        expected,
        got: "other",
    }
}

fn wrap_err(b: Builtin, e: impl std::fmt::Display) -> MachineError {
    MachineError::BuiltinError {
        builtin: b,
        message: e.to_string(),
    }
}

pub(crate) fn apply(b: Builtin, args: &[Value]) -> R<Value> {
    use Builtin::*;
    match b {
        Bls12381G1Add => {
            let x = as_g1(b, &args[0])?;
            let y = as_g1(b, &args[1])?;
            Ok(Value::Constant(Rc::new(Constant::Bls12_381G1Element(Rc::new(
                x.add(y),
            )))))
        }
        Bls12381G1Neg => {
            let x = as_g1(b, &args[0])?;
            Ok(Value::Constant(Rc::new(Constant::Bls12_381G1Element(Rc::new(
                x.neg(),
            )))))
        }
        Bls12381G1ScalarMul => {
            let scalar = as_integer(b, &args[0])?;
            let point = as_g1(b, &args[1])?;
            let (_, be) = scalar.to_bytes_be();
            Ok(Value::Constant(Rc::new(Constant::Bls12_381G1Element(Rc::new(
                point.scalar_mul(&be),
            )))))
        }
        Bls12381G1Equal => {
            let x = as_g1(b, &args[0])?;
            let y = as_g1(b, &args[1])?;
            Ok(Value::bool(x == y))
        }
        Bls12381G1Compress => {
            let x = as_g1(b, &args[0])?;
            Ok(bytes_value(x.compress().to_vec()))
        }
        Bls12381G1Uncompress => {
            let bytes = as_bytestring(b, &args[0])?;
            let point = Bls12_381G1Element::uncompress(bytes).map_err(|e| wrap_err(b, e))?;
            Ok(Value::Constant(Rc::new(Constant::Bls12_381G1Element(Rc::new(
                point,
            )))))
        }
        Bls12381G1HashToGroup => {
            let message = as_bytestring(b, &args[0])?;
            let dst = as_bytestring(b, &args[1])?;
            Ok(Value::Constant(Rc::new(Constant::Bls12_381G1Element(Rc::new(
                Bls12_381G1Element::hash_to_group(message, dst),
            )))))
        }
        Bls12381G2Add => {
            let x = as_g2(b, &args[0])?;
            let y = as_g2(b, &args[1])?;
            Ok(Value::Constant(Rc::new(Constant::Bls12_381G2Element(Rc::new(
                x.add(y),
            )))))
        }
        Bls12381G2Neg => {
            let x = as_g2(b, &args[0])?;
            Ok(Value::Constant(Rc::new(Constant::Bls12_381G2Element(Rc::new(
                x.neg(),
            )))))
        }
        Bls12381G2ScalarMul => {
            let scalar = as_integer(b, &args[0])?;
            let point = as_g2(b, &args[1])?;
            let (_, be) = scalar.to_bytes_be();
            Ok(Value::Constant(Rc::new(Constant::Bls12_381G2Element(Rc::new(
                point.scalar_mul(&be),
            )))))
        }
        Bls12381G2Equal => {
            let x = as_g2(b, &args[0])?;
            let y = as_g2(b, &args[1])?;
            Ok(Value::bool(x == y))
        }
        Bls12381G2Compress => {
            let x = as_g2(b, &args[0])?;
            Ok(bytes_value(x.compress().to_vec()))
        }
        Bls12381G2Uncompress => {
            let bytes = as_bytestring(b, &args[0])?;
            let point = Bls12_381G2Element::uncompress(bytes).map_err(|e| wrap_err(b, e))?;
            Ok(Value::Constant(Rc::new(Constant::Bls12_381G2Element(Rc::new(
                point,
            )))))
        }
        Bls12381G2HashToGroup => {
            let message = as_bytestring(b, &args[0])?;
            let dst = as_bytestring(b, &args[1])?;
            Ok(Value::Constant(Rc::new(Constant::Bls12_381G2Element(Rc::new(
                Bls12_381G2Element::hash_to_group(message, dst),
            )))))
        }
        Bls12381MillerLoop => {
            let g1 = as_g1(b, &args[0])?;
            let g2 = as_g2(b, &args[1])?;
            Ok(Value::Constant(Rc::new(Constant::Bls12_381MlResult(Rc::new(
                Bls12_381MlResult::miller_loop(g1, g2),
            )))))
        }
        Bls12381MulMlResult => {
            let x = as_ml(b, &args[0])?;
            let y = as_ml(b, &args[1])?;
            Ok(Value::Constant(Rc::new(Constant::Bls12_381MlResult(Rc::new(
                x.mul(y),
            )))))
        }
        Bls12381FinalVerify => {
            let x = as_ml(b, &args[0])?;
            let y = as_ml(b, &args[1])?;
            Ok(Value::bool(x.final_verify(y)))
        }
        _ => unreachable!("non-bls builtin routed to bls_ops::apply"),
    }
}
