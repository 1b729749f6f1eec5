use super::R;
use crate::builtin::Builtin;
use crate::constant::{Constant, Type};
use crate::machine::error::MachineError;
use crate::machine::value::Value;
use std::rc::Rc;

fn as_pair(b: Builtin, v: &Value) -> R<(&Type, &Type, &Constant, &Constant)> {
    match v.as_constant() {
        Some(Constant::ProtoPair(ta, tb, a, b_)) => Ok((ta, tb, a, b_)),
        _ => Err(mismatch(b, "pair")),
    }
}

fn as_list(b: Builtin, v: &Value) -> R<(&Type, &[Constant])> {
    match v.as_constant() {
        Some(Constant::ProtoList(t, items)) => Ok((t, items)),
        _ => Err(mismatch(b, "list")),
    }
}

fn mismatch(b: Builtin, expected: &'static str) -> MachineError {
    MachineError::TypeMismatch {
        builtin: b,
        expected,
        got: "other",
    }
}

pub(crate) fn apply(b: Builtin, args: &[Value]) -> R<Value> {
    use Builtin::*;
    match b {
        FstPair => {
            let (_, _, a, _) = as_pair(b, &args[0])?;
            Ok(Value::Constant(Rc::new(a.clone())))
        }
        SndPair => {
            let (_, _, _, snd) = as_pair(b, &args[0])?;
            Ok(Value::Constant(Rc::new(snd.clone())))
        }
        ChooseList => {
            let (_, items) = as_list(b, &args[0])?;
            Ok(if items.is_empty() {
                args[1].clone()
            } else {
                args[2].clone()
            })
        }
        MkCons => {
            let head = args[0].as_constant().ok_or(mismatch(b, "constant"))?;
            let (elem_ty, items) = as_list(b, &args[1])?;
            let mut new_items = Vec::with_capacity(items.len() + 1);
            new_items.push(head.clone());
            new_items.extend_from_slice(items);
            Ok(Value::Constant(Rc::new(Constant::ProtoList(
                elem_ty.clone(),
                new_items,
            ))))
        }
        HeadList => {
            let (_, items) = as_list(b, &args[0])?;
            let head = items.first().ok_or_else(|| MachineError::BuiltinError {
                builtin: b,
                message: "headList on an empty list".into(),
            })?;
            Ok(Value::Constant(Rc::new(head.clone())))
        }
        TailList => {
            let (elem_ty, items) = as_list(b, &args[0])?;
            if items.is_empty() {
                return Err(MachineError::BuiltinError {
                    builtin: b,
                    message: "tailList on an empty list".into(),
                });
            }
            Ok(Value::Constant(Rc::new(Constant::ProtoList(
                elem_ty.clone(),
                items[1..].to_vec(),
            ))))
        }
        NullList => {
            let (_, items) = as_list(b, &args[0])?;
            Ok(Value::bool(items.is_empty()))
        }
        MkNilData => Ok(Value::Constant(Rc::new(Constant::ProtoList(
            Type::Data,
            Vec::new(),
        )))),
        MkNilPairData => Ok(Value::Constant(Rc::new(Constant::ProtoList(
            Type::Pair(Box::new(Type::Data), Box::new(Type::Data)),
            Vec::new(),
        )))),
        _ => unreachable!("non-list/pair builtin routed to list_pair::apply"),
    }
}
