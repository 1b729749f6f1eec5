//! The `*Data` builtin family (spec §4.3), grounded on `plutus_data::Data`
//! and its canonical codec.

use super::{as_bytestring, as_data, as_integer, bytes_value, data_value, R};
use crate::builtin::Builtin;
use crate::constant::{Constant, Type};
use crate::machine::error::MachineError;
use crate::machine::value::Value;
use num_traits::ToPrimitive;
use plutus_data::Data;
use std::rc::Rc;

fn as_proto_list(b: Builtin, v: &Value) -> R<&[Constant]> {
    match v.as_constant() {
        Some(Constant::ProtoList(_, items)) => Ok(items),
        _ => Err(mismatch(b, "list")),
    }
}

fn constant_to_data(b: Builtin, c: &Constant) -> R<Data> {
    match c {
        Constant::Data(d) => Ok((**d).clone()),
        _ => Err(mismatch(b, "data")),
    }
}

fn constant_to_pair_of_data(b: Builtin, c: &Constant) -> R<(Data, Data)> {
    match c {
        Constant::ProtoPair(_, _, a, bb) => {
            Ok((constant_to_data(b, a)?, constant_to_data(b, bb)?))
        }
        _ => Err(mismatch(b, "pair of data")),
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
        ChooseData => {
            let d = as_data(b, &args[0])?;
            let branch = match d {
                Data::Constr { .. } => 1,
                Data::Map(_) => 2,
                Data::List(_) => 3,
                Data::I(_) => 4,
                Data::B(_) => 5,
            };
            Ok(args[branch].clone())
        }
        ConstrData => {
            let tag = as_integer(b, &args[0])?
                .to_u64()
                .ok_or_else(|| MachineError::BuiltinError {
                    builtin: b,
                    message: "constructor tag out of range".into(),
                })?;
            let items = as_proto_list(b, &args[1])?;
            let fields = items
                .iter()
                .map(|c| constant_to_data(b, c))
                .collect::<R<Vec<_>>>()?;
            Ok(data_value(Data::constr(tag, fields)))
        }
        MapData => {
            let items = as_proto_list(b, &args[0])?;
            let entries = items
                .iter()
                .map(|c| constant_to_pair_of_data(b, c))
                .collect::<R<Vec<_>>>()?;
            Ok(data_value(Data::map(entries)))
        }
        ListData => {
            let items = as_proto_list(b, &args[0])?;
            let elems = items
                .iter()
                .map(|c| constant_to_data(b, c))
                .collect::<R<Vec<_>>>()?;
            Ok(data_value(Data::list(elems)))
        }
        IData => {
            let i = as_integer(b, &args[0])?;
            Ok(data_value(Data::integer(i.clone())))
        }
        BData => {
            let bytes = as_bytestring(b, &args[0])?;
            Ok(data_value(Data::bytestring(bytes.to_vec())))
        }
        UnConstrData => {
            let d = as_data(b, &args[0])?;
            match d {
                Data::Constr { tag, args: fields } => {
                    let field_items = fields
                        .iter()
                        .map(|f| Constant::data(f.clone()))
                        .collect::<Vec<_>>();
                    Ok(Value::Constant(Rc::new(Constant::ProtoPair(
                        Type::Integer,
                        Type::List(Box::new(Type::Data)),
                        Box::new(Constant::integer(*tag)),
                        Box::new(Constant::ProtoList(Type::Data, field_items)),
                    ))))
                }
                _ => Err(mismatch(b, "constr")),
            }
        }
        UnMapData => {
            let d = as_data(b, &args[0])?;
            match d {
                Data::Map(entries) => {
                    let pair_ty = Type::Pair(Box::new(Type::Data), Box::new(Type::Data));
                    let items = entries
                        .iter()
                        .map(|(k, v)| {
                            Constant::ProtoPair(
                                Type::Data,
                                Type::Data,
                                Box::new(Constant::data(k.clone())),
                                Box::new(Constant::data(v.clone())),
                            )
                        })
                        .collect::<Vec<_>>();
                    Ok(Value::Constant(Rc::new(Constant::ProtoList(pair_ty, items))))
                }
                _ => Err(mismatch(b, "map")),
            }
        }
        UnListData => {
            let d = as_data(b, &args[0])?;
            match d {
                Data::List(items) => {
                    let consts = items
                        .iter()
                        .map(|i| Constant::data(i.clone()))
                        .collect::<Vec<_>>();
                    Ok(Value::Constant(Rc::new(Constant::ProtoList(
                        Type::Data,
                        consts,
                    ))))
                }
                _ => Err(mismatch(b, "list")),
            }
        }
        UnIData => {
            let d = as_data(b, &args[0])?;
            match d {
                Data::I(i) => Ok(super::int_value(i.to_num_bigint().clone())),
                _ => Err(mismatch(b, "integer")),
            }
        }
        UnBData => {
            let d = as_data(b, &args[0])?;
            match d {
                Data::B(bs) => Ok(bytes_value(bs.as_slice().to_vec())),
                _ => Err(mismatch(b, "bytestring")),
            }
        }
        EqualsData => {
            let x = as_data(b, &args[0])?;
            let y = as_data(b, &args[1])?;
            Ok(Value::bool(x == y))
        }
        SerialiseData => {
            let d = as_data(b, &args[0])?;
            Ok(bytes_value(plutus_data::encode(d)))
        }
        _ => unreachable!("non-data builtin routed to data_ops::apply"),
    }
}
