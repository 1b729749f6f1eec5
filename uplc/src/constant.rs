//! Typed UPLC constants (spec §3.2 `Const(c)`).

use num_bigint::BigInt;
use plutus_data::Data;
use std::rc::Rc;

use crate::bls::{Bls12_381G1Element, Bls12_381G2Element, Bls12_381MlResult};

/// The type tag carried alongside a constant, needed to type an empty list
/// or pair and to drive the flat codec's type-application encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Bool,
    Integer,
    ByteString,
    String,
    Unit,
    Data,
    List(Box<Type>),
    Pair(Box<Type>, Box<Type>),
    Bls12_381G1Element,
    Bls12_381G2Element,
    Bls12_381MlResult,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Integer(Rc<BigInt>),
    ByteString(Rc<Vec<u8>>),
    String(Rc<String>),
    Unit,
    Bool(bool),
    Data(Rc<Data>),
    ProtoList(Type, Vec<Constant>),
    ProtoPair(Type, Type, Box<Constant>, Box<Constant>),
    Bls12_381G1Element(Rc<Bls12_381G1Element>),
    Bls12_381G2Element(Rc<Bls12_381G2Element>),
    Bls12_381MlResult(Rc<Bls12_381MlResult>),
}

impl Constant {
    pub fn integer(v: impl Into<BigInt>) -> Self {
        Constant::Integer(Rc::new(v.into()))
    }

    pub fn byte_string(v: Vec<u8>) -> Self {
        Constant::ByteString(Rc::new(v))
    }

    pub fn string(v: impl Into<String>) -> Self {
        Constant::String(Rc::new(v.into()))
    }

    pub fn data(v: Data) -> Self {
        Constant::Data(Rc::new(v))
    }

    pub fn type_of(&self) -> Type {
        match self {
            Constant::Integer(_) => Type::Integer,
            Constant::ByteString(_) => Type::ByteString,
            Constant::String(_) => Type::String,
            Constant::Unit => Type::Unit,
            Constant::Bool(_) => Type::Bool,
            Constant::Data(_) => Type::Data,
            Constant::ProtoList(t, _) => Type::List(Box::new(t.clone())),
            Constant::ProtoPair(a, b, _, _) => Type::Pair(Box::new(a.clone()), Box::new(b.clone())),
            Constant::Bls12_381G1Element(_) => Type::Bls12_381G1Element,
            Constant::Bls12_381G2Element(_) => Type::Bls12_381G2Element,
            Constant::Bls12_381MlResult(_) => Type::Bls12_381MlResult,
        }
    }

    /// Byte-size used by the cost model's "memory units" (spec §4.3: cost
    /// formulas over argument-memory footprints). Matches the reference
    /// Plutus convention of measuring integers and byte strings in 8-byte
    /// words, rounded up, with a floor of 1 word.
    pub fn memory_usage(&self) -> i64 {
        match self {
            Constant::Integer(i) => integer_words(i),
            Constant::ByteString(b) => ((b.len() as i64) + 7) / 8 + 1,
            Constant::String(s) => s.chars().count() as i64 + 1,
            Constant::Unit => 1,
            Constant::Bool(_) => 1,
            Constant::Data(d) => data_memory_usage(d),
            Constant::ProtoList(_, items) => {
                items.iter().map(Constant::memory_usage).sum::<i64>() + 1
            }
            Constant::ProtoPair(_, _, a, b) => a.memory_usage() + b.memory_usage() + 1,
            Constant::Bls12_381G1Element(_) => 18,
            Constant::Bls12_381G2Element(_) => 36,
            Constant::Bls12_381MlResult(_) => 72,
        }
    }
}

fn integer_words(i: &BigInt) -> i64 {
    use num_traits::Zero;
    if i.is_zero() {
        return 1;
    }
    let bits = i.bits();
    ((bits as i64) + 63) / 64
}

fn data_memory_usage(d: &Data) -> i64 {
    match d {
        Data::Constr { args, .. } => 4 + args.iter().map(data_memory_usage).sum::<i64>(),
        Data::Map(entries) => {
            4 + entries
                .iter()
                .map(|(k, v)| data_memory_usage(k) + data_memory_usage(v))
                .sum::<i64>()
        }
        Data::List(items) => 4 + items.iter().map(data_memory_usage).sum::<i64>(),
        Data::I(i) => integer_words(i.to_num_bigint()),
        Data::B(b) => ((b.as_slice().len() as i64) + 7) / 8 + 1,
    }
}
