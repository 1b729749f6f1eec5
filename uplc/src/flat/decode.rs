use super::bitreader::BitReader;
use super::zigzag::ZigZag;
use super::FlatError;
use crate::builtin::Builtin;
use crate::constant::{Constant, Type};
use crate::term::{Program, Term, Var};
use num_bigint::BigUint;
use strum::IntoEnumIterator;

pub fn decode_program(bytes: &[u8]) -> Result<Program, FlatError> {
    let mut r = BitReader::new(bytes);
    let major = decode_natural(&mut r)?.try_into().unwrap_or(u64::MAX);
    let minor = decode_natural(&mut r)?.try_into().unwrap_or(u64::MAX);
    let patch = decode_natural(&mut r)?.try_into().unwrap_or(u64::MAX);
    let term = decode_term(&mut r)?;
    Ok(Program {
        version: (major, minor, patch),
        term,
    })
}

fn decode_term(r: &mut BitReader) -> Result<Term, FlatError> {
    let tag = r.read_bits(4)? as u8;
    Ok(match tag {
        0 => {
            let index: u64 = decode_natural(r)?.try_into().unwrap_or(u64::MAX);
            Term::Var(Var {
                index: index as u32,
                debug_name: None,
            })
        }
        1 => Term::Delay(Box::new(decode_term(r)?)),
        2 => Term::LamAbs {
            debug_name: None,
            body: Box::new(decode_term(r)?),
        },
        3 => {
            let f = decode_term(r)?;
            let a = decode_term(r)?;
            Term::Apply(Box::new(f), Box::new(a))
        }
        4 => Term::constant(decode_constant(r)?),
        5 => Term::Force(Box::new(decode_term(r)?)),
        6 => Term::Error,
        7 => {
            let b = r.read_bits(7)? as u8;
            Term::Builtin(decode_builtin(b)?)
        }
        8 => {
            let tag: u64 = decode_natural(r)?.try_into().unwrap_or(u64::MAX);
            let len: u64 = decode_natural(r)?.try_into().unwrap_or(0);
            let args = (0..len).map(|_| decode_term(r)).collect::<Result<_, _>>()?;
            Term::Constr(tag, args)
        }
        9 => {
            let scrutinee = decode_term(r)?;
            let len: u64 = decode_natural(r)?.try_into().unwrap_or(0);
            let branches = (0..len).map(|_| decode_term(r)).collect::<Result<_, _>>()?;
            Term::Case(Box::new(scrutinee), branches)
        }
        other => return Err(FlatError::UnknownTermTag(other)),
    })
}

fn decode_builtin(tag: u8) -> Result<Builtin, FlatError> {
    Builtin::iter()
        .nth(tag as usize)
        .ok_or(FlatError::UnknownBuiltinTag(tag))
}

fn decode_type(r: &mut BitReader) -> Result<Type, FlatError> {
    let tag = r.read_bits(4)? as u8;
    Ok(match tag {
        0 => Type::Bool,
        1 => Type::Integer,
        2 => Type::ByteString,
        3 => Type::String,
        4 => Type::Unit,
        5 => Type::Data,
        6 => Type::List(Box::new(decode_type(r)?)),
        7 => {
            let a = decode_type(r)?;
            let b = decode_type(r)?;
            Type::Pair(Box::new(a), Box::new(b))
        }
        8 => Type::Bls12_381G1Element,
        9 => Type::Bls12_381G2Element,
        10 => Type::Bls12_381MlResult,
        other => return Err(FlatError::UnknownTypeTag(other)),
    })
}

fn decode_constant(r: &mut BitReader) -> Result<Constant, FlatError> {
    let t = decode_type(r)?;
    decode_value_body(r, &t)
}

fn decode_value_body(r: &mut BitReader, t: &Type) -> Result<Constant, FlatError> {
    Ok(match t {
        Type::Bool => Constant::Bool(r.read_bit()?),
        Type::Integer => Constant::integer(decode_integer(r)?),
        Type::ByteString => Constant::byte_string(decode_bytestring(r)?),
        Type::String => {
            let bytes = decode_bytestring(r)?;
            Constant::string(String::from_utf8_lossy(&bytes).into_owned())
        }
        Type::Unit => Constant::Unit,
        Type::Data => {
            let bytes = decode_bytestring(r)?;
            let data = plutus_data::decode(&bytes)
                .map_err(|_| FlatError::NonLiteralConstant("malformed Data literal"))?;
            Constant::data(data)
        }
        Type::List(inner) => {
            let len: u64 = decode_natural(r)?.try_into().unwrap_or(0);
            let items = (0..len)
                .map(|_| decode_value_body(r, inner))
                .collect::<Result<_, _>>()?;
            Constant::ProtoList((**inner).clone(), items)
        }
        Type::Pair(a_ty, b_ty) => {
            let a = decode_value_body(r, a_ty)?;
            let b = decode_value_body(r, b_ty)?;
            Constant::ProtoPair((**a_ty).clone(), (**b_ty).clone(), Box::new(a), Box::new(b))
        }
        Type::Bls12_381G1Element => {
            let bytes = decode_bytestring(r)?;
            let e = crate::bls::Bls12_381G1Element::uncompress(&bytes)
                .map_err(|_| FlatError::NonLiteralConstant("malformed G1 literal"))?;
            Constant::Bls12_381G1Element(std::rc::Rc::new(e))
        }
        Type::Bls12_381G2Element => {
            let bytes = decode_bytestring(r)?;
            let e = crate::bls::Bls12_381G2Element::uncompress(&bytes)
                .map_err(|_| FlatError::NonLiteralConstant("malformed G2 literal"))?;
            Constant::Bls12_381G2Element(std::rc::Rc::new(e))
        }
        Type::Bls12_381MlResult => {
            return Err(FlatError::NonLiteralConstant(
                "a Miller-loop result cannot appear as a program literal",
            ))
        }
    })
}

fn decode_natural(r: &mut BitReader) -> Result<BigUint, FlatError> {
    let mut acc = BigUint::from(0u8);
    let mut shift = 0u32;
    loop {
        let more = r.read_bit()?;
        let chunk = r.read_bits(7)?;
        acc |= BigUint::from(chunk) << shift;
        shift += 7;
        if !more {
            break;
        }
    }
    Ok(acc)
}

fn decode_integer(r: &mut BitReader) -> Result<num_bigint::BigInt, FlatError> {
    Ok(decode_natural(r)?.zigzag())
}

fn decode_bytestring(r: &mut BitReader) -> Result<Vec<u8>, FlatError> {
    r.align_to_byte();
    let mut out = Vec::new();
    loop {
        let len = r.read_byte()?;
        if len == 0 {
            break;
        }
        out.extend_from_slice(r.read_bytes(len as usize)?);
    }
    Ok(out)
}
