use super::bitwriter::BitWriter;
use super::zigzag::ZigZag;
use crate::constant::{Constant, Type};
use crate::term::{Program, Term};
use num_bigint::BigUint;

pub fn encode_program(program: &Program) -> Vec<u8> {
    let mut w = BitWriter::new();
    encode_natural(&mut w, program.version.0.into());
    encode_natural(&mut w, program.version.1.into());
    encode_natural(&mut w, program.version.2.into());
    encode_term(&mut w, &program.term);
    w.finish()
}

fn term_tag(t: &Term) -> u8 {
    match t {
        Term::Var(_) => 0,
        Term::Delay(_) => 1,
        Term::LamAbs { .. } => 2,
        Term::Apply(..) => 3,
        Term::Constant(_) => 4,
        Term::Force(_) => 5,
        Term::Error => 6,
        Term::Builtin(_) => 7,
        Term::Constr(..) => 8,
        Term::Case(..) => 9,
    }
}

fn encode_term(w: &mut BitWriter, term: &Term) {
    w.write_bits(term_tag(term) as u64, 4);
    match term {
        Term::Var(v) => encode_natural(w, (v.index as u64).into()),
        Term::Delay(t) | Term::Force(t) => encode_term(w, t),
        Term::LamAbs { body, .. } => encode_term(w, body),
        Term::Apply(f, a) => {
            encode_term(w, f);
            encode_term(w, a);
        }
        Term::Constant(c) => encode_constant(w, c),
        Term::Error => {}
        Term::Builtin(b) => w.write_bits(*b as u64, 7),
        Term::Constr(tag, args) => {
            encode_natural(w, (*tag).into());
            encode_natural(w, (args.len() as u64).into());
            for a in args {
                encode_term(w, a);
            }
        }
        Term::Case(scrutinee, branches) => {
            encode_term(w, scrutinee);
            encode_natural(w, (branches.len() as u64).into());
            for b in branches {
                encode_term(w, b);
            }
        }
    }
}

fn type_tag(t: &Type) -> u8 {
    match t {
        Type::Bool => 0,
        Type::Integer => 1,
        Type::ByteString => 2,
        Type::String => 3,
        Type::Unit => 4,
        Type::Data => 5,
        Type::List(_) => 6,
        Type::Pair(_, _) => 7,
        Type::Bls12_381G1Element => 8,
        Type::Bls12_381G2Element => 9,
        Type::Bls12_381MlResult => 10,
    }
}

fn encode_type(w: &mut BitWriter, t: &Type) {
    w.write_bits(type_tag(t) as u64, 4);
    match t {
        Type::List(inner) => encode_type(w, inner),
        Type::Pair(a, b) => {
            encode_type(w, a);
            encode_type(w, b);
        }
        _ => {}
    }
}

fn encode_constant(w: &mut BitWriter, c: &Constant) {
    encode_type(w, &c.type_of());
    encode_value_body(w, c);
}

fn encode_value_body(w: &mut BitWriter, c: &Constant) {
    match c {
        Constant::Integer(i) => encode_integer(w, i),
        Constant::ByteString(b) => encode_bytestring(w, b),
        Constant::String(s) => encode_bytestring(w, s.as_bytes()),
        Constant::Unit => {}
        Constant::Bool(b) => w.write_bit(*b),
        Constant::Data(d) => encode_bytestring(w, &plutus_data::encode(d)),
        Constant::ProtoList(_, items) => {
            encode_natural(w, (items.len() as u64).into());
            for item in items {
                encode_value_body(w, item);
            }
        }
        Constant::ProtoPair(_, _, a, b) => {
            encode_value_body(w, a);
            encode_value_body(w, b);
        }
        Constant::Bls12_381G1Element(e) => encode_bytestring(w, &e.compress()),
        Constant::Bls12_381G2Element(e) => encode_bytestring(w, &e.compress()),
        Constant::Bls12_381MlResult(_) => {
            panic!("a Miller-loop result can never appear as a program literal")
        }
    }
}

fn encode_natural(w: &mut BitWriter, mut n: BigUint) {
    loop {
        let byte = (&n & BigUint::from(0x7fu8))
            .to_bytes_le()
            .first()
            .copied()
            .unwrap_or(0);
        n >>= 7u32;
        let more = n > BigUint::from(0u8);
        w.write_bit(more);
        w.write_bits(byte as u64, 7);
        if !more {
            break;
        }
    }
}

fn encode_integer(w: &mut BitWriter, i: &num_bigint::BigInt) {
    encode_natural(w, i.clone().zigzag());
}

fn encode_bytestring(w: &mut BitWriter, bytes: &[u8]) {
    w.align_to_byte();
    for chunk in bytes.chunks(255) {
        w.write_byte(chunk.len() as u8);
        w.write_bytes(chunk);
    }
    w.write_byte(0);
}
