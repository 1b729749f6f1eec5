//! The hash builtin family, grounded on `cryptoxide` the same way
//! `pallas_crypto::hash::Hasher` is (see `pallas-crypto/src/hash/hasher.rs`):
//! `cryptoxide::digest::Digest::input`/`result` over the relevant hasher.

use super::{as_bytestring, bytes_value, R};
use crate::builtin::Builtin;
use crate::machine::value::Value;
use cryptoxide::digest::Digest;

pub(crate) fn apply(b: Builtin, args: &[Value]) -> R<Value> {
    use Builtin::*;
    let input = as_bytestring(b, &args[0])?;
    let digest = match b {
        Sha2_256 => {
            let mut h = cryptoxide::sha2::Sha256::new();
            h.input(input);
            let mut out = vec![0u8; 32];
            h.result(&mut out);
            out
        }
        Sha3_256 => {
            let mut h = cryptoxide::sha3::Sha3_256::new();
            h.input(input);
            let mut out = vec![0u8; 32];
            h.result(&mut out);
            out
        }
        Blake2b_224 => {
            let mut h = cryptoxide::blake2b::Blake2b::new(28);
            h.input(input);
            let mut out = vec![0u8; 28];
            h.result(&mut out);
            out
        }
        Blake2b_256 => {
            let mut h = cryptoxide::blake2b::Blake2b::new(32);
            h.input(input);
            let mut out = vec![0u8; 32];
            h.result(&mut out);
            out
        }
        _ => unreachable!("non-hash builtin routed to hash::apply"),
    };
    Ok(bytes_value(digest))
}
