//! The on-chain `Data` tagged sum and its canonical CBOR encoding.
//!
//! `Data` is the only value type that crosses the boundary between a UPLC
//! script and the ledger: redeemers, datums and the script context are all
//! `Data`. Its binary form is CBOR with a documented canonical shape (see
//! [`encode`]/[`decode`]) that must be byte-identical across
//! implementations — this module is grounded on
//! `pallas-primitives::plutus_data` and kept behaviorally identical to it,
//! generalized to an arbitrary-precision integer instead of a
//! machine-width one.

mod bigint;
mod bytes;
mod error;

pub use bigint::BigInt;
pub use bytes::ByteString;
pub use error::DataError;

use std::cmp::Ordering;

/// The recursive, structurally-comparable on-chain value.
///
/// See spec §3.1: exactly five variants, immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Data {
    /// A tagged n-ary tuple: `tag` identifies the source constructor, `args`
    /// are its fields in declared order.
    Constr { tag: u64, args: Vec<Data> },
    /// Key-value entries. Order is significant; duplicate keys are legal
    /// (discouraged) and preserved verbatim.
    Map(Vec<(Data, Data)>),
    /// An ordered sequence of values.
    List(Vec<Data>),
    /// An arbitrary-precision integer.
    I(BigInt),
    /// An arbitrary byte string.
    B(ByteString),
}

impl Data {
    pub fn constr(tag: u64, args: Vec<Data>) -> Self {
        Data::Constr { tag, args }
    }

    pub fn map(entries: Vec<(Data, Data)>) -> Self {
        Data::Map(entries)
    }

    pub fn list(elems: Vec<Data>) -> Self {
        Data::List(elems)
    }

    pub fn integer(i: impl Into<BigInt>) -> Self {
        Data::I(i.into())
    }

    pub fn bytestring(bytes: impl Into<ByteString>) -> Self {
        Data::B(bytes.into())
    }

    /// The tag a `Case`/`chooseData` branch dispatch uses, in the fixed
    /// order `Constr, Map, List, I, B` required by spec §4.1.
    pub fn variant_index(&self) -> usize {
        match self {
            Data::Constr { .. } => 0,
            Data::Map(_) => 1,
            Data::List(_) => 2,
            Data::I(_) => 3,
            Data::B(_) => 4,
        }
    }
}

/// Structural ordering: first by variant in the fixed `Constr, Map, List, I,
/// B` order, then by contents. Matches the order `chooseData` dispatches in.
impl PartialOrd for Data {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Data {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Data::Constr { tag: t1, args: a1 }, Data::Constr { tag: t2, args: a2 }) => {
                t1.cmp(t2).then_with(|| a1.cmp(a2))
            }
            (Data::Map(a), Data::Map(b)) => a.cmp(b),
            (Data::List(a), Data::List(b)) => a.cmp(b),
            (Data::I(a), Data::I(b)) => a.cmp(b),
            (Data::B(a), Data::B(b)) => a.cmp(b),
            _ => self.variant_index().cmp(&other.variant_index()),
        }
    }
}

/// Encode `data` into its canonical binary form.
///
/// Integers use minimal encoding, byte strings under 64 bytes are encoded
/// directly and longer ones are chunked into 64-byte indefinite-length
/// segments, maps/lists preserve element order, and `Constr` tags follow
/// the reference Plutus scheme: `121..=127` for constructor tags `0..=6`,
/// `1280..=1400` for tags `7..=127`, and CBOR tag `102` wrapping an explicit
/// `any_constructor` field for tags `>= 128`.
pub fn encode(data: &Data) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut encoder = minicbor::Encoder::new(&mut buf);
    encode_into(data, &mut encoder).expect("encoding into a Vec<u8> cannot fail");
    buf
}

/// Same as [`encode`] but formatted as a lowercase hex string — handy for
/// fixtures and debugging, matching `pallas_validate::uplc::data::Data::to_hex`.
pub fn to_hex(data: &Data) -> String {
    hex::encode(encode(data))
}

/// Decode the canonical binary form produced by [`encode`]. Non-canonical
/// but well-formed CBOR (e.g. a definite-length byte string where the
/// canonical form would use chunking) is accepted; re-encoding the result
/// always yields the canonical bytes (round-trip invariant, spec §8).
pub fn decode(bytes: &[u8]) -> Result<Data, DataError> {
    let mut decoder = minicbor::Decoder::new(bytes);
    decode_from(&mut decoder)
}

const TAG_CONSTR_SMALL_BASE: u64 = 121;
const TAG_CONSTR_SMALL_MAX: u64 = 127;
const TAG_CONSTR_GENERAL: u64 = 102;
const TAG_CONSTR_LARGE_BASE: u64 = 1280;
const TAG_CONSTR_LARGE_MAX: u64 = 1400;

fn constr_tag_for(ix: u64) -> (u64, Option<u64>) {
    if ix <= TAG_CONSTR_SMALL_MAX - TAG_CONSTR_SMALL_BASE {
        (TAG_CONSTR_SMALL_BASE + ix, None)
    } else if ix <= TAG_CONSTR_LARGE_MAX - TAG_CONSTR_LARGE_BASE + 7 {
        (TAG_CONSTR_LARGE_BASE + ix - 7, None)
    } else {
        (TAG_CONSTR_GENERAL, Some(ix))
    }
}

fn decode_constr_tag(tag: u64, any_constructor: Option<u64>) -> Result<u64, DataError> {
    match tag {
        TAG_CONSTR_SMALL_BASE..=TAG_CONSTR_SMALL_MAX => Ok(tag - TAG_CONSTR_SMALL_BASE),
        TAG_CONSTR_LARGE_BASE..=TAG_CONSTR_LARGE_MAX => Ok(tag - TAG_CONSTR_LARGE_BASE + 7),
        TAG_CONSTR_GENERAL => any_constructor.ok_or(DataError::MissingConstructorTag),
        other => Err(DataError::UnknownConstrTag(other)),
    }
}

fn encode_into<W: minicbor::encode::Write>(
    data: &Data,
    e: &mut minicbor::Encoder<W>,
) -> Result<(), minicbor::encode::Error<W::Error>> {
    match data {
        Data::Constr { tag, args } => {
            let (cbor_tag, any_constructor) = constr_tag_for(*tag);
            e.tag(minicbor::data::Tag::new(cbor_tag))?;
            if let Some(ix) = any_constructor {
                e.array(2)?;
                e.u64(ix)?;
                encode_list(args, e)?;
            } else {
                encode_list(args, e)?;
            }
        }
        Data::Map(entries) => {
            e.map(entries.len() as u64)?;
            for (k, v) in entries {
                encode_into(k, e)?;
                encode_into(v, e)?;
            }
        }
        Data::List(items) => encode_list(items, e)?,
        Data::I(i) => bigint::encode(i, e)?,
        Data::B(b) => bytes::encode(b, e)?,
    }
    Ok(())
}

fn encode_list<W: minicbor::encode::Write>(
    items: &[Data],
    e: &mut minicbor::Encoder<W>,
) -> Result<(), minicbor::encode::Error<W::Error>> {
    if items.is_empty() {
        e.array(0)?;
    } else {
        e.begin_array()?;
        for item in items {
            encode_into(item, e)?;
        }
        e.end()?;
    }
    Ok(())
}

fn decode_from(d: &mut minicbor::Decoder<'_>) -> Result<Data, DataError> {
    let datatype = d.datatype()?;
    match datatype {
        minicbor::data::Type::Tag => {
            let probe_tag = d.probe().tag()?.as_u64();
            if probe_tag == 2 || probe_tag == 3 {
                Ok(Data::I(bigint::decode(d)?))
            } else {
                let tag = d.tag()?.as_u64();
                match tag {
                    TAG_CONSTR_GENERAL => {
                        d.array()?;
                        let any_constructor = d.u64()?;
                        let args = decode_list(d)?;
                        Ok(Data::Constr {
                            tag: decode_constr_tag(tag, Some(any_constructor))?,
                            args,
                        })
                    }
                    _ => {
                        let args = decode_list(d)?;
                        Ok(Data::Constr {
                            tag: decode_constr_tag(tag, None)?,
                            args,
                        })
                    }
                }
            }
        }
        minicbor::data::Type::U8
        | minicbor::data::Type::U16
        | minicbor::data::Type::U32
        | minicbor::data::Type::U64
        | minicbor::data::Type::I8
        | minicbor::data::Type::I16
        | minicbor::data::Type::I32
        | minicbor::data::Type::I64
        | minicbor::data::Type::Int => Ok(Data::I(bigint::decode(d)?)),
        minicbor::data::Type::Map | minicbor::data::Type::MapIndef => {
            let len = d.map()?;
            let mut entries = Vec::new();
            match len {
                Some(n) => {
                    for _ in 0..n {
                        entries.push((decode_from(d)?, decode_from(d)?));
                    }
                }
                None => {
                    while d.datatype()? != minicbor::data::Type::Break {
                        entries.push((decode_from(d)?, decode_from(d)?));
                    }
                    d.skip()?;
                }
            }
            Ok(Data::Map(entries))
        }
        minicbor::data::Type::Bytes | minicbor::data::Type::BytesIndef => {
            Ok(Data::B(bytes::decode(d)?))
        }
        minicbor::data::Type::Array | minicbor::data::Type::ArrayIndef => {
            Ok(Data::List(decode_list(d)?))
        }
        other => Err(DataError::UnexpectedType(format!("{other:?}"))),
    }
}

fn decode_list(d: &mut minicbor::Decoder<'_>) -> Result<Vec<Data>, DataError> {
    let len = d.array()?;
    let mut items = Vec::new();
    match len {
        Some(n) => {
            for _ in 0..n {
                items.push(decode_from(d)?);
            }
        }
        None => {
            while d.datatype()? != minicbor::data::Type::Break {
                items.push(decode_from(d)?);
            }
            d.skip()?;
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_constr_with_int_and_bytes() {
        let d = Data::constr(
            1,
            vec![Data::integer(42), Data::bytestring(vec![0x01, 0xff])],
        );
        let bytes = encode(&d);
        let back = decode(&bytes).unwrap();
        assert_eq!(d, back);
        assert_eq!(encode(&back), bytes);
    }

    #[test]
    fn large_constr_tag_uses_general_form() {
        let d = Data::constr(200, vec![]);
        let bytes = encode(&d);
        let back = decode(&bytes).unwrap();
        assert_eq!(d, back);
    }

    #[test]
    fn long_bytestring_chunks_and_roundtrips() {
        let payload = vec![7u8; 130];
        let d = Data::bytestring(payload.clone());
        let bytes = encode(&d);
        let back = decode(&bytes).unwrap();
        assert_eq!(d, back);
        if let Data::B(b) = back {
            assert_eq!(b.as_slice(), payload.as_slice());
        } else {
            panic!("expected bytestring");
        }
    }

    #[test]
    fn structural_ordering_by_variant_then_contents() {
        let constr = Data::constr(0, vec![]);
        let map = Data::map(vec![]);
        assert!(constr < map);
        assert!(Data::integer(1) < Data::integer(2));
    }
}
