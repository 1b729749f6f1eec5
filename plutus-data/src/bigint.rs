//! Arbitrary-precision integers for `Data::I`.
//!
//! `pallas_primitives::plutus_data::BigInt` bounds its "small" case to
//! whatever `minicbor::data::Int` covers (machine-width) and falls back to
//! CBOR bignum tags (2/3) only for values outside that range. Spec §3.1
//! requires `Data::I` to hold an arbitrary-precision `ℤ`, so this module
//! keeps `pallas_primitives`'s two-case encoding strategy but backs the
//! whole range with `num_bigint::BigInt`.

use crate::error::DataError;
use num_bigint::{BigInt as NumBigInt, Sign};
use num_traits::{ToPrimitive, Zero};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct BigInt(NumBigInt);

impl BigInt {
    pub fn to_num_bigint(&self) -> &NumBigInt {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for BigInt {
            fn from(v: $t) -> Self {
                BigInt(NumBigInt::from(v))
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl From<NumBigInt> for BigInt {
    fn from(v: NumBigInt) -> Self {
        BigInt(v)
    }
}

impl From<BigInt> for NumBigInt {
    fn from(v: BigInt) -> Self {
        v.0
    }
}

impl From<BigInt> for String {
    fn from(v: BigInt) -> Self {
        v.0.to_string()
    }
}

impl TryFrom<String> for BigInt {
    type Error = num_bigint::ParseBigIntError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse::<NumBigInt>().map(BigInt)
    }
}

impl std::fmt::Display for BigInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Values that fit CBOR's native major-type 0/1 range are encoded directly;
/// everything else uses the bignum tags (2 for non-negative, 3 for negative,
/// magnitude as a big-endian byte string, matching RFC 8949 §3.4.3 and the
/// Haskell reference encoder `pallas_primitives` cites).
const NATIVE_MIN: i128 = -(1i128 << 64);
const NATIVE_MAX: i128 = (1i128 << 64) - 1;

pub(crate) fn encode<W: minicbor::encode::Write>(
    value: &BigInt,
    e: &mut minicbor::Encoder<W>,
) -> Result<(), minicbor::encode::Error<W::Error>> {
    if let Some(small) = value.0.to_i128() {
        if (NATIVE_MIN..=NATIVE_MAX).contains(&small) {
            return encode_native(small, e);
        }
    }

    if value.0.sign() != Sign::Minus {
        let (_, magnitude) = value.0.to_bytes_be();
        e.tag(minicbor::data::Tag::new(2))?;
        e.bytes(&magnitude)?;
    } else {
        // CBOR negative bignum: value == -1 - n, so n == -1 - value == (-value) - 1.
        let n = (-&value.0) - NumBigInt::from(1u8);
        let (_, magnitude) = n.to_bytes_be();
        e.tag(minicbor::data::Tag::new(3))?;
        e.bytes(&magnitude)?;
    }
    Ok(())
}

fn encode_native<W: minicbor::encode::Write>(
    value: i128,
    e: &mut minicbor::Encoder<W>,
) -> Result<(), minicbor::encode::Error<W::Error>> {
    let int = minicbor::data::Int::try_from(value)
        .expect("value was already range-checked against CBOR's native int bounds");
    e.encode(int)?;
    Ok(())
}

pub(crate) fn decode(d: &mut minicbor::Decoder<'_>) -> Result<BigInt, DataError> {
    match d.datatype()? {
        minicbor::data::Type::Tag => {
            let tag = d.tag()?.as_u64();
            let bytes: Vec<u8> = d.bytes()?.to_vec();
            let magnitude = NumBigInt::from_bytes_be(Sign::Plus, &bytes);
            match tag {
                2 => Ok(BigInt(magnitude)),
                3 => Ok(BigInt(-(magnitude + NumBigInt::from(1u8)))),
                other => Err(DataError::UnknownBigIntTag(other)),
            }
        }
        _ => {
            let i: minicbor::data::Int = d.decode()?;
            Ok(BigInt(NumBigInt::from(i128::from(i))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values_roundtrip_through_native_major_types() {
        for v in [-5i64, 0, 1, 42, -1, i64::MAX, i64::MIN] {
            let mut buf = Vec::new();
            let big = BigInt::from(v);
            let mut enc = minicbor::Encoder::new(&mut buf);
            encode(&big, &mut enc).unwrap();
            let mut dec = minicbor::Decoder::new(&buf);
            let back = decode(&mut dec).unwrap();
            assert_eq!(big, back);
        }
    }

    #[test]
    fn huge_values_use_bignum_tags() {
        let huge = NumBigInt::from(u128::MAX) * NumBigInt::from(1000u32);
        let big = BigInt::from(huge.clone());
        let mut buf = Vec::new();
        let mut enc = minicbor::Encoder::new(&mut buf);
        encode(&big, &mut enc).unwrap();
        assert_eq!(buf[0] >> 5, 6); // major type 6 == tag
        let mut dec = minicbor::Decoder::new(&buf);
        let back = decode(&mut dec).unwrap();
        assert_eq!(back.0, huge);

        let neg = -huge - NumBigInt::from(7u32);
        let big_neg = BigInt::from(neg.clone());
        let mut buf2 = Vec::new();
        let mut enc2 = minicbor::Encoder::new(&mut buf2);
        encode(&big_neg, &mut enc2).unwrap();
        let mut dec2 = minicbor::Decoder::new(&buf2);
        let back2 = decode(&mut dec2).unwrap();
        assert_eq!(back2.0, neg);
    }
}
