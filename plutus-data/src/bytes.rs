//! Canonical byte-string encoding, ported from
//! `pallas_primitives::plutus_data::BoundedBytes`: short strings are a
//! single definite-length CBOR byte string, long ones are chunked into
//! 64-byte indefinite-length segments to match the Haskell reference
//! encoder.

use crate::error::DataError;
use std::ops::Deref;

const CHUNK_SIZE: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct ByteString(Vec<u8>);

impl ByteString {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(bytes: Vec<u8>) -> Self {
        ByteString(bytes)
    }
}

impl From<ByteString> for Vec<u8> {
    fn from(b: ByteString) -> Self {
        b.0
    }
}

impl Deref for ByteString {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<String> for ByteString {
    type Error = hex::FromHexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(ByteString(hex::decode(value)?))
    }
}

impl From<ByteString> for String {
    fn from(b: ByteString) -> Self {
        hex::encode(&b.0)
    }
}

pub(crate) fn encode<W: minicbor::encode::Write>(
    b: &ByteString,
    e: &mut minicbor::Encoder<W>,
) -> Result<(), minicbor::encode::Error<W::Error>> {
    if b.0.len() <= CHUNK_SIZE {
        e.bytes(&b.0)?;
    } else {
        e.begin_bytes()?;
        for chunk in b.0.chunks(CHUNK_SIZE) {
            e.bytes(chunk)?;
        }
        e.end()?;
    }
    Ok(())
}

pub(crate) fn decode(d: &mut minicbor::Decoder<'_>) -> Result<ByteString, DataError> {
    let mut out = Vec::new();
    for chunk in d.bytes_iter()? {
        out.extend_from_slice(chunk?);
    }
    Ok(ByteString(out))
}
