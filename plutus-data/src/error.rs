use thiserror::Error;

/// Failures decoding a [`crate::Data`] value from CBOR.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DataError {
    #[error("malformed cbor: {0}")]
    Cbor(#[from] minicbor::decode::Error),

    #[error("unknown cbor tag {0} for a Data constructor")]
    UnknownConstrTag(u64),

    #[error("constr used the general tag 102 without an any_constructor field")]
    MissingConstructorTag,

    #[error("unknown cbor tag {0} for a bignum")]
    UnknownBigIntTag(u64),

    #[error("unexpected cbor type for Data: {0}")]
    UnexpectedType(String),
}
