//! The UPLC binary ("flat") codec (spec §6 "Binary encoding"). Zigzag
//! integer packing is ported from `pallas_codec::flat::zigzag`; the
//! bit-level reader/writer and the term/constant grammar on top of them
//! are new, since no example crate carries a UPLC codec.

mod bitreader;
mod bitwriter;
mod decode;
mod encode;
pub mod zigzag;

pub use decode::decode_program;
pub use encode::encode_program;

#[derive(Debug, thiserror::Error)]
pub enum FlatError {
    #[error("unexpected end of input")]
    Eof,
    #[error("unknown term tag {0}")]
    UnknownTermTag(u8),
    #[error("unknown type tag {0}")]
    UnknownTypeTag(u8),
    #[error("unknown builtin tag {0}")]
    UnknownBuiltinTag(u8),
    #[error("constant of this type cannot appear as a literal: {0}")]
    NonLiteralConstant(&'static str),
    #[error("trailing bytes after a well-formed program")]
    TrailingData,
}
