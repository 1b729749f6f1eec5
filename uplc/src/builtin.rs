//! The fixed, versioned set of primitive functions (spec §3.2 `Builtin(fn)`,
//! §4.3 "Builtins"). Each builtin declares how many type-level forces it
//! needs before it will accept arguments, and how many value arguments it
//! takes — both are looked up once into a process-wide static table
//! (`signature()`), per §9's "global read-only table, no singletons that
//! mutate after first use" guidance.

use strum::{EnumCount, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum Builtin {
    // integers
    AddInteger,
    SubtractInteger,
    MultiplyInteger,
    DivideInteger,
    QuotientInteger,
    RemainderInteger,
    ModInteger,
    EqualsInteger,
    LessThanInteger,
    LessThanEqualsInteger,
    // byte strings
    AppendByteString,
    ConsByteString,
    SliceByteString,
    LengthOfByteString,
    IndexByteString,
    EqualsByteString,
    LessThanByteString,
    LessThanEqualsByteString,
    // strings
    AppendString,
    EqualsString,
    EncodeUtf8,
    DecodeUtf8,
    // hashes
    Sha2_256,
    Sha3_256,
    Blake2b_224,
    Blake2b_256,
    // control
    IfThenElse,
    ChooseUnit,
    Trace,
    // lists and pairs
    FstPair,
    SndPair,
    ChooseList,
    MkCons,
    HeadList,
    TailList,
    NullList,
    MkNilData,
    MkNilPairData,
    // data
    ChooseData,
    ConstrData,
    MapData,
    ListData,
    IData,
    BData,
    UnConstrData,
    UnMapData,
    UnListData,
    UnIData,
    UnBData,
    EqualsData,
    SerialiseData,
    // BLS12-381
    Bls12381G1Add,
    Bls12381G1Neg,
    Bls12381G1ScalarMul,
    Bls12381G1Equal,
    Bls12381G1Compress,
    Bls12381G1Uncompress,
    Bls12381G1HashToGroup,
    Bls12381G2Add,
    Bls12381G2Neg,
    Bls12381G2ScalarMul,
    Bls12381G2Equal,
    Bls12381G2Compress,
    Bls12381G2Uncompress,
    Bls12381G2HashToGroup,
    Bls12381MillerLoop,
    Bls12381MulMlResult,
    Bls12381FinalVerify,
}

/// `(forces, arity)`: the number of leading `Force` applications the
/// builtin needs before it starts accepting value arguments, and the
/// number of value arguments it needs once forced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub forces: u8,
    pub arity: u8,
}

impl Builtin {
    pub fn signature(self) -> Signature {
        use Builtin::*;
        let (forces, arity) = match self {
            AddInteger | SubtractInteger | MultiplyInteger | DivideInteger | QuotientInteger
            | RemainderInteger | ModInteger | EqualsInteger | LessThanInteger
            | LessThanEqualsInteger => (0, 2),

            AppendByteString | ConsByteString | EqualsByteString | LessThanByteString
            | LessThanEqualsByteString | IndexByteString => (0, 2),
            SliceByteString => (0, 3),
            LengthOfByteString => (0, 1),

            AppendString | EqualsString => (0, 2),
            EncodeUtf8 | DecodeUtf8 => (0, 1),

            Sha2_256 | Sha3_256 | Blake2b_224 | Blake2b_256 => (0, 1),

            IfThenElse => (1, 3),
            ChooseUnit => (1, 2),
            Trace => (1, 2),

            FstPair | SndPair => (2, 1),
            ChooseList => (2, 3),
            MkCons => (1, 2),
            HeadList | TailList | NullList => (1, 1),
            MkNilData | MkNilPairData => (0, 1),

            ChooseData => (1, 6),
            ConstrData => (0, 2),
            MapData | ListData | IData | BData => (0, 1),
            UnConstrData | UnMapData | UnListData | UnIData | UnBData => (0, 1),
            EqualsData => (0, 2),
            SerialiseData => (0, 1),

            Bls12381G1Add | Bls12381G1ScalarMul | Bls12381G1Equal | Bls12381G1HashToGroup => {
                (0, 2)
            }
            Bls12381G1Neg | Bls12381G1Compress | Bls12381G1Uncompress => (0, 1),
            Bls12381G2Add | Bls12381G2ScalarMul | Bls12381G2Equal | Bls12381G2HashToGroup => {
                (0, 2)
            }
            Bls12381G2Neg | Bls12381G2Compress | Bls12381G2Uncompress => (0, 1),
            Bls12381MillerLoop | Bls12381MulMlResult | Bls12381FinalVerify => (0, 2),
        };
        Signature { forces, arity }
    }

    pub fn name(self) -> &'static str {
        use Builtin::*;
        match self {
            AddInteger => "addInteger",
            SubtractInteger => "subtractInteger",
            MultiplyInteger => "multiplyInteger",
            DivideInteger => "divideInteger",
            QuotientInteger => "quotientInteger",
            RemainderInteger => "remainderInteger",
            ModInteger => "modInteger",
            EqualsInteger => "equalsInteger",
            LessThanInteger => "lessThanInteger",
            LessThanEqualsInteger => "lessThanEqualsInteger",
            AppendByteString => "appendByteString",
            ConsByteString => "consByteString",
            SliceByteString => "sliceByteString",
            LengthOfByteString => "lengthOfByteString",
            IndexByteString => "indexByteString",
            EqualsByteString => "equalsByteString",
            LessThanByteString => "lessThanByteString",
            LessThanEqualsByteString => "lessThanEqualsByteString",
            AppendString => "appendString",
            EqualsString => "equalsString",
            EncodeUtf8 => "encodeUtf8",
            DecodeUtf8 => "decodeUtf8",
            Sha2_256 => "sha2_256",
            Sha3_256 => "sha3_256",
            Blake2b_224 => "blake2b_224",
            Blake2b_256 => "blake2b_256",
            IfThenElse => "ifThenElse",
            ChooseUnit => "chooseUnit",
            Trace => "trace",
            FstPair => "fstPair",
            SndPair => "sndPair",
            ChooseList => "chooseList",
            MkCons => "mkCons",
            HeadList => "headList",
            TailList => "tailList",
            NullList => "nullList",
            MkNilData => "mkNilData",
            MkNilPairData => "mkNilPairData",
            ChooseData => "chooseData",
            ConstrData => "constrData",
            MapData => "mapData",
            ListData => "listData",
            IData => "iData",
            BData => "bData",
            UnConstrData => "unConstrData",
            UnMapData => "unMapData",
            UnListData => "unListData",
            UnIData => "unIData",
            UnBData => "unBData",
            EqualsData => "equalsData",
            SerialiseData => "serialiseData",
            Bls12381G1Add => "bls12_381_G1_add",
            Bls12381G1Neg => "bls12_381_G1_neg",
            Bls12381G1ScalarMul => "bls12_381_G1_scalarMul",
            Bls12381G1Equal => "bls12_381_G1_equal",
            Bls12381G1Compress => "bls12_381_G1_compress",
            Bls12381G1Uncompress => "bls12_381_G1_uncompress",
            Bls12381G1HashToGroup => "bls12_381_G1_hashToGroup",
            Bls12381G2Add => "bls12_381_G2_add",
            Bls12381G2Neg => "bls12_381_G2_neg",
            Bls12381G2ScalarMul => "bls12_381_G2_scalarMul",
            Bls12381G2Equal => "bls12_381_G2_equal",
            Bls12381G2Compress => "bls12_381_G2_compress",
            Bls12381G2Uncompress => "bls12_381_G2_uncompress",
            Bls12381G2HashToGroup => "bls12_381_G2_hashToGroup",
            Bls12381MillerLoop => "bls12_381_millerLoop",
            Bls12381MulMlResult => "bls12_381_mulMlResult",
            Bls12381FinalVerify => "bls12_381_finalVerify",
        }
    }
}

impl std::fmt::Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_builtin_has_a_name_and_signature() {
        for b in Builtin::iter() {
            assert!(!b.name().is_empty());
            let sig = b.signature();
            assert!(sig.arity >= 1);
        }
    }
}
