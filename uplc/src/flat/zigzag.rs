//! Ported from `pallas_codec::flat::zigzag`, generalized from its
//! `isize`/`BigInt` pair to work over our arbitrary-precision [`BigInt`]
//! exclusively (every UPLC integer constant is arbitrary precision,
//! spec §3.1).

use num_bigint::{BigInt, BigUint, ToBigInt};

pub trait ZigZag {
    type Zag;
    fn zigzag(self) -> Self::Zag;
}

impl ZigZag for BigInt {
    type Zag = BigUint;

    fn zigzag(self) -> Self::Zag {
        if self >= 0.into() {
            self << 1
        } else {
            let double: BigInt = self << 1;
            -double - <u8 as Into<BigInt>>::into(1)
        }
        .to_biguint()
        .expect("a zigzagged value is never negative")
    }
}

impl ZigZag for BigUint {
    type Zag = BigInt;

    fn zigzag(self) -> Self::Zag {
        let i = self.to_bigint().expect("BigUint -> BigInt always succeeds");
        (i.clone() >> 1) ^ -(i & <u8 as Into<BigInt>>::into(1))
    }
}
