//! Integer helpers mirroring the pair contract's on-chain math
//!
//! The contract computes with truncating `uint256` arithmetic; these helpers
//! reproduce that behaviour on unbounded integers.

use crate::common::errors::MathError;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

/// Largest value a `uint256` can hold
pub fn max_uint256() -> BigInt {
    (BigInt::one() << 256u32) - 1u32
}

/// Check that `value` fits in a `uint256`
pub fn validate_uint256(value: &BigInt) -> Result<(), MathError> {
    if value.is_negative() {
        return Err(MathError::NegativeAmount {
            value: value.to_string(),
        });
    }
    if *value > max_uint256() {
        return Err(MathError::AmountOverflow {
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Truncating integer square root (Babylonian method)
///
/// Same iteration as the pair contract's `Math.sqrt`, so first-deposit
/// liquidity matches the chain exactly.
pub fn sqrt(y: &BigInt) -> Result<BigInt, MathError> {
    if y.is_negative() {
        return Err(MathError::NegativeSquareRoot);
    }

    let three = BigInt::from(3u32);
    if *y > three {
        let mut z = y.clone();
        let mut x: BigInt = y / 2u32 + 1u32;
        while x < z {
            z = x.clone();
            x = (y / &x + &x) / 2u32;
        }
        Ok(z)
    } else if !y.is_zero() {
        Ok(BigInt::one())
    } else {
        Ok(BigInt::zero())
    }
}
