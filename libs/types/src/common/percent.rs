//! Percentages as exact fractions
//!
//! A `Percent` stores the raw ratio (`0.015` for 1.5%) and only multiplies
//! by 100 when formatting. Used for slippage tolerance and price impact.

use crate::common::errors::MathError;
use crate::common::fraction::{Fraction, Rounding};
use num_bigint::BigInt;
use std::fmt;

/// Exact percentage value
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percent(Fraction);

impl Percent {
    /// Create from a raw ratio `numerator / denominator`
    pub fn new(
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Result<Self, MathError> {
        Fraction::new(numerator, denominator).map(Self)
    }

    /// Create from basis points, e.g. `50` for 0.5%
    pub fn from_bips(bips: u32) -> Self {
        Self(Fraction::from_positive_denominator(bips, 10_000u32))
    }

    pub fn zero() -> Self {
        Self(Fraction::zero())
    }

    /// 100%
    pub fn one_hundred() -> Self {
        Self(Fraction::one())
    }

    pub fn as_fraction(&self) -> &Fraction {
        &self.0
    }

    pub fn into_fraction(self) -> Fraction {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn add(&self, other: &Percent) -> Percent {
        Self(self.0.add(&other.0))
    }

    pub fn subtract(&self, other: &Percent) -> Percent {
        Self(self.0.subtract(&other.0))
    }

    pub fn multiply(&self, other: &Percent) -> Percent {
        Self(self.0.multiply(&other.0))
    }

    pub fn divide(&self, other: &Percent) -> Result<Percent, MathError> {
        self.0.divide(&other.0).map(Self)
    }

    pub fn less_than(&self, other: &Percent) -> bool {
        self.0 < other.0
    }

    pub fn greater_than(&self, other: &Percent) -> bool {
        self.0 > other.0
    }

    fn scaled(&self) -> Fraction {
        self.0.multiply(&Fraction::from_integer(100u32))
    }

    /// Percentage figure (ratio × 100) to `significant_digits` digits
    pub fn to_significant(
        &self,
        significant_digits: u32,
        rounding: Rounding,
    ) -> Result<String, MathError> {
        self.scaled().to_significant(significant_digits, rounding)
    }

    /// Percentage figure (ratio × 100) with `decimal_places` decimals
    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> String {
        self.scaled().to_fixed(decimal_places, rounding)
    }
}

impl From<Fraction> for Percent {
    fn from(value: Fraction) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Percent({}/{})", self.0.numerator(), self.0.denominator())
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.to_fixed(2, Rounding::RoundHalfUp))
    }
}
