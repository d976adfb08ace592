//! Exact rational arithmetic for on-chain amount calculations
//!
//! `Fraction` holds an arbitrary-precision numerator/denominator pair. All
//! arithmetic is closed over fractions and never loses precision; comparison
//! is by cross-multiplication. Decimal strings are produced only at the
//! display boundary, with an explicit rounding mode applied to the last
//! retained digit.
//!
//! ## Design Principles
//!
//! - **No Floating Point**: every value is a `BigInt` ratio, formatting included
//! - **Sign-Normalised**: the denominator is strictly positive after construction
//! - **Not Reduced**: fractions are not kept in lowest terms; equality is by value

use crate::common::errors::MathError;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Rounding mode applied to the last retained digit when formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Truncate toward zero
    RoundDown,
    /// Round half away from zero
    #[default]
    RoundHalfUp,
    /// Round away from zero
    RoundUp,
}

impl Rounding {
    /// Round the non-negative quotient `q` of a division that left remainder
    /// `r` over divisor `d`
    fn apply(self, q: BigInt, r: &BigInt, d: &BigInt) -> BigInt {
        let bump = match self {
            Rounding::RoundDown => false,
            Rounding::RoundUp => !r.is_zero(),
            Rounding::RoundHalfUp => (r * 2u32) >= *d,
        };
        if bump {
            q + 1u32
        } else {
            q
        }
    }
}

/// `10^exp` as a `BigInt`
pub(crate) fn pow10(exp: u32) -> BigInt {
    num_traits::pow(BigInt::from(10u32), exp as usize)
}

/// Exact ratio of two arbitrary-precision integers
#[derive(Clone)]
pub struct Fraction {
    numerator: BigInt,
    denominator: BigInt,
}

impl Fraction {
    /// Create a fraction, moving any sign onto the numerator
    pub fn new(
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Result<Self, MathError> {
        let numerator = numerator.into();
        let denominator = denominator.into();
        if denominator.is_zero() {
            return Err(MathError::ZeroDenominator);
        }
        Ok(Self::normalised(numerator, denominator))
    }

    /// Whole-number fraction `n / 1`
    pub fn from_integer(numerator: impl Into<BigInt>) -> Self {
        Self {
            numerator: numerator.into(),
            denominator: BigInt::one(),
        }
    }

    /// Build from a denominator the caller guarantees is positive
    pub(crate) fn from_positive_denominator(
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Self {
        Self {
            numerator: numerator.into(),
            denominator: denominator.into(),
        }
    }

    pub fn zero() -> Self {
        Self::from_integer(0u32)
    }

    pub fn one() -> Self {
        Self::from_integer(1u32)
    }

    // denominator is known to be non-zero
    fn normalised(numerator: BigInt, denominator: BigInt) -> Self {
        if denominator.is_negative() {
            Self {
                numerator: -numerator,
                denominator: -denominator,
            }
        } else {
            Self {
                numerator,
                denominator,
            }
        }
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    /// Integer part, truncated toward zero
    pub fn quotient(&self) -> BigInt {
        &self.numerator / &self.denominator
    }

    /// Fractional part remaining after [`Fraction::quotient`]
    pub fn remainder(&self) -> Fraction {
        Self {
            numerator: &self.numerator % &self.denominator,
            denominator: self.denominator.clone(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    /// Swap numerator and denominator
    pub fn invert(&self) -> Result<Fraction, MathError> {
        Self::new(self.denominator.clone(), self.numerator.clone())
    }

    pub fn add(&self, other: &Fraction) -> Fraction {
        if self.denominator == other.denominator {
            return Self {
                numerator: &self.numerator + &other.numerator,
                denominator: self.denominator.clone(),
            };
        }
        Self {
            numerator: &self.numerator * &other.denominator + &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    pub fn subtract(&self, other: &Fraction) -> Fraction {
        if self.denominator == other.denominator {
            return Self {
                numerator: &self.numerator - &other.numerator,
                denominator: self.denominator.clone(),
            };
        }
        Self {
            numerator: &self.numerator * &other.denominator - &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    pub fn multiply(&self, other: &Fraction) -> Fraction {
        Self {
            numerator: &self.numerator * &other.numerator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    pub fn divide(&self, other: &Fraction) -> Result<Fraction, MathError> {
        Self::new(
            &self.numerator * &other.denominator,
            &self.denominator * &other.numerator,
        )
    }

    pub fn less_than(&self, other: &Fraction) -> bool {
        self < other
    }

    pub fn equal_to(&self, other: &Fraction) -> bool {
        self == other
    }

    pub fn greater_than(&self, other: &Fraction) -> bool {
        self > other
    }

    /// Format with `significant_digits` significant digits, trailing zeros
    /// after the decimal point trimmed
    ///
    /// # Examples
    /// ```
    /// use swapkit_types::{Fraction, Rounding};
    ///
    /// let third = Fraction::new(1, 3).unwrap();
    /// assert_eq!(third.to_significant(4, Rounding::RoundHalfUp).unwrap(), "0.3333");
    ///
    /// let big = Fraction::from_integer(123_456);
    /// assert_eq!(big.to_significant(3, Rounding::RoundDown).unwrap(), "123000");
    /// ```
    pub fn to_significant(
        &self,
        significant_digits: u32,
        rounding: Rounding,
    ) -> Result<String, MathError> {
        if significant_digits == 0 {
            return Err(MathError::InvalidDigits {
                digits: significant_digits,
            });
        }
        if self.numerator.is_zero() {
            return Ok("0".to_string());
        }

        let num = self.numerator.abs();
        let den = &self.denominator;

        // decimal exponent of the leading digit: 10^e <= num/den < 10^(e+1)
        let mut exponent = num.to_string().len() as i64 - den.to_string().len() as i64;
        loop {
            if !at_least_pow10(&num, den, exponent) {
                exponent -= 1;
            } else if at_least_pow10(&num, den, exponent + 1) {
                exponent += 1;
            } else {
                break;
            }
        }

        // scale so the integer part holds exactly `significant_digits` digits
        let mut shift = significant_digits as i64 - 1 - exponent;
        let (scaled_num, scaled_den) = scale(&num, den, shift);
        let (q, r) = scaled_num.div_rem(&scaled_den);
        let mut digits = rounding.apply(q, &r, &scaled_den);

        // rounding carried into a new leading digit, e.g. 9.99 -> 10.0
        if digits == pow10(significant_digits) {
            digits /= 10u32;
            shift -= 1;
        }

        let mut rendered = place_decimal_point(&digits.to_string(), shift);
        if rendered.contains('.') {
            let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
            rendered = trimmed.to_string();
        }

        if self.numerator.is_negative() {
            rendered.insert(0, '-');
        }
        Ok(rendered)
    }

    /// Format with exactly `decimal_places` digits after the decimal point
    ///
    /// # Examples
    /// ```
    /// use swapkit_types::{Fraction, Rounding};
    ///
    /// let x = Fraction::new(2, 3).unwrap();
    /// assert_eq!(x.to_fixed(2, Rounding::RoundHalfUp), "0.67");
    /// assert_eq!(x.to_fixed(2, Rounding::RoundDown), "0.66");
    /// ```
    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> String {
        let num = self.numerator.abs() * pow10(decimal_places);
        let (q, r) = num.div_rem(&self.denominator);
        let digits = rounding.apply(q, &r, &self.denominator);
        let is_zero = digits.is_zero();

        let mut rendered = place_decimal_point(&digits.to_string(), decimal_places as i64);
        if self.numerator.is_negative() && !is_zero {
            rendered.insert(0, '-');
        }
        rendered
    }
}

/// `num / den >= 10^exp` for non-negative `num` and positive `den`
fn at_least_pow10(num: &BigInt, den: &BigInt, exp: i64) -> bool {
    if exp >= 0 {
        *num >= den * pow10(exp as u32)
    } else {
        num * pow10(exp.unsigned_abs() as u32) >= *den
    }
}

/// Multiply `num / den` by `10^shift`
fn scale(num: &BigInt, den: &BigInt, shift: i64) -> (BigInt, BigInt) {
    if shift >= 0 {
        (num * pow10(shift as u32), den.clone())
    } else {
        (num.clone(), den * pow10(shift.unsigned_abs() as u32))
    }
}

/// Render `digits * 10^-shift` as a plain decimal string
fn place_decimal_point(digits: &str, shift: i64) -> String {
    if shift <= 0 {
        let zeros = "0".repeat(shift.unsigned_abs() as usize);
        return format!("{digits}{zeros}");
    }

    let shift = shift as usize;
    if digits.len() <= shift {
        let zeros = "0".repeat(shift - digits.len());
        format!("0.{zeros}{digits}")
    } else {
        let (int_part, frac_part) = digits.split_at(digits.len() - shift);
        format!("{int_part}.{frac_part}")
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        &self.numerator * &other.denominator == &other.numerator * &self.denominator
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    // denominators are positive, so cross-multiplication preserves order
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl fmt::Debug for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fraction({}/{})", self.numerator, self.denominator)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl From<BigInt> for Fraction {
    fn from(value: BigInt) -> Self {
        Self::from_integer(value)
    }
}

impl From<u64> for Fraction {
    fn from(value: u64) -> Self {
        Self::from_integer(value)
    }
}

impl Add for &Fraction {
    type Output = Fraction;

    fn add(self, rhs: Self) -> Fraction {
        Fraction::add(self, rhs)
    }
}

impl Sub for &Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Self) -> Fraction {
        Fraction::subtract(self, rhs)
    }
}

impl Mul for &Fraction {
    type Output = Fraction;

    fn mul(self, rhs: Self) -> Fraction {
        Fraction::multiply(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    #[test]
    fn test_zero_denominator_rejected() {
        assert_eq!(Fraction::new(1, 0).unwrap_err(), MathError::ZeroDenominator);
        assert_eq!(Fraction::zero().invert().unwrap_err(), MathError::ZeroDenominator);
    }

    #[test]
    fn test_sign_moves_to_numerator() {
        let f = frac(3, -4);
        assert_eq!(f.numerator(), &BigInt::from(-3));
        assert_eq!(f.denominator(), &BigInt::from(4));
        assert!(f.is_negative());
    }

    #[test]
    fn test_quotient_truncates() {
        assert_eq!(frac(8, 3).quotient(), BigInt::from(2));
        assert_eq!(frac(12, 4).quotient(), BigInt::from(3));
        assert_eq!(frac(16, 5).quotient(), BigInt::from(3));
        assert_eq!(frac(-8, 3).quotient(), BigInt::from(-2));
    }

    #[test]
    fn test_remainder() {
        assert_eq!(frac(8, 3).remainder(), frac(2, 3));
        assert_eq!(frac(12, 4).remainder(), frac(0, 4));
        assert_eq!(frac(16, 5).remainder(), frac(1, 5));
    }

    #[test]
    fn test_invert() {
        assert_eq!(frac(5, 10).invert().unwrap(), frac(10, 5));
        let inv = frac(-2, 7).invert().unwrap();
        assert_eq!(inv.numerator(), &BigInt::from(-7));
        assert_eq!(inv.denominator(), &BigInt::from(2));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(frac(1, 10).add(&frac(4, 12)), frac(52, 120));
        assert_eq!(frac(1, 5).add(&frac(2, 5)), frac(3, 5));
        assert_eq!(frac(1, 10).subtract(&frac(4, 12)), frac(-28, 120));
        assert_eq!(frac(3, 5).subtract(&frac(2, 5)), frac(1, 5));
        assert_eq!(frac(1, 10).multiply(&frac(4, 12)), frac(4, 120));
        assert_eq!(frac(1, 10).divide(&frac(4, 12)).unwrap(), frac(12, 40));
        assert_eq!(&frac(1, 2) + &frac(1, 3), frac(5, 6));
        assert_eq!(&frac(1, 2) - &frac(1, 3), frac(1, 6));
        assert_eq!(&frac(1, 2) * &frac(1, 3), frac(1, 6));
    }

    #[test]
    fn test_comparisons_are_by_value() {
        assert!(frac(1, 10).less_than(&frac(4, 12)));
        assert!(!frac(1, 3).less_than(&frac(4, 12)));
        assert!(frac(1, 3).equal_to(&frac(4, 12)));
        assert!(frac(5, 12).greater_than(&frac(4, 12)));
        assert!(frac(-1, 2) < frac(1, 3));
        assert!(frac(1, -2) < frac(-1, 3));
    }

    #[test]
    fn test_to_significant_rounding_modes() {
        let x = frac(126, 100);
        assert_eq!(x.to_significant(2, Rounding::RoundDown).unwrap(), "1.2");
        assert_eq!(x.to_significant(2, Rounding::RoundHalfUp).unwrap(), "1.3");
        assert_eq!(x.to_significant(2, Rounding::RoundUp).unwrap(), "1.3");

        let y = frac(121, 100);
        assert_eq!(y.to_significant(2, Rounding::RoundDown).unwrap(), "1.2");
        assert_eq!(y.to_significant(2, Rounding::RoundHalfUp).unwrap(), "1.2");
        assert_eq!(y.to_significant(2, Rounding::RoundUp).unwrap(), "1.3");

        let half = frac(125, 100);
        assert_eq!(half.to_significant(2, Rounding::RoundHalfUp).unwrap(), "1.3");
    }

    #[test]
    fn test_to_significant_trims_trailing_zeros() {
        assert_eq!(frac(1, 1).to_significant(5, Rounding::RoundHalfUp).unwrap(), "1");
        assert_eq!(frac(3, 2).to_significant(6, Rounding::RoundHalfUp).unwrap(), "1.5");
        assert_eq!(frac(1000, 1).to_significant(2, Rounding::RoundHalfUp).unwrap(), "1000");
    }

    #[test]
    fn test_to_significant_carry_adds_digit() {
        let x = frac(9999, 1000);
        assert_eq!(x.to_significant(2, Rounding::RoundHalfUp).unwrap(), "10");
        assert_eq!(x.to_significant(2, Rounding::RoundDown).unwrap(), "9.9");
        let y = frac(99_951, 1);
        assert_eq!(y.to_significant(3, Rounding::RoundUp).unwrap(), "100000");
    }

    #[test]
    fn test_to_significant_small_and_negative() {
        let x = frac(1, 54321);
        assert_eq!(x.to_significant(5, Rounding::RoundHalfUp).unwrap(), "0.000018409");
        let neg = frac(-3, 2);
        assert_eq!(neg.to_significant(3, Rounding::RoundHalfUp).unwrap(), "-1.5");
        assert_eq!(neg.to_significant(1, Rounding::RoundDown).unwrap(), "-1");
        assert_eq!(neg.to_significant(1, Rounding::RoundUp).unwrap(), "-2");
    }

    #[test]
    fn test_to_significant_huge_values_exact() {
        let big = Fraction::new(
            "123456789012345678901234567890".parse::<BigInt>().unwrap(),
            BigInt::from(1u32),
        )
        .unwrap();
        assert_eq!(
            big.to_significant(30, Rounding::RoundDown).unwrap(),
            "123456789012345678901234567890"
        );
        assert_eq!(
            big.to_significant(4, Rounding::RoundHalfUp).unwrap(),
            "123500000000000000000000000000"
        );

        let tiny = Fraction::new(BigInt::from(7u32), pow10(40)).unwrap();
        assert_eq!(
            tiny.to_significant(1, Rounding::RoundHalfUp).unwrap(),
            format!("0.{}7", "0".repeat(39))
        );
    }

    #[test]
    fn test_to_significant_rejects_zero_digits() {
        assert_eq!(
            frac(1, 3).to_significant(0, Rounding::RoundDown).unwrap_err(),
            MathError::InvalidDigits { digits: 0 }
        );
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(frac(1, 3).to_fixed(2, Rounding::RoundHalfUp), "0.33");
        assert_eq!(frac(1, 3).to_fixed(2, Rounding::RoundUp), "0.34");
        assert_eq!(frac(5, 2).to_fixed(0, Rounding::RoundHalfUp), "3");
        assert_eq!(frac(5, 2).to_fixed(0, Rounding::RoundDown), "2");
        assert_eq!(frac(1, 1).to_fixed(3, Rounding::RoundDown), "1.000");
        assert_eq!(frac(-5, 4).to_fixed(1, Rounding::RoundHalfUp), "-1.3");
        assert_eq!(frac(-1, 1000).to_fixed(2, Rounding::RoundDown), "0.00");
        assert_eq!(frac(1234567, 100).to_fixed(2, Rounding::RoundDown), "12345.67");
    }
}
