//! Currency amounts in native token precision
//!
//! Amounts are held in the currency's smallest unit (wei for 18-decimal
//! tokens) as an exact [`Fraction`]. Decimals are applied only when
//! formatting, so an amount read from chain and written back into a swap
//! call round-trips unchanged.
//!
//! ```rust
//! use swapkit_types::{Address, ChainId, CurrencyAmount, Rounding, Token};
//!
//! let usdc = Token::new(ChainId::MAINNET, Address::new([1u8; 20]), 6);
//! let amount = CurrencyAmount::from_raw_amount(usdc, 1_500_000u64).unwrap();
//! assert_eq!(amount.to_exact(), "1.5");
//! assert_eq!(amount.to_fixed(2, Rounding::RoundDown).unwrap(), "1.50");
//! ```

use crate::common::errors::MathError;
use crate::common::fraction::{pow10, Fraction, Rounding};
use crate::common::math::validate_uint256;
use crate::currency::{BaseCurrency, Currency, Token};
use num_bigint::BigInt;
use std::fmt;

/// Exact amount of a currency, in its smallest unit
#[derive(Clone)]
pub struct CurrencyAmount<C: BaseCurrency = Currency> {
    currency: C,
    fraction: Fraction,
}

/// Amount of an ERC-20 token, as held in pair reserves
pub type TokenAmount = CurrencyAmount<Token>;

impl<C: BaseCurrency> CurrencyAmount<C> {
    /// Integer amount in the currency's smallest unit
    ///
    /// Fails if the amount is negative or exceeds `uint256`.
    pub fn from_raw_amount(currency: C, raw: impl Into<BigInt>) -> Result<Self, MathError> {
        let raw = raw.into();
        validate_uint256(&raw)?;
        Ok(Self {
            currency,
            fraction: Fraction::from_integer(raw),
        })
    }

    /// Fractional amount of smallest units, e.g. the result of a price quote
    pub fn from_fractional_amount(
        currency: C,
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Result<Self, MathError> {
        let fraction = Fraction::new(numerator, denominator)?;
        validate_uint256(&fraction.quotient())?;
        Ok(Self { currency, fraction })
    }

    fn with_fraction(&self, fraction: Fraction) -> Result<Self, MathError> {
        validate_uint256(&fraction.quotient())?;
        if fraction.is_negative() {
            return Err(MathError::NegativeAmount {
                value: fraction.to_string(),
            });
        }
        Ok(Self {
            currency: self.currency.clone(),
            fraction,
        })
    }

    pub fn currency(&self) -> &C {
        &self.currency
    }

    /// Exact amount in smallest units
    pub fn as_fraction(&self) -> &Fraction {
        &self.fraction
    }

    /// Whole smallest units, truncated
    pub fn quotient(&self) -> BigInt {
        self.fraction.quotient()
    }

    pub fn is_zero(&self) -> bool {
        self.fraction.is_zero()
    }

    /// `10^decimals`
    pub fn decimal_scale(&self) -> BigInt {
        pow10(u32::from(self.currency.decimals()))
    }

    fn check_currency(&self, other: &Self) -> Result<(), MathError> {
        if self.currency.equals(&other.currency) {
            Ok(())
        } else {
            Err(MathError::CurrencyMismatch)
        }
    }

    pub fn add(&self, other: &Self) -> Result<Self, MathError> {
        self.check_currency(other)?;
        self.with_fraction(self.fraction.add(&other.fraction))
    }

    pub fn subtract(&self, other: &Self) -> Result<Self, MathError> {
        self.check_currency(other)?;
        self.with_fraction(self.fraction.subtract(&other.fraction))
    }

    pub fn multiply(&self, factor: &Fraction) -> Result<Self, MathError> {
        self.with_fraction(self.fraction.multiply(factor))
    }

    pub fn divide(&self, divisor: &Fraction) -> Result<Self, MathError> {
        self.with_fraction(self.fraction.divide(divisor)?)
    }

    /// Compare by value; currencies must match
    pub fn less_than(&self, other: &Self) -> Result<bool, MathError> {
        self.check_currency(other)?;
        Ok(self.fraction < other.fraction)
    }

    pub fn greater_than(&self, other: &Self) -> Result<bool, MathError> {
        self.check_currency(other)?;
        Ok(self.fraction > other.fraction)
    }

    /// Human-readable amount (decimals applied) as a fraction
    pub fn to_decimal_fraction(&self) -> Fraction {
        Fraction::from_positive_denominator(
            self.fraction.numerator().clone(),
            self.fraction.denominator() * self.decimal_scale(),
        )
    }

    /// Human-readable amount to `significant_digits` digits
    pub fn to_significant(
        &self,
        significant_digits: u32,
        rounding: Rounding,
    ) -> Result<String, MathError> {
        self.to_decimal_fraction()
            .to_significant(significant_digits, rounding)
    }

    /// Human-readable amount with `decimal_places` decimals, which may not
    /// exceed the currency's decimals
    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> Result<String, MathError> {
        let decimals = self.currency.decimals();
        if decimal_places > u32::from(decimals) {
            return Err(MathError::TooManyDecimals {
                requested: decimal_places,
                decimals,
            });
        }
        Ok(self.to_decimal_fraction().to_fixed(decimal_places, rounding))
    }

    /// Full-precision human-readable amount without trailing zeros
    pub fn to_exact(&self) -> String {
        let whole_units = Fraction::from_positive_denominator(self.quotient(), self.decimal_scale());
        let fixed = whole_units.to_fixed(u32::from(self.currency.decimals()), Rounding::RoundDown);
        if fixed.contains('.') {
            fixed.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            fixed
        }
    }

    /// The same amount of the wrapped token
    pub fn wrapped(&self) -> TokenAmount {
        CurrencyAmount {
            currency: self.currency.wrapped().clone(),
            fraction: self.fraction.clone(),
        }
    }

    /// Re-tag the amount with the [`Currency`] sum type
    pub fn into_currency(self) -> CurrencyAmount<Currency> {
        CurrencyAmount {
            currency: self.currency.to_currency(),
            fraction: self.fraction,
        }
    }

    /// Re-tag a token-denominated amount with a different currency of the
    /// same value, e.g. ETH for WETH
    pub fn with_currency<D: BaseCurrency>(&self, currency: D) -> CurrencyAmount<D> {
        CurrencyAmount {
            currency,
            fraction: self.fraction.clone(),
        }
    }
}

impl<C: BaseCurrency> PartialEq for CurrencyAmount<C> {
    fn eq(&self, other: &Self) -> bool {
        self.currency.equals(&other.currency) && self.fraction == other.fraction
    }
}

impl<C: BaseCurrency> fmt::Debug for CurrencyAmount<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurrencyAmount")
            .field("currency", &self.currency)
            .field("raw", &self.fraction)
            .finish()
    }
}

impl<C: BaseCurrency> fmt::Display for CurrencyAmount<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.currency.symbol().unwrap_or("");
        write!(f, "{} {}", self.to_exact(), symbol)
    }
}
