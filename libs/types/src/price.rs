//! Exchange rates between two currencies
//!
//! A [`Price`] is the raw ratio `quote units / base units` in smallest units.
//! The human-facing figure ([`Price::adjusted`]) rescales by the difference
//! in decimals, so a USDC(6)/DAI(18) price of `10^12` raw reads as `1`.

use crate::amount::CurrencyAmount;
use crate::common::errors::MathError;
use crate::common::fraction::{pow10, Fraction, Rounding};
use crate::currency::{BaseCurrency, Currency};
use num_bigint::BigInt;
use std::fmt;

/// Price of one `B` expressed in `Q`
#[derive(Clone)]
pub struct Price<B: BaseCurrency = Currency, Q: BaseCurrency = Currency> {
    base: B,
    quote: Q,
    fraction: Fraction,
    scalar: Fraction,
}

impl<B: BaseCurrency, Q: BaseCurrency> Price<B, Q> {
    /// `numerator` quote units per `denominator` base units
    pub fn new(
        base: B,
        quote: Q,
        denominator: impl Into<BigInt>,
        numerator: impl Into<BigInt>,
    ) -> Result<Self, MathError> {
        let fraction = Fraction::new(numerator, denominator)?;
        Ok(Self::from_fraction(base, quote, fraction))
    }

    /// Price from a raw ratio already in smallest units
    pub fn from_fraction(base: B, quote: Q, fraction: Fraction) -> Self {
        let scalar = Fraction::from_positive_denominator(
            pow10(u32::from(base.decimals())),
            pow10(u32::from(quote.decimals())),
        );
        Self {
            base,
            quote,
            fraction,
            scalar,
        }
    }

    /// Price implied by trading `base_amount` for `quote_amount`
    pub fn from_amounts(
        base_amount: &CurrencyAmount<B>,
        quote_amount: &CurrencyAmount<Q>,
    ) -> Result<Self, MathError> {
        let fraction = quote_amount.as_fraction().divide(base_amount.as_fraction())?;
        Ok(Self::from_fraction(
            base_amount.currency().clone(),
            quote_amount.currency().clone(),
            fraction,
        ))
    }

    pub fn base_currency(&self) -> &B {
        &self.base
    }

    pub fn quote_currency(&self) -> &Q {
        &self.quote
    }

    /// Ratio in smallest units
    pub fn raw(&self) -> &Fraction {
        &self.fraction
    }

    /// Ratio in whole units, decimals applied
    pub fn adjusted(&self) -> Fraction {
        self.fraction.multiply(&self.scalar)
    }

    /// Same rate seen from the other side
    pub fn invert(&self) -> Result<Price<Q, B>, MathError> {
        Ok(Price::from_fraction(
            self.quote.clone(),
            self.base.clone(),
            self.fraction.invert()?,
        ))
    }

    /// Chain `B -> Q` with `Q -> R` into `B -> R`
    pub fn multiply<R: BaseCurrency>(&self, other: &Price<Q, R>) -> Result<Price<B, R>, MathError> {
        if !self.quote.equals(&other.base) {
            return Err(MathError::CurrencyMismatch);
        }
        Ok(Price::from_fraction(
            self.base.clone(),
            other.quote.clone(),
            self.fraction.multiply(&other.fraction),
        ))
    }

    /// Value `amount` of the base currency in the quote currency
    pub fn quote(&self, amount: &CurrencyAmount<B>) -> Result<CurrencyAmount<Q>, MathError> {
        if !amount.currency().equals(&self.base) {
            return Err(MathError::CurrencyMismatch);
        }
        let result = self.fraction.multiply(amount.as_fraction());
        CurrencyAmount::from_fractional_amount(
            self.quote.clone(),
            result.numerator().clone(),
            result.denominator().clone(),
        )
    }

    pub fn to_significant(
        &self,
        significant_digits: u32,
        rounding: Rounding,
    ) -> Result<String, MathError> {
        self.adjusted().to_significant(significant_digits, rounding)
    }

    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> String {
        self.adjusted().to_fixed(decimal_places, rounding)
    }

    /// Re-tag both sides with the [`Currency`] sum type
    pub fn into_currency(self) -> Price<Currency, Currency> {
        Price {
            base: self.base.to_currency(),
            quote: self.quote.to_currency(),
            fraction: self.fraction,
            scalar: self.scalar,
        }
    }
}

impl<B: BaseCurrency, Q: BaseCurrency> PartialEq for Price<B, Q> {
    fn eq(&self, other: &Self) -> bool {
        self.base.equals(&other.base)
            && self.quote.equals(&other.quote)
            && self.fraction == other.fraction
    }
}

impl<B: BaseCurrency, Q: BaseCurrency> fmt::Debug for Price<B, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Price")
            .field("base", &self.base)
            .field("quote", &self.quote)
            .field("raw", &self.fraction)
            .finish()
    }
}

impl<B: BaseCurrency, Q: BaseCurrency> fmt::Display for Price<B, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .to_significant(6, Rounding::RoundHalfUp)
            .map_err(|_| fmt::Error)?;
        write!(
            f,
            "{} {}/{}",
            rendered,
            self.quote.symbol().unwrap_or("?"),
            self.base.symbol().unwrap_or("?")
        )
    }
}
