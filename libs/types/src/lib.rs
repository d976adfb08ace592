//! # Swapkit Types Library
//!
//! Exact-arithmetic value types for quoting swaps against constant-product
//! pools: rationals, percentages, token identities, amounts and prices.
//!
//! ## Design Philosophy
//!
//! - **No Precision Loss**: every amount is an arbitrary-precision fraction of
//!   the token's smallest unit; floating point never enters a calculation
//! - **Chain-Exact**: integer truncation and `uint256` bounds follow the pool
//!   contract, so quotes match on-chain results to the last wei
//! - **Type Safety**: amounts and prices carry their currencies; mixing them
//!   fails with [`MathError::CurrencyMismatch`] instead of silently adding
//! - **Clear Boundaries**: decimals are applied only when formatting
//!
//! ## Quick Start
//!
//! ### Exact Fractions
//! ```rust
//! use swapkit_types::{Fraction, Rounding};
//!
//! let a = Fraction::new(1, 3).unwrap();
//! let b = Fraction::new(1, 6).unwrap();
//! assert_eq!(a.add(&b), Fraction::new(1, 2).unwrap());
//! assert_eq!(a.to_fixed(3, Rounding::RoundDown), "0.333");
//! ```
//!
//! ### Tokens and Amounts
//! ```rust
//! use swapkit_types::{ChainId, CurrencyAmount, Rounding, Token};
//!
//! let dai = Token::from_str_address(
//!     ChainId::MAINNET,
//!     "0x6B175474E89094C44Da98b954EedeAC495271d0F",
//!     18,
//! )?
//! .with_symbol("DAI");
//!
//! let amount = CurrencyAmount::from_raw_amount(dai, 1_250_000_000_000_000_000u64)?;
//! assert_eq!(amount.to_significant(3, Rounding::RoundHalfUp)?, "1.25");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod amount;
pub mod cache;
pub mod common;
pub mod currency;
pub mod price;

pub use amount::{CurrencyAmount, TokenAmount};
pub use cache::{TokenCache, TokenCacheStats};
pub use common::errors::{MathError, TokenError};
pub use common::fraction::{Fraction, Rounding};
pub use common::identifiers::{keccak256, Address, ChainId, Hash32};
pub use common::math::{max_uint256, sqrt, validate_uint256};
pub use common::percent::Percent;
pub use currency::{unwrap_token, BaseCurrency, Currency, NativeCurrency, Token};
pub use price::Price;
