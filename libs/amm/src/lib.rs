//! # Swapkit AMM Library - Constant-Product Quoting Engine
//!
//! ## Purpose
//!
//! Exact swap math and best-execution search over Uniswap-V2 style pairs.
//! Given a snapshot of pair reserves, computes swap amounts, multi-hop
//! routes, execution price, price impact and slippage-adjusted bounds with
//! the same integer truncation as the pair contract.
//!
//! ## Integration Points
//!
//! - **Input Sources**: reserve snapshots and token metadata supplied by the
//!   caller; nothing here performs I/O or caches reserves between calls
//! - **Output Destinations**: [`Trade`] values for display, and
//!   [`SwapParameters`] for building Router02 transactions
//! - **Configuration**: [`PairParams`] and [`BestTradeOptions`] convert from
//!   `swapkit_config` settings
//!
//! ## Architecture Role
//!
//! ```text
//! reserves + tokens ──► Pair ──► Route ──► Trade ──► amounts, prices, call args
//!                        │                   ▲
//!                        └── best-trade DFS ─┘
//! ```
//!
//! Every value is an immutable snapshot. A swap returns a new [`Pair`]
//! rather than mutating the old one, so pairs, routes and trades can be
//! shared across threads freely.
//!
//! ## Example
//!
//! ```rust
//! use swapkit_amm::{Pair, PairParams, Route, Trade};
//! use swapkit_types::{Address, ChainId, Currency, CurrencyAmount, Token, TokenAmount};
//!
//! let a = Token::new(ChainId::MAINNET, Address::new([1; 20]), 18);
//! let b = Token::new(ChainId::MAINNET, Address::new([2; 20]), 18);
//! let pair = Pair::new(
//!     TokenAmount::from_raw_amount(a.clone(), 1000u64)?,
//!     TokenAmount::from_raw_amount(b.clone(), 1000u64)?,
//!     PairParams::default(),
//! )?;
//!
//! let route = Route::new(vec![pair], a.clone().into(), b.into())?;
//! let amount_in = CurrencyAmount::from_raw_amount(Currency::from(a), 10u64)?;
//! let trade = Trade::exact_in(route, &amount_in)?;
//! assert_eq!(trade.output_amount().quotient().to_string(), "9");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod best_trade;
pub mod error;
pub mod pair;
pub mod route;
pub mod router;
pub mod severity;
pub mod trade;
pub mod v2_math;

pub use best_trade::{
    input_output_comparator, is_trade_better, sorted_insert, trade_comparator, BestTradeOptions,
};
pub use error::{AmmError, RouteError};
pub use pair::{compute_pair_address, Pair, PairParams};
pub use route::Route;
pub use router::{CallArg, Deadline, Router, SwapParameters, TradeOptions};
pub use severity::warning_severity;
pub use trade::{Trade, TradeType};
pub use v2_math::V2Math;
