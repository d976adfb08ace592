//! Error types for pair math, routing and trade construction
//!
//! Liquidity failures ([`AmmError::is_liquidity_error`]) are expected while
//! searching a pool graph and only discard the branch that hit them.
//! Everything else indicates bad input and aborts the operation.

use swapkit_types::{Address, ChainId, MathError, TokenError};
use thiserror::Error;

/// Reasons a list of pairs does not form a valid route
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Route must contain at least one pair")]
    Empty,

    #[error("Route spans chains {expected} and {found}")]
    ChainMismatch { expected: ChainId, found: ChainId },

    #[error("Input token {address} is not in the first pair")]
    InputNotInFirstPair { address: Address },

    #[error("Output token {address} is not in the last pair")]
    OutputNotInLastPair { address: Address },

    /// Pair at `index` does not contain the token the previous hop produced
    #[error("Pair {index} does not connect to {address}")]
    Disconnected { index: usize, address: Address },

    #[error("Path ends at {found} instead of {expected}")]
    PathEndMismatch { expected: Address, found: Address },
}

/// Errors raised by pair math, routes, trades and the best-trade search
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmmError {
    /// A reserve is empty, or the requested output meets or exceeds it
    #[error("Insufficient reserves")]
    InsufficientReserves,

    /// Input is zero or too small to produce any output
    #[error("Insufficient input amount")]
    InsufficientInputAmount,

    /// Requested output is zero
    #[error("Insufficient output amount")]
    InsufficientOutputAmount,

    #[error("Token {address} is not in pair")]
    TokenNotInPair { address: Address },

    /// Slippage tolerance outside `[0%, 100%]`
    #[error("Slippage tolerance must be between 0% and 100%")]
    InvalidSlippage,

    #[error("No route found")]
    NoRouteFound,

    #[error("Invalid route: {0}")]
    InvalidRoute(#[from] RouteError),

    #[error("Invalid search options: {reason}")]
    InvalidSearchOptions { reason: String },

    #[error("Invalid trade options: {reason}")]
    InvalidTradeOptions { reason: String },

    /// First deposit does not exceed the permanently locked minimum
    #[error("Insufficient initial liquidity")]
    InsufficientInitialLiquidity,

    #[error("Liquidity {liquidity} exceeds total supply {total_supply}")]
    LiquidityExceedsSupply {
        liquidity: String,
        total_supply: String,
    },

    #[error("Fee of {fee_bips} bips is not below the fee denominator")]
    InvalidFee { fee_bips: u32 },

    /// Trades with different types or currencies cannot be ranked
    #[error("Trades are not comparable")]
    IncomparableTrades,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Math(#[from] MathError),
}

impl AmmError {
    /// Failures caused by pool depth rather than caller error
    ///
    /// The best-trade search drops a branch on these and keeps exploring.
    pub fn is_liquidity_error(&self) -> bool {
        matches!(
            self,
            AmmError::InsufficientReserves
                | AmmError::InsufficientInputAmount
                | AmmError::InsufficientOutputAmount
        )
    }
}
