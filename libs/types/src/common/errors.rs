//! Error types for exact arithmetic and token identity validation
//!
//! Provides error handling for fraction construction and formatting,
//! uint256 range checks, and the identity/ordering failures raised when
//! tokens from different chains or duplicate tokens are combined.

use crate::common::identifiers::{Address, ChainId};
use thiserror::Error;

/// Errors that can occur during exact rational arithmetic
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MathError {
    /// Fraction constructed or inverted with a zero denominator
    #[error("Division by zero: fraction denominator must be non-zero")]
    ZeroDenominator,

    /// Significant digits requested must be at least one
    #[error("Invalid significant digits: {digits}")]
    InvalidDigits { digits: u32 },

    /// Requested more decimal places than the currency carries
    #[error("Requested {requested} decimal places but currency has {decimals}")]
    TooManyDecimals { requested: u32, decimals: u8 },

    /// Square root of a negative integer
    #[error("Square root of negative value")]
    NegativeSquareRoot,

    /// Amount exceeds the largest uint256 the chain can represent
    #[error("Amount {value} exceeds uint256 range")]
    AmountOverflow { value: String },

    /// Amount below zero, e.g. subtracting more than is held
    #[error("Amount {value} is negative")]
    NegativeAmount { value: String },

    /// Arithmetic between amounts or prices of different currencies
    #[error("Currency mismatch between operands")]
    CurrencyMismatch,
}

/// Errors that can occur when validating or combining token identities
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Two tokens belong to different chains
    #[error("Chain mismatch: {left} vs {right}")]
    ChainMismatch { left: ChainId, right: ChainId },

    /// Two tokens share the same address where distinct tokens are required
    #[error("Identical token addresses: {address}")]
    IdenticalToken { address: Address },

    /// Address string is not 20 bytes of hex or fails its EIP-55 checksum
    #[error("Invalid address: '{input}'")]
    InvalidAddress { input: String },

    /// Hash string is not 32 bytes of hex
    #[error("Invalid 32-byte hash: '{input}'")]
    InvalidHash { input: String },

    /// No wrapped native token is known for the chain
    #[error("Unknown chain: {chain_id}")]
    UnknownChain { chain_id: ChainId },
}
