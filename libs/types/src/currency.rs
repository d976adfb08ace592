//! Currency identities: ERC-20 tokens and the chain's native asset
//!
//! A [`Token`] is identified by `(chain_id, address)`; decimals, symbol and
//! name are metadata and do not take part in equality. The native asset
//! (ETH on mainnet) is a separate variant that carries the [`Token`] it
//! wraps to, so routing code can always fall back to the wrapped form
//! without a global lookup table.
//!
//! ## Canonical Ordering
//!
//! [`Token::sorts_before`] orders tokens by address bytes, which is exactly
//! the factory's `token0 < token1` rule. Pair addresses are derived from this
//! order, so it must never be changed.

use crate::common::errors::TokenError;
use crate::common::identifiers::{Address, ChainId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Shared read access to the fields every currency carries
pub trait BaseCurrency: Clone + fmt::Debug {
    fn chain_id(&self) -> ChainId;

    fn decimals(&self) -> u8;

    fn symbol(&self) -> Option<&str>;

    fn name(&self) -> Option<&str>;

    /// The ERC-20 form used inside pairs
    fn wrapped(&self) -> &Token;

    /// Lift into the [`Currency`] sum type
    fn to_currency(&self) -> Currency;

    /// Same currency: same variant, chain and (for tokens) address
    fn equals(&self, other: &impl BaseCurrency) -> bool {
        self.to_currency() == other.to_currency()
    }
}

/// ERC-20 token on a specific chain
#[derive(Clone)]
pub struct Token {
    chain_id: ChainId,
    address: Address,
    decimals: u8,
    symbol: Option<String>,
    name: Option<String>,
}

impl Token {
    pub fn new(chain_id: ChainId, address: Address, decimals: u8) -> Self {
        Self {
            chain_id,
            address,
            decimals,
            symbol: None,
            name: None,
        }
    }

    /// Parse the address string and build the token
    pub fn from_str_address(
        chain_id: ChainId,
        address: &str,
        decimals: u8,
    ) -> Result<Self, TokenError> {
        Ok(Self::new(chain_id, Address::parse(address)?, decimals))
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Same chain and same address
    pub fn equals(&self, other: &Token) -> bool {
        self.chain_id == other.chain_id && self.address == other.address
    }

    /// Whether `self` is `token0` of a pair with `other`
    ///
    /// Fails on tokens from different chains and on identical addresses.
    pub fn sorts_before(&self, other: &Token) -> Result<bool, TokenError> {
        if self.chain_id != other.chain_id {
            return Err(TokenError::ChainMismatch {
                left: self.chain_id,
                right: other.chain_id,
            });
        }
        if self.address == other.address {
            return Err(TokenError::IdenticalToken {
                address: self.address,
            });
        }
        Ok(self.address < other.address)
    }

    /// Return the two tokens as `(token0, token1)`
    pub fn sort_pair<'a>(
        a: &'a Token,
        b: &'a Token,
    ) -> Result<(&'a Token, &'a Token), TokenError> {
        if a.sorts_before(b)? {
            Ok((a, b))
        } else {
            Ok((b, a))
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
        self.address.hash(state);
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("chain_id", &self.chain_id.0)
            .field("address", &self.address.to_checksum())
            .field("symbol", &self.symbol)
            .finish()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => f.write_str(symbol),
            None => write!(f, "{}", self.address),
        }
    }
}

impl BaseCurrency for Token {
    fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    fn decimals(&self) -> u8 {
        self.decimals
    }

    fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn wrapped(&self) -> &Token {
        self
    }

    fn to_currency(&self) -> Currency {
        Currency::Token(self.clone())
    }
}

/// The chain's base asset, which must be wrapped before entering a pair
#[derive(Debug, Clone)]
pub struct NativeCurrency {
    decimals: u8,
    symbol: String,
    name: String,
    wrapped: Token,
}

impl NativeCurrency {
    pub fn new(
        decimals: u8,
        symbol: impl Into<String>,
        name: impl Into<String>,
        wrapped: Token,
    ) -> Self {
        Self {
            decimals,
            symbol: symbol.into(),
            name: name.into(),
            wrapped,
        }
    }

    /// Ether, wrapping to the given WETH token
    pub fn ether(weth: Token) -> Self {
        Self::new(18, "ETH", "Ether", weth)
    }
}

impl PartialEq for NativeCurrency {
    fn eq(&self, other: &Self) -> bool {
        self.wrapped.chain_id == other.wrapped.chain_id
    }
}

impl Eq for NativeCurrency {}

impl BaseCurrency for NativeCurrency {
    fn chain_id(&self) -> ChainId {
        self.wrapped.chain_id
    }

    fn decimals(&self) -> u8 {
        self.decimals
    }

    fn symbol(&self) -> Option<&str> {
        Some(&self.symbol)
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn wrapped(&self) -> &Token {
        &self.wrapped
    }

    fn to_currency(&self) -> Currency {
        Currency::Native(self.clone())
    }
}

/// Either the native asset or an ERC-20 token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Currency {
    Native(NativeCurrency),
    Token(Token),
}

impl Currency {
    pub fn is_native(&self) -> bool {
        matches!(self, Currency::Native(_))
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Currency::Token(token) => Some(token),
            Currency::Native(_) => None,
        }
    }
}

impl BaseCurrency for Currency {
    fn chain_id(&self) -> ChainId {
        match self {
            Currency::Native(native) => native.chain_id(),
            Currency::Token(token) => token.chain_id(),
        }
    }

    fn decimals(&self) -> u8 {
        match self {
            Currency::Native(native) => native.decimals(),
            Currency::Token(token) => token.decimals(),
        }
    }

    fn symbol(&self) -> Option<&str> {
        match self {
            Currency::Native(native) => native.symbol(),
            Currency::Token(token) => token.symbol(),
        }
    }

    fn name(&self) -> Option<&str> {
        match self {
            Currency::Native(native) => native.name(),
            Currency::Token(token) => token.name(),
        }
    }

    fn wrapped(&self) -> &Token {
        match self {
            Currency::Native(native) => native.wrapped(),
            Currency::Token(token) => token,
        }
    }

    fn to_currency(&self) -> Currency {
        self.clone()
    }
}

impl From<Token> for Currency {
    fn from(token: Token) -> Self {
        Currency::Token(token)
    }
}

impl From<NativeCurrency> for Currency {
    fn from(native: NativeCurrency) -> Self {
        Currency::Native(native)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Native(native) => f.write_str(&native.symbol),
            Currency::Token(token) => write!(f, "{token}"),
        }
    }
}

/// Map a pair token back to the currency a user sees: the native asset if
/// `token` is its wrapped form, otherwise the token itself
pub fn unwrap_token(token: &Token, native: &NativeCurrency) -> Currency {
    if token.equals(native.wrapped()) {
        Currency::Native(native.clone())
    } else {
        Currency::Token(token.clone())
    }
}
