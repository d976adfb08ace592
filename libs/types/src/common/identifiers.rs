//! # Chain Identifiers - Addresses, Hashes and Chain IDs
//!
//! Typed byte-array wrappers for the identifiers an EVM constant-product
//! exchange works with. Each wrapper is a zero-cost newtype so a 20-byte
//! address can never be confused with a 32-byte hash.
//!
//! ## Address Form
//!
//! Addresses parse from `0x`-prefixed hex. All-lowercase and all-uppercase
//! input is accepted as-is; mixed-case input must carry a valid EIP-55
//! checksum. Display always renders the checksummed form, and ordering is
//! byte ordering, which equals case-insensitive ordering of the hex text
//! and therefore matches the factory's `token0 < token1` rule.
//!
//! ```rust
//! use swapkit_types::Address;
//!
//! let dai: Address = "0x6b175474e89094c44da98b954eedeac495271d0f".parse().unwrap();
//! assert_eq!(dai.to_checksum(), "0x6B175474E89094C44Da98b954EedeAC495271d0F");
//! ```

use crate::common::errors::TokenError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

/// Generates a typed wrapper around a fixed-size byte array
macro_rules! define_typed_wrapper {
    (
        $(#[$meta:meta])*
        $name:ident, $len:expr
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[repr(transparent)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Byte length of the wrapped value
            pub const LEN: usize = $len;

            /// Create a new typed wrapper
            #[inline(always)]
            pub const fn new(inner: [u8; $len]) -> Self {
                Self(inner)
            }

            /// Extract the inner value by value
            #[inline(always)]
            pub const fn into_inner(self) -> [u8; $len] {
                self.0
            }

            /// Get a reference to the inner bytes
            #[inline(always)]
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            #[inline(always)]
            fn from(inner: [u8; $len]) -> Self {
                Self(inner)
            }
        }

        impl From<$name> for [u8; $len] {
            #[inline(always)]
            fn from(wrapper: $name) -> [u8; $len] {
                wrapper.0
            }
        }

        impl AsRef<[u8]> for $name {
            #[inline(always)]
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

define_typed_wrapper!(
    /// EVM account or contract address (20 bytes)
    Address, 20
);

define_typed_wrapper!(
    /// Generic 32-byte hash, e.g. a keccak256 digest or a pair init-code hash
    Hash32, 32
);

/// keccak256 digest of `data`
pub fn keccak256(data: impl AsRef<[u8]>) -> Hash32 {
    let digest = Keccak256::digest(data.as_ref());
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Hash32(out)
}

fn strip_hex_prefix(input: &str) -> Option<&str> {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
}

impl Address {
    /// The zero address
    pub const ZERO: Self = Self([0u8; 20]);

    /// Parse and validate a `0x`-prefixed hex address
    ///
    /// Mixed-case input is treated as a checksummed address and rejected if
    /// the checksum does not match.
    pub fn parse(input: &str) -> Result<Self, TokenError> {
        let invalid = || TokenError::InvalidAddress {
            input: input.to_string(),
        };

        let body = strip_hex_prefix(input).ok_or_else(invalid)?;
        if body.len() != 40 {
            return Err(invalid());
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(body, &mut bytes).map_err(|_| invalid())?;
        let address = Self(bytes);

        let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper && address.to_checksum()[2..] != *body {
            return Err(invalid());
        }

        Ok(address)
    }

    /// Lowercase hex form with `0x` prefix
    pub fn to_lower_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// EIP-55 mixed-case checksum form
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let byte = hash.0[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl FromStr for Address {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl Hash32 {
    /// Parse a `0x`-prefixed 32-byte hex string
    pub fn parse(input: &str) -> Result<Self, TokenError> {
        let invalid = || TokenError::InvalidHash {
            input: input.to_string(),
        };

        let body = strip_hex_prefix(input).ok_or_else(invalid)?;
        if body.len() != 64 {
            return Err(invalid());
        }

        let mut bytes = [0u8; 32];
        hex::decode_to_slice(body, &mut bytes).map_err(|_| invalid())?;
        Ok(Self(bytes))
    }
}

impl FromStr for Hash32 {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash32({self})")
    }
}

/// EIP-155 chain identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
    pub const MAINNET: Self = Self(1);
    pub const ROPSTEN: Self = Self(3);
    pub const RINKEBY: Self = Self(4);
    pub const GOERLI: Self = Self(5);
    pub const KOVAN: Self = Self(42);

    #[inline(always)]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline(always)]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
