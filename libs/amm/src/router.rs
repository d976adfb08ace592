//! Router02 call parameters for a trade
//!
//! Picks the router method for a [`Trade`] and lays out its arguments the
//! way the contract's ABI expects them: `uint256` values as `0x` hex, the
//! path as checksummed addresses. Nothing here encodes calldata or talks to
//! a node.
//!
//! | Trade | Native in | Native out | Tokens only |
//! |-------|-----------|------------|-------------|
//! | exact input | `swapExactETHForTokens` | `swapExactTokensForETH` | `swapExactTokensForTokens` |
//! | exact output | `swapETHForExactTokens` | `swapTokensForExactETH` | `swapTokensForExactTokens` |
//!
//! Exact-input methods have `…SupportingFeeOnTransferTokens` variants for
//! tokens that tax transfers.

use crate::error::AmmError;
use crate::trade::{Trade, TradeType};
use num_bigint::BigInt;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};
use swapkit_config::{chains, ExchangeSettings};
use swapkit_types::{Address, Percent};

/// When the router must reject the swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    /// Seconds from now
    Ttl(u64),
    /// Absolute unix timestamp in seconds
    Timestamp(u64),
}

impl Deadline {
    /// Unix timestamp of the deadline given the current time
    pub fn resolve(self, now: u64) -> Result<u64, AmmError> {
        match self {
            Deadline::Ttl(0) => Err(AmmError::InvalidTradeOptions {
                reason: "ttl must be positive".to_string(),
            }),
            Deadline::Ttl(ttl) => Ok(now.saturating_add(ttl)),
            Deadline::Timestamp(timestamp) => Ok(timestamp),
        }
    }
}

/// Caller choices for turning a trade into a router call
#[derive(Debug, Clone, PartialEq)]
pub struct TradeOptions {
    pub allowed_slippage: Percent,
    pub deadline: Deadline,
    pub recipient: Address,
    /// Use the fee-on-transfer method variants (exact input only)
    pub fee_on_transfer: bool,
}

/// One ABI argument: a scalar or an address array
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CallArg {
    Value(String),
    List(Vec<String>),
}

/// Method, arguments and ether value for a Router02 call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapParameters {
    pub router: Address,
    pub method_name: String,
    pub args: Vec<CallArg>,
    /// Wei to attach, as hex
    pub value: String,
}

/// Builds call parameters for a Router02 deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Router {
    address: Address,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(chains::ROUTER)
    }
}

impl TryFrom<&ExchangeSettings> for Router {
    type Error = AmmError;

    fn try_from(settings: &ExchangeSettings) -> Result<Self, Self::Error> {
        Ok(Self::new(Address::parse(&settings.router_address)?))
    }
}

fn to_hex(value: &BigInt) -> String {
    format!("0x{value:x}")
}

impl Router {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Call parameters for `trade`, resolving a TTL deadline against the
    /// system clock
    pub fn swap_call_parameters(
        &self,
        trade: &Trade,
        options: &TradeOptions,
    ) -> Result<SwapParameters, AmmError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        self.swap_call_parameters_at(trade, options, now)
    }

    /// Call parameters for `trade` with `now` as the current unix time
    pub fn swap_call_parameters_at(
        &self,
        trade: &Trade,
        options: &TradeOptions,
        now: u64,
    ) -> Result<SwapParameters, AmmError> {
        let ether_in = trade.input_amount().currency().is_native();
        let ether_out = trade.output_amount().currency().is_native();
        if ether_in && ether_out {
            return Err(AmmError::InvalidTradeOptions {
                reason: "native currency on both sides".to_string(),
            });
        }
        if options.fee_on_transfer && trade.trade_type() == TradeType::ExactOutput {
            return Err(AmmError::InvalidTradeOptions {
                reason: "fee-on-transfer methods only support exact input".to_string(),
            });
        }

        let deadline = CallArg::Value(format!("0x{:x}", options.deadline.resolve(now)?));
        let amount_in_hex = to_hex(&trade.maximum_amount_in(&options.allowed_slippage)?.quotient());
        let amount_in = CallArg::Value(amount_in_hex.clone());
        let amount_out = CallArg::Value(to_hex(
            &trade.minimum_amount_out(&options.allowed_slippage)?.quotient(),
        ));
        let path = CallArg::List(
            trade
                .route()
                .path()
                .iter()
                .map(|token| token.address().to_checksum())
                .collect(),
        );
        let to = CallArg::Value(options.recipient.to_checksum());
        let zero = "0x0".to_string();

        let suffix = if options.fee_on_transfer {
            "SupportingFeeOnTransferTokens"
        } else {
            ""
        };

        let (method, args, value) = match (trade.trade_type(), ether_in, ether_out) {
            (TradeType::ExactInput, true, _) => (
                format!("swapExactETHForTokens{suffix}"),
                vec![amount_out, path, to, deadline],
                amount_in_hex,
            ),
            (TradeType::ExactInput, false, true) => (
                format!("swapExactTokensForETH{suffix}"),
                vec![amount_in, amount_out, path, to, deadline],
                zero,
            ),
            (TradeType::ExactInput, false, false) => (
                format!("swapExactTokensForTokens{suffix}"),
                vec![amount_in, amount_out, path, to, deadline],
                zero,
            ),
            (TradeType::ExactOutput, true, _) => (
                "swapETHForExactTokens".to_string(),
                vec![amount_out, path, to, deadline],
                amount_in_hex,
            ),
            (TradeType::ExactOutput, false, true) => (
                "swapTokensForExactETH".to_string(),
                vec![amount_out, amount_in, path, to, deadline],
                zero,
            ),
            (TradeType::ExactOutput, false, false) => (
                "swapTokensForExactTokens".to_string(),
                vec![amount_out, amount_in, path, to, deadline],
                zero,
            ),
        };

        Ok(SwapParameters {
            router: self.address,
            method_name: method,
            args,
            value,
        })
    }
}
