//! Constant-product pair snapshots
//!
//! A [`Pair`] is an immutable view of one pool's reserves. Swapping against
//! it returns the amount *and* a new `Pair` holding the post-swap reserves,
//! which is what multi-hop simulation feeds into the next hop.
//!
//! ## Pair Addresses
//!
//! The factory deploys pairs with CREATE2, so the address is a pure function
//! of the sorted token addresses:
//!
//! ```text
//! keccak256(0xff ++ factory ++ keccak256(token0 ++ token1) ++ init_code_hash)[12..]
//! ```

use crate::error::AmmError;
use crate::v2_math::V2Math;
use num_bigint::BigInt;
use num_traits::Zero;
use swapkit_config::chains::{self, liquidity_token, FEE_DENOMINATOR};
use swapkit_config::ExchangeSettings;
use swapkit_types::{
    keccak256, Address, BaseCurrency, ChainId, Hash32, MathError, Price, Token, TokenAmount,
};

/// Factory deployment and fee that determine pair addresses and swap math
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairParams {
    factory: Address,
    init_code_hash: Hash32,
    fee_bips: u32,
}

impl PairParams {
    pub fn new(factory: Address, init_code_hash: Hash32, fee_bips: u32) -> Result<Self, AmmError> {
        if fee_bips >= FEE_DENOMINATOR {
            return Err(AmmError::InvalidFee { fee_bips });
        }
        Ok(Self {
            factory,
            init_code_hash,
            fee_bips,
        })
    }

    pub fn factory(&self) -> Address {
        self.factory
    }

    pub fn init_code_hash(&self) -> Hash32 {
        self.init_code_hash
    }

    pub fn fee_bips(&self) -> u32 {
        self.fee_bips
    }
}

impl Default for PairParams {
    /// Uniswap V2 on mainnet and its testnets
    fn default() -> Self {
        Self {
            factory: chains::FACTORY,
            init_code_hash: chains::INIT_CODE,
            fee_bips: chains::FEE_BIPS,
        }
    }
}

impl TryFrom<&ExchangeSettings> for PairParams {
    type Error = AmmError;

    fn try_from(settings: &ExchangeSettings) -> Result<Self, Self::Error> {
        let factory = Address::parse(&settings.factory_address)?;
        let init_code_hash = Hash32::parse(&settings.init_code_hash)?;
        Self::new(factory, init_code_hash, settings.fee_bips)
    }
}

/// CREATE2 address of the pair for two tokens; argument order does not matter
pub fn compute_pair_address(
    factory: Address,
    token_a: &Token,
    token_b: &Token,
    init_code_hash: Hash32,
) -> Result<Address, AmmError> {
    let (token0, token1) = Token::sort_pair(token_a, token_b)?;

    let mut packed_tokens = [0u8; 40];
    packed_tokens[..20].copy_from_slice(token0.address().as_bytes());
    packed_tokens[20..].copy_from_slice(token1.address().as_bytes());
    let salt = keccak256(packed_tokens);

    let mut preimage = Vec::with_capacity(1 + 20 + 32 + 32);
    preimage.push(0xff);
    preimage.extend_from_slice(factory.as_bytes());
    preimage.extend_from_slice(salt.as_bytes());
    preimage.extend_from_slice(init_code_hash.as_bytes());

    let hash = keccak256(&preimage);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash.as_bytes()[12..]);
    Ok(Address::new(address))
}

/// Reserve snapshot of one constant-product pool
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    liquidity_token: Token,
    reserve0: TokenAmount,
    reserve1: TokenAmount,
    params: PairParams,
}

impl Pair {
    /// Build a pair from reserves given in either token order
    pub fn new(
        amount_a: TokenAmount,
        amount_b: TokenAmount,
        params: PairParams,
    ) -> Result<Self, AmmError> {
        let (reserve0, reserve1) = if amount_a.currency().sorts_before(amount_b.currency())? {
            (amount_a, amount_b)
        } else {
            (amount_b, amount_a)
        };

        let address = compute_pair_address(
            params.factory,
            reserve0.currency(),
            reserve1.currency(),
            params.init_code_hash,
        )?;
        let liquidity_token = Token::new(
            reserve0.currency().chain_id(),
            address,
            liquidity_token::DECIMALS,
        )
        .with_symbol(liquidity_token::SYMBOL)
        .with_name(liquidity_token::NAME);

        Ok(Self {
            liquidity_token,
            reserve0,
            reserve1,
            params,
        })
    }

    /// Pair address under `params`, without building the pair
    pub fn get_address(
        token_a: &Token,
        token_b: &Token,
        params: &PairParams,
    ) -> Result<Address, AmmError> {
        compute_pair_address(params.factory, token_a, token_b, params.init_code_hash)
    }

    // same tokens and params, new reserves
    fn with_reserves(&self, reserve0: TokenAmount, reserve1: TokenAmount) -> Self {
        Self {
            liquidity_token: self.liquidity_token.clone(),
            reserve0,
            reserve1,
            params: self.params,
        }
    }

    pub fn address(&self) -> Address {
        self.liquidity_token.address()
    }

    /// ERC-20 minted to liquidity providers, deployed at the pair address
    pub fn liquidity_token(&self) -> &Token {
        &self.liquidity_token
    }

    pub fn chain_id(&self) -> ChainId {
        self.reserve0.currency().chain_id()
    }

    pub fn params(&self) -> &PairParams {
        &self.params
    }

    pub fn fee_bips(&self) -> u32 {
        self.params.fee_bips
    }

    pub fn token0(&self) -> &Token {
        self.reserve0.currency()
    }

    pub fn token1(&self) -> &Token {
        self.reserve1.currency()
    }

    pub fn reserve0(&self) -> &TokenAmount {
        &self.reserve0
    }

    pub fn reserve1(&self) -> &TokenAmount {
        &self.reserve1
    }

    pub fn involves_token(&self, token: &Token) -> bool {
        token.equals(self.token0()) || token.equals(self.token1())
    }

    /// The token on the opposite side from `token`
    pub fn other_token(&self, token: &Token) -> Result<&Token, AmmError> {
        if token.equals(self.token0()) {
            Ok(self.token1())
        } else if token.equals(self.token1()) {
            Ok(self.token0())
        } else {
            Err(AmmError::TokenNotInPair {
                address: token.address(),
            })
        }
    }

    pub fn reserve_of(&self, token: &Token) -> Result<&TokenAmount, AmmError> {
        if token.equals(self.token0()) {
            Ok(&self.reserve0)
        } else if token.equals(self.token1()) {
            Ok(&self.reserve1)
        } else {
            Err(AmmError::TokenNotInPair {
                address: token.address(),
            })
        }
    }

    /// Spot price of token0 in token1: `reserve1 / reserve0`
    pub fn token0_price(&self) -> Result<Price<Token, Token>, AmmError> {
        Ok(Price::new(
            self.token0().clone(),
            self.token1().clone(),
            self.reserve0.quotient(),
            self.reserve1.quotient(),
        )?)
    }

    /// Spot price of token1 in token0: `reserve0 / reserve1`
    pub fn token1_price(&self) -> Result<Price<Token, Token>, AmmError> {
        Ok(Price::new(
            self.token1().clone(),
            self.token0().clone(),
            self.reserve1.quotient(),
            self.reserve0.quotient(),
        )?)
    }

    /// Spot price of `token` in the other token
    pub fn price_of(&self, token: &Token) -> Result<Price<Token, Token>, AmmError> {
        if token.equals(self.token0()) {
            self.token0_price()
        } else if token.equals(self.token1()) {
            self.token1_price()
        } else {
            Err(AmmError::TokenNotInPair {
                address: token.address(),
            })
        }
    }

    // (reserve_in, reserve_out, input_is_token0)
    fn orient(&self, token_in: &Token) -> Result<(&TokenAmount, &TokenAmount, bool), AmmError> {
        if token_in.equals(self.token0()) {
            Ok((&self.reserve0, &self.reserve1, true))
        } else if token_in.equals(self.token1()) {
            Ok((&self.reserve1, &self.reserve0, false))
        } else {
            Err(AmmError::TokenNotInPair {
                address: token_in.address(),
            })
        }
    }

    /// Output for an exact input, and the pair after the swap
    ///
    /// Fails with [`AmmError::InsufficientInputAmount`] when the floored
    /// output is zero, and with [`AmmError::InsufficientReserves`] when the
    /// input reserve would grow past `uint256`.
    pub fn get_output_amount(&self, amount_in: &TokenAmount) -> Result<(TokenAmount, Pair), AmmError> {
        let (reserve_in, reserve_out, zero_for_one) = self.orient(amount_in.currency())?;

        let output = V2Math::calculate_output_amount(
            &amount_in.quotient(),
            &reserve_in.quotient(),
            &reserve_out.quotient(),
            self.params.fee_bips,
        )?;
        if output.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }

        let amount_out = TokenAmount::from_raw_amount(reserve_out.currency().clone(), output)?;
        let new_in = reserve_in.add(amount_in).map_err(reserve_overflow)?;
        let new_out = reserve_out.subtract(&amount_out)?;
        let next = if zero_for_one {
            self.with_reserves(new_in, new_out)
        } else {
            self.with_reserves(new_out, new_in)
        };
        Ok((amount_out, next))
    }

    /// Input required for an exact output, and the pair after the swap
    pub fn get_input_amount(&self, amount_out: &TokenAmount) -> Result<(TokenAmount, Pair), AmmError> {
        let token_out = amount_out.currency();
        let token_in = self.other_token(token_out)?;
        let (reserve_in, reserve_out, zero_for_one) = self.orient(token_in)?;

        let input = V2Math::calculate_input_amount(
            &amount_out.quotient(),
            &reserve_in.quotient(),
            &reserve_out.quotient(),
            self.params.fee_bips,
        )?;

        let amount_in = TokenAmount::from_raw_amount(reserve_in.currency().clone(), input)
            .map_err(reserve_overflow)?;
        let new_in = reserve_in.add(&amount_in).map_err(reserve_overflow)?;
        let new_out = reserve_out.subtract(amount_out)?;
        let next = if zero_for_one {
            self.with_reserves(new_in, new_out)
        } else {
            self.with_reserves(new_out, new_in)
        };
        Ok((amount_in, next))
    }

    /// Liquidity tokens minted for depositing `amount_a` and `amount_b`
    ///
    /// `total_supply` is the liquidity token's supply before the deposit.
    pub fn get_liquidity_minted(
        &self,
        total_supply: &TokenAmount,
        amount_a: &TokenAmount,
        amount_b: &TokenAmount,
    ) -> Result<TokenAmount, AmmError> {
        self.check_liquidity_token(total_supply)?;
        let (amount0, amount1) = if amount_a.currency().sorts_before(amount_b.currency())? {
            (amount_a, amount_b)
        } else {
            (amount_b, amount_a)
        };
        if !amount0.currency().equals(self.token0()) {
            return Err(AmmError::TokenNotInPair {
                address: amount0.currency().address(),
            });
        }
        if !amount1.currency().equals(self.token1()) {
            return Err(AmmError::TokenNotInPair {
                address: amount1.currency().address(),
            });
        }

        let minted = V2Math::calculate_liquidity_minted(
            &total_supply.quotient(),
            &amount0.quotient(),
            &amount1.quotient(),
            &self.reserve0.quotient(),
            &self.reserve1.quotient(),
        )?;
        Ok(TokenAmount::from_raw_amount(self.liquidity_token.clone(), minted)?)
    }

    /// Amount of `token` redeemable by burning `liquidity`
    ///
    /// Pass `k_last` (the pair's `kLast`) when the protocol fee is switched
    /// on; the fee liquidity the pair would mint first dilutes the burn.
    pub fn get_liquidity_value(
        &self,
        token: &Token,
        total_supply: &TokenAmount,
        liquidity: &TokenAmount,
        k_last: Option<&BigInt>,
    ) -> Result<TokenAmount, AmmError> {
        self.check_liquidity_token(total_supply)?;
        self.check_liquidity_token(liquidity)?;
        let reserve = self.reserve_of(token)?;

        let supply = match k_last {
            Some(k_last) => V2Math::supply_with_protocol_fee(
                &total_supply.quotient(),
                &self.reserve0.quotient(),
                &self.reserve1.quotient(),
                k_last,
            )?,
            None => total_supply.quotient(),
        };

        let value =
            V2Math::calculate_liquidity_value(&liquidity.quotient(), &reserve.quotient(), &supply)?;
        Ok(TokenAmount::from_raw_amount(token.clone(), value)?)
    }

    fn check_liquidity_token(&self, amount: &TokenAmount) -> Result<(), AmmError> {
        if amount.currency().equals(&self.liquidity_token) {
            Ok(())
        } else {
            Err(AmmError::TokenNotInPair {
                address: amount.currency().address(),
            })
        }
    }
}

/// A reserve pushed past `uint256` is a pool that cannot take the swap
fn reserve_overflow(err: MathError) -> AmmError {
    match err {
        MathError::AmountOverflow { .. } => AmmError::InsufficientReserves,
        other => AmmError::from(other),
    }
}
