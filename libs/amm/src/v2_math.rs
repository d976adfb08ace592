//! Uniswap V2 AMM math with exact integer calculations
//!
//! Every function reproduces the pair contract's truncating `uint256`
//! arithmetic on unbounded integers, so results match the chain exactly.
//! Rounding always favours the pool: outputs are floored, required inputs
//! are rounded up.

use crate::error::AmmError;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use swapkit_config::chains::{FEE_DENOMINATOR, MINIMUM_LIQUIDITY};
use swapkit_types::sqrt;

/// V2 AMM math functions with zero precision loss
pub struct V2Math;

impl V2Math {
    /// Calculate exact output amount for Uniswap V2 using the x*y=k formula
    ///
    /// # Arguments
    /// * `amount_in` - Input token amount (in smallest units)
    /// * `reserve_in` - Input token reserve
    /// * `reserve_out` - Output token reserve
    /// * `fee_bips` - Fee in basis points (30 = 0.3%); must be below 10000
    ///
    /// # Returns
    /// `floor(amount_in_with_fee * reserve_out / (reserve_in * 10000 + amount_in_with_fee))`
    pub fn calculate_output_amount(
        amount_in: &BigInt,
        reserve_in: &BigInt,
        reserve_out: &BigInt,
        fee_bips: u32,
    ) -> Result<BigInt, AmmError> {
        check_fee(fee_bips)?;
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(AmmError::InsufficientReserves);
        }
        if !amount_in.is_positive() {
            return Err(AmmError::InsufficientInputAmount);
        }

        let amount_in_with_fee = amount_in * (FEE_DENOMINATOR - fee_bips);
        let numerator = &amount_in_with_fee * reserve_out;
        let denominator = reserve_in * FEE_DENOMINATOR + &amount_in_with_fee;

        Ok(numerator / denominator)
    }

    /// Calculate required input amount for a desired output (reverse calculation)
    ///
    /// Integer division plus one, as the router computes it, so the quote
    /// never under-charges.
    pub fn calculate_input_amount(
        amount_out: &BigInt,
        reserve_in: &BigInt,
        reserve_out: &BigInt,
        fee_bips: u32,
    ) -> Result<BigInt, AmmError> {
        check_fee(fee_bips)?;
        if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
            return Err(AmmError::InsufficientReserves);
        }
        if !amount_out.is_positive() {
            return Err(AmmError::InsufficientOutputAmount);
        }

        let numerator = reserve_in * amount_out * FEE_DENOMINATOR;
        let denominator = (reserve_out - amount_out) * (FEE_DENOMINATOR - fee_bips);

        // Add 1 to round up (ensures sufficient input)
        Ok(numerator / denominator + 1u32)
    }

    /// Liquidity minted for a deposit of `amount0` and `amount1`
    ///
    /// The first deposit mints `sqrt(amount0 * amount1)` minus the
    /// permanently locked minimum; later deposits mint in proportion to the
    /// smaller side.
    pub fn calculate_liquidity_minted(
        total_supply: &BigInt,
        amount0: &BigInt,
        amount1: &BigInt,
        reserve0: &BigInt,
        reserve1: &BigInt,
    ) -> Result<BigInt, AmmError> {
        if total_supply.is_zero() {
            let liquidity = sqrt(&(amount0 * amount1))? - MINIMUM_LIQUIDITY;
            if !liquidity.is_positive() {
                return Err(AmmError::InsufficientInitialLiquidity);
            }
            return Ok(liquidity);
        }

        if reserve0.is_zero() || reserve1.is_zero() {
            return Err(AmmError::InsufficientReserves);
        }
        let liquidity0 = amount0 * total_supply / reserve0;
        let liquidity1 = amount1 * total_supply / reserve1;
        let liquidity = liquidity0.min(liquidity1);
        if !liquidity.is_positive() {
            return Err(AmmError::InsufficientInputAmount);
        }
        Ok(liquidity)
    }

    /// Total supply after the protocol fee the pair would mint on its next
    /// liquidity event
    ///
    /// With the fee on, the protocol takes 1/6 of the growth in `sqrt(k)`
    /// since `k_last`.
    pub fn supply_with_protocol_fee(
        total_supply: &BigInt,
        reserve0: &BigInt,
        reserve1: &BigInt,
        k_last: &BigInt,
    ) -> Result<BigInt, AmmError> {
        if k_last.is_zero() {
            return Ok(total_supply.clone());
        }
        let root_k = sqrt(&(reserve0 * reserve1))?;
        let root_k_last = sqrt(k_last)?;
        if root_k <= root_k_last {
            return Ok(total_supply.clone());
        }

        let numerator = total_supply * (&root_k - &root_k_last);
        let denominator = root_k * 5u32 + root_k_last;
        Ok(total_supply + numerator / denominator)
    }

    /// Share of `reserve` redeemable by burning `liquidity` out of `total_supply`
    pub fn calculate_liquidity_value(
        liquidity: &BigInt,
        reserve: &BigInt,
        total_supply: &BigInt,
    ) -> Result<BigInt, AmmError> {
        if liquidity > total_supply {
            return Err(AmmError::LiquidityExceedsSupply {
                liquidity: liquidity.to_string(),
                total_supply: total_supply.to_string(),
            });
        }
        if total_supply.is_zero() {
            return Err(AmmError::InsufficientReserves);
        }
        Ok(liquidity * reserve / total_supply)
    }
}

/// Fees of 100% or more leave nothing to swap and would divide by zero
fn check_fee(fee_bips: u32) -> Result<(), AmmError> {
    if fee_bips >= FEE_DENOMINATOR {
        return Err(AmmError::InvalidFee { fee_bips });
    }
    Ok(())
}
