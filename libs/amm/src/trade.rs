//! Trades along a route
//!
//! A [`Trade`] fixes one side of a swap (the exact input or the exact
//! output) and simulates every hop of its [`Route`] to find the other side.
//! Each hop sees the reserves left behind by the previous one.
//!
//! ## Price Impact
//!
//! Price impact is reported net of LP fees: the shortfall of the actual
//! output against the route's mid-price quote, minus the part of that
//! shortfall the fee accounts for. A trade of negligible size relative to
//! pool depth therefore shows 0%, not 0.3%.

use crate::error::AmmError;
use crate::pair::Pair;
use crate::route::Route;
use serde::{Deserialize, Serialize};
use swapkit_types::{BaseCurrency, CurrencyAmount, Fraction, MathError, Percent, Price};

/// Which side of the trade the caller fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

/// Simulated swap through a route
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    route: Route,
    trade_type: TradeType,
    input_amount: CurrencyAmount,
    output_amount: CurrencyAmount,
    execution_price: Price,
    /// Pairs after this trade's swaps, in route order
    next_pairs: Vec<Pair>,
}

impl Trade {
    /// Simulate `route` with `amount` fixed on the side given by `trade_type`
    ///
    /// `amount` must be denominated in the route's input currency for
    /// [`TradeType::ExactInput`] and in its output currency otherwise.
    pub fn new(route: Route, amount: &CurrencyAmount, trade_type: TradeType) -> Result<Self, AmmError> {
        let (input_amount, output_amount, next_pairs) = match trade_type {
            TradeType::ExactInput => {
                if !amount.currency().equals(route.input()) {
                    return Err(MathError::CurrencyMismatch.into());
                }
                let mut current = amount.wrapped();
                let mut next_pairs = Vec::with_capacity(route.hops());
                for pair in route.pairs() {
                    let (output, next) = pair.get_output_amount(&current)?;
                    next_pairs.push(next);
                    current = output;
                }
                let output_amount = current.with_currency(route.output().clone());
                (amount.clone(), output_amount, next_pairs)
            }
            TradeType::ExactOutput => {
                if !amount.currency().equals(route.output()) {
                    return Err(MathError::CurrencyMismatch.into());
                }
                let mut current = amount.wrapped();
                let mut next_pairs = Vec::with_capacity(route.hops());
                for pair in route.pairs().iter().rev() {
                    let (input, next) = pair.get_input_amount(&current)?;
                    next_pairs.push(next);
                    current = input;
                }
                next_pairs.reverse();
                let input_amount = current.with_currency(route.input().clone());
                (input_amount, amount.clone(), next_pairs)
            }
        };

        let execution_price = Price::from_amounts(&input_amount, &output_amount)?;
        Ok(Self {
            route,
            trade_type,
            input_amount,
            output_amount,
            execution_price,
            next_pairs,
        })
    }

    pub fn exact_in(route: Route, amount_in: &CurrencyAmount) -> Result<Self, AmmError> {
        Self::new(route, amount_in, TradeType::ExactInput)
    }

    pub fn exact_out(route: Route, amount_out: &CurrencyAmount) -> Result<Self, AmmError> {
        Self::new(route, amount_out, TradeType::ExactOutput)
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    pub fn input_amount(&self) -> &CurrencyAmount {
        &self.input_amount
    }

    pub fn output_amount(&self) -> &CurrencyAmount {
        &self.output_amount
    }

    /// Average price paid: output per unit of input
    pub fn execution_price(&self) -> &Price {
        &self.execution_price
    }

    /// Mid price of the route once this trade has executed
    pub fn next_mid_price(&self) -> Result<Price, AmmError> {
        Route::new(
            self.next_pairs.clone(),
            self.route.input().clone(),
            self.route.output().clone(),
        )?
        .mid_price()
    }

    /// Fraction of the input paid to liquidity providers across all hops:
    /// `1 - Π(1 - fee_i)`
    pub fn realized_lp_fee(&self) -> Percent {
        let one = Percent::one_hundred();
        let kept = self.route.pairs().iter().fold(one.clone(), |kept, pair| {
            kept.multiply(&one.subtract(&Percent::from_bips(pair.fee_bips())))
        });
        one.subtract(&kept)
    }

    /// LP fee in units of the input currency
    pub fn realized_lp_fee_amount(&self) -> Result<CurrencyAmount, AmmError> {
        Ok(self.input_amount.multiply(self.realized_lp_fee().as_fraction())?)
    }

    /// Loss against the mid price beyond what LP fees explain
    pub fn price_impact(&self) -> Result<Percent, AmmError> {
        let quoted = self.route.mid_price()?.quote(&self.input_amount)?;
        let quoted = quoted.as_fraction();
        let shortfall = quoted
            .subtract(self.output_amount.as_fraction())
            .divide(quoted)?;
        Ok(Percent::from(shortfall).subtract(&self.realized_lp_fee()))
    }

    /// Least output acceptable under `slippage`
    ///
    /// Exact-output trades already fix the output, so it is returned as is.
    pub fn minimum_amount_out(&self, slippage: &Percent) -> Result<CurrencyAmount, AmmError> {
        validate_slippage(slippage)?;
        match self.trade_type {
            TradeType::ExactOutput => Ok(self.output_amount.clone()),
            TradeType::ExactInput => {
                let keep = Fraction::one().subtract(slippage.as_fraction());
                let bound = self.output_amount.multiply(&keep)?;
                Ok(CurrencyAmount::from_raw_amount(
                    self.output_amount.currency().clone(),
                    bound.quotient(),
                )?)
            }
        }
    }

    /// Most input payable under `slippage`
    ///
    /// Exact-input trades already fix the input, so it is returned as is.
    pub fn maximum_amount_in(&self, slippage: &Percent) -> Result<CurrencyAmount, AmmError> {
        validate_slippage(slippage)?;
        match self.trade_type {
            TradeType::ExactInput => Ok(self.input_amount.clone()),
            TradeType::ExactOutput => {
                let allow = Fraction::one().add(slippage.as_fraction());
                let bound = self.input_amount.multiply(&allow)?;
                Ok(CurrencyAmount::from_raw_amount(
                    self.input_amount.currency().clone(),
                    bound.quotient(),
                )?)
            }
        }
    }

    /// Execution price if the trade fills at its slippage bounds
    pub fn worst_execution_price(&self, slippage: &Percent) -> Result<Price, AmmError> {
        let max_in = self.maximum_amount_in(slippage)?;
        let min_out = self.minimum_amount_out(slippage)?;
        Ok(Price::from_amounts(&max_in, &min_out)?)
    }
}

fn validate_slippage(slippage: &Percent) -> Result<(), AmmError> {
    if slippage.is_negative() || slippage.greater_than(&Percent::one_hundred()) {
        return Err(AmmError::InvalidSlippage);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pair::PairParams;
    use num_bigint::BigInt;
    use swapkit_config::chains;
    use swapkit_types::{Address, ChainId, Currency, Rounding, Token, TokenAmount};

    fn token(byte: u8) -> Token {
        let mut bytes = [0u8; 20];
        bytes[19] = byte;
        Token::new(ChainId::MAINNET, Address::new(bytes), 18)
    }

    fn pair(a: (&Token, u64), b: (&Token, u64)) -> Pair {
        Pair::new(
            TokenAmount::from_raw_amount(a.0.clone(), a.1).unwrap(),
            TokenAmount::from_raw_amount(b.0.clone(), b.1).unwrap(),
            PairParams::default(),
        )
        .unwrap()
    }

    fn amount(currency: impl Into<Currency>, raw: u64) -> CurrencyAmount {
        CurrencyAmount::from_raw_amount(currency.into(), raw).unwrap()
    }

    struct Fixture {
        t0: Token,
        t1: Token,
        t2: Token,
        p01: Pair,
        p02: Pair,
        p12: Pair,
    }

    fn fixture() -> Fixture {
        let (t0, t1, t2) = (token(1), token(2), token(3));
        Fixture {
            p01: pair((&t0, 1000), (&t1, 1000)),
            p02: pair((&t0, 1000), (&t2, 1100)),
            p12: pair((&t1, 1200), (&t2, 1000)),
            t0,
            t1,
            t2,
        }
    }

    #[test]
    fn test_exact_in_single_hop() {
        let f = fixture();
        let route = Route::new(vec![f.p02.clone()], f.t0.clone().into(), f.t2.clone().into()).unwrap();
        let trade = Trade::exact_in(route, &amount(f.t0.clone(), 100)).unwrap();

        assert_eq!(trade.trade_type(), TradeType::ExactInput);
        assert_eq!(trade.input_amount().quotient(), BigInt::from(100));
        assert_eq!(trade.output_amount().quotient(), BigInt::from(99));
        assert_eq!(trade.output_amount().currency(), &Currency::from(f.t2));
        assert_eq!(
            trade.execution_price().to_significant(2, Rounding::RoundHalfUp).unwrap(),
            "0.99"
        );
    }

    #[test]
    fn test_exact_in_multi_hop_threads_reserves() {
        let f = fixture();
        let route = Route::new(
            vec![f.p01.clone(), f.p12.clone()],
            f.t0.clone().into(),
            f.t2.clone().into(),
        )
        .unwrap();
        let trade = Trade::exact_in(route, &amount(f.t0.clone(), 100)).unwrap();

        let (hop1, _) = f
            .p01
            .get_output_amount(&TokenAmount::from_raw_amount(f.t0.clone(), 100u64).unwrap())
            .unwrap();
        assert_eq!(hop1.currency(), &f.t1);
        assert_eq!(hop1.quotient(), BigInt::from(90));
        let (hop2, _) = f.p12.get_output_amount(&hop1).unwrap();
        assert_eq!(trade.output_amount().quotient(), hop2.quotient());
        assert_eq!(hop2.quotient(), BigInt::from(69));
    }

    #[test]
    fn test_exact_out_multi_hop() {
        let f = fixture();
        let route = Route::new(
            vec![f.p01.clone(), f.p12.clone()],
            f.t0.clone().into(),
            f.t2.clone().into(),
        )
        .unwrap();
        let trade = Trade::exact_out(route, &amount(f.t2.clone(), 100)).unwrap();
        assert_eq!(trade.trade_type(), TradeType::ExactOutput);
        assert_eq!(trade.output_amount().quotient(), BigInt::from(100));
        assert_eq!(trade.input_amount().quotient(), BigInt::from(156));
        assert_eq!(trade.input_amount().currency(), &Currency::from(f.t0));
    }

    #[test]
    fn test_amount_in_wrong_currency() {
        let f = fixture();
        let route = Route::new(vec![f.p01.clone()], f.t0.clone().into(), f.t1.clone().into()).unwrap();
        assert_eq!(
            Trade::exact_in(route.clone(), &amount(f.t1.clone(), 100)).unwrap_err(),
            AmmError::Math(MathError::CurrencyMismatch)
        );
        assert_eq!(
            Trade::exact_out(route, &amount(f.t0, 100)).unwrap_err(),
            AmmError::Math(MathError::CurrencyMismatch)
        );
    }

    #[test]
    fn test_price_impact_excludes_fee() {
        let f = fixture();
        let route = Route::new(vec![f.p02.clone()], f.t0.clone().into(), f.t2.clone().into()).unwrap();
        let trade = Trade::exact_in(route, &amount(f.t0.clone(), 100)).unwrap();

        // mid quote 110, got 99: 10% shortfall, 0.3% of it is fee
        assert_eq!(trade.price_impact().unwrap(), Percent::new(97, 1000).unwrap());
        assert_eq!(
            trade.price_impact().unwrap().to_significant(2, Rounding::RoundHalfUp).unwrap(),
            "9.7"
        );
        assert_eq!(trade.realized_lp_fee(), Percent::from_bips(30));
    }

    #[test]
    fn test_realized_lp_fee_compounds_per_hop() {
        let f = fixture();
        let route = Route::new(
            vec![f.p01.clone(), f.p12.clone()],
            f.t0.clone().into(),
            f.t2.clone().into(),
        )
        .unwrap();
        let trade = Trade::exact_in(route, &amount(f.t0.clone(), 1000)).unwrap();

        // 1 - 0.997^2
        assert_eq!(trade.realized_lp_fee(), Percent::new(5991, 1_000_000).unwrap());
        let fee_amount = trade.realized_lp_fee_amount().unwrap();
        assert_eq!(fee_amount.quotient(), BigInt::from(5));
        assert_eq!(fee_amount.currency(), &Currency::from(f.t0));
    }

    #[test]
    fn test_next_mid_price_moves_against_trader() {
        let f = fixture();
        let route = Route::new(vec![f.p01.clone()], f.t0.clone().into(), f.t1.clone().into()).unwrap();
        let trade = Trade::exact_in(route.clone(), &amount(f.t0.clone(), 100)).unwrap();

        // 1100 t0 against 910 t1
        let next = trade.next_mid_price().unwrap();
        assert!(next.raw() < route.mid_price().unwrap().raw());
        assert_eq!(next.raw(), &Fraction::new(910, 1100).unwrap());
    }

    #[test]
    fn test_slippage_bounds_exact_in() {
        let f = fixture();
        let route = Route::new(vec![f.p02.clone()], f.t0.clone().into(), f.t2.clone().into()).unwrap();
        let trade = Trade::exact_in(route, &amount(f.t0.clone(), 100)).unwrap();

        assert_eq!(trade.minimum_amount_out(&Percent::zero()).unwrap().quotient(), BigInt::from(99));
        // 99 * 0.95 = 94.05
        assert_eq!(
            trade.minimum_amount_out(&Percent::from_bips(500)).unwrap().quotient(),
            BigInt::from(94)
        );
        assert_eq!(
            trade.minimum_amount_out(&Percent::one_hundred()).unwrap().quotient(),
            BigInt::from(0)
        );
        assert_eq!(
            trade.maximum_amount_in(&Percent::from_bips(500)).unwrap(),
            trade.input_amount().clone()
        );
    }

    #[test]
    fn test_slippage_bounds_exact_out() {
        let f = fixture();
        let route = Route::new(vec![f.p02.clone()], f.t0.clone().into(), f.t2.clone().into()).unwrap();
        let trade = Trade::exact_out(route, &amount(f.t2.clone(), 100)).unwrap();
        assert_eq!(trade.input_amount().quotient(), BigInt::from(101));

        // 101 * 1.05 = 106.05
        assert_eq!(
            trade.maximum_amount_in(&Percent::from_bips(500)).unwrap().quotient(),
            BigInt::from(106)
        );
        assert_eq!(
            trade.minimum_amount_out(&Percent::from_bips(500)).unwrap(),
            trade.output_amount().clone()
        );

        let worst = trade.worst_execution_price(&Percent::from_bips(500)).unwrap();
        assert_eq!(worst.raw(), &Fraction::new(100, 106).unwrap());
    }

    #[test]
    fn test_invalid_slippage() {
        let f = fixture();
        let route = Route::new(vec![f.p02.clone()], f.t0.clone().into(), f.t2.clone().into()).unwrap();
        let trade = Trade::exact_in(route, &amount(f.t0, 100)).unwrap();

        let negative = Percent::new(-1, 100).unwrap();
        let too_much = Percent::new(101, 100).unwrap();
        assert_eq!(trade.minimum_amount_out(&negative).unwrap_err(), AmmError::InvalidSlippage);
        assert_eq!(trade.maximum_amount_in(&too_much).unwrap_err(), AmmError::InvalidSlippage);
        assert_eq!(trade.worst_execution_price(&too_much).unwrap_err(), AmmError::InvalidSlippage);
    }

    #[test]
    fn test_native_input_trade() {
        let weth = chains::wrapped_native(ChainId::MAINNET).unwrap();
        let ether = chains::native_currency(ChainId::MAINNET).unwrap();
        let t0 = token(1);
        let p = pair((&weth, 1000), (&t0, 1000));
        let route = Route::new(vec![p], ether.clone().into(), t0.clone().into()).unwrap();

        let trade = Trade::exact_in(route, &amount(ether.clone(), 100)).unwrap();
        assert_eq!(trade.input_amount().currency(), &Currency::from(ether));
        assert_eq!(trade.output_amount().quotient(), BigInt::from(90));
        assert_eq!(
            trade.minimum_amount_out(&Percent::from_bips(100)).unwrap().quotient(),
            BigInt::from(89)
        );
    }

    #[test]
    fn test_trade_type_serde() {
        assert_eq!(
            serde_json::to_string(&TradeType::ExactInput).unwrap(),
            "\"EXACT_INPUT\""
        );
        let parsed: TradeType = serde_json::from_str("\"EXACT_OUTPUT\"").unwrap();
        assert_eq!(parsed, TradeType::ExactOutput);
    }
}
