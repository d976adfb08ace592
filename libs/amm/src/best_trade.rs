//! Best-execution search over a set of pairs
//!
//! Depth-first search from the fixed side of the trade. Every pair touching
//! the current token is simulated; dead branches (empty pools, outputs that
//! round to zero, requests above reserves) are dropped and the walk
//! continues. Completed routes are kept in a bounded list ordered by
//! [`trade_comparator`].
//!
//! The recursion owns its accumulator and hands it back to the caller, so
//! the search has no shared mutable state and the same inputs always give
//! the same ordered result.
//!
//! ## Search Bounds
//!
//! - `max_hops`: longest route considered
//! - `max_num_results`: size of the returned list
//! - `max_iterations`: pair examinations before the search stops early and
//!   returns what it has

use crate::error::AmmError;
use crate::pair::Pair;
use crate::route::Route;
use crate::trade::Trade;
use std::cmp::Ordering;
use swapkit_config::thresholds::routing;
use swapkit_config::SearchSettings;
use swapkit_types::{BaseCurrency, Currency, CurrencyAmount, Fraction, Percent, Token, TokenAmount};
use tracing::{debug, trace, warn};

/// Bounds for [`Trade::best_trade_exact_in`] and [`Trade::best_trade_exact_out`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestTradeOptions {
    pub max_num_results: usize,
    pub max_hops: usize,
    pub max_iterations: usize,
}

impl Default for BestTradeOptions {
    fn default() -> Self {
        Self {
            max_num_results: routing::MAX_NUM_RESULTS,
            max_hops: routing::MAX_HOPS,
            max_iterations: routing::MAX_ITERATIONS,
        }
    }
}

impl From<&SearchSettings> for BestTradeOptions {
    fn from(settings: &SearchSettings) -> Self {
        Self {
            max_num_results: settings.max_num_results,
            max_hops: settings.max_hops,
            max_iterations: settings.max_iterations,
        }
    }
}

impl BestTradeOptions {
    fn validate(&self) -> Result<(), AmmError> {
        let reason = if self.max_hops == 0 {
            "max_hops must be at least 1"
        } else if self.max_num_results == 0 {
            "max_num_results must be at least 1"
        } else if self.max_iterations == 0 {
            "max_iterations must be at least 1"
        } else {
            return Ok(());
        };
        Err(AmmError::InvalidSearchOptions {
            reason: reason.to_string(),
        })
    }
}

/// Insert `item` into the sorted `items`, keeping at most `max_size`
///
/// Equal items keep insertion order. Returns the new list and the item
/// pushed out, if any (which may be `item` itself).
pub fn sorted_insert<T, F>(mut items: Vec<T>, item: T, max_size: usize, comparator: F) -> (Vec<T>, Option<T>)
where
    F: Fn(&T, &T) -> Ordering,
{
    if max_size == 0 {
        return (items, Some(item));
    }
    if items.len() >= max_size {
        if let Some(last) = items.last() {
            if comparator(&item, last) != Ordering::Less {
                return (items, Some(item));
            }
        }
    }

    let index = items.partition_point(|existing| comparator(existing, &item) != Ordering::Greater);
    items.insert(index, item);
    let evicted = if items.len() > max_size { items.pop() } else { None };
    (items, evicted)
}

/// Orders trades with the same input and output currencies: larger output
/// first, then smaller input
pub fn input_output_comparator(a: &Trade, b: &Trade) -> Ordering {
    b.output_amount()
        .as_fraction()
        .cmp(a.output_amount().as_fraction())
        .then_with(|| a.input_amount().as_fraction().cmp(b.input_amount().as_fraction()))
}

/// Search result order: [`input_output_comparator`], then fewer hops, then
/// lower price impact
pub fn trade_comparator(a: &Trade, b: &Trade) -> Ordering {
    input_output_comparator(a, b)
        .then_with(|| a.route().hops().cmp(&b.route().hops()))
        .then_with(|| match (a.price_impact(), b.price_impact()) {
            (Ok(impact_a), Ok(impact_b)) => impact_a.cmp(&impact_b),
            _ => Ordering::Equal,
        })
}

/// Whether `b` beats `a` by more than `minimum_delta` on execution price
///
/// Used to keep a route with fewer hops unless the longer one is worth it.
/// A missing trade always loses. Trades must agree on type and currencies.
pub fn is_trade_better(
    a: Option<&Trade>,
    b: Option<&Trade>,
    minimum_delta: &Percent,
) -> Result<bool, AmmError> {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        (None, Some(_)) => return Ok(true),
        _ => return Ok(false),
    };

    if a.trade_type() != b.trade_type()
        || !a.route().input().equals(b.route().input())
        || !a.route().output().equals(b.route().output())
    {
        return Err(AmmError::IncomparableTrades);
    }

    let price_a = a.execution_price().raw();
    let price_b = b.execution_price().raw();
    if minimum_delta.as_fraction().is_zero() {
        return Ok(price_a < price_b);
    }
    let required = price_a.multiply(&Fraction::one().add(minimum_delta.as_fraction()));
    Ok(required < *price_b)
}

/// Best trades found so far plus the work spent finding them
#[derive(Default)]
struct Accumulator {
    best: Vec<Trade>,
    iterations: usize,
    exhausted: bool,
}

impl Accumulator {
    /// Count one pair examination; false once the budget is spent
    fn tick(&mut self, max_iterations: usize) -> bool {
        if self.iterations >= max_iterations {
            if !self.exhausted {
                warn!(
                    iterations = self.iterations,
                    found = self.best.len(),
                    "Best-trade search exhausted its iteration budget, returning partial results"
                );
                self.exhausted = true;
            }
            return false;
        }
        self.iterations += 1;
        true
    }

    fn record(mut self, trade: Trade, max_num_results: usize) -> Self {
        debug!(
            hops = trade.route().hops(),
            input = %trade.input_amount().to_exact(),
            output = %trade.output_amount().to_exact(),
            "Recorded candidate trade"
        );
        let (best, _) = sorted_insert(self.best, trade, max_num_results, trade_comparator);
        self.best = best;
        self
    }
}

// Remaining candidates once `index` joins the path
fn without(pairs: &[Pair], index: usize) -> Vec<Pair> {
    pairs[..index]
        .iter()
        .chain(&pairs[index + 1..])
        .cloned()
        .collect()
}

fn check_request(
    pairs: &[Pair],
    token_in: &Token,
    token_out: &Token,
    options: &BestTradeOptions,
) -> Result<(), AmmError> {
    options.validate()?;
    if token_in.equals(token_out) {
        return Err(AmmError::InvalidSearchOptions {
            reason: "input and output trade through the same token".to_string(),
        });
    }
    if pairs.is_empty() {
        return Err(AmmError::NoRouteFound);
    }
    Ok(())
}

struct ExactInSearch<'a> {
    amount_in: &'a CurrencyAmount,
    currency_out: &'a Currency,
    token_out: &'a Token,
    options: &'a BestTradeOptions,
}

impl ExactInSearch<'_> {
    fn run(
        &self,
        pairs: &[Pair],
        path: &[Pair],
        amount: &TokenAmount,
        hops_left: usize,
        mut acc: Accumulator,
    ) -> Result<Accumulator, AmmError> {
        for (index, pair) in pairs.iter().enumerate() {
            if !acc.tick(self.options.max_iterations) {
                break;
            }
            if !pair.involves_token(amount.currency()) {
                continue;
            }

            let amount_out = match pair.get_output_amount(amount) {
                Ok((amount_out, _)) => amount_out,
                Err(e) if e.is_liquidity_error() => {
                    trace!(pair = %pair.address(), error = %e, "Discarding branch");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let mut next_path = path.to_vec();
            next_path.push(pair.clone());

            if amount_out.currency().equals(self.token_out) {
                let route = Route::new(
                    next_path,
                    self.amount_in.currency().clone(),
                    self.currency_out.clone(),
                )?;
                let trade = Trade::exact_in(route, self.amount_in)?;
                acc = acc.record(trade, self.options.max_num_results);
            } else if hops_left > 1 && pairs.len() > 1 {
                acc = self.run(&without(pairs, index), &next_path, &amount_out, hops_left - 1, acc)?;
            }
        }
        Ok(acc)
    }
}

struct ExactOutSearch<'a> {
    currency_in: &'a Currency,
    amount_out: &'a CurrencyAmount,
    token_in: &'a Token,
    options: &'a BestTradeOptions,
}

impl ExactOutSearch<'_> {
    fn run(
        &self,
        pairs: &[Pair],
        path: &[Pair],
        amount: &TokenAmount,
        hops_left: usize,
        mut acc: Accumulator,
    ) -> Result<Accumulator, AmmError> {
        for (index, pair) in pairs.iter().enumerate() {
            if !acc.tick(self.options.max_iterations) {
                break;
            }
            if !pair.involves_token(amount.currency()) {
                continue;
            }

            let amount_in = match pair.get_input_amount(amount) {
                Ok((amount_in, _)) => amount_in,
                Err(e) if e.is_liquidity_error() => {
                    trace!(pair = %pair.address(), error = %e, "Discarding branch");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let mut next_path = Vec::with_capacity(path.len() + 1);
            next_path.push(pair.clone());
            next_path.extend_from_slice(path);

            if amount_in.currency().equals(self.token_in) {
                let route = Route::new(
                    next_path,
                    self.currency_in.clone(),
                    self.amount_out.currency().clone(),
                )?;
                let trade = Trade::exact_out(route, self.amount_out)?;
                acc = acc.record(trade, self.options.max_num_results);
            } else if hops_left > 1 && pairs.len() > 1 {
                acc = self.run(&without(pairs, index), &next_path, &amount_in, hops_left - 1, acc)?;
            }
        }
        Ok(acc)
    }
}

impl Trade {
    /// Best trades spending exactly `amount_in` for `currency_out`
    ///
    /// At most `max_num_results` trades, best first, none longer than
    /// `max_hops` and none using a pair twice. Fails with
    /// [`AmmError::NoRouteFound`] if no pair path connects the currencies
    /// with enough liquidity.
    pub fn best_trade_exact_in(
        pairs: &[Pair],
        amount_in: &CurrencyAmount,
        currency_out: &Currency,
        options: &BestTradeOptions,
    ) -> Result<Vec<Trade>, AmmError> {
        let start = amount_in.wrapped();
        let token_out = currency_out.wrapped();
        check_request(pairs, start.currency(), token_out, options)?;

        let search = ExactInSearch {
            amount_in,
            currency_out,
            token_out,
            options,
        };
        let acc = search.run(pairs, &[], &start, options.max_hops, Accumulator::default())?;
        debug!(
            iterations = acc.iterations,
            found = acc.best.len(),
            "Exact-input search finished"
        );

        if acc.best.is_empty() {
            return Err(AmmError::NoRouteFound);
        }
        Ok(acc.best)
    }

    /// Best trades receiving exactly `amount_out` for `currency_in`
    ///
    /// Walks backwards from the output token; same bounds and errors as
    /// [`Trade::best_trade_exact_in`].
    pub fn best_trade_exact_out(
        pairs: &[Pair],
        currency_in: &Currency,
        amount_out: &CurrencyAmount,
        options: &BestTradeOptions,
    ) -> Result<Vec<Trade>, AmmError> {
        let start = amount_out.wrapped();
        let token_in = currency_in.wrapped();
        check_request(pairs, token_in, start.currency(), options)?;

        let search = ExactOutSearch {
            currency_in,
            amount_out,
            token_in,
            options,
        };
        let acc = search.run(pairs, &[], &start, options.max_hops, Accumulator::default())?;
        debug!(
            iterations = acc.iterations,
            found = acc.best.len(),
            "Exact-output search finished"
        );

        if acc.best.is_empty() {
            return Err(AmmError::NoRouteFound);
        }
        Ok(acc.best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pair::PairParams;
    use crate::trade::TradeType;
    use num_bigint::BigInt;
    use swapkit_config::chains;
    use swapkit_types::{Address, ChainId};

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

    fn tokens() -> (Token, Token, Token, Token) {
        (token(1), token(2), token(3), token(4))
    }

    #[test]
    fn test_sorted_insert_keeps_order_and_bound() {
        let cmp = |a: &u32, b: &u32| a.cmp(b);
        let (items, evicted) = sorted_insert(vec![], 3, 2, cmp);
        assert_eq!((items.as_slice(), evicted), (&[3][..], None));

        let (items, evicted) = sorted_insert(items, 1, 2, cmp);
        assert_eq!((items.as_slice(), evicted), (&[1, 3][..], None));

        let (items, evicted) = sorted_insert(items, 2, 2, cmp);
        assert_eq!((items.as_slice(), evicted), (&[1, 2][..], Some(3)));

        // not better than the last kept item
        let (items, evicted) = sorted_insert(items, 5, 2, cmp);
        assert_eq!((items.as_slice(), evicted), (&[1, 2][..], Some(5)));
    }

    #[test]
    fn test_sorted_insert_places_equal_items_after() {
        let by_key = |a: &(u32, char), b: &(u32, char)| a.0.cmp(&b.0);
        let (items, _) = sorted_insert(vec![(1, 'a'), (2, 'a')], (1, 'b'), 5, by_key);
        assert_eq!(items, vec![(1, 'a'), (1, 'b'), (2, 'a')]);
    }

    #[test]
    fn test_sorted_insert_zero_capacity() {
        let (items, evicted) = sorted_insert(Vec::<u32>::new(), 1, 0, |a, b| a.cmp(b));
        assert!(items.is_empty());
        assert_eq!(evicted, Some(1));
    }

    #[test]
    fn test_best_trade_exact_in_orders_by_output() {
        let (t0, t1, t2, _) = tokens();
        let pairs = vec![
            pair((&t0, 1000), (&t1, 1000)),
            pair((&t0, 1000), (&t2, 1100)),
            pair((&t1, 1200), (&t2, 1000)),
        ];

        let trades = Trade::best_trade_exact_in(
            &pairs,
            &amount(t0.clone(), 100),
            &t2.clone().into(),
            &BestTradeOptions::default(),
        )
        .unwrap();

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].route().path(), &[t0.clone(), t2.clone()]);
        assert_eq!(trades[0].output_amount().quotient(), BigInt::from(99));
        assert_eq!(trades[1].route().path(), &[t0, t1, t2]);
        assert_eq!(trades[1].output_amount().quotient(), BigInt::from(69));
        assert!(trades.iter().all(|t| t.trade_type() == TradeType::ExactInput));
    }

    #[test]
    fn test_best_trade_exact_in_respects_bounds() {
        let (t0, t1, t2, _) = tokens();
        let pairs = vec![
            pair((&t0, 1000), (&t1, 1000)),
            pair((&t0, 1000), (&t2, 1100)),
            pair((&t1, 1200), (&t2, 1000)),
        ];

        let one_hop = BestTradeOptions {
            max_hops: 1,
            ..BestTradeOptions::default()
        };
        let trades =
            Trade::best_trade_exact_in(&pairs, &amount(t0.clone(), 100), &t2.clone().into(), &one_hop)
                .unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].route().hops(), 1);

        let one_result = BestTradeOptions {
            max_num_results: 1,
            ..BestTradeOptions::default()
        };
        let trades =
            Trade::best_trade_exact_in(&pairs, &amount(t0, 100), &t2.into(), &one_result).unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].output_amount().quotient(), BigInt::from(99));
    }

    #[test]
    fn test_best_trade_exact_in_skips_zero_output_branches() {
        let (t0, t1, t2, _) = tokens();
        let pairs = vec![
            pair((&t0, 1000), (&t1, 1000)),
            pair((&t0, 1000), (&t2, 1100)),
            pair((&t1, 1200), (&t2, 1000)),
        ];
        // 1 t0 rounds to zero through t0/t1 but not through t0/t2
        let trades = Trade::best_trade_exact_in(
            &pairs,
            &amount(t0, 1),
            &t2.into(),
            &BestTradeOptions::default(),
        )
        .unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].output_amount().quotient(), BigInt::from(1));
    }

    #[test]
    fn test_overflowing_pool_only_discards_its_branch() {
        let (t0, t1, _, _) = tokens();
        let half = BigInt::from(1u8) << 255u32;
        let deep = Pair::new(
            TokenAmount::from_raw_amount(t0.clone(), half.clone()).unwrap(),
            TokenAmount::from_raw_amount(t1.clone(), 1_000_000_000_000_000_000u64).unwrap(),
            PairParams::default(),
        )
        .unwrap();
        let shallow = pair((&t0, 1000), (&t1, 1000));
        let amount_in = CurrencyAmount::from_raw_amount(Currency::from(t0.clone()), half).unwrap();

        let trades = Trade::best_trade_exact_in(
            &[deep, shallow],
            &amount_in,
            &t1.into(),
            &BestTradeOptions::default(),
        )
        .unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].output_amount().quotient(), BigInt::from(999));
        let used = &trades[0].route().pairs()[0];
        assert_eq!(used.reserve_of(&t0).unwrap().quotient(), BigInt::from(1000));
    }

    #[test]
    fn test_best_trade_exact_out() {
        let (t0, t1, t2, _) = tokens();
        let pairs = vec![
            pair((&t0, 1000), (&t1, 1000)),
            pair((&t0, 1000), (&t2, 1100)),
            pair((&t1, 1200), (&t2, 1000)),
        ];

        let trades = Trade::best_trade_exact_out(
            &pairs,
            &t0.clone().into(),
            &amount(t2.clone(), 100),
            &BestTradeOptions::default(),
        )
        .unwrap();

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].route().path(), &[t0.clone(), t2.clone()]);
        assert_eq!(trades[0].input_amount().quotient(), BigInt::from(101));
        assert_eq!(trades[1].route().path(), &[t0, t1, t2]);
        assert_eq!(trades[1].input_amount().quotient(), BigInt::from(156));
    }

    #[test]
    fn test_best_trade_exact_out_beyond_every_reserve() {
        let (t0, t1, t2, _) = tokens();
        let pairs = vec![
            pair((&t0, 1000), (&t1, 1000)),
            pair((&t0, 1000), (&t2, 1100)),
            pair((&t1, 1200), (&t2, 1000)),
        ];
        assert_eq!(
            Trade::best_trade_exact_out(
                &pairs,
                &t0.into(),
                &amount(t2, 1200),
                &BestTradeOptions::default()
            )
            .unwrap_err(),
            AmmError::NoRouteFound
        );
    }

    #[test]
    fn test_no_route_and_bad_options() {
        let (t0, t1, _, t3) = tokens();
        let pairs = vec![pair((&t0, 1000), (&t1, 1000))];

        assert_eq!(
            Trade::best_trade_exact_in(&pairs, &amount(t0.clone(), 100), &t3.clone().into(), &BestTradeOptions::default())
                .unwrap_err(),
            AmmError::NoRouteFound
        );
        assert_eq!(
            Trade::best_trade_exact_in(&[], &amount(t0.clone(), 100), &t1.clone().into(), &BestTradeOptions::default())
                .unwrap_err(),
            AmmError::NoRouteFound
        );

        let zero_hops = BestTradeOptions {
            max_hops: 0,
            ..BestTradeOptions::default()
        };
        assert!(matches!(
            Trade::best_trade_exact_in(&pairs, &amount(t0.clone(), 100), &t1.clone().into(), &zero_hops),
            Err(AmmError::InvalidSearchOptions { .. })
        ));

        assert!(matches!(
            Trade::best_trade_exact_in(&pairs, &amount(t0.clone(), 100), &t0.into(), &BestTradeOptions::default()),
            Err(AmmError::InvalidSearchOptions { .. })
        ));
    }

    #[test]
    fn test_iteration_budget_returns_partial_results() {
        let (t0, t1, t2, _) = tokens();
        let pairs = vec![
            pair((&t0, 1000), (&t2, 1100)),
            pair((&t0, 1000), (&t1, 1000)),
            pair((&t1, 1200), (&t2, 1000)),
        ];
        // only the first pair gets examined
        let tight = BestTradeOptions {
            max_iterations: 1,
            ..BestTradeOptions::default()
        };
        let trades =
            Trade::best_trade_exact_in(&pairs, &amount(t0.clone(), 100), &t2.clone().into(), &tight)
                .unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].route().path(), &[t0, t2]);
    }

    #[test]
    fn test_native_currency_at_both_ends() {
        let weth = chains::wrapped_native(ChainId::MAINNET).unwrap();
        let ether = chains::native_currency(ChainId::MAINNET).unwrap();
        let t0 = token(1);
        let pairs = vec![pair((&weth, 1000), (&t0, 1000))];

        let trades = Trade::best_trade_exact_in(
            &pairs,
            &amount(ether.clone(), 100),
            &t0.clone().into(),
            &BestTradeOptions::default(),
        )
        .unwrap();
        assert_eq!(trades[0].route().input(), &Currency::from(ether.clone()));
        assert_eq!(trades[0].output_amount().quotient(), BigInt::from(90));

        let trades = Trade::best_trade_exact_out(
            &pairs,
            &t0.into(),
            &amount(ether.clone(), 100),
            &BestTradeOptions::default(),
        )
        .unwrap();
        assert_eq!(trades[0].route().output(), &Currency::from(ether));
        assert_eq!(trades[0].input_amount().quotient(), BigInt::from(112));
    }

    #[test]
    fn test_is_trade_better() {
        let (t0, t1, t2, _) = tokens();
        let pairs = vec![
            pair((&t0, 1000), (&t1, 1000)),
            pair((&t0, 1000), (&t2, 1100)),
            pair((&t1, 1200), (&t2, 1000)),
        ];
        let trades = Trade::best_trade_exact_in(
            &pairs,
            &amount(t0.clone(), 100),
            &t2.clone().into(),
            &BestTradeOptions::default(),
        )
        .unwrap();
        let (direct, two_hop) = (&trades[0], &trades[1]);
        let threshold = Percent::from_bips(routing::BETTER_TRADE_LESS_HOPS_THRESHOLD_BIPS);

        assert!(is_trade_better(Some(two_hop), Some(direct), &threshold).unwrap());
        assert!(!is_trade_better(Some(direct), Some(two_hop), &Percent::zero()).unwrap());
        // a trade never beats itself
        assert!(!is_trade_better(Some(direct), Some(direct), &Percent::from_bips(200)).unwrap());
        assert!(is_trade_better(None, Some(direct), &threshold).unwrap());
        assert!(!is_trade_better(Some(direct), None, &threshold).unwrap());
        assert!(!is_trade_better(None, None, &threshold).unwrap());

        let exact_out = Trade::best_trade_exact_out(
            &pairs,
            &t0.into(),
            &amount(t2, 100),
            &BestTradeOptions::default(),
        )
        .unwrap();
        assert_eq!(
            is_trade_better(Some(direct), Some(&exact_out[0]), &threshold).unwrap_err(),
            AmmError::IncomparableTrades
        );
    }

    #[test]
    fn test_options_from_settings() {
        let settings = SearchSettings {
            max_hops: 2,
            max_num_results: 5,
            max_iterations: 10,
        };
        assert_eq!(
            BestTradeOptions::from(&settings),
            BestTradeOptions {
                max_num_results: 5,
                max_hops: 2,
                max_iterations: 10
            }
        );
        assert_eq!(
            BestTradeOptions::from(&SearchSettings::default()),
            BestTradeOptions::default()
        );
    }
}
