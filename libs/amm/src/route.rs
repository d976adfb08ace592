//! Validated chains of pairs
//!
//! A [`Route`] walks from an input currency to an output currency through
//! one or more pairs. Native currency at either end is routed through its
//! wrapped token; the `path` always holds the ERC-20 tokens the router
//! contract sees.

use crate::error::{AmmError, RouteError};
use crate::pair::Pair;
use swapkit_types::{BaseCurrency, ChainId, Currency, Price, Token};

/// Ordered, connected list of pairs between two currencies
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pairs: Vec<Pair>,
    path: Vec<Token>,
    input: Currency,
    output: Currency,
}

impl Route {
    /// Validate `pairs` and build the token path from `input` to `output`
    pub fn new(pairs: Vec<Pair>, input: Currency, output: Currency) -> Result<Self, AmmError> {
        let (first, last) = match (pairs.first(), pairs.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(RouteError::Empty.into()),
        };

        let chain_id = first.chain_id();
        for found in pairs
            .iter()
            .map(Pair::chain_id)
            .chain([input.chain_id(), output.chain_id()])
        {
            if found != chain_id {
                return Err(RouteError::ChainMismatch {
                    expected: chain_id,
                    found,
                }
                .into());
            }
        }

        let wrapped_input = input.wrapped();
        let wrapped_output = output.wrapped();
        if !first.involves_token(wrapped_input) {
            return Err(RouteError::InputNotInFirstPair {
                address: wrapped_input.address(),
            }
            .into());
        }
        if !last.involves_token(wrapped_output) {
            return Err(RouteError::OutputNotInLastPair {
                address: wrapped_output.address(),
            }
            .into());
        }

        let mut path = Vec::with_capacity(pairs.len() + 1);
        path.push(wrapped_input.clone());
        for (index, pair) in pairs.iter().enumerate() {
            let current = &path[index];
            if !pair.involves_token(current) {
                return Err(RouteError::Disconnected {
                    index,
                    address: current.address(),
                }
                .into());
            }
            let next = pair.other_token(current)?.clone();
            path.push(next);
        }

        if let Some(end) = path.last() {
            if !end.equals(wrapped_output) {
                return Err(RouteError::PathEndMismatch {
                    expected: wrapped_output.address(),
                    found: end.address(),
                }
                .into());
            }
        }

        Ok(Self {
            pairs,
            path,
            input,
            output,
        })
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Tokens visited, input first; one longer than [`Route::pairs`]
    pub fn path(&self) -> &[Token] {
        &self.path
    }

    pub fn input(&self) -> &Currency {
        &self.input
    }

    pub fn output(&self) -> &Currency {
        &self.output
    }

    pub fn chain_id(&self) -> ChainId {
        self.pairs[0].chain_id()
    }

    pub fn hops(&self) -> usize {
        self.pairs.len()
    }

    /// Spot price of the whole route: each hop's `reserve_out / reserve_in`
    /// chained together
    pub fn mid_price(&self) -> Result<Price, AmmError> {
        let mut hops = self.pairs.iter().zip(&self.path);
        let (first_pair, first_token) = hops.next().ok_or(RouteError::Empty)?;
        let mut price = first_pair.price_of(first_token)?;
        for (pair, token) in hops {
            price = price.multiply(&pair.price_of(token)?)?;
        }

        Ok(Price::from_fraction(
            self.input.clone(),
            self.output.clone(),
            price.raw().clone(),
        ))
    }
}
