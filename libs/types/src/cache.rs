//! Caller-owned token identity cache
//!
//! Token metadata arrives from token lists and RPC lookups; routing code
//! wants one shared [`Token`] per `(chain, address)`. The cache is an
//! explicit value the application creates and passes around, backed by
//! `DashMap` so a shared reference can be filled from several threads.
//!
//! Entries are never evicted. A token is a few dozen bytes and the set is
//! bounded by the token lists the caller loads; call [`TokenCache::clear`]
//! to drop everything when switching lists.

use crate::common::identifiers::{Address, ChainId};
use crate::currency::{BaseCurrency, Token};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Snapshot of cache counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenCacheStats {
    pub cached_tokens: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Token identities keyed by `(chain_id, address)`
#[derive(Debug, Default)]
pub struct TokenCache {
    tokens: DashMap<(ChainId, Address), Token>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached token, if present
    pub fn get(&self, chain_id: ChainId, address: &Address) -> Option<Token> {
        match self.tokens.get(&(chain_id, *address)) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Return the cached token, building and storing it on first use
    ///
    /// `build` runs at most once per key even under concurrent callers. It
    /// runs while the key's shard is locked and must not touch the cache.
    pub fn get_or_insert_with<F>(&self, chain_id: ChainId, address: Address, build: F) -> Token
    where
        F: FnOnce() -> Token,
    {
        match self.tokens.entry((chain_id, address)) {
            Entry::Occupied(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(chain_id = chain_id.get(), %address, "caching token");
                entry.insert(build()).value().clone()
            }
        }
    }

    /// Store `token`, replacing any entry with the same identity
    ///
    /// Returns the previous entry, which may carry different metadata.
    pub fn insert(&self, token: Token) -> Option<Token> {
        self.tokens.insert((token.chain_id(), token.address()), token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn clear(&self) {
        self.tokens.clear();
    }

    pub fn stats(&self) -> TokenCacheStats {
        TokenCacheStats {
            cached_tokens: self.tokens.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
