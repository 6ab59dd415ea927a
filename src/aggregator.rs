use alloy::primitives::{Address, U256};
use futures::future::join_all;
use indicatif::ProgressBar;

use crate::{
    cache::BalanceCache,
    chain::{BlockTag, ChainSource},
    scan_log,
};

/// Concurrently in-flight balance lookups per batch.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// How one holder's balance was obtained, or that it wasn't.
#[derive(Debug, PartialEq, Eq)]
enum Lookup {
    Cached(U256),
    Fetched(U256),
    Unavailable,
}

#[derive(Debug)]
pub struct AggregateOutcome {
    /// Sum of every observed balance, in wei.
    pub total: U256,
    pub cache_hits: usize,
    pub fetched: usize,
    /// Holders whose balance lookup failed this run. They contribute zero
    /// to `total` and are not cached, so a later run retries them.
    pub unavailable: Vec<Address>,
}

/// Owns the balance cache for the duration of one run. Batches run back to
/// back; lookups within a batch are issued together and joined before the
/// next batch starts. Cache writes land after the join, on the caller's
/// task, so the map is never mutated while lookups are in flight.
pub struct BalanceAggregator<'a, C> {
    chain: &'a C,
    cache: BalanceCache,
    batch_size: usize,
}

impl<'a, C: ChainSource> BalanceAggregator<'a, C> {
    pub fn new(chain: &'a C, cache: BalanceCache, batch_size: usize) -> Self {
        Self {
            chain,
            cache,
            batch_size: batch_size.max(1),
        }
    }

    pub async fn aggregate(
        &mut self,
        addresses: &[Address],
        tag: BlockTag,
        progress: &ProgressBar,
    ) -> AggregateOutcome {
        let mut outcome = AggregateOutcome {
            total: U256::ZERO,
            cache_hits: 0,
            fetched: 0,
            unavailable: Vec::new(),
        };

        for batch in addresses.chunks(self.batch_size) {
            let chain = self.chain;
            let cache = &self.cache;
            let lookups =
                join_all(batch.iter().map(|address| lookup(chain, cache, *address, tag))).await;

            for (address, lookup) in batch.iter().zip(lookups) {
                match lookup {
                    Lookup::Cached(balance) => {
                        outcome.cache_hits += 1;
                        outcome.total += balance;
                    }
                    Lookup::Fetched(balance) => {
                        self.cache.insert(BalanceCache::key(*address, tag), balance);
                        outcome.fetched += 1;
                        outcome.total += balance;
                    }
                    Lookup::Unavailable => outcome.unavailable.push(*address),
                }
            }

            progress.inc(batch.len() as u64);
        }

        outcome
    }

    pub fn cache(&self) -> &BalanceCache {
        &self.cache
    }

    pub fn into_cache(self) -> BalanceCache {
        self.cache
    }
}

async fn lookup<C: ChainSource>(
    chain: &C,
    cache: &BalanceCache,
    address: Address,
    tag: BlockTag,
) -> Lookup {
    let key = BalanceCache::key(address, tag);
    if let Some(balance) = cache.get(&key) {
        return Lookup::Cached(balance);
    }

    match chain.native_balance(address, tag).await {
        Ok(balance) => Lookup::Fetched(balance),
        Err(err) => {
            scan_log!("balance lookup failed for {address} at {tag}: {err}");
            Lookup::Unavailable
        }
    }
}
