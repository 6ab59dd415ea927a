use std::collections::HashMap;

use alloy::primitives::{
    utils::{format_ether, parse_ether},
    Address, U256,
};
use serde::{Deserialize, Serialize};

use crate::{
    chain::BlockTag,
    disk_storage::{DiskStorageInterface, FileFormat},
};

/// Memoized balance observations keyed by `"<address-lowercase>@<tag>"`,
/// valued as decimal ETH strings. Purely an accelerator: deleting the
/// backing file never changes results, only how many lookups the next run
/// has to issue.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(transparent)]
pub struct BalanceCache {
    entries: HashMap<String, String>,
}

impl DiskStorageInterface for BalanceCache {
    const FILE_NAME: &'static str = "balances";
    const FORMAT: FileFormat = FileFormat::JSON;
}

impl BalanceCache {
    pub fn key(address: Address, tag: BlockTag) -> String {
        format!("{}@{tag}", address.to_string().to_lowercase())
    }

    /// A stored value that no longer parses as a decimal ETH amount is
    /// treated as absent, so the caller refetches and overwrites it.
    pub fn get(&self, key: &str) -> Option<U256> {
        let raw = self.entries.get(key)?;
        parse_ether(raw).ok()
    }

    pub fn insert(&mut self, key: String, balance: U256) {
        self.entries.insert(key, format_ether(balance));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
