use std::fmt::Display;

use alloy::{
    eips::{BlockId, BlockNumberOrTag},
    primitives::{Address, U256},
    providers::Provider,
};

/// Block height or the symbolic chain head. The `Display` form is used
/// verbatim as the tag half of cache keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockTag {
    Height(u64),
    Latest,
}

impl Display for BlockTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockTag::Height(height) => write!(f, "{height}"),
            BlockTag::Latest => write!(f, "latest"),
        }
    }
}

impl From<BlockTag> for BlockId {
    fn from(tag: BlockTag) -> Self {
        match tag {
            BlockTag::Height(height) => BlockId::number(height),
            BlockTag::Latest => BlockId::latest(),
        }
    }
}

/// Read-only view of the chain data the tool needs.
#[allow(async_fn_in_trait)]
pub trait ChainSource {
    async fn latest_height(&self) -> crate::Result<u64>;

    /// `None` when the block or its timestamp cannot be retrieved.
    async fn block_timestamp(&self, height: u64) -> crate::Result<Option<u64>>;

    async fn native_balance(&self, address: Address, tag: BlockTag) -> crate::Result<U256>;
}

pub struct RpcChain<P> {
    provider: P,
}

impl<P: Provider> RpcChain<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: Provider> ChainSource for RpcChain<P> {
    async fn latest_height(&self) -> crate::Result<u64> {
        Ok(self.provider.get_block_number().await?)
    }

    async fn block_timestamp(&self, height: u64) -> crate::Result<Option<u64>> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(height))
            .await?;
        Ok(block.map(|block| block.header.timestamp))
    }

    async fn native_balance(&self, address: Address, tag: BlockTag) -> crate::Result<U256> {
        Ok(self
            .provider
            .get_balance(address)
            .block_id(tag.into())
            .await?)
    }
}

pub trait StringExt {
    fn parse_as_address(&self) -> crate::Result<Address>;
}

impl StringExt for str {
    fn parse_as_address(&self) -> crate::Result<Address> {
        self.parse::<Address>()
            .map_err(|_| crate::Error::InvalidAddress(self.to_string()))
    }
}
