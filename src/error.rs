use std::path::PathBuf;

use alloy::primitives::Address;
use url::Url;

use crate::reqwest::{ReqwestErrorContext, ReqwestInnerError, ReqwestStage};

pub type Result<T> = std::result::Result<T, HolderscanError>;

#[derive(Debug, thiserror::Error)]
pub enum HolderscanError {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    #[error(transparent)]
    RpcError(#[from] alloy::transports::TransportError),

    #[error("Failed to parse Alchemy response: {0}.")]
    AlchemyResponse(&'static str),

    #[error("Address '{0}' is not a valid Ethereum address.")]
    InvalidAddress(String),

    #[error("Network not found: {0}.")]
    NetworkNotFound(String),

    #[error("Rpc URL not found for network {network} with chain id {chain_id}.")]
    RpcUrlNotFound { network: String, chain_id: u32 },

    #[error("Alchemy NFT API is not available for network {0}.")]
    NftApiUnavailable(String),

    #[error("Block {0} has no retrievable timestamp, cannot resolve the epoch against it.")]
    BlockTimestampMissing(u64),

    #[error("No holders found for contract {0}.")]
    NoHolders(Address),

    #[error("Failed to get base directories.")]
    BaseDirsFailed,

    #[error("Failed to create directory: {0:?}. (Error: {1:?})")]
    CreateDirAllFailed(PathBuf, std::io::Error),

    #[error("Failed to read the file: {0}. (Error: {1:?})")]
    FileReadFailed(PathBuf, std::io::Error),

    #[error("Failed to write to the file: {0}. (Error: {1:?})")]
    FileWriteFailed(PathBuf, std::io::Error),

    #[error("Parsing the toml file failed: {0}. (Error: {1:?})")]
    TomlParsingFailed(PathBuf, toml::de::Error),

    #[error("Formatting to toml format failed: {0}. (Error: {1:?})")]
    TomlFormattingFailed(String, toml::ser::Error),

    #[error("Parsing the json file failed: {0}. (Error: {1:?})")]
    JsonParsingFailed(PathBuf, serde_json::Error),

    #[error("Formatting to json format failed: {0}. (Error: {1:?})")]
    JsonFormattingFailed(String, serde_json::Error),

    #[error("Failed to parse URL: {0}. (Error: {1:?})")]
    UrlParsingFailed(String, url::ParseError),

    #[error("Please check your internet connection, the URL seems to be unreachable: {0}")]
    Internet(Url),

    #[error("Request '{url}' failed at stage '{stage:?}' (Error='{inner:?}')", url = context.url)]
    ReqwestFailed {
        stage: ReqwestStage,
        context: Box<ReqwestErrorContext>,
        inner: ReqwestInnerError,
    },

    #[error("Reqwest builder missing error context, this is a bug please report it.")]
    ReqwestErrorContextMissing,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
