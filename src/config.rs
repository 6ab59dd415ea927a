use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::disk_storage::{DiskStorageInterface, FileFormat};

/// Optional on-disk defaults. Anything set here is overridden by the
/// matching CLI flag; the Alchemy credential is never read from disk.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Config {
    pub default_contract: Option<Address>,
    pub default_network: Option<String>,
    pub rpc_url: Option<String>,
    pub batch_size: Option<usize>,
}

impl DiskStorageInterface for Config {
    const FILE_NAME: &'static str = "config";
    const FORMAT: FileFormat = FileFormat::TOML;
}
