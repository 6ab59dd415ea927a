use std::fmt::Display;

use alloy::providers::{Provider, ProviderBuilder};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Network {
    pub name: String,
    pub name_alchemy: Option<String>,
    pub chain_id: u32,
    pub symbol: Option<String>,
    pub native_decimals: Option<u8>,
    pub rpc_url: Option<String>,
    pub rpc_alchemy: Option<String>,
    pub is_testnet: bool,
}

impl Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (chain_id: {})", self.name, self.chain_id)
    }
}

impl Network {
    pub fn from_name(network_name: &str) -> crate::Result<Network> {
        default_networks()
            .into_iter()
            .find(|n| {
                n.name.eq_ignore_ascii_case(network_name)
                    || n.name_alchemy
                        .as_ref()
                        .map(|name| name == network_name)
                        .unwrap_or(false)
            })
            .ok_or(crate::Error::NetworkNotFound(network_name.to_string()))
    }

    /// A direct `rpc_url` wins over the Alchemy template.
    pub fn get_rpc(&self, api_key: &str) -> crate::Result<String> {
        if let Some(rpc_url) = &self.rpc_url {
            Ok(rpc_url.clone())
        } else if let Some(rpc_alchemy) = &self.rpc_alchemy {
            Ok(rpc_alchemy.replace("{}", api_key))
        } else {
            Err(crate::Error::RpcUrlNotFound {
                network: self.name.clone(),
                chain_id: self.chain_id,
            })
        }
    }

    pub fn get_provider(&self, api_key: &str) -> crate::Result<impl Provider> {
        let rpc_url = self.get_rpc(api_key)?;

        rpc_url
            .parse()
            .map_err(|e| crate::Error::UrlParsingFailed(rpc_url, e))
            .map(|rpc_url| ProviderBuilder::new().connect_http(rpc_url))
    }

    /// Base URL of the Alchemy NFT API for this network.
    pub fn get_nft_api(&self, api_key: &str) -> crate::Result<String> {
        let name_alchemy = self
            .name_alchemy
            .as_ref()
            .ok_or(crate::Error::NftApiUnavailable(self.name.clone()))?;
        Ok(format!("https://{name_alchemy}.g.alchemy.com/nft/v3/{api_key}"))
    }

    pub fn with_rpc_override(mut self, rpc_url: Option<String>) -> Self {
        if rpc_url.is_some() {
            self.rpc_url = rpc_url;
        }
        self
    }
}

fn default_networks() -> Vec<Network> {
    vec![
        Network {
            name: "Mainnet".to_string(),
            name_alchemy: Some("eth-mainnet".to_string()),
            chain_id: 1,
            symbol: Some("ETH".to_string()),
            native_decimals: Some(18),
            rpc_url: None,
            rpc_alchemy: Some("https://eth-mainnet.g.alchemy.com/v2/{}".to_string()),
            is_testnet: false,
        },
        Network {
            name: "Sepolia".to_string(),
            name_alchemy: Some("eth-sepolia".to_string()),
            chain_id: 11155111,
            symbol: Some("sepoliaETH".to_string()),
            native_decimals: Some(18),
            rpc_url: None,
            rpc_alchemy: Some("https://eth-sepolia.g.alchemy.com/v2/{}".to_string()),
            is_testnet: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        let network = Network::from_name("Mainnet").unwrap();
        assert_eq!(network.chain_id, 1);

        let network = Network::from_name("eth-mainnet").unwrap();
        assert_eq!(network.name, "Mainnet");

        assert!(Network::from_name("gibberish").is_err());
    }

    #[test]
    fn test_get_rpc() {
        let network = Network::from_name("Mainnet").unwrap();
        assert_eq!(
            network.get_rpc("demo-key").unwrap(),
            "https://eth-mainnet.g.alchemy.com/v2/demo-key"
        );

        let network = network.with_rpc_override(Some("http://localhost:8545".to_string()));
        assert_eq!(network.get_rpc("demo-key").unwrap(), "http://localhost:8545");
    }

    #[test]
    fn test_get_nft_api() {
        let network = Network::from_name("Mainnet").unwrap();
        assert_eq!(
            network.get_nft_api("demo-key").unwrap(),
            "https://eth-mainnet.g.alchemy.com/nft/v3/demo-key"
        );
    }
}
