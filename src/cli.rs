use alloy::primitives::Address;
use clap::Parser;

use crate::{aggregator::DEFAULT_BATCH_SIZE, config::Config, network::Network};

/// The BAYC collection, scanned when neither the flag nor the config file
/// names a contract.
const DEFAULT_CONTRACT: &str = "0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d";

#[derive(Parser, Debug)]
#[command(name = "holderscan", bin_name = "holderscan", version)]
#[command(about = "Aggregate ETH held by every current holder of an NFT collection at a point in time")]
pub struct Cli {
    /// Target moment as a unix epoch timestamp in seconds
    pub epoch: u64,

    /// NFT contract whose holder set is scanned
    #[arg(long)]
    pub contract: Option<Address>,

    /// Network preset name (e.g. "Mainnet", "Sepolia")
    #[arg(long)]
    pub network: Option<String>,

    /// Override the preset RPC URL
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Concurrently in-flight balance lookups per batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Alchemy API credential
    #[arg(long, env = "ALCHEMY_API_KEY", hide_env_values = true)]
    pub api_key: String,
}

impl Cli {
    pub fn contract(&self, config: &Config) -> Address {
        self.contract
            .or(config.default_contract)
            .unwrap_or_else(|| DEFAULT_CONTRACT.parse().unwrap())
    }

    pub fn network(&self, config: &Config) -> crate::Result<Network> {
        let name = self
            .network
            .as_deref()
            .or(config.default_network.as_deref())
            .unwrap_or("Mainnet");
        let rpc_override = self.rpc_url.clone().or_else(|| config.rpc_url.clone());
        Ok(Network::from_name(name)?.with_rpc_override(rpc_override))
    }

    pub fn batch_size(&self, config: &Config) -> usize {
        self.batch_size
            .or(config.batch_size)
            .unwrap_or(DEFAULT_BATCH_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_epoch_is_required_and_numeric() {
        assert!(Cli::try_parse_from(["holderscan", "--api-key", "k"]).is_err());
        assert!(Cli::try_parse_from(["holderscan", "soon", "--api-key", "k"]).is_err());
        assert!(Cli::try_parse_from(["holderscan", "-5", "--api-key", "k"]).is_err());

        let cli = parse(&["holderscan", "1700000000", "--api-key", "k"]);
        assert_eq!(cli.epoch, 1700000000);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&[
            "holderscan",
            "1700000000",
            "--api-key",
            "k",
            "--network",
            "Sepolia",
            "--batch-size",
            "10",
        ]);
        let config = Config {
            default_network: Some("Mainnet".to_string()),
            batch_size: Some(25),
            ..Default::default()
        };

        assert_eq!(cli.network(&config).unwrap().name, "Sepolia");
        assert_eq!(cli.batch_size(&config), 10);
    }

    #[test]
    fn test_defaults_fall_back_to_config_then_builtins() {
        let cli = parse(&["holderscan", "1700000000", "--api-key", "k"]);

        let config = Config::default();
        assert_eq!(cli.network(&config).unwrap().name, "Mainnet");
        assert_eq!(cli.batch_size(&config), DEFAULT_BATCH_SIZE);
        assert_eq!(
            cli.contract(&config),
            DEFAULT_CONTRACT.parse::<Address>().unwrap()
        );

        let config = Config {
            batch_size: Some(25),
            ..Default::default()
        };
        assert_eq!(cli.batch_size(&config), 25);
    }

    #[test]
    fn test_rpc_override_reaches_network() {
        let cli = parse(&[
            "holderscan",
            "1700000000",
            "--api-key",
            "k",
            "--rpc-url",
            "http://localhost:8545",
        ]);

        let network = cli.network(&Config::default()).unwrap();
        assert_eq!(network.get_rpc("k").unwrap(), "http://localhost:8545");
    }
}
