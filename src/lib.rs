pub mod aggregator;
pub mod alchemy;
pub mod cache;
pub mod chain;
pub mod cli;
pub mod config;
pub mod disk_storage;
pub mod error;
pub mod log;
pub mod network;
pub mod reqwest;
pub mod resolver;

pub use error::{HolderscanError as Error, Result};
pub use reqwest::Reqwest;

use alloy::primitives::utils::format_ether;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    aggregator::BalanceAggregator,
    alchemy::Alchemy,
    cache::BalanceCache,
    chain::{BlockTag, RpcChain},
    cli::Cli,
    config::Config,
    disk_storage::DiskStorageInterface,
};

pub async fn run(cli: Cli) -> crate::Result<()> {
    let config = Config::load()?;

    let network = cli.network(&config)?;
    let contract = cli.contract(&config);
    let batch_size = cli.batch_size(&config);

    let cache = BalanceCache::load()?;

    let chain = RpcChain::new(network.get_provider(&cli.api_key)?);

    println!("Resolving block for epoch: {}...", cli.epoch);
    let height = resolver::resolve_height(&chain, cli.epoch).await?;
    println!("Using block: {height}");

    println!("Fetching holders of {contract}...");
    let holders = Alchemy::get_owners_for_contract(&network, &cli.api_key, contract).await?;
    if holders.is_empty() {
        return Err(crate::Error::NoHolders(contract));
    }

    println!("Fetching balances...");
    let mut aggregator = BalanceAggregator::new(&chain, cache, batch_size);

    let progress = ProgressBar::new(holders.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len}")
            .expect("invalid progress bar template")
            .progress_chars("#>-"),
    );
    let outcome = aggregator
        .aggregate(&holders, BlockTag::Height(height), &progress)
        .await;
    progress.finish();

    aggregator.into_cache().save()?;

    let symbol = network.symbol.as_deref().unwrap_or("ETH").to_string();
    println!();
    println!("Result:");
    println!("  Epoch time : {}", cli.epoch);
    println!("  Block      : {height}");
    println!("  Holders    : {}", holders.len());
    println!("  Total      : {} {symbol}", format_ether(outcome.total));
    if !outcome.unavailable.is_empty() {
        println!(
            "  Warning    : {} balance lookups failed and count as zero, the total is an undercount. Rerun to retry them.",
            outcome.unavailable.len()
        );
    }

    Ok(())
}
