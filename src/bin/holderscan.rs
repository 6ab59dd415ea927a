use clap::Parser;
use console::style;
use holderscan::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = holderscan::run(cli).await {
        eprintln!("{} {err}", style("error:").red());
        std::process::exit(1);
    }
}
