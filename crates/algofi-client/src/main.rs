//! Algofi state snapshot.
//!
//! Loads every configured program, prints the priced asset book as JSON
//! and, when asked, one user's positions.

use algofi_client::{AlgofiClient, ClientConfig};
use algofi_core::{Address, Network};
use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Print a snapshot of Algofi on-chain state.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via ALGOFI_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Network to use when no configuration file is given
    #[arg(short, long, default_value = "mainnet")]
    network: Network,

    /// Also print this account's positions
    #[arg(short, long)]
    user: Option<Address>,

    /// Print prometheus metrics after loading
    #[arg(long)]
    metrics: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    algofi_telemetry::init_logging()?;

    info!("Starting algofi-snapshot v{}", env!("CARGO_PKG_VERSION"));

    // CLI arg > ALGOFI_CONFIG env var > built-in network tables
    let config = match args
        .config
        .or_else(|| std::env::var(algofi_client::config::CONFIG_ENV).ok())
    {
        Some(path) => {
            info!(config_path = %path, "Loading configuration");
            ClientConfig::from_file(&path)?
        }
        None => ClientConfig::for_network(args.network),
    };
    info!(network = %config.network, algod_url = %config.algod_url(), "Configuration loaded");

    let client = AlgofiClient::from_config(&config)?;
    let summary = client.load_state().await?;
    info!(?summary, "Snapshot loaded");

    println!("{}", serde_json::to_string_pretty(client.assets().as_ref())?);

    if let Some(address) = args.user {
        let user = client.get_user(address).await?;
        for (app_id, state) in &user.staking.states {
            println!(
                "pool {app_id}: staked {} boost {} claimable {:?}",
                state.total_staked,
                state.boost_multiplier,
                state.claimable_indices()
            );
        }
        if let Some(escrow) = user
            .governance
            .as_ref()
            .and_then(|g| g.voting_escrow.as_ref())
        {
            println!(
                "voting escrow: locked {} vebank {} until {}",
                escrow.amount_locked,
                escrow.amount_vebank,
                escrow.lock_end_time()
            );
        }
        match user.staked_usd(&client.network().staking, &client.assets()) {
            Some(usd) => println!("staked usd: {usd}"),
            None => println!("staked usd: overflow"),
        }
    }

    if args.metrics {
        print!("{}", algofi_telemetry::Metrics::gather_text()?);
    }

    Ok(())
}
