//! cardset - fetch card set metadata through a local disk cache
//!
//! Looks sets up in the cache file, refreshing expired entries from the remote
//! catalog, and prints them as JSON.

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use futures::future::try_join_all;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cardset_cache::cli::{Cli, Command};
use cardset_cache::client::CardSetClient;

/// Logs go to stderr so stdout stays machine-readable
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(client: &CardSetClient, command: &Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Fetch {
            set_ids,
            force,
            pretty,
        } => {
            let sets = try_join_all(set_ids.iter().map(|&set_id| async move {
                client
                    .get_card_set(set_id, *force)
                    .await
                    .map(|set| (set_id.to_string(), set))
            }))
            .await?;

            let output: serde_json::Map<String, serde_json::Value> = sets.into_iter().collect();
            let text = if *pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{}", text);
        }
        Command::Invalidate { set_ids } => {
            for &set_id in set_ids {
                if client.invalidate(set_id) {
                    info!(set_id, "invalidated");
                }
            }
        }
        Command::Clear => client.clear_cache(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let client = match CardSetClient::new(cli.client_config()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = run(&client, &cli.command).await;

    // Flush whatever was fetched, even if a later set failed
    client.release();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
