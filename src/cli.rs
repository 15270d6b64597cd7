//! Command-line interface parsing for the cardset binary
//!
//! Flags map onto [`ClientConfig`]; each subcommand maps onto one client operation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::catalog::SetId;
use crate::config::ClientConfig;

/// Fetch card set metadata through a local disk cache
#[derive(Parser, Debug)]
#[command(name = "cardset")]
#[command(about = "Fetch card set metadata through a local disk cache")]
#[command(version)]
pub struct Cli {
    /// Base URL of the card set catalog
    #[arg(long, value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Cache file to use instead of the one in the temporary directory
    #[arg(long, value_name = "PATH", global = true)]
    pub cache_file: Option<PathBuf>,

    /// Timeout for each HTTP request
    #[arg(
        long,
        value_name = "SECONDS",
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print sets as a JSON object keyed by set id
    Fetch {
        #[arg(required = true, value_name = "SET_ID")]
        set_ids: Vec<SetId>,

        /// Ignore cached entries and query the catalog
        #[arg(long)]
        force: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Remove sets from the cache
    Invalidate {
        #[arg(required = true, value_name = "SET_ID")]
        set_ids: Vec<SetId>,
    },
    /// Remove every set from the cache
    Clear,
}

impl Cli {
    /// Client configuration with the flags applied over the defaults
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(api_url) = &self.api_url {
            config = config.with_api_base_url(api_url.clone());
        }
        if let Some(cache_file) = &self.cache_file {
            config = config.with_cache_path(cache_file.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        config
    }
}
