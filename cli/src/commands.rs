//! CLI command definitions

use clap::{Parser, Subcommand};
use mapsync_domain::Environment;
use std::path::PathBuf;

/// CLI arguments for mapsync
#[derive(Parser, Debug)]
#[command(name = "mapsync")]
#[command(author, version, about = "Map contract CLI interface")]
#[command(long_about = r#"
Read, write, and sync dynamic configuration parameters in a Map contract.

The sync command fetches time-versioned configuration documents (the
service-specific document first, then the shared common document), decides
which declared values are currently in effect, and writes only the values
that differ from what the store already holds.

The JSON-RPC endpoint is taken from MAPSYNC_RPC_URL or a config file
(./mapsync.toml or ~/.config/mapsync/config.toml).

Example:
  mapsync 0x36F4b3bC0E50b9AC60BDC2Bb46a1b2d78F50C9F5 get --key DYNAMIC_MAX_JOBS
  mapsync 0x36F4b3bC0E50b9AC60BDC2Bb46a1b2d78F50C9F5 sync --service validator --env prod
"#)]
pub struct Cli {
    /// The address of the deployed Map contract
    pub contract_address: String,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store a value in the Map contract
    Set {
        /// The key to store the value under
        #[arg(long)]
        key: String,
        /// The value to store (empty deletes the key)
        #[arg(long)]
        value: String,
    },
    /// Read a value from the Map contract
    Get {
        /// The key to look up in the Map contract
        #[arg(long)]
        key: String,
    },
    /// Sync dynamic configuration documents into the Map contract
    Sync {
        /// Service whose configuration document to apply first
        #[arg(long)]
        service: String,
        /// Deployment environment the documents target
        #[arg(long)]
        env: Environment,
    },
}
