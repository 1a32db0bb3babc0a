//! `tokenbound` command-line tool.
//!
//! # Usage
//!
//! ```bash
//! # Compute an account address
//! tokenbound --chain-id 1 account \
//!     --token-contract 0xe7134a029cd2fd55f678d6809e64d0b6a0caddcb --token-id 9
//!
//! # Deploy it, signing locally
//! PRIVATE_KEY=0x... RPC_URL=https://... tokenbound --chain-id 1 create \
//!     --token-contract 0xe7134a029cd2fd55f678d6809e64d0b6a0caddcb --token-id 9
//! ```
//!
//! # Environment Variables
//!
//! - `CHAIN_ID`, `RPC_URL`, `PRIVATE_KEY`, `FROM_ADDRESS` - Fallbacks for the global flags
//! - `CONFIG` - Path to TOML configuration file (default: `tokenbound.toml`)
//! - `RUST_LOG` - Log level filter (default: `info`)
//!
//! A `.env` file in the working directory is loaded first.

use std::io::Write;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tokenbound_cli::{Cli, run};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries the JSON result.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let result = run(cli).await.and_then(|output| {
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &output)?;
        writeln!(stdout).map_err(serde_json::Error::io)?;
        Ok(())
    });

    if let Err(e) = result {
        tracing::error!("tokenbound failed: {e}");
        std::process::exit(1);
    }
}
