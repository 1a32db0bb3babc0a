//! Error types for the command-line tool.

use std::path::PathBuf;

use tokenbound::TokenboundError;
use tokenbound::provider::ProviderError;

/// Errors that can occur while running a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// SDK error (configuration, parsing, backend failure).
    #[error(transparent)]
    Tokenbound(#[from] TokenboundError),

    /// On-chain read failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Config file exists but could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ReadConfig {
        /// Config file path.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`CliConfig`](crate::config::CliConfig).
    #[error("invalid config {}: {source}", path.display())]
    ParseConfig {
        /// Config file path.
        path: PathBuf,
        /// Parser failure.
        #[source]
        source: toml::de::Error,
    },

    /// A `$VAR` reference in the config was not set in the environment.
    #[error("{field} references an unset environment variable: {value}")]
    UnresolvedVariable {
        /// Config field name.
        field: &'static str,
        /// The unexpanded value.
        value: String,
    },

    /// Private key is not a valid secp256k1 key.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(#[source] alloy_signer_local::LocalSignerError),

    /// A command that talks to a node was run without an RPC URL.
    #[error("`{0}` needs --rpc-url or RPC_URL")]
    MissingRpcUrl(&'static str),

    /// Output could not be serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
