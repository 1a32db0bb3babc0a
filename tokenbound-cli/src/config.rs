//! Optional TOML configuration.
//!
//! String values may reference environment variables with `$VAR` or `${VAR}`
//! syntax. Command-line flags and their environment fallbacks take precedence
//! over anything read from the file.
//!
//! # Example Configuration
//!
//! ```toml
//! chain_id = 11155111
//! rpc_url = "https://ethereum-sepolia-rpc.publicnode.com"
//! private_key = "$TOKENBOUND_KEY"
//! # from = "0x..."            # node-managed account instead of a local key
//! # implementation = "0x..."
//! # registry = "0x..."
//! ```

use std::fmt;
use std::path::Path;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tokenbound::{ChainId, ImplementationRef};
use url::Url;

use crate::error::CliError;

/// Settings shared by every command, from a file or from flags.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Target chain.
    pub chain_id: Option<ChainId>,
    /// JSON-RPC endpoint for submitting and reading.
    pub rpc_url: Option<Url>,
    /// Hex private key for local signing.
    pub private_key: Option<String>,
    /// Account managed by the node, used with `eth_sendTransaction`.
    pub from: Option<Address>,
    /// Account implementation override.
    pub implementation: Option<Address>,
    /// Registry override.
    pub registry: Option<Address>,
}

impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("chain_id", &self.chain_id)
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("from", &self.from)
            .field("implementation", &self.implementation)
            .field("registry", &self.registry)
            .finish()
    }
}

impl CliConfig {
    /// Loads configuration from `path`.
    ///
    /// A missing file yields an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::ReadConfig`] if the file exists but cannot be read,
    /// and [`CliError::ParseConfig`] if it is not valid.
    pub fn load_from(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file; using flags and environment only");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| CliError::ParseConfig {
            path: path.to_owned(),
            source,
        })?;
        tracing::debug!(path = %path.display(), ?config, "Loaded config file");
        Ok(config)
    }

    /// Parses TOML after expanding environment variable references.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the expanded text is not a valid config.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(&expand_env_vars(content))
    }

    /// Fills every unset field of `self` from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            chain_id: self.chain_id.or(fallback.chain_id),
            rpc_url: self.rpc_url.or(fallback.rpc_url),
            private_key: self.private_key.or(fallback.private_key),
            from: self.from.or(fallback.from),
            implementation: self.implementation.or(fallback.implementation),
            registry: self.registry.or(fallback.registry),
        }
    }

    /// Client-wide contract overrides.
    #[must_use]
    pub const fn contracts(&self) -> ImplementationRef {
        ImplementationRef::new(self.implementation, self.registry)
    }

    /// The private key, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::UnresolvedVariable`] if the key is still an
    /// unexpanded `$VAR` reference.
    pub fn private_key(&self) -> Result<Option<&str>, CliError> {
        match self.private_key.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(key) if key.starts_with('$') => Err(CliError::UnresolvedVariable {
                field: "private_key",
                value: key.to_owned(),
            }),
            Some(key) => Ok(Some(key)),
        }
    }
}

/// Expands `$VAR` and `${VAR}` from the process environment.
///
/// Unresolved variables are left as-is.
fn expand_env_vars(input: &str) -> String {
    expand_with(input, |name| std::env::var(name).ok())
}

fn expand_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }
        let braced = chars.next_if_eq(&'{').is_some();
        let mut name = String::new();
        let mut closed = false;
        while let Some(&c) = chars.peek() {
            if braced && c == '}' {
                chars.next();
                closed = true;
                break;
            }
            if !braced && !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }
            name.push(c);
            chars.next();
        }

        match lookup(&name).filter(|_| !name.is_empty()) {
            Some(value) => out.push_str(&value),
            None => {
                out.push('$');
                if braced {
                    out.push('{');
                }
                out.push_str(&name);
                if closed {
                    out.push('}');
                }
            }
        }
    }

    out
}
