//! Command-line surface and command dispatch.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use alloy_network::EthereumWallet;
use alloy_primitives::{Address, Bytes, U256};
use alloy_provider::ProviderBuilder;
use alloy_signer_local::PrivateKeySigner;
use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};
use tokenbound::provider::{account_token, is_account_deployed};
use tokenbound::{
    AccountParams, ChainId, ExecuteCallParams, ImplementationRef, ProviderSigner, RpcWalletClient,
    TokenboundClient, TokenboundClientOptions, parse_address, parse_token_id,
};
use url::Url;

use crate::config::CliConfig;
use crate::error::CliError;

/// Compute, deploy and drive ERC-6551 token-bound accounts.
#[derive(Debug, Parser)]
#[command(name = "tokenbound")]
#[command(version)]
pub struct Cli {
    /// Options shared by every command.
    #[command(flatten)]
    pub global: GlobalArgs,
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command. Flags override the config file.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Target chain ID.
    #[arg(long, env = "CHAIN_ID", global = true)]
    pub chain_id: Option<ChainId>,
    /// JSON-RPC endpoint.
    #[arg(long, env = "RPC_URL", global = true)]
    pub rpc_url: Option<Url>,
    /// Hex private key for local signing.
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true, global = true)]
    pub private_key: Option<String>,
    /// Node-managed sender, submitted with `eth_sendTransaction`.
    #[arg(long, env = "FROM_ADDRESS", value_parser = parse_address, global = true)]
    pub from: Option<Address>,
    /// TOML config file.
    #[arg(long, env = "CONFIG", default_value = "tokenbound.toml", global = true)]
    pub config: PathBuf,
    /// Account implementation override.
    #[arg(long, value_parser = parse_address, global = true)]
    pub implementation: Option<Address>,
    /// Registry override.
    #[arg(long, value_parser = parse_address, global = true)]
    pub registry: Option<Address>,
}

impl GlobalArgs {
    fn into_parts(self) -> (PathBuf, CliConfig) {
        let flags = CliConfig {
            chain_id: self.chain_id,
            rpc_url: self.rpc_url,
            private_key: self.private_key,
            from: self.from,
            implementation: self.implementation,
            registry: self.registry,
        };
        (self.config, flags)
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the account address for an NFT
    Account(TokenArgs),
    /// Print the registry creation code for an NFT's account
    CreationCode {
        /// NFT identity.
        #[command(flatten)]
        token: TokenArgs,
        /// CREATE2 salt.
        #[arg(long, default_value = "0", value_parser = parse_amount)]
        salt: U256,
    },
    /// Print the unsent `createAccount` transaction
    PrepareCreate(TokenArgs),
    /// Print the unsent `executeCall` transaction
    PrepareExecute(ExecuteArgs),
    /// Deploy an NFT's account
    Create(TokenArgs),
    /// Execute a call through an account
    Execute(ExecuteArgs),
    /// Send ETH out of an account
    TransferEth {
        /// Token-bound account holding the ETH.
        #[arg(long, value_parser = parse_address)]
        account: Address,
        /// Recipient.
        #[arg(long, value_parser = parse_address)]
        to: Address,
        /// Amount in wei.
        #[arg(long, value_parser = parse_amount)]
        amount: U256,
    },
    /// Check whether an account is deployed and which NFT owns it
    Deployed {
        /// Account address.
        #[arg(value_parser = parse_address)]
        account: Address,
    },
}

/// An NFT, identified by contract and token ID.
#[derive(Debug, Clone, Copy, Args)]
pub struct TokenArgs {
    /// NFT contract address.
    #[arg(long, value_parser = parse_address)]
    pub token_contract: Address,
    /// Token ID, decimal or `0x` hex.
    #[arg(long, value_parser = parse_token_id)]
    pub token_id: U256,
}

impl From<TokenArgs> for AccountParams {
    fn from(args: TokenArgs) -> Self {
        Self::new(args.token_contract, args.token_id)
    }
}

/// A call made through a token-bound account.
#[derive(Debug, Clone, Args)]
pub struct ExecuteArgs {
    /// Token-bound account to call through.
    #[arg(long, value_parser = parse_address)]
    pub account: Address,
    /// Call target.
    #[arg(long, value_parser = parse_address)]
    pub to: Address,
    /// Wei forwarded to the target.
    #[arg(long, default_value = "0", value_parser = parse_amount)]
    pub value: U256,
    /// Hex calldata.
    #[arg(long, default_value = "0x")]
    pub data: Bytes,
}

impl From<ExecuteArgs> for ExecuteCallParams {
    fn from(args: ExecuteArgs) -> Self {
        Self {
            account: args.account,
            to: args.to,
            value: args.value,
            data: args.data,
        }
    }
}

fn parse_amount(input: &str) -> Result<U256, String> {
    U256::from_str(input.trim()).map_err(|e| format!("invalid amount {input:?}: {e}"))
}

/// Runs a parsed command and returns its JSON output.
///
/// # Errors
///
/// Returns [`CliError`] if configuration is invalid, a backend rejects the
/// transaction, or an RPC call fails.
pub async fn run(cli: Cli) -> Result<Value, CliError> {
    let (path, flags) = cli.global.into_parts();
    let config = flags.or(CliConfig::load_from(&path)?);

    match cli.command {
        Command::Account(token) => {
            let client = offline_client(&config)?;
            let account = client.get_account(&token.into());
            Ok(json!({
                "account": account,
                "chainId": client.chain_id(),
                "tokenContract": token.token_contract,
                "tokenId": token.token_id.to_string(),
            }))
        }
        Command::CreationCode { token, salt } => {
            let client = offline_client(&config)?;
            let contracts = client.resolve_contracts(ImplementationRef::default());
            let code = client.get_creation_code(
                contracts.implementation_or_default(),
                client.chain_id(),
                token.token_contract,
                token.token_id,
                salt,
            );
            Ok(json!({ "creationCode": code }))
        }
        Command::PrepareCreate(token) => {
            let client = offline_client(&config)?;
            Ok(serde_json::to_value(client.prepare_create_account(&token.into()))?)
        }
        Command::PrepareExecute(args) => {
            let client = offline_client(&config)?;
            Ok(serde_json::to_value(client.prepare_execute_call(&args.into()))?)
        }
        Command::Create(token) => {
            let client = submitting_client(&config, "create")?;
            let deployment = client.deploy_account(&token.into()).await?;
            tracing::info!(
                account = %deployment.account,
                chain_id = deployment.chain_id,
                hash = %deployment.transaction_hash,
                "Account creation submitted"
            );
            Ok(serde_json::to_value(deployment)?)
        }
        Command::Execute(args) => {
            let client = submitting_client(&config, "execute")?;
            let hash = client.execute_call(&args.into()).await?;
            tracing::info!(%hash, "Call submitted");
            Ok(json!({ "transactionHash": hash }))
        }
        Command::TransferEth {
            account,
            to,
            amount,
        } => {
            let client = submitting_client(&config, "transfer-eth")?;
            let hash = client.transfer_eth(account, to, amount).await?;
            tracing::info!(%account, %to, %amount, %hash, "Transfer submitted");
            Ok(json!({ "transactionHash": hash }))
        }
        Command::Deployed { account } => {
            let rpc_url = config.rpc_url.ok_or(CliError::MissingRpcUrl("deployed"))?;
            let provider = ProviderBuilder::default().connect_http(rpc_url);
            let deployed = is_account_deployed(&provider, account).await?;
            if !deployed {
                return Ok(json!({ "account": account, "deployed": false }));
            }
            let owner = account_token(&provider, account).await?;
            Ok(json!({
                "account": account,
                "deployed": true,
                "token": {
                    "chainId": owner.chain_id.to_string(),
                    "tokenContract": owner.token.token_contract,
                    "tokenId": owner.token.token_id.to_string(),
                },
            }))
        }
    }
}

fn client_options(config: &CliConfig) -> TokenboundClientOptions {
    TokenboundClientOptions {
        chain_id: config.chain_id,
        custom_implementation: Some(config.contracts()),
        ..TokenboundClientOptions::default()
    }
}

/// A client with no backend, for commands that never touch the network.
fn offline_client(config: &CliConfig) -> Result<TokenboundClient, CliError> {
    Ok(TokenboundClient::new(client_options(config))?)
}

/// A client bound to the configured key or node-managed sender.
///
/// Both may be configured; the SDK then rejects the conflict.
fn submitting_client(
    config: &CliConfig,
    command: &'static str,
) -> Result<TokenboundClient, CliError> {
    let mut options = client_options(config);
    let private_key = config.private_key()?;
    if private_key.is_none() && config.from.is_none() {
        return Ok(TokenboundClient::new(options)?);
    }

    let rpc_url = config
        .rpc_url
        .clone()
        .ok_or(CliError::MissingRpcUrl(command))?;

    if let Some(key) = private_key {
        let signer: PrivateKeySigner = key.parse().map_err(CliError::InvalidPrivateKey)?;
        tracing::info!(signer = %signer.address(), %rpc_url, "Signing locally");
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(rpc_url.clone());
        options.signer = Some(Arc::new(ProviderSigner::new(provider)));
    }
    if let Some(from) = config.from {
        tracing::info!(%from, %rpc_url, "Submitting through node-managed account");
        // The node fills gas and nonce for `eth_sendTransaction`.
        let provider = ProviderBuilder::default().connect_http(rpc_url);
        options.wallet_client = Some(Arc::new(RpcWalletClient::new(provider, from)));
    }

    Ok(TokenboundClient::new(options)?)
}
