#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! ERC-6551 token-bound accounts.
//!
//! Every NFT can own a smart-contract account whose address is fixed by the
//! NFT's identity, the chain, the account implementation and the registry.
//! This crate derives that address off-chain, encodes the registry and account
//! calls, and submits them through a caller-supplied signer or wallet.
//!
//! # Modules
//!
//! - [`account`] - Creation code and `CREATE2` address derivation
//! - [`backend`] - [`RawSigner`] and [`WalletClient`] submission capabilities
//! - [`client`] - [`TokenboundClient`], binding a chain, a backend and overrides
//! - [`constants`] - Canonical contract addresses and proxy bytecode
//! - [`contracts`] - Solidity interfaces the SDK encodes against
//! - [`error`] - Error types
//! - [`transaction`] - Pure `createAccount` / `executeCall` builders
//! - [`transfer`] - ETH, ERC-20 and NFT transfers out of an account
//! - [`types`] - Parameter and result types, address and token ID parsing
//!
//! # Feature Flags
//!
//! - `telemetry` - Emits `tracing` events on client construction and submission
//! - `provider` - Alloy provider backends and on-chain reads ([`provider`])
//! - `full` - All of the above

pub mod account;
pub mod backend;
pub mod client;
pub mod constants;
pub mod contracts;
pub mod error;
#[cfg(feature = "provider")]
pub mod provider;
pub mod transaction;
pub mod transfer;
pub mod types;

pub use account::{compute_account, compute_account_with_salt, creation_code};
pub use backend::{RawSigner, SubmissionBackend, WalletClient};
pub use client::{TokenboundClient, TokenboundClientBuilder, TokenboundClientOptions};
pub use constants::{
    ChainId, DEFAULT_SALT, ERC6551_ACCOUNT_IMPLEMENTATION_ADDRESS, ERC6551_REGISTRY_ADDRESS,
};
pub use error::{BackendError, ConfigurationError, TokenboundError};
pub use transaction::{prepare_create_account, prepare_execute_call};
pub use transfer::{NftTransfer, TokenStandard};
pub use types::{
    AccountDeployment, AccountParams, ExecuteCallParams, ImplementationRef, PreparedTransaction,
    TokenIdentity, parse_address, parse_token_id,
};

#[cfg(feature = "provider")]
pub use provider::{ProviderSigner, RpcWalletClient};
