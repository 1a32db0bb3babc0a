//! Alloy-backed submission backends and on-chain reads.
//!
//! - [`ProviderSigner`] adapts any [`Provider`] as a [`RawSigner`]. Build the
//!   provider with a wallet filler so that transactions are signed locally and
//!   broadcast with `eth_sendRawTransaction`.
//! - [`RpcWalletClient`] adapts a provider connected to a node or wallet that
//!   manages keys itself. It sets `from` and submits with `eth_sendTransaction`.
//! - [`is_account_deployed`], [`account_token`] and [`registry_account`] read
//!   account state that off-chain derivation cannot see.

use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::TransactionRequest;
use alloy_sol_types::SolCall;
use alloy_transport::TransportError;

use crate::backend::{BoxFuture, RawSigner, WalletClient};
use crate::constants::{ChainId, DEFAULT_SALT};
use crate::contracts::{IERC6551Account, IERC6551Registry};
use crate::error::BackendError;
use crate::types::{ImplementationRef, PreparedTransaction, TokenIdentity};

/// Errors from the on-chain read helpers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// RPC transport error.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The contract returned data that does not match its ABI.
    #[error("malformed {method} return data: {source}")]
    Decode {
        /// Contract function that was called.
        method: &'static str,
        /// Decoder failure.
        #[source]
        source: alloy_sol_types::Error,
    },
}

impl From<PreparedTransaction> for TransactionRequest {
    fn from(tx: PreparedTransaction) -> Self {
        Self::default()
            .to(tx.to)
            .value(tx.value)
            .input(tx.data.into())
    }
}

/// [`RawSigner`] over an alloy provider.
#[derive(Debug, Clone)]
pub struct ProviderSigner<P> {
    provider: P,
}

impl<P: Provider> ProviderSigner<P> {
    /// Wraps `provider`, which should carry a wallet filler.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The wrapped provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: Provider> RawSigner for ProviderSigner<P> {
    fn chain_id(&self) -> BoxFuture<'_, Result<ChainId, BackendError>> {
        Box::pin(async move {
            self.provider
                .get_chain_id()
                .await
                .map_err(BackendError::from)
        })
    }

    fn send_transaction(
        &self,
        tx: PreparedTransaction,
    ) -> BoxFuture<'_, Result<TxHash, BackendError>> {
        Box::pin(async move {
            #[cfg(feature = "telemetry")]
            tracing::debug!(to = %tx.to, value = %tx.value, "Broadcasting signed transaction");
            let pending = self
                .provider
                .send_transaction(tx.into())
                .await
                .map_err(BackendError::from)?;
            Ok(*pending.tx_hash())
        })
    }
}

/// [`WalletClient`] over an alloy provider whose node holds the key for `account`.
#[derive(Debug, Clone)]
pub struct RpcWalletClient<P> {
    provider: P,
    account: Address,
}

impl<P: Provider> RpcWalletClient<P> {
    /// Wraps `provider`, sending from `account`.
    pub const fn new(provider: P, account: Address) -> Self {
        Self { provider, account }
    }

    /// The sending account.
    pub const fn account(&self) -> Address {
        self.account
    }
}

impl<P: Provider> WalletClient for RpcWalletClient<P> {
    fn chain_id(&self) -> BoxFuture<'_, Result<ChainId, BackendError>> {
        Box::pin(async move {
            self.provider
                .get_chain_id()
                .await
                .map_err(BackendError::from)
        })
    }

    fn send_transaction(
        &self,
        tx: PreparedTransaction,
    ) -> BoxFuture<'_, Result<TxHash, BackendError>> {
        Box::pin(async move {
            #[cfg(feature = "telemetry")]
            tracing::debug!(from = %self.account, to = %tx.to, "Requesting wallet signature");
            let request: TransactionRequest = tx.into();
            let request = request.from(self.account);
            let pending = self
                .provider
                .send_transaction(request)
                .await
                .map_err(BackendError::from)?;
            Ok(*pending.tx_hash())
        })
    }
}

/// The NFT a deployed account reports as its owner token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountToken {
    /// Chain the NFT lives on.
    pub chain_id: U256,
    /// The NFT itself.
    pub token: TokenIdentity,
}

/// Whether contract code is present at `account`.
///
/// # Errors
///
/// Returns [`ProviderError::Transport`] if the RPC call fails.
pub async fn is_account_deployed<P: Provider>(
    provider: &P,
    account: Address,
) -> Result<bool, ProviderError> {
    let code = provider.get_code_at(account).await?;
    Ok(!code.is_empty())
}

/// Calls `token()` on a deployed account.
///
/// # Errors
///
/// Returns [`ProviderError`] if the call fails or returns malformed data.
pub async fn account_token<P: Provider>(
    provider: &P,
    account: Address,
) -> Result<AccountToken, ProviderError> {
    let request = TransactionRequest::default()
        .to(account)
        .input(IERC6551Account::tokenCall {}.abi_encode().into());
    let output = provider.call(request).await?;
    let decoded = IERC6551Account::tokenCall::abi_decode_returns(&output).map_err(|source| {
        ProviderError::Decode {
            method: "token",
            source,
        }
    })?;
    Ok(AccountToken {
        chain_id: decoded.chainId,
        token: TokenIdentity::new(decoded.tokenContract, decoded.tokenId),
    })
}

/// Asks the registry for an NFT's account address.
///
/// The on-chain counterpart of [`compute_account`](crate::compute_account);
/// both agree for the same inputs.
///
/// # Errors
///
/// Returns [`ProviderError`] if the call fails or returns malformed data.
pub async fn registry_account<P: Provider>(
    provider: &P,
    token: &TokenIdentity,
    chain_id: ChainId,
    contracts: ImplementationRef,
) -> Result<Address, ProviderError> {
    let call = IERC6551Registry::accountCall {
        implementation: contracts.implementation_or_default(),
        chainId: U256::from(chain_id),
        tokenContract: token.token_contract,
        tokenId: token.token_id,
        salt: DEFAULT_SALT,
    };
    let request = TransactionRequest::default()
        .to(contracts.registry_or_default())
        .input(call.abi_encode().into());
    let output = provider.call(request).await?;
    IERC6551Registry::accountCall::abi_decode_returns(&output).map_err(|source| {
        ProviderError::Decode {
            method: "account",
            source,
        }
    })
}
