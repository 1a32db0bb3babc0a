//! Transaction submission capabilities supplied by the caller.
//!
//! The SDK never holds keys. Submitting operations hand a
//! [`PreparedTransaction`] to exactly one of two capabilities:
//!
//! - [`RawSigner`] - a signing key plus a connection, which signs and broadcasts
//! - [`WalletClient`] - an external wallet that owns the account and resolves
//!   its own network context
//!
//! Which one is used is decided once, when the client is built, and stored as
//! a [`SubmissionBackend`].

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use alloy_primitives::TxHash;

use crate::constants::ChainId;
use crate::error::BackendError;
use crate::types::PreparedTransaction;

/// A boxed, `Send` future, used to keep the capability traits object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A signing key with a network connection.
pub trait RawSigner: Send + Sync {
    /// Returns the chain ID of the network the signer is connected to.
    fn chain_id(&self) -> BoxFuture<'_, Result<ChainId, BackendError>>;

    /// Signs and broadcasts `tx`, returning its hash once the node accepts it.
    fn send_transaction(
        &self,
        tx: PreparedTransaction,
    ) -> BoxFuture<'_, Result<TxHash, BackendError>>;
}

/// An external wallet that signs and submits on the caller's behalf.
pub trait WalletClient: Send + Sync {
    /// Returns the chain ID the wallet is currently connected to.
    fn chain_id(&self) -> BoxFuture<'_, Result<ChainId, BackendError>>;

    /// Submits `tx` from the wallet's account, returning its hash.
    fn send_transaction(
        &self,
        tx: PreparedTransaction,
    ) -> BoxFuture<'_, Result<TxHash, BackendError>>;
}

impl<T: RawSigner + ?Sized> RawSigner for Arc<T> {
    fn chain_id(&self) -> BoxFuture<'_, Result<ChainId, BackendError>> {
        (**self).chain_id()
    }

    fn send_transaction(
        &self,
        tx: PreparedTransaction,
    ) -> BoxFuture<'_, Result<TxHash, BackendError>> {
        (**self).send_transaction(tx)
    }
}

impl<T: WalletClient + ?Sized> WalletClient for Arc<T> {
    fn chain_id(&self) -> BoxFuture<'_, Result<ChainId, BackendError>> {
        (**self).chain_id()
    }

    fn send_transaction(
        &self,
        tx: PreparedTransaction,
    ) -> BoxFuture<'_, Result<TxHash, BackendError>> {
        (**self).send_transaction(tx)
    }
}

/// The submission capability bound to a client.
#[derive(Clone, Default)]
pub enum SubmissionBackend {
    /// Sign locally and broadcast.
    RawSigner(Arc<dyn RawSigner>),
    /// Delegate to an external wallet.
    WalletClient(Arc<dyn WalletClient>),
    /// Nothing bound; submitting operations fail.
    #[default]
    Unbound,
}

impl SubmissionBackend {
    /// Short name of the bound capability, for logs and diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RawSigner(_) => "raw_signer",
            Self::WalletClient(_) => "wallet_client",
            Self::Unbound => "unbound",
        }
    }

    /// Whether a capability is bound.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        !matches!(self, Self::Unbound)
    }
}

impl fmt::Debug for SubmissionBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}
