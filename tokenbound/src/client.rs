//! Token-bound account client.
//!
//! [`TokenboundClient`] binds a chain ID, at most one submission backend and
//! optional contract overrides, then exposes:
//!
//! - pure operations - address derivation, creation code and prepared
//!   transactions, which never touch the network
//! - submitting operations - `create_account`, `deploy_account`, `execute_call`
//!   and the transfer helpers, which hand a prepared transaction to the bound
//!   backend
//!
//! # Override precedence
//!
//! For both the implementation and the registry address, field by field:
//! per-call override, then the client's `custom_implementation`, then the
//! crate defaults.
//!
//! # Example
//!
//! ```
//! use alloy_primitives::{U256, address};
//! use tokenbound::{AccountParams, TokenboundClient};
//!
//! let client = TokenboundClient::builder().chain_id(1).build()?;
//! let account = client.get_account(&AccountParams::new(
//!     address!("0xe7134a029cd2fd55f678d6809e64d0b6a0caddcb"),
//!     U256::from(9),
//! ));
//! assert_eq!(account, address!("0xf1A416dD702A36166553afAAC9Ab79B79db6d5d1"));
//! # Ok::<(), tokenbound::TokenboundError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use alloy_primitives::{Address, Bytes, TxHash, U256};

use crate::account::{compute_account, creation_code};
use crate::backend::{RawSigner, SubmissionBackend, WalletClient};
use crate::constants::ChainId;
use crate::error::{ConfigurationError, TokenboundError};
use crate::transaction::{prepare_create_account, prepare_execute_call};
use crate::transfer::{
    NftTransfer, prepare_transfer_erc20, prepare_transfer_eth, prepare_transfer_nft,
};
use crate::types::{
    AccountDeployment, AccountParams, ExecuteCallParams, ImplementationRef, PreparedTransaction,
};

/// Construction options for [`TokenboundClient`].
#[derive(Clone, Default)]
pub struct TokenboundClientOptions {
    /// Target chain. Required and non-zero.
    pub chain_id: Option<ChainId>,
    /// Local signing backend. Mutually exclusive with `wallet_client`.
    pub signer: Option<Arc<dyn RawSigner>>,
    /// External wallet backend. Mutually exclusive with `signer`.
    pub wallet_client: Option<Arc<dyn WalletClient>>,
    /// Client-wide implementation/registry overrides.
    pub custom_implementation: Option<ImplementationRef>,
}

impl fmt::Debug for TokenboundClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenboundClientOptions")
            .field("chain_id", &self.chain_id)
            .field("signer", &self.signer.is_some())
            .field("wallet_client", &self.wallet_client.is_some())
            .field("custom_implementation", &self.custom_implementation)
            .finish()
    }
}

/// Client for computing, deploying and driving ERC-6551 accounts.
///
/// Immutable once built; share it across tasks behind an [`Arc`] or clone it.
#[derive(Debug, Clone)]
pub struct TokenboundClient {
    chain_id: ChainId,
    backend: SubmissionBackend,
    custom_implementation: ImplementationRef,
}

impl TokenboundClient {
    /// Builds a client from options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingChainId`] if `chain_id` is absent or
    /// zero, and [`ConfigurationError::ConflictingBackends`] if both `signer` and
    /// `wallet_client` are set. Setting neither is allowed; submitting
    /// operations then fail with [`TokenboundError::NoBackend`].
    pub fn new(options: TokenboundClientOptions) -> Result<Self, TokenboundError> {
        let chain_id = options
            .chain_id
            .filter(|id| *id != 0)
            .ok_or(ConfigurationError::MissingChainId)?;
        let backend = match (options.signer, options.wallet_client) {
            (Some(_), Some(_)) => return Err(ConfigurationError::ConflictingBackends.into()),
            (Some(signer), None) => SubmissionBackend::RawSigner(signer),
            (None, Some(wallet)) => SubmissionBackend::WalletClient(wallet),
            (None, None) => SubmissionBackend::Unbound,
        };
        let custom_implementation = options.custom_implementation.unwrap_or_default();

        #[cfg(feature = "telemetry")]
        tracing::debug!(
            chain_id,
            backend = backend.kind(),
            implementation = ?custom_implementation.implementation,
            registry = ?custom_implementation.registry,
            "Created tokenbound client"
        );

        Ok(Self {
            chain_id,
            backend,
            custom_implementation,
        })
    }

    /// Returns a builder with no options set.
    #[must_use]
    pub fn builder() -> TokenboundClientBuilder {
        TokenboundClientBuilder::default()
    }

    /// The configured chain ID.
    #[must_use]
    pub const fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// The bound submission backend.
    #[must_use]
    pub const fn backend(&self) -> &SubmissionBackend {
        &self.backend
    }

    /// The client-wide contract overrides.
    #[must_use]
    pub const fn custom_implementation(&self) -> ImplementationRef {
        self.custom_implementation
    }

    /// Applies override precedence to per-call overrides.
    #[must_use]
    pub const fn resolve_contracts(&self, overrides: ImplementationRef) -> ImplementationRef {
        overrides.or(self.custom_implementation)
    }

    /// Computes the account address for an NFT on the client's chain.
    #[must_use]
    pub fn get_account(&self, params: &AccountParams) -> Address {
        self.account_on(params, self.chain_id)
    }

    fn account_on(&self, params: &AccountParams, chain_id: ChainId) -> Address {
        let contracts = self.resolve_contracts(params.overrides);
        compute_account(
            params.token.token_contract,
            params.token.token_id,
            chain_id,
            contracts.implementation,
            contracts.registry,
        )
    }

    /// Returns the registry init code for an account. See [`creation_code`].
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn get_creation_code(
        &self,
        implementation: Address,
        chain_id: ChainId,
        token_contract: Address,
        token_id: U256,
        salt: U256,
    ) -> Bytes {
        creation_code(implementation, chain_id, token_contract, token_id, salt)
    }

    /// Builds the registry transaction that deploys an NFT's account.
    #[must_use]
    pub fn prepare_create_account(&self, params: &AccountParams) -> PreparedTransaction {
        self.prepare_create_account_on(params, self.chain_id)
    }

    fn prepare_create_account_on(
        &self,
        params: &AccountParams,
        chain_id: ChainId,
    ) -> PreparedTransaction {
        let contracts = self.resolve_contracts(params.overrides);
        prepare_create_account(
            params.token.token_contract,
            params.token.token_id,
            chain_id,
            contracts.implementation,
            contracts.registry,
        )
    }

    /// Deploys an NFT's account through the bound backend.
    ///
    /// Returns the transaction hash. Use
    /// [`deploy_account`](Self::deploy_account) to also learn the deployed
    /// address.
    ///
    /// # Errors
    ///
    /// Same as [`deploy_account`](Self::deploy_account).
    pub async fn create_account(&self, params: &AccountParams) -> Result<TxHash, TokenboundError> {
        self.deploy_account(params)
            .await
            .map(|deployment| deployment.transaction_hash)
    }

    /// Deploys an NFT's account and reports where it lands.
    ///
    /// With a raw signer the registry call encodes the client's chain ID.
    /// With a wallet client the chain ID is first resolved from the wallet,
    /// and the reported account is derived for that chain.
    /// Per-call overrides are honored identically by both.
    ///
    /// # Errors
    ///
    /// Returns [`TokenboundError::NoBackend`] if no backend is bound, and
    /// [`TokenboundError::Backend`] with the backend's own error if it fails.
    pub async fn deploy_account(
        &self,
        params: &AccountParams,
    ) -> Result<AccountDeployment, TokenboundError> {
        let (chain_id, tx_hash) = match &self.backend {
            SubmissionBackend::RawSigner(signer) => {
                let tx = self.prepare_create_account(params);
                #[cfg(feature = "telemetry")]
                tracing::info!(registry = %tx.to, token_id = %params.token.token_id, "Creating account via signer");
                let hash = signer
                    .send_transaction(tx)
                    .await
                    .map_err(TokenboundError::Backend)?;
                (self.chain_id, hash)
            }
            SubmissionBackend::WalletClient(wallet) => {
                let chain_id = wallet.chain_id().await.map_err(TokenboundError::Backend)?;
                #[cfg(feature = "telemetry")]
                if chain_id != self.chain_id {
                    tracing::warn!(
                        configured = self.chain_id,
                        wallet = chain_id,
                        "Wallet is connected to a different chain; encoding with the wallet chain"
                    );
                }
                let tx = self.prepare_create_account_on(params, chain_id);
                #[cfg(feature = "telemetry")]
                tracing::info!(registry = %tx.to, token_id = %params.token.token_id, chain_id, "Creating account via wallet client");
                let hash = wallet
                    .send_transaction(tx)
                    .await
                    .map_err(TokenboundError::Backend)?;
                (chain_id, hash)
            }
            SubmissionBackend::Unbound => return Err(TokenboundError::NoBackend),
        };
        Ok(AccountDeployment {
            account: self.account_on(params, chain_id),
            chain_id,
            transaction_hash: tx_hash,
        })
    }

    /// Builds an `executeCall` transaction on a token-bound account.
    #[must_use]
    #[allow(clippy::unused_self)] // pure, but part of the client surface
    pub fn prepare_execute_call(&self, params: &ExecuteCallParams) -> PreparedTransaction {
        prepare_execute_call(params.account, params.to, params.value, params.data.clone())
    }

    /// Executes a call through a token-bound account via the bound backend.
    ///
    /// # Errors
    ///
    /// Returns [`TokenboundError::NoBackend`] if no backend is bound, and
    /// [`TokenboundError::Backend`] with the backend's own error if it fails.
    pub async fn execute_call(
        &self,
        params: &ExecuteCallParams,
    ) -> Result<TxHash, TokenboundError> {
        self.submit(self.prepare_execute_call(params)).await
    }

    /// Builds a native-value transfer out of `account`.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn prepare_transfer_eth(
        &self,
        account: Address,
        recipient: Address,
        amount: U256,
    ) -> PreparedTransaction {
        prepare_transfer_eth(account, recipient, amount)
    }

    /// Sends native value out of `account` via the bound backend.
    ///
    /// # Errors
    ///
    /// Same as [`execute_call`](Self::execute_call).
    pub async fn transfer_eth(
        &self,
        account: Address,
        recipient: Address,
        amount: U256,
    ) -> Result<TxHash, TokenboundError> {
        self.submit(prepare_transfer_eth(account, recipient, amount))
            .await
    }

    /// Builds an ERC-20 transfer out of `account`.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn prepare_transfer_erc20(
        &self,
        account: Address,
        token: Address,
        recipient: Address,
        amount: U256,
    ) -> PreparedTransaction {
        prepare_transfer_erc20(account, token, recipient, amount)
    }

    /// Sends ERC-20 tokens out of `account` via the bound backend.
    ///
    /// # Errors
    ///
    /// Same as [`execute_call`](Self::execute_call).
    pub async fn transfer_erc20(
        &self,
        account: Address,
        token: Address,
        recipient: Address,
        amount: U256,
    ) -> Result<TxHash, TokenboundError> {
        self.submit(prepare_transfer_erc20(account, token, recipient, amount))
            .await
    }

    /// Builds an NFT transfer out of `account`.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn prepare_transfer_nft(
        &self,
        account: Address,
        transfer: &NftTransfer,
    ) -> PreparedTransaction {
        prepare_transfer_nft(account, transfer)
    }

    /// Moves an NFT out of `account` via the bound backend.
    ///
    /// # Errors
    ///
    /// Same as [`execute_call`](Self::execute_call).
    pub async fn transfer_nft(
        &self,
        account: Address,
        transfer: &NftTransfer,
    ) -> Result<TxHash, TokenboundError> {
        self.submit(prepare_transfer_nft(account, transfer)).await
    }

    async fn submit(&self, tx: PreparedTransaction) -> Result<TxHash, TokenboundError> {
        #[cfg(feature = "telemetry")]
        tracing::info!(backend = self.backend.kind(), to = %tx.to, value = %tx.value, "Submitting transaction");
        match &self.backend {
            SubmissionBackend::RawSigner(signer) => signer.send_transaction(tx).await,
            SubmissionBackend::WalletClient(wallet) => wallet.send_transaction(tx).await,
            SubmissionBackend::Unbound => return Err(TokenboundError::NoBackend),
        }
        .map_err(TokenboundError::Backend)
    }
}

/// Fluent builder for [`TokenboundClient`].
#[derive(Debug, Clone, Default)]
pub struct TokenboundClientBuilder {
    options: TokenboundClientOptions,
}

impl TokenboundClientBuilder {
    /// Sets the chain ID.
    #[must_use]
    pub const fn chain_id(mut self, chain_id: ChainId) -> Self {
        self.options.chain_id = Some(chain_id);
        self
    }

    /// Binds a raw signer.
    #[must_use]
    pub fn signer(mut self, signer: impl RawSigner + 'static) -> Self {
        self.options.signer = Some(Arc::new(signer));
        self
    }

    /// Binds a wallet client.
    #[must_use]
    pub fn wallet_client(mut self, wallet_client: impl WalletClient + 'static) -> Self {
        self.options.wallet_client = Some(Arc::new(wallet_client));
        self
    }

    /// Sets client-wide implementation/registry overrides.
    #[must_use]
    pub const fn custom_implementation(mut self, custom_implementation: ImplementationRef) -> Self {
        self.options.custom_implementation = Some(custom_implementation);
        self
    }

    /// Validates the options and builds the client.
    ///
    /// # Errors
    ///
    /// See [`TokenboundClient::new`].
    pub fn build(self) -> Result<TokenboundClient, TokenboundError> {
        TokenboundClient::new(self.options)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use alloy_primitives::{B256, address, bytes, keccak256};
    use alloy_sol_types::SolCall;

    use super::*;
    use crate::backend::BoxFuture;
    use crate::contracts::{IERC6551Account, IERC6551Registry};
    use crate::error::BackendError;
    use crate::transfer::TokenStandard;

    const TOKEN_CONTRACT: Address = address!("0xe7134a029cd2fd55f678d6809e64d0b6a0caddcb");
    const GOLDEN_ACCOUNT: Address = address!("0xf1A416dD702A36166553afAAC9Ab79B79db6d5d1");
    const CUSTOM_IMPLEMENTATION: Address = address!("0x1111111111111111111111111111111111111111");
    const CUSTOM_REGISTRY: Address = address!("0x2222222222222222222222222222222222222222");

    #[derive(Debug, thiserror::Error)]
    #[error("user rejected the request")]
    struct Rejected;

    #[derive(Default)]
    struct Recorder {
        chain_id: ChainId,
        reject: bool,
        unreachable: bool,
        sent: Mutex<Vec<PreparedTransaction>>,
    }

    impl Recorder {
        fn on_chain(chain_id: ChainId) -> Self {
            Self {
                chain_id,
                ..Self::default()
            }
        }

        fn rejecting() -> Self {
            Self {
                chain_id: 1,
                reject: true,
                ..Self::default()
            }
        }

        fn disconnected() -> Self {
            Self {
                chain_id: 1,
                unreachable: true,
                ..Self::default()
            }
        }

        fn report_chain(&self) -> Result<ChainId, BackendError> {
            if self.unreachable {
                return Err(Box::new(Rejected));
            }
            Ok(self.chain_id)
        }

        fn record(&self, tx: PreparedTransaction) -> Result<TxHash, BackendError> {
            if self.reject {
                return Err(Box::new(Rejected));
            }
            let hash = keccak256(&tx.data);
            self.sent.lock().unwrap().push(tx);
            Ok(hash)
        }

        fn sent(&self) -> Vec<PreparedTransaction> {
            self.sent.lock().unwrap().clone()
        }
    }

    struct TestSigner(Arc<Recorder>);
    struct TestWallet(Arc<Recorder>);

    impl RawSigner for TestSigner {
        fn chain_id(&self) -> BoxFuture<'_, Result<ChainId, BackendError>> {
            Box::pin(async move { self.0.report_chain() })
        }

        fn send_transaction(
            &self,
            tx: PreparedTransaction,
        ) -> BoxFuture<'_, Result<TxHash, BackendError>> {
            Box::pin(async move { self.0.record(tx) })
        }
    }

    impl WalletClient for TestWallet {
        fn chain_id(&self) -> BoxFuture<'_, Result<ChainId, BackendError>> {
            Box::pin(async move { self.0.report_chain() })
        }

        fn send_transaction(
            &self,
            tx: PreparedTransaction,
        ) -> BoxFuture<'_, Result<TxHash, BackendError>> {
            Box::pin(async move { self.0.record(tx) })
        }
    }

    fn golden_params() -> AccountParams {
        AccountParams::new(TOKEN_CONTRACT, U256::from(9))
    }

    fn execute_params() -> ExecuteCallParams {
        ExecuteCallParams {
            account: GOLDEN_ACCOUNT,
            to: address!("0x3333333333333333333333333333333333333333"),
            value: U256::from(5),
            data: bytes!("c0ffee"),
        }
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TokenboundClient>();
    }

    #[test]
    fn test_missing_chain_id() {
        let err = TokenboundClient::new(TokenboundClientOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            TokenboundError::Configuration(ConfigurationError::MissingChainId)
        ));
    }

    #[test]
    fn test_zero_chain_id() {
        let err = TokenboundClient::builder().chain_id(0).build().unwrap_err();
        assert!(matches!(
            err,
            TokenboundError::Configuration(ConfigurationError::MissingChainId)
        ));
    }

    #[test]
    fn test_conflicting_backends() {
        let recorder = Arc::new(Recorder::on_chain(1));
        let err = TokenboundClient::builder()
            .chain_id(1)
            .signer(TestSigner(Arc::clone(&recorder)))
            .wallet_client(TestWallet(recorder))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TokenboundError::Configuration(ConfigurationError::ConflictingBackends)
        ));
    }

    #[test]
    fn test_backend_kind() {
        let recorder = Arc::new(Recorder::on_chain(1));
        let signer_client = TokenboundClient::builder()
            .chain_id(1)
            .signer(TestSigner(Arc::clone(&recorder)))
            .build()
            .unwrap();
        assert_eq!(signer_client.backend().kind(), "raw_signer");

        let wallet_client = TokenboundClient::builder()
            .chain_id(1)
            .wallet_client(TestWallet(recorder))
            .build()
            .unwrap();
        assert_eq!(wallet_client.backend().kind(), "wallet_client");

        let unbound = TokenboundClient::builder().chain_id(1).build().unwrap();
        assert!(!unbound.backend().is_bound());
    }

    #[tokio::test]
    async fn test_unbound_client_computes_but_cannot_submit() {
        let client = TokenboundClient::builder().chain_id(1).build().unwrap();

        assert_eq!(client.get_account(&golden_params()), GOLDEN_ACCOUNT);
        let tx = client.prepare_create_account(&golden_params());
        assert_eq!(tx.to, crate::ERC6551_REGISTRY_ADDRESS);

        assert!(matches!(
            client.create_account(&golden_params()).await,
            Err(TokenboundError::NoBackend)
        ));
        assert!(matches!(
            client.execute_call(&execute_params()).await,
            Err(TokenboundError::NoBackend)
        ));
        assert!(matches!(
            client
                .transfer_eth(GOLDEN_ACCOUNT, CUSTOM_REGISTRY, U256::from(1))
                .await,
            Err(TokenboundError::NoBackend)
        ));
    }

    #[tokio::test]
    async fn test_create_account_via_signer() {
        let recorder = Arc::new(Recorder::on_chain(1));
        let client = TokenboundClient::builder()
            .chain_id(1)
            .signer(TestSigner(Arc::clone(&recorder)))
            .build()
            .unwrap();

        let hash = client.create_account(&golden_params()).await.unwrap();
        let sent = recorder.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], client.prepare_create_account(&golden_params()));
        assert_eq!(hash, keccak256(&sent[0].data));
    }

    #[tokio::test]
    async fn test_create_account_via_wallet_uses_wallet_chain() {
        let recorder = Arc::new(Recorder::on_chain(137));
        let client = TokenboundClient::builder()
            .chain_id(1)
            .wallet_client(TestWallet(Arc::clone(&recorder)))
            .build()
            .unwrap();

        client.create_account(&golden_params()).await.unwrap();
        let sent = recorder.sent();
        let call = IERC6551Registry::createAccountCall::abi_decode(&sent[0].data).unwrap();
        assert_eq!(call.chainId, U256::from(137));
        assert_eq!(call.tokenContract, TOKEN_CONTRACT);
        assert_eq!(call.tokenId, U256::from(9));
    }

    #[tokio::test]
    async fn test_deploy_account_reports_wallet_chain_address() {
        let recorder = Arc::new(Recorder::on_chain(137));
        let client = TokenboundClient::builder()
            .chain_id(1)
            .wallet_client(TestWallet(Arc::clone(&recorder)))
            .build()
            .unwrap();

        let deployment = client.deploy_account(&golden_params()).await.unwrap();
        assert_eq!(deployment.chain_id, 137);
        assert_eq!(
            deployment.account,
            address!("0x851c7fc46333294099dC758A944421e50C6E0A43")
        );
        assert_eq!(
            deployment.account,
            compute_account(TOKEN_CONTRACT, U256::from(9), 137, None, None)
        );
        assert_ne!(deployment.account, client.get_account(&golden_params()));
        assert_eq!(deployment.transaction_hash, keccak256(&recorder.sent()[0].data));
    }

    #[tokio::test]
    async fn test_deploy_account_via_signer_uses_client_chain() {
        let recorder = Arc::new(Recorder::on_chain(137));
        let client = TokenboundClient::builder()
            .chain_id(1)
            .signer(TestSigner(Arc::clone(&recorder)))
            .build()
            .unwrap();

        let deployment = client.deploy_account(&golden_params()).await.unwrap();
        assert_eq!(deployment.chain_id, 1);
        assert_eq!(deployment.account, GOLDEN_ACCOUNT);
    }

    #[tokio::test]
    async fn test_wallet_chain_id_error_propagates_unchanged() {
        let recorder = Arc::new(Recorder::disconnected());
        let client = TokenboundClient::builder()
            .chain_id(1)
            .wallet_client(TestWallet(Arc::clone(&recorder)))
            .build()
            .unwrap();

        let err = client.create_account(&golden_params()).await.unwrap_err();
        assert!(matches!(err, TokenboundError::Backend(_)));
        assert!(err.backend_error().unwrap().downcast_ref::<Rejected>().is_some());
        assert!(recorder.sent().is_empty());
    }

    #[tokio::test]
    async fn test_per_call_registry_honored_by_both_backends() {
        let params = golden_params().with_registry(CUSTOM_REGISTRY);

        let signer_recorder = Arc::new(Recorder::on_chain(1));
        let signer_client = TokenboundClient::builder()
            .chain_id(1)
            .signer(TestSigner(Arc::clone(&signer_recorder)))
            .build()
            .unwrap();
        signer_client.create_account(&params).await.unwrap();

        let wallet_recorder = Arc::new(Recorder::on_chain(1));
        let wallet_client = TokenboundClient::builder()
            .chain_id(1)
            .wallet_client(TestWallet(Arc::clone(&wallet_recorder)))
            .build()
            .unwrap();
        wallet_client.create_account(&params).await.unwrap();

        assert_eq!(signer_recorder.sent()[0].to, CUSTOM_REGISTRY);
        assert_eq!(wallet_recorder.sent()[0].to, CUSTOM_REGISTRY);
        assert_eq!(signer_recorder.sent(), wallet_recorder.sent());
    }

    #[tokio::test]
    async fn test_execute_call_via_signer() {
        let recorder = Arc::new(Recorder::on_chain(1));
        let client = TokenboundClient::builder()
            .chain_id(1)
            .signer(TestSigner(Arc::clone(&recorder)))
            .build()
            .unwrap();

        let params = execute_params();
        client.execute_call(&params).await.unwrap();
        let sent = recorder.sent();
        assert_eq!(sent[0].to, GOLDEN_ACCOUNT);
        assert_eq!(sent[0].value, U256::from(5));
        let call = IERC6551Account::executeCallCall::abi_decode(&sent[0].data).unwrap();
        assert_eq!(call.to, params.to);
        assert_eq!(call.value, params.value);
        assert_eq!(call.data, params.data);
    }

    #[tokio::test]
    async fn test_backend_error_propagates_unchanged() {
        let client = TokenboundClient::builder()
            .chain_id(1)
            .signer(TestSigner(Arc::new(Recorder::rejecting())))
            .build()
            .unwrap();

        let err = client.execute_call(&execute_params()).await.unwrap_err();
        assert_eq!(err.to_string(), "user rejected the request");
        assert!(err.backend_error().unwrap().downcast_ref::<Rejected>().is_some());

        let err = client.create_account(&golden_params()).await.unwrap_err();
        assert!(matches!(err, TokenboundError::Backend(_)));
    }

    #[test]
    fn test_custom_implementation_changes_account() {
        let default_client = TokenboundClient::builder().chain_id(1).build().unwrap();
        let custom_client = TokenboundClient::builder()
            .chain_id(1)
            .custom_implementation(
                ImplementationRef::default().with_implementation(CUSTOM_IMPLEMENTATION),
            )
            .build()
            .unwrap();

        let params = golden_params();
        assert_ne!(
            default_client.get_account(&params),
            custom_client.get_account(&params)
        );
        assert_eq!(
            custom_client.get_account(&params),
            address!("0x9620f97DaACD73D166665Ec422E4468FA3aE4D90")
        );
    }

    #[test]
    fn test_per_call_override_beats_client_override() {
        let client = TokenboundClient::builder()
            .chain_id(1)
            .custom_implementation(ImplementationRef::new(
                Some(address!("0x5555555555555555555555555555555555555555")),
                Some(CUSTOM_REGISTRY),
            ))
            .build()
            .unwrap();

        let params = golden_params().with_implementation(CUSTOM_IMPLEMENTATION);
        // Implementation from the call, registry from the client.
        assert_eq!(
            client.get_account(&params),
            address!("0xA89b721e3afC264F9356a6988658227372dC1888")
        );

        let tx = client.prepare_create_account(&params);
        assert_eq!(tx.to, CUSTOM_REGISTRY);
        let call = IERC6551Registry::createAccountCall::abi_decode(&tx.data).unwrap();
        assert_eq!(call.implementation, CUSTOM_IMPLEMENTATION);
    }

    #[test]
    fn test_get_creation_code_hashes_to_account() {
        let client = TokenboundClient::builder().chain_id(1).build().unwrap();
        let code = client.get_creation_code(
            crate::ERC6551_ACCOUNT_IMPLEMENTATION_ADDRESS,
            1,
            TOKEN_CONTRACT,
            U256::from(9),
            U256::ZERO,
        );
        assert_eq!(code.len(), 183);
        let derived = crate::ERC6551_REGISTRY_ADDRESS.create2(B256::ZERO, keccak256(&code));
        assert_eq!(derived, GOLDEN_ACCOUNT);
    }

    #[tokio::test]
    async fn test_transfer_nft_via_wallet() {
        let recorder = Arc::new(Recorder::on_chain(1));
        let client = TokenboundClient::builder()
            .chain_id(1)
            .wallet_client(TestWallet(Arc::clone(&recorder)))
            .build()
            .unwrap();

        let transfer = NftTransfer {
            standard: TokenStandard::Erc721,
            token_contract: TOKEN_CONTRACT,
            token_id: U256::from(1),
            recipient: CUSTOM_REGISTRY,
        };
        client.transfer_nft(GOLDEN_ACCOUNT, &transfer).await.unwrap();
        assert_eq!(
            recorder.sent(),
            vec![client.prepare_transfer_nft(GOLDEN_ACCOUNT, &transfer)]
        );
    }
}
