//! Unsent transaction builders for the registry and account contracts.
//!
//! Every function here is pure: it only ABI-encodes, it never talks to a
//! node. The returned [`PreparedTransaction`] can be handed to any backend.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;

use crate::constants::{ChainId, DEFAULT_SALT};
use crate::contracts::{IAccountProxy, IERC6551Account, IERC6551Registry};
use crate::types::{ImplementationRef, PreparedTransaction};

/// Calldata for the zero-argument `initialize()` passed to the registry as `initData`.
#[must_use]
pub fn initialize_calldata() -> Bytes {
    IAccountProxy::initializeCall {}.abi_encode().into()
}

/// Builds the registry `createAccount` transaction for an NFT.
///
/// `to` is the registry (override or default) and `value` is zero. The
/// account is created with [`DEFAULT_SALT`] and initialized with
/// [`initialize_calldata`].
#[must_use]
pub fn prepare_create_account(
    token_contract: Address,
    token_id: U256,
    chain_id: ChainId,
    implementation: Option<Address>,
    registry: Option<Address>,
) -> PreparedTransaction {
    let contracts = ImplementationRef::new(implementation, registry);
    let call = IERC6551Registry::createAccountCall {
        implementation: contracts.implementation_or_default(),
        chainId: U256::from(chain_id),
        tokenContract: token_contract,
        tokenId: token_id,
        seed: DEFAULT_SALT,
        initData: initialize_calldata(),
    };
    PreparedTransaction {
        to: contracts.registry_or_default(),
        value: U256::ZERO,
        data: call.abi_encode().into(),
    }
}

/// Builds an `executeCall(to, value, data)` transaction on a token-bound account.
///
/// The transaction is sent to `account` carrying `value`, which the account
/// forwards to `to`.
#[must_use]
pub fn prepare_execute_call(
    account: Address,
    to: Address,
    value: U256,
    data: Bytes,
) -> PreparedTransaction {
    let call = IERC6551Account::executeCallCall { to, value, data };
    PreparedTransaction {
        to: account,
        value,
        data: call.abi_encode().into(),
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, bytes, hex};

    use super::*;
    use crate::constants::{ERC6551_ACCOUNT_IMPLEMENTATION_ADDRESS, ERC6551_REGISTRY_ADDRESS};

    const TOKEN_CONTRACT: Address = address!("0xe7134a029cd2fd55f678d6809e64d0b6a0caddcb");
    const ACCOUNT: Address = address!("0xf1A416dD702A36166553afAAC9Ab79B79db6d5d1");

    #[test]
    fn test_initialize_calldata() {
        assert_eq!(initialize_calldata(), bytes!("8129fc1c"));
    }

    #[test]
    fn test_prepare_create_account_defaults() {
        let tx = prepare_create_account(TOKEN_CONTRACT, U256::from(9), 1, None, None);
        assert_eq!(tx.to, ERC6551_REGISTRY_ADDRESS);
        assert_eq!(tx.value, U256::ZERO);
        // selector + 6 head words + initData length word + one padded data word
        assert_eq!(tx.data.len(), 4 + 6 * 32 + 32 + 32);
        assert_eq!(&tx.data[..4], &hex!("da7323b3"));

        let decoded = IERC6551Registry::createAccountCall::abi_decode(&tx.data).unwrap();
        assert_eq!(decoded.implementation, ERC6551_ACCOUNT_IMPLEMENTATION_ADDRESS);
        assert_eq!(decoded.chainId, U256::from(1));
        assert_eq!(decoded.tokenContract, TOKEN_CONTRACT);
        assert_eq!(decoded.tokenId, U256::from(9));
        assert_eq!(decoded.seed, U256::ZERO);
        assert_eq!(decoded.initData, bytes!("8129fc1c"));
    }

    #[test]
    fn test_prepare_create_account_overrides() {
        let implementation = address!("0x1111111111111111111111111111111111111111");
        let registry = address!("0x2222222222222222222222222222222222222222");
        let tx = prepare_create_account(
            TOKEN_CONTRACT,
            U256::from(9),
            137,
            Some(implementation),
            Some(registry),
        );
        assert_eq!(tx.to, registry);
        let decoded = IERC6551Registry::createAccountCall::abi_decode(&tx.data).unwrap();
        assert_eq!(decoded.implementation, implementation);
        assert_eq!(decoded.chainId, U256::from(137));
    }

    #[test]
    fn test_prepare_create_account_is_deterministic() {
        let a = prepare_create_account(TOKEN_CONTRACT, U256::from(9), 1, None, None);
        let b = prepare_create_account(TOKEN_CONTRACT, U256::from(9), 1, None, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_prepare_execute_call_roundtrip() {
        let to = address!("0x3333333333333333333333333333333333333333");
        let data = bytes!("deadbeefcafe");
        let value = U256::from(1_000_000_000_000_000u64);
        let tx = prepare_execute_call(ACCOUNT, to, value, data.clone());

        assert_eq!(tx.to, ACCOUNT);
        assert_eq!(tx.value, value);
        assert_eq!(&tx.data[..4], &hex!("9e5d4c49"));
        assert_eq!(tx.data.len(), 4 + 3 * 32 + 32 + 32);

        let decoded = IERC6551Account::executeCallCall::abi_decode(&tx.data).unwrap();
        assert_eq!(decoded.to, to);
        assert_eq!(decoded.value, value);
        assert_eq!(decoded.data, data);

        let again = prepare_execute_call(ACCOUNT, to, value, data);
        assert_eq!(tx, again);
    }

    #[test]
    fn test_prepare_execute_call_empty_data() {
        let to = address!("0x3333333333333333333333333333333333333333");
        let tx = prepare_execute_call(ACCOUNT, to, U256::from(7), Bytes::new());
        assert_eq!(tx.data.len(), 4 + 3 * 32 + 32);
        let decoded = IERC6551Account::executeCallCall::abi_decode(&tx.data).unwrap();
        assert!(decoded.data.is_empty());
    }
}
