//! Off-chain ERC-6551 account address derivation.
//!
//! The registry deploys every account with `CREATE2` using a minimal proxy
//! whose init code embeds the implementation address followed by the
//! ABI-encoded `(salt, chainId, tokenContract, tokenId)` tuple. Rebuilding
//! that init code locally gives the account address without any RPC call:
//!
//! ```text
//! address = keccak256(0xff ++ registry ++ salt ++ keccak256(creation_code))[12..]
//! ```

use alloy_primitives::{Address, B256, Bytes, U256, keccak256};
use alloy_sol_types::SolValue;

use crate::constants::{
    ACCOUNT_PROXY_FOOTER, ACCOUNT_PROXY_HEADER, CREATION_CODE_LEN, ChainId, DEFAULT_SALT,
};
use crate::types::ImplementationRef;

/// Builds the init code the registry passes to `CREATE2` for an account.
///
/// Layout (183 bytes):
///
/// | bytes     | content                                      |
/// |-----------|----------------------------------------------|
/// | `0..20`   | [`ACCOUNT_PROXY_HEADER`]                     |
/// | `20..40`  | `implementation`                             |
/// | `40..55`  | [`ACCOUNT_PROXY_FOOTER`]                     |
/// | `55..183` | `abi.encode(salt, chainId, tokenContract, tokenId)` |
#[must_use]
pub fn creation_code(
    implementation: Address,
    chain_id: ChainId,
    token_contract: Address,
    token_id: U256,
    salt: U256,
) -> Bytes {
    let tail = (salt, U256::from(chain_id), token_contract, token_id).abi_encode();
    let mut code = Vec::with_capacity(CREATION_CODE_LEN);
    code.extend_from_slice(&ACCOUNT_PROXY_HEADER);
    code.extend_from_slice(implementation.as_slice());
    code.extend_from_slice(&ACCOUNT_PROXY_FOOTER);
    code.extend_from_slice(&tail);
    debug_assert_eq!(code.len(), CREATION_CODE_LEN);
    code.into()
}

/// Computes the address of the token-bound account for an NFT.
///
/// `implementation` and `registry` default to
/// [`ERC6551_ACCOUNT_IMPLEMENTATION_ADDRESS`](crate::ERC6551_ACCOUNT_IMPLEMENTATION_ADDRESS)
/// and [`ERC6551_REGISTRY_ADDRESS`](crate::ERC6551_REGISTRY_ADDRESS). The
/// salt is always [`DEFAULT_SALT`].
///
/// The result matches what the registry's `account()` view returns for the
/// same inputs, whether or not the account has been deployed.
#[must_use]
pub fn compute_account(
    token_contract: Address,
    token_id: U256,
    chain_id: ChainId,
    implementation: Option<Address>,
    registry: Option<Address>,
) -> Address {
    compute_account_with_salt(
        token_contract,
        token_id,
        chain_id,
        ImplementationRef::new(implementation, registry),
        DEFAULT_SALT,
    )
}

/// Like [`compute_account`], with an explicit salt.
#[must_use]
pub fn compute_account_with_salt(
    token_contract: Address,
    token_id: U256,
    chain_id: ChainId,
    contracts: ImplementationRef,
    salt: U256,
) -> Address {
    let code = creation_code(
        contracts.implementation_or_default(),
        chain_id,
        token_contract,
        token_id,
        salt,
    );
    let salt = B256::from(salt.to_be_bytes::<32>());
    contracts
        .registry_or_default()
        .create2(salt, keccak256(&code))
}
