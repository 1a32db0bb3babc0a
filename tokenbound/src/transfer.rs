//! Asset transfers performed through a token-bound account.
//!
//! Each helper encodes the token-level call and wraps it in the account's
//! `executeCall`, so the account itself is the sender of the asset.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use serde::{Deserialize, Serialize};

use crate::contracts::{IERC20, IERC721, IERC1155};
use crate::transaction::prepare_execute_call;
use crate::types::{PreparedTransaction, u256_decimal};

/// NFT standard of the token being moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "standard", rename_all = "UPPERCASE")]
pub enum TokenStandard {
    /// ERC-721: a single unique token.
    Erc721,
    /// ERC-1155: `amount` units of a token ID.
    Erc1155 {
        /// Units to transfer.
        #[serde(with = "u256_decimal")]
        amount: U256,
    },
}

/// An NFT transfer out of a token-bound account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftTransfer {
    /// Token standard, and the amount for ERC-1155.
    #[serde(flatten)]
    pub standard: TokenStandard,
    /// NFT contract.
    pub token_contract: Address,
    /// Token ID to move.
    #[serde(with = "u256_decimal")]
    pub token_id: U256,
    /// Receiver of the token.
    pub recipient: Address,
}

/// Sends `amount` wei from `account` to `recipient`.
#[must_use]
pub fn prepare_transfer_eth(
    account: Address,
    recipient: Address,
    amount: U256,
) -> PreparedTransaction {
    prepare_execute_call(account, recipient, amount, Bytes::new())
}

/// Sends `amount` units of the ERC-20 `token` from `account` to `recipient`.
#[must_use]
pub fn prepare_transfer_erc20(
    account: Address,
    token: Address,
    recipient: Address,
    amount: U256,
) -> PreparedTransaction {
    let call = IERC20::transferCall {
        to: recipient,
        amount,
    };
    prepare_execute_call(account, token, U256::ZERO, call.abi_encode().into())
}

/// Moves an ERC-721 or ERC-1155 token owned by `account`.
#[must_use]
pub fn prepare_transfer_nft(account: Address, transfer: &NftTransfer) -> PreparedTransaction {
    let data: Bytes = match transfer.standard {
        TokenStandard::Erc721 => IERC721::safeTransferFromCall {
            from: account,
            to: transfer.recipient,
            tokenId: transfer.token_id,
        }
        .abi_encode()
        .into(),
        TokenStandard::Erc1155 { amount } => IERC1155::safeTransferFromCall {
            from: account,
            to: transfer.recipient,
            id: transfer.token_id,
            amount,
            data: Bytes::new(),
        }
        .abi_encode()
        .into(),
    };
    prepare_execute_call(account, transfer.token_contract, U256::ZERO, data)
}
