//! Well-known ERC-6551 deployments and bytecode fragments.
//!
//! The registry and the reference account implementation are singletons
//! deployed through a deterministic deployer, so they live at the same
//! address on every supported EVM chain.

use alloy_primitives::{Address, U256, address, hex};

/// An EIP-155 chain ID (e.g., `1` for Ethereum Mainnet, `8453` for Base).
pub type ChainId = u64;

/// Default ERC-6551 account implementation (tokenbound `AccountV1`).
pub const ERC6551_ACCOUNT_IMPLEMENTATION_ADDRESS: Address =
    address!("0x2D25602551487C3f3354dD80D76D54383A243358");

/// Default ERC-6551 registry.
pub const ERC6551_REGISTRY_ADDRESS: Address =
    address!("0x02101dfB77FDE026414827Fdc604ddAF224F0921");

/// Salt used for every account created by this SDK.
pub const DEFAULT_SALT: U256 = U256::ZERO;

/// Constructor plus the first half of the ERC-1167 style runtime, ending in `PUSH20`.
pub const ACCOUNT_PROXY_HEADER: [u8; 20] = hex!("3d60ad80600a3d3981f3363d3d373d3d3d363d73");

/// Runtime tail after the implementation address (`DELEGATECALL` and return/revert).
pub const ACCOUNT_PROXY_FOOTER: [u8; 15] = hex!("5af43d82803e903d91602b57fd5bf3");

/// Length of the account init code: header, implementation, footer and four ABI words.
pub const CREATION_CODE_LEN: usize =
    ACCOUNT_PROXY_HEADER.len() + 20 + ACCOUNT_PROXY_FOOTER.len() + 4 * 32;
