//! Value types shared by the derivation, encoding and client layers.
//!
//! Addresses are carried as [`Address`]; token IDs and native values as
//! [`U256`] which serialize as decimal strings on the wire, matching how
//! NFT token IDs are usually written.

use std::str::FromStr;

use alloy_primitives::{Address, Bytes, TxHash, U256};
use serde::{Deserialize, Serialize};

use crate::constants::{ChainId, ERC6551_ACCOUNT_IMPLEMENTATION_ADDRESS, ERC6551_REGISTRY_ADDRESS};
use crate::error::TokenboundError;

/// Parses a `0x`-prefixed, 20-byte hex address.
///
/// All-lowercase and all-uppercase inputs are accepted as-is. Mixed-case
/// inputs must carry a valid EIP-55 checksum.
///
/// # Errors
///
/// Returns [`TokenboundError::InvalidAddress`] if the prefix, length, digits or
/// checksum are wrong.
pub fn parse_address(input: &str) -> Result<Address, TokenboundError> {
    let invalid = |reason: &str| TokenboundError::InvalidAddress {
        input: input.to_owned(),
        reason: reason.to_owned(),
    };
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| invalid("missing 0x prefix"))?;
    if digits.len() != 40 {
        return Err(invalid(&format!(
            "expected 40 hex digits, got {}",
            digits.len()
        )));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid("contains non-hex characters"));
    }
    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        Address::parse_checksummed(format!("0x{digits}"), None)
            .map_err(|e| invalid(&e.to_string()))
    } else {
        Address::from_str(digits).map_err(|e| invalid(&e.to_string()))
    }
}

/// Parses a token ID written as a decimal string (`0x` hex is also accepted).
///
/// # Errors
///
/// Returns [`TokenboundError::InvalidTokenId`] if the text is empty or is not an
/// unsigned 256-bit integer.
pub fn parse_token_id(input: &str) -> Result<U256, TokenboundError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TokenboundError::InvalidTokenId(input.to_owned()));
    }
    U256::from_str(trimmed).map_err(|_| TokenboundError::InvalidTokenId(input.to_owned()))
}

/// An NFT reference: the token contract plus the token ID within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenIdentity {
    /// ERC-721 (or ERC-1155) contract address.
    pub token_contract: Address,
    /// Token ID within `token_contract`.
    #[serde(with = "u256_decimal")]
    pub token_id: U256,
}

impl TokenIdentity {
    /// Creates a token identity from typed parts.
    #[must_use]
    pub const fn new(token_contract: Address, token_id: U256) -> Self {
        Self {
            token_contract,
            token_id,
        }
    }

    /// Parses a token identity from an address string and a decimal token ID.
    ///
    /// # Errors
    ///
    /// Returns [`TokenboundError::InvalidAddress`] or
    /// [`TokenboundError::InvalidTokenId`] for malformed input.
    pub fn parse(token_contract: &str, token_id: &str) -> Result<Self, TokenboundError> {
        Ok(Self {
            token_contract: parse_address(token_contract)?,
            token_id: parse_token_id(token_id)?,
        })
    }
}

/// Optional overrides for the account implementation and registry contracts.
///
/// Unset fields fall through to the next layer: per-call overrides, then the
/// client-level overrides, then [`ERC6551_ACCOUNT_IMPLEMENTATION_ADDRESS`] and
/// [`ERC6551_REGISTRY_ADDRESS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationRef {
    /// Account implementation override.
    #[serde(
        rename = "implementationAddress",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub implementation: Option<Address>,
    /// Registry override.
    #[serde(
        rename = "registryAddress",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub registry: Option<Address>,
}

impl ImplementationRef {
    /// Creates an override set.
    #[must_use]
    pub const fn new(implementation: Option<Address>, registry: Option<Address>) -> Self {
        Self {
            implementation,
            registry,
        }
    }

    /// Sets the implementation override, consuming and returning `self`.
    #[must_use]
    pub const fn with_implementation(mut self, implementation: Address) -> Self {
        self.implementation = Some(implementation);
        self
    }

    /// Sets the registry override, consuming and returning `self`.
    #[must_use]
    pub const fn with_registry(mut self, registry: Address) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Fills each unset field from `fallback`.
    #[must_use]
    pub const fn or(self, fallback: Self) -> Self {
        Self {
            implementation: match self.implementation {
                Some(a) => Some(a),
                None => fallback.implementation,
            },
            registry: match self.registry {
                Some(a) => Some(a),
                None => fallback.registry,
            },
        }
    }

    /// The implementation address, or the default implementation.
    #[must_use]
    pub fn implementation_or_default(&self) -> Address {
        self.implementation
            .unwrap_or(ERC6551_ACCOUNT_IMPLEMENTATION_ADDRESS)
    }

    /// The registry address, or the default registry.
    #[must_use]
    pub fn registry_or_default(&self) -> Address {
        self.registry.unwrap_or(ERC6551_REGISTRY_ADDRESS)
    }
}

/// Arguments for `get_account`, `prepare_create_account` and `create_account`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountParams {
    /// The NFT the account is bound to.
    #[serde(flatten)]
    pub token: TokenIdentity,
    /// Per-call contract overrides.
    #[serde(flatten)]
    pub overrides: ImplementationRef,
}

impl AccountParams {
    /// Creates parameters without overrides.
    #[must_use]
    pub const fn new(token_contract: Address, token_id: U256) -> Self {
        Self {
            token: TokenIdentity::new(token_contract, token_id),
            overrides: ImplementationRef::new(None, None),
        }
    }

    /// Overrides the account implementation for this call.
    #[must_use]
    pub const fn with_implementation(mut self, implementation: Address) -> Self {
        self.overrides = self.overrides.with_implementation(implementation);
        self
    }

    /// Overrides the registry for this call.
    #[must_use]
    pub const fn with_registry(mut self, registry: Address) -> Self {
        self.overrides = self.overrides.with_registry(registry);
        self
    }
}

impl From<TokenIdentity> for AccountParams {
    fn from(token: TokenIdentity) -> Self {
        Self {
            token,
            overrides: ImplementationRef::default(),
        }
    }
}

/// Arguments for `prepare_execute_call` and `execute_call`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteCallParams {
    /// The token-bound account that performs the call.
    pub account: Address,
    /// Call target.
    pub to: Address,
    /// Native value the account forwards with the call.
    #[serde(with = "u256_decimal")]
    pub value: U256,
    /// Calldata for `to`.
    #[serde(default)]
    pub data: Bytes,
}

/// An unsent transaction: destination, native value and calldata.
///
/// Any backend able to sign and broadcast `{to, value, data}` can submit it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedTransaction {
    /// Destination contract.
    pub to: Address,
    /// Native value in wei.
    #[serde(with = "u256_decimal")]
    pub value: U256,
    /// ABI-encoded calldata.
    pub data: Bytes,
}

/// A submitted `createAccount` call and the account it deploys.
///
/// `chain_id` is the chain encoded into the call, which for a wallet client
/// is the wallet's chain rather than the client's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDeployment {
    /// Address the registry deploys to.
    pub account: Address,
    /// Chain encoded into the registry call.
    pub chain_id: ChainId,
    /// Hash returned by the backend.
    pub transaction_hash: TxHash,
}

/// Serde helpers writing [`U256`] as a decimal string.
///
/// Deserialization also accepts `0x` hex strings and non-negative JSON
/// integers up to `u64::MAX`. Larger values must be written as strings, since
/// JSON numbers beyond that range lose precision.
pub(crate) mod u256_decimal {
    use std::fmt;
    use std::str::FromStr;

    use alloy_primitives::U256;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    const EXPECTED: &str = "an unsigned integer as a decimal or 0x-hex string";

    pub(crate) fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<U256, D::Error> {
        deserializer.deserialize_any(U256Visitor)
    }

    struct U256Visitor;

    impl Visitor<'_> for U256Visitor {
        type Value = U256;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(EXPECTED)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<U256, E> {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                return Err(E::custom(format!("invalid unsigned integer {v:?}")));
            }
            U256::from_str(trimmed).map_err(E::custom)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<U256, E> {
            Ok(U256::from(v))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<U256, E> {
            Ok(U256::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<U256, E> {
            u64::try_from(v)
                .map(U256::from)
                .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<U256, E> {
            Err(E::custom(format!(
                "number {v} is not an exact unsigned integer; write values above {} as a \
                 decimal string",
                u64::MAX
            )))
        }
    }
}
