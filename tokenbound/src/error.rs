//! Error types for the token-bound account SDK.

/// Failure raised by a caller-supplied signer or wallet client.
///
/// The SDK never inspects these; they are carried to the caller as-is.
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

/// Invalid or conflicting client construction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// `chain_id` was not provided, or was zero.
    #[error("chain id is required and must be non-zero")]
    MissingChainId,
    /// Both a raw signer and a wallet client were supplied.
    #[error("only one of signer or wallet client may be provided")]
    ConflictingBackends,
}

/// Errors returned by [`TokenboundClient`](crate::TokenboundClient) and the
/// parsing helpers.
#[derive(Debug, thiserror::Error)]
pub enum TokenboundError {
    /// Client options were rejected at construction.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Address text is not a well-formed 20-byte hex address.
    #[error("invalid address {input:?}: {reason}")]
    InvalidAddress {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Token ID text is not an unsigned 256-bit integer.
    #[error("invalid token id {0:?}")]
    InvalidTokenId(String),

    /// A submitting operation was called on a client with no backend bound.
    #[error("no signer or wallet client bound to this client")]
    NoBackend,

    /// The signer or wallet client failed.
    #[error(transparent)]
    Backend(BackendError),
}

impl TokenboundError {
    /// Returns the untouched backend failure, if this error came from one.
    ///
    /// Use this to downcast to the concrete error type of the signer or
    /// wallet library in use.
    #[must_use]
    pub fn backend_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Backend(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
