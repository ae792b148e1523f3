//! Error types for protocol record decoding and validation.

use payshares_address::AddressError;

/// Errors that can occur while decoding or validating protocol records.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A flexible value was neither an unsigned integer nor a JSON string.
    #[error("flex value decode error: {0}")]
    FlexDecode(#[source] serde_json::Error),

    /// JSON serialization or deserialization of a record failed.
    #[error("protocol serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record field failed validation.
    #[error("invalid field `{field}`: {reason}")]
    InvalidField {
        /// Wire name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// A field that must hold a federated address did not parse.
    #[error("invalid address in `{field}`: {source}")]
    Address {
        /// Wire name of the offending field.
        field: &'static str,
        /// The address parsing failure.
        #[source]
        source: AddressError,
    },
}

impl ProtocolError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
