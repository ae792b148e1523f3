//! Error types for federated address parsing.

/// Reasons a combined address string was rejected by [`split`](crate::split).
///
/// Variants are ordered by detection priority: a structurally malformed
/// string is reported as `InvalidAddress` even if its name is also empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum AddressError {
    /// The string does not contain exactly one `*` separator.
    #[error("invalid federated address")]
    InvalidAddress,

    /// The name segment before the separator is empty.
    #[error("invalid federated address name")]
    InvalidName,

    /// The domain segment is empty or is not a valid hostname.
    #[error("invalid federated address domain")]
    InvalidDomain,
}

impl AddressError {
    /// Returns a stable machine-readable code for this error.
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidAddress => "invalid_address",
            Self::InvalidName => "invalid_name",
            Self::InvalidDomain => "invalid_domain",
        }
    }
}
