//! Federated address format for the Payshares network.
//!
//! A federated address is a human-readable handle of the form `name*domain`
//! that an external federation server resolves to a network account ID.
//!
//! Combining is a plain formatting operation for parts the caller already
//! trusts. Splitting is the untrusted-input boundary: it rejects malformed
//! strings and reports which part was wrong.
//!
//! ```
//! use payshares_address::{combine, split, AddressError};
//!
//! assert_eq!(combine("scott", "payshares.org"), "scott*payshares.org");
//! assert_eq!(split("scott*payshares.org"), Ok(("scott", "payshares.org")));
//! assert_eq!(split("scott*"), Err(AddressError::InvalidDomain));
//! ```

mod domain;
mod error;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use domain::{is_valid_domain, MAX_DOMAIN_LEN, MAX_LABEL_LEN};
pub use error::AddressError;

/// Separator between the name and domain segments.
pub const SEPARATOR: char = '*';

/// Joins `name` and `domain` with the separator.
///
/// No validation is performed; either part may be empty.
pub fn combine(name: &str, domain: &str) -> String {
    let mut address = String::with_capacity(name.len() + domain.len() + 1);
    address.push_str(name);
    address.push(SEPARATOR);
    address.push_str(domain);
    address
}

/// Splits a combined address into its `(name, domain)` parts.
///
/// # Errors
///
/// - [`AddressError::InvalidAddress`] if the string is not exactly two
///   segments around a single separator (this includes the empty string).
/// - [`AddressError::InvalidName`] if the name segment is empty.
/// - [`AddressError::InvalidDomain`] if the domain segment is empty or fails
///   the hostname grammar of [`is_valid_domain`].
pub fn split(address: &str) -> Result<(&str, &str), AddressError> {
    let result = split_parts(address);
    if let Err(err) = result {
        tracing::debug!(code = err.code(), len = address.len(), "rejected federated address");
    }
    result
}

fn split_parts(address: &str) -> Result<(&str, &str), AddressError> {
    let (name, domain) = address
        .split_once(SEPARATOR)
        .ok_or(AddressError::InvalidAddress)?;
    if domain.contains(SEPARATOR) {
        return Err(AddressError::InvalidAddress);
    }
    if name.is_empty() {
        return Err(AddressError::InvalidName);
    }
    if !is_valid_domain(domain) {
        return Err(AddressError::InvalidDomain);
    }
    Ok((name, domain))
}

/// An owned `(name, domain)` federated address.
///
/// Values built with [`FederatedAddress::new`] are not validated; values
/// obtained through [`FederatedAddress::parse`], [`FromStr`] or serde
/// deserialization have passed [`split`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FederatedAddress {
    name: String,
    domain: String,
}

impl FederatedAddress {
    /// Builds an address from parts without validating them.
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
        }
    }

    /// Parses and validates a combined address string.
    pub fn parse(address: &str) -> Result<Self, AddressError> {
        let (name, domain) = split(address)?;
        Ok(Self::new(name, domain))
    }

    /// The name segment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The domain segment.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns `true` if either segment is non-empty.
    pub fn is_present(&self) -> bool {
        !self.name.is_empty() || !self.domain.is_empty()
    }
}

impl fmt::Display for FederatedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, SEPARATOR, self.domain)
    }
}

impl FromStr for FederatedAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for FederatedAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FederatedAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
