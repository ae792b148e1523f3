//! Federation protocol response records.
//!
//! These are the bodies a federation server returns for `name`, `forward`
//! and `id` lookups. Transport and lookup are handled elsewhere; this module
//! only fixes the record shapes and their JSON encoding.

use payshares_address::{AddressError, FederatedAddress};
use serde::{Deserialize, Serialize};

use crate::flex::FlexValue;

/// Memo attached to a federation name response.
///
/// Federation servers send memos as either integers or strings.
pub type Memo = FlexValue;

/// Result of a federation `name` or `forward` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameResponse {
    /// The network account ID the address resolves to.
    pub account_id: String,
    /// Memo type the sender must use (e.g. `"text"`, `"id"`, `"hash"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_type: Option<String>,
    /// Memo value the sender must attach.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<Memo>,
}

impl NameResponse {
    /// Builds a response with no memo.
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            ..Self::default()
        }
    }

    /// Attaches a memo of the given type.
    pub fn with_memo(mut self, memo_type: impl Into<String>, memo: impl Into<Memo>) -> Self {
        self.memo_type = Some(memo_type.into());
        self.memo = Some(memo.into());
        self
    }
}

/// Result of a federation `id` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdResponse {
    /// The combined federated address, as sent by the server.
    #[serde(rename = "payshares_address")]
    pub address: String,
}

impl IdResponse {
    /// Parses the returned address.
    ///
    /// The record itself stores the server's string unvalidated.
    pub fn federated_address(&self) -> Result<FederatedAddress, AddressError> {
        FederatedAddress::parse(&self.address)
    }
}
