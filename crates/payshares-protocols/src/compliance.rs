//! Compliance protocol records.
//!
//! A sending institution posts an [`AuthRequest`] to the receiver's
//! compliance server. The request wraps a JSON-encoded [`AuthData`], which in
//! turn wraps a JSON-encoded [`Attachment`] whose hash is committed to in the
//! transaction memo. The receiver answers with an [`AuthResponse`].
//!
//! Signature verification is performed by the caller; this module only
//! checks field shapes.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use payshares_address::FederatedAddress;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ProtocolError;
use crate::flex::FlexValue;

/// Routing hint inside an attachment; integers and strings are both accepted.
pub type Route = FlexValue;

/// Status returned by a compliance auth server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    /// Authentication succeeded.
    Ok,
    /// Authentication has not been decided yet.
    Pending,
    /// Authentication was refused.
    Denied,
}

/// Request sent to a compliance server's auth endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRequest {
    /// Marshalled [`AuthData`] JSON.
    ///
    /// Kept as the exact signed string: re-marshalling would not reproduce
    /// the bytes the signature covers.
    #[serde(rename = "data")]
    pub data_json: String,
    /// Base64 signature of `data_json` by the sending institution.
    #[serde(rename = "sig")]
    pub signature: String,
}

impl AuthRequest {
    /// Checks that `data` is JSON and `sig` is base64.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        require_json("data", &self.data_json)?;
        require_base64("sig", &self.signature)?;
        Ok(())
    }

    /// Decodes the wrapped [`AuthData`].
    pub fn data(&self) -> Result<AuthData, ProtocolError> {
        Ok(serde_json::from_str(&self.data_json)?)
    }
}

/// Payload of an [`AuthRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthData {
    /// Federated address of the customer initiating the payment.
    pub sender: String,
    /// Whether the sender needs the recipient's AML information.
    pub need_info: bool,
    /// The unsigned transaction, base64 XDR.
    pub tx: String,
    /// Full text of the attachment whose hash the transaction commits to.
    #[serde(rename = "attachment")]
    pub attachment_json: String,
}

impl AuthData {
    /// Checks the sender address, the transaction envelope and the attachment.
    ///
    /// Returns the parsed sender on success.
    pub fn validate(&self) -> Result<FederatedAddress, ProtocolError> {
        let sender = self.sender_address()?;
        require_base64("tx", &self.tx)?;
        require_json("attachment", &self.attachment_json)?;
        Ok(sender)
    }

    /// Parses `sender` as a federated address.
    pub fn sender_address(&self) -> Result<FederatedAddress, ProtocolError> {
        FederatedAddress::parse(&self.sender).map_err(|source| ProtocolError::Address {
            field: "sender",
            source,
        })
    }

    /// Decodes the wrapped [`Attachment`].
    pub fn attachment(&self) -> Result<Attachment, ProtocolError> {
        Ok(serde_json::from_str(&self.attachment_json)?)
    }
}

/// Answer from a compliance auth server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Whether the receiver will share AML information.
    pub info_status: AuthStatus,
    /// Whether the receiver will accept the transaction.
    pub tx_status: AuthStatus,
    /// Recipient AML information, present only when `info_status` is ok.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_info: Option<String>,
    /// Seconds until the sender should retry, present only while pending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<u64>,
}

/// Preimage of the compliance attachment convention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    pub nonce: String,
    pub transaction: Transaction,
    pub operations: Vec<Operation>,
}

impl Attachment {
    /// Serializes the attachment to its canonical JSON form.
    pub fn marshal(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    /// SHA-256 of [`Attachment::marshal`].
    pub fn hash(&self) -> Result<[u8; 32], ProtocolError> {
        let json = self.marshal()?;
        Ok(Sha256::digest(json.as_bytes()).into())
    }

    /// Hex encoding of [`Attachment::hash`].
    pub fn hash_hex(&self) -> Result<String, ProtocolError> {
        Ok(hex::encode(self.hash()?))
    }
}

/// Transaction-level section of an [`Attachment`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    pub sender_info: BTreeMap<String, String>,
    pub route: Route,
    pub note: String,
    pub extra: String,
}

/// Per-operation overrides of the [`Transaction`] fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Operation {
    pub sender_info: BTreeMap<String, String>,
    pub route: Route,
    pub note: String,
}

/// Standardized sender fields for `sender_info` maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SenderInfo {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub middle_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub province: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub postal_code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub date_of_birth: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub company_name: String,
}

impl SenderInfo {
    /// Returns the set fields keyed by their wire names.
    pub fn map(&self) -> BTreeMap<String, String> {
        [
            ("first_name", &self.first_name),
            ("middle_name", &self.middle_name),
            ("last_name", &self.last_name),
            ("address", &self.address),
            ("city", &self.city),
            ("province", &self.province),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
            ("email", &self.email),
            ("phone", &self.phone),
            ("date_of_birth", &self.date_of_birth),
            ("company_name", &self.company_name),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
    }
}

fn require_json(field: &'static str, value: &str) -> Result<(), ProtocolError> {
    if value.is_empty() {
        return Err(ProtocolError::invalid(field, "is required"));
    }
    serde_json::from_str::<serde_json::Value>(value)
        .map(|_| ())
        .map_err(|err| ProtocolError::invalid(field, format!("not valid JSON: {err}")))
}

fn require_base64(field: &'static str, value: &str) -> Result<(), ProtocolError> {
    if value.is_empty() {
        return Err(ProtocolError::invalid(field, "is required"));
    }
    STANDARD
        .decode(value)
        .map(|_| ())
        .map_err(|err| ProtocolError::invalid(field, format!("not valid base64: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use payshares_address::AddressError;

    fn attachment() -> Attachment {
        let sender = SenderInfo {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            country: "US".to_string(),
            ..SenderInfo::default()
        };
        Attachment {
            nonce: "1488805458327055805".to_string(),
            transaction: Transaction {
                sender_info: sender.map(),
                route: Route::from(1u64),
                note: "Invoice 42".to_string(),
                extra: String::new(),
            },
            operations: vec![],
        }
    }

    fn auth_data() -> AuthData {
        AuthData {
            sender: "alice*bank.example".to_string(),
            need_info: false,
            tx: STANDARD.encode(b"unsigned transaction envelope"),
            attachment_json: attachment().marshal().unwrap(),
        }
    }

    #[test]
    fn auth_status_wire_values() {
        assert_eq!(serde_json::to_string(&AuthStatus::Ok).unwrap(), "\"ok\"");
        assert_eq!(serde_json::to_string(&AuthStatus::Pending).unwrap(), "\"pending\"");
        assert_eq!(serde_json::to_string(&AuthStatus::Denied).unwrap(), "\"denied\"");
        assert!(serde_json::from_str::<AuthStatus>("\"OK\"").is_err());
    }

    #[test]
    fn auth_response_omits_absent_fields() {
        let response = AuthResponse {
            info_status: AuthStatus::Ok,
            tx_status: AuthStatus::Pending,
            dest_info: None,
            pending: Some(3600),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"info_status":"ok","tx_status":"pending","pending":3600}"#);
    }

    #[test]
    fn sender_info_map_contains_only_set_fields() {
        let info = SenderInfo {
            first_name: "John".to_string(),
            country: "US".to_string(),
            ..SenderInfo::default()
        };
        let map = info.map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["first_name"], "John");
        assert_eq!(map["country"], "US");
        assert!(SenderInfo::default().map().is_empty());
    }

    #[test]
    fn sender_info_map_matches_json_encoding() {
        let info = SenderInfo {
            email: "john@example.com".to_string(),
            date_of_birth: "1980-01-01".to_string(),
            ..SenderInfo::default()
        };
        let via_json: BTreeMap<String, String> =
            serde_json::from_value(serde_json::to_value(&info).unwrap()).unwrap();
        assert_eq!(info.map(), via_json);
    }

    #[test]
    fn route_accepts_integer_and_string() {
        let from_int: Transaction = serde_json::from_str(r#"{"route":12}"#).unwrap();
        let from_str: Transaction = serde_json::from_str(r#"{"route":"12"}"#).unwrap();
        assert_eq!(from_int.route, from_str.route);
        assert_eq!(from_int.route.as_str(), "12");

        let named: Operation = serde_json::from_str(r#"{"route":"desk-7"}"#).unwrap();
        assert_eq!(named.route.as_str(), "desk-7");
    }

    #[test]
    fn attachment_marshal_has_expected_shape() {
        let value: serde_json::Value =
            serde_json::from_str(&attachment().marshal().unwrap()).unwrap();
        assert_eq!(value["nonce"], "1488805458327055805");
        assert_eq!(value["transaction"]["route"], 1);
        assert_eq!(value["transaction"]["sender_info"]["first_name"], "John");
        assert!(value["operations"].as_array().unwrap().is_empty());
    }

    #[test]
    fn attachment_hash_is_deterministic() {
        let a = attachment();
        assert_eq!(a.hash().unwrap(), a.clone().hash().unwrap());
        assert_eq!(a.hash_hex().unwrap().len(), 64);

        let mut changed = a.clone();
        changed.transaction.note = "Invoice 43".to_string();
        assert_ne!(a.hash().unwrap(), changed.hash().unwrap());
    }

    #[test]
    fn auth_data_validates() {
        let data = auth_data();
        let sender = data.validate().unwrap();
        assert_eq!(sender.name(), "alice");
        assert_eq!(sender.domain(), "bank.example");
        assert_eq!(data.sender_address().unwrap(), sender);
        assert_eq!(data.attachment().unwrap(), attachment());
    }

    #[test]
    fn auth_data_rejects_bad_sender() {
        let mut data = auth_data();
        data.sender = "alice*".to_string();
        let err = data.validate().unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Address {
                field: "sender",
                source: AddressError::InvalidDomain
            }
        ));
    }

    #[test]
    fn auth_data_rejects_bad_tx_and_attachment() {
        let mut data = auth_data();
        data.tx = "not base64!".to_string();
        assert!(matches!(
            data.validate().unwrap_err(),
            ProtocolError::InvalidField { field: "tx", .. }
        ));

        let mut data = auth_data();
        data.attachment_json = "{not json".to_string();
        assert!(matches!(
            data.validate().unwrap_err(),
            ProtocolError::InvalidField { field: "attachment", .. }
        ));

        let mut data = auth_data();
        data.tx.clear();
        assert!(matches!(
            data.validate().unwrap_err(),
            ProtocolError::InvalidField { field: "tx", .. }
        ));
    }

    #[test]
    fn auth_request_round_trip_through_data() {
        let data_json = serde_json::to_string(&auth_data()).unwrap();
        let request = AuthRequest {
            data_json,
            signature: STANDARD.encode([7u8; 64]),
        };
        request.validate().unwrap();
        assert_eq!(request.data().unwrap(), auth_data());

        let wire = serde_json::to_value(&request).unwrap();
        assert!(wire.get("data").is_some());
        assert!(wire.get("sig").is_some());
    }

    #[test]
    fn auth_request_requires_fields() {
        let request = AuthRequest {
            data_json: String::new(),
            signature: "c2ln".to_string(),
        };
        assert!(matches!(
            request.validate().unwrap_err(),
            ProtocolError::InvalidField { field: "data", .. }
        ));

        let request = AuthRequest {
            data_json: "{}".to_string(),
            signature: "***".to_string(),
        };
        assert!(matches!(
            request.validate().unwrap_err(),
            ProtocolError::InvalidField { field: "sig", .. }
        ));
    }
}
