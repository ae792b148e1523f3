//! String values whose JSON wire form may be a number or a string.
//!
//! Some protocol fields (federation `memo`, compliance `route`) were
//! historically emitted either as bare integers or as quoted strings. A
//! [`FlexValue`] accepts both on input and always holds a `String`.
//!
//! Output is canonical: a value that is the canonical decimal rendering of a
//! `u64` is written unquoted, anything else is written as a JSON string.
//! Decoding then re-encoding a numeric wire value normalizes its spelling.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ProtocolError;

/// A string that travels as either a JSON unsigned integer or a JSON string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlexValue(String);

impl FlexValue {
    /// Wraps a string value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The normalized string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the value, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the integer this value encodes as, if any.
    ///
    /// Only canonical spellings qualify: no sign, no surrounding whitespace,
    /// no leading zeros (except `"0"` itself), and the value must fit a `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        canonical_u64(&self.0)
    }

    /// Decodes a raw JSON value.
    ///
    /// An unsigned integer literal is normalized to its base-10 rendering; a
    /// JSON string is taken verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::FlexDecode`] carrying the string parse error
    /// if the input is neither form.
    pub fn decode(wire: &[u8]) -> Result<Self, ProtocolError> {
        if let Ok(number) = serde_json::from_slice::<u64>(wire) {
            return Ok(Self(number.to_string()));
        }
        match serde_json::from_slice::<String>(wire) {
            Ok(text) => Ok(Self(text)),
            Err(err) => {
                tracing::debug!(error = %err, "flex value is neither integer nor string");
                Err(ProtocolError::FlexDecode(err))
            }
        }
    }

    /// Encodes the value as raw JSON.
    pub fn encode(&self) -> Vec<u8> {
        match self.as_u64() {
            Some(_) => self.0.as_bytes().to_vec(),
            None => quote(&self.0).into_bytes(),
        }
    }
}

fn canonical_u64(text: &str) -> Option<u64> {
    let bytes = text.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    text.parse().ok()
}

fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_owned()).to_string()
}

impl fmt::Display for FlexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for FlexValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for FlexValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for FlexValue {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<FlexValue> for String {
    fn from(value: FlexValue) -> Self {
        value.0
    }
}

impl AsRef<str> for FlexValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for FlexValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_u64() {
            Some(number) => serializer.serialize_u64(number),
            None => serializer.serialize_str(&self.0),
        }
    }
}

struct FlexVisitor;

impl<'de> Visitor<'de> for FlexVisitor {
    type Value = FlexValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an unsigned integer or a string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(FlexValue(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(FlexValue(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(FlexValue(v))
    }
}

impl<'de> Deserialize<'de> for FlexValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FlexVisitor)
    }
}
