//! Wire shapes of the customers API.
//!
//! Records are taken as the server sends them: nothing here validates or
//! normalizes field contents.

use serde::{Deserialize, Deserializer, Serialize};

/// A customer as returned by the API
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Customer {
    #[serde(default, deserialize_with = "opaque_id")]
    pub customer_id: String,
    #[serde(default, deserialize_with = "text")]
    pub first_name: String,
    #[serde(default, deserialize_with = "text")]
    pub last_name: String,
    #[serde(default, deserialize_with = "text")]
    pub nickname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub email: String,
    #[serde(default, deserialize_with = "text")]
    pub gender: String,
    #[serde(default, deserialize_with = "text")]
    pub birthday: String,
    #[serde(default)]
    pub is_active: bool,
}

/// An address under a single customer
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Address {
    #[serde(default, deserialize_with = "opaque_id")]
    pub customer_id: String,
    #[serde(default, deserialize_with = "opaque_id")]
    pub address_id: String,
    #[serde(default, deserialize_with = "text")]
    pub address: String,
}

/// Body sent on customer create/update. Never carries the id.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CustomerPayload {
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub email: String,
    pub gender: String,
    pub birthday: String,
    pub is_active: bool,
}

/// Body sent on address create/update
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AddressPayload {
    pub address: String,
}

/// Failure body; only `message` is read.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

// Ids are server-assigned integers today, but the client treats them as text.
fn opaque_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Int(n)) => n.to_string(),
        Some(RawId::Text(s)) => s,
        None => String::new(),
    })
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
