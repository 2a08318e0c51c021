//! Payloads and response envelopes for the marketplace BFF.
//!
//! # Design
//! The domain records belong to the backend. The client names the fields it
//! knows as optional values and keeps everything else in a flattened map, so
//! whatever the caller sends or the backend returns passes through unmodified.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// A question asked on an advertising.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisingQuestion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An answer to an advertising question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisingQuestionAnswer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A monetary offer made against an advertising.
///
/// Identifiers stay as raw JSON values and `value` as a JSON number, so
/// whatever representation the backend picks comes back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertising_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_id: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Generic BFF response body: a success flag plus whatever else was sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a successful deal creation. Callers only ever see `deal`.
#[derive(Debug, Clone, Deserialize)]
pub struct DealEnvelope {
    #[serde(default)]
    pub ok: bool,
    pub deal: Deal,
}

/// Home feed: four poultry collections grouped by category, plus any other
/// envelope fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeFeed {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ok: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub female_chickens: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub male_chickens: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub matrixes: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reproductives: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Search page: matching advertisings and the total page count, plus any
/// other envelope fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ok: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub advertisings: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pages: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An explicit `null` reads the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
