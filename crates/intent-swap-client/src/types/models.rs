/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs for chains, tokens, quotes and intents
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Chain supported by the swap API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chain {
    pub chain_id: u64,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Token known to the swap API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub chain_id: u64,
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Quote for a cross-chain swap; amounts are base-unit integer strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub intent_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_out: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Server-reported state of an intent
///
/// `status` is passed through as sent; this crate attaches no meaning to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentStatus {
    pub intent_id: String,
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
