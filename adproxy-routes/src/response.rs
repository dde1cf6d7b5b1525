//! Response envelope and payload types

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Uniform result shape of every route
///
/// Serializes as `{"ok": true, "response": T}` or
/// `{"ok": false, "error": "<message>"}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Ok(T),
    Err(String),
}

impl<T> Envelope<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Envelope<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Self::Ok(v),
            Err(e) => Self::Err(e.to_string()),
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Envelope", 2)?;
        match self {
            Self::Ok(response) => {
                state.serialize_field("ok", &true)?;
                state.serialize_field("response", response)?;
            }
            Self::Err(error) => {
                state.serialize_field("ok", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

/// `_cat/indices` rows, exactly as the cluster returns them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetIndicesResponse {
    pub indices: Value,
}

/// `_cat/aliases` rows, exactly as the cluster returns them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetAliasesResponse {
    pub aliases: Value,
}

/// Mappings keyed by index name, exactly as the cluster returns them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetMappingResponse {
    pub mappings: Value,
}

/// Raw bulk result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkResponse {
    pub response: Value,
}
