//! Typed route inputs
//!
//! Every route parses its query string or JSON body into one of these
//! structs and runs [`ProxyRequest::validate`] before anything is forwarded.

use crate::error::ValidationError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Input of one route
pub trait ProxyRequest: DeserializeOwned + Send {
    /// Operation label used in logs and metrics
    const OPERATION: &'static str;

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// `GET /_indices`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndicesQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub index: Option<String>,
}

impl ProxyRequest for IndicesQuery {
    const OPERATION: &'static str = "get_indices";
}

/// `GET /_aliases`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AliasesQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub alias: Option<String>,
}

impl ProxyRequest for AliasesQuery {
    const OPERATION: &'static str = "get_aliases";
}

/// `GET /_mappings`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MappingsQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub index: Option<String>,
}

impl ProxyRequest for MappingsQuery {
    const OPERATION: &'static str = "get_mappings";
}

/// `POST /_search`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub index: String,
    #[serde(default)]
    pub query: Option<Value>,
    /// Defaults to 0: the UI mostly searches for aggregations only
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub sort: Option<Value>,
    #[serde(default)]
    pub collapse: Option<Value>,
    #[serde(default)]
    pub aggs: Option<Value>,
    /// Sent verbatim as the search body when present
    #[serde(default)]
    pub raw_query: Option<Value>,
}

impl SearchRequest {
    pub fn size(&self) -> u64 {
        self.size.unwrap_or(0)
    }

    /// Body forwarded to the cluster.
    ///
    /// `rawQuery` wins outright. Otherwise only the fields that were given
    /// are included; absent ones are left out rather than sent as null.
    pub fn into_body(self) -> Value {
        if let Some(raw) = self.raw_query {
            return raw;
        }

        let mut body = Map::new();
        let fields = [
            ("query", self.query),
            ("sort", self.sort),
            ("collapse", self.collapse),
            ("aggs", self.aggs),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                body.insert(key.to_string(), value);
            }
        }
        Value::Object(body)
    }
}

impl ProxyRequest for SearchRequest {
    const OPERATION: &'static str = "search";

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("index", &self.index)?;
        require_object("rawQuery", self.raw_query.as_ref())?;
        require_object("query", self.query.as_ref())?;
        require_object("collapse", self.collapse.as_ref())?;
        require_object("aggs", self.aggs.as_ref())?;
        if let Some(sort) = &self.sort {
            if !(sort.is_object() || sort.is_array() || sort.is_string()) {
                return Err(ValidationError::InvalidField {
                    field: "sort",
                    reason: "expected an object, array or string".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// `PUT /create_index`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIndexRequest {
    pub index_config: IndexConfig,
}

/// Index name plus the settings/mappings body it is created with
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    pub index: String,
    #[serde(default)]
    pub body: Option<Value>,
}

impl ProxyRequest for CreateIndexRequest {
    const OPERATION: &'static str = "create_index";

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("indexConfig.index", &self.index_config.index)?;
        require_object("indexConfig.body", self.index_config.body.as_ref())
    }
}

/// `POST /bulk`
#[derive(Debug, Clone, Deserialize)]
pub struct BulkRequest {
    /// Action/document lines as a JSON array, or a pre-encoded NDJSON string
    pub body: Value,
}

impl ProxyRequest for BulkRequest {
    const OPERATION: &'static str = "bulk";

    fn validate(&self) -> Result<(), ValidationError> {
        match &self.body {
            Value::Array(lines) if lines.is_empty() => Err(ValidationError::EmptyField("body")),
            Value::Array(lines) => match lines.iter().position(|l| !l.is_object()) {
                Some(i) => Err(ValidationError::InvalidField {
                    field: "body",
                    reason: format!("line {} is not an object", i),
                }),
                None => Ok(()),
            },
            Value::String(s) if s.trim().is_empty() => Err(ValidationError::EmptyField("body")),
            Value::String(_) => Ok(()),
            _ => Err(ValidationError::InvalidField {
                field: "body",
                reason: "expected an array of objects or an NDJSON string".to_string(),
            }),
        }
    }
}

/// `POST /delete_index`
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteIndexRequest {
    pub index: String,
}

impl ProxyRequest for DeleteIndexRequest {
    const OPERATION: &'static str = "delete_index";

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("index", &self.index)
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(())
    }
}

fn require_object(field: &'static str, value: Option<&Value>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_object() => Err(ValidationError::InvalidField {
            field,
            reason: "expected an object".to_string(),
        }),
        _ => Ok(()),
    }
}

/// `?index=` is treated the same as leaving the parameter out
fn empty_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
