//! Cluster client over the REST API

use super::action::{CAT_ALIASES_COLUMNS, CAT_INDICES_COLUMNS};
use super::{ClusterAction, ClusterClient, ClusterError, RequestContext};
use crate::config::ClusterConfig;
use crate::error::{Error, Result};
use crate::metrics::ClusterCallTimer;
use async_trait::async_trait;
use reqwest::header::{HeaderName, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde_json::Value;
use tracing::{debug, trace};

const NDJSON: &str = "application/x-ndjson";

/// [`ClusterClient`] backed by reqwest
pub struct HttpClusterClient {
    client: Client,
    base_url: Url,
    forwarded_headers: Vec<HeaderName>,
    basic_auth: Option<(String, String)>,
}

impl HttpClusterClient {
    pub fn new(config: &ClusterConfig) -> Result<Self> {
        let base_url = Url::parse(&config.url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", config.url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(config.url.clone()));
        }

        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;

        let forwarded_headers = config
            .forwarded_headers
            .iter()
            .map(|h| {
                HeaderName::from_bytes(h.trim().to_ascii_lowercase().as_bytes())
                    .map_err(|e| Error::Config(format!("forwarded header {:?}: {}", h, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        let basic_auth = match (&config.username, &config.password) {
            (Some(user), Some(pass)) => Some((user.clone(), pass.clone())),
            _ => None,
        };

        Ok(Self {
            client,
            base_url,
            forwarded_headers,
            basic_auth,
        })
    }

    /// Build `base_url` + segments, percent-encoding each segment
    fn url(&self, segments: &[&str]) -> std::result::Result<Url, ClusterError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClusterError::transport("cluster URL cannot be a base"))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn request(
        &self,
        ctx: &RequestContext,
        method: Method,
        url: Url,
    ) -> RequestBuilder {
        let mut builder = self.client.request(method, url);

        for name in &self.forwarded_headers {
            for value in ctx.headers.get_all(name) {
                builder = builder.header(name.clone(), value.clone());
            }
        }

        if !ctx.headers.contains_key(AUTHORIZATION) {
            if let Some((user, pass)) = &self.basic_auth {
                builder = builder.basic_auth(user, Some(pass));
            }
        }

        builder
    }

    fn build(
        &self,
        ctx: &RequestContext,
        action: ClusterAction,
    ) -> std::result::Result<RequestBuilder, ClusterError> {
        let builder = match action {
            ClusterAction::Search { index, size, body } => self
                .request(ctx, Method::POST, self.url(&[index.as_str(), "_search"])?)
                .query(&[("size", size)])
                .json(&body),
            ClusterAction::CatIndices { index } => {
                let url = match index.as_deref() {
                    Some(index) => self.url(&["_cat", "indices", index])?,
                    None => self.url(&["_cat", "indices"])?,
                };
                self.request(ctx, Method::GET, url)
                    .query(&[("format", "json"), ("h", CAT_INDICES_COLUMNS)])
            }
            ClusterAction::CatAliases { alias } => {
                let url = match alias.as_deref() {
                    Some(alias) => self.url(&["_cat", "aliases", alias])?,
                    None => self.url(&["_cat", "aliases"])?,
                };
                self.request(ctx, Method::GET, url)
                    .query(&[("format", "json"), ("h", CAT_ALIASES_COLUMNS)])
            }
            ClusterAction::CreateIndex { index, body } => self
                .request(ctx, Method::PUT, self.url(&[index.as_str()])?)
                .json(&body.unwrap_or_else(|| Value::Object(Default::default()))),
            ClusterAction::DeleteIndex { index } => {
                self.request(ctx, Method::DELETE, self.url(&[index.as_str()])?)
            }
            ClusterAction::GetMapping { index } => {
                let url = match index.as_deref() {
                    Some(index) => self.url(&[index, "_mapping"])?,
                    None => self.url(&["_mapping"])?,
                };
                self.request(ctx, Method::GET, url)
            }
            ClusterAction::Bulk { body } => self
                .request(ctx, Method::POST, self.url(&["_bulk"])?)
                .header(CONTENT_TYPE, NDJSON)
                .body(to_ndjson(&body)?),
        };
        Ok(builder)
    }
}

#[async_trait]
impl ClusterClient for HttpClusterClient {
    async fn call(
        &self,
        ctx: &RequestContext,
        action: ClusterAction,
    ) -> std::result::Result<Value, ClusterError> {
        let name = action.name();
        if !matches!(action, ClusterAction::Bulk { .. }) {
            trace!(request_id = %ctx.request_id, action = name, params = %action.params(), "cluster call");
        }

        let timer = ClusterCallTimer::new(name);
        let result = self.send(ctx, action).await;

        match &result {
            Ok(_) => timer.success(),
            Err(e) => {
                debug!(request_id = %ctx.request_id, action = name, status = ?e.status, "cluster call failed: {}", e);
                timer.error(&e.kind());
            }
        }
        result
    }
}

impl HttpClusterClient {
    async fn send(
        &self,
        ctx: &RequestContext,
        action: ClusterAction,
    ) -> std::result::Result<Value, ClusterError> {
        let response = self.build(ctx, action)?.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ClusterError::from_response(status.as_u16(), &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            ClusterError::new(
                Some(status.as_u16()),
                None,
                format!("Invalid JSON in cluster response: {}", e),
            )
        })
    }
}

/// Serialize a bulk payload as newline-delimited JSON.
///
/// Arrays become one document per line; strings are sent as they are.
/// The body is always newline-terminated, as the bulk API requires.
fn to_ndjson(body: &Value) -> std::result::Result<String, ClusterError> {
    let mut out = match body {
        Value::String(s) => s.clone(),
        Value::Array(lines) => {
            let mut out = String::new();
            for line in lines {
                let encoded = serde_json::to_string(line)
                    .map_err(|e| ClusterError::transport(format!("Invalid bulk line: {}", e)))?;
                out.push_str(&encoded);
                out.push('\n');
            }
            out
        }
        other => {
            return Err(ClusterError::transport(format!(
                "Bulk body must be an array or NDJSON string, got {}",
                json_kind(other)
            )))
        }
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
