use serde_json::Value;

/// Error type the cluster reports when an index pattern matches nothing
pub const INDEX_NOT_FOUND_EXCEPTION: &str = "index_not_found_exception";

/// Failure of a forwarded cluster action
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ClusterError {
    /// HTTP status reported by the cluster; `None` for transport failures
    pub status: Option<u16>,
    /// Nested `error.type` of a structured cluster error body
    pub error_type: Option<String>,
    pub message: String,
}

impl ClusterError {
    pub fn new(status: Option<u16>, error_type: Option<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error_type,
            message: message.into(),
        }
    }

    /// Error raised before or without a cluster response
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(None, None, message)
    }

    /// Build from a non-2xx response. Structured bodies look like
    /// `{"error": {"type": "...", "reason": "..."}, "status": 404}`.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        let error = parsed.as_ref().and_then(|v| v.get("error"));

        let error_type = error
            .and_then(|e| e.get("type"))
            .and_then(Value::as_str)
            .map(String::from);
        let reason = error.and_then(|e| e.get("reason")).and_then(Value::as_str);

        let message = match (&error_type, reason, error) {
            (Some(t), Some(r), _) => format!("[{}] {}", t, r),
            (Some(t), None, _) => t.clone(),
            // Some endpoints report `{"error": "message"}`
            (None, _, Some(Value::String(s))) => s.clone(),
            _ if !body.trim().is_empty() => body.trim().to_string(),
            _ => reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown error")
                .to_string(),
        };

        Self::new(Some(status), error_type, message)
    }

    /// The cluster reported that the referenced index pattern matches nothing
    pub fn is_index_not_found(&self) -> bool {
        self.status == Some(404) && self.error_type.as_deref() == Some(INDEX_NOT_FOUND_EXCEPTION)
    }

    /// Short label used in metrics
    pub fn kind(&self) -> String {
        match self.status {
            Some(status) => status.to_string(),
            None => "transport".to_string(),
        }
    }
}

impl From<reqwest::Error> for ClusterError {
    fn from(e: reqwest::Error) -> Self {
        let status = e.status().map(|s| s.as_u16());
        let message = if e.is_timeout() {
            format!("Request timed out: {}", e)
        } else {
            e.to_string()
        };
        Self::new(status, None, message)
    }
}
