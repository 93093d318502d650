use serde::Deserialize;

/// Failure of an `/adapt` or `/ingest` round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 404: nothing has been ingested for the requested chapter yet.
    NotIndexed { detail: Option<String> },
    /// Any other non-2xx status. `message` is the backend detail when one was
    /// sent, else the status text.
    Status { status: u16, message: String },
    Network(String),
    Decode(String),
}

impl ApiError {
    pub const NOT_INDEXED_STATUS: u16 = 404;

    /// Classify a non-2xx response from its status line and raw body.
    pub fn from_response(status: u16, status_text: &str, body: &str) -> ApiError {
        let detail = detail_from_body(body);
        if status == Self::NOT_INDEXED_STATUS {
            return ApiError::NotIndexed { detail };
        }
        let message = detail.unwrap_or_else(|| {
            let text = status_text.trim();
            if text.is_empty() {
                format!("HTTP {status}")
            } else {
                text.to_string()
            }
        });
        ApiError::Status { status, message }
    }

    pub fn is_not_indexed(&self) -> bool {
        matches!(self, ApiError::NotIndexed { .. })
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotIndexed { detail: Some(d) } => f.write_str(d),
            ApiError::NotIndexed { detail: None } => {
                f.write_str("no content indexed for this chapter")
            }
            ApiError::Status { message, .. } => f.write_str(message),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Decode(msg) => write!(f, "unexpected response: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Pull a human-readable `detail` out of an error body.
///
/// FastAPI sends either `{"detail": "text"}` or, for validation failures,
/// `{"detail": [{"msg": "...", ...}, ...]}`.
pub fn detail_from_body(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok()?;
    match parsed.detail? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() {
                Some(serde_json::Value::Array(items.clone()).to_string())
            } else {
                Some(msgs.join("; "))
            }
        }
        other => Some(other.to_string()),
    }
}
