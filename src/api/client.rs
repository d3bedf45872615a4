/// Blocking HTTP implementation of `SublimeApi`.
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde_json::{Map, Value, json};

use super::{ApiError, Artifact, Connect, DetectionInput, SublimeApi};

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Builds `HttpClient`s against one base URL.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    base_url: String,
    timeout: Duration,
}

impl HttpConnector {
    /// Connector for `base_url` with the default timeout.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl Connect for HttpConnector {
    fn connect(&self, api_key: &str) -> Result<Box<dyn SublimeApi>, ApiError> {
        let http = Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("sublime-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Box::new(HttpClient {
            http,
            base_url: self.base_url.clone(),
            api_key: api_key.to_owned(),
        }))
    }
}

/// API client bound to one key.
pub struct HttpClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl HttpClient {
    fn post(&self, path: &str, body: Map<String, Value>) -> Result<Value, ApiError> {
        let url = format!("{}/{path}", self.base_url);
        tracing::debug!(%url, "POST");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json()?);
        }

        let text = resp.text()?;
        let body = error_body(status, &text);
        if status == StatusCode::TOO_MANY_REQUESTS {
            Err(ApiError::RateLimited { body })
        } else {
            Err(ApiError::RequestFailed {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Parse an error response body, wrapping non-JSON text as `{"detail": ...}`.
fn error_body(status: StatusCode, text: &str) -> Value {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return value;
    }
    let detail = if text.trim().is_empty() {
        status.to_string()
    } else {
        text.trim().to_owned()
    };
    json!({ "detail": detail })
}

impl SublimeApi for HttpClient {
    fn enrich(&self, artifact: &Artifact) -> Result<Value, ApiError> {
        let mut body = Map::new();
        artifact.insert_into(&mut body);
        self.post("enrich", body)
    }

    fn analyze(&self, artifact: &Artifact, detections: &DetectionInput) -> Result<Value, ApiError> {
        let mut body = Map::new();
        artifact.insert_into(&mut body);
        detections.insert_into(&mut body);
        self.post("analyze", body)
    }

    fn query(&self, artifact: &Artifact, query: &str) -> Result<Value, ApiError> {
        let mut body = Map::new();
        artifact.insert_into(&mut body);
        body.insert("query".to_owned(), Value::String(query.to_owned()));
        self.post("query", body)
    }

    fn not_implemented(&self, command: &str) -> Result<Value, ApiError> {
        self.post(&format!("not-implemented/{command}"), Map::new())
    }
}
