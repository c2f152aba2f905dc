//! Thin client over the dashboard REST backend.

mod analytics;
mod audit;
mod topics;
mod users;

use std::time::Duration;

use reqwest::{RequestBuilder, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{pagination::TableError, utils::CCStr};

pub use analytics::*;
pub use audit::*;
pub use topics::*;
pub use users::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("cannot reach the server: {0}")]
    Network(CCStr),
    #[error("server answered {status}: {message}")]
    Status { status: u16, message: CCStr },
    #[error("unexpected server answer: {0}")]
    InvalidResponse(CCStr),
    #[error("invalid URL: {0}")]
    InvalidUrl(CCStr),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401 | 403, .. })
    }
}

impl From<ApiError> for TableError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::InvalidResponse(msg) => TableError::InvalidResponse(msg),
            other => TableError::Network(other.to_string().into()),
        }
    }
}

/// Acknowledgement returned by mutating endpoints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Ack {
    #[serde(default, alias = "message")]
    pub msg: Option<CCStr>,
}

/// HTTP client bound to one backend.
///
/// Cheap to clone, every clone shares the same connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<CCStr>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<&str>, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string().into()))?;
        Ok(Self {
            http,
            base_url,
            token: token.filter(|t| !t.trim().is_empty()).map(CCStr::from),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}").into()))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path)?;
        self.send(self.http.get(url).query(query)).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path)?;
        self.send(self.http.post(url).json(body)).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path)?;
        self.send(self.http.put(url).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path)?;
        self.send(self.http.delete(url)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string().into()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string().into()))?;
        decode_response(status, &body)
    }
}

fn normalize_base_url(base_url: &str) -> Result<Url, ApiError> {
    let trimmed = base_url.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|e| ApiError::InvalidUrl(format!("{e}").into()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::InvalidUrl(
            format!("unsupported scheme '{other}'").into(),
        )),
    }
}

/// Turns an HTTP status and body into a typed value or an [ApiError].
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if (200..300).contains(&status) {
        let body = if body.trim().is_empty() { "null" } else { body };
        serde_json::from_str(body).map_err(|e| ApiError::InvalidResponse(e.to_string().into()))
    } else {
        let message = error_message(body).unwrap_or_else(|| match body.trim() {
            "" => CCStr::from(format!("HTTP {status}")),
            text => CCStr::from(text),
        });
        Err(ApiError::Status { status, message })
    }
}

/// Extracts a human readable message from an error body.
fn error_message(body: &str) -> Option<CCStr> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;
    for key in ["msg", "error", "message"] {
        if let Some(text) = object.get(key).and_then(|v| v.as_str()) {
            return Some(CCStr::from(text));
        }
    }
    // Field validation errors: {"field": ["reason", ...], ...}
    let details: Vec<String> = object
        .iter()
        .filter_map(|(field, reasons)| {
            let reason = match reasons {
                serde_json::Value::Array(list) => list.first()?.as_str()?,
                serde_json::Value::String(s) => s.as_str(),
                _ => return None,
            };
            Some(format!("{field}: {reason}"))
        })
        .collect();
    (!details.is_empty()).then(|| CCStr::from(details.join(", ")))
}
