//! Response envelope returned by every entity service call.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Entity alert the server attaches to responses.
///
/// Successful mutations carry `X-<app>-alert` (message key, e.g.
/// `jhCryptFieldDemoApp.customerAddress.created`); rejected requests carry
/// `X-<app>-error` (e.g. `error.idnotfound`). Either comes with an optional
/// `X-<app>-params` header (URL-encoded parameter, usually the entity id or
/// name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub key: String,
    pub param: Option<String>,
}

impl Alert {
    /// Extract the alert for `app_name` from response headers, if present.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap, app_name: &str) -> Option<Self> {
        Self::read(headers, app_name, "alert")
    }

    /// Extract the failure alert of an error response, if present.
    #[must_use]
    pub fn failure_from_headers(headers: &HeaderMap, app_name: &str) -> Option<Self> {
        Self::read(headers, app_name, "error")
    }

    fn read(headers: &HeaderMap, app_name: &str, kind: &str) -> Option<Self> {
        let key = header_str(headers, &format!("x-{app_name}-{kind}"))?;
        let param = header_str(headers, &format!("x-{app_name}-params")).map(|raw| {
            urlencoding::decode(&raw).map_or_else(|_| raw.clone(), std::borrow::Cow::into_owned)
        });
        Some(Self { key, param })
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name.to_ascii_lowercase())
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// HTTP status plus an optional decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityResponse<T> {
    pub status: StatusCode,
    /// Decoded body; `None` when the server answered with an empty or `null` body.
    pub body: Option<T>,
    pub alert: Option<Alert>,
}

impl<T> EntityResponse<T> {
    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Consume the envelope, returning the body.
    #[must_use]
    pub fn into_body(self) -> Option<T> {
        self.body
    }

    /// Convert the body, keeping status and alert.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> EntityResponse<U> {
        EntityResponse {
            status: self.status,
            body: self.body.map(f),
            alert: self.alert,
        }
    }
}

/// Decode a JSON body; empty and `null` bodies decode to `None`.
pub(crate) fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<Option<T>, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<T>>(bytes).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Best-effort human readable message from an error body.
///
/// Problem-details bodies contribute their `detail`, `title` or `message`;
/// anything else is returned as text.
pub(crate) fn error_message(status: StatusCode, bytes: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(bytes) {
        for field in ["detail", "title", "message"] {
            if let Some(text) = value.get(field).and_then(serde_json::Value::as_str) {
                return text.to_string();
            }
        }
    }
    let text = String::from_utf8_lossy(bytes).trim().to_string();
    if text.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        text
    }
}
