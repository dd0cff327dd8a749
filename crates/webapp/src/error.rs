//! Error types for entity services and screen controllers.

use cryptfield_core::{MissingIdentifier, ValidationErrors};
use reqwest::StatusCode;
use thiserror::Error;

use crate::http::Alert;

/// Errors that can occur when talking to the REST API.
///
/// A `find` that returns an empty body is not an error; see
/// [`crate::http::EntityResponse::body`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        status: StatusCode,
        message: String,
        alert: Option<Alert>,
    },

    /// Failed to encode a request body or decode a response body.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Operation needs a persisted entity.
    #[error(transparent)]
    MissingId(#[from] MissingIdentifier),
}

impl ApiError {
    /// HTTP status of the failed response, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}

/// Errors returned by an update controller's `save`.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The form failed its constraints; nothing was sent.
    #[error("Invalid form: {0}")]
    Invalid(#[from] ValidationErrors),

    /// The request was sent and failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}
