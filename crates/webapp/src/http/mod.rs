//! Shared HTTP plumbing for the entity services.
//!
//! [`ApiClient`] owns the `reqwest` client, attaches the bearer token, turns
//! non-success statuses into [`ApiError::Api`], decodes bodies into an
//! [`EntityResponse`] and publishes alerts and HTTP errors to the optional
//! [`EventManager`].

mod request;
mod response;

pub use request::{QueryValue, RequestOptions};
pub use response::{Alert, EntityResponse};

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::events::{AppEvent, EventManager};
use response::{decode_body, error_message};

/// HTTP client shared by every entity service.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    config: AppConfig,
    events: Option<EventManager>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.inner.config)
            .field("events", &self.inner.events.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client that does not publish events.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: AppConfig) -> Result<Self, ApiError> {
        Self::build(config, None)
    }

    /// Create a client that publishes alerts and HTTP errors to `events`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn with_events(config: AppConfig, events: EventManager) -> Result<Self, ApiError> {
        Self::build(config, Some(events))
    }

    fn build(config: AppConfig, events: Option<EventManager>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                config,
                events,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn events(&self) -> Option<&EventManager> {
        self.inner.events.as_ref()
    }

    /// Start a request, attaching the bearer token when configured.
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.inner.client.request(method, url);
        match &self.inner.config.api_token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Send a request and decode its JSON body.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<EntityResponse<T>, ApiError> {
        let response = self.send(builder).await?;
        let status = response.status();
        let alert = Alert::from_headers(response.headers(), &self.inner.config.app_name);

        let bytes = response.bytes().await?;
        let body = match decode_body(&bytes) {
            Ok(body) => body,
            Err(e) => {
                warn!(status = %status, error = %e, "Undecodable response body");
                self.publish(AppEvent::HttpError {
                    status: Some(status.as_u16()),
                    message: e.to_string(),
                    key: None,
                });
                return Err(e);
            }
        };

        self.publish_alert(alert.as_ref());
        Ok(EntityResponse {
            status,
            body,
            alert,
        })
    }

    /// Send a request whose response body is ignored.
    pub(crate) async fn execute_empty(
        &self,
        builder: RequestBuilder,
    ) -> Result<EntityResponse<()>, ApiError> {
        let response = self.send(builder).await?;
        let status = response.status();
        let alert = Alert::from_headers(response.headers(), &self.inner.config.app_name);

        self.publish_alert(alert.as_ref());
        Ok(EntityResponse {
            status,
            body: None,
            alert,
        })
    }

    /// Send and reject non-success statuses.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "HTTP request failed");
                self.publish(AppEvent::HttpError {
                    status: e.status().map(|s| s.as_u16()),
                    message: e.to_string(),
                    key: None,
                });
                return Err(ApiError::Http(e));
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!(status = %status, url = %response.url(), "API response");
            return Ok(response);
        }

        let app_name = &self.inner.config.app_name;
        let alert = Alert::failure_from_headers(response.headers(), app_name)
            .or_else(|| Alert::from_headers(response.headers(), app_name));
        let bytes = response.bytes().await.unwrap_or_default();
        let message = error_message(status, &bytes);

        warn!(status = %status, message = %message, alert = ?alert, "API returned error status");
        self.publish(AppEvent::HttpError {
            status: Some(status.as_u16()),
            message: message.clone(),
            key: alert.as_ref().map(|a| a.key.clone()),
        });

        Err(ApiError::Api {
            status,
            message,
            alert,
        })
    }

    fn publish_alert(&self, alert: Option<&Alert>) {
        if let Some(alert) = alert {
            self.publish(AppEvent::Success {
                key: alert.key.clone(),
                param: alert.param.clone(),
            });
        }
    }

    fn publish(&self, event: AppEvent) {
        if let Some(events) = &self.inner.events {
            events.broadcast(event);
        }
    }
}
