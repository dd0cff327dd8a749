//! Application event broadcaster.
//!
//! The HTTP layer publishes success alerts and HTTP errors here; whatever
//! renders notifications subscribes. Publishing with no subscriber is fine.

use tokio::sync::broadcast;
use tracing::trace;

const DEFAULT_CAPACITY: usize = 64;

/// An event surfaced to the notification layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The server attached an entity alert (e.g. `app.customer.created`).
    Success {
        /// Alert message key.
        key: String,
        /// Alert parameter, usually the entity id.
        param: Option<String>,
    },
    /// A request failed with a non-success status or a transport error.
    HttpError {
        /// Response status, if a response arrived.
        status: Option<u16>,
        /// Error message.
        message: String,
        /// Failure alert key from `X-<app>-error` (e.g. `error.idnotfound`).
        key: Option<String>,
    },
    /// A client-side error, such as a field that could not be loaded.
    Error {
        /// Error message.
        message: String,
    },
}

impl AppEvent {
    /// Event name, prefixed by the application name (e.g. `app.httpError`).
    #[must_use]
    pub fn name(&self, app_name: &str) -> String {
        let suffix = match self {
            Self::Success { .. } => "success",
            Self::HttpError { .. } => "httpError",
            Self::Error { .. } => "error",
        };
        format!("{app_name}.{suffix}")
    }
}

/// Broadcasts [`AppEvent`]s to every subscriber.
#[derive(Debug, Clone)]
pub struct EventManager {
    sender: broadcast::Sender<AppEvent>,
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventManager {
    /// Create a broadcaster buffering up to `capacity` events per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event. Returns the number of subscribers that received it.
    pub fn broadcast(&self, event: AppEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                trace!(?event, "No subscribers for event");
                0
            }
        }
    }

    /// Subscribe to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let success = AppEvent::Success {
            key: "app.customer.created".to_string(),
            param: Some("1".to_string()),
        };
        assert_eq!(success.name("app"), "app.success");
        let error = AppEvent::Error {
            message: "boom".to_string(),
        };
        assert_eq!(error.name("app"), "app.error");
    }

    #[test]
    fn test_broadcast_without_subscribers() {
        let events = EventManager::default();
        let delivered = events.broadcast(AppEvent::Error {
            message: "nobody listens".to_string(),
        });
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_subscriber_receives_event() {
        let events = EventManager::default();
        let mut rx = events.subscribe();

        let event = AppEvent::HttpError {
            status: Some(500),
            message: "Internal Server Error".to_string(),
            key: None,
        };
        assert_eq!(events.broadcast(event.clone()), 1);
        assert_eq!(rx.recv().await.expect("event"), event);
    }
}
