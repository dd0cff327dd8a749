//! Command implementations.
//!
//! Commands drive the same route, resolver and controller code as the
//! screens. Navigation is recorded by a [`HistoryNavigator`] and reported at
//! the end of each command.

pub mod addresses;
pub mod customers;

use std::sync::Arc;

use cryptfield_core::Entity;
use cryptfield_webapp::routing::{
    Account, AccountAccessGate, Activation, EntityResolver, EntityRoute, HistoryNavigator,
    Navigation, activate_route,
};
use cryptfield_webapp::{
    ApiClient, ApiError, AppConfig, AppEvent, ConfigError, EntityService, EventManager, SaveError,
};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    /// The route resolved to the not-found page.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Access denied")]
    Denied,

    /// A customer was given an address id that is not a selectable option.
    #[error("Address {0} is not available")]
    AddressUnavailable(String),
}

/// Collaborators shared by every command.
pub struct Context {
    client: ApiClient,
    navigator: Arc<HistoryNavigator>,
    gate: AccountAccessGate,
    events: broadcast::Receiver<AppEvent>,
}

impl Context {
    /// Build the API client from the environment.
    ///
    /// # Errors
    ///
    /// Returns error if configuration is missing or the client fails to build.
    pub fn from_env() -> Result<Self, CliError> {
        let config = AppConfig::from_env()?;
        info!(api_url = %config.api_url(), "Using API");

        let events = EventManager::default();
        let receiver = events.subscribe();
        let client = ApiClient::with_events(config, events)?;

        let navigator = Arc::new(HistoryNavigator::new());
        // The server authenticates the token; locally the CLI acts as a plain user.
        let gate = AccountAccessGate::new(
            Some(Account::new("cli", ["ROLE_USER"])),
            navigator.clone(),
        );

        Ok(Self {
            client,
            navigator,
            gate,
            events: receiver,
        })
    }

    #[must_use]
    pub fn client(&self) -> ApiClient {
        self.client.clone()
    }

    #[must_use]
    pub fn navigator(&self) -> Arc<HistoryNavigator> {
        self.navigator.clone()
    }

    /// Log every event and navigation the command produced.
    pub fn report_events(&mut self) {
        let app_name = self.client.config().app_name.clone();
        while let Ok(event) = self.events.try_recv() {
            match &event {
                AppEvent::Success { key, param } => {
                    info!(event = %event.name(&app_name), key = %key, param = ?param, "Alert");
                }
                AppEvent::HttpError {
                    status,
                    message,
                    key,
                } => {
                    warn!(
                        event = %event.name(&app_name),
                        status = ?status,
                        message = %message,
                        key = ?key,
                        "HTTP error"
                    );
                }
                AppEvent::Error { message } => {
                    warn!(event = %event.name(&app_name), message = %message, "Error");
                }
            }
        }
        for navigation in self.navigator.log() {
            match navigation {
                Navigation::To(path) => info!(path = %path, "Navigated"),
                Navigation::Back => info!("Navigated back"),
            }
        }
    }

    /// Sort order of the list route, after the access check.
    async fn list_sort<S: EntityService>(&self, service: S) -> Result<&'static str, CliError> {
        let resolver = EntityResolver::new(service, self.navigator.clone());
        match activate_route(&self.gate, &resolver, &EntityRoute::List).await? {
            Activation::List { sort } => Ok(sort),
            _ => Err(CliError::Denied),
        }
    }

    /// Activate `route` and return the entity its screen would show.
    async fn open<S: EntityService>(
        &self,
        service: S,
        route: &EntityRoute,
    ) -> Result<S::Entity, CliError> {
        let resolver = EntityResolver::new(service, self.navigator.clone());
        match activate_route(&self.gate, &resolver, route).await? {
            Activation::View(entity) | Activation::Edit(entity) => Ok(entity),
            Activation::Denied => Err(CliError::Denied),
            Activation::Redirected | Activation::List { .. } => Err(CliError::NotFound {
                entity: <S::Entity as Entity>::NAME,
                id: route.params().id.unwrap_or_default(),
            }),
        }
    }
}

/// Route for `edit <id>`, or `new` without id.
fn edit_route(id: Option<&str>) -> EntityRoute {
    id.map_or(EntityRoute::New, |id| EntityRoute::Edit(id.to_string()))
}

/// Write `value` to stdout as pretty JSON.
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    #[allow(clippy::print_stdout)]
    {
        println!("{json}");
    }
    Ok(())
}
