//! Pre-navigation entity loading.

use std::sync::Arc;

use cryptfield_core::Entity;
use tracing::{debug, info};

use super::navigator::Navigator;
use crate::error::ApiError;
use crate::services::EntityService;

/// Destination of not-found redirects.
pub const NOT_FOUND_PATH: &str = "404";

/// Parameters extracted from the activated route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    pub id: Option<String>,
}

impl RouteParams {
    /// Parameters for the "new" route.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()) }
    }

    /// The id parameter, treating an empty string as absent.
    fn id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

/// Outcome of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<E> {
    /// The screen may activate with this entity.
    Resolved(E),
    /// Navigation was redirected to [`NOT_FOUND_PATH`]; the screen must not activate.
    Redirected,
}

impl<E> Resolution<E> {
    #[must_use]
    pub fn into_entity(self) -> Option<E> {
        match self {
            Self::Resolved(entity) => Some(entity),
            Self::Redirected => None,
        }
    }
}

/// Loads the entity a screen needs before it activates.
///
/// With an id parameter the entity is fetched through `find`; an empty body
/// redirects to [`NOT_FOUND_PATH`]. Without one a blank entity is returned
/// and no request is made.
pub struct EntityResolver<S> {
    service: S,
    navigator: Arc<dyn Navigator>,
}

impl<S: std::fmt::Debug> std::fmt::Debug for EntityResolver<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityResolver")
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

impl<S: EntityService> EntityResolver<S> {
    #[must_use]
    pub fn new(service: S, navigator: Arc<dyn Navigator>) -> Self {
        Self { service, navigator }
    }

    #[must_use]
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Resolve the entity for `params`.
    ///
    /// # Errors
    ///
    /// Returns the service error when the request fails. A successful
    /// response without a body is a redirect, not an error.
    pub async fn resolve(&self, params: &RouteParams) -> Result<Resolution<S::Entity>, ApiError> {
        let Some(raw) = params.id() else {
            debug!(entity = <S::Entity as Entity>::NAME, "Resolving blank entity");
            return Ok(Resolution::Resolved(S::Entity::default()));
        };

        let Ok(id) = raw.parse::<<S::Entity as Entity>::Id>() else {
            info!(entity = <S::Entity as Entity>::NAME, id = raw, "Malformed id, redirecting");
            return Ok(self.not_found());
        };

        match self.service.find(id).await?.into_body() {
            Some(entity) => Ok(Resolution::Resolved(entity)),
            None => {
                info!(entity = <S::Entity as Entity>::NAME, %id, "Entity not found, redirecting");
                Ok(self.not_found())
            }
        }
    }

    fn not_found(&self) -> Resolution<S::Entity> {
        self.navigator.navigate(&[NOT_FOUND_PATH]);
        Resolution::Redirected
    }
}
