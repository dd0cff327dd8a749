//! Entity list screen.

use cryptfield_core::Entity;
use tracing::{debug, warn};

use super::delete::DialogResult;
use crate::error::ApiError;
use crate::http::RequestOptions;
use crate::services::EntityService;

/// Loads every entity of one type in the route's sort order.
pub struct EntityList<S: EntityService> {
    service: S,
    sort: String,
    entities: Vec<S::Entity>,
    is_loading: bool,
}

impl<S: EntityService + std::fmt::Debug> std::fmt::Debug for EntityList<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityList")
            .field("service", &self.service)
            .field("sort", &self.sort)
            .field("entities", &self.entities.len())
            .field("is_loading", &self.is_loading)
            .finish()
    }
}

impl<S: EntityService> EntityList<S> {
    /// A list sorted by `sort` (e.g. `id,asc`). Nothing is loaded yet.
    #[must_use]
    pub fn new(service: S, sort: impl Into<String>) -> Self {
        Self {
            service,
            sort: sort.into(),
            entities: Vec::new(),
            is_loading: false,
        }
    }

    /// Fetch every entity.
    ///
    /// # Errors
    ///
    /// Returns the query error; the previously loaded entities are kept.
    pub async fn load_all(&mut self) -> Result<(), ApiError> {
        self.is_loading = true;
        let options = RequestOptions::new().sort([self.sort.as_str()]);
        let result = self.service.query(&options).await;
        self.is_loading = false;

        match result {
            Ok(response) => {
                self.entities = response.into_body().unwrap_or_default();
                debug!(
                    entity = <S::Entity as Entity>::NAME,
                    count = self.entities.len(),
                    "Loaded list"
                );
                Ok(())
            }
            Err(e) => {
                warn!(entity = <S::Entity as Entity>::NAME, error = %e, "Failed to load list");
                Err(e)
            }
        }
    }

    /// Reload after a delete dialog closed with [`DialogResult::Deleted`].
    ///
    /// # Errors
    ///
    /// Returns the reload error.
    pub async fn on_dialog_closed(&mut self, result: DialogResult) -> Result<(), ApiError> {
        match result {
            DialogResult::Deleted => self.load_all().await,
            DialogResult::Dismissed => Ok(()),
        }
    }

    #[must_use]
    pub fn entities(&self) -> &[S::Entity] {
        &self.entities
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn sort(&self) -> &str {
        &self.sort
    }
}
