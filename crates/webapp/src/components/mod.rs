//! Screen controllers for the customer and address entities.
//!
//! Each controller owns its in-progress state (form, option lists, flags) and
//! receives its collaborators (services, navigator, events) at construction.

mod address_update;
mod customer_update;
mod delete;
mod detail;
mod form;
mod list;

pub use address_update::CustomerAddressUpdate;
pub use customer_update::CustomerUpdate;
pub use delete::{DeleteDialog, DialogResult};
pub use detail::{CustomerAddressDetail, CustomerDetail, EntityDetail};
pub use form::{CustomerAddressForm, CustomerForm};
pub use list::EntityList;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use cryptfield_core::Entity;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::EntityResponse;
use crate::routing::Navigator;
use crate::services::EntityService;

/// Identifier used to track dropdown and table rows.
#[must_use]
pub fn track_by_id<E: Entity>(entity: &E) -> Option<E::Id> {
    entity.id()
}

/// Shared "save in flight" flag of an update screen.
///
/// Clones observe the same flag, so a view can keep one while `save` holds
/// the controller mutably.
#[derive(Debug, Clone, Default)]
pub struct SavingFlag(Arc<AtomicBool>);

impl SavingFlag {
    #[must_use]
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn set(&self, saving: bool) {
        self.0.store(saving, Ordering::Release);
    }
}

/// Create or update `entity`, then navigate back on success.
///
/// `saving` is raised for the duration of the call and cleared once it
/// settles, before any navigation.
async fn submit<S: EntityService>(
    service: &S,
    navigator: &dyn Navigator,
    entity: &S::Entity,
    saving: &SavingFlag,
) -> Result<EntityResponse<S::Entity>, ApiError> {
    saving.set(true);
    let result = if entity.is_new() {
        service.create(entity).await
    } else {
        service.update(entity).await
    };
    saving.set(false);

    match &result {
        Ok(_) => {
            debug!(entity = <S::Entity as Entity>::NAME, "Save succeeded");
            navigator.back();
        }
        Err(e) => warn!(entity = <S::Entity as Entity>::NAME, error = %e, "Save failed"),
    }
    result
}
