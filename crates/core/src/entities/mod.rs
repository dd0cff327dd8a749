//! Entity records exchanged with the REST API.
//!
//! Entities are plain value objects. An entity without an identifier is
//! "new" and has never been persisted; the server assigns the identifier on
//! create.

mod customer;
mod customer_address;

use core::fmt;
use core::hash::Hash;

use thiserror::Error;

pub use customer::{Customer, CustomerPatch};
pub use customer_address::{CustomerAddress, CustomerAddressPatch};

/// A record with a server-assigned identifier once persisted.
pub trait Entity {
    /// Identifier type assigned by the server.
    type Id: Copy + Eq + Hash + Send + Sync + fmt::Debug + fmt::Display;

    /// Entity name as used in alert keys and log fields (e.g. `customerAddress`).
    const NAME: &'static str;

    /// Returns the identifier, or `None` for an unsaved entity.
    fn id(&self) -> Option<Self::Id>;

    /// Whether the entity has never been persisted.
    fn is_new(&self) -> bool {
        self.id().is_none()
    }
}

/// A partial entity carrying only the fields to change.
///
/// Unlike the entity itself, a patch always targets a persisted record, so its
/// identifier is mandatory.
pub trait Patch {
    /// The entity this patch applies to.
    type Target: Entity;

    /// Identifier of the record being patched.
    fn id(&self) -> <Self::Target as Entity>::Id;
}

/// Returned when an operation needs a persisted entity but got a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{entity} has no identifier")]
pub struct MissingIdentifier {
    /// Name of the entity type.
    pub entity: &'static str,
}

impl MissingIdentifier {
    /// Create the error for entity type `E`.
    #[must_use]
    pub const fn of<E: Entity>() -> Self {
        Self { entity: E::NAME }
    }
}
