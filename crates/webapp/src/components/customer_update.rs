//! Customer create/edit screen.

use std::sync::Arc;

use cryptfield_core::{
    Customer, CustomerAddress, CustomerAddressId, Entity, add_to_collection_if_missing,
};
use tracing::{debug, warn};

use super::form::CustomerForm;
use super::{SavingFlag, submit};
use crate::error::{ApiError, SaveError};
use crate::events::{AppEvent, EventManager};
use crate::http::EntityResponse;
use crate::routing::Navigator;
use crate::services::{EntityService, unassigned_addresses};

/// Controller for the customer update form.
///
/// Besides the form it keeps the address dropdown options: every address not
/// yet assigned to a customer, plus the customer's current address so the
/// selection is always a valid option.
pub struct CustomerUpdate<S, A> {
    customers: S,
    addresses: A,
    navigator: Arc<dyn Navigator>,
    events: Option<EventManager>,
    form: CustomerForm,
    addresses_collection: Vec<CustomerAddress>,
    saving: SavingFlag,
}

impl<S, A> std::fmt::Debug for CustomerUpdate<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerUpdate")
            .field("form", &self.form)
            .field("addresses_collection", &self.addresses_collection.len())
            .field("is_saving", &self.saving.get())
            .finish_non_exhaustive()
    }
}

impl<S, A> CustomerUpdate<S, A>
where
    S: EntityService<Entity = Customer>,
    A: EntityService<Entity = CustomerAddress>,
{
    #[must_use]
    pub fn new(customers: S, addresses: A, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            customers,
            addresses,
            navigator,
            events: None,
            form: CustomerForm::default(),
            addresses_collection: Vec::new(),
            saving: SavingFlag::default(),
        }
    }

    /// Report option load failures to `events`.
    #[must_use]
    pub fn with_events(mut self, events: EventManager) -> Self {
        self.events = Some(events);
        self
    }

    /// Populate the form from the resolved customer and load the address
    /// options.
    ///
    /// A failed option load is logged and broadcast as [`AppEvent::Error`];
    /// the form stays usable with the current address as the only option.
    pub async fn activate(&mut self, customer: &Customer) {
        self.update_form(customer);

        if let Err(e) = self.load_relationships_options().await {
            warn!(error = %e, "Failed to load address options");
            if let Some(events) = &self.events {
                events.broadcast(AppEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    }

    /// Replace the address options with the unassigned addresses, keeping the
    /// selected address first if the query did not return it.
    ///
    /// # Errors
    ///
    /// Returns the query error; the options are left unchanged.
    pub async fn load_relationships_options(&mut self) -> Result<(), ApiError> {
        let unassigned = self
            .addresses
            .query(&unassigned_addresses())
            .await?
            .into_body()
            .unwrap_or_default();

        self.addresses_collection =
            add_to_collection_if_missing(&unassigned, [self.form.address.as_ref()]).into_owned();
        debug!(options = self.addresses_collection.len(), "Loaded address options");
        Ok(())
    }

    #[must_use]
    pub const fn form(&self) -> &CustomerForm {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut CustomerForm {
        &mut self.form
    }

    /// Address dropdown options, in display order.
    #[must_use]
    pub fn addresses_collection(&self) -> &[CustomerAddress] {
        &self.addresses_collection
    }

    /// Select the option with `id`, or clear the address with `None`.
    ///
    /// Returns `false`, leaving the selection unchanged, when no option has
    /// that id.
    pub fn select_address(&mut self, id: Option<CustomerAddressId>) -> bool {
        let Some(id) = id else {
            self.form.address = None;
            return true;
        };
        match self.addresses_collection.iter().find(|a| a.id() == Some(id)) {
            Some(address) => {
                self.form.address = Some(address.clone());
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving.get()
    }

    /// Handle on the saving flag that stays readable while `save` runs.
    #[must_use]
    pub fn saving_flag(&self) -> SavingFlag {
        self.saving.clone()
    }

    pub fn previous_state(&self) {
        self.navigator.back();
    }

    /// Submit the form: update with an id, create without.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Api`] when the request fails; no navigation
    /// happens in that case.
    pub async fn save(&mut self) -> Result<EntityResponse<Customer>, SaveError> {
        let customer = self.form.to_entity();
        Ok(submit(&self.customers, self.navigator.as_ref(), &customer, &self.saving).await?)
    }

    fn update_form(&mut self, customer: &Customer) {
        self.form.update_from(customer);
        self.addresses_collection =
            add_to_collection_if_missing(&self.addresses_collection, [customer.address.as_ref()])
                .into_owned();
    }
}
