//! Address create/edit screen.

use std::sync::Arc;

use cryptfield_core::CustomerAddress;

use super::form::CustomerAddressForm;
use super::{SavingFlag, submit};
use crate::error::SaveError;
use crate::http::EntityResponse;
use crate::routing::Navigator;
use crate::services::EntityService;

/// Controller for the address update form.
///
/// `save` refuses to send a form that fails its constraints. Otherwise it
/// updates an address with an id and creates one without, then navigates
/// back on success.
pub struct CustomerAddressUpdate<S> {
    service: S,
    navigator: Arc<dyn Navigator>,
    form: CustomerAddressForm,
    saving: SavingFlag,
}

impl<S> std::fmt::Debug for CustomerAddressUpdate<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerAddressUpdate")
            .field("form", &self.form)
            .field("is_saving", &self.saving.get())
            .finish_non_exhaustive()
    }
}

impl<S: EntityService<Entity = CustomerAddress>> CustomerAddressUpdate<S> {
    #[must_use]
    pub fn new(service: S, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            service,
            navigator,
            form: CustomerAddressForm::default(),
            saving: SavingFlag::default(),
        }
    }

    /// Populate the form from the resolved address.
    pub fn activate(&mut self, address: &CustomerAddress) {
        self.form.update_from(address);
    }

    #[must_use]
    pub const fn form(&self) -> &CustomerAddressForm {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut CustomerAddressForm {
        &mut self.form
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

    /// Submit the form.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Invalid`] without sending anything when the form
    /// fails validation, or [`SaveError::Api`] when the request fails. No
    /// navigation happens on error.
    pub async fn save(&mut self) -> Result<EntityResponse<CustomerAddress>, SaveError> {
        self.form.validate()?;
        let address = self.form.to_entity();
        Ok(submit(&self.service, self.navigator.as_ref(), &address, &self.saving).await?)
    }
}
