//! Read-only detail screens.

use std::sync::Arc;

use cryptfield_core::{Customer, CustomerAddress};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::http::EntityResponse;
use crate::routing::Navigator;
use crate::services::EntityService;

/// Holds the resolved entity for display.
pub struct EntityDetail<E> {
    entity: E,
    navigator: Arc<dyn Navigator>,
}

/// Address detail screen.
pub type CustomerAddressDetail = EntityDetail<CustomerAddress>;

impl<E: std::fmt::Debug> std::fmt::Debug for EntityDetail<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityDetail")
            .field("entity", &self.entity)
            .finish_non_exhaustive()
    }
}

impl<E> EntityDetail<E> {
    #[must_use]
    pub fn new(entity: E, navigator: Arc<dyn Navigator>) -> Self {
        Self { entity, navigator }
    }

    #[must_use]
    pub const fn entity(&self) -> &E {
        &self.entity
    }

    pub fn previous_state(&self) {
        self.navigator.back();
    }
}

/// Customer detail screen, which can also unlink the customer's address.
#[derive(Debug)]
pub struct CustomerDetail<S> {
    detail: EntityDetail<Customer>,
    service: S,
}

impl<S: EntityService<Entity = Customer>> CustomerDetail<S> {
    #[must_use]
    pub fn new(customer: Customer, service: S, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            detail: EntityDetail::new(customer, navigator),
            service,
        }
    }

    #[must_use]
    pub const fn customer(&self) -> &Customer {
        self.detail.entity()
    }

    pub fn previous_state(&self) {
        self.detail.previous_state();
    }

    /// Clear the address, save the customer and navigate back.
    ///
    /// The address itself is kept; it simply becomes unassigned.
    ///
    /// # Errors
    ///
    /// Returns the update error. The local copy stays without address and no
    /// navigation happens.
    pub async fn remove_address(&mut self) -> Result<EntityResponse<Customer>, ApiError> {
        let removed = self.detail.entity.address.take();
        info!(
            customer = ?self.detail.entity.id,
            address = ?removed.and_then(|a| a.id),
            "Removing address"
        );

        match self.service.update(&self.detail.entity).await {
            Ok(response) => {
                self.previous_state();
                Ok(response)
            }
            Err(e) => {
                warn!(error = %e, "Failed to remove address");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::HistoryNavigator;
    use crate::testing::{FakeService, ServiceCall};
    use cryptfield_core::{CustomerAddressId, CustomerId};

    fn customer() -> Customer {
        Customer {
            address: Some(CustomerAddress::with_id(CustomerAddressId::new(40575))),
            ..Customer::with_id(CustomerId::new(456))
        }
    }

    #[test]
    fn test_detail_holds_entity() {
        let navigator = Arc::new(HistoryNavigator::starting_at("customer-address"));
        let address = CustomerAddress::with_id(CustomerAddressId::new(123));
        let detail = CustomerAddressDetail::new(address.clone(), navigator.clone());

        assert_eq!(detail.entity(), &address);
        detail.previous_state();
        assert!(navigator.went_back());
    }

    #[tokio::test]
    async fn test_remove_address_updates_and_navigates_back() {
        let service = FakeService::<Customer>::new();
        let navigator = Arc::new(HistoryNavigator::starting_at("customer"));
        let mut detail = CustomerDetail::new(customer(), service.clone(), navigator.clone());

        detail.remove_address().await.expect("remove");

        assert_eq!(
            service.calls(),
            vec![ServiceCall::Update(Customer::with_id(CustomerId::new(456)))]
        );
        assert_eq!(detail.customer().address, None);
        assert!(navigator.went_back());
    }

    #[tokio::test]
    async fn test_failed_remove_stays_on_screen() {
        let service = FakeService::<Customer>::new();
        service.fail_next();
        let navigator = Arc::new(HistoryNavigator::starting_at("customer"));
        let mut detail = CustomerDetail::new(customer(), service, navigator.clone());

        assert!(detail.remove_address().await.is_err());
        assert!(!navigator.went_back());
    }
}
