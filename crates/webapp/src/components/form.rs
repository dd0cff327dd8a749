//! Editable field sets backing the update screens.

use cryptfield_core::{
    Customer, CustomerAddress, CustomerAddressId, CustomerId, ValidationErrors,
    validation::validate_customer_address,
};

/// Fields of the address update form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerAddressForm {
    pub id: Option<CustomerAddressId>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
}

impl CustomerAddressForm {
    /// Overwrite every field from `address`.
    pub fn update_from(&mut self, address: &CustomerAddress) {
        self.id = address.id;
        self.street.clone_from(&address.street);
        self.city.clone_from(&address.city);
        self.postcode.clone_from(&address.postcode);
        self.country.clone_from(&address.country);
    }

    /// Snapshot of the current field values.
    #[must_use]
    pub fn to_entity(&self) -> CustomerAddress {
        CustomerAddress {
            id: self.id,
            street: self.street.clone(),
            city: self.city.clone(),
            postcode: self.postcode.clone(),
            country: self.country.clone(),
        }
    }

    /// Check the field constraints.
    ///
    /// # Errors
    ///
    /// Returns every failed constraint.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_customer_address(&self.to_entity())
    }
}

/// Fields of the customer update form. `address` holds the selected option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub id: Option<CustomerId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub address_raw: Option<String>,
    pub address: Option<CustomerAddress>,
}

impl CustomerForm {
    pub fn update_from(&mut self, customer: &Customer) {
        self.id = customer.id;
        self.first_name.clone_from(&customer.first_name);
        self.last_name.clone_from(&customer.last_name);
        self.email.clone_from(&customer.email);
        self.telephone.clone_from(&customer.telephone);
        self.address_raw.clone_from(&customer.address_raw);
        self.address.clone_from(&customer.address);
    }

    #[must_use]
    pub fn to_entity(&self) -> Customer {
        Customer {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            telephone: self.telephone.clone(),
            address_raw: self.address_raw.clone(),
            address: self.address.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> CustomerAddress {
        CustomerAddress {
            id: Some(CustomerAddressId::new(123)),
            street: Some("Via Roma 1".to_string()),
            city: Some("Milano".to_string()),
            postcode: Some("20121".to_string()),
            country: Some("IT".to_string()),
        }
    }

    #[test]
    fn test_address_form_mirrors_entity() {
        let mut form = CustomerAddressForm::default();
        form.update_from(&address());
        assert_eq!(form.id, Some(CustomerAddressId::new(123)));
        assert_eq!(form.to_entity(), address());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_update_from_clears_stale_fields() {
        let mut form = CustomerAddressForm::default();
        form.update_from(&address());
        form.update_from(&CustomerAddress::default());
        assert_eq!(form, CustomerAddressForm::default());
        assert!(form.validate().unwrap_err().has_field("postcode"));
    }

    #[test]
    fn test_customer_form_mirrors_entity() {
        let customer = Customer {
            id: Some(CustomerId::new(456)),
            first_name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            address: Some(address()),
            ..Customer::default()
        };
        let mut form = CustomerForm::default();
        form.update_from(&customer);
        assert_eq!(form.first_name.as_deref(), Some("Ada"));
        assert_eq!(form.to_entity(), customer);
    }
}
