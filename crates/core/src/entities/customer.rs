//! Customer record.

use serde::{Deserialize, Serialize};

use super::{CustomerAddress, Entity, MissingIdentifier, Patch};
use crate::types::CustomerId;

/// A customer with an optional postal address.
///
/// `address` is either absent or a fully hydrated [`CustomerAddress`]; the
/// server stores it by reference. `address_raw` is an unstructured fallback
/// for addresses that were never split into fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CustomerId>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
    #[serde(default)]
    pub address_raw: Option<String>,
    #[serde(default)]
    pub address: Option<CustomerAddress>,
}

impl Customer {
    /// A customer reference holding only its identifier.
    #[must_use]
    pub fn with_id(id: CustomerId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// First and last name joined for display, if either is set.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    const NAME: &'static str = "customer";

    fn id(&self) -> Option<CustomerId> {
        self.id
    }
}

/// Partial update body for a [`Customer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    pub id: CustomerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<CustomerAddress>,
}

impl CustomerPatch {
    /// An empty patch for the given customer.
    #[must_use]
    pub const fn new(id: CustomerId) -> Self {
        Self {
            id,
            first_name: None,
            last_name: None,
            email: None,
            telephone: None,
            address_raw: None,
            address: None,
        }
    }

    #[must_use]
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn telephone(mut self, telephone: impl Into<String>) -> Self {
        self.telephone = Some(telephone.into());
        self
    }

    #[must_use]
    pub fn address_raw(mut self, address_raw: impl Into<String>) -> Self {
        self.address_raw = Some(address_raw.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: CustomerAddress) -> Self {
        self.address = Some(address);
        self
    }
}

impl Patch for CustomerPatch {
    type Target = Customer;

    fn id(&self) -> CustomerId {
        self.id
    }
}

impl TryFrom<&Customer> for CustomerPatch {
    type Error = MissingIdentifier;

    fn try_from(customer: &Customer) -> Result<Self, Self::Error> {
        let id = customer.id.ok_or(MissingIdentifier::of::<Customer>())?;
        Ok(Self {
            id,
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.clone(),
            telephone: customer.telephone.clone(),
            address_raw: customer.address_raw.clone(),
            address: customer.address.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CustomerAddressId;
    use serde_json::json;

    #[test]
    fn test_deserialize_customer_with_address() {
        let customer: Customer = serde_json::from_value(json!({
            "id": 456,
            "firstName": "Ada",
            "lastName": null,
            "addressRaw": "Via Roma 1",
            "address": {"id": 40575, "postcode": "20121", "country": "IT"}
        }))
        .expect("deserialize");

        assert_eq!(customer.id, Some(CustomerId::new(456)));
        assert_eq!(customer.first_name.as_deref(), Some("Ada"));
        assert_eq!(customer.last_name, None);
        assert_eq!(customer.email, None);
        let address = customer.address.expect("address");
        assert_eq!(address.id, Some(CustomerAddressId::new(40575)));
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let customer = Customer {
            first_name: Some("Ada".to_string()),
            address_raw: Some("somewhere".to_string()),
            ..Customer::default()
        };
        let value = serde_json::to_value(&customer).expect("serialize");
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["addressRaw"], "somewhere");
        assert!(value.get("id").is_none());
        assert!(value["address"].is_null());
    }

    #[test]
    fn test_display_name() {
        let mut customer = Customer::default();
        assert_eq!(customer.display_name(), None);

        customer.last_name = Some("Lovelace".to_string());
        assert_eq!(customer.display_name().as_deref(), Some("Lovelace"));

        customer.first_name = Some("Ada".to_string());
        assert_eq!(customer.display_name().as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_patch_keeps_only_set_fields() {
        let patch = CustomerPatch::new(CustomerId::new(1)).email("ada@example.com");
        let value = serde_json::to_value(&patch).expect("serialize");
        assert_eq!(value, json!({"id": 1, "email": "ada@example.com"}));
    }
}
