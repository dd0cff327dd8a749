//! Postal address record.

use serde::{Deserialize, Serialize};

use super::{Entity, MissingIdentifier, Patch};
use crate::types::CustomerAddressId;

/// A postal address that can be assigned to at most one customer.
///
/// `postcode` (max 10 characters) and `country` (ISO code, max 2 characters)
/// are required before the address can be submitted; see
/// [`crate::validation::validate_customer_address`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CustomerAddressId>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl CustomerAddress {
    /// An address reference holding only its identifier.
    #[must_use]
    pub fn with_id(id: CustomerAddressId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}

impl Entity for CustomerAddress {
    type Id = CustomerAddressId;

    const NAME: &'static str = "customerAddress";

    fn id(&self) -> Option<CustomerAddressId> {
        self.id
    }
}

/// Partial update body for a [`CustomerAddress`].
///
/// Only the fields set to `Some` are serialized; the server merges them into
/// the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAddressPatch {
    pub id: CustomerAddressId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl CustomerAddressPatch {
    /// An empty patch for the given address.
    #[must_use]
    pub const fn new(id: CustomerAddressId) -> Self {
        Self {
            id,
            street: None,
            city: None,
            postcode: None,
            country: None,
        }
    }

    #[must_use]
    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    #[must_use]
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    #[must_use]
    pub fn postcode(mut self, postcode: impl Into<String>) -> Self {
        self.postcode = Some(postcode.into());
        self
    }

    #[must_use]
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }
}

impl Patch for CustomerAddressPatch {
    type Target = CustomerAddress;

    fn id(&self) -> CustomerAddressId {
        self.id
    }
}

impl TryFrom<&CustomerAddress> for CustomerAddressPatch {
    type Error = MissingIdentifier;

    fn try_from(address: &CustomerAddress) -> Result<Self, Self::Error> {
        let id = address.id.ok_or(MissingIdentifier::of::<CustomerAddress>())?;
        Ok(Self {
            id,
            street: address.street.clone(),
            city: address.city.clone(),
            postcode: address.postcode.clone(),
            country: address.country.clone(),
        })
    }
}
