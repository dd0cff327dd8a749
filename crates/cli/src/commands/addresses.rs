//! `cryptfield addresses` commands.

use clap::Args;
use cryptfield_core::{CustomerAddressId, CustomerAddressPatch};
use cryptfield_webapp::components::{
    CustomerAddressDetail, CustomerAddressForm, CustomerAddressUpdate, DeleteDialog, EntityList,
};
use cryptfield_webapp::routing::EntityRoute;
use cryptfield_webapp::services::unassigned_addresses;
use cryptfield_webapp::{CustomerAddressService, EntityService};
use tracing::info;

use super::{CliError, Context, edit_route, print_json};

/// Address fields given on the command line. Unset fields are left alone.
#[derive(Debug, Default, Args)]
pub struct AddressFields {
    #[arg(long)]
    street: Option<String>,
    #[arg(long)]
    city: Option<String>,
    /// Up to 10 characters
    #[arg(long)]
    postcode: Option<String>,
    /// ISO country code
    #[arg(long)]
    country: Option<String>,
}

impl AddressFields {
    fn apply_to(self, form: &mut CustomerAddressForm) {
        if let Some(street) = self.street {
            form.street = Some(street);
        }
        if let Some(city) = self.city {
            form.city = Some(city);
        }
        if let Some(postcode) = self.postcode {
            form.postcode = Some(postcode);
        }
        if let Some(country) = self.country {
            form.country = Some(country);
        }
    }

    fn into_patch(self, id: CustomerAddressId) -> CustomerAddressPatch {
        CustomerAddressPatch {
            id,
            street: self.street,
            city: self.city,
            postcode: self.postcode,
            country: self.country,
        }
    }
}

fn service(ctx: &Context) -> Result<CustomerAddressService, CliError> {
    Ok(CustomerAddressService::new(ctx.client())?)
}

/// List addresses, or only the unassigned ones.
pub async fn list(ctx: &Context, unassigned: bool) -> Result<(), CliError> {
    let service = service(ctx)?;

    if unassigned {
        let addresses = service
            .query(&unassigned_addresses())
            .await?
            .into_body()
            .unwrap_or_default();
        return print_json(&addresses);
    }

    let sort = ctx.list_sort(service.clone()).await?;
    let mut list = EntityList::new(service, sort);
    list.load_all().await?;
    print_json(list.entities())
}

pub async fn show(ctx: &Context, id: &str) -> Result<(), CliError> {
    let route = EntityRoute::View(id.to_string());
    let address = ctx.open(service(ctx)?, &route).await?;
    let detail = CustomerAddressDetail::new(address, ctx.navigator());
    print_json(detail.entity())
}

/// Create (no id) or update an address through the update form.
pub async fn edit(ctx: &Context, id: Option<&str>, fields: AddressFields) -> Result<(), CliError> {
    let service = service(ctx)?;
    let address = ctx.open(service.clone(), &edit_route(id)).await?;

    let mut update = CustomerAddressUpdate::new(service, ctx.navigator());
    update.activate(&address);
    fields.apply_to(update.form_mut());

    let saved = update.save().await?;
    print_json(&saved.into_body())
}

pub async fn patch(
    ctx: &Context,
    id: CustomerAddressId,
    fields: AddressFields,
) -> Result<(), CliError> {
    let saved = service(ctx)?
        .partial_update(&fields.into_patch(id))
        .await?;
    print_json(&saved.into_body())
}

pub async fn delete(ctx: &Context, id: CustomerAddressId) -> Result<(), CliError> {
    let dialog = DeleteDialog::new(service(ctx)?);
    let result = dialog.confirm_delete(id).await?;
    info!(%id, ?result, "Address dialog closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(postcode: Option<&str>, country: Option<&str>) -> AddressFields {
        AddressFields {
            postcode: postcode.map(String::from),
            country: country.map(String::from),
            ..AddressFields::default()
        }
    }

    #[test]
    fn test_fields_override_only_given_values() {
        let mut form = CustomerAddressForm {
            city: Some("Milano".to_string()),
            postcode: Some("20121".to_string()),
            ..CustomerAddressForm::default()
        };
        fields(None, Some("IT")).apply_to(&mut form);

        assert_eq!(form.city.as_deref(), Some("Milano"));
        assert_eq!(form.postcode.as_deref(), Some("20121"));
        assert_eq!(form.country.as_deref(), Some("IT"));
    }

    #[test]
    fn test_patch_carries_only_given_values() {
        let patch = fields(Some("10115"), None).into_patch(CustomerAddressId::new(123));
        assert_eq!(
            serde_json::to_value(&patch).expect("serialize"),
            json!({"id": 123, "postcode": "10115"})
        );
    }
}
