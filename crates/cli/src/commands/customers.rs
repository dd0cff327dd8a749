//! `cryptfield customers` commands.

use clap::Args;
use cryptfield_core::{CustomerAddressId, CustomerId};
use cryptfield_webapp::components::{
    CustomerDetail, CustomerForm, CustomerUpdate, DeleteDialog, EntityList,
};
use cryptfield_webapp::routing::EntityRoute;
use cryptfield_webapp::{CustomerAddressService, CustomerService};
use tracing::info;

use super::{CliError, Context, edit_route, print_json};

/// Customer fields given on the command line. Unset fields are left alone.
#[derive(Debug, Default, Args)]
pub struct CustomerFields {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    telephone: Option<String>,
    /// Unstructured address text
    #[arg(long)]
    address_raw: Option<String>,
    /// Id of an unassigned address (or the current one)
    #[arg(long)]
    address: Option<CustomerAddressId>,
}

impl CustomerFields {
    /// Copy the text fields into `form`, returning the requested address.
    fn apply_to(self, form: &mut CustomerForm) -> Option<CustomerAddressId> {
        let text = [
            (&mut form.first_name, self.first_name),
            (&mut form.last_name, self.last_name),
            (&mut form.email, self.email),
            (&mut form.telephone, self.telephone),
            (&mut form.address_raw, self.address_raw),
        ];
        for (field, value) in text {
            if value.is_some() {
                *field = value;
            }
        }
        self.address
    }
}

fn services(ctx: &Context) -> Result<(CustomerService, CustomerAddressService), CliError> {
    Ok((
        CustomerService::new(ctx.client())?,
        CustomerAddressService::new(ctx.client())?,
    ))
}

pub async fn list(ctx: &Context) -> Result<(), CliError> {
    let (customers, _) = services(ctx)?;
    let sort = ctx.list_sort(customers.clone()).await?;
    let mut list = EntityList::new(customers, sort);
    list.load_all().await?;
    print_json(list.entities())
}

pub async fn show(ctx: &Context, id: &str) -> Result<(), CliError> {
    let (customers, _) = services(ctx)?;
    let customer = ctx.open(customers, &EntityRoute::View(id.to_string())).await?;
    print_json(&customer)
}

/// Create (no id) or update a customer through the update form.
///
/// `--address` must name one of the options the form offers: an unassigned
/// address or the customer's current one.
pub async fn edit(ctx: &Context, id: Option<&str>, fields: CustomerFields) -> Result<(), CliError> {
    let (customers, addresses) = services(ctx)?;
    let customer = ctx.open(customers.clone(), &edit_route(id)).await?;

    let mut update = CustomerUpdate::new(customers, addresses, ctx.navigator());
    if let Some(events) = ctx.client().events() {
        update = update.with_events(events.clone());
    }
    update.activate(&customer).await;

    if let Some(address) = fields.apply_to(update.form_mut())
        && !update.select_address(Some(address))
    {
        return Err(CliError::AddressUnavailable(address.to_string()));
    }

    let saved = update.save().await?;
    print_json(&saved.into_body())
}

pub async fn remove_address(ctx: &Context, id: &str) -> Result<(), CliError> {
    let (customers, _) = services(ctx)?;
    let customer = ctx
        .open(customers.clone(), &EntityRoute::View(id.to_string()))
        .await?;

    let mut detail = CustomerDetail::new(customer, customers, ctx.navigator());
    let saved = detail.remove_address().await?;
    print_json(&saved.into_body())
}

pub async fn delete(ctx: &Context, id: CustomerId) -> Result<(), CliError> {
    let (customers, _) = services(ctx)?;
    let result = DeleteDialog::new(customers).confirm_delete(id).await?;
    info!(%id, ?result, "Customer dialog closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_override_only_given_values() {
        let mut form = CustomerForm {
            first_name: Some("Ada".to_string()),
            email: Some("old@example.com".to_string()),
            ..CustomerForm::default()
        };
        let fields = CustomerFields {
            email: Some("ada@example.com".to_string()),
            address: Some(CustomerAddressId::new(40575)),
            ..CustomerFields::default()
        };

        let address = fields.apply_to(&mut form);

        assert_eq!(address, Some(CustomerAddressId::new(40575)));
        assert_eq!(form.first_name.as_deref(), Some("Ada"));
        assert_eq!(form.email.as_deref(), Some("ada@example.com"));
        assert_eq!(form.address, None);
    }
}
