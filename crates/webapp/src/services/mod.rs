//! REST entity services.
//!
//! [`EntityService`] is the seam controllers and resolvers depend on;
//! [`RestEntityService`] implements it over HTTP for any [`RestResource`].
//!
//! | Operation        | Request                          |
//! |------------------|----------------------------------|
//! | `create`         | `POST {resource}`                |
//! | `update`         | `PUT {resource}/{id}`            |
//! | `partial_update` | `PATCH {resource}/{id}`          |
//! | `find`           | `GET {resource}/{id}`            |
//! | `query`          | `GET {resource}?{options}`       |
//! | `delete`         | `DELETE {resource}/{id}`         |
//!
//! Services hold no state beyond their endpoint: no cache, no retry.

mod customer_address;

pub use customer_address::{UNASSIGNED_FILTER, unassigned_addresses};

use std::future::Future;
use std::marker::PhantomData;
use std::str::FromStr;

use cryptfield_core::{Customer, CustomerAddress, Entity, MissingIdentifier, Patch};
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::error::ApiError;
use crate::http::{ApiClient, EntityResponse, RequestOptions};

/// Content type for partial updates.
const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

/// An entity exposed as a REST resource.
pub trait RestResource:
    Entity<Id: FromStr> + Default + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Endpoint path relative to the API base, e.g. `api/customers`.
    const RESOURCE_PATH: &'static str;

    /// Partial update body for this entity.
    type Patch: Patch<Target = Self> + Serialize + Send + Sync;
}

impl RestResource for Customer {
    const RESOURCE_PATH: &'static str = "api/customers";

    type Patch = cryptfield_core::CustomerPatch;
}

impl RestResource for CustomerAddress {
    const RESOURCE_PATH: &'static str = "api/customer-addresses";

    type Patch = cryptfield_core::CustomerAddressPatch;
}

/// CRUD operations against one REST resource.
///
/// Every call is single-shot and resolves to a response envelope or an
/// [`ApiError`]. Non-success statuses are errors; a successful `find` with an
/// empty body is not.
pub trait EntityService: Send + Sync {
    /// Entity type served by this resource.
    type Entity: RestResource;

    /// Create a new entity; the response carries the server-assigned id.
    fn create(
        &self,
        entity: &Self::Entity,
    ) -> impl Future<Output = Result<EntityResponse<Self::Entity>, ApiError>> + Send;

    /// Replace a persisted entity. The id in the path is taken from `entity`.
    fn update(
        &self,
        entity: &Self::Entity,
    ) -> impl Future<Output = Result<EntityResponse<Self::Entity>, ApiError>> + Send;

    /// Send only the fields present on `patch`; the server merges them.
    fn partial_update(
        &self,
        patch: &<Self::Entity as RestResource>::Patch,
    ) -> impl Future<Output = Result<EntityResponse<Self::Entity>, ApiError>> + Send;

    /// Fetch one entity. `body` is `None` when the server has nothing to return.
    fn find(
        &self,
        id: <Self::Entity as Entity>::Id,
    ) -> impl Future<Output = Result<EntityResponse<Self::Entity>, ApiError>> + Send;

    /// List entities matching `options`.
    fn query(
        &self,
        options: &RequestOptions,
    ) -> impl Future<Output = Result<EntityResponse<Vec<Self::Entity>>, ApiError>> + Send;

    /// Delete one entity.
    fn delete(
        &self,
        id: <Self::Entity as Entity>::Id,
    ) -> impl Future<Output = Result<EntityResponse<()>, ApiError>> + Send;
}

/// [`EntityService`] over HTTP.
pub struct RestEntityService<E> {
    client: ApiClient,
    resource_url: Url,
    _entity: PhantomData<fn() -> E>,
}

/// Service for `/api/customers`.
pub type CustomerService = RestEntityService<Customer>;

/// Service for `/api/customer-addresses`.
pub type CustomerAddressService = RestEntityService<CustomerAddress>;

impl<E> Clone for RestEntityService<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            resource_url: self.resource_url.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> std::fmt::Debug for RestEntityService<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestEntityService")
            .field("resource_url", &self.resource_url.as_str())
            .finish_non_exhaustive()
    }
}

impl<E: RestResource> RestEntityService<E> {
    /// Create the service for `E`'s resource endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint URL cannot be built from the configured
    /// base URL.
    pub fn new(client: ApiClient) -> Result<Self, ApiError> {
        let resource_url = client.config().endpoint_for(E::RESOURCE_PATH)?;
        Ok(Self {
            client,
            resource_url,
            _entity: PhantomData,
        })
    }

    /// The collection endpoint.
    #[must_use]
    pub const fn resource_url(&self) -> &Url {
        &self.resource_url
    }

    fn entity_url(&self, id: E::Id) -> Result<Url, ApiError> {
        Ok(Url::parse(&format!("{}/{id}", self.resource_url))?)
    }

    fn persisted_id(entity: &E) -> Result<E::Id, ApiError> {
        entity.id().ok_or_else(|| MissingIdentifier::of::<E>().into())
    }
}

impl<E: RestResource> EntityService for RestEntityService<E> {
    type Entity = E;

    #[instrument(skip_all, fields(resource = E::NAME))]
    async fn create(&self, entity: &E) -> Result<EntityResponse<E>, ApiError> {
        let request = self
            .client
            .request(Method::POST, self.resource_url.clone())
            .json(entity);
        self.client.execute(request).await
    }

    #[instrument(skip_all, fields(resource = E::NAME, id = ?entity.id()))]
    async fn update(&self, entity: &E) -> Result<EntityResponse<E>, ApiError> {
        let url = self.entity_url(Self::persisted_id(entity)?)?;
        let request = self.client.request(Method::PUT, url).json(entity);
        self.client.execute(request).await
    }

    #[instrument(skip_all, fields(resource = E::NAME, id = %patch.id()))]
    async fn partial_update(&self, patch: &E::Patch) -> Result<EntityResponse<E>, ApiError> {
        let url = self.entity_url(patch.id())?;
        let body = serde_json::to_vec(patch).map_err(|e| ApiError::Parse(e.to_string()))?;
        let request = self
            .client
            .request(Method::PATCH, url)
            .header(CONTENT_TYPE, MERGE_PATCH_JSON)
            .body(body);
        self.client.execute(request).await
    }

    #[instrument(skip(self), fields(resource = E::NAME))]
    async fn find(&self, id: E::Id) -> Result<EntityResponse<E>, ApiError> {
        let url = self.entity_url(id)?;
        let request = self.client.request(Method::GET, url);
        self.client.execute(request).await
    }

    #[instrument(skip(self), fields(resource = E::NAME))]
    async fn query(&self, options: &RequestOptions) -> Result<EntityResponse<Vec<E>>, ApiError> {
        let mut url = self.resource_url.clone();
        options.apply_to(&mut url);
        let request = self.client.request(Method::GET, url);
        self.client.execute(request).await
    }

    #[instrument(skip(self), fields(resource = E::NAME))]
    async fn delete(&self, id: E::Id) -> Result<EntityResponse<()>, ApiError> {
        let url = self.entity_url(id)?;
        let request = self.client.request(Method::DELETE, url);
        self.client.execute_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use cryptfield_core::CustomerAddressId;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(AppConfig::new(base).expect("config")).expect("client")
    }

    #[test]
    fn test_resource_urls() {
        let customers = CustomerService::new(client("http://localhost:8080")).expect("service");
        assert_eq!(
            customers.resource_url().as_str(),
            "http://localhost:8080/api/customers"
        );

        let addresses =
            CustomerAddressService::new(client("http://localhost:8080/ctx")).expect("service");
        assert_eq!(
            addresses.resource_url().as_str(),
            "http://localhost:8080/ctx/api/customer-addresses"
        );
    }

    #[test]
    fn test_entity_url() {
        let service = CustomerAddressService::new(client("http://localhost:8080")).expect("service");
        let url = service.entity_url(CustomerAddressId::new(123)).expect("url");
        assert_eq!(url.as_str(), "http://localhost:8080/api/customer-addresses/123");
    }

    #[tokio::test]
    async fn test_update_without_id_fails_before_sending() {
        // Port 9 (discard) is never contacted: the id check comes first.
        let service = CustomerService::new(client("http://127.0.0.1:9")).expect("service");
        let err = service.update(&Customer::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingId(_)));
        assert_eq!(err.to_string(), "customer has no identifier");
    }
}
