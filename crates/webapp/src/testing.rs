//! In-memory collaborators for unit tests.

use std::sync::{Arc, Mutex, PoisonError};

use cryptfield_core::Entity;
use reqwest::StatusCode;
use tokio::sync::Notify;

use crate::error::ApiError;
use crate::http::{EntityResponse, RequestOptions};
use crate::services::{EntityService, RestResource};

/// A call received by [`FakeService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall<E> {
    Create(E),
    Update(E),
    PartialUpdate(i64),
    Find(i64),
    Query(Vec<(String, String)>),
    Delete(i64),
}

/// Records calls and answers from canned data.
///
/// `create` and `update` echo the entity unless a saved entity is set;
/// `find` answers with the configured entity (`None` by default, i.e. an
/// empty body); `query` answers with the configured list. After [`hold`],
/// `create` and `update` wait for the returned gate before answering.
///
/// [`hold`]: FakeService::hold
pub struct FakeService<E> {
    state: Arc<Mutex<FakeState<E>>>,
}

struct FakeState<E> {
    calls: Vec<ServiceCall<E>>,
    found: Option<E>,
    listed: Vec<E>,
    saved: Option<E>,
    fail_next: bool,
    gate: Option<Arc<Notify>>,
}

impl<E> Clone for FakeService<E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<E> std::fmt::Debug for FakeService<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeService").finish_non_exhaustive()
    }
}

impl<E: Clone> FakeService<E> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                calls: Vec::new(),
                found: None,
                listed: Vec::new(),
                saved: None,
                fail_next: false,
                gate: None,
            })),
        }
    }

    pub fn set_find(&self, entity: Option<E>) {
        self.lock().found = entity;
    }

    pub fn set_query(&self, entities: Vec<E>) {
        self.lock().listed = entities;
    }

    pub fn set_saved(&self, entity: E) {
        self.lock().saved = Some(entity);
    }

    /// Make the next call fail with a 500.
    pub fn fail_next(&self) {
        self.lock().fail_next = true;
    }

    /// Park `create` and `update` until the returned gate is notified.
    pub fn hold(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.lock().gate = Some(Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<ServiceCall<E>> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState<E>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: ServiceCall<E>) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.calls.push(call);
        if std::mem::take(&mut state.fail_next) {
            return Err(ApiError::Api {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Internal Server Error".to_string(),
                alert: None,
            });
        }
        Ok(())
    }

    async fn wait_for_gate(&self) {
        let gate = self.lock().gate.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

fn ok<T>(body: Option<T>) -> EntityResponse<T> {
    EntityResponse {
        status: StatusCode::OK,
        body,
        alert: None,
    }
}

impl<E> EntityService for FakeService<E>
where
    E: RestResource,
    E::Id: Into<i64>,
{
    type Entity = E;

    async fn create(&self, entity: &E) -> Result<EntityResponse<E>, ApiError> {
        self.record(ServiceCall::Create(entity.clone()))?;
        self.wait_for_gate().await;
        let saved = self.lock().saved.clone();
        Ok(ok(Some(saved.unwrap_or_else(|| entity.clone()))))
    }

    async fn update(&self, entity: &E) -> Result<EntityResponse<E>, ApiError> {
        self.record(ServiceCall::Update(entity.clone()))?;
        self.wait_for_gate().await;
        let saved = self.lock().saved.clone();
        Ok(ok(Some(saved.unwrap_or_else(|| entity.clone()))))
    }

    async fn partial_update(&self, patch: &E::Patch) -> Result<EntityResponse<E>, ApiError> {
        use cryptfield_core::Patch;
        self.record(ServiceCall::PartialUpdate(patch.id().into()))?;
        Ok(ok(self.lock().saved.clone()))
    }

    async fn find(&self, id: E::Id) -> Result<EntityResponse<E>, ApiError> {
        self.record(ServiceCall::Find(id.into()))?;
        Ok(ok(self.lock().found.clone()))
    }

    async fn query(&self, options: &RequestOptions) -> Result<EntityResponse<Vec<E>>, ApiError> {
        self.record(ServiceCall::Query(options.to_query_pairs()))?;
        Ok(ok(Some(self.lock().listed.clone())))
    }

    async fn delete(&self, id: E::Id) -> Result<EntityResponse<()>, ApiError> {
        self.record(ServiceCall::Delete(id.into()))?;
        Ok(ok(None))
    }
}

/// Entity ids in collection order.
pub fn ids<E: Entity>(entities: &[E]) -> Vec<i64>
where
    E::Id: Into<i64>,
{
    entities.iter().filter_map(Entity::id).map(Into::into).collect()
}
