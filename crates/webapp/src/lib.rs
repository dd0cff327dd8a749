//! Cryptfield webapp library.
//!
//! Client-side half of the customer and address screens:
//!
//! - [`services`] - REST entity services (create, update, patch, find, query, delete)
//! - [`routing`] - Route table, access gate and the resolvers that pre-fetch
//!   an entity before a screen activates
//! - [`components`] - Update form controllers plus the detail, list and
//!   delete components
//! - [`events`] - Broadcaster for alerts and HTTP errors
//!
//! Collaborators (API client, navigator, access gate) are constructed
//! explicitly and passed in; nothing is a global singleton.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod http;
pub mod routing;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{AppConfig, ConfigError};
pub use error::{ApiError, SaveError};
pub use events::{AppEvent, EventManager};
pub use http::{ApiClient, EntityResponse, RequestOptions};
pub use services::{CustomerAddressService, CustomerService, EntityService, RestResource};
