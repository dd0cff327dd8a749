//! Cryptfield Core - Shared entity types.
//!
//! This crate provides the types used by every cryptfield component:
//! - `webapp` - Entity services, resolvers and screen controllers
//! - `cli` - Command-line front end for the customer screens
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O and no
//! HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe entity IDs
//! - [`entities`] - `Customer` and `CustomerAddress` records plus patch bodies
//! - [`collection`] - Merging a current selection into a dropdown option set
//! - [`validation`] - Field constraints checked before a form is submitted

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod collection;
pub mod entities;
pub mod types;
pub mod validation;

pub use collection::add_to_collection_if_missing;
pub use entities::*;
pub use types::*;
pub use validation::{ValidationError, ValidationErrors};
