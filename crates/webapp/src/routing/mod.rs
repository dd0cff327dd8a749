//! Navigation, route access and pre-navigation data loading.
//!
//! A screen activates in three steps: the [`AccessGate`] decides whether the
//! route may be entered, the [`EntityResolver`] loads the entity (or a blank
//! one for "new"), and only then is the screen handed its data. See
//! [`activate_route`].

mod access;
mod navigator;
mod resolver;
mod route;

pub use access::{AccessGate, Account, AccountAccessGate};
pub use navigator::{HistoryNavigator, Navigation, Navigator};
pub use resolver::{EntityResolver, NOT_FOUND_PATH, Resolution, RouteParams};
pub use route::{Activation, EntityRoute, RouteData, activate_route};
