//! Address-specific queries.

use crate::http::RequestOptions;

/// Filter selecting addresses not yet assigned to any customer.
pub const UNASSIGNED_FILTER: &str = "customer-is-null";

/// Query options for the addresses a customer can still pick.
#[must_use]
pub fn unassigned_addresses() -> RequestOptions {
    RequestOptions::new().filter(UNASSIGNED_FILTER)
}
