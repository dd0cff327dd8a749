//! Route access checks.

use std::future::Future;
use std::sync::Arc;

use tracing::info;

use super::navigator::Navigator;
use super::route::RouteData;

/// Decides whether a route may be activated.
///
/// Runs before any resolver. A gate that denies access is responsible for
/// redirecting (e.g. to a login screen).
pub trait AccessGate: Send + Sync {
    fn can_activate(&self, route: &RouteData) -> impl Future<Output = bool> + Send;
}

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub login: String,
    pub authorities: Vec<String>,
}

impl Account {
    #[must_use]
    pub fn new<I, S>(login: impl Into<String>, authorities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            login: login.into(),
            authorities: authorities.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the account holds at least one of `required`. An empty list
    /// requires nothing.
    #[must_use]
    pub fn has_any_authority(&self, required: &[String]) -> bool {
        required.is_empty() || required.iter().any(|r| self.authorities.contains(r))
    }
}

/// Gate backed by a known account.
///
/// - No account: redirect to `login`, deny.
/// - Account without any required authority: redirect to `accessdenied`, deny.
/// - Otherwise: allow.
pub struct AccountAccessGate {
    account: Option<Account>,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for AccountAccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountAccessGate")
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}

impl AccountAccessGate {
    #[must_use]
    pub fn new(account: Option<Account>, navigator: Arc<dyn Navigator>) -> Self {
        Self { account, navigator }
    }

    fn check(&self, route: &RouteData) -> bool {
        match &self.account {
            Some(account) if account.has_any_authority(&route.authorities) => true,
            Some(account) => {
                info!(login = %account.login, required = ?route.authorities, "Access denied");
                self.navigator.navigate(&["accessdenied"]);
                false
            }
            None => {
                info!("Not authenticated, redirecting to login");
                self.navigator.navigate(&["login"]);
                false
            }
        }
    }
}

impl AccessGate for AccountAccessGate {
    async fn can_activate(&self, route: &RouteData) -> bool {
        self.check(route)
    }
}
