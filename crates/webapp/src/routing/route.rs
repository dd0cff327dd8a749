//! Entity route table.

use tracing::debug;

use super::access::AccessGate;
use super::resolver::{EntityResolver, Resolution, RouteParams};
use crate::error::ApiError;
use crate::services::EntityService;

/// Default list ordering.
const DEFAULT_SORT: &str = "id,asc";

/// Screens below an entity root such as `customer-address/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRoute {
    /// `""`
    List,
    /// `":id/view"`
    View(String),
    /// `"new"`
    New,
    /// `":id/edit"`
    Edit(String),
}

impl EntityRoute {
    /// Match a path relative to the entity root. Leading and trailing slashes
    /// are ignored.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        match segments.as_slice() {
            [""] => Some(Self::List),
            ["new"] => Some(Self::New),
            [id, "view"] if !id.is_empty() => Some(Self::View((*id).to_string())),
            [id, "edit"] if !id.is_empty() => Some(Self::Edit((*id).to_string())),
            _ => None,
        }
    }

    /// Parameters handed to the resolver.
    #[must_use]
    pub fn params(&self) -> RouteParams {
        match self {
            Self::View(id) | Self::Edit(id) => RouteParams::with_id(id.clone()),
            Self::List | Self::New => RouteParams::empty(),
        }
    }

    /// Static data attached to the route.
    #[must_use]
    pub fn data(&self) -> RouteData {
        match self {
            Self::List => RouteData {
                default_sort: Some(DEFAULT_SORT),
                ..RouteData::default()
            },
            _ => RouteData::default(),
        }
    }
}

/// Route metadata read by the access gate and list screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteData {
    /// Authorities of which the user needs at least one. Empty means any
    /// authenticated user.
    pub authorities: Vec<String>,
    pub default_sort: Option<&'static str>,
}

/// What the router hands the activated screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation<E> {
    /// The access gate refused; it has already redirected.
    Denied,
    List { sort: &'static str },
    View(E),
    /// Update screen, for both new and existing entities.
    Edit(E),
    /// The resolver redirected to the not-found page.
    Redirected,
}

/// Activate `route`: access check first, then resolution for screens that
/// need an entity.
///
/// # Errors
///
/// Returns the resolver's error when fetching the entity fails.
pub async fn activate_route<G, S>(
    gate: &G,
    resolver: &EntityResolver<S>,
    route: &EntityRoute,
) -> Result<Activation<S::Entity>, ApiError>
where
    G: AccessGate,
    S: EntityService,
{
    let data = route.data();
    if !gate.can_activate(&data).await {
        debug!(?route, "Route activation denied");
        return Ok(Activation::Denied);
    }

    if *route == EntityRoute::List {
        return Ok(Activation::List {
            sort: data.default_sort.unwrap_or(DEFAULT_SORT),
        });
    }

    let entity = match resolver.resolve(&route.params()).await? {
        Resolution::Resolved(entity) => entity,
        Resolution::Redirected => return Ok(Activation::Redirected),
    };

    Ok(match route {
        EntityRoute::View(_) => Activation::View(entity),
        _ => Activation::Edit(entity),
    })
}
