//! Static route table mapping client paths to views.
//!
//! Paths carry no parameters; `/` redirects to the script view. The table
//! is the union of both route sets the client has shipped with, so
//! `/characters` (persona items only) and `/assets` (every category)
//! coexist as two views over the same asset-item data.

use shotboard_core::models::PERSONA_CATEGORY;

/// Upper bound on redirect hops while resolving a path.
const MAX_REDIRECTS: usize = 4;

/// A top-level screen of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Episode -> scene -> shot editor.
    Script,
    /// Event list.
    Events,
    /// Event graph editor.
    EventFlow,
    /// Asset items of every category.
    AssetLibrary,
    /// Character (persona) asset items.
    Characters,
}

/// The store collection a view renders from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewData {
    Script,
    Events,
    AssetItems,
}

impl View {
    pub fn data(self) -> ViewData {
        match self {
            View::Script => ViewData::Script,
            View::Events | View::EventFlow => ViewData::Events,
            View::AssetLibrary | View::Characters => ViewData::AssetItems,
        }
    }

    /// Category filter for asset-item views; `None` loads every category.
    pub fn asset_category(self) -> Option<&'static str> {
        match self {
            View::Characters => Some(PERSONA_CATEGORY),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Script => "Script",
            View::Events => "Events",
            View::EventFlow => "Event flow",
            View::AssetLibrary => "Asset library",
            View::Characters => "Characters",
        }
    }
}

/// What a route path leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    View(View),
    Redirect(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub target: RouteTarget,
}

/// The client's route table.
pub const ROUTES: &[Route] = &[
    Route {
        path: "/",
        target: RouteTarget::Redirect("/script"),
    },
    Route {
        path: "/script",
        target: RouteTarget::View(View::Script),
    },
    Route {
        path: "/events",
        target: RouteTarget::View(View::Events),
    },
    Route {
        path: "/events/flow",
        target: RouteTarget::View(View::EventFlow),
    },
    Route {
        path: "/assets",
        target: RouteTarget::View(View::AssetLibrary),
    },
    Route {
        path: "/characters",
        target: RouteTarget::View(View::Characters),
    },
];

/// A successfully resolved path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub view: View,
    /// Path of the route that rendered, after redirects.
    pub path: &'static str,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("No route for path '{0}'")]
    NotFound(String),

    #[error("Too many redirects resolving '{0}'")]
    RedirectLoop(String),
}

/// Resolve a location to a view, following redirects.
///
/// Query strings, fragments and a trailing slash are ignored, so
/// `/events/?tab=2` resolves like `/events`.
pub fn resolve(location: &str) -> Result<ResolvedRoute, RouteError> {
    let mut path = normalize(location);

    for _ in 0..=MAX_REDIRECTS {
        let route = ROUTES
            .iter()
            .find(|r| r.path == path)
            .ok_or_else(|| RouteError::NotFound(location.to_string()))?;

        match route.target {
            RouteTarget::View(view) => {
                return Ok(ResolvedRoute {
                    view,
                    path: route.path,
                })
            }
            RouteTarget::Redirect(to) => {
                tracing::debug!(from = route.path, to, "Route redirect");
                path = to;
            }
        }
    }

    Err(RouteError::RedirectLoop(location.to_string()))
}

fn normalize(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = &location[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
