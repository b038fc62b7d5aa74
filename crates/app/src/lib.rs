//! Client-side application state for the storyboard server: the route
//! table and the project store that caches one project's data.

pub mod changes;
pub mod config;
pub mod router;
pub mod store;

pub use changes::StoreChange;
pub use config::AppConfig;
pub use router::{resolve, ResolvedRoute, RouteError, View, ViewData};
pub use store::{ProjectState, ProjectStore};
