//! Entity models and request DTOs, one module per server resource.

pub mod asset;
pub mod asset_item;
pub mod event;
pub mod project;
pub mod script;

pub use asset::Asset;
pub use asset_item::{AssetItem, CreateAssetItem, UpdateAssetItem, PERSONA_CATEGORY};
pub use event::{CreateEvent, Event, EventNode, NodeTarget, UpdateEvent, UpsertEventNode};
pub use project::{CreateProject, Project, UpdateProject};
pub use script::{
    CreateEpisode, CreateScene, CreateShot, Episode, Scene, Shot, UpdateScene, UpdateShot,
};
