//! Change notifications published by the project store.
//!
//! Views subscribe through [`ProjectStore::subscribe`](crate::store::ProjectStore::subscribe)
//! and re-read whatever part of the state a notification names.

use shotboard_core::types::DbId;

/// Broadcast buffer for store notifications. Slow subscribers observe
/// `RecvError::Lagged` and should re-read the whole snapshot.
pub const CHANGE_CHANNEL_CAPACITY: usize = 256;

/// A state change applied by one of the store's actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    /// The project list was replaced.
    ProjectsLoaded { count: usize },
    /// A new project became current; dependent collections are being fetched.
    ProjectSelected { project_id: DbId, generation: u64 },
    /// The cached script tree was replaced.
    ScriptLoaded { project_id: DbId },
    /// The cached event list was replaced.
    EventsLoaded { project_id: DbId },
    /// The cached asset-item list was replaced.
    AssetItemsLoaded {
        project_id: DbId,
        category: Option<String>,
    },
    /// A shot was patched on the server. `merged` is false when the shot
    /// was not in the cached tree.
    ShotSaved { shot_id: DbId, merged: bool },
    /// Scene or shot selection changed.
    SelectionChanged {
        scene_id: Option<DbId>,
        shot_id: Option<DbId>,
    },
    /// The store was shut down and all cached state dropped.
    Cleared,
}
