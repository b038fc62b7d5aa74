//! Script tree models (episode -> scene -> shot) and DTOs.
//!
//! `GET /storyboard/project/{id}` returns the whole tree for a project,
//! episodes ordered by `order`, each owning its scenes and their shots.

use serde::{Deserialize, Serialize};

use crate::models::asset::Asset;
use crate::types::{nullable, DbId};

/// Status assigned to shots created without an explicit one.
pub const DEFAULT_SHOT_STATUS: &str = "draft";

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// An episode: the top level of a project's script tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: DbId,
    pub title: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub scenes: Vec<Scene>,
}

/// A scene within an episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: DbId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sequence_number: Option<i32>,
    #[serde(default)]
    pub shots: Vec<Shot>,
}

/// A shot: the leaf of the script tree and the unit users edit most.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub id: DbId,
    pub sequence_number: i32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub action_text: Option<String>,
    #[serde(default)]
    pub dialogue: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default = "default_shot_status")]
    pub status: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub selected_asset_id: Option<DbId>,
    #[serde(default)]
    pub video_path: Option<String>,
}

fn default_shot_status() -> String {
    DEFAULT_SHOT_STATUS.to_string()
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating an episode under a project.
#[derive(Debug, Clone, Serialize)]
pub struct CreateEpisode {
    pub title: String,
    pub order: i32,
}

/// DTO for creating a scene under an episode.
///
/// The server assigns the next sequence number when it is omitted.
#[derive(Debug, Clone, Serialize)]
pub struct CreateScene {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<i32>,
}

/// DTO for renaming a scene.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateScene {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// DTO for creating a shot under a scene.
#[derive(Debug, Clone, Serialize)]
pub struct CreateShot {
    pub sequence_number: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialogue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub status: String,
}

impl CreateShot {
    /// A blank draft shot at the given position.
    pub fn draft(sequence_number: i32) -> Self {
        Self {
            sequence_number,
            title: None,
            action_text: None,
            dialogue: None,
            prompt: None,
            status: DEFAULT_SHOT_STATUS.to_string(),
        }
    }
}

/// Partial update for a shot. Only present fields are sent and merged.
///
/// Clearable fields are `Option<Option<T>>`: `None` leaves the field
/// unchanged, `Some(None)` is sent as `null` and clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateShot {
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub action_text: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub dialogue: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub prompt: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_asset_id: Option<Option<DbId>>,
}

impl UpdateShot {
    /// Merge the present fields into `shot`, leaving everything else as is.
    /// A field sent as `null` is cleared.
    pub fn apply_to(&self, shot: &mut Shot) {
        if let Some(title) = &self.title {
            shot.title = title.clone();
        }
        if let Some(action_text) = &self.action_text {
            shot.action_text = action_text.clone();
        }
        if let Some(dialogue) = &self.dialogue {
            shot.dialogue = dialogue.clone();
        }
        if let Some(prompt) = &self.prompt {
            shot.prompt = prompt.clone();
        }
        if let Some(status) = &self.status {
            shot.status = status.clone();
        }
        if let Some(asset_id) = self.selected_asset_id {
            shot.selected_asset_id = asset_id;
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

// ---------------------------------------------------------------------------
// Tree helpers
// ---------------------------------------------------------------------------

/// Find a shot anywhere in the tree, walking episodes -> scenes -> shots.
pub fn find_shot(episodes: &[Episode], shot_id: DbId) -> Option<&Shot> {
    episodes
        .iter()
        .flat_map(|ep| ep.scenes.iter())
        .flat_map(|sc| sc.shots.iter())
        .find(|shot| shot.id == shot_id)
}

/// Mutable variant of [`find_shot`].
pub fn find_shot_mut(episodes: &mut [Episode], shot_id: DbId) -> Option<&mut Shot> {
    episodes
        .iter_mut()
        .flat_map(|ep| ep.scenes.iter_mut())
        .flat_map(|sc| sc.shots.iter_mut())
        .find(|shot| shot.id == shot_id)
}

/// Total number of shots across the tree.
pub fn shot_count(episodes: &[Episode]) -> usize {
    episodes
        .iter()
        .flat_map(|ep| ep.scenes.iter())
        .map(|sc| sc.shots.len())
        .sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
