//! Project-level asset items (characters, props, backgrounds, ...).

use serde::{Deserialize, Serialize};

use crate::models::asset::Asset;
use crate::types::DbId;

/// Category of character/persona items, loaded whenever a project is selected.
pub const PERSONA_CATEGORY: &str = "persona";

/// A categorized project-level item with optional uploaded media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetItem {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub base_prompt: Option<String>,
    #[serde(default)]
    pub negative_prompt: Option<String>,
    #[serde(default)]
    pub avatar_asset_id: Option<DbId>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl AssetItem {
    /// The media record chosen as this item's avatar, if it is loaded.
    pub fn avatar(&self) -> Option<&Asset> {
        let avatar_id = self.avatar_asset_id?;
        self.assets.iter().find(|a| a.id == avatar_id)
    }
}

/// DTO for creating an asset item under a project.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAssetItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_prompt: Option<String>,
}

/// DTO for updating an asset item. All fields are optional.
///
/// `avatar_path` registers an already-stored file as a new asset and makes
/// it the item's avatar.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateAssetItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_path: Option<String>,
}
