//! Media asset records attached to shots and asset items.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// File type the server assigns to uploads whose content type is not video.
pub const FILE_TYPE_IMAGE: &str = "image";

/// File type the server assigns to uploads with a `video/*` content type.
pub const FILE_TYPE_VIDEO: &str = "video";

/// An uploaded or registered media file.
///
/// `file_path` is relative to the server's `/files/` mount for uploads,
/// or whatever path was registered through `POST /assets/shot/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: DbId,
    pub file_path: String,
    pub file_type: String,
    #[serde(default)]
    pub meta_data: Option<serde_json::Value>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(with = "crate::types::lenient_timestamp")]
    pub created_at: Timestamp,
}

impl Asset {
    pub fn is_video(&self) -> bool {
        self.file_type == FILE_TYPE_VIDEO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_asset() {
        let asset: Asset = serde_json::from_value(serde_json::json!({
            "id": 5,
            "file_path": "Demo/characters/hero.png",
            "file_type": "image",
            "meta_data": { "seed": 42 },
            "is_favorite": true,
            "created_at": "2024-05-01T10:00:00",
        }))
        .unwrap();

        assert_eq!(asset.id, 5);
        assert!(asset.is_favorite);
        assert!(!asset.is_video());
        assert_eq!(asset.meta_data.unwrap()["seed"], 42);
    }
}
