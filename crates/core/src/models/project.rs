//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A project as returned by `GET /projects/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Serialize)]
pub struct CreateProject {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_without_description_decodes() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "A",
        }))
        .unwrap();
        assert_eq!(project.id, 1);
        assert_eq!(project.name, "A");
        assert!(project.description.is_none());
    }

    #[test]
    fn rename_only_sends_name() {
        let update = UpdateProject {
            name: Some("Renamed".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Renamed" }));
    }
}
