//! Narrative event models and DTOs.
//!
//! Events sit beside the script tree rather than inside it. Each event
//! carries free-form graph layout data plus a set of nodes, each pinning a
//! description to one episode, scene or shot.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Colour the server assigns to events created without one.
pub const DEFAULT_EVENT_COLOR: &str = "#3B82F6";

/// The kind of script-tree entity an event node points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeTarget {
    Episode,
    Scene,
    Shot,
}

/// A narrative event belonging to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: DbId,
    pub name: String,
    #[serde(default = "default_event_color")]
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Node/edge layout for the flow view; opaque to the client.
    #[serde(default)]
    pub graph_data: Option<serde_json::Value>,
    #[serde(default)]
    pub nodes: Vec<EventNode>,
}

impl Event {
    /// Nodes attached to a given script-tree entity.
    pub fn nodes_for(
        &self,
        target_type: NodeTarget,
        target_id: DbId,
    ) -> impl Iterator<Item = &EventNode> {
        self.nodes
            .iter()
            .filter(move |n| n.target_type == target_type && n.target_id == target_id)
    }
}

/// One node of an event's graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventNode {
    pub id: DbId,
    pub target_type: NodeTarget,
    pub target_id: DbId,
    pub description: String,
}

fn default_event_color() -> String {
    DEFAULT_EVENT_COLOR.to_string()
}

/// DTO for creating an event under a project.
#[derive(Debug, Clone, Serialize)]
pub struct CreateEvent {
    pub name: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateEvent {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: DEFAULT_EVENT_COLOR.to_string(),
            description: None,
        }
    }
}

/// DTO for updating an event. All fields are optional.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_data: Option<serde_json::Value>,
}

/// DTO for `POST /events/nodes/{event_id}`: creates the node for the
/// given target, or replaces its description if one already exists.
#[derive(Debug, Clone, Serialize)]
pub struct UpsertEventNode {
    pub description: String,
    pub target_type: NodeTarget,
    pub target_id: DbId,
}
