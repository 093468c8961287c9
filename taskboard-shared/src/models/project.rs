/// Project model
///
/// A project lives inside a workspace and owns tasks and documents. The
/// client lists projects either globally or scoped to one workspace via the
/// `workspace_id` query parameter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Project record as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project ID
    pub id: i64,

    /// Project name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Workspace this project belongs to
    pub workspace_id: i64,

    /// When the project was created
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a project
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProject {
    /// Project name
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    /// Optional description
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    /// Workspace to create the project in
    pub workspace_id: i64,
}

/// Payload for a partial project update
///
/// Unset fields are omitted from the PATCH body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
