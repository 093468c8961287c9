/// Document model
///
/// Free-form documents attached to a project. Listing is always scoped to a
/// project; the server requires the `project_id` query parameter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Document record as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID
    pub id: i64,

    /// Project this document belongs to
    pub project_id: i64,

    /// Document title
    pub title: String,

    /// Document body (markdown)
    pub content: Option<String>,

    /// User who created the document
    pub created_by: i64,

    /// When the document was created
    pub created_at: DateTime<Utc>,

    /// When the document was last edited, if ever
    pub updated_at: Option<DateTime<Utc>>,

    /// Denormalized display name of the creator, when included
    #[serde(default)]
    pub creator_name: Option<String>,
}

/// Payload for creating a document
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDocument {
    /// Document title
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    /// Optional initial body
    pub content: Option<String>,

    /// Project to attach the document to
    pub project_id: i64,
}

/// Payload for a partial document update
///
/// Unset fields are omitted from the PATCH body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDocument {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
