/// Workspace and membership models
///
/// A workspace is the top-level container for projects. Members join a
/// workspace with a role; the collection endpoint returns the bare workspace
/// record while the detail endpoint also embeds the member list.
///
/// # Roles
///
/// - **admin**: Manage the workspace, its projects, and its members
/// - **member**: Create and manage projects and tasks
/// - **viewer**: Read-only access
///
/// # Example
///
/// ```
/// use taskboard_shared::models::workspace::{AddMember, MemberRole};
///
/// let req = AddMember { user_id: 9, role: MemberRole::Viewer };
/// assert_eq!(req.role.as_str(), "viewer");
/// assert!(!req.role.can_edit());
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Role of a user within one workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Manage the workspace, its projects, and its members
    Admin,

    /// Create and manage projects and tasks
    Member,

    /// Read-only access
    Viewer,
}

impl MemberRole {
    /// Converts role to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Admin => "admin",
            MemberRole::Member => "member",
            MemberRole::Viewer => "viewer",
        }
    }

    /// Can manage members and workspace settings
    pub fn can_manage_members(&self) -> bool {
        matches!(self, MemberRole::Admin)
    }

    /// Can create or modify projects and tasks
    pub fn can_edit(&self) -> bool {
        matches!(self, MemberRole::Admin | MemberRole::Member)
    }
}

impl Default for MemberRole {
    fn default() -> Self {
        MemberRole::Member
    }
}

/// Workspace record as returned by the collection endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    /// Unique workspace ID
    pub id: i64,

    /// Workspace name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// User who owns the workspace
    pub owner_id: i64,

    /// When the workspace was created
    pub created_at: DateTime<Utc>,
}

/// One member of a workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceMember {
    /// Membership row ID
    pub id: i64,

    /// The member's user ID
    pub user_id: i64,

    /// Role within this workspace
    #[serde(default)]
    pub role: MemberRole,

    /// When the user joined
    pub joined_at: DateTime<Utc>,

    /// Denormalized email of the member, when the server includes it
    pub user_email: Option<String>,

    /// Denormalized display name of the member, when the server includes it
    pub user_display_name: Option<String>,
}

/// Workspace record as returned by the detail endpoint
///
/// Carries the same fields as [`Workspace`] plus the embedded member list.
/// A partial-update response only contains the bare record; use
/// [`WorkspaceDetail::apply`] to fold it in without losing the members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceDetail {
    /// The bare workspace record
    #[serde(flatten)]
    pub workspace: Workspace,

    /// Members of this workspace
    #[serde(default)]
    pub members: Vec<WorkspaceMember>,
}

impl WorkspaceDetail {
    /// Workspace ID
    pub fn id(&self) -> i64 {
        self.workspace.id
    }

    /// Replaces the bare record, keeping the member list
    pub fn apply(&mut self, workspace: Workspace) {
        self.workspace = workspace;
    }
}

/// Payload for creating a workspace
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateWorkspace {
    /// Workspace name
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    /// Optional description
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

/// Payload for a partial workspace update
///
/// Unset fields are omitted from the PATCH body so the server leaves them
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWorkspace {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for adding a member to a workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMember {
    /// User to add
    pub user_id: i64,

    /// Role to grant
    #[serde(default)]
    pub role: MemberRole,
}
