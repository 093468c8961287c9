/// Task model, status columns, and ordering
///
/// Tasks are the cards on the kanban board. Each task sits in exactly one
/// status column and carries a `position` ordering key within that column.
///
/// # Status columns
///
/// ```text
/// todo → in_progress → review → done
/// ```
///
/// The server does not enforce this as a state machine; drag-and-drop may
/// move a card between any two columns. The arrows are the conventional
/// flow, nothing more.
///
/// # Example
///
/// ```
/// use taskboard_shared::models::task::TaskStatus;
///
/// assert_eq!(TaskStatus::InProgress.as_str(), "in_progress");
/// assert_eq!(TaskStatus::COLUMNS.len(), 4);
/// assert!(TaskStatus::Done.is_terminal());
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Kanban column a task currently sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started
    Todo,

    /// Being worked on
    InProgress,

    /// Awaiting review
    Review,

    /// Finished
    Done,
}

impl TaskStatus {
    /// Every column, in board order
    pub const COLUMNS: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Done,
    ];

    /// Converts status to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Review => "review",
            TaskStatus::Done => "done",
        }
    }

    /// Whether the task has left the active part of the board
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

/// Priority of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Can wait
    Low,

    /// Default priority
    Medium,

    /// Should be picked up soon
    High,

    /// Drop everything
    Urgent,
}

impl TaskPriority {
    /// Converts priority to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

/// Task record as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task ID
    pub id: i64,

    /// Project this task belongs to
    pub project_id: i64,

    /// Task title
    pub title: String,

    /// Optional long-form description
    pub description: Option<String>,

    /// Column the task currently sits in
    pub status: TaskStatus,

    /// Priority
    #[serde(default)]
    pub priority: TaskPriority,

    /// User the task is assigned to, if any
    pub assignee_id: Option<i64>,

    /// User who created the task
    pub created_by: i64,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Ordering key within the status column (lower sorts first)
    pub position: i32,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// Denormalized display name of the assignee, when included
    #[serde(default)]
    pub assignee_name: Option<String>,

    /// Denormalized display name of the creator, when included
    #[serde(default)]
    pub creator_name: Option<String>,
}

/// Payload for creating a task
///
/// The server assigns the position (end of the target column).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTask {
    /// Task title
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Initial column
    #[serde(default)]
    pub status: TaskStatus,

    /// Priority
    #[serde(default)]
    pub priority: TaskPriority,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Project to create the task in
    pub project_id: i64,

    /// Optional assignee
    pub assignee_id: Option<i64>,
}

/// Payload for a partial task update
///
/// Unset fields are omitted from the PATCH body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,

    /// New priority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,

    /// New assignee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<i64>,

    /// New due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    /// New ordering key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
}

/// Payload for the dedicated position endpoint (drag-and-drop)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPosition {
    /// Column the task was dropped into
    pub status: TaskStatus,

    /// Ordering key within that column
    pub position: i32,
}
