/// Resource models for the Taskboard API
///
/// This module contains the client-side mirrors of every server resource,
/// together with the request payloads used to mutate them.
///
/// # Models
///
/// - `user`: User accounts, roles, and authentication payloads
/// - `workspace`: Workspaces and workspace memberships
/// - `project`: Projects within a workspace
/// - `task`: Kanban tasks with status columns and ordering
/// - `document`: Project documents
///
/// # Example
///
/// ```
/// use taskboard_shared::models::task::{CreateTask, TaskPriority, TaskStatus};
///
/// let draft = CreateTask {
///     title: "Wire up the board view".to_string(),
///     description: None,
///     status: TaskStatus::Todo,
///     priority: TaskPriority::High,
///     due_date: None,
///     project_id: 7,
///     assignee_id: None,
/// };
/// assert_eq!(draft.status.as_str(), "todo");
/// ```

pub mod document;
pub mod project;
pub mod task;
pub mod user;
pub mod workspace;
