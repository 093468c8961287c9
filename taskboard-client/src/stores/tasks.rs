/// Task store and kanban board grouping
///
/// The task cache is a flat list; [`TaskStore::board`] derives the
/// column-grouped view the board renders from. Drag-and-drop uses a pair of
/// operations: [`TaskStore::move_local`] updates the cache instantly so the
/// card lands where it was dropped, and [`TaskStore::update_position`]
/// persists the move. Until the second call completes the cache knowingly
/// diverges from the server.

use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::stores::LoadingGuard;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use taskboard_shared::models::task::{CreateTask, Task, TaskPosition, TaskStatus, UpdateTask};
use validator::Validate;

/// Tasks grouped by status column, in board order
#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    /// Not started
    pub todo: Vec<Task>,

    /// Being worked on
    pub in_progress: Vec<Task>,

    /// Awaiting review
    pub review: Vec<Task>,

    /// Finished
    pub done: Vec<Task>,
}

impl TaskBoard {
    /// Tasks in one column
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Review => &self.review,
            TaskStatus::Done => &self.done,
        }
    }

    fn column_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Review => &mut self.review,
            TaskStatus::Done => &mut self.done,
        }
    }

    /// Total number of tasks across all columns
    pub fn len(&self) -> usize {
        TaskStatus::COLUMNS
            .iter()
            .map(|status| self.column(*status).len())
            .sum()
    }

    /// Whether the board has no tasks at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Store for the task collection
pub struct TaskStore {
    api: ApiClient,
    tasks: RwLock<Vec<Task>>,
    loading: AtomicBool,
}

impl TaskStore {
    /// Creates an empty store over the given client
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            tasks: RwLock::new(Vec::new()),
            loading: AtomicBool::new(false),
        }
    }

    /// Cached task collection
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.read().expect("task cache poisoned").clone()
    }

    /// Whether a collection fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Derives the board view: every cached task in exactly one column
    ///
    /// Column order within a column follows the cache, which the server
    /// returns sorted by position.
    pub fn board(&self) -> TaskBoard {
        let tasks = self.tasks.read().expect("task cache poisoned");
        let mut board = TaskBoard::default();
        for task in tasks.iter() {
            board.column_mut(task.status).push(task.clone());
        }
        board
    }

    /// Fetches tasks, replacing the cache
    ///
    /// With `project_id` the server returns only that project's tasks.
    pub async fn list(&self, project_id: Option<i64>) -> ClientResult<Vec<Task>> {
        let _loading = LoadingGuard::start(&self.loading);

        let query: Vec<(&str, String)> = project_id
            .map(|id| vec![("project_id", id.to_string())])
            .unwrap_or_default();
        let fetched: Vec<Task> = self.api.get_with_query("tasks/", &query).await?;

        tracing::debug!(count = fetched.len(), ?project_id, "task cache replaced");
        *self.tasks.write().expect("task cache poisoned") = fetched.clone();
        Ok(fetched)
    }

    /// Fetches one task without touching the cache
    ///
    /// Detail views use this for data the board list does not carry; the
    /// board keeps rendering from the unchanged cache.
    pub async fn get(&self, id: i64) -> ClientResult<Task> {
        self.api.get(&format!("tasks/{id}")).await
    }

    /// Creates a task and appends it to the cache
    pub async fn create(&self, data: CreateTask) -> ClientResult<Task> {
        data.validate()?;
        let created: Task = self.api.post("tasks/", &data).await?;
        self.tasks
            .write()
            .expect("task cache poisoned")
            .push(created.clone());
        Ok(created)
    }

    /// Applies a partial update, replacing the matching cache entry
    pub async fn update(&self, id: i64, patch: UpdateTask) -> ClientResult<Task> {
        let updated: Task = self.api.patch(&format!("tasks/{id}"), &patch).await?;
        self.replace_cached(updated.clone());
        Ok(updated)
    }

    /// Persists a drag-and-drop move via the dedicated position endpoint
    ///
    /// The server response replaces the matching cache entry, reconciling
    /// whatever [`TaskStore::move_local`] wrote there.
    pub async fn update_position(&self, id: i64, position: TaskPosition) -> ClientResult<Task> {
        let updated: Task = self
            .api
            .patch(&format!("tasks/{id}/position"), &position)
            .await?;
        self.replace_cached(updated.clone());
        Ok(updated)
    }

    /// Deletes a task, removing it from the cache
    pub async fn remove(&self, id: i64) -> ClientResult<()> {
        self.api.delete(&format!("tasks/{id}")).await?;
        self.tasks
            .write()
            .expect("task cache poisoned")
            .retain(|t| t.id != id);
        Ok(())
    }

    /// Optimistically moves a task in the cache, without a server call
    ///
    /// The caller is responsible for persisting the move with
    /// [`TaskStore::update_position`]; until then the cache diverges from
    /// the server. Returns whether the task was found in the cache.
    pub fn move_local(&self, id: i64, status: TaskStatus, position: i32) -> bool {
        let mut tasks = self.tasks.write().expect("task cache poisoned");
        match tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.status = status;
                task.position = position;
                true
            }
            None => false,
        }
    }

    fn replace_cached(&self, updated: Task) {
        let mut tasks = self.tasks.write().expect("task cache poisoned");
        if let Some(entry) = tasks.iter_mut().find(|t| t.id == updated.id) {
            *entry = updated;
        }
    }
}
