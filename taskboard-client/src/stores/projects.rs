/// Project store
///
/// Same cache/current pattern as the workspace store, minus members. The
/// collection fetch optionally scopes to one workspace via the
/// `workspace_id` query parameter and always replaces the whole cache, so a
/// workspace-scoped list fully evicts a previous global one.

use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::stores::LoadingGuard;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use taskboard_shared::models::project::{CreateProject, Project, UpdateProject};
use validator::Validate;

/// Store for the project collection and current project
pub struct ProjectStore {
    api: ApiClient,
    projects: RwLock<Vec<Project>>,
    current: RwLock<Option<Project>>,
    loading: AtomicBool,
}

impl ProjectStore {
    /// Creates an empty store over the given client
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            projects: RwLock::new(Vec::new()),
            current: RwLock::new(None),
            loading: AtomicBool::new(false),
        }
    }

    /// Cached project collection
    pub fn projects(&self) -> Vec<Project> {
        self.projects.read().expect("project cache poisoned").clone()
    }

    /// Currently opened project, if any
    pub fn current(&self) -> Option<Project> {
        self.current.read().expect("current project poisoned").clone()
    }

    /// Whether a collection or detail fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Fetches projects, replacing the cache
    ///
    /// With `workspace_id` the server returns only that workspace's
    /// projects; the cache is replaced either way.
    pub async fn list(&self, workspace_id: Option<i64>) -> ClientResult<Vec<Project>> {
        let _loading = LoadingGuard::start(&self.loading);

        let query: Vec<(&str, String)> = workspace_id
            .map(|id| vec![("workspace_id", id.to_string())])
            .unwrap_or_default();
        let fetched: Vec<Project> = self.api.get_with_query("projects/", &query).await?;

        tracing::debug!(count = fetched.len(), ?workspace_id, "project cache replaced");
        *self.projects.write().expect("project cache poisoned") = fetched.clone();
        Ok(fetched)
    }

    /// Fetches one project, replacing the current pointer
    pub async fn get(&self, id: i64) -> ClientResult<Project> {
        let _loading = LoadingGuard::start(&self.loading);
        let project: Project = self.api.get(&format!("projects/{id}")).await?;
        *self.current.write().expect("current project poisoned") = Some(project.clone());
        Ok(project)
    }

    /// Creates a project and appends it to the cache
    pub async fn create(&self, data: CreateProject) -> ClientResult<Project> {
        data.validate()?;
        let created: Project = self.api.post("projects/", &data).await?;
        self.projects
            .write()
            .expect("project cache poisoned")
            .push(created.clone());
        Ok(created)
    }

    /// Applies a partial update, replacing the matching cache entry and a
    /// matching current pointer
    pub async fn update(&self, id: i64, patch: UpdateProject) -> ClientResult<Project> {
        let updated: Project = self.api.patch(&format!("projects/{id}"), &patch).await?;

        {
            let mut cache = self.projects.write().expect("project cache poisoned");
            if let Some(entry) = cache.iter_mut().find(|p| p.id == id) {
                *entry = updated.clone();
            }
        }
        {
            let mut current = self.current.write().expect("current project poisoned");
            if current.as_ref().map(|p| p.id) == Some(id) {
                *current = Some(updated.clone());
            }
        }

        Ok(updated)
    }

    /// Deletes a project, removing it from the cache and clearing a matching
    /// current pointer
    pub async fn remove(&self, id: i64) -> ClientResult<()> {
        self.api.delete(&format!("projects/{id}")).await?;

        self.projects
            .write()
            .expect("project cache poisoned")
            .retain(|p| p.id != id);

        let mut current = self.current.write().expect("current project poisoned");
        if current.as_ref().map(|p| p.id) == Some(id) {
            *current = None;
        }

        Ok(())
    }
}
