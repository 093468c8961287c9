/// Workspace store
///
/// Caches the workspace collection and the currently opened workspace
/// detail (which carries the member list). Member add/remove only touch the
/// detail pointer, and only when it is the targeted workspace; the bare
/// collection entries do not embed members.

use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::stores::LoadingGuard;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use taskboard_shared::models::workspace::{
    AddMember, CreateWorkspace, UpdateWorkspace, Workspace, WorkspaceDetail, WorkspaceMember,
};
use validator::Validate;

/// Store for the workspace collection and current workspace detail
pub struct WorkspaceStore {
    api: ApiClient,
    workspaces: RwLock<Vec<Workspace>>,
    current: RwLock<Option<WorkspaceDetail>>,
    loading: AtomicBool,
}

impl WorkspaceStore {
    /// Creates an empty store over the given client
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            workspaces: RwLock::new(Vec::new()),
            current: RwLock::new(None),
            loading: AtomicBool::new(false),
        }
    }

    /// Cached workspace collection
    pub fn workspaces(&self) -> Vec<Workspace> {
        self.workspaces.read().expect("workspace cache poisoned").clone()
    }

    /// Currently opened workspace detail, if any
    pub fn current(&self) -> Option<WorkspaceDetail> {
        self.current.read().expect("current workspace poisoned").clone()
    }

    /// Whether a collection or detail fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Fetches all workspaces, replacing the cache
    pub async fn list(&self) -> ClientResult<Vec<Workspace>> {
        let _loading = LoadingGuard::start(&self.loading);
        let fetched: Vec<Workspace> = self.api.get("workspaces/").await?;
        tracing::debug!(count = fetched.len(), "workspace cache replaced");
        *self.workspaces.write().expect("workspace cache poisoned") = fetched.clone();
        Ok(fetched)
    }

    /// Fetches one workspace with its members, replacing the current pointer
    pub async fn get(&self, id: i64) -> ClientResult<WorkspaceDetail> {
        let _loading = LoadingGuard::start(&self.loading);
        let detail: WorkspaceDetail = self.api.get(&format!("workspaces/{id}")).await?;
        *self.current.write().expect("current workspace poisoned") = Some(detail.clone());
        Ok(detail)
    }

    /// Creates a workspace and appends it to the cache
    pub async fn create(&self, data: CreateWorkspace) -> ClientResult<Workspace> {
        data.validate()?;
        let created: Workspace = self.api.post("workspaces/", &data).await?;
        self.workspaces
            .write()
            .expect("workspace cache poisoned")
            .push(created.clone());
        Ok(created)
    }

    /// Applies a partial update
    ///
    /// The server response replaces the matching cache entry; if the current
    /// pointer is the target, its bare record is replaced too while the
    /// member list is kept (the update response does not embed members).
    pub async fn update(&self, id: i64, patch: UpdateWorkspace) -> ClientResult<Workspace> {
        let updated: Workspace = self.api.patch(&format!("workspaces/{id}"), &patch).await?;

        {
            let mut cache = self.workspaces.write().expect("workspace cache poisoned");
            if let Some(entry) = cache.iter_mut().find(|w| w.id == id) {
                *entry = updated.clone();
            }
        }
        {
            let mut current = self.current.write().expect("current workspace poisoned");
            if let Some(detail) = current.as_mut() {
                if detail.id() == id {
                    detail.apply(updated.clone());
                }
            }
        }

        Ok(updated)
    }

    /// Deletes a workspace, removing it from the cache
    ///
    /// Clears the current pointer if it was the target. Projects cached by
    /// other stores are NOT cascaded; the caches are independent mirrors.
    pub async fn remove(&self, id: i64) -> ClientResult<()> {
        self.api.delete(&format!("workspaces/{id}")).await?;

        self.workspaces
            .write()
            .expect("workspace cache poisoned")
            .retain(|w| w.id != id);

        let mut current = self.current.write().expect("current workspace poisoned");
        if current.as_ref().map(|d| d.id()) == Some(id) {
            *current = None;
        }

        Ok(())
    }

    /// Adds a member to a workspace
    ///
    /// The new member is appended to the current detail's member list only
    /// if the current pointer is the targeted workspace.
    pub async fn add_member(
        &self,
        workspace_id: i64,
        data: AddMember,
    ) -> ClientResult<WorkspaceMember> {
        let member: WorkspaceMember = self
            .api
            .post(&format!("workspaces/{workspace_id}/members"), &data)
            .await?;

        let mut current = self.current.write().expect("current workspace poisoned");
        if let Some(detail) = current.as_mut() {
            if detail.id() == workspace_id {
                detail.members.push(member.clone());
            }
        }

        Ok(member)
    }

    /// Removes a member from a workspace
    ///
    /// Mirrors [`WorkspaceStore::add_member`]: only a matching current
    /// detail has its member list touched.
    pub async fn remove_member(&self, workspace_id: i64, user_id: i64) -> ClientResult<()> {
        self.api
            .delete(&format!("workspaces/{workspace_id}/members/{user_id}"))
            .await?;

        let mut current = self.current.write().expect("current workspace poisoned");
        if let Some(detail) = current.as_mut() {
            if detail.id() == workspace_id {
                detail.members.retain(|m| m.user_id != user_id);
            }
        }

        Ok(())
    }
}
