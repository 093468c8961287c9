/// Document store
///
/// Project documents follow the project-store pattern, except listing is
/// always scoped: the server requires a `project_id` on the collection
/// endpoint.

use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::stores::LoadingGuard;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use taskboard_shared::models::document::{CreateDocument, Document, UpdateDocument};
use validator::Validate;

/// Store for one project's documents
pub struct DocumentStore {
    api: ApiClient,
    documents: RwLock<Vec<Document>>,
    current: RwLock<Option<Document>>,
    loading: AtomicBool,
}

impl DocumentStore {
    /// Creates an empty store over the given client
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            documents: RwLock::new(Vec::new()),
            current: RwLock::new(None),
            loading: AtomicBool::new(false),
        }
    }

    /// Cached document collection
    pub fn documents(&self) -> Vec<Document> {
        self.documents.read().expect("document cache poisoned").clone()
    }

    /// Currently opened document, if any
    pub fn current(&self) -> Option<Document> {
        self.current.read().expect("current document poisoned").clone()
    }

    /// Whether a collection or detail fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Fetches a project's documents, replacing the cache
    pub async fn list(&self, project_id: i64) -> ClientResult<Vec<Document>> {
        let _loading = LoadingGuard::start(&self.loading);
        let fetched: Vec<Document> = self
            .api
            .get_with_query("documents/", &[("project_id", project_id.to_string())])
            .await?;
        *self.documents.write().expect("document cache poisoned") = fetched.clone();
        Ok(fetched)
    }

    /// Fetches one document, replacing the current pointer
    pub async fn get(&self, id: i64) -> ClientResult<Document> {
        let _loading = LoadingGuard::start(&self.loading);
        let document: Document = self.api.get(&format!("documents/{id}")).await?;
        *self.current.write().expect("current document poisoned") = Some(document.clone());
        Ok(document)
    }

    /// Creates a document and appends it to the cache
    pub async fn create(&self, data: CreateDocument) -> ClientResult<Document> {
        data.validate()?;
        let created: Document = self.api.post("documents/", &data).await?;
        self.documents
            .write()
            .expect("document cache poisoned")
            .push(created.clone());
        Ok(created)
    }

    /// Applies a partial update, replacing the matching cache entry and a
    /// matching current pointer
    pub async fn update(&self, id: i64, patch: UpdateDocument) -> ClientResult<Document> {
        let updated: Document = self.api.patch(&format!("documents/{id}"), &patch).await?;

        {
            let mut cache = self.documents.write().expect("document cache poisoned");
            if let Some(entry) = cache.iter_mut().find(|d| d.id == id) {
                *entry = updated.clone();
            }
        }
        {
            let mut current = self.current.write().expect("current document poisoned");
            if current.as_ref().map(|d| d.id) == Some(id) {
                *current = Some(updated.clone());
            }
        }

        Ok(updated)
    }

    /// Deletes a document, removing it from the cache and clearing a
    /// matching current pointer
    pub async fn remove(&self, id: i64) -> ClientResult<()> {
        self.api.delete(&format!("documents/{id}")).await?;

        self.documents
            .write()
            .expect("document cache poisoned")
            .retain(|d| d.id != id);

        let mut current = self.current.write().expect("current document poisoned");
        if current.as_ref().map(|d| d.id) == Some(id) {
            *current = None;
        }

        Ok(())
    }
}
