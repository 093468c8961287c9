//! Common test utilities for integration tests
//!
//! Spins up an in-process mock of the Taskboard API speaking the same wire
//! format as the real server (JSON bodies, form-encoded login, bearer
//! tokens, `{"detail": ...}` error envelopes) and wires a client at it. The
//! mock state is shared with the test so assertions can reach behind the
//! HTTP surface, and sessions can be revoked server-side to exercise the
//! client's failure paths.

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Form, Json, Router};
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use taskboard_client::config::ClientConfig;
use taskboard_client::http::ApiClient;
use taskboard_client::stores::documents::DocumentStore;
use taskboard_client::stores::projects::ProjectStore;
use taskboard_client::stores::session::SessionStore;
use taskboard_client::stores::tasks::TaskStore;
use taskboard_client::stores::workspaces::WorkspaceStore;
use taskboard_client::token::MemoryTokenStore;
use taskboard_shared::models::document::{CreateDocument, Document, UpdateDocument};
use taskboard_shared::models::project::{CreateProject, Project, UpdateProject};
use taskboard_shared::models::task::{CreateTask, Task, TaskPosition, UpdateTask};
use taskboard_shared::models::user::{AuthToken, RegisterUser, User, UserRole};
use taskboard_shared::models::workspace::{
    AddMember, CreateWorkspace, MemberRole, UpdateWorkspace, Workspace, WorkspaceDetail,
    WorkspaceMember,
};

/// Email of the pre-seeded test account
pub const TEST_EMAIL: &str = "ada@example.com";

/// Password of the pre-seeded test account
pub const TEST_PASSWORD: &str = "correct horse battery";

/// One registered account in the mock API
pub struct MockUser {
    pub user: User,
    pub password: String,
}

/// In-memory state behind the mock API
#[derive(Default)]
pub struct MockApi {
    next_id: i64,
    next_token: i64,
    pub users: Vec<MockUser>,
    /// Valid bearer tokens mapped to the user they belong to
    pub sessions: HashMap<String, i64>,
    pub workspaces: Vec<WorkspaceDetail>,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub documents: Vec<Document>,
}

impl MockApi {
    fn alloc_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn mint_token(&mut self, user_id: i64) -> String {
        self.next_token += 1;
        let token = format!("test-token-{}", self.next_token);
        self.sessions.insert(token.clone(), user_id);
        token
    }

    pub fn seed_user(&mut self, email: &str, password: &str, display_name: &str) -> User {
        let user = User {
            id: self.alloc_id(),
            email: email.to_string(),
            display_name: display_name.to_string(),
            avatar_url: None,
            role: UserRole::Member,
            created_at: Utc::now(),
        };
        self.users.push(MockUser {
            user: user.clone(),
            password: password.to_string(),
        });
        user
    }
}

pub type SharedState = Arc<Mutex<MockApi>>;

fn api_error(status: StatusCode, detail: &str) -> Response {
    (status, Json(serde_json::json!({ "detail": detail }))).into_response()
}

/// Validates the bearer token, returning the session's user ID
fn require_auth(state: &SharedState, headers: &HeaderMap) -> Result<i64, Response> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let token = match token {
        Some(token) => token,
        None => return Err(api_error(StatusCode::UNAUTHORIZED, "Not authenticated")),
    };

    let guard = state.lock().unwrap();
    match guard.sessions.get(token) {
        Some(user_id) => Ok(*user_id),
        None => Err(api_error(
            StatusCode::UNAUTHORIZED,
            "Could not validate credentials",
        )),
    }
}

#[derive(Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

async fn login(State(state): State<SharedState>, Form(form): Form<LoginRequest>) -> Response {
    let mut guard = state.lock().unwrap();
    let user_id = guard
        .users
        .iter()
        .find(|u| u.user.email == form.username && u.password == form.password)
        .map(|u| u.user.id);

    match user_id {
        Some(user_id) => {
            let token = guard.mint_token(user_id);
            Json(AuthToken {
                access_token: token,
                token_type: "bearer".to_string(),
            })
            .into_response()
        }
        None => api_error(StatusCode::UNAUTHORIZED, "Incorrect email or password"),
    }
}

async fn register(State(state): State<SharedState>, Json(body): Json<RegisterUser>) -> Response {
    let mut guard = state.lock().unwrap();
    if guard.users.iter().any(|u| u.user.email == body.email) {
        return api_error(StatusCode::BAD_REQUEST, "Email already registered");
    }
    let user = guard.seed_user(&body.email, &body.password, &body.display_name);
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn me(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let user_id = match require_auth(&state, &headers) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let guard = state.lock().unwrap();
    match guard.users.iter().find(|u| u.user.id == user_id) {
        Some(found) => Json(found.user.clone()).into_response(),
        None => api_error(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn list_workspaces(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let guard = state.lock().unwrap();
    let list: Vec<Workspace> = guard.workspaces.iter().map(|d| d.workspace.clone()).collect();
    Json(list).into_response()
}

async fn create_workspace(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<CreateWorkspace>,
) -> Response {
    let user_id = match require_auth(&state, &headers) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let mut guard = state.lock().unwrap();
    let workspace_id = guard.alloc_id();
    let member_id = guard.alloc_id();
    let (user_email, user_display_name) = guard
        .users
        .iter()
        .find(|u| u.user.id == user_id)
        .map(|u| (u.user.email.clone(), u.user.display_name.clone()))
        .unzip();

    let workspace = Workspace {
        id: workspace_id,
        name: body.name,
        description: body.description,
        owner_id: user_id,
        created_at: Utc::now(),
    };
    guard.workspaces.push(WorkspaceDetail {
        workspace: workspace.clone(),
        members: vec![WorkspaceMember {
            id: member_id,
            user_id,
            role: MemberRole::Admin,
            joined_at: Utc::now(),
            user_email,
            user_display_name,
        }],
    });

    (StatusCode::CREATED, Json(workspace)).into_response()
}

async fn get_workspace(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let guard = state.lock().unwrap();
    match guard.workspaces.iter().find(|d| d.workspace.id == id) {
        Some(detail) => Json(detail.clone()).into_response(),
        None => api_error(StatusCode::NOT_FOUND, "Workspace not found"),
    }
}

async fn update_workspace(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<UpdateWorkspace>,
) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let mut guard = state.lock().unwrap();
    match guard.workspaces.iter_mut().find(|d| d.workspace.id == id) {
        Some(detail) => {
            if let Some(name) = body.name {
                detail.workspace.name = name;
            }
            if let Some(description) = body.description {
                detail.workspace.description = Some(description);
            }
            Json(detail.workspace.clone()).into_response()
        }
        None => api_error(StatusCode::NOT_FOUND, "Workspace not found"),
    }
}

async fn delete_workspace(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let mut guard = state.lock().unwrap();
    let before = guard.workspaces.len();
    guard.workspaces.retain(|d| d.workspace.id != id);
    if guard.workspaces.len() == before {
        return api_error(StatusCode::NOT_FOUND, "Workspace not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn add_workspace_member(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<AddMember>,
) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let mut guard = state.lock().unwrap();
    let member_id = guard.alloc_id();
    let (user_email, user_display_name) = guard
        .users
        .iter()
        .find(|u| u.user.id == body.user_id)
        .map(|u| (u.user.email.clone(), u.user.display_name.clone()))
        .unzip();

    match guard.workspaces.iter_mut().find(|d| d.workspace.id == id) {
        Some(detail) => {
            let member = WorkspaceMember {
                id: member_id,
                user_id: body.user_id,
                role: body.role,
                joined_at: Utc::now(),
                user_email,
                user_display_name,
            };
            detail.members.push(member.clone());
            (StatusCode::CREATED, Json(member)).into_response()
        }
        None => api_error(StatusCode::NOT_FOUND, "Workspace not found"),
    }
}

async fn remove_workspace_member(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((id, user_id)): Path<(i64, i64)>,
) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let mut guard = state.lock().unwrap();
    match guard.workspaces.iter_mut().find(|d| d.workspace.id == id) {
        Some(detail) => {
            detail.members.retain(|m| m.user_id != user_id);
            StatusCode::NO_CONTENT.into_response()
        }
        None => api_error(StatusCode::NOT_FOUND, "Workspace not found"),
    }
}

async fn list_projects(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let workspace_id = query.get("workspace_id").and_then(|v| v.parse::<i64>().ok());
    let guard = state.lock().unwrap();
    let list: Vec<Project> = guard
        .projects
        .iter()
        .filter(|p| workspace_id.map_or(true, |id| p.workspace_id == id))
        .cloned()
        .collect();
    Json(list).into_response()
}

async fn create_project(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<CreateProject>,
) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let mut guard = state.lock().unwrap();
    let project = Project {
        id: guard.alloc_id(),
        name: body.name,
        description: body.description,
        workspace_id: body.workspace_id,
        created_at: Utc::now(),
    };
    guard.projects.push(project.clone());
    (StatusCode::CREATED, Json(project)).into_response()
}

async fn get_project(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let guard = state.lock().unwrap();
    match guard.projects.iter().find(|p| p.id == id) {
        Some(project) => Json(project.clone()).into_response(),
        None => api_error(StatusCode::NOT_FOUND, "Project not found"),
    }
}

async fn update_project(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<UpdateProject>,
) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let mut guard = state.lock().unwrap();
    match guard.projects.iter_mut().find(|p| p.id == id) {
        Some(project) => {
            if let Some(name) = body.name {
                project.name = name;
            }
            if let Some(description) = body.description {
                project.description = Some(description);
            }
            Json(project.clone()).into_response()
        }
        None => api_error(StatusCode::NOT_FOUND, "Project not found"),
    }
}

async fn delete_project(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let mut guard = state.lock().unwrap();
    let before = guard.projects.len();
    guard.projects.retain(|p| p.id != id);
    if guard.projects.len() == before {
        return api_error(StatusCode::NOT_FOUND, "Project not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_tasks(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let project_id = query.get("project_id").and_then(|v| v.parse::<i64>().ok());
    let guard = state.lock().unwrap();
    let mut list: Vec<Task> = guard
        .tasks
        .iter()
        .filter(|t| project_id.map_or(true, |id| t.project_id == id))
        .cloned()
        .collect();
    list.sort_by_key(|t| t.position);
    Json(list).into_response()
}

async fn create_task(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<CreateTask>,
) -> Response {
    let user_id = match require_auth(&state, &headers) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let mut guard = state.lock().unwrap();
    let position = guard
        .tasks
        .iter()
        .filter(|t| t.project_id == body.project_id && t.status == body.status)
        .map(|t| t.position)
        .max()
        .map_or(0, |max| max + 1);
    let task = Task {
        id: guard.alloc_id(),
        project_id: body.project_id,
        title: body.title,
        description: body.description,
        status: body.status,
        priority: body.priority,
        assignee_id: body.assignee_id,
        created_by: user_id,
        due_date: body.due_date,
        position,
        created_at: Utc::now(),
        assignee_name: None,
        creator_name: None,
    };
    guard.tasks.push(task.clone());
    (StatusCode::CREATED, Json(task)).into_response()
}

async fn get_task(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let guard = state.lock().unwrap();
    match guard.tasks.iter().find(|t| t.id == id) {
        Some(task) => Json(task.clone()).into_response(),
        None => api_error(StatusCode::NOT_FOUND, "Task not found"),
    }
}

async fn update_task(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTask>,
) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let mut guard = state.lock().unwrap();
    match guard.tasks.iter_mut().find(|t| t.id == id) {
        Some(task) => {
            if let Some(title) = body.title {
                task.title = title;
            }
            if let Some(description) = body.description {
                task.description = Some(description);
            }
            if let Some(status) = body.status {
                task.status = status;
            }
            if let Some(priority) = body.priority {
                task.priority = priority;
            }
            if let Some(assignee_id) = body.assignee_id {
                task.assignee_id = Some(assignee_id);
            }
            if let Some(due_date) = body.due_date {
                task.due_date = Some(due_date);
            }
            if let Some(position) = body.position {
                task.position = position;
            }
            Json(task.clone()).into_response()
        }
        None => api_error(StatusCode::NOT_FOUND, "Task not found"),
    }
}

async fn update_task_position(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<TaskPosition>,
) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let mut guard = state.lock().unwrap();
    match guard.tasks.iter_mut().find(|t| t.id == id) {
        Some(task) => {
            task.status = body.status;
            task.position = body.position;
            Json(task.clone()).into_response()
        }
        None => api_error(StatusCode::NOT_FOUND, "Task not found"),
    }
}

async fn delete_task(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let mut guard = state.lock().unwrap();
    let before = guard.tasks.len();
    guard.tasks.retain(|t| t.id != id);
    if guard.tasks.len() == before {
        return api_error(StatusCode::NOT_FOUND, "Task not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_documents(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let project_id = match query.get("project_id").and_then(|v| v.parse::<i64>().ok()) {
        Some(id) => id,
        None => return api_error(StatusCode::UNPROCESSABLE_ENTITY, "Field required: project_id"),
    };
    let guard = state.lock().unwrap();
    let list: Vec<Document> = guard
        .documents
        .iter()
        .filter(|d| d.project_id == project_id)
        .cloned()
        .collect();
    Json(list).into_response()
}

async fn create_document(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<CreateDocument>,
) -> Response {
    let user_id = match require_auth(&state, &headers) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let mut guard = state.lock().unwrap();
    let document = Document {
        id: guard.alloc_id(),
        project_id: body.project_id,
        title: body.title,
        content: body.content,
        created_by: user_id,
        created_at: Utc::now(),
        updated_at: None,
        creator_name: None,
    };
    guard.documents.push(document.clone());
    (StatusCode::CREATED, Json(document)).into_response()
}

async fn get_document(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let guard = state.lock().unwrap();
    match guard.documents.iter().find(|d| d.id == id) {
        Some(document) => Json(document.clone()).into_response(),
        None => api_error(StatusCode::NOT_FOUND, "Document not found"),
    }
}

async fn update_document(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<UpdateDocument>,
) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let mut guard = state.lock().unwrap();
    match guard.documents.iter_mut().find(|d| d.id == id) {
        Some(document) => {
            if let Some(title) = body.title {
                document.title = title;
            }
            if let Some(content) = body.content {
                document.content = Some(content);
            }
            document.updated_at = Some(Utc::now());
            Json(document.clone()).into_response()
        }
        None => api_error(StatusCode::NOT_FOUND, "Document not found"),
    }
}

async fn delete_document(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = require_auth(&state, &headers) {
        return resp;
    }
    let mut guard = state.lock().unwrap();
    let before = guard.documents.len();
    guard.documents.retain(|d| d.id != id);
    if guard.documents.len() == before {
        return api_error(StatusCode::NOT_FOUND, "Document not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

/// Builds the mock API router, mirroring the real server's route layout
pub fn build_mock_api(state: SharedState) -> Router {
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/me", get(me))
        .route("/workspaces/", get(list_workspaces).post(create_workspace))
        .route(
            "/workspaces/:id",
            get(get_workspace).patch(update_workspace).delete(delete_workspace),
        )
        .route("/workspaces/:id/members", post(add_workspace_member))
        .route(
            "/workspaces/:id/members/:user_id",
            axum::routing::delete(remove_workspace_member),
        )
        .route("/projects/", get(list_projects).post(create_project))
        .route(
            "/projects/:id",
            get(get_project).patch(update_project).delete(delete_project),
        )
        .route("/tasks/", get(list_tasks).post(create_task))
        .route(
            "/tasks/:id",
            get(get_task).patch(update_task).delete(delete_task),
        )
        .route("/tasks/:id/position", patch(update_task_position))
        .route("/documents/", get(list_documents).post(create_document))
        .route(
            "/documents/:id",
            get(get_document).patch(update_document).delete(delete_document),
        );

    Router::new().nest("/api", api).with_state(state)
}

/// Test context: a running mock API plus a client wired at it
pub struct TestContext {
    pub state: SharedState,
    pub api: ApiClient,
    pub tokens: Arc<MemoryTokenStore>,
    pub session: SessionStore,
    pub base_url: String,
    pub seeded_user: User,
}

impl TestContext {
    /// Starts a fresh mock API with one seeded account and builds a client
    pub async fn new() -> anyhow::Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "taskboard_client=debug".into()),
            )
            .try_init();

        let mut mock = MockApi::default();
        let seeded_user = mock.seed_user(TEST_EMAIL, TEST_PASSWORD, "Ada");
        let state: SharedState = Arc::new(Mutex::new(mock));

        let app = build_mock_api(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let base_url = format!("http://{addr}/api");
        let api = ApiClient::new(&ClientConfig {
            base_url: base_url.clone(),
            ..ClientConfig::default()
        })?;
        let tokens = Arc::new(MemoryTokenStore::new());
        let session = SessionStore::new(api.clone(), tokens.clone());

        Ok(Self {
            state,
            api,
            tokens,
            session,
            base_url,
            seeded_user,
        })
    }

    /// Logs the seeded account in
    pub async fn login(&self) -> anyhow::Result<()> {
        self.session.login(TEST_EMAIL, TEST_PASSWORD).await?;
        Ok(())
    }

    /// Invalidates every server-side session without touching the client
    pub fn revoke_all_sessions(&self) {
        self.state.lock().unwrap().sessions.clear();
    }

    /// Store constructors over the shared client
    pub fn workspaces(&self) -> WorkspaceStore {
        WorkspaceStore::new(self.api.clone())
    }

    pub fn projects(&self) -> ProjectStore {
        ProjectStore::new(self.api.clone())
    }

    pub fn tasks(&self) -> TaskStore {
        TaskStore::new(self.api.clone())
    }

    pub fn documents(&self) -> DocumentStore {
        DocumentStore::new(self.api.clone())
    }
}
