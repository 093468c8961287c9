//! # Taskboard Client SDK
//!
//! Typed, async client for the Taskboard project-management API. The crate
//! mirrors the server's resources (workspaces, projects, kanban tasks,
//! documents) in reactive stores: each store issues REST calls and keeps an
//! in-memory cache of whatever the server last returned, so a UI layer can
//! render from the cache and await the store operations for mutations.
//!
//! ## Modules
//!
//! - `config`: Environment-driven client configuration
//! - `error`: Error taxonomy shared by every operation
//! - `http`: The authenticated HTTP client under every store
//! - `token`: Durable bearer-token storage
//! - `stores`: Session store and the resource stores
//! - `router`: Route table and authentication guard for navigation
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskboard_client::config::ClientConfig;
//! use taskboard_client::http::ApiClient;
//! use taskboard_client::stores::session::SessionStore;
//! use taskboard_client::token::MemoryTokenStore;
//!
//! # async fn example() -> taskboard_client::error::ClientResult<()> {
//! let api = ApiClient::new(&ClientConfig::from_env()?)?;
//! let session = SessionStore::new(api.clone(), Arc::new(MemoryTokenStore::new()));
//!
//! // Explicit initialization: picks up a previously persisted token.
//! session.restore().await?;
//!
//! if !session.is_authenticated() {
//!     session.login("user@example.com", "hunter22!").await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod router;
pub mod stores;
pub mod token;

pub use taskboard_shared as shared;
