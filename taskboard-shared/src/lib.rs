//! # Taskboard Shared Library
//!
//! This crate contains the typed resource models shared by the Taskboard
//! client SDK and any tooling built on top of it.
//!
//! ## Module Organization
//!
//! - `models`: Resource records mirroring the server's REST API, plus the
//!   request payload types used to create and update them.
//!
//! The models are plain serde records: the server owns their lifecycle, the
//! client caches whatever the server last returned.

pub mod models;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
