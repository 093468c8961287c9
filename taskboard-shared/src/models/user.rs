/// User model and authentication payloads
///
/// This module provides the client-side mirror of a user account, the
/// credential payloads sent to the authentication endpoints, and the bearer
/// token the server returns on login.
///
/// # Wire format
///
/// ```json
/// {
///   "id": 42,
///   "email": "user@example.com",
///   "display_name": "Ada",
///   "avatar_url": null,
///   "role": "member",
///   "created_at": "2026-01-05T12:30:00Z"
/// }
/// ```
///
/// # Example
///
/// ```
/// use taskboard_shared::models::user::{RegisterUser, UserRole};
/// use validator::Validate;
///
/// let req = RegisterUser {
///     email: "user@example.com".to_string(),
///     password: "correct horse battery".to_string(),
///     display_name: "Ada".to_string(),
/// };
/// assert!(req.validate().is_ok());
/// assert_eq!(UserRole::Member.as_str(), "member");
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Account-level role of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Can administer every workspace on the instance
    Admin,

    /// Regular account
    Member,

    /// Read-only account
    Viewer,
}

impl UserRole {
    /// Converts role to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Member => "member",
            UserRole::Viewer => "viewer",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Member
    }
}

/// User account as returned by the server
///
/// The server never exposes password material; the client only ever sees
/// this public projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: i64,

    /// Email address (unique across all users)
    pub email: String,

    /// Display name shown in member lists and task assignments
    pub display_name: String,

    /// Optional avatar/profile picture URL
    pub avatar_url: Option<String>,

    /// Account-level role
    #[serde(default)]
    pub role: UserRole,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Payload for registering a new account
///
/// Registration creates the account server-side but does not authenticate;
/// the caller logs in separately.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUser {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (sent once over TLS, stored hashed server-side)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Display name
    #[validate(length(
        min = 1,
        max = 100,
        message = "Display name must be between 1 and 100 characters"
    ))]
    pub display_name: String,
}

/// Bearer token returned by the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    /// Opaque bearer token to attach to subsequent requests
    pub access_token: String,

    /// Token scheme, always `"bearer"`
    pub token_type: String,
}
