/// Session store: bearer token and current user
///
/// Holds the client's authentication state. A present token means
/// "authenticated"; nothing ties the token to server-side validity until a
/// request fails. The one recovery rule in the whole client lives here: a
/// failed current-user fetch clears the session before the error
/// propagates, so a stale persisted token cannot wedge the app in a
/// half-logged-in state.
///
/// Construction has no side effects. Call [`SessionStore::restore`] once at
/// startup to pick up a token persisted by a previous run.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskboard_client::config::ClientConfig;
/// use taskboard_client::http::ApiClient;
/// use taskboard_client::stores::session::SessionStore;
/// use taskboard_client::token::{FileTokenStore, TokenStore};
///
/// # async fn example() -> taskboard_client::error::ClientResult<()> {
/// let api = ApiClient::new(&ClientConfig::from_env()?)?;
/// let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(
///     FileTokenStore::default_path().expect("no config dir"),
/// ));
/// let session = SessionStore::new(api, tokens);
///
/// if session.restore().await?.is_none() {
///     session.login("user@example.com", "hunter22!").await?;
/// }
/// # Ok(())
/// # }
/// ```

use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::token::TokenStore;
use serde::Serialize;
use std::sync::{Arc, RwLock};
use taskboard_shared::models::user::{AuthToken, RegisterUser, User};
use validator::Validate;

/// OAuth2-style form body for the login endpoint
///
/// The `username` field carries the email address.
#[derive(Serialize)]
struct LoginForm<'a> {
    username: &'a str,
    password: &'a str,
}

/// Authentication state store
pub struct SessionStore {
    api: ApiClient,
    user: RwLock<Option<User>>,
    tokens: Arc<dyn TokenStore>,
}

impl SessionStore {
    /// Creates a session store over the given client and token storage
    pub fn new(api: ApiClient, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            user: RwLock::new(None),
            tokens,
        }
    }

    /// Currently loaded user, if any
    pub fn user(&self) -> Option<User> {
        self.user.read().expect("user lock poisoned").clone()
    }

    /// Currently installed bearer token, if any
    pub fn token(&self) -> Option<String> {
        self.api.token()
    }

    /// Whether a bearer token is installed
    pub fn is_authenticated(&self) -> bool {
        self.api.token().is_some()
    }

    /// Picks up a token persisted by a previous run
    ///
    /// If a token is found it is installed and the current user is fetched;
    /// a token the server no longer accepts clears the session (see
    /// [`SessionStore::fetch_user`]). Without a persisted token this is a
    /// no-op returning `None`.
    pub async fn restore(&self) -> ClientResult<Option<User>> {
        match self.tokens.load().await? {
            Some(token) => {
                tracing::info!("restoring persisted session");
                self.api.set_token(Some(token));
                self.fetch_user().await
            }
            None => Ok(None),
        }
    }

    /// Logs in with email and password
    ///
    /// On success the bearer token is installed, persisted, and the current
    /// user is loaded. Returns the token response.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthToken> {
        let form = LoginForm {
            username: email,
            password,
        };
        let token: AuthToken = self.api.post_form("auth/login", &form).await?;

        self.api.set_token(Some(token.access_token.clone()));
        self.tokens.save(&token.access_token).await?;
        tracing::info!(email, "logged in");

        self.fetch_user().await?;
        Ok(token)
    }

    /// Registers a new account
    ///
    /// Validates the payload client-side, then creates the account. Does NOT
    /// authenticate; the caller logs in separately.
    pub async fn register(&self, data: RegisterUser) -> ClientResult<User> {
        data.validate()?;
        self.api.post("auth/register", &data).await
    }

    /// Fetches the authenticated user's profile
    ///
    /// Returns `None` without a request when no token is installed. On any
    /// failure the whole session (token, user, and persisted token) is
    /// cleared and the error still propagates to the caller.
    pub async fn fetch_user(&self) -> ClientResult<Option<User>> {
        if self.api.token().is_none() {
            return Ok(None);
        }

        match self.api.get::<User>("auth/me").await {
            Ok(user) => {
                *self.user.write().expect("user lock poisoned") = Some(user.clone());
                Ok(Some(user))
            }
            Err(err) => {
                tracing::warn!(%err, "current-user fetch failed, clearing session");
                self.clear_session().await;
                Err(err)
            }
        }
    }

    /// Ends the session
    ///
    /// In-memory state is cleared unconditionally; the durable token is
    /// removed afterwards and any storage error is reported to the caller.
    pub async fn logout(&self) -> ClientResult<()> {
        self.forget();
        tracing::info!("logged out");
        self.tokens.clear().await
    }

    /// Clears in-memory session state
    fn forget(&self) {
        *self.user.write().expect("user lock poisoned") = None;
        self.api.set_token(None);
    }

    /// Clears the whole session, logging (not raising) storage failures
    ///
    /// Used on the error path of [`SessionStore::fetch_user`], where the
    /// original fetch error must stay observable.
    async fn clear_session(&self) {
        self.forget();
        if let Err(err) = self.tokens.clear().await {
            tracing::warn!(%err, "failed to clear persisted token");
        }
    }
}
