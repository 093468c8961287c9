/// Authenticated HTTP client underneath every store
///
/// `ApiClient` owns the reqwest client, the API base URL, and the bearer
/// token cell. Cloning is cheap and every clone shares the same token, so
/// the session store and the resource stores always agree on who is logged
/// in.
///
/// The client is deliberately thin: it joins endpoint paths onto the base
/// URL, attaches `Authorization: Bearer` when a token is installed, decodes
/// JSON, and maps non-success responses to [`ClientError::Api`]. Retries,
/// deduplication, and cache reconciliation are explicitly not its job.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Shared HTTP client for the Taskboard API
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Underlying reqwest client (connection pool, timeouts)
    http: reqwest::Client,

    /// Base URL every endpoint path is joined onto
    base_url: Url,

    /// Bearer token shared by all clones
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Creates a client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the base URL does not parse and
    /// [`ClientError::Transport`] if the TLS backend fails to initialize.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        // A trailing slash makes Url::join treat the last path segment as a
        // directory; without it "http://host/api".join("tasks/") would drop
        // the /api prefix.
        let mut raw = config.base_url.trim_end_matches('/').to_string();
        raw.push('/');
        let base_url = Url::parse(&raw)
            .map_err(|e| ClientError::Config(format!("invalid base URL {:?}: {}", raw, e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Installs or clears the bearer token for all clones of this client
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().expect("token lock poisoned") = token;
    }

    /// Currently installed bearer token, if any
    pub fn token(&self) -> Option<String> {
        self.token.read().expect("token lock poisoned").clone()
    }

    /// Resolves a relative endpoint path against the base URL
    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::Config(format!("invalid endpoint {:?}: {}", path, e)))
    }

    /// GET a JSON resource
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "GET");
        self.send(self.http.get(url)).await
    }

    /// GET a JSON resource with query parameters
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, ?query, "GET");
        self.send(self.http.get(url).query(query)).await
    }

    /// POST a JSON body, decoding a JSON response
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "POST");
        self.send(self.http.post(url).json(body)).await
    }

    /// POST a form-encoded body, decoding a JSON response
    ///
    /// Used by the login endpoint, which takes OAuth2-style form fields.
    pub async fn post_form<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        form: &B,
    ) -> ClientResult<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "POST (form)");
        self.send(self.http.post(url).form(form)).await
    }

    /// PATCH a JSON body, decoding a JSON response
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "PATCH");
        self.send(self.http.patch(url).json(body)).await
    }

    /// DELETE a resource; any success status counts, no body expected
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "DELETE");
        let response = self.authorize(self.http.delete(url)).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::from_response(status, &body))
        }
    }

    /// Attaches the bearer token, if one is installed
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request and decodes the JSON response
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = self.authorize(builder).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::from_response(status, &body))
        }
    }
}
