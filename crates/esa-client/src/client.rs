use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response};
use serde_json::Value;

use esa_core::{Error, EsaApi, NewPost, PostPatch, PostQuery};

/// Production esa.io API root.
pub const DEFAULT_API_ROOT: &str = "https://api.esa.io/v1";

/// Authenticated client for the esa.io REST API.
///
/// Holds one `reqwest::Client` whose default headers carry the bearer token
/// and JSON content type; nothing is mutated after construction, so a single
/// instance is safe to share across concurrent tool invocations.
#[derive(Debug)]
pub struct EsaClient {
    http: reqwest::Client,
    api_root: String,
    base_url: String,
}

impl EsaClient {
    /// Build a client for the given token and team against the production
    /// API root.
    ///
    /// # Errors
    /// Returns `Error::Config` when either value is empty.
    pub fn new(token: &str, team_name: &str) -> Result<Self, Error> {
        Self::with_api_root(token, team_name, DEFAULT_API_ROOT)
    }

    /// Build a client against an alternate API root (self-hosted proxy,
    /// local test stub).
    ///
    /// # Errors
    /// Returns `Error::Config` when the token or team name is empty or the
    /// token cannot be used as a header value.
    pub fn with_api_root(token: &str, team_name: &str, api_root: &str) -> Result<Self, Error> {
        if token.is_empty() {
            tracing::error!("token is required but was not provided");
            return Err(Error::Config("ESA_TOKEN is required"));
        }
        if team_name.is_empty() {
            tracing::error!("team name is required but was not provided");
            return Err(Error::Config("ESA_TEAM_NAME is required"));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| Error::Config("ESA_TOKEN is not a valid header value"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // No explicit timeout: single round-trips ride on transport defaults.
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        let api_root = api_root.trim_end_matches('/').to_string();
        let base_url = format!("{api_root}/teams/{team_name}");
        Ok(Self {
            http,
            api_root,
            base_url,
        })
    }

    /// Team-scoped base URL all post actions hang off.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Funnel for every JSON-returning action: send, fail on non-2xx, parse
    /// the body. Delete does not go through here because a 204 has no body
    /// to parse.
    async fn request_json(
        &self,
        method: Method,
        url: String,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, Error> {
        let mut req = self.http.request(method.clone(), url.as_str());
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::error!(%url, error = %e, "request failed");
            Error::Transport(e.to_string())
        })?;
        let resp = check_status(&method, &url, resp)?;

        resp.json().await.map_err(|e| {
            tracing::error!(%url, error = %e, "failed to decode response body");
            Error::Transport(e.to_string())
        })
    }
}

fn check_status(method: &Method, url: &str, resp: Response) -> Result<Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    tracing::error!(%method, %url, status = status.as_u16(), "esa.io returned an error status");
    Err(Error::Status {
        status: status.as_u16(),
        method: method.to_string(),
        url: url.to_string(),
    })
}

#[async_trait]
impl EsaApi for EsaClient {
    async fn get_user(&self) -> Result<Value, Error> {
        // The user endpoint is not team-scoped.
        let url = format!("{}/user", self.api_root);
        self.request_json(Method::GET, url, &[], None).await
    }

    async fn list_posts(&self, query: &PostQuery) -> Result<Value, Error> {
        let url = format!("{}/posts", self.base_url);
        self.request_json(Method::GET, url, &query.to_params(), None)
            .await
    }

    async fn get_post(&self, post_number: u64) -> Result<Value, Error> {
        let url = format!("{}/posts/{post_number}", self.base_url);
        self.request_json(Method::GET, url, &[], None).await
    }

    async fn create_post(&self, post: &NewPost) -> Result<Value, Error> {
        let url = format!("{}/posts", self.base_url);
        let body = serde_json::json!({ "post": post });
        self.request_json(Method::POST, url, &[], Some(&body)).await
    }

    async fn update_post(&self, post_number: u64, patch: &PostPatch) -> Result<Value, Error> {
        let url = format!("{}/posts/{post_number}", self.base_url);
        let body = serde_json::json!({ "post": patch });
        self.request_json(Method::PATCH, url, &[], Some(&body))
            .await
    }

    async fn delete_post(&self, post_number: u64) -> Result<(), Error> {
        // Success is 204 No Content; the body must never be parsed.
        let url = format!("{}/posts/{post_number}", self.base_url);
        let resp = self.http.delete(url.as_str()).send().await.map_err(|e| {
            tracing::error!(%url, error = %e, "request failed");
            Error::Transport(e.to_string())
        })?;
        check_status(&Method::DELETE, &url, resp)?;
        Ok(())
    }
}
