use async_trait::async_trait;
use serde_json::Value;

use crate::error::Error;
use crate::types::{NewPost, PostPatch, PostQuery};

/// The esa.io REST API surface this system consumes.
///
/// One method per resource action, one HTTP round-trip per call. Response
/// bodies pass through as raw JSON; shape validation is the remote
/// service's business. The server holds this as `Arc<dyn EsaApi>` so tests
/// can inject a scripted implementation.
#[async_trait]
pub trait EsaApi: Send + Sync {
    /// Get the authenticated user. Not team-scoped.
    async fn get_user(&self) -> Result<Value, Error>;

    /// List posts, filtered by whatever subset of `query` is set.
    async fn list_posts(&self, query: &PostQuery) -> Result<Value, Error>;

    /// Get one post by number. A missing post surfaces as a 404 status error.
    async fn get_post(&self, post_number: u64) -> Result<Value, Error>;

    /// Create a post; returns the created resource.
    async fn create_post(&self, post: &NewPost) -> Result<Value, Error>;

    /// Apply a partial update to a post; returns the updated resource.
    async fn update_post(&self, post_number: u64, patch: &PostPatch) -> Result<Value, Error>;

    /// Delete a post. Success carries no body and no value.
    async fn delete_post(&self, post_number: u64) -> Result<(), Error>;
}
