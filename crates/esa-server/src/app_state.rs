use std::sync::Arc;

use esa_core::EsaApi;

/// Shared application state with the injected API client.
///
/// `client` is `None` when required configuration was missing or invalid at
/// startup. The server still runs so tool discovery succeeds; every tool
/// invocation then fails fast without a network call.
#[derive(Clone)]
pub struct AppState {
    pub client: Option<Arc<dyn EsaApi>>,
}
