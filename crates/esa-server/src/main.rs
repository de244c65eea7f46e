use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use esa_client::EsaClient;
use esa_core::EsaApi;
use esa_server::app_state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let token = std::env::var("ESA_TOKEN").unwrap_or_default();
    let team_name = std::env::var("ESA_TEAM_NAME").unwrap_or_default();

    // A missing token or team must not kill the process: tool discovery has
    // to keep working, with every invocation failing fast instead.
    let client: Option<Arc<dyn EsaApi>> = match EsaClient::new(&token, &team_name) {
        Ok(client) => {
            tracing::info!(team = %team_name, "EsaClient initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize EsaClient");
            None
        }
    };

    let state = AppState { client };
    let app = esa_server::router::create_router(state);

    let host = std::env::var("ESA_MCP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("ESA_MCP_PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{host}:{port}");
    tracing::info!("esa MCP server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server error");
}
