use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use esa_core::{EsaApi, NewPost, PostPatch, PostQuery};
use esa_mcp::jsonrpc::{INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND};
use esa_mcp::{JsonRpcRequest, JsonRpcResponse, ToolRegistry};

use crate::app_state::AppState;

/// Handle MCP JSON-RPC requests from the host runtime over streamable HTTP.
///
/// Requests get their JSON-RPC response as the POST body; notifications
/// (null id) are acknowledged with 202 and no body.
pub async fn mcp_request(
    State(state): State<AppState>,
    Json(req): Json<JsonRpcRequest>,
) -> Response {
    if req.id.is_null() {
        tracing::info!(method = %req.method, "received MCP notification");
        return StatusCode::ACCEPTED.into_response();
    }

    let response = match req.method.as_str() {
        "initialize" => handle_initialize(&req),
        "notifications/initialized" => {
            // Client acknowledgement, no response needed
            return StatusCode::ACCEPTED.into_response();
        }
        "tools/list" => handle_tools_list(&req),
        "tools/call" => handle_tools_call(&state, &req).await,
        _ => JsonRpcResponse::error(req.id, METHOD_NOT_FOUND, "Method not found"),
    };

    Json(response).into_response()
}

fn handle_initialize(req: &JsonRpcRequest) -> JsonRpcResponse {
    tracing::debug!("initialize handshake");
    JsonRpcResponse::success(
        req.id.clone(),
        serde_json::json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": "esa-mcp-server",
                "version": env!("CARGO_PKG_VERSION")
            }
        }),
    )
}

fn handle_tools_list(req: &JsonRpcRequest) -> JsonRpcResponse {
    let tools = ToolRegistry::definitions();
    JsonRpcResponse::success(req.id.clone(), serde_json::json!({ "tools": tools }))
}

async fn handle_tools_call(state: &AppState, req: &JsonRpcRequest) -> JsonRpcResponse {
    let Some(params) = &req.params else {
        return JsonRpcResponse::error(req.id.clone(), INVALID_PARAMS, "Missing params");
    };

    let tool_name = params
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or(Value::Object(serde_json::Map::new()));

    tracing::info!(tool = tool_name, "tool invocation");

    let result = match tool_name {
        "user_get_info" => tool_user_get_info(state).await,
        "posts_get_list" => tool_posts_get_list(state, &arguments).await,
        "posts_get_detail" => tool_posts_get_detail(state, &arguments).await,
        "posts_create" => tool_posts_create(state, &arguments).await,
        "posts_update" => tool_posts_update(state, &arguments).await,
        "posts_delete" => tool_posts_delete(state, &arguments).await,
        _ => Err(format!("Unknown tool: {tool_name}")),
    };

    match result {
        Ok(value) => JsonRpcResponse::success(
            req.id.clone(),
            serde_json::json!({
                "content": [{
                    "type": "text",
                    "text": serde_json::to_string_pretty(&value).unwrap_or_default()
                }]
            }),
        ),
        Err(err) => {
            tracing::error!(tool = tool_name, error = %err, "tool invocation failed");
            JsonRpcResponse::error(req.id.clone(), INTERNAL_ERROR, err)
        }
    }
}

/// Shared guard: every tool needs a configured client before anything else.
fn client(state: &AppState) -> Result<Arc<dyn EsaApi>, String> {
    state
        .client
        .clone()
        .ok_or_else(|| "EsaClient not initialized".to_string())
}

async fn tool_user_get_info(state: &AppState) -> Result<Value, String> {
    let client = client(state)?;
    client
        .get_user()
        .await
        .map_err(|e| format!("Error getting user info: {e}"))
}

async fn tool_posts_get_list(state: &AppState, args: &Value) -> Result<Value, String> {
    let client = client(state)?;

    let query = PostQuery {
        q: args.get("q").and_then(Value::as_str).map(ToString::to_string),
        page: args.get("page").and_then(Value::as_u64),
        per_page: args.get("per_page").and_then(Value::as_u64),
    };

    client
        .list_posts(&query)
        .await
        .map_err(|e| format!("Error getting posts list: {e}"))
}

async fn tool_posts_get_detail(state: &AppState, args: &Value) -> Result<Value, String> {
    let client = client(state)?;

    let post_number = args
        .get("post_number")
        .and_then(Value::as_u64)
        .ok_or("Missing 'post_number' parameter")?;

    client
        .get_post(post_number)
        .await
        .map_err(|e| format!("Error getting post detail: {e}"))
}

async fn tool_posts_create(state: &AppState, args: &Value) -> Result<Value, String> {
    let client = client(state)?;

    let name = args
        .get("name")
        .and_then(Value::as_str)
        .ok_or("Missing 'name' parameter")?;
    let body_md = args
        .get("body_md")
        .and_then(Value::as_str)
        .ok_or("Missing 'body_md' parameter")?;

    // Absent optional arguments keep the advertised defaults; they are sent
    // as real values, never stripped.
    let mut post = NewPost::new(name, body_md);
    if let Some(tags) = args.get("tags").and_then(Value::as_array) {
        post.tags = tags
            .iter()
            .filter_map(Value::as_str)
            .map(ToString::to_string)
            .collect();
    }
    if let Some(category) = args.get("category").and_then(Value::as_str) {
        post.category = category.to_string();
    }
    if let Some(wip) = args.get("wip").and_then(Value::as_bool) {
        post.wip = wip;
    }
    if let Some(message) = args.get("message").and_then(Value::as_str) {
        post.message = message.to_string();
    }

    client
        .create_post(&post)
        .await
        .map_err(|e| format!("Error creating post: {e}"))
}

async fn tool_posts_update(state: &AppState, args: &Value) -> Result<Value, String> {
    let client = client(state)?;

    let post_number = args
        .get("post_number")
        .and_then(Value::as_u64)
        .ok_or("Missing 'post_number' parameter")?;

    // Only supplied fields go into the patch; an unset field stays None and
    // is omitted from the request so it never nulls out the remote value.
    let patch = PostPatch {
        name: args.get("name").and_then(Value::as_str).map(ToString::to_string),
        body_md: args
            .get("body_md")
            .and_then(Value::as_str)
            .map(ToString::to_string),
        tags: args.get("tags").and_then(Value::as_array).map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(ToString::to_string)
                .collect()
        }),
        category: args
            .get("category")
            .and_then(Value::as_str)
            .map(ToString::to_string),
        wip: args.get("wip").and_then(Value::as_bool),
        message: args
            .get("message")
            .and_then(Value::as_str)
            .map(ToString::to_string),
    };

    if patch.is_empty() {
        tracing::warn!(post_number, "no update parameters provided");
        return Ok(serde_json::json!({
            "message": format!("No update parameters provided for post {post_number}. Nothing changed.")
        }));
    }

    client
        .update_post(post_number, &patch)
        .await
        .map_err(|e| format!("Error updating post: {e}"))
}

async fn tool_posts_delete(state: &AppState, args: &Value) -> Result<Value, String> {
    let client = client(state)?;

    let post_number = args
        .get("post_number")
        .and_then(Value::as_u64)
        .ok_or("Missing 'post_number' parameter")?;

    client
        .delete_post(post_number)
        .await
        .map_err(|e| format!("Error deleting post: {e}"))?;

    // Empty object, not null: the esa.io API answers 204 and the host gets
    // an explicit "deleted, nothing to show" result.
    Ok(serde_json::json!({}))
}
