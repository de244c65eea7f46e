//! Exercises `EsaClient` end to end against a local stub of the esa.io API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};

use esa_client::EsaClient;
use esa_core::{EsaApi, NewPost, PostPatch, PostQuery};

/// One request as seen by the stub.
#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    query: Option<String>,
    authorization: Option<String>,
    content_type: Option<String>,
    body: Option<Value>,
}

#[derive(Clone, Default)]
struct StubState {
    log: Arc<Mutex<Vec<Recorded>>>,
    posts: Arc<Mutex<HashMap<u64, Value>>>,
    next_number: Arc<Mutex<u64>>,
}

impl StubState {
    fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    fn last(&self) -> Recorded {
        self.requests().last().cloned().expect("no request recorded")
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "not_found", "message": "Not found"})),
    )
        .into_response()
}

async fn stub(State(state): State<StubState>, req: Request) -> Response {
    let (parts, body) = req.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    let recorded = Recorded {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(ToString::to_string),
        authorization: parts
            .headers
            .get("authorization")
            .map(|v| v.to_str().unwrap().to_string()),
        content_type: parts
            .headers
            .get("content-type")
            .map(|v| v.to_str().unwrap().to_string()),
        body: if bytes.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(&bytes).unwrap())
        },
    };
    state.log.lock().unwrap().push(recorded.clone());

    let method = parts.method.as_str();
    let path = parts.uri.path();

    if method == "GET" && path == "/v1/user" {
        return Json(json!({"screen_name": "stub_user", "email": "stub@example.com"}))
            .into_response();
    }

    if path == "/v1/teams/acme/posts" {
        match method {
            "GET" => {
                let posts = state.posts.lock().unwrap();
                let list: Vec<Value> = posts.values().cloned().collect();
                return Json(json!({
                    "posts": list,
                    "page": 1,
                    "per_page": 20,
                    "total_count": posts.len(),
                }))
                .into_response();
            }
            "POST" => {
                let mut post = recorded
                    .body
                    .as_ref()
                    .and_then(|b| b.get("post"))
                    .cloned()
                    .unwrap_or_else(|| json!({}));
                let number = {
                    let mut next = state.next_number.lock().unwrap();
                    *next += 1;
                    *next
                };
                post["number"] = json!(number);
                state.posts.lock().unwrap().insert(number, post.clone());
                return (StatusCode::CREATED, Json(post)).into_response();
            }
            _ => return not_found(),
        }
    }

    if let Some(number) = path
        .strip_prefix("/v1/teams/acme/posts/")
        .and_then(|n| n.parse::<u64>().ok())
    {
        let mut posts = state.posts.lock().unwrap();
        match method {
            "GET" => {
                return posts
                    .get(&number)
                    .map_or_else(not_found, |post| Json(post.clone()).into_response());
            }
            "PATCH" => {
                let Some(post) = posts.get_mut(&number) else {
                    return not_found();
                };
                if let Some(Value::Object(fields)) =
                    recorded.body.as_ref().and_then(|b| b.get("post"))
                {
                    for (key, value) in fields {
                        post[key] = value.clone();
                    }
                }
                return Json(post.clone()).into_response();
            }
            "DELETE" => {
                return if posts.remove(&number).is_some() {
                    StatusCode::NO_CONTENT.into_response()
                } else {
                    not_found()
                };
            }
            _ => return not_found(),
        }
    }

    not_found()
}

/// Bind the stub on an ephemeral port and return it with a ready client.
async fn spawn_stub() -> (StubState, EsaClient) {
    let state = StubState::default();
    let app = Router::new().fallback(stub).with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let api_root = format!("http://{addr}/v1");
    let client = EsaClient::with_api_root("test-token", "acme", &api_root).unwrap();
    (state, client)
}

fn query_pairs(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            Some((k.to_string(), v.to_string()))
        })
        .collect()
}

#[tokio::test]
async fn get_user_hits_non_team_endpoint_with_auth_headers() {
    let (state, client) = spawn_stub().await;

    let user = client.get_user().await.unwrap();
    assert_eq!(user["screen_name"], "stub_user");

    let req = state.last();
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/v1/user");
    assert_eq!(req.authorization.as_deref(), Some("Bearer test-token"));
    assert_eq!(req.content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn list_posts_without_filters_sends_no_query_params() {
    let (state, client) = spawn_stub().await;

    let resp = client.list_posts(&PostQuery::default()).await.unwrap();
    assert_eq!(resp["total_count"], 0);

    let req = state.last();
    assert_eq!(req.path, "/v1/teams/acme/posts");
    assert_eq!(req.query, None);
}

#[tokio::test]
async fn list_posts_sends_exactly_the_set_filters() {
    let (state, client) = spawn_stub().await;

    let query = PostQuery {
        q: Some("docs".to_string()),
        per_page: Some(50),
        ..PostQuery::default()
    };
    client.list_posts(&query).await.unwrap();

    let pairs = query_pairs(state.last().query.as_deref().unwrap());
    assert_eq!(
        pairs,
        vec![
            ("q".to_string(), "docs".to_string()),
            ("per_page".to_string(), "50".to_string()),
        ]
    );
}

#[tokio::test]
async fn get_post_missing_is_not_found() {
    let (_state, client) = spawn_stub().await;

    let err = client.get_post(0).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn create_post_wraps_payload_under_post_key() {
    let (state, client) = spawn_stub().await;

    let mut post = NewPost::new("Release notes", "# v1.0");
    post.tags = vec!["release".to_string()];
    post.category = "eng/releases".to_string();

    let created = client.create_post(&post).await.unwrap();
    assert!(created["number"].is_u64());

    let body = state.last().body.unwrap();
    assert_eq!(body["post"], serde_json::to_value(&post).unwrap());
}

#[tokio::test]
async fn create_post_defaults_are_sent_not_stripped() {
    let (state, client) = spawn_stub().await;

    client
        .create_post(&NewPost::new("Minimal", "body"))
        .await
        .unwrap();

    let body = state.last().body.unwrap();
    let sent = body["post"].as_object().unwrap();
    assert_eq!(sent.len(), 6);
    assert_eq!(sent["tags"], json!([]));
    assert_eq!(sent["category"], "");
    assert_eq!(sent["wip"], true);
    assert_eq!(sent["message"], "");
}

#[tokio::test]
async fn update_post_sends_only_set_fields() {
    let (state, client) = spawn_stub().await;

    let created = client
        .create_post(&NewPost::new("Before", "body"))
        .await
        .unwrap();
    let number = created["number"].as_u64().unwrap();

    let patch = PostPatch {
        name: Some("After".to_string()),
        ..PostPatch::default()
    };
    let updated = client.update_post(number, &patch).await.unwrap();
    assert_eq!(updated["name"], "After");

    let req = state.last();
    assert_eq!(req.method, "PATCH");
    let sent = req.body.unwrap();
    assert_eq!(sent["post"].as_object().unwrap().len(), 1);
    assert_eq!(sent["post"]["name"], "After");
}

#[tokio::test]
async fn update_post_missing_is_not_found() {
    let (_state, client) = spawn_stub().await;

    let patch = PostPatch {
        wip: Some(false),
        ..PostPatch::default()
    };
    let err = client.update_post(9999, &patch).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_post_sends_no_body_and_returns_unit() {
    let (state, client) = spawn_stub().await;

    let created = client
        .create_post(&NewPost::new("Doomed", "body"))
        .await
        .unwrap();
    let number = created["number"].as_u64().unwrap();

    client.delete_post(number).await.unwrap();

    let req = state.last();
    assert_eq!(req.method, "DELETE");
    assert_eq!(req.body, None);
}

#[tokio::test]
async fn delete_post_missing_is_not_found() {
    let (_state, client) = spawn_stub().await;

    let err = client.delete_post(9999).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn create_get_delete_round_trip() {
    let (_state, client) = spawn_stub().await;

    let mut post = NewPost::new("T", "B");
    post.tags = vec!["x".to_string()];
    post.category = "c".to_string();

    let created = client.create_post(&post).await.unwrap();
    let number = created["number"].as_u64().unwrap();

    let fetched = client.get_post(number).await.unwrap();
    assert_eq!(fetched["name"], "T");

    client.delete_post(number).await.unwrap();

    let err = client.get_post(number).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    // Nothing listens on port 1.
    let client = EsaClient::with_api_root("test-token", "acme", "http://127.0.0.1:1/v1").unwrap();

    let err = client.get_user().await.unwrap_err();
    assert!(matches!(err, esa_core::Error::Transport(_)));
}
