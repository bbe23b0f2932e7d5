#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use libpanels_api::auth::jwt::{generate_access_token, JwtConfig};
use libpanels_api::config::ServerConfig;
use libpanels_api::router::build_app_router;
use libpanels_api::state::AppState;
use libpanels_core::memory::{InMemoryPanelStore, StaticFolderGuard, StaticUserDirectory};
use libpanels_core::service::LibraryPanelService;
use libpanels_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over in-memory backends.
///
/// The returned router is cheap to clone and every clone shares the same
/// store, so a test can issue several requests against one app.
pub fn build_test_app(guard: StaticFolderGuard, users: StaticUserDirectory) -> Router {
    let config = test_config();
    let store = Arc::new(InMemoryPanelStore::new());
    let panels = LibraryPanelService::new(store.clone(), store, Arc::new(guard), Arc::new(users));

    let state = AppState {
        panels: Arc::new(panels),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// App where every user may edit every folder.
pub fn build_open_app() -> Router {
    build_test_app(StaticFolderGuard::allow_all(), StaticUserDirectory::new())
}

/// Bearer token for `user_id` acting in `org_id`.
pub fn token(user_id: DbId, org_id: DbId) -> String {
    generate_access_token(user_id, org_id, &test_config().jwt).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn get_anonymous(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn patch_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
