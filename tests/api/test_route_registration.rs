// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route registration tests
//!
//! These tests verify that:
//! - The three served routes exist and answer on their methods
//! - Wrong methods are rejected with 405
//! - Unknown paths are rejected with 404

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use embed_node::{
    api::http_server::{create_app, AppState},
    embeddings::HashEmbedder,
};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

fn setup_app() -> Router {
    let state = AppState::new(Arc::new(HashEmbedder::new("all-MiniLM-L6-v2", 384)));
    create_app(state)
}

async fn send(app: Router, method: Method, uri: &str, body: &str) -> StatusCode {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn test_embeddings_route_registered() {
    let status = send(
        setup_app(),
        Method::POST,
        "/v1/embeddings",
        r#"{"input": "test"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_embeddings_route_rejects_get() {
    let status = send(setup_app(), Method::GET, "/v1/embeddings", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health_route_registered() {
    let status = send(setup_app(), Method::GET, "/health", "").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_route_rejects_post() {
    let status = send(setup_app(), Method::POST, "/health", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_tags_route_registered() {
    let status = send(setup_app(), Method::GET, "/api/tags", "").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let status = send(setup_app(), Method::GET, "/v1/models", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
