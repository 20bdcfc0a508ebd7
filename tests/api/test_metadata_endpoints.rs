// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Tests for GET /health and GET /api/tags
//!
//! Both endpoints are pure reads of load-time state: /health always reports
//! ok, and /api/tags lists exactly one model whose dimensions match what
//! /v1/embeddings actually produces.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use embed_node::{
    api::http_server::{create_app, AppState},
    embeddings::HashEmbedder,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

const DIMENSIONS: usize = 384;

fn setup_app() -> Router {
    let state = AppState::new(Arc::new(HashEmbedder::new("all-MiniLM-L6-v2", DIMENSIONS)));
    create_app(state)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_health_reports_ok_and_model() {
    let (status, json) = get_json(setup_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["model"], "all-MiniLM-L6-v2");
}

#[tokio::test]
async fn test_health_unaffected_by_request_history() {
    let app = setup_app();

    // A failed and a successful embeddings call first
    let bad = Request::builder()
        .method(Method::POST)
        .uri("/v1/embeddings")
        .header("content-type", "application/json")
        .body(Body::from("garbage"))
        .unwrap();
    app.clone().oneshot(bad).await.unwrap();

    let good = Request::builder()
        .method(Method::POST)
        .uri("/v1/embeddings")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"input": "hello"}"#))
        .unwrap();
    app.clone().oneshot(good).await.unwrap();

    let (status, json) = get_json(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_tags_lists_exactly_one_model() {
    let (status, json) = get_json(setup_app(), "/api/tags").await;

    assert_eq!(status, StatusCode::OK);
    let models = json["models"].as_array().unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0]["name"], "all-MiniLM-L6-v2");
    assert!(models[0]["size"].is_string());
    assert_eq!(models[0]["dimensions"], DIMENSIONS as u64);
}

#[tokio::test]
async fn test_tags_dimensions_match_served_embeddings() {
    let app = setup_app();

    let (_, tags) = get_json(app.clone(), "/api/tags").await;
    let advertised = tags["models"][0]["dimensions"].as_u64().unwrap() as usize;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/embeddings")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"input": "dimension check"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    let produced = json["data"][0]["embedding"].as_array().unwrap().len();
    assert_eq!(advertised, produced);
}
