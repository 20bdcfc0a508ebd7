// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /v1/embeddings HTTP handler
//!
//! Validation pipeline, short-circuiting on first failure:
//! 1. Parse body as JSON (failure -> 400 "Invalid JSON")
//! 2. Resolve `input` into a non-empty text list (failure -> 400
//!    "Input is required")
//! 3. Encode the batch (failure -> 500 with the backend message)
//! 4. Assemble the response envelope, one item per vector

use crate::api::embeddings::{EmbeddingRequest, EmbeddingResponse};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// POST /v1/embeddings handler
///
/// Takes the raw body rather than a typed extractor so parse failures map to
/// this API's own error contract instead of a framework rejection.
pub async fn embeddings_handler(State(state): State<AppState>, body: Bytes) -> Response {
    match embed(&state, &body).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn embed(state: &AppState, body: &[u8]) -> Result<EmbeddingResponse, ApiError> {
    let texts = EmbeddingRequest::parse(body)?.into_texts()?;

    let vectors = state
        .encoder
        .encode_batch(&texts)
        .await
        .map_err(|e| ApiError::Inference(e.to_string()))?;

    Ok(EmbeddingResponse::new(state.encoder.model_name(), vectors))
}
