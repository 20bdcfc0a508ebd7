// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Metadata handlers: health probe and model listing.
//!
//! Both are pure reads of state resolved at load time; neither can fail.

use crate::api::http_server::AppState;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

/// Description of the loaded model, as listed by GET /api/tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub size: String,
    pub dimensions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsResponse {
    pub models: Vec<ModelInfo>,
}

/// GET /health handler
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.encoder.model_name().to_string(),
    })
}

/// GET /api/tags handler
///
/// Single-model deployment: the list always has exactly one entry.
pub async fn tags_handler(State(state): State<AppState>) -> Json<TagsResponse> {
    Json(TagsResponse {
        models: vec![ModelInfo {
            name: state.encoder.model_name().to_string(),
            size: state.encoder.size_label().to_string(),
            dimensions: state.encoder.dimension(),
        }],
    })
}
