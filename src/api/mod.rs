// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod embeddings;
pub mod errors;
pub mod handlers;
pub mod http_server;

pub use embeddings::{
    embeddings_handler, EmbeddingInput, EmbeddingItem, EmbeddingRequest, EmbeddingResponse,
};
pub use errors::{ApiError, ErrorEnvelope};
pub use handlers::{health_handler, tags_handler, HealthResponse, ModelInfo, TagsResponse};
pub use http_server::{create_app, start_server, AppState};
