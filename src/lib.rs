// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod embeddings;

// Re-export main types
pub use api::{create_app, start_server, ApiError, AppState, EmbeddingRequest, EmbeddingResponse};
pub use config::ServerConfig;
pub use embeddings::{HashEmbedder, OnnxEmbeddingModel, TextEncoder};
