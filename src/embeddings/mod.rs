// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding backends
//!
//! The serving path talks to the loaded model through the [`TextEncoder`]
//! seam: one batched encode call plus static metadata resolved at load time.
//! [`OnnxEmbeddingModel`] is the production backend; [`HashEmbedder`] is a
//! deterministic stand-in for tests that must run without model files.

pub mod hash_embedder;
pub mod onnx_model;

pub use hash_embedder::HashEmbedder;
pub use onnx_model::OnnxEmbeddingModel;

use anyhow::Result;
use async_trait::async_trait;

/// Boundary to the embedding backend.
///
/// `encode_batch` returns one vector per input text, in input order, each of
/// length `dimension()`. Failure is all-or-nothing per batch; the adapter
/// does not retry and never returns partial results.
#[async_trait]
pub trait TextEncoder: Send + Sync {
    /// Encodes a batch of texts into fixed-length vectors.
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Model name advertised in responses.
    fn model_name(&self) -> &str;

    /// Fixed output dimensionality of every vector this model produces.
    fn dimension(&self) -> usize;

    /// Human-readable storage footprint of the loaded model.
    fn size_label(&self) -> &str;
}
