// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbeddingResponse and EmbeddingItem types
//!
//! The success envelope for POST /v1/embeddings. `data` carries one item per
//! input text, indexed by position in the original input sequence.

use serde::{Deserialize, Serialize};

/// One embedding paired with its zero-based position in the request input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingItem {
    /// Position in the original input sequence
    pub index: usize,

    /// Fixed-length embedding vector
    pub embedding: Vec<f32>,
}

/// Response body for POST /v1/embeddings
///
/// # Example
/// ```json
/// {
///   "object": "embedding",
///   "model": "all-MiniLM-L6-v2",
///   "data": [
///     {"index": 0, "embedding": [0.1, 0.2, ...]}
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// Constant payload-kind tag, always "embedding"
    pub object: String,

    /// Name of the model that produced the vectors
    pub model: String,

    /// One item per input text, in input order
    pub data: Vec<EmbeddingItem>,
}

impl EmbeddingResponse {
    /// Builds the envelope from encoder output, assigning indices by
    /// output position.
    pub fn new(model: impl Into<String>, vectors: Vec<Vec<f32>>) -> Self {
        let data = vectors
            .into_iter()
            .enumerate()
            .map(|(index, embedding)| EmbeddingItem { index, embedding })
            .collect();

        Self {
            object: "embedding".to_string(),
            model: model.into(),
            data,
        }
    }
}
