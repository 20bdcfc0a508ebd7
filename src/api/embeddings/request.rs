// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbeddingRequest type for POST /v1/embeddings
//!
//! The `input` field accepts either one string or an array of strings and is
//! resolved here, once, into a canonical non-empty list of texts. Everything
//! downstream sees only the normalized form.

use crate::api::errors::ApiError;
use serde::Deserialize;

/// Request body for POST /v1/embeddings
///
/// # Example
/// ```json
/// {"input": "Hello world"}
/// {"input": ["Hello world", "Another text"]}
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingRequest {
    /// One text or an ordered sequence of texts to embed
    #[serde(default)]
    pub input: Option<EmbeddingInput>,
}

/// Accepted shapes of the `input` field.
///
/// Non-string elements fail deserialization and surface as "Invalid JSON";
/// the union is resolved exactly once, at this boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    Single(String),
    Batch(Vec<String>),
}

impl EmbeddingRequest {
    /// Parses a raw request body.
    ///
    /// An empty body or any body that does not deserialize into the request
    /// shape is rejected as [`ApiError::InvalidJson`].
    pub fn parse(body: &[u8]) -> Result<Self, ApiError> {
        if body.is_empty() {
            return Err(ApiError::InvalidJson);
        }
        serde_json::from_slice(body).map_err(|_| ApiError::InvalidJson)
    }

    /// Resolves `input` into the canonical non-empty text list.
    ///
    /// A single string wraps into a one-element list; an absent or null
    /// field, an empty string, and an empty array are all rejected as
    /// [`ApiError::MissingInput`] before reaching the encoder.
    pub fn into_texts(self) -> Result<Vec<String>, ApiError> {
        match self.input {
            Some(EmbeddingInput::Single(text)) if !text.is_empty() => Ok(vec![text]),
            Some(EmbeddingInput::Batch(texts)) if !texts.is_empty() => Ok(texts),
            _ => Err(ApiError::MissingInput),
        }
    }
}
