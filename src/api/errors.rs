// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Wire shape of every failure: a single message string.
///
/// Clients pattern-match on the text, so the 400 messages are fixed and the
/// 500 message carries the backend's own words.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorEnvelope {
    pub error: String,
}

/// Closed error taxonomy for the serving path.
///
/// Validation failures are detected locally with stable messages; inference
/// failures forward the backend message verbatim. Translation to an HTTP
/// status happens only here, at the outermost layer.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ApiError {
    /// Body missing, empty, or not parseable as JSON
    #[error("Invalid JSON")]
    InvalidJson,

    /// `input` field absent, null, or empty
    #[error("Input is required")]
    MissingInput,

    /// The encode call failed; message comes from the backend unmodified
    #[error("{0}")]
    Inference(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson | ApiError::MissingInput => StatusCode::BAD_REQUEST,
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_envelope())).into_response()
    }
}
