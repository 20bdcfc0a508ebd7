// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Process configuration
//!
//! Bind address and model file locations, from CLI flags with environment
//! fallbacks. No other CLI surface exists; everything request-related is
//! resolved per call.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

#[derive(Debug, Clone, Parser)]
#[command(name = "embed-node", about = "HTTP embedding server for sentence-transformer models")]
pub struct ServerConfig {
    /// Address the API server binds
    #[arg(long, env = "API_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port the API server binds
    #[arg(long, env = "API_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Path to the ONNX model file
    #[arg(
        long,
        env = "MODEL_PATH",
        default_value = "./models/all-MiniLM-L6-v2-onnx/model.onnx"
    )]
    pub model_path: String,

    /// Path to the tokenizer JSON file
    #[arg(
        long,
        env = "TOKENIZER_PATH",
        default_value = "./models/all-MiniLM-L6-v2-onnx/tokenizer.json"
    )]
    pub tokenizer_path: String,

    /// Model name advertised to clients
    #[arg(long, env = "MODEL_NAME", default_value = "all-MiniLM-L6-v2")]
    pub model_name: String,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .context("Invalid bind address")
    }
}
