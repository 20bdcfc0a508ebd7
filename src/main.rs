// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use embed_node::{
    api::{start_server, AppState},
    config::ServerConfig,
    embeddings::{OnnxEmbeddingModel, TextEncoder},
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = ServerConfig::parse();

    tracing::info!("🚀 Starting embed-node");
    tracing::info!("Loading embedding model: {}", config.model_name);

    // Model load is fatal on failure; the server never starts without it.
    let model = OnnxEmbeddingModel::new(
        config.model_name.clone(),
        config.model_path.clone(),
        config.tokenizer_path.clone(),
    )
    .await?;

    tracing::info!(
        "✅ Model ready: {} ({} dimensions, {})",
        model.model_name(),
        model.dimension(),
        model.size_label()
    );

    let state = AppState::new(Arc::new(model));
    start_server(config.socket_addr()?, state).await
}
