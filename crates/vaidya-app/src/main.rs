//! Vaidya application binary - composition root.
//!
//! Ties the crates together into a single executable:
//! 1. Load configuration from TOML, then apply environment overrides
//! 2. Connect to Neo4j (fatal if unreachable)
//! 3. Build the Gemini client and the configured conversation chain
//! 4. Start the axum HTTP server with the embedded UI

use std::path::PathBuf;
use std::sync::Arc;

use vaidya_api::{create_router, AppState};
use vaidya_chat::{ConversationChain, GeminiClient, GraphQaChain, Interviewer};
use vaidya_core::config::VaidyaConfig;
use vaidya_graph::{GraphStore, Neo4jStore};

/// Resolve the config file path (VAIDYA_CONFIG env, or ~/.vaidya/config.toml).
fn config_path() -> PathBuf {
    if let Ok(p) = std::env::var("VAIDYA_CONFIG") {
        return PathBuf::from(p);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".vaidya").join("config.toml");
    }
    PathBuf::from("config.toml")
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Vaidya v{}", env!("CARGO_PKG_VERSION"));

    // Config: TOML file, then environment overrides.
    let config_file = config_path();
    let mut config = VaidyaConfig::load_or_default(&config_file);
    config.apply_env();
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }

    // Graph store. The process is useless without it, so fail at startup
    // rather than on the first request.
    let store: Arc<dyn GraphStore> = match Neo4jStore::connect(
        &config.graph.uri,
        &config.graph.user,
        &config.graph.password,
    )
    .await
    {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(uri = %config.graph.uri, error = %e, "Failed to connect to Neo4j");
            return Err(e.into());
        }
    };

    // LLM client and conversation chain.
    let llm = Arc::new(GeminiClient::new(
        config.llm.api_key.clone(),
        config.llm.model.clone(),
    ));
    let chain: Arc<dyn ConversationChain> = if config.llm.graph_qa {
        match GraphQaChain::new(Arc::clone(&store), llm).await {
            Ok(chain) => {
                tracing::info!("Graph-QA chain initialized");
                Arc::new(chain)
            }
            Err(e) => {
                tracing::error!(error = %e, "Chain initialization failed");
                return Err(e.into());
            }
        }
    } else {
        tracing::info!("Interview chain initialized");
        Arc::new(Interviewer::new(Arc::clone(&store), llm))
    };

    let state = AppState::new(store, chain, config.server.port);

    // HTTP server.
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let router = create_router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "Failed to bind — is another instance running?");
            tracing::error!("Try: VAIDYA_PORT={} cargo run -p vaidya-app", config.server.port.saturating_add(1));
            return Err(e.into());
        }
    };

    tracing::info!(addr = %addr, "API server listening");
    tracing::info!("App at http://{}/", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
