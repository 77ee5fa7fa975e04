// Sara - Relay Server Module
// HTTP front for the rule-governed generation relay

mod fallback;
mod handlers;
pub mod types; // Public for client access

pub use fallback::{
    classify_failure, rate_limit_reply, resolve_failure, FailureAction, FailureKind,
    BACKUP_PROTOCOL_MESSAGE, RATE_LIMIT_MESSAGE,
};
pub use handlers::{create_router, handle_chat, health_check, HEALTH_STATUS};
pub use types::{ChatRequest, ChatResponse, HealthResponse};

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::providers::{GeminiProvider, LlmProvider};
use crate::rules::RuleFetcher;

/// Request bodies are a single short proposal.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Main relay server structure
pub struct RelayServer {
    /// Startup configuration (read-only)
    config: Arc<Config>,
    /// Generation backend
    provider: Arc<dyn LlmProvider>,
    /// Governance rule source
    rule_fetcher: RuleFetcher,
}

impl RelayServer {
    /// Create a server from explicit parts.
    pub fn new(config: Config, provider: Arc<dyn LlmProvider>, rule_fetcher: RuleFetcher) -> Self {
        Self {
            config: Arc::new(config),
            provider,
            rule_fetcher,
        }
    }

    /// Create a server backed by Gemini and the configured rule store.
    pub fn from_config(config: Config) -> Result<Self> {
        let provider = GeminiProvider::new(&config.gemini)?;
        let rule_fetcher = RuleFetcher::new(&config)?;
        Ok(Self::new(config, Arc::new(provider), rule_fetcher))
    }

    /// Build the full application: routes plus CORS, tracing and body limit.
    pub fn into_app(self) -> Router {
        create_router(Arc::new(self))
            .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Start the HTTP server and run until Ctrl-C.
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .server
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", self.config.server.bind_address))?;

        tracing::info!(
            "Starting Sara relay on {} (model: {}, rules: {})",
            addr,
            self.provider.default_model(),
            if self.rule_fetcher.is_configured() { "enabled" } else { "disabled" }
        );
        tracing::info!("Endpoints:");
        tracing::info!("  GET  /     - liveness probe");
        tracing::info!("  POST /chat - governed proposal review");

        let app = self.into_app();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server failed")?;

        tracing::info!("Sara relay stopped");
        Ok(())
    }

    /// Get reference to the generation provider
    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    /// Get reference to the rule fetcher
    pub fn rule_fetcher(&self) -> &RuleFetcher {
        &self.rule_fetcher
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, serve until the process is killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
