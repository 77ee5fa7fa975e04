// HTTP request handlers

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use super::fallback::{resolve_failure, FailureAction};
use super::types::{ChatRequest, ChatResponse, HealthResponse};
use super::RelayServer;
use crate::prompt::compose_system_prompt;

/// Payload of the liveness endpoint.
pub const HEALTH_STATUS: &str = "Sara Backend Online";

/// Create the router with all endpoints
pub fn create_router(server: Arc<RelayServer>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/chat", post(handle_chat))
        .with_state(server)
}

/// Liveness probe. Independent of configuration and upstream state.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTH_STATUS.to_string(),
    })
}

/// Relay one proposal: fetch rules, compose the prompt, generate.
///
/// Every outcome is answered with 200; failures the relay cannot recover
/// from come back as `{"error": ...}`.
pub async fn handle_chat(
    State(server): State<Arc<RelayServer>>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let rules = server.rule_fetcher().fetch_rules().await;
    let system_prompt = compose_system_prompt(&rules);

    tracing::debug!(
        "Chat request: {} chars, {} rules, provider {}",
        request.message.chars().count(),
        rules.len(),
        server.provider().name()
    );

    match server
        .provider()
        .generate(&system_prompt, &request.message)
        .await
    {
        Ok(text) => Json(ChatResponse::reply(text)),
        Err(e) => {
            let error_text = e.to_string();
            match resolve_failure(&error_text, &request.message) {
                FailureAction::Fallback(reply) => {
                    tracing::warn!("Generation rate limited, answering with fallback");
                    Json(ChatResponse::reply(reply))
                }
                FailureAction::Error(text) => {
                    tracing::error!("Generation failed: {}", text);
                    Json(ChatResponse::error(text))
                }
            }
        }
    }
}
