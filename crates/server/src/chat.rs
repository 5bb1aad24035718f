//! The single inbound operation: "submit turn".
//!
//! `POST /chat` takes `{ "message": string, "sessionId"?: string }` and
//! yields `200 { "reply": string }`. A missing or empty message is the only
//! client error (400); every other failure already degraded to a safe
//! fallback reply inside the orchestrator.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use mostrador_agent::orchestrator::{TurnOrchestrator, TurnRequest};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::health;

#[derive(Clone)]
pub struct ChatState {
    pub orchestrator: Arc<TurnOrchestrator>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct ChatError {
    pub error: String,
}

pub fn router(orchestrator: Arc<TurnOrchestrator>) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .merge(health::router())
        .layer(CorsLayer::permissive())
        .with_state(ChatState { orchestrator })
}

pub async fn chat(State(state): State<ChatState>, Json(request): Json<ChatRequest>) -> Response {
    let message = request.message.unwrap_or_default();

    match state
        .orchestrator
        .handle_turn(TurnRequest { message, session_id: request.session_id })
        .await
    {
        Ok(reply) => (StatusCode::OK, Json(ChatResponse { reply })).into_response(),
        Err(client_error) => (
            StatusCode::BAD_REQUEST,
            Json(ChatError { error: client_error.user_message().to_string() }),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::State, Json};
    use mostrador_agent::orchestrator::TurnOrchestrator;
    use mostrador_core::config::AppConfig;
    use mostrador_core::session::InMemorySessionStore;
    use mostrador_providers::{OpenAiCompletionClient, ShopifyCatalogGateway};

    use super::{chat, ChatRequest, ChatState};

    /// Providers pointed at a closed local port: every outbound call fails
    /// fast, which is exactly the degraded path the transport must absorb.
    fn unreachable_state() -> ChatState {
        let mut config = AppConfig::default();
        config.llm.api_key = "sk-test".to_string().into();
        config.llm.base_url = "http://127.0.0.1:1".to_string();
        config.shop.base_url = "http://127.0.0.1:1".to_string();
        config.shop.storefront_token = "shpat-test".to_string().into();

        let sessions = Arc::new(InMemorySessionStore::new(
            config.chat.max_history,
            config.chat.session_capacity,
        ));
        let completion = Arc::new(OpenAiCompletionClient::new(&config.llm).expect("client"));
        let catalog = Arc::new(ShopifyCatalogGateway::new(&config.shop).expect("client"));

        ChatState {
            orchestrator: Arc::new(TurnOrchestrator::new(
                &config, sessions, completion, catalog,
            )),
        }
    }

    #[tokio::test]
    async fn router_serves_chat_and_health() {
        use tower::util::ServiceExt;

        let router = super::router(unreachable_state().orchestrator);

        let health = router
            .clone()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(axum::body::Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(health.status(), axum::http::StatusCode::OK);

        let chat = router
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/chat")
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from(r#"{"message": "hola"}"#))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(chat.status(), axum::http::StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_message_is_a_bad_request() {
        let response = chat(
            State(unreachable_state()),
            Json(ChatRequest { message: None, session_id: None }),
        )
        .await;

        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn provider_outage_still_yields_a_success_shaped_reply() {
        let response = chat(
            State(unreachable_state()),
            Json(ChatRequest {
                message: Some("hola".to_string()),
                session_id: Some("s1".to_string()),
            }),
        )
        .await;

        assert_eq!(response.status(), axum::http::StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        let reply = payload["reply"].as_str().expect("reply field");
        assert!(reply.contains("https://wa.me/18094400062"));
    }
}
