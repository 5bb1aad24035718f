use std::sync::Arc;

use mostrador_core::config::AppConfig;
use mostrador_core::domain::CatalogOutcome;
use mostrador_core::errors::ClientInputError;
use mostrador_core::session::SessionStore;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::CatalogGateway;
use crate::classify::{IntentClassifier, RiskClassifier};
use crate::llm::{CompletionClient, CompletionRequest};
use crate::prompt::PromptAssembler;
use crate::sanitize::strip_url_trailing_punctuation;

/// Session id used when the transport permits anonymous, stateless use.
const ANONYMOUS_SESSION_ID: &str = "default";

/// One validated inbound request, as delivered by the transport layer.
#[derive(Clone, Debug)]
pub struct TurnRequest {
    pub message: String,
    pub session_id: Option<String>,
}

/// Coordinates one conversation turn end to end:
/// risk short-circuit → intent classification → conditional catalog fetch →
/// prompt assembly → completion call → sanitization → transcript update.
///
/// Every failure past input validation degrades to a well-formed reply
/// string; provider errors never escape to the caller.
pub struct TurnOrchestrator {
    model: String,
    temperature: f32,
    risk: RiskClassifier,
    intent: IntentClassifier,
    assembler: PromptAssembler,
    sessions: Arc<dyn SessionStore>,
    completion: Arc<dyn CompletionClient>,
    catalog: Arc<dyn CatalogGateway>,
    crisis_reply: String,
    fallback_reply: String,
}

impl TurnOrchestrator {
    pub fn new(
        config: &AppConfig,
        sessions: Arc<dyn SessionStore>,
        completion: Arc<dyn CompletionClient>,
        catalog: Arc<dyn CatalogGateway>,
    ) -> Self {
        let whatsapp_url = &config.contact.whatsapp_url;
        Self {
            model: config.llm.model.clone(),
            temperature: config.chat.temperature,
            risk: RiskClassifier::from_config(&config.lexicon),
            intent: IntentClassifier::from_config(
                &config.lexicon,
                config.chat.guided_purchase_threshold,
            ),
            assembler: PromptAssembler::new(whatsapp_url),
            sessions,
            completion,
            catalog,
            crisis_reply: format!(
                "Siento mucho que estés pasando por esto. No puedo ayudarte con lo que \
                 necesitas ahora mismo, pero una persona real sí puede. Por favor escríbenos \
                 al WhatsApp {whatsapp_url} para que un agente humano te atienda de inmediato."
            ),
            fallback_reply: format!(
                "Ahora mismo no pude responder correctamente. Un agente humano puede \
                 ayudarte escribiendo al WhatsApp: {whatsapp_url}"
            ),
        }
    }

    /// Handles one turn. `Err` only for client input problems; everything
    /// downstream resolves to a reply string.
    pub async fn handle_turn(&self, request: TurnRequest) -> Result<String, ClientInputError> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(ClientInputError::EmptyMessage);
        }

        let session_id = request
            .session_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(ANONYMOUS_SESSION_ID)
            .to_string();
        let correlation_id = Uuid::new_v4();

        info!(
            event_name = "chat.turn.received",
            correlation_id = %correlation_id,
            session_id = %session_id,
            "turn received"
        );

        if self.risk.is_high_risk(message) {
            info!(
                event_name = "chat.turn.risk_escalation",
                correlation_id = %correlation_id,
                session_id = %session_id,
                "high-risk message short-circuited to human handoff"
            );
            self.sessions.append_exchange(&session_id, message, &self.crisis_reply);
            return Ok(self.crisis_reply.clone());
        }

        let signals = self.intent.classify(message);
        let catalog = if signals.wants_catalog {
            match self.catalog.fetch_catalog().await {
                Ok(products) if products.is_empty() => {
                    info!(
                        event_name = "chat.turn.catalog_empty",
                        correlation_id = %correlation_id,
                        session_id = %session_id,
                        "catalog fetch returned no sellable products"
                    );
                    CatalogOutcome::Empty
                }
                Ok(products) => {
                    info!(
                        event_name = "chat.turn.catalog_fetched",
                        correlation_id = %correlation_id,
                        session_id = %session_id,
                        product_count = products.len(),
                        "catalog fetched"
                    );
                    CatalogOutcome::Listed(products)
                }
                Err(error) => {
                    warn!(
                        event_name = "chat.turn.catalog_unavailable",
                        correlation_id = %correlation_id,
                        session_id = %session_id,
                        error = %error,
                        "catalog fetch failed; continuing without catalog data"
                    );
                    CatalogOutcome::Failed
                }
            }
        } else {
            CatalogOutcome::NotRequested
        };

        let transcript = self.sessions.transcript(&session_id);
        let messages = self.assembler.assemble(signals, &catalog, &transcript, message);

        let reply = match self
            .completion
            .complete(CompletionRequest {
                model: self.model.clone(),
                temperature: self.temperature,
                messages,
            })
            .await
        {
            Ok(generated) => strip_url_trailing_punctuation(&generated),
            Err(error) => {
                warn!(
                    event_name = "chat.turn.fallback",
                    correlation_id = %correlation_id,
                    session_id = %session_id,
                    error = %error,
                    "completion failed; returning fixed fallback reply"
                );
                return Ok(self.fallback_reply.clone());
            }
        };

        self.sessions.append_exchange(&session_id, message, &reply);
        info!(
            event_name = "chat.turn.completed",
            correlation_id = %correlation_id,
            session_id = %session_id,
            "turn completed and persisted"
        );

        Ok(reply)
    }
}
