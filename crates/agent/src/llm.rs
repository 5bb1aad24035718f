use async_trait::async_trait;
use mostrador_core::domain::ChatMessage;
use mostrador_core::errors::ProviderError;

/// One completion call: ordered role-tagged messages, a model identifier
/// and a sampling temperature. The orchestrator always uses a low, fixed
/// temperature so answers stay catalog-faithful rather than creative.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f32,
    pub messages: Vec<ChatMessage>,
}

/// Seam to the hosted completion provider. Implementations live in
/// `mostrador-providers`; tests substitute counting doubles.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError>;
}
