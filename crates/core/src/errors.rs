use thiserror::Error;

/// Rejections the transport surfaces as a 4xx. Everything else that can go
/// wrong during a turn degrades to a safe fallback reply instead.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ClientInputError {
    #[error("message must not be empty")]
    EmptyMessage,
}

impl ClientInputError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyMessage => "Mensaje vacío",
        }
    }
}

/// Failure at an external provider boundary (completion or catalog call).
///
/// Always recovered locally: the catalog gateway converts it to a "no data"
/// state and the orchestrator converts it to the fixed fallback reply. It
/// must never reach the transport layer.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("provider returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("malformed provider payload: {0}")]
    MalformedPayload(String),
    #[error("provider rejected credentials")]
    Auth,
}
