use serde::{Deserialize, Serialize};

/// Role tag on a chat message. Transcripts only ever hold `User` and
/// `Assistant`; `System` appears exclusively in the assembled prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One role-tagged message. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// A normalized storefront product as surfaced to the prompt assembler.
///
/// Sourced fresh from the catalog gateway on every qualifying turn and
/// filtered to the sellable category before anything downstream sees it.
/// `price` is display-ready (`"150.00 DOP"`), never an arithmetic operand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    pub price: String,
    pub available: Option<bool>,
    pub url: String,
}

/// What the orchestrator learned from the catalog gateway this turn.
///
/// `Empty` and `Failed` are equally valid "no data" states: the model is
/// instructed to state unavailability truthfully rather than invent items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogOutcome {
    /// Catalog intent never fired; no fetch was attempted.
    NotRequested,
    Listed(Vec<ProductRecord>),
    Empty,
    Failed,
}

impl CatalogOutcome {
    pub fn products(&self) -> &[ProductRecord] {
        match self {
            Self::Listed(products) => products,
            _ => &[],
        }
    }
}
