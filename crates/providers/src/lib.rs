//! HTTP-backed implementations of the agent's provider seams:
//! an OpenAI-compatible chat-completions client and the Shopify
//! Storefront catalog gateway.

pub mod openai;
pub mod shopify;

pub use openai::OpenAiCompletionClient;
pub use shopify::ShopifyCatalogGateway;
