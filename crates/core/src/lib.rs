pub mod config;
pub mod domain;
pub mod errors;
pub mod session;

pub use domain::{CatalogOutcome, ChatMessage, ProductRecord, Role};
pub use errors::{ClientInputError, ProviderError};
pub use session::{InMemorySessionStore, SessionStore};
