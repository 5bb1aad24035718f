//! Turn orchestration - classification, context assembly and completion.
//!
//! This crate is the stateful heart of mostrador. For every incoming user
//! message it runs a fixed pipeline:
//!
//! 1. **Risk gate** (`classify`) - crisis content short-circuits to a fixed
//!    human-handoff reply before anything else runs.
//! 2. **Intent signals** (`classify`) - keyword heuristics decide whether to
//!    pull live catalog data and whether to redirect custom orders.
//! 3. **Context assembly** (`prompt`) - static policy block + situational
//!    directives + bounded transcript, recomputed every turn.
//! 4. **Completion** (`llm`) - one call to the completion provider at a low,
//!    fixed temperature.
//! 5. **Sanitize & persist** (`sanitize`, orchestrator) - link cleanup, then
//!    an atomic transcript append.
//!
//! # Safety principle
//!
//! The model only ever sees products the catalog gateway actually returned
//! this turn. When the catalog is empty or the provider failed, the prompt
//! instructs the model to say so instead of inventing inventory.

pub mod catalog;
pub mod classify;
pub mod llm;
pub mod orchestrator;
pub mod prompt;
pub mod sanitize;

pub use catalog::CatalogGateway;
pub use classify::{IntentClassifier, IntentSignals, RiskClassifier};
pub use llm::{CompletionClient, CompletionRequest};
pub use orchestrator::{TurnOrchestrator, TurnRequest};
pub use prompt::PromptAssembler;
