// Gap analysis: request composition, the model call, the response contract,
// and the local gap-fill simulation.
// All model calls go through llm_client; nothing here talks to Gemini directly.

pub mod analyzer;
pub mod composer;
pub mod contract;
pub mod handlers;
pub mod prompts;
pub mod schema;
pub mod simulation;
