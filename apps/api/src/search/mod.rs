// Ask-AI search: filter extraction, shaping, narration and the HTTP handlers.
// Generative calls go through llm_client via the Narrator only.

pub mod extractor;
pub mod handlers;
pub mod narrator;
pub mod pipeline;
pub mod prompts;
pub mod shaper;
