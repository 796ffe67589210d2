// Screening core: intake sequencing, question synthesis, interview sequencing.
// All LLM calls go through llm_client — no direct Groq SDK calls here.

pub mod engine;
pub mod fallback;
pub mod fields;
pub mod handlers;
pub mod normalize;
pub mod prompts;
pub mod sentiment;
pub mod session;
pub mod synthesizer;
