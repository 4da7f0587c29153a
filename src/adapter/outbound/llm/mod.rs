//! LLM adapter modules.
//!
//! Provides implementations of the [`Llm`](crate::port::outbound::llm::Llm) trait
//! for Anthropic Claude and OpenAI.

pub mod anthropic;
pub mod client;
pub mod openai;

/// System instruction shared by every provider.
pub const EXTRACTION_SYSTEM_PROMPT: &str =
    "You extract structured parameters from social media messages. \
     Answer with a single JSON object and no other text.";
