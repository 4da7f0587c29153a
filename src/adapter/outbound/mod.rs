//! Outbound adapters (driven side).

pub mod agent;
pub mod chain;
pub mod llm;
#[cfg(feature = "telegram")]
pub mod telegram;
pub mod twitter;
