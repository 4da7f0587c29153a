//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: the market contract,
//! the language model, and the per-platform reply capability.

pub mod llm;
pub mod market;
pub mod reply;
