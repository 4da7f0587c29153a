//! Conversational surface: actions invoked by an agent host.

pub mod action;
pub mod router;

pub use action::{AgentAction, AgentMessage, CreatePredictionAction, DepositStrategyAction};
pub use router::AgentRouter;
