//! Inbound adapters (driving side): the surfaces commands arrive on.

pub mod agent;
pub mod cli;
pub mod telegram;
pub mod twitter;
