//! Infrastructure configuration modules.

pub mod agent;
pub mod llm;
pub mod logging;
pub mod market;
pub mod settings;
pub mod telegram;
pub mod twitter;

pub use settings::Config;
