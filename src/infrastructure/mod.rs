//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic.
//!
//! # Submodules
//!
//! - [`app`] - Process runtime and the local chat session
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation

pub mod app;
pub mod bootstrap;
pub mod config;

pub use app::{App, ChatSession};
