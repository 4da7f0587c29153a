//! Marketcast - social commands to on-chain prediction markets.
//!
//! Commands arrive as tweets, Telegram messages or conversational agent
//! actions. Each one is extracted into a market draft, validated, submitted
//! once to the prediction market contract, and answered on the surface it
//! came from.
//!
//! # Architecture
//!
//! - [`domain`] - Commands, drafts, validated requests and failures
//! - [`port`] - Trait seams between the pipeline and the outside world
//! - [`application`] - Extraction, validation, submission and reply use cases
//! - [`adapter`] - Twitter, Telegram, agent, chain and LLM adapters
//! - [`infrastructure`] - Configuration and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `telegram` - Telegram bot surface (enabled by default)
//!
//! # Example
//!
//! ```
//! use marketcast::application::extract::GrammarExtractor;
//! use marketcast::application::Validator;
//!
//! let matched = GrammarExtractor::new()
//!     .parse("create market: Cats/Dogs")
//!     .unwrap();
//! let request = Validator::default().validate(matched.draft).unwrap();
//! assert_eq!(request.question(), "Which will win: Cats or Dogs?");
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
