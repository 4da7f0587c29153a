//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the market creation and deposit use cases.

pub mod deposit;
pub mod extract;
pub mod pipeline;
pub mod reply;
pub mod submit;
pub mod validate;

pub use deposit::DepositFlow;
pub use pipeline::Pipeline;
pub use reply::{ReplyDispatcher, ReplyFormatter};
pub use submit::SubmissionQueue;
pub use validate::{MarketDefaults, Validator};
