//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!   ┌──────────┐   ┌──────────┐   ┌──────────┐
//!   │ Twitter  │   │ Telegram │   │  Agent   │   inbound adapters
//!   └────┬─────┘   └────┬─────┘   └────┬─────┘
//!        └──────────────┼──────────────┘
//!                       ▼
//!            MarketCommandHandler / DepositCommandHandler
//!                       │
//!                  application
//!                       │
//!        ┌──────────────┼──────────────┐
//!        ▼              ▼              ▼
//!   MarketSubmitter    Llm         ReplySink       outbound adapters
//! ```

pub mod inbound;
pub mod outbound;
