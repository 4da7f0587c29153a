//! Telegram surface: `/create`, `/deposit` and `/help` chat commands.

#[cfg(feature = "telegram")]
pub mod bot;
pub mod command;

#[cfg(feature = "telegram")]
pub use bot::TelegramBot;
