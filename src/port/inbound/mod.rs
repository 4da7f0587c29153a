//! Inbound ports (driving side): interfaces source adapters call into.

pub mod command;
