// Discord layer - commands, the relay responder and the error hook.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "relay/poise_responder.rs"]
pub mod relay;

#[path = "error_handler.rs"]
pub mod error_handler;

// Re-export command types for convenience
pub use commands::{Context, Data, Error};
