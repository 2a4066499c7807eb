//! # Telegram Transport
//!
//! Adapts Telegram updates into [`crate::handlers::InboundEvent`]s via
//! `teloxide` and sends the handler's replies back to the chat.

pub mod bot;
pub mod commands;

pub use bot::{run, schema, sender_profile, BotState, HandlerError};
pub use commands::{is_plain_text, Command};
