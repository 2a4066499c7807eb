//! # Interaction Handler
//!
//! Turns transport-neutral [`InboundEvent`]s into registry calls and reply
//! text. `/start` and plain text record the sender; `/myinfo` and `/stats`
//! only read.

pub mod interaction;
pub mod replies;

pub use interaction::{ChatCommand, EventKind, InboundEvent, InteractionHandler};
