use std::sync::Arc;
use tracing::{debug, info};

use super::replies;
use crate::error::Result;
use crate::models::UserProfile;
use crate::registry::UserRegistry;

/// Commands understood by the bot, independent of the chat transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    Start,
    Help,
    MyInfo,
    Stats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Command(ChatCommand),
    /// Plain text that is not a command
    Text(String),
}

/// One inbound chat event with the sender's identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub sender: UserProfile,
    pub kind: EventKind,
}

impl InboundEvent {
    pub fn command(sender: UserProfile, command: ChatCommand) -> Self {
        Self {
            sender,
            kind: EventKind::Command(command),
        }
    }

    pub fn text(sender: UserProfile, text: impl Into<String>) -> Self {
        Self {
            sender,
            kind: EventKind::Text(text.into()),
        }
    }

    /// Events that record the sender before replying
    pub fn records_sender(&self) -> bool {
        matches!(
            self.kind,
            EventKind::Command(ChatCommand::Start) | EventKind::Text(_)
        )
    }
}

/// Maps inbound events to registry calls and reply text
pub struct InteractionHandler<R: ?Sized> {
    registry: Arc<R>,
}

impl<R: ?Sized> Clone for InteractionHandler<R> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<R: UserRegistry + ?Sized> InteractionHandler<R> {
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, event: &InboundEvent) -> Result<String> {
        let sender = &event.sender;
        debug!(user_id = sender.user_id, kind = ?event.kind, "Handling inbound event");

        if event.records_sender() {
            self.registry.upsert_user(sender).await?;
        }

        let reply = match &event.kind {
            EventKind::Command(ChatCommand::Start) => replies::greeting(sender),
            EventKind::Command(ChatCommand::Help) => replies::HELP_TEXT.to_string(),
            EventKind::Command(ChatCommand::MyInfo) => {
                let record = self.registry.get_user(sender.user_id).await?;
                replies::user_info(record.as_ref())
            }
            EventKind::Command(ChatCommand::Stats) => {
                // No access control on stats
                let records = self.registry.get_all_users().await?;
                info!(user_id = sender.user_id, total = records.len(), "Stats requested");
                replies::stats(&records)
            }
            EventKind::Text(_) => replies::message_ack(sender),
        };

        Ok(reply)
    }
}
