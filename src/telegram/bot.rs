use std::sync::Arc;
use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::payloads::GetUserProfilePhotosSetters;
use teloxide::prelude::*;
use teloxide::types::{User, UserId};
use teloxide::RequestError;
use tracing::{debug, info, warn};

use super::commands::{is_plain_text, Command};
use crate::handlers::{replies, ChatCommand, InboundEvent, InteractionHandler};
use crate::logging::log_error;
use crate::models::UserProfile;
use crate::registry::UserRegistry;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;
type HandlerResult = Result<(), HandlerError>;

/// Shared state injected into every endpoint
pub struct BotState {
    handler: InteractionHandler<dyn UserRegistry>,
    fetch_profile_photos: bool,
}

impl BotState {
    pub fn new(registry: Arc<dyn UserRegistry>, fetch_profile_photos: bool) -> Self {
        Self {
            handler: InteractionHandler::new(registry),
            fetch_profile_photos,
        }
    }

    async fn profile_photo(&self, bot: &Bot, user: &User) -> Option<String> {
        if !self.fetch_profile_photos {
            return None;
        }
        match fetch_profile_photo_path(bot, user.id).await {
            Ok(path) => path,
            Err(err) => {
                warn!(user_id = user.id.0, error = %err, "Could not fetch profile photo");
                None
            }
        }
    }

    async fn respond(&self, bot: &Bot, msg: &Message, event: &InboundEvent) -> HandlerResult {
        let text = match self.handler.handle(event).await {
            Ok(text) => text,
            Err(err) => {
                let context = format!("user_id={}", event.sender.user_id);
                log_error(
                    "interaction_handler",
                    "handle",
                    &err.to_string(),
                    Some(context.as_str()),
                );
                replies::FAILURE_TEXT.to_string()
            }
        };
        bot.send_message(msg.chat.id, text).await?;
        Ok(())
    }
}

/// Message routing: known commands first, then plain text
pub fn schema() -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(command_endpoint),
        )
        .branch(
            dptree::filter(|msg: Message| msg.text().is_some_and(is_plain_text))
                .endpoint(text_endpoint),
        )
}

/// Run long polling until Ctrl-C
pub async fn run(bot: Bot, state: Arc<BotState>) {
    info!("Bot started");
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .default_handler(|update| async move {
            debug!(update_id = ?update.id, "Ignoring unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    info!("Bot stopped");
}

async fn command_endpoint(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<BotState>,
) -> HandlerResult {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let command = ChatCommand::from(cmd);
    let photo = if command == ChatCommand::Start {
        state.profile_photo(&bot, user).await
    } else {
        None
    };
    let event = InboundEvent::command(sender_profile(user, photo)?, command);
    state.respond(&bot, &msg, &event).await
}

async fn text_endpoint(bot: Bot, msg: Message, state: Arc<BotState>) -> HandlerResult {
    let (Some(user), Some(text)) = (msg.from.as_ref(), msg.text()) else {
        return Ok(());
    };
    let photo = state.profile_photo(&bot, user).await;
    let event = InboundEvent::text(sender_profile(user, photo)?, text);
    state.respond(&bot, &msg, &event).await
}

/// Identity tuple of a Telegram user
pub fn sender_profile(
    user: &User,
    profile_photo_url: Option<String>,
) -> Result<UserProfile, HandlerError> {
    let user_id = i64::try_from(user.id.0)?;
    Ok(UserProfile {
        user_id,
        username: user.username.clone(),
        first_name: Some(user.first_name.clone()),
        last_name: user.last_name.clone(),
        profile_photo_url,
    })
}

/// File path of the user's first profile photo, if any
async fn fetch_profile_photo_path(
    bot: &Bot,
    user_id: UserId,
) -> Result<Option<String>, RequestError> {
    let photos = bot.get_user_profile_photos(user_id).limit(1).await?;
    let Some(photo) = photos.photos.first().and_then(|sizes| sizes.first()) else {
        return Ok(None);
    };
    let file = bot.get_file(photo.file.id.clone()).await?;
    Ok(Some(file.path))
}
