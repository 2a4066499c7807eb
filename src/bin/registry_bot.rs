//! Registry bot entry point: load configuration, connect the store, run the
//! Telegram dispatcher, disconnect on shutdown.

use anyhow::Context;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use user_registry::config::ConfigLoader;
use user_registry::database::RegistryStore;
use user_registry::logging::{init_structured_logging, log_configuration};
use user_registry::registry::UserRegistry;
use user_registry::telegram::{self, BotState, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loader = ConfigLoader::new();
    let config = loader.load().context("failed to load configuration")?;
    init_structured_logging(&config.logging);
    log_configuration(&config, loader.environment());

    let store = Arc::new(RegistryStore::new(config.database.clone()));
    store
        .connect()
        .await
        .context("failed to connect to the user registry")?;

    match store.count_users().await {
        Ok(total) => info!(total, "User registry ready"),
        Err(err) => warn!(error = %err, "Could not count registered users"),
    }

    let bot = Bot::new(&config.telegram.bot_token);
    if let Err(err) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %err, "Could not register bot command menu");
    }

    let registry: Arc<dyn UserRegistry> = store.clone();
    let state = Arc::new(BotState::new(
        registry,
        config.telegram.fetch_profile_photos,
    ));

    telegram::run(bot, state).await;

    store.disconnect().await;
    Ok(())
}
