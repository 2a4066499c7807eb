use teloxide::utils::command::BotCommands;

use crate::handlers::ChatCommand;

#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "start working with the bot")]
    Start,
    #[command(description = "show this message")]
    Help,
    #[command(description = "show your information from the database")]
    MyInfo,
    #[command(description = "show user statistics")]
    Stats,
}

impl From<Command> for ChatCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Start => ChatCommand::Start,
            Command::Help => ChatCommand::Help,
            Command::MyInfo => ChatCommand::MyInfo,
            Command::Stats => ChatCommand::Stats,
        }
    }
}

/// Plain chat text; anything starting with `/` is treated as a command
pub fn is_plain_text(text: &str) -> bool {
    !text.starts_with('/')
}
