//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules for better organization:
//! - `message_handler`: Handles commands, text and location messages
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `ui_builder`: Creates keyboards and formats messages
//! - `dialogue_manager`: Applies flow transitions and sends the replies

pub mod callback_handler;
pub mod dialogue_manager;
pub mod message_handler;
pub mod ui_builder;

use teloxide::dispatching::dialogue::{self, InMemStorage};
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::dialogue::TriageSession;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::{command_handler, message_handler};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "начать заново")]
    Start,
    #[command(description = "главное меню")]
    Menu,
    #[command(description = "как это работает")]
    Help,
}

/// Update routing: commands first, then any other message, then callbacks
pub fn schema() -> UpdateHandler<anyhow::Error> {
    let message_branch = Update::filter_message()
        .branch(teloxide::filter_command::<Command, _>().endpoint(command_handler))
        .branch(dptree::endpoint(message_handler));

    let callback_branch = Update::filter_callback_query().endpoint(callback_handler);

    dialogue::enter::<Update, InMemStorage<TriageSession>, TriageSession, _>()
        .branch(message_branch)
        .branch(callback_branch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("/start", "dzivot_bot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/menu@dzivot_bot", "dzivot_bot").unwrap(), Command::Menu);
        assert_eq!(Command::parse("/help", "dzivot_bot").unwrap(), Command::Help);
        assert!(Command::parse("болит зуб", "dzivot_bot").is_err());
    }

    #[test]
    fn test_command_descriptions_are_listed() {
        let descriptions = Command::descriptions().to_string();
        assert!(descriptions.contains("/start"));
        assert!(descriptions.contains("/help"));
    }
}
