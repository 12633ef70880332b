//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::debug;

// Import localization
use crate::localization::t_lang;

use crate::actions::Coordinates;
use crate::config::BotConfig;
use crate::dialogue::{TriageDialogue, TriageSession};
use crate::flow::Event;

use super::dialogue_manager::advance;
use super::Command;

fn language_code(msg: &Message) -> Option<&str> {
    msg.from
        .as_ref()
        .and_then(|user| user.language_code.as_deref())
}

/// Turn a text or location message into a flow event
pub fn message_event(msg: &Message) -> Option<Event> {
    if let Some(location) = msg.location() {
        return Some(Event::Location(Coordinates::new(
            location.latitude,
            location.longitude,
        )));
    }

    msg.text()
        .map(|text| Event::from_text(text, language_code(msg)))
}

async fn handle_unsupported_message(bot: &Bot, msg: &Message) -> Result<()> {
    debug!(chat_id = %msg.chat.id, "Received unsupported message type");

    bot.send_message(
        msg.chat.id,
        t_lang("unsupported-message", language_code(msg)),
    )
    .await?;
    Ok(())
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    dialogue: TriageDialogue,
    session: TriageSession,
    config: Arc<BotConfig>,
) -> Result<()> {
    let Some(event) = message_event(&msg) else {
        return handle_unsupported_message(&bot, &msg).await;
    };

    debug!(chat_id = %msg.chat.id, stage = ?session.stage, "Received message");
    advance(&bot, &dialogue, session, event, &config, language_code(&msg)).await?;
    Ok(())
}

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialogue: TriageDialogue,
    session: TriageSession,
    config: Arc<BotConfig>,
) -> Result<()> {
    debug!(chat_id = %msg.chat.id, command = ?cmd, "Received command");

    let event = match cmd {
        Command::Start | Command::Menu => Event::Reset,
        Command::Help => Event::Help,
    };

    advance(&bot, &dialogue, session, event, &config, language_code(&msg)).await?;
    Ok(())
}
