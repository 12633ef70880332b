//! Dialogue Manager module for applying flow transitions and sending replies

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{debug, info};

// Import localization
use crate::localization::{t_args_lang, t_lang};

use crate::actions::{build_actions, resolve_call, CallTarget};
use crate::config::BotConfig;
use crate::dialogue::{TriageDialogue, TriageSession, MAX_ADDRESS_CHARS, MAX_PROBLEM_CHARS};
use crate::flow::{transition, Event, Reply, Transition};
use crate::resources::load_resources;
use crate::specialist::{classify_complaint, guess_specialist};

// Import UI builder functions
use super::ui_builder::{
    actions_keyboard, address_keyboard, format_call_contact, format_results,
    format_urgency_prompt, location_keyboard, main_menu_keyboard, urgency_keyboard,
};

/// How a reply reached the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// Nothing was sent; the callback should be answered with this alert
    Alert(String),
}

/// Run one event through the flow, store the new session and answer the chat
pub async fn advance(
    bot: &Bot,
    dialogue: &TriageDialogue,
    session: TriageSession,
    event: Event,
    config: &BotConfig,
    language_code: Option<&str>,
) -> Result<Delivery> {
    let chat_id = dialogue.chat_id();
    let previous_stage = session.stage;

    let Transition { session, reply } = transition(session, event);
    debug!(
        chat_id = %chat_id,
        from = ?previous_stage,
        to = ?session.stage,
        reply = ?reply,
        "Flow transition"
    );

    dialogue.update(session.clone()).await?;

    send_reply(bot, chat_id, reply, &session, config, language_code).await
}

/// Send the message (and keyboard) that belongs to a reply
pub async fn send_reply(
    bot: &Bot,
    chat_id: ChatId,
    reply: Reply,
    session: &TriageSession,
    config: &BotConfig,
    language_code: Option<&str>,
) -> Result<Delivery> {
    match reply {
        Reply::Welcome => {
            bot.send_message(chat_id, t_lang("welcome", language_code))
                .reply_markup(main_menu_keyboard(language_code))
                .await?;
        }
        Reply::AskProblem => {
            bot.send_message(chat_id, t_lang("ask-problem", language_code))
                .reply_markup(main_menu_keyboard(language_code))
                .await?;
        }
        Reply::Help => {
            bot.send_message(chat_id, t_lang("help", language_code)).await?;
        }
        Reply::LanguageStub => {
            bot.send_message(chat_id, t_lang("language-stub", language_code)).await?;
        }
        Reply::AskUrgency => {
            bot.send_message(chat_id, format_urgency_prompt(session, language_code))
                .reply_markup(urgency_keyboard(language_code))
                .await?;
        }
        Reply::AskLocation => {
            bot.send_message(chat_id, t_lang("ask-location", language_code))
                .reply_markup(location_keyboard(language_code))
                .await?;
        }
        Reply::AskAddress => {
            bot.send_message(chat_id, t_lang("ask-address", language_code))
                .reply_markup(address_keyboard(language_code))
                .await?;
        }
        Reply::ProblemTooLong => {
            let max = MAX_PROBLEM_CHARS.to_string();
            bot.send_message(
                chat_id,
                t_args_lang("problem-too-long", &[("max", &max)], language_code),
            )
            .reply_markup(main_menu_keyboard(language_code))
            .await?;
        }
        Reply::AddressTooLong => {
            let max = MAX_ADDRESS_CHARS.to_string();
            bot.send_message(
                chat_id,
                t_args_lang("address-too-long", &[("max", &max)], language_code),
            )
            .reply_markup(address_keyboard(language_code))
            .await?;
        }
        Reply::NeedProblemFirst => {
            bot.send_message(chat_id, t_lang("need-problem-first", language_code))
                .reply_markup(main_menu_keyboard(language_code))
                .await?;
        }
        Reply::Results => {
            send_results(bot, chat_id, session, config, language_code).await?;
        }
        Reply::RevealPhone(target) => {
            return reveal_phone(bot, chat_id, target, config, language_code).await;
        }
    }

    Ok(Delivery::Sent)
}

/// Render specialist advice, contacts and the action keyboard
async fn send_results(
    bot: &Bot,
    chat_id: ChatId,
    session: &TriageSession,
    config: &BotConfig,
    language_code: Option<&str>,
) -> Result<()> {
    // Read on every render so file edits apply without a restart
    let resources = load_resources(&config.resources_path);
    let problem = session.problem.as_deref().unwrap_or_default();
    let advice = guess_specialist(problem);
    let actions = build_actions(&resources, session.is_severe(), session.coordinates);

    info!(
        chat_id = %chat_id,
        severe = session.is_severe(),
        specialty = ?classify_complaint(problem),
        has_coordinates = session.coordinates.is_some(),
        actions = actions.len(),
        "Sending triage results"
    );

    bot.send_message(
        chat_id,
        format_results(session, &resources, advice, language_code),
    )
    .reply_markup(actions_keyboard(&actions, &resources, language_code))
    .await?;

    bot.send_message(chat_id, t_lang("results-next", language_code))
        .reply_markup(main_menu_keyboard(language_code))
        .await?;

    Ok(())
}

async fn reveal_phone(
    bot: &Bot,
    chat_id: ChatId,
    target: CallTarget,
    config: &BotConfig,
    language_code: Option<&str>,
) -> Result<Delivery> {
    let resources = load_resources(&config.resources_path);

    match resolve_call(&resources, target) {
        Some(contact) => {
            bot.send_message(chat_id, format_call_contact(&contact, language_code)).await?;
            Ok(Delivery::Sent)
        }
        None => {
            info!(chat_id = %chat_id, target = ?target, "Requested phone is not configured");
            Ok(Delivery::Alert(t_lang("call-unavailable", language_code)))
        }
    }
}
