//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, warn};

use crate::config::BotConfig;
use crate::dialogue::{TriageDialogue, TriageSession};
use crate::flow::Event;

use super::dialogue_manager::{advance, Delivery};

/// Handle callback queries from inline keyboards
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    dialogue: TriageDialogue,
    session: TriageSession,
    config: Arc<BotConfig>,
) -> Result<()> {
    let data = q.data.as_deref().unwrap_or("");
    debug!(user_id = %q.from.id, data, "Received callback query from user");

    let outcome = match Event::from_callback_data(data) {
        Some(event) => {
            let language_code = q.from.language_code.as_deref();
            advance(&bot, &dialogue, session, event, &config, language_code).await
        }
        None => {
            // Buttons from older keyboards
            debug!(user_id = %q.from.id, data, "Ignoring unknown callback data");
            Ok(Delivery::Sent)
        }
    };

    // Answer the callback query to remove the loading state, even when handling failed
    let answer = bot.answer_callback_query(q.id.clone());
    let answered = match callback_alert(&outcome) {
        Some(text) => answer.text(text).show_alert(true).await,
        None => answer.await,
    };

    if let Err(e) = &outcome {
        warn!(user_id = %q.from.id, data, error = %e, "Failed to handle callback query");
    }
    outcome?;
    answered?;

    Ok(())
}

/// Alert text for the callback answer; anything else gets a plain answer
pub fn callback_alert(outcome: &Result<Delivery>) -> Option<&str> {
    match outcome {
        Ok(Delivery::Alert(text)) => Some(text.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_handling_still_gets_plain_answer() {
        let failed: Result<Delivery> = Err(anyhow::anyhow!("chat not found"));
        assert_eq!(callback_alert(&failed), None);
        assert_eq!(callback_alert(&Ok(Delivery::Sent)), None);

        let alert = Ok(Delivery::Alert("Номер не настроен".to_string()));
        assert_eq!(callback_alert(&alert), Some("Номер не настроен"));
    }
}
