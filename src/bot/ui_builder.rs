//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{
    ButtonRequest, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
};
use tracing::warn;

// Import localization
use crate::localization::{t_args_lang, t_lang};

use crate::actions::{ActionButton, ActionKind, ActionTarget, CallContact, TravelMode};
use crate::dialogue::TriageSession;
use crate::flow::{CALLBACK_MILD, CALLBACK_SEVERE};
use crate::resources::TownResources;

/// Telegram rejects longer message texts
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Cut a message down to what Telegram accepts
pub fn fit_message(text: String) -> String {
    if text.chars().count() <= TELEGRAM_MESSAGE_LIMIT {
        return text;
    }

    warn!(chars = text.chars().count(), "Message over the Telegram limit, truncating");
    let mut fitted: String = text.chars().take(TELEGRAM_MESSAGE_LIMIT - 1).collect();
    fitted.push('…');
    fitted
}

/// Main menu shown after /start and after results
pub fn main_menu_keyboard(language_code: Option<&str>) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(t_lang("menu-health", language_code))],
        vec![KeyboardButton::new(t_lang("menu-language", language_code))],
    ])
    .resize_keyboard()
}

/// Location request with manual address and back options
pub fn location_keyboard(language_code: Option<&str>) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(t_lang("button-share-location", language_code))
            .request(ButtonRequest::Location)],
        vec![KeyboardButton::new(t_lang("button-manual-address", language_code))],
        navigation_row(language_code),
    ])
    .resize_keyboard()
}

pub fn address_keyboard(language_code: Option<&str>) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![navigation_row(language_code)]).resize_keyboard()
}

fn navigation_row(language_code: Option<&str>) -> Vec<KeyboardButton> {
    vec![
        KeyboardButton::new(t_lang("button-back", language_code)),
        KeyboardButton::new(t_lang("menu-home", language_code)),
    ]
}

pub fn urgency_keyboard(language_code: Option<&str>) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback(t_lang("urgency-severe", language_code), CALLBACK_SEVERE),
        InlineKeyboardButton::callback(t_lang("urgency-mild", language_code), CALLBACK_MILD),
    ]])
}

/// Localized label for an action button
pub fn action_label(
    kind: ActionKind,
    resources: &TownResources,
    language_code: Option<&str>,
) -> String {
    match kind {
        ActionKind::EmergencyCall => t_args_lang(
            "action-call-emergency",
            &[("number", resources.emergency_phone().unwrap_or_default())],
            language_code,
        ),
        ActionKind::ClinicCall => t_lang("action-call-clinic", language_code),
        ActionKind::DutyDoctorCall => t_lang("action-call-duty", language_code),
        ActionKind::Route(TravelMode::Walking) => t_lang("action-route-walking", language_code),
        ActionKind::Route(TravelMode::Transit) => t_lang("action-route-transit", language_code),
        ActionKind::Route(TravelMode::Driving) => t_lang("action-route-driving", language_code),
        ActionKind::MapSearch => t_lang("action-map-search", language_code),
        ActionKind::Taxi => t_lang("action-taxi", language_code),
    }
}

fn action_button(
    action: &ActionButton,
    resources: &TownResources,
    language_code: Option<&str>,
) -> Option<InlineKeyboardButton> {
    let label = action_label(action.kind, resources, language_code);

    match &action.target {
        ActionTarget::Deferred(target) => {
            Some(InlineKeyboardButton::callback(label, target.callback_data()))
        }
        ActionTarget::Url(link) => match link.parse() {
            Ok(url) => Some(InlineKeyboardButton::url(label, url)),
            Err(e) => {
                warn!(link = %link, error = %e, "Skipping action with invalid URL");
                None
            }
        },
    }
}

/// Inline keyboard for the action list; route buttons share one row
pub fn actions_keyboard(
    actions: &[ActionButton],
    resources: &TownResources,
    language_code: Option<&str>,
) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = Vec::new();
    let mut previous_was_route = false;

    for action in actions {
        let Some(button) = action_button(action, resources, language_code) else {
            continue;
        };

        let is_route = matches!(action.kind, ActionKind::Route(_));
        if is_route && previous_was_route {
            if let Some(row) = rows.last_mut() {
                row.push(button);
                continue;
            }
        }
        rows.push(vec![button]);
        previous_was_route = is_route;
    }

    InlineKeyboardMarkup::new(rows)
}

/// Urgency question echoing the stored complaint
pub fn format_urgency_prompt(session: &TriageSession, language_code: Option<&str>) -> String {
    let problem = session.problem.as_deref().unwrap_or_default();
    fit_message(t_args_lang("ask-urgency", &[("problem", problem)], language_code))
}

/// Results message text for a finished triage
pub fn format_results(
    session: &TriageSession,
    resources: &TownResources,
    advice: &str,
    language_code: Option<&str>,
) -> String {
    let intro_key = if session.is_severe() {
        "results-intro-severe"
    } else {
        "results-intro-mild"
    };

    let mut lines = vec![t_lang(intro_key, language_code), String::new()];

    if let Some(problem) = session.problem.as_deref() {
        lines.push(t_args_lang(
            "results-problem",
            &[("problem", problem)],
            language_code,
        ));
    }
    lines.push(t_args_lang(
        "results-specialist",
        &[("advice", advice)],
        language_code,
    ));
    lines.push(t_args_lang(
        "results-hospital",
        &[
            ("name", resources.hospital.name.as_str()),
            ("address", resources.hospital.address.as_str()),
        ],
        language_code,
    ));

    if let Some(address) = session.address.as_deref() {
        lines.push(t_args_lang(
            "results-origin-address",
            &[("address", address)],
            language_code,
        ));
    }

    if !session.is_severe() {
        if let Some(doctor) = &resources.duty_doctor {
            if let Some(notes) = doctor.notes.as_deref().filter(|n| !n.trim().is_empty()) {
                lines.push(t_args_lang(
                    "results-duty",
                    &[("name", doctor.name.as_str()), ("notes", notes)],
                    language_code,
                ));
            }
        }
    }

    lines.push(String::new());
    lines.push(t_lang("results-disclaimer", language_code));

    fit_message(lines.join("\n"))
}

/// Text revealing a phone number for a deferred call
pub fn format_call_contact(contact: &CallContact, language_code: Option<&str>) -> String {
    match contact {
        CallContact::Emergency { phone } => {
            t_args_lang("call-emergency", &[("phone", phone.as_str())], language_code)
        }
        CallContact::Named { name, phone } => t_args_lang(
            "call-contact",
            &[("name", name.as_str()), ("phone", phone.as_str())],
            language_code,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{build_actions, Coordinates};
    use crate::flow::{transition, Event, Reply};

    #[test]
    fn test_routes_share_a_row() {
        let resources = TownResources::default();
        let actions = build_actions(&resources, false, Some(Coordinates::new(56.51, 21.01)));
        let keyboard = actions_keyboard(&actions, &resources, None);

        // clinic, three routes, taxi
        let row_sizes: Vec<usize> = keyboard.inline_keyboard.iter().map(Vec::len).collect();
        assert_eq!(row_sizes, vec![1, 3, 1]);
    }

    #[test]
    fn test_emergency_label_uses_configured_number() {
        let label = action_label(ActionKind::EmergencyCall, &TownResources::default(), None);
        assert!(label.contains("113"));
    }

    #[test]
    fn test_results_mention_problem_and_hospital() {
        let session = TriageSession {
            problem: Some("болит зуб".to_string()),
            address: Some("Graudu iela 1".to_string()),
            ..Default::default()
        };
        let text = format_results(&session, &TownResources::default(), "Нужен стоматолог", None);

        assert!(text.contains("болит зуб"));
        assert!(text.contains("Нужен стоматолог"));
        assert!(text.contains("Slimnīcas iela 25"));
        assert!(text.contains("Graudu iela 1"));
    }

    #[test]
    fn test_oversized_complaint_never_exceeds_message_limit() {
        let session = transition(TriageSession::default(), Event::Text("а".repeat(4096))).session;
        let t = transition(session, Event::Location(Coordinates::new(56.51, 21.01)));
        assert_eq!(t.reply, Reply::NeedProblemFirst);

        // longest complaint and address that validation lets through
        let session = TriageSession {
            problem: Some("а".repeat(crate::dialogue::MAX_PROBLEM_CHARS)),
            address: Some("a".repeat(crate::dialogue::MAX_ADDRESS_CHARS)),
            ..Default::default()
        };
        let resources = TownResources::default();
        assert!(format_urgency_prompt(&session, None).chars().count() <= TELEGRAM_MESSAGE_LIMIT);
        let text = format_results(&session, &resources, "Нужен терапевт", None);
        assert!(text.chars().count() <= TELEGRAM_MESSAGE_LIMIT);
        assert!(text.contains(&"а".repeat(crate::dialogue::MAX_PROBLEM_CHARS)));
    }

    #[test]
    fn test_fit_message_truncates_long_text() {
        let fitted = fit_message("ж".repeat(TELEGRAM_MESSAGE_LIMIT + 10));
        assert_eq!(fitted.chars().count(), TELEGRAM_MESSAGE_LIMIT);
        assert!(fitted.ends_with('…'));
        assert_eq!(fit_message("коротко".to_string()), "коротко");
    }

    #[test]
    fn test_location_and_address_keyboards_offer_menu_button() {
        let home = t_lang("menu-home", None);
        for keyboard in [location_keyboard(None), address_keyboard(None)] {
            let labels: Vec<&str> = keyboard
                .keyboard
                .iter()
                .flatten()
                .map(|button| button.text.as_str())
                .collect();
            assert!(labels.contains(&home.as_str()));
        }
        assert_eq!(Event::from_text(&home, None), Event::Reset);
    }
}
