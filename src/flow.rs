//! # Triage Flow Module
//!
//! Pure state machine behind the bot. Incoming updates are classified into an
//! [`Event`], then [`transition`] walks an ordered rule table (stage-scoped
//! rules first, global rules after) and returns the next session together
//! with the [`Reply`] the bot should send. No Telegram I/O happens here.

use tracing::debug;

use crate::actions::{CallTarget, Coordinates};
use crate::dialogue::{validate_address, validate_problem, Stage, TriageSession};
use crate::localization::t_lang;

pub const CALLBACK_SEVERE: &str = "health:severe";
pub const CALLBACK_MILD: &str = "health:mild";

/// Something the user did, already stripped of Telegram details
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// `/start`, `/menu`, the menu button or the back button
    Reset,
    /// The health button in the main menu
    Health,
    Help,
    Language,
    ManualAddress,
    Urgency { severe: bool },
    Location(Coordinates),
    Call(CallTarget),
    Text(String),
}

impl Event {
    /// Classify a plain text message, matching reserved menu labels first
    pub fn from_text(text: &str, language_code: Option<&str>) -> Self {
        let trimmed = text.trim();
        let is_label = |key: &str| trimmed == t_lang(key, language_code);

        if is_label("menu-home") || is_label("button-back") {
            Event::Reset
        } else if is_label("menu-health") {
            Event::Health
        } else if is_label("menu-language") {
            Event::Language
        } else if is_label("button-manual-address") {
            Event::ManualAddress
        } else {
            Event::Text(text.to_string())
        }
    }

    /// Classify inline keyboard callback data
    pub fn from_callback_data(data: &str) -> Option<Self> {
        match data {
            CALLBACK_SEVERE => Some(Event::Urgency { severe: true }),
            CALLBACK_MILD => Some(Event::Urgency { severe: false }),
            other => CallTarget::from_callback_data(other).map(Event::Call),
        }
    }
}

/// What the bot should answer after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Welcome,
    AskProblem,
    Help,
    LanguageStub,
    AskUrgency,
    AskLocation,
    AskAddress,
    /// Complaint text was over the length limit
    ProblemTooLong,
    AddressTooLong,
    /// A location or address arrived before any complaint
    NeedProblemFirst,
    /// Render results from the returned session
    Results,
    RevealPhone(CallTarget),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub session: TriageSession,
    pub reply: Reply,
}

impl Transition {
    fn new(session: TriageSession, reply: Reply) -> Self {
        Self { session, reply }
    }
}

struct Rule {
    name: &'static str,
    matches: fn(&TriageSession, &Event) -> bool,
    apply: fn(TriageSession, Event) -> Transition,
}

static RULES: &[Rule] = &[
    Rule {
        name: "address_text",
        matches: is_address_text,
        apply: store_address,
    },
    Rule {
        name: "manual_address",
        matches: is_manual_address_in_location_stage,
        apply: ask_address,
    },
    Rule {
        name: "reset",
        matches: is_reset,
        apply: reset,
    },
    Rule {
        name: "help",
        matches: is_help,
        apply: help,
    },
    Rule {
        name: "language",
        matches: is_language,
        apply: language,
    },
    Rule {
        name: "urgency",
        matches: is_urgency,
        apply: store_urgency,
    },
    Rule {
        name: "location",
        matches: is_location,
        apply: store_location,
    },
    Rule {
        name: "manual_address_reentry",
        matches: is_manual_address,
        apply: reenter_address,
    },
    Rule {
        name: "call",
        matches: is_call,
        apply: reveal_phone,
    },
    Rule {
        name: "describe_problem",
        matches: is_text,
        apply: store_problem,
    },
];

/// Advance the session by one event
pub fn transition(session: TriageSession, event: Event) -> Transition {
    match RULES.iter().find(|rule| (rule.matches)(&session, &event)) {
        Some(rule) => {
            debug!(rule = rule.name, stage = ?session.stage, "Applying flow rule");
            (rule.apply)(session, event)
        }
        // Every event variant is covered by a global rule; keep the session as is.
        None => Transition::new(session, Reply::AskProblem),
    }
}

fn is_address_text(session: &TriageSession, event: &Event) -> bool {
    session.stage == Stage::AwaitingAddress && matches!(event, Event::Text(_))
}

fn is_manual_address_in_location_stage(session: &TriageSession, event: &Event) -> bool {
    session.stage == Stage::AwaitingLocation && matches!(event, Event::ManualAddress)
}

fn is_reset(_: &TriageSession, event: &Event) -> bool {
    matches!(event, Event::Reset | Event::Health)
}

fn is_help(_: &TriageSession, event: &Event) -> bool {
    matches!(event, Event::Help)
}

fn is_language(_: &TriageSession, event: &Event) -> bool {
    matches!(event, Event::Language)
}

fn is_urgency(_: &TriageSession, event: &Event) -> bool {
    matches!(event, Event::Urgency { .. })
}

fn is_location(_: &TriageSession, event: &Event) -> bool {
    matches!(event, Event::Location(_))
}

fn is_manual_address(_: &TriageSession, event: &Event) -> bool {
    matches!(event, Event::ManualAddress)
}

fn is_call(_: &TriageSession, event: &Event) -> bool {
    matches!(event, Event::Call(_))
}

fn is_text(_: &TriageSession, event: &Event) -> bool {
    matches!(event, Event::Text(_))
}

fn need_problem_first() -> Transition {
    Transition::new(TriageSession::default(), Reply::NeedProblemFirst)
}

fn store_address(mut session: TriageSession, event: Event) -> Transition {
    if !session.has_problem() {
        return need_problem_first();
    }

    let Event::Text(text) = event else {
        return Transition::new(session, Reply::AskAddress);
    };

    match validate_address(&text) {
        Ok(address) => {
            session.address = Some(address);
            session.coordinates = None;
            Transition::new(session.with_stage(Stage::AwaitingProblem), Reply::Results)
        }
        Err("too_long") => Transition::new(session, Reply::AddressTooLong),
        Err(_) => Transition::new(session, Reply::AskAddress),
    }
}

fn ask_address(session: TriageSession, _: Event) -> Transition {
    Transition::new(session.with_stage(Stage::AwaitingAddress), Reply::AskAddress)
}

fn reset(_: TriageSession, event: Event) -> Transition {
    let reply = match event {
        Event::Health => Reply::AskProblem,
        _ => Reply::Welcome,
    };
    Transition::new(TriageSession::default(), reply)
}

fn help(session: TriageSession, _: Event) -> Transition {
    Transition::new(session, Reply::Help)
}

fn language(session: TriageSession, _: Event) -> Transition {
    Transition::new(session, Reply::LanguageStub)
}

fn store_urgency(mut session: TriageSession, event: Event) -> Transition {
    if let Event::Urgency { severe } = event {
        session.severe = Some(severe);
    }
    Transition::new(session.with_stage(Stage::AwaitingLocation), Reply::AskLocation)
}

fn store_location(mut session: TriageSession, event: Event) -> Transition {
    if !session.has_problem() {
        return need_problem_first();
    }

    if let Event::Location(coordinates) = event {
        session.coordinates = Some(coordinates);
        session.address = None;
    }
    Transition::new(session.with_stage(Stage::AwaitingProblem), Reply::Results)
}

fn reenter_address(session: TriageSession, event: Event) -> Transition {
    if !session.has_problem() {
        return need_problem_first();
    }
    ask_address(session, event)
}

fn reveal_phone(session: TriageSession, event: Event) -> Transition {
    match event {
        Event::Call(target) => Transition::new(session, Reply::RevealPhone(target)),
        _ => Transition::new(session, Reply::AskProblem),
    }
}

fn store_problem(mut session: TriageSession, event: Event) -> Transition {
    let Event::Text(text) = event else {
        return Transition::new(session, Reply::AskProblem);
    };

    match validate_problem(&text) {
        Ok(problem) => {
            session.problem = Some(problem);
            Transition::new(session.with_stage(Stage::AwaitingUrgency), Reply::AskUrgency)
        }
        Err("too_long") => {
            Transition::new(session.with_stage(Stage::AwaitingProblem), Reply::ProblemTooLong)
        }
        Err(_) => Transition::new(session.with_stage(Stage::AwaitingProblem), Reply::AskProblem),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Event {
        Event::Text(s.to_string())
    }

    #[test]
    fn test_menu_labels_are_not_problems() {
        assert_eq!(Event::from_text("🩺 Самочувствие", None), Event::Health);
        assert_eq!(Event::from_text("⬅️ Назад", None), Event::Reset);
        assert_eq!(Event::from_text("🏠 Меню", None), Event::Reset);
        assert_eq!(Event::from_text("🌍 Язык", None), Event::Language);
        assert_eq!(
            Event::from_text("✍️ Ввести адрес вручную", None),
            Event::ManualAddress
        );
        assert_eq!(Event::from_text("болит зуб", None), text("болит зуб"));
    }

    #[test]
    fn test_callback_classification() {
        assert_eq!(
            Event::from_callback_data("health:severe"),
            Some(Event::Urgency { severe: true })
        );
        assert_eq!(
            Event::from_callback_data("call:clinic"),
            Some(Event::Call(CallTarget::Clinic))
        );
        assert_eq!(Event::from_callback_data("todo:taxi"), None);
    }

    #[test]
    fn test_problem_text_moves_to_urgency() {
        let t = transition(TriageSession::default(), text("болит живот"));
        assert_eq!(t.reply, Reply::AskUrgency);
        assert_eq!(t.session.stage, Stage::AwaitingUrgency);
        assert_eq!(t.session.problem.as_deref(), Some("болит живот"));
    }

    #[test]
    fn test_blank_text_asks_again() {
        let t = transition(TriageSession::default(), text("   "));
        assert_eq!(t.reply, Reply::AskProblem);
        assert_eq!(t.session.stage, Stage::AwaitingProblem);
    }

    #[test]
    fn test_oversized_text_is_not_stored() {
        let t = transition(TriageSession::default(), text(&"а".repeat(4096)));
        assert_eq!(t.reply, Reply::ProblemTooLong);
        assert!(!t.session.has_problem());

        let mut session = transition(TriageSession::default(), text("болит ухо")).session;
        session.stage = Stage::AwaitingAddress;
        let t = transition(session.clone(), text(&"a".repeat(4096)));
        assert_eq!(t.reply, Reply::AddressTooLong);
        assert_eq!(t.session, session);
    }

    #[test]
    fn test_help_keeps_session() {
        let session = transition(TriageSession::default(), text("кашель")).session;
        let t = transition(session.clone(), Event::Help);
        assert_eq!(t.reply, Reply::Help);
        assert_eq!(t.session, session);
    }
}
