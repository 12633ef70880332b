use anyhow::Result;

use dzivot_viegli::actions::Coordinates;
use dzivot_viegli::dialogue::{validate_problem, Stage, TriageSession};
use dzivot_viegli::specialist::{advice_for, guess_specialist, Specialty};

/// Test dialogue state serialization
#[tokio::test]
async fn test_session_serialization() -> Result<()> {
    let session = TriageSession {
        stage: Stage::AwaitingLocation,
        problem: Some("болит зуб".to_string()),
        severe: Some(true),
        coordinates: Some(Coordinates::new(56.51, 21.01)),
        address: None,
    };

    let json = serde_json::to_string(&session)?;
    let restored: TriageSession = serde_json::from_str(&json)?;
    assert_eq!(restored, session);

    Ok(())
}

/// Test default state
#[test]
fn test_dialogue_default() {
    let session = TriageSession::default();
    assert_eq!(session.stage, Stage::AwaitingProblem);
    assert!(session.problem.is_none());
    assert!(session.severe.is_none());
}

#[test]
fn test_problem_validation() {
    assert!(validate_problem("болит живот").is_ok());
    assert!(validate_problem("").is_err());
    assert!(validate_problem("  \n ").is_err());
}

#[test]
fn test_toothache_scenario() {
    assert_eq!(guess_specialist("болит зуб"), advice_for(Specialty::Dental));
}

#[test]
fn test_red_flags_always_win() {
    let red_flags = ["не могу дышать", "боль в груди", "потерял сознание", "судороги"];
    let others = ["", "болит зуб ", "болит живот, ", "температура и сыпь; "];

    for flag in red_flags {
        for other in others {
            let text = format!("{other}{flag}");
            assert_eq!(
                guess_specialist(&text),
                advice_for(Specialty::RedFlag),
                "text: {text}"
            );
        }
    }
}
