//! Drives the app with synthetic key presses and renders to a test backend.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use it_core::{IdRng, MemorySink, MemoryStorage, Outcome, Phase, RosterStore, Tracker};
use it_tui::{App, IntakeField, Theme, UiMode};

type TestApp = App<MemoryStorage, MemorySink>;

// ============================================================================
// Helpers
// ============================================================================

fn new_app() -> TestApp {
    let roster = RosterStore::with_ids(MemoryStorage::new(), IdRng::new(21));
    App::new(Tracker::new(roster), MemorySink::default(), Theme::dark())
}

/// Feed one key press, executing any resulting intent
fn press(app: &mut TestApp, code: KeyCode) -> Option<Outcome> {
    let event = Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
    app.handle_event(event).map(|intent| app.execute(intent))
}

fn type_text(app: &mut TestApp, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Add a combatant through the intake form
fn add(app: &mut TestApp, name: &str, player: &str, initiative: &str) -> Option<Outcome> {
    if !matches!(app.mode(), UiMode::Intake(_)) {
        press(app, KeyCode::Char('a'));
    }
    type_text(app, name);
    press(app, KeyCode::Tab);
    type_text(app, player);
    press(app, KeyCode::Tab);
    type_text(app, initiative);
    let outcome = press(app, KeyCode::Enter);
    press(app, KeyCode::Esc);
    outcome
}

fn screen(app: &mut TestApp) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    let buffer = terminal.backend().buffer();
    let area = buffer.area;
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn party() -> TestApp {
    let mut app = new_app();
    add(&mut app, "Aria", "P1", "15");
    add(&mut app, "Goblin", "enemy", "8");
    add(&mut app, "Bram", "P2", "15");
    app
}

// ============================================================================
// Intake
// ============================================================================

#[test]
fn test_intake_adds_and_clears_form() {
    let mut app = new_app();
    let outcome = add(&mut app, "Aria", "P1", "15");
    assert!(matches!(outcome, Some(Outcome::Added(_))));
    assert_eq!(app.tracker().roster().len(), 1);
    assert_eq!(app.mode(), &UiMode::Normal);
}

#[test]
fn test_form_cleared_after_add_but_kept_open() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "Aria");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "P1");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "12");
    press(&mut app, KeyCode::Enter);

    let UiMode::Intake(state) = app.mode() else {
        panic!("expected intake form to stay open");
    };
    assert!(state.name.is_empty() && state.player.is_empty() && state.initiative.is_empty());
    assert_eq!(state.field, IntakeField::Name);
}

#[test]
fn test_incomplete_intake_is_silently_ignored() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "Aria");
    let outcome = press(&mut app, KeyCode::Enter);

    assert!(matches!(outcome, Some(Outcome::Rejected(_))));
    assert!(app.tracker().roster().is_empty());
    assert!(app.tracker().last_message().is_none());
    // Typed text survives the rejected submit
    let UiMode::Intake(state) = app.mode() else {
        panic!("expected intake form");
    };
    assert_eq!(state.name, "Aria");
}

#[test]
fn test_condition_selector_sets_starting_condition() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "Aria");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "P1");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "9");
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.tracker().roster().combatants()[0].conditions, vec!["Charmed"]);
}

// ============================================================================
// Combat
// ============================================================================

#[test]
fn test_start_next_end() {
    let mut app = party();

    assert!(matches!(press(&mut app, KeyCode::Char('s')), Some(Outcome::Started { combatants: 3 })));
    assert_eq!(app.tracker().phase(), Phase::Active);

    for _ in 0..3 {
        press(&mut app, KeyCode::Char('n'));
    }
    assert_eq!(app.tracker().engine().round(), 2);
    assert_eq!(app.tracker().engine().turn_index(), 0);

    assert_eq!(press(&mut app, KeyCode::Char('e')), Some(Outcome::Ended));
    assert_eq!(app.tracker().phase(), Phase::Setup);
    assert_eq!(app.tracker().roster().len(), 3);
}

#[test]
fn test_combat_keys_ignored_in_setup() {
    let mut app = party();
    assert_eq!(press(&mut app, KeyCode::Char('n')), None);
    assert_eq!(press(&mut app, KeyCode::Char('x')), None);
    assert!(app.sink().files.is_empty());
}

#[test]
fn test_edit_conditions_prompt() {
    let mut app = party();
    press(&mut app, KeyCode::Char('s'));
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char('c'));
    assert!(matches!(app.mode(), UiMode::EditConditions { .. }));

    type_text(&mut app, "Prone, Stunned");
    let outcome = press(&mut app, KeyCode::Enter);

    assert_eq!(outcome, Some(Outcome::ConditionsEdited));
    assert_eq!(app.tracker().engine().order()[1].conditions, vec!["Prone", "Stunned"]);
    assert!(app.tracker().roster().combatants().iter().all(|c| c.conditions.is_empty()));
}

#[test]
fn test_cancelled_condition_prompt_changes_nothing() {
    let mut app = party();
    press(&mut app, KeyCode::Char('s'));
    press(&mut app, KeyCode::Char('c'));
    type_text(&mut app, "Prone");
    let outcome = press(&mut app, KeyCode::Esc);

    assert_eq!(outcome, Some(Outcome::Ignored));
    assert!(app.tracker().engine().order()[0].conditions.is_empty());
    assert_eq!(app.mode(), &UiMode::Normal);
}

#[test]
fn test_grab_and_drop_reorders() {
    let mut app = party();
    press(&mut app, KeyCode::Char('s'));

    // Order is Aria, Bram, Goblin; move Goblin to the top
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char('m'));
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Up);
    let outcome = press(&mut app, KeyCode::Enter);

    assert_eq!(outcome, Some(Outcome::Reordered));
    let names: Vec<_> = app.tracker().engine().order().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Goblin", "Aria", "Bram"]);
}

#[test]
fn test_drop_on_self_is_noop() {
    let mut app = party();
    press(&mut app, KeyCode::Char('s'));
    press(&mut app, KeyCode::Char('m'));
    assert_eq!(press(&mut app, KeyCode::Enter), Some(Outcome::Ignored));
}

#[test]
fn test_export_delivers_log() {
    let mut app = party();
    press(&mut app, KeyCode::Char('s'));
    let outcome = press(&mut app, KeyCode::Char('x'));

    assert!(matches!(outcome, Some(Outcome::Exported(_))));
    assert_eq!(app.sink().files[0].0, "combat-log.json");
}

#[test]
fn test_quit() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit());
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_setup_screen_shows_roster() {
    let mut app = party();
    let text = screen(&mut app);
    assert!(text.contains("Roster"));
    assert!(text.contains("Aria (P1)"));
    assert!(text.contains("Goblin (enemy)"));
    assert!(text.contains("s start combat"));
}

#[test]
fn test_combat_screen_marks_active_and_round() {
    let mut app = party();
    press(&mut app, KeyCode::Char('s'));
    for _ in 0..3 {
        press(&mut app, KeyCode::Char('n'));
    }

    let text = screen(&mut app);
    assert!(text.contains("Turn Order"));
    assert!(text.contains("▶ Aria"));
    assert!(text.contains("Round 2"));
    assert!(text.contains("n next turn"));
}

#[test]
fn test_intake_overlay_rendered() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('a'));
    let text = screen(&mut app);
    assert!(text.contains("Add Combatant"));
    assert!(text.contains("Initiative Roll"));
}

#[test]
fn test_empty_roster_placeholder() {
    let mut app = new_app();
    assert!(screen(&mut app).contains("No combatants yet"));
}
