//! Input handling - convert key events to commands
//!
//! Only the bindings of the main screen live here. Keys typed into the
//! intake form, the condition prompt and reorder mode are handled in app.rs.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use it_core::Phase;

/// Main-screen command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    OpenIntake,
    StartCombat,
    NextTurn,
    EndCombat,
    ExportLog,
    EditConditions,
    Grab,
    CursorUp,
    CursorDown,
    Help,
    Quit,
}

/// Convert a key event to a command.
///
/// Combat controls are only bound in the phase where they apply, the same
/// way the buttons for them are only shown in that phase.
pub fn key_to_command(key: KeyEvent, phase: Phase) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    let command = match key.code {
        KeyCode::Char('a') => Command::OpenIntake,
        KeyCode::Up | KeyCode::Char('k') => Command::CursorUp,
        KeyCode::Down | KeyCode::Char('j') => Command::CursorDown,
        KeyCode::Char('?') => Command::Help,
        KeyCode::Char('q') => Command::Quit,

        KeyCode::Char('s') if phase == Phase::Setup => Command::StartCombat,

        KeyCode::Char('n') | KeyCode::Char(' ') if phase == Phase::Active => Command::NextTurn,
        KeyCode::Char('e') if phase == Phase::Active => Command::EndCombat,
        KeyCode::Char('x') if phase == Phase::Active => Command::ExportLog,
        KeyCode::Char('c') if phase == Phase::Active => Command::EditConditions,
        KeyCode::Char('m') if phase == Phase::Active => Command::Grab,

        _ => return None,
    };
    Some(command)
}

/// Key hints for the footer line
pub fn hints(phase: Phase) -> &'static str {
    match phase {
        Phase::Setup => "a add  s start combat  ? help  q quit",
        Phase::Active => {
            "n next turn  c conditions  m move  x export log  e end combat  a add  ? help  q quit"
        }
    }
}
