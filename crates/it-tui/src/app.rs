//! Application state and main UI controller

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use strum::{Display, EnumIter, IntoEnumIterator};

use it_core::{
    CombatantId, Condition, ConditionEdit, IntakeForm, Intent, LogSink, Outcome, Phase,
    RosterStorage, Tracker,
};

use crate::input::{Command, hints, key_to_command};
use crate::theme::Theme;
use crate::widgets::{CombatantListWidget, IntakeWidget, MessagesWidget, TimelineWidget};

/// UI mode - what the app is currently displaying/waiting for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiMode {
    /// Main screen
    Normal,
    /// Intake form for a new combatant
    Intake(IntakeState),
    /// Free-text condition prompt for one turn-order entry
    EditConditions { id: CombatantId, input: String },
    /// An entry has been picked up and is waiting to be dropped
    Reorder { grabbed: CombatantId },
    /// Showing help
    Help,
}

/// Field of the intake form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
pub enum IntakeField {
    #[default]
    #[strum(to_string = "Character or Enemy Name")]
    Name,
    #[strum(to_string = "Player Name")]
    Player,
    #[strum(to_string = "Initiative Roll")]
    Initiative,
    #[strum(to_string = "Condition")]
    Condition,
}

/// Contents of the intake form while it is being filled in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeState {
    pub name: String,
    pub player: String,
    pub initiative: String,
    pub condition: Option<Condition>,
    pub field: IntakeField,
}

impl IntakeState {
    pub fn form(&self) -> IntakeForm {
        IntakeForm {
            name: self.name.clone(),
            player: self.player.clone(),
            initiative: self.initiative.clone(),
            condition: self.condition,
        }
    }

    /// Text of a field as shown in the form
    pub fn value(&self, field: IntakeField) -> String {
        match field {
            IntakeField::Name => self.name.clone(),
            IntakeField::Player => self.player.clone(),
            IntakeField::Initiative => self.initiative.clone(),
            IntakeField::Condition => self
                .condition
                .map_or_else(|| "Select condition".to_string(), |c| c.to_string()),
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            IntakeField::Name => Some(&mut self.name),
            IntakeField::Player => Some(&mut self.player),
            IntakeField::Initiative => Some(&mut self.initiative),
            IntakeField::Condition => None,
        }
    }

    /// Type a character into the focused field.
    ///
    /// The initiative field only takes what a numeric input would.
    pub fn push(&mut self, c: char) {
        let numeric = self.field == IntakeField::Initiative;
        if numeric && !(c.is_ascii_digit() || c == '-') {
            return;
        }
        if let Some(text) = self.text_mut() {
            text.push(c);
        }
    }

    pub fn pop(&mut self) {
        if let Some(text) = self.text_mut() {
            text.pop();
        }
    }

    pub fn focus_next(&mut self, forward: bool) {
        let fields: Vec<IntakeField> = IntakeField::iter().collect();
        let i = fields.iter().position(|&f| f == self.field).unwrap_or(0);
        let n = fields.len();
        self.field = fields[if forward { (i + 1) % n } else { (i + n - 1) % n }];
    }

    /// Reset all fields after a successful add
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Application state
pub struct App<S: RosterStorage, L: LogSink> {
    tracker: Tracker<S>,

    /// Where exported logs go
    sink: L,

    should_quit: bool,

    /// Current UI mode
    mode: UiMode,

    /// Selected row of the visible list
    cursor: usize,

    theme: Theme,
}

impl<S: RosterStorage, L: LogSink> App<S, L> {
    pub fn new(tracker: Tracker<S>, sink: L, theme: Theme) -> Self {
        Self {
            tracker,
            sink,
            should_quit: false,
            mode: UiMode::Normal,
            cursor: 0,
            theme,
        }
    }

    pub fn tracker(&self) -> &Tracker<S> {
        &self.tracker
    }

    pub fn sink(&self) -> &L {
        &self.sink
    }

    pub fn mode(&self) -> &UiMode {
        &self.mode
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn selected(&self) -> Option<CombatantId> {
        self.tracker.visible().get(self.cursor).map(|c| c.id.clone())
    }

    fn move_cursor(&mut self, down: bool) {
        let len = self.tracker.visible().len();
        if len == 0 {
            self.cursor = 0;
        } else if down {
            self.cursor = (self.cursor + 1).min(len - 1);
        } else {
            self.cursor = self.cursor.saturating_sub(1);
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.tracker.visible().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Handle input event - returns an intent if one should be executed
    pub fn handle_event(&mut self, event: Event) -> Option<Intent> {
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match &self.mode {
            UiMode::Normal => self.handle_normal_input(key),
            UiMode::Intake(_) => self.handle_intake_input(key),
            UiMode::EditConditions { .. } => self.handle_condition_input(key),
            UiMode::Reorder { .. } => self.handle_reorder_input(key),
            UiMode::Help => {
                self.mode = UiMode::Normal;
                None
            }
        }
    }

    fn handle_normal_input(&mut self, key: KeyEvent) -> Option<Intent> {
        let command = key_to_command(key, self.tracker.phase())?;
        match command {
            Command::OpenIntake => {
                self.mode = UiMode::Intake(IntakeState::default());
                None
            }
            Command::StartCombat => Some(Intent::StartCombat),
            Command::NextTurn => Some(Intent::NextTurn),
            Command::EndCombat => Some(Intent::EndCombat),
            Command::ExportLog => Some(Intent::ExportLog),
            Command::EditConditions => {
                if let Some(id) = self.selected() {
                    self.mode = UiMode::EditConditions {
                        id,
                        input: String::new(),
                    };
                }
                None
            }
            Command::Grab => {
                if let Some(grabbed) = self.selected() {
                    self.mode = UiMode::Reorder { grabbed };
                }
                None
            }
            Command::CursorUp => {
                self.move_cursor(false);
                None
            }
            Command::CursorDown => {
                self.move_cursor(true);
                None
            }
            Command::Help => {
                self.mode = UiMode::Help;
                None
            }
            Command::Quit => {
                self.should_quit = true;
                None
            }
        }
    }

    /// Handle input while the intake form is open
    fn handle_intake_input(&mut self, key: KeyEvent) -> Option<Intent> {
        let UiMode::Intake(state) = &mut self.mode else {
            return None;
        };

        match key.code {
            KeyCode::Esc => {
                self.mode = UiMode::Normal;
                None
            }
            KeyCode::Enter => Some(Intent::Add(state.form())),
            KeyCode::Tab => {
                state.focus_next(true);
                None
            }
            KeyCode::BackTab => {
                state.focus_next(false);
                None
            }
            KeyCode::Left | KeyCode::Right if state.field == IntakeField::Condition => {
                state.condition = Condition::cycle(state.condition, key.code == KeyCode::Right);
                None
            }
            KeyCode::Backspace => {
                state.pop();
                None
            }
            KeyCode::Char(c) => {
                state.push(c);
                None
            }
            _ => None,
        }
    }

    /// Handle input in the condition prompt
    fn handle_condition_input(&mut self, key: KeyEvent) -> Option<Intent> {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                let UiMode::EditConditions { id, input } =
                    std::mem::replace(&mut self.mode, UiMode::Normal)
                else {
                    return None;
                };
                let edit = if key.code == KeyCode::Enter {
                    ConditionEdit::new(id, input)
                } else {
                    ConditionEdit::cancelled(id)
                };
                Some(Intent::EditConditions(edit))
            }
            KeyCode::Backspace => {
                if let UiMode::EditConditions { input, .. } = &mut self.mode {
                    input.pop();
                }
                None
            }
            KeyCode::Char(c) => {
                if let UiMode::EditConditions { input, .. } = &mut self.mode {
                    input.push(c);
                }
                None
            }
            _ => None,
        }
    }

    /// Handle input while an entry is grabbed
    fn handle_reorder_input(&mut self, key: KeyEvent) -> Option<Intent> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(false);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(true);
                None
            }
            KeyCode::Esc => {
                self.mode = UiMode::Normal;
                None
            }
            KeyCode::Enter | KeyCode::Char('m') => {
                let target = self.selected();
                let UiMode::Reorder { grabbed } = std::mem::replace(&mut self.mode, UiMode::Normal)
                else {
                    return None;
                };
                target.map(|to| Intent::Reorder { from: grabbed, to })
            }
            _ => None,
        }
    }

    /// Execute an intent against the tracker
    pub fn execute(&mut self, intent: Intent) -> Outcome {
        let outcome = self.tracker.execute(intent, &mut self.sink);

        match &outcome {
            Outcome::Added(_) | Outcome::Failed(_) => {
                if let UiMode::Intake(state) = &mut self.mode {
                    state.clear();
                }
            }
            Outcome::Started { .. } | Outcome::Ended => self.cursor = 0,
            _ => {}
        }
        self.clamp_cursor();
        outcome
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(1), // Timeline
                Constraint::Min(3),    // Combatants
                Constraint::Length(1), // Key hints
                Constraint::Length(3), // Messages
            ])
            .split(frame.area());

        let title = Paragraph::new("Initiative Tracker").style(
            Style::default()
                .fg(self.theme.header)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(title, chunks[0]);

        let engine = self.tracker.engine();
        frame.render_widget(TimelineWidget::new(engine.round(), &self.theme), chunks[1]);

        let (list_title, active) = match engine.phase() {
            Phase::Setup => (" Roster ", None),
            Phase::Active => (" Turn Order ", Some(engine.turn_index())),
        };
        let entries = self.tracker.visible();
        let grabbed = match &self.mode {
            UiMode::Reorder { grabbed } => Some(grabbed),
            _ => None,
        };
        let list = CombatantListWidget::new(entries, list_title, &self.theme)
            .active(active)
            .cursor((!entries.is_empty()).then_some(self.cursor))
            .grabbed(grabbed);
        frame.render_widget(list, chunks[2]);

        let hint_text = match &self.mode {
            UiMode::Reorder { .. } => "↑/↓ choose slot  Enter drop  Esc cancel",
            _ => hints(engine.phase()),
        };
        let hint = Paragraph::new(hint_text).style(Style::default().fg(self.theme.text_dim));
        frame.render_widget(hint, chunks[3]);

        let recent: Vec<&str> = self.tracker.messages().collect();
        let start = recent.len().saturating_sub(2);
        frame.render_widget(
            MessagesWidget::new(recent[start..].to_vec(), &self.theme),
            chunks[4],
        );

        match self.mode.clone() {
            UiMode::Normal | UiMode::Reorder { .. } => {}
            UiMode::Intake(state) => self.render_intake(frame, &state),
            UiMode::EditConditions { id, input } => self.render_condition_prompt(frame, &id, &input),
            UiMode::Help => self.render_help(frame),
        }
    }

    fn render_intake(&self, frame: &mut Frame, state: &IntakeState) {
        let area = centered_rect(60, 50, frame.area());
        frame.render_widget(Clear, area);
        frame.render_widget(IntakeWidget::new(state, &self.theme), area);
    }

    fn render_condition_prompt(&self, frame: &mut Frame, id: &CombatantId, input: &str) {
        let area = centered_rect(50, 20, frame.area());
        frame.render_widget(Clear, area);

        let name = self
            .tracker
            .engine()
            .order()
            .iter()
            .find(|c| &c.id == id)
            .map_or("combatant", |c| c.name.as_str());
        let block = Block::default()
            .title(format!(" Conditions for {} ", name))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_action));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(inner);

        let line = Line::from(vec![
            Span::styled(format!("{}_", input), Style::default().fg(self.theme.text)),
        ]);
        frame.render_widget(Paragraph::new(line), chunks[0]);

        let help = Paragraph::new("Enter comma-separated conditions. Enter to apply, Esc to cancel.")
            .style(Style::default().fg(self.theme.text_dim))
            .wrap(Wrap { trim: true });
        frame.render_widget(help, chunks[1]);
    }

    fn render_help(&self, frame: &mut Frame) {
        let area = centered_rect(70, 70, frame.area());
        frame.render_widget(Clear, area);

        let help_text = "Setup\n  a  add a combatant (Tab to switch fields, ←/→ pick a condition)\n  s  start combat\n\nCombat\n  n / Space  next turn\n  c  edit conditions of the selected combatant\n  m  move the selected combatant, then ↑/↓ and Enter to drop\n  x  export the round log to combat-log.json\n  e  end combat\n\n  ↑/↓ or j/k  select    ?  help    q  quit\n\nPress any key to close.";

        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.border_accent)),
            )
            .style(Style::default().fg(self.theme.text))
            .alignment(Alignment::Left);
        frame.render_widget(paragraph, area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intake_focus_cycles() {
        let mut state = IntakeState::default();
        assert_eq!(state.field, IntakeField::Name);
        state.focus_next(false);
        assert_eq!(state.field, IntakeField::Condition);
        state.focus_next(true);
        assert_eq!(state.field, IntakeField::Name);
    }

    #[test]
    fn test_initiative_field_is_numeric() {
        let mut state = IntakeState {
            field: IntakeField::Initiative,
            ..Default::default()
        };
        for c in "-1a5".chars() {
            state.push(c);
        }
        assert_eq!(state.initiative, "-15");
    }

    #[test]
    fn test_condition_field_ignores_typing() {
        let mut state = IntakeState {
            field: IntakeField::Condition,
            ..Default::default()
        };
        state.push('x');
        assert_eq!(state.form(), IntakeForm::default());
        assert_eq!(state.value(IntakeField::Condition), "Select condition");
    }

    #[test]
    fn test_field_labels() {
        assert_eq!(IntakeField::Initiative.to_string(), "Initiative Roll");
    }
}
