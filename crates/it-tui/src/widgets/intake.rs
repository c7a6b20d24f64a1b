//! Intake form widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use strum::IntoEnumIterator;

use crate::app::{IntakeField, IntakeState};
use crate::theme::Theme;

/// Widget for the add-combatant form
pub struct IntakeWidget<'a> {
    state: &'a IntakeState,
    theme: &'a Theme,
}

impl<'a> IntakeWidget<'a> {
    pub fn new(state: &'a IntakeState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for IntakeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let block = Block::default()
            .title(" Add Combatant ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_action));

        let mut lines = Vec::new();
        for field in IntakeField::iter() {
            let focused = field == self.state.field;
            let label_style = if focused {
                Style::default().fg(theme.cursor_fg).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_dim)
            };
            let mut value = self.state.value(field);
            if field == IntakeField::Condition {
                value = format!("◀ {} ▶", value);
            } else if focused {
                value.push('_');
            }
            lines.push(Line::from(vec![
                Span::styled(format!("{:<24}", field.to_string()), label_style),
                Span::styled(value, Style::default().fg(theme.text)),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Tab next field  Enter add  Esc close",
            Style::default().fg(theme.text_dim),
        ));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
