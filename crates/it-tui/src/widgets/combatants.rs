//! Combatant list widget
//!
//! Draws either the roster (setup) or the turn order (combat). The active
//! marker is tied to a position in the list, not to a combatant.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use it_core::{Combatant, CombatantId};

use crate::theme::Theme;

/// Widget listing combatants with their conditions
pub struct CombatantListWidget<'a> {
    entries: &'a [Combatant],
    title: &'a str,
    theme: &'a Theme,
    active: Option<usize>,
    cursor: Option<usize>,
    grabbed: Option<&'a CombatantId>,
}

impl<'a> CombatantListWidget<'a> {
    pub fn new(entries: &'a [Combatant], title: &'a str, theme: &'a Theme) -> Self {
        Self {
            entries,
            title,
            theme,
            active: None,
            cursor: None,
            grabbed: None,
        }
    }

    pub fn active(mut self, index: Option<usize>) -> Self {
        self.active = index;
        self
    }

    pub fn cursor(mut self, index: Option<usize>) -> Self {
        self.cursor = index;
        self
    }

    pub fn grabbed(mut self, id: Option<&'a CombatantId>) -> Self {
        self.grabbed = id;
        self
    }

    /// Format one entry as a styled line
    pub fn format_entry(&self, index: usize, c: &Combatant) -> Line<'a> {
        let theme = self.theme;
        let is_active = self.active == Some(index);
        let is_grabbed = self.grabbed == Some(&c.id);

        let marker = if is_active { "▶ " } else { "  " };
        let mut name_style = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);
        if is_active {
            name_style = name_style.fg(theme.active);
        }
        if is_grabbed {
            name_style = name_style.fg(theme.grabbed).add_modifier(Modifier::ITALIC);
        }
        let player_style = if c.is_adversary() {
            Style::default().fg(theme.adversary)
        } else {
            Style::default().fg(theme.text_dim)
        };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(theme.active)),
            Span::styled(c.name.clone(), name_style),
            Span::styled(format!(" ({})", c.player), player_style),
            Span::styled(
                format!("  Initiative: {}", c.initiative),
                Style::default().fg(theme.text_muted),
            ),
        ];
        let badge = Style::default().fg(theme.condition_fg).bg(theme.condition_bg);
        for condition in &c.conditions {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!(" {} ", condition), badge));
        }

        let mut line = Line::from(spans);
        if self.cursor == Some(index) {
            line = line.style(Style::default().bg(theme.cursor_bg));
        }
        line
    }
}

impl Widget for CombatantListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border));

        let text = if self.entries.is_empty() {
            Text::from(Line::styled(
                "No combatants yet. Press a to add one.",
                Style::default().fg(self.theme.text_muted),
            ))
        } else {
            Text::from(
                self.entries
                    .iter()
                    .enumerate()
                    .map(|(i, c)| self.format_entry(i, c))
                    .collect::<Vec<_>>(),
            )
        };

        Paragraph::new(text).block(block).render(area, buf);
    }
}
