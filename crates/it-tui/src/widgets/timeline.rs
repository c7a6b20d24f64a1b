//! Round timeline widget

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use crate::theme::Theme;

/// One dot per finished round, then a highlighted dot for the current one
pub struct TimelineWidget<'a> {
    round: u32,
    theme: &'a Theme,
}

impl<'a> TimelineWidget<'a> {
    pub fn new(round: u32, theme: &'a Theme) -> Self {
        Self { round, theme }
    }
}

impl Widget for TimelineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let past = Style::default().fg(self.theme.timeline_past);
        let mut spans: Vec<Span> = (1..self.round).map(|_| Span::styled("● ", past)).collect();
        spans.push(Span::styled(
            "◉",
            Style::default()
                .fg(self.theme.timeline_current)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" Round {}", self.round),
            Style::default().fg(self.theme.text),
        ));

        Line::from(spans).render(area, buf);
    }
}
