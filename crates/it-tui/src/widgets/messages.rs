//! Message display widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use crate::theme::Theme;

/// Widget for rendering the most recent tracker messages
pub struct MessagesWidget<'a> {
    messages: Vec<&'a str>,
    theme: &'a Theme,
}

impl<'a> MessagesWidget<'a> {
    pub fn new(messages: Vec<&'a str>, theme: &'a Theme) -> Self {
        Self { messages, theme }
    }
}

impl Widget for MessagesWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let paragraph = Paragraph::new(self.messages.join("  "))
            .style(Style::default().fg(self.theme.text))
            .block(Block::default().borders(Borders::TOP))
            .wrap(Wrap { trim: true });

        paragraph.render(area, buf);
    }
}
