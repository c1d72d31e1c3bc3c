//! # StatusBar Component
//!
//! Bottom line echoing the status message verbatim. No state, no logic.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct StatusBar {
    pub status: String,
}

impl StatusBar {
    pub fn new(status: String) -> Self {
        Self { status }
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default().bg(Color::Gray).fg(Color::Black);
        frame.render_widget(Paragraph::new(self.status.as_str()).style(style), area);
    }
}
