//! # Navbar Component
//!
//! Top bar with the application title and the compile button.
//!
//! Stateless: it receives `busy` as a prop and never triggers anything
//! itself. The event loop asks [`Navbar::hit_button`] whether a click landed
//! on the button and dispatches the compile action on the navbar's behalf.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const TITLE: &str = " LaTeX IDE";
const BUTTON_LABEL: &str = "[ Compile ]";

pub struct Navbar {
    /// A compile is in flight; the button is tinted but stays clickable.
    pub busy: bool,
}

impl Navbar {
    pub fn new(busy: bool) -> Self {
        Self { busy }
    }

    /// Where the button sits inside a navbar occupying `area`.
    pub fn button_area(area: Rect) -> Rect {
        let [_, button] = Self::split(area);
        button
    }

    /// Whether a click at (`column`, `row`) hits the compile button.
    pub fn hit_button(area: Rect, column: u16, row: u16) -> bool {
        Self::button_area(area).contains(Position::new(column, row))
    }

    fn split(area: Rect) -> [Rect; 2] {
        // Label plus one column of right margin
        let button_width = BUTTON_LABEL.chars().count() as u16 + 1;
        Layout::horizontal([Constraint::Min(0), Constraint::Length(button_width)]).areas(area)
    }
}

impl Component for Navbar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let bar_style = Style::default().bg(Color::Rgb(31, 41, 55)).fg(Color::White);
        let [title_area, button_area] = Self::split(area);

        let title_style = Style::default().add_modifier(Modifier::BOLD);
        let title = Paragraph::new(Span::styled(TITLE, title_style)).style(bar_style);
        frame.render_widget(title, title_area);

        let button_style = if self.busy {
            bar_style.fg(Color::Yellow)
        } else {
            bar_style.fg(Color::LightBlue).add_modifier(Modifier::BOLD)
        };
        frame.render_widget(Paragraph::new(BUTTON_LABEL).style(button_style), button_area);
    }
}
