//! # Editor Component
//!
//! LaTeX source editor with syntax highlighting.
//!
//! ## Responsibilities
//!
//! - Hold the text buffer and report every change upward (no debouncing)
//! - Handle editing (typing, paste, newline, tab, backspace, delete)
//! - Handle navigation (arrows, home/end, page up/down, mouse wheel)
//! - Raise a compile request on F5 / Ctrl+B
//!
//! ## State Management
//!
//! The buffer is internal state; the parent mirrors it into `App::source` on
//! every `ContentChanged`. The compile shortcut is only an event: the parent
//! runs the one shared compile action, so there is a single status line and
//! a single network path.

mod cursor;
mod highlight;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::document::normalize_newlines;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::{CursorState, line_end, line_start, next_char_boundary, prev_char_boundary};
use highlight::LatexHighlighter;

/// Lines moved per mouse wheel notch.
const SCROLL_LINES: isize = 3;

/// High-level events emitted by the Editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Buffer text changed; parent should sync its copy
    ContentChanged,
    /// Cursor moved without changing text
    CursorMoved,
    /// User asked to compile from inside the editor
    Compile,
}

/// Syntax-aware text area.
///
/// # Props
///
/// - `title`: File name and dirty marker, set by the parent each frame
///
/// # State
///
/// - `buffer`: The LaTeX source
/// - `cursor`: Cursor position and scroll offsets (see `CursorState`)
/// - `highlighter`: Highlighted-line cache keyed on `revision`
pub struct Editor {
    pub buffer: String,
    pub title: String,
    tab_width: usize,
    revision: u64,
    cursor: CursorState,
    highlighter: LatexHighlighter,
}

impl Editor {
    pub fn new(tab_width: usize, theme: &str) -> Self {
        Self {
            buffer: String::new(),
            title: String::from("Editor"),
            tab_width: tab_width.max(1),
            revision: 0,
            cursor: CursorState::new(),
            highlighter: LatexHighlighter::new(theme),
        }
    }

    /// Editor pre-filled with `text`, cursor at the start. Line breaks are
    /// folded to `\n`; cursor motion and deletion assume no `\r` in the buffer.
    pub fn with_text(tab_width: usize, theme: &str, text: String) -> Self {
        let buffer = if text.contains('\r') {
            normalize_newlines(&text)
        } else {
            text
        };
        Self {
            buffer,
            ..Self::new(tab_width, theme)
        }
    }

    /// Byte offset of the cursor.
    pub fn cursor_pos(&self) -> usize {
        self.cursor.pos
    }

    fn insert_str(&mut self, text: &str) -> Option<EditorEvent> {
        if text.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
        self.changed()
    }

    fn changed(&mut self) -> Option<EditorEvent> {
        self.revision += 1;
        Some(EditorEvent::ContentChanged)
    }

    fn move_lines(&mut self, delta: isize) -> Option<EditorEvent> {
        self.cursor
            .move_vertically(&self.buffer, delta, self.tab_width)
            .then_some(EditorEvent::CursorMoved)
    }

    fn page(&self) -> isize {
        self.cursor.viewport_height.max(1) as isize
    }
}

impl Component for Editor {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(self.title.as_str());
        let inner = block.inner(area);

        self.cursor.viewport_width = inner.width;
        self.cursor.viewport_height = inner.height;
        self.cursor.update_scroll(&self.buffer, self.tab_width);

        let lines = self
            .highlighter
            .lines(&self.buffer, self.revision, self.tab_width)
            .to_vec();
        let scroll = (
            u16::try_from(self.cursor.scroll_row).unwrap_or(u16::MAX),
            u16::try_from(self.cursor.scroll_col).unwrap_or(u16::MAX),
        );
        let paragraph = Paragraph::new(lines).block(block).scroll(scroll);
        frame.render_widget(paragraph, area);

        if inner.width > 0 && inner.height > 0 {
            let (x, y) = self.cursor.screen_pos(&self.buffer, inner, self.tab_width);
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for Editor {
    type Event = EditorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut encoded = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut encoded))
            }
            // Terminals deliver pasted line breaks as `\r\n` or bare `\r`
            TuiEvent::Paste(text) => self.insert_str(&normalize_newlines(text)),
            TuiEvent::Newline => self.insert_str("\n"),
            TuiEvent::Tab => self.insert_str(&" ".repeat(self.tab_width)),
            TuiEvent::Backspace => {
                if self.cursor.pos > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(prev..self.cursor.pos);
                    self.cursor.pos = prev;
                    self.changed()
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor.pos < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(self.cursor.pos..next);
                    self.changed()
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                EditorEvent::CursorMoved
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                EditorEvent::CursorMoved
            }),
            TuiEvent::CursorHome => {
                let start = line_start(&self.buffer, self.cursor.pos);
                (self.cursor.pos != start).then(|| {
                    self.cursor.pos = start;
                    EditorEvent::CursorMoved
                })
            }
            TuiEvent::CursorEnd => {
                let end = line_end(&self.buffer, self.cursor.pos);
                (self.cursor.pos != end).then(|| {
                    self.cursor.pos = end;
                    EditorEvent::CursorMoved
                })
            }
            TuiEvent::CursorUp => self.move_lines(-1),
            TuiEvent::CursorDown => self.move_lines(1),
            TuiEvent::PageUp => self.move_lines(-self.page()),
            TuiEvent::PageDown => self.move_lines(self.page()),
            TuiEvent::ScrollUp => self.move_lines(-SCROLL_LINES),
            TuiEvent::ScrollDown => self.move_lines(SCROLL_LINES),
            TuiEvent::Compile => Some(EditorEvent::Compile),
            _ => None,
        }
    }
}
