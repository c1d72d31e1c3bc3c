//! Cursor position tracking and navigation for the Editor.
//!
//! `CursorState` owns the cursor byte offset, the scroll offsets and the
//! viewport size from the last render. All navigation methods take
//! `buffer: &str` explicitly; the text is owned by `Editor`.
//!
//! Columns are display columns: wide characters count double and a tab
//! counts as `tab_width`, matching how highlighted lines are drawn.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

/// Display width of `text`, with tabs expanded to `tab_width` columns.
pub(super) fn display_width(text: &str, tab_width: usize) -> usize {
    text.chars().map(|c| char_width(c, tab_width)).sum()
}

fn char_width(c: char, tab_width: usize) -> usize {
    if c == '\t' {
        tab_width
    } else {
        c.width().unwrap_or(0)
    }
}

/// Byte offset where the line containing `pos` starts.
pub(super) fn line_start(buffer: &str, pos: usize) -> usize {
    buffer[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Byte offset where the line containing `pos` ends (excluding the `\n`).
pub(super) fn line_end(buffer: &str, pos: usize) -> usize {
    buffer[pos..]
        .find('\n')
        .map(|i| pos + i)
        .unwrap_or(buffer.len())
}

/// Find the byte offset of the previous character boundary before `pos`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// Cursor and scroll state, separated from the text buffer.
pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible line
    pub scroll_row: usize,
    /// First visible display column
    pub scroll_col: usize,
    /// Inner (border-less) size from the last render
    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;
    const DEFAULT_HEIGHT: u16 = 24;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_row: 0,
            scroll_col: 0,
            viewport_width: Self::DEFAULT_WIDTH,
            viewport_height: Self::DEFAULT_HEIGHT,
        }
    }

    /// Zero-based line index of the cursor.
    pub fn line(&self, buffer: &str) -> usize {
        buffer[..self.pos].matches('\n').count()
    }

    /// Display column of the cursor within its line.
    pub fn column(&self, buffer: &str, tab_width: usize) -> usize {
        display_width(&buffer[line_start(buffer, self.pos)..self.pos], tab_width)
    }

    /// Move the cursor `delta` lines up (negative) or down, keeping its
    /// display column where the target line is long enough.
    ///
    /// Returns `true` if the cursor moved.
    pub fn move_vertically(&mut self, buffer: &str, delta: isize, tab_width: usize) -> bool {
        let current_line = self.line(buffer);
        let last_line = buffer.matches('\n').count();
        let target_line = current_line
            .saturating_add_signed(delta)
            .min(last_line);
        if target_line == current_line {
            return false;
        }

        let column = self.column(buffer, tab_width);

        // Walk to the start of the target line
        let target_start = if target_line == 0 {
            0
        } else {
            buffer
                .match_indices('\n')
                .nth(target_line - 1)
                .map(|(i, _)| i + 1)
                .unwrap_or(buffer.len())
        };
        let target_end = line_end(buffer, target_start);

        // Place the cursor at the same display column, clamped to the line
        let mut offset = target_start;
        let mut width = 0;
        for (i, c) in buffer[target_start..target_end].char_indices() {
            let w = char_width(c, tab_width);
            if width + w > column {
                break;
            }
            width += w;
            offset = target_start + i + c.len_utf8();
        }
        self.pos = offset;
        true
    }

    /// Adjust the scroll offsets so the cursor stays inside the viewport.
    pub fn update_scroll(&mut self, buffer: &str, tab_width: usize) {
        let height = usize::from(self.viewport_height.max(1));
        let width = usize::from(self.viewport_width.max(1));

        let line = self.line(buffer);
        if line < self.scroll_row {
            self.scroll_row = line;
        } else if line >= self.scroll_row + height {
            self.scroll_row = line + 1 - height;
        }

        let column = self.column(buffer, tab_width);
        if column < self.scroll_col {
            self.scroll_col = column;
        } else if column >= self.scroll_col + width {
            self.scroll_col = column + 1 - width;
        }
    }

    /// Screen position for the terminal cursor inside `inner`.
    pub fn screen_pos(&self, buffer: &str, inner: Rect, tab_width: usize) -> (u16, u16) {
        let row = self.line(buffer).saturating_sub(self.scroll_row);
        let col = self.column(buffer, tab_width).saturating_sub(self.scroll_col);
        let x = inner.x.saturating_add(col.min(usize::from(u16::MAX)) as u16);
        let y = inner.y.saturating_add(row.min(usize::from(u16::MAX)) as u16);
        (x, y)
    }
}
