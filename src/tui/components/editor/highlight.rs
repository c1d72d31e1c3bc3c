//! LaTeX syntax highlighting for the editor, via syntect.
//!
//! Highlighting is stateful across lines, so the whole buffer is processed
//! top to bottom. The result is cached per buffer revision; cursor movement
//! and redraws reuse it.

use std::sync::LazyLock;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::core::config::DEFAULT_THEME;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

pub(super) struct LatexHighlighter {
    theme: String,
    cache: Option<(u64, Vec<Line<'static>>)>,
}

impl LatexHighlighter {
    pub fn new(theme: &str) -> Self {
        if !THEME_SET.themes.contains_key(theme) {
            log::warn!("Unknown theme '{}', falling back to {}", theme, DEFAULT_THEME);
        }
        Self {
            theme: theme.to_string(),
            cache: None,
        }
    }

    /// Highlighted lines for `buffer`, recomputed only when `revision` changes.
    pub fn lines(&mut self, buffer: &str, revision: u64, tab_width: usize) -> &[Line<'static>] {
        let stale = self
            .cache
            .as_ref()
            .is_none_or(|(cached, _)| *cached != revision);
        if stale {
            self.cache = Some((revision, highlight(buffer, self.theme(), tab_width)));
        }
        self.cache.as_ref().map(|(_, lines)| lines.as_slice()).unwrap_or(&[])
    }

    fn theme(&self) -> Option<&'static Theme> {
        THEME_SET
            .themes
            .get(&self.theme)
            .or_else(|| THEME_SET.themes.get(DEFAULT_THEME))
    }
}

fn expand_tabs(text: &str, tab_width: usize) -> String {
    if text.contains('\t') {
        text.replace('\t', &" ".repeat(tab_width))
    } else {
        text.to_string()
    }
}

fn plain(buffer: &str, tab_width: usize) -> Vec<Line<'static>> {
    buffer
        .split('\n')
        .map(|line| Line::raw(expand_tabs(line.trim_end_matches('\r'), tab_width)))
        .collect()
}

fn highlight(buffer: &str, theme: Option<&'static Theme>, tab_width: usize) -> Vec<Line<'static>> {
    let syntax = SYNTAX_SET.find_syntax_by_extension("tex");
    let (Some(syntax), Some(theme)) = (syntax, theme) else {
        return plain(buffer, tab_width);
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();
    for line in LinesWithEndings::from(buffer) {
        match highlighter.highlight_line(line, &SYNTAX_SET) {
            Ok(ranges) => {
                let spans: Vec<Span<'static>> = ranges
                    .into_iter()
                    .filter_map(|(hl_style, frag)| {
                        let content =
                            expand_tabs(frag.trim_end_matches(['\n', '\r']), tab_width);
                        if content.is_empty() {
                            return None;
                        }
                        let fg = Color::Rgb(
                            hl_style.foreground.r,
                            hl_style.foreground.g,
                            hl_style.foreground.b,
                        );
                        Some(Span::styled(content, Style::default().fg(fg)))
                    })
                    .collect();
                lines.push(Line::from(spans));
            }
            Err(e) => {
                log::debug!("Highlighting failed, falling back to plain text: {}", e);
                return plain(buffer, tab_width);
            }
        }
    }
    // LinesWithEndings drops the empty line after a trailing newline
    if buffer.ends_with('\n') {
        lines.push(Line::default());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_highlight_preserves_text_and_line_count() {
        let source = "\\documentclass{article}\n\n\\begin{document}\n\tHello $x^2$\n\\end{document}\n";
        let mut highlighter = LatexHighlighter::new(DEFAULT_THEME);

        let lines = highlighter.lines(source, 1, 2);

        assert_eq!(lines.len(), source.split('\n').count());
        assert_eq!(line_text(&lines[0]), "\\documentclass{article}");
        assert_eq!(line_text(&lines[1]), "");
        assert_eq!(line_text(&lines[3]), "  Hello $x^2$");
    }

    #[test]
    fn test_unknown_theme_still_highlights() {
        let mut highlighter = LatexHighlighter::new("no-such-theme");
        let lines = highlighter.lines("\\section{A}", 1, 4);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "\\section{A}");
    }

    #[test]
    fn test_cache_is_keyed_on_revision() {
        let mut highlighter = LatexHighlighter::new(DEFAULT_THEME);
        assert_eq!(highlighter.lines("a", 1, 4).len(), 1);
        // Same revision: stale text is served from cache
        assert_eq!(highlighter.lines("a\nb", 1, 4).len(), 1);
        assert_eq!(highlighter.lines("a\nb", 2, 4).len(), 2);
    }

    #[test]
    fn test_plain_fallback_splits_lines() {
        let lines = plain("x\r\n\ty", 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "x");
        assert_eq!(line_text(&lines[1]), "  y");
    }
}
