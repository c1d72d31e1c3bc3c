//! # Preview Component
//!
//! Shows the compiled document, or a placeholder before the first success.
//!
//! ## Architecture
//!
//! `Preview` is a transient component (created each frame) wrapping the
//! base64 payload (prop) and `&'a mut PreviewState` (persistent cache).
//! Decoding happens once per artifact revision, not once per frame.
//!
//! A terminal can't rasterise PDF pages, so page 1 is presented as a card
//! with what we can read from the file. Ctrl+E hands the real document to an
//! external viewer.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::artifact::{ArtifactError, PdfArtifact};
use crate::tui::component::Component;

pub const PLACEHOLDER: &str = "Compiled PDF will appear here";

/// Decoded-artifact cache. Must be persisted in the parent TuiState.
#[derive(Default)]
pub struct PreviewState {
    decoded: Option<(u64, Result<PdfArtifact, ArtifactError>)>,
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `pdf` unless `revision` is already cached.
    fn artifact(&mut self, pdf: &str, revision: u64) -> &Result<PdfArtifact, ArtifactError> {
        let stale = self
            .decoded
            .as_ref()
            .is_some_and(|(cached, _)| *cached != revision);
        if stale {
            self.decoded = None;
        }

        let (_, result) = self.decoded.get_or_insert_with(|| {
            let result = PdfArtifact::decode(pdf);
            if let Err(e) = &result {
                log::warn!("Preview cannot decode artifact #{}: {}", revision, e);
            }
            (revision, result)
        });
        result
    }
}

pub struct Preview<'a> {
    pub pdf: Option<&'a str>,
    pub revision: u64,
    pub state: &'a mut PreviewState,
}

impl<'a> Preview<'a> {
    pub fn new(pdf: Option<&'a str>, revision: u64, state: &'a mut PreviewState) -> Self {
        Self {
            pdf,
            revision,
            state,
        }
    }
}

fn page_card(artifact: &PdfArtifact) -> Vec<Line<'static>> {
    let pages = artifact.page_count().max(1);
    let dim = Style::default().fg(Color::DarkGray);
    vec![
        Line::from(Span::styled(
            format!("Page 1 of {pages}"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("PDF ", dim),
            Span::raw(artifact.version().unwrap_or("?").to_string()),
        ]),
        Line::from(vec![Span::styled("Size ", dim), Span::raw(artifact.size_label())]),
        Line::default(),
        Line::from(Span::styled("Ctrl+E to export and open", dim)),
    ]
}

fn failure_card(error: &ArtifactError) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "Unable to render PDF",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(error.to_string()),
    ]
}

impl Component for Preview<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Preview");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = match self.pdf {
            None => vec![Line::from(PLACEHOLDER)],
            Some(pdf) => match self.state.artifact(pdf, self.revision) {
                Ok(artifact) => page_card(artifact),
                Err(e) => failure_card(e),
            },
        };

        // Vertically centre the card
        let height = lines.len() as u16;
        let [_, body, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .areas(inner);

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, body);
    }
}
