use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Navbar, Preview, StatusBar};

/// Screen regions, shared by drawing and mouse hit testing.
pub struct ScreenLayout {
    pub navbar: Rect,
    pub editor: Rect,
    pub preview: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        use Constraint::{Length, Min, Percentage};
        let [navbar, main, status] = Layout::vertical([Length(1), Min(0), Length(1)]).areas(area);
        let [editor, preview] =
            Layout::horizontal([Percentage(50), Percentage(50)]).areas(main);
        Self {
            navbar,
            editor,
            preview,
            status,
        }
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let layout = ScreenLayout::new(frame.area());

    Navbar::new(app.is_compiling()).render(frame, layout.navbar);

    tui.editor.title = editor_title(app);
    tui.editor.render(frame, layout.editor);

    Preview::new(
        app.compiled_pdf.as_deref(),
        app.artifact_revision,
        &mut tui.preview,
    )
    .render(frame, layout.preview);

    StatusBar::new(app.status_message.clone()).render(frame, layout.status);
}

/// Hit test: does a click at (`column`, `row`) land on the compile button?
pub fn hit_compile_button(column: u16, row: u16, frame_area: Rect) -> bool {
    let layout = ScreenLayout::new(frame_area);
    Navbar::hit_button(layout.navbar, column, row)
}

fn editor_title(app: &App) -> String {
    let name = app.document_name().unwrap_or_else(|| "untitled".to_string());
    if app.dirty {
        format!("Editor: {name} [+]")
    } else {
        format!("Editor: {name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::path::PathBuf;

    fn screen_text(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                draw_ui(f, app, tui);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_draw_ui_initial_screen() {
        let app = test_app();
        let mut tui = TuiState::new(&crate::core::config::resolve(&Default::default(), None));
        let text = screen_text(&app, &mut tui);

        assert!(text.contains("LaTeX IDE"));
        assert!(text.contains("[ Compile ]"));
        assert!(text.contains("Editor: untitled"));
        assert!(text.contains("Compiled PDF will appear here"));
    }

    #[test]
    fn test_draw_ui_after_success() {
        let mut app = test_app();
        app.compiled_pdf = Some("JVBERi0xLjQK".to_string());
        app.artifact_revision = 1;
        app.status_message = "Compilation successful!".to_string();
        app.document_path = Some(PathBuf::from("paper.tex"));
        app.dirty = true;
        let mut tui = TuiState::new(&crate::core::config::resolve(&Default::default(), None));

        let text = screen_text(&app, &mut tui);

        assert!(text.contains("Editor: paper.tex [+]"));
        assert!(text.contains("Page 1 of 1"));
        assert!(text.contains("Compilation successful!"));
        assert!(!text.contains("Compiled PDF will appear here"));
    }

    #[test]
    fn test_compile_button_hit_test() {
        let area = Rect::new(0, 0, 100, 20);
        assert!(hit_compile_button(95, 0, area));
        assert!(!hit_compile_button(10, 0, area));
        assert!(!hit_compile_button(95, 5, area));
    }
}
