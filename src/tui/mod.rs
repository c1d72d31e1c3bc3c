//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard/mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! ```text
//! poll input ──► Editor / Navbar hit test ──► update(app, action) ──► Effect
//!     ▲                                                                  │
//!     │              spawned compile task ◄── SpawnCompile ◄─────────────┘
//!     │                      │
//!     └──── mpsc<Action> ◄───┘  CompileFinished { seq, result }
//! ```
//!
//! Redraws happen only after input, resize or a background action. While a
//! compile is pending the loop polls more often so the result shows promptly.

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::execute;

use crate::compile::{CompileBackend, HttpBackend};
use crate::core::action::{Action, Effect, update};
use crate::core::artifact::PdfArtifact;
use crate::core::config::ResolvedConfig;
use crate::core::document;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{Editor, EditorEvent, PreviewState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub editor: Editor,
    pub preview: PreviewState,
}

impl TuiState {
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            editor: Editor::new(config.tab_width, &config.theme),
            preview: PreviewState::new(),
        }
    }

    pub fn with_source(config: &ResolvedConfig, source: String) -> Self {
        Self {
            editor: Editor::with_text(config.tab_width, &config.theme, source),
            preview: PreviewState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is harmlessly ignored by terminals without it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBar,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Leaves raw mode and the alternate screen on every exit path, `?` included.
struct RestoreGuard;

impl Drop for RestoreGuard {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

/// Build the HTTP backend from a resolved config.
pub fn build_backend(config: &ResolvedConfig) -> std::io::Result<Arc<dyn CompileBackend>> {
    let backend = HttpBackend::new(&config.server_url, &config.compile_path, config.timeout)
        .map_err(std::io::Error::other)?;
    info!("Compiling via {}", backend.endpoint());
    Ok(Arc::new(backend))
}

pub fn run(config: ResolvedConfig, file: Option<PathBuf>) -> std::io::Result<()> {
    let backend = build_backend(&config)?;
    let mut app = App::from_config(backend, &config);

    let (initial_source, line_ending) = match &file {
        Some(path) => document::load_source(path)?.unwrap_or_default(),
        None => Default::default(),
    };
    app.source = initial_source.clone();
    app.line_ending = line_ending;
    app.document_path = file;
    let mut tui = TuiState::with_source(&config, initial_source);

    let mut terminal = ratatui::init();
    let _restore_guard = RestoreGuard;
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if app.is_compiling() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let action = match event {
                TuiEvent::Resize => continue,
                TuiEvent::Quit => Some(Action::Quit),
                TuiEvent::Save => Some(Action::SaveRequested),
                TuiEvent::ExportPdf => Some(Action::ExportRequested),
                TuiEvent::MouseClick(column, row) => {
                    let frame_area = terminal.get_frame().area();
                    ui::hit_compile_button(column, row, frame_area)
                        .then_some(Action::CompileRequested)
                }
                other => match tui.editor.handle_event(&other) {
                    Some(EditorEvent::ContentChanged) => {
                        Some(Action::SourceChanged(tui.editor.buffer.clone()))
                    }
                    Some(EditorEvent::Compile) => Some(Action::CompileRequested),
                    Some(EditorEvent::CursorMoved) | None => None,
                },
            };

            if let Some(action) = action
                && dispatch(&mut app, action, &tx)
            {
                break 'main;
            }
        }

        // Handle background task actions (compile results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, action, &tx) {
                break 'main;
            }
        }
    }

    Ok(())
}

/// Run one action through the reducer and perform its effect.
/// Returns `true` when the app should quit.
fn dispatch(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::None => false,
        Effect::Quit => true,
        Effect::SpawnCompile { seq, latex } => {
            spawn_compile(app.backend.clone(), seq, latex, tx.clone());
            false
        }
        Effect::SaveSource(path) => {
            let result = document::save_source(&path, &app.source, app.line_ending)
                .map(|()| path)
                .map_err(|e| e.to_string());
            dispatch(app, Action::SourceSaved(result), tx)
        }
        Effect::ExportPdf => {
            let result = export_current_pdf(app);
            dispatch(app, Action::PdfExported(result), tx)
        }
    }
}

fn export_current_pdf(app: &App) -> Result<PathBuf, String> {
    let encoded = app.compiled_pdf.as_deref().ok_or("nothing to export yet")?;
    let artifact = PdfArtifact::decode(encoded).map_err(|e| e.to_string())?;
    let path = document::export_pdf(&artifact, &app.export_dir).map_err(|e| e.to_string())?;
    if let Some(viewer) = &app.viewer {
        open_viewer(viewer, &path);
    }
    Ok(path)
}

fn open_viewer(viewer: &str, path: &Path) {
    if let Err(e) = document::open_in_viewer(viewer, path) {
        warn!("Failed to launch viewer '{}': {}", viewer, e);
    }
}

fn spawn_compile(
    backend: Arc<dyn CompileBackend>,
    seq: u64,
    latex: String,
    tx: mpsc::Sender<Action>,
) {
    info!(
        "Spawning compile #{} via {} ({} bytes)",
        seq,
        backend.name(),
        latex.len()
    );
    tokio::spawn(async move {
        let result = backend.compile(&latex).await;
        if tx.send(Action::CompileFinished { seq, result }).is_err() {
            warn!("Failed to deliver compile #{} result: receiver dropped", seq);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::CompileError;
    use crate::test_support::StubBackend;

    #[tokio::test]
    async fn test_compile_round_trip_through_dispatch() {
        let stub = Arc::new(StubBackend::succeeding("JVBERi0xLjQK"));
        let mut app = App::new(stub.clone());
        let (tx, rx) = mpsc::channel();

        dispatch(&mut app, Action::SourceChanged("\\documentclass{article}".into()), &tx);
        assert!(!dispatch(&mut app, Action::CompileRequested, &tx));
        assert_eq!(app.status_message, "Compiling...");

        let finished = tokio::task::spawn_blocking(move || rx.recv().unwrap())
            .await
            .unwrap();
        dispatch(&mut app, finished, &tx);

        assert_eq!(app.status_message, "Compilation successful!");
        assert_eq!(app.compiled_pdf.as_deref(), Some("JVBERi0xLjQK"));
        assert_eq!(
            *stub.received.lock().unwrap(),
            vec!["\\documentclass{article}".to_string()]
        );
    }

    #[tokio::test]
    async fn test_failed_compile_through_dispatch() {
        let stub = Arc::new(StubBackend::failing(CompileError::Network(
            "Failed to fetch".into(),
        )));
        let mut app = App::new(stub);
        app.compiled_pdf = Some("previous".into());
        let (tx, rx) = mpsc::channel();

        dispatch(&mut app, Action::CompileRequested, &tx);
        let finished = tokio::task::spawn_blocking(move || rx.recv().unwrap())
            .await
            .unwrap();
        dispatch(&mut app, finished, &tx);

        assert_eq!(app.status_message, "Error: Failed to fetch");
        assert_eq!(app.compiled_pdf.as_deref(), Some("previous"));
    }

    #[test]
    fn test_save_effect_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.tex");
        let mut app = crate::test_support::test_app();
        app.document_path = Some(path.clone());
        let (tx, _rx) = mpsc::channel();

        dispatch(&mut app, Action::SourceChanged("\\title{T}".into()), &tx);
        dispatch(&mut app, Action::SaveRequested, &tx);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "\\title{T}");
        assert!(!app.dirty);
        assert!(app.status_message.starts_with("Saved "));
    }

    #[test]
    fn test_restore_guard_drops_cleanly_without_raw_mode() {
        // Restoring a terminal that was never switched is a no-op
        let guard = RestoreGuard;
        drop(guard);
    }

    #[test]
    fn test_save_effect_keeps_crlf_line_endings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("win.tex");
        std::fs::write(&path, "ab\r\ncd").unwrap();
        let (source, line_ending) = document::load_source(&path).unwrap().unwrap();

        let mut app = crate::test_support::test_app();
        app.source = source.clone();
        app.line_ending = line_ending;
        app.document_path = Some(path.clone());
        let mut editor = Editor::with_text(4, crate::core::config::DEFAULT_THEME, source);
        let (tx, _rx) = mpsc::channel();

        editor.handle_event(&TuiEvent::CursorEnd);
        editor.handle_event(&TuiEvent::InputChar('X'));
        dispatch(&mut app, Action::SourceChanged(editor.buffer.clone()), &tx);
        dispatch(&mut app, Action::SaveRequested, &tx);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "abX\r\ncd");
    }

    #[test]
    fn test_export_effect_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = crate::test_support::test_app();
        app.export_dir = dir.path().to_path_buf();
        app.compiled_pdf = Some("JVBERi0xLjQK".into());
        let (tx, _rx) = mpsc::channel();

        dispatch(&mut app, Action::ExportRequested, &tx);

        assert!(app.status_message.starts_with("Exported PDF to "));
        let exported: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(exported.len(), 1);
    }

    #[test]
    fn test_export_of_corrupt_artifact_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = crate::test_support::test_app();
        app.export_dir = dir.path().to_path_buf();
        app.compiled_pdf = Some("aGVsbG8=".into());
        let (tx, _rx) = mpsc::channel();

        dispatch(&mut app, Action::ExportRequested, &tx);

        assert_eq!(app.status_message, "Error: payload is not a PDF document");
    }
}
