//! # Actions
//!
//! Everything that can happen in Texide becomes an `Action`.
//! User presses F5? That's `Action::CompileRequested`.
//! Backend responds? That's `Action::CompileFinished { seq, result }`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing any I/O the caller must perform.
//! No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Overlapping compiles
//!
//! Each compile gets a sequence number. A response is applied only if it
//! belongs to the newest request issued; older ones are dropped, so a slow
//! stale response can never overwrite a fresher result.

use std::path::PathBuf;

use log::{debug, info, warn};

use crate::compile::{CompileError, CompiledPdf};
use crate::core::state::App;

pub const STATUS_COMPILING: &str = "Compiling...";
pub const STATUS_SUCCESS: &str = "Compilation successful!";

#[derive(Debug)]
pub enum Action {
    /// The editor's text changed. Carries the full buffer.
    SourceChanged(String),
    /// Any compile trigger: navbar button or editor shortcut.
    CompileRequested,
    /// A spawned compile finished.
    CompileFinished {
        seq: u64,
        result: Result<CompiledPdf, CompileError>,
    },
    SaveRequested,
    SourceSaved(Result<PathBuf, String>),
    ExportRequested,
    PdfExported(Result<PathBuf, String>),
    Quit,
}

/// I/O the event loop must perform after an `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    SpawnCompile { seq: u64, latex: String },
    SaveSource(PathBuf),
    ExportPdf,
}

fn error_status(message: &str) -> String {
    format!("Error: {message}")
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SourceChanged(text) => {
            if text != app.source {
                app.source = text;
                app.dirty = true;
            }
            Effect::None
        }
        Action::CompileRequested => {
            app.latest_request += 1;
            let seq = app.latest_request;
            if let Some(previous) = app.pending_request.replace(seq) {
                debug!("Compile #{} supersedes in-flight #{}", seq, previous);
            }
            app.status_message = STATUS_COMPILING.to_string();
            Effect::SpawnCompile {
                seq,
                latex: app.source.clone(),
            }
        }
        Action::CompileFinished { seq, result } => {
            if seq != app.latest_request {
                debug!(
                    "Discarding stale compile response #{} (latest is #{})",
                    seq, app.latest_request
                );
                return Effect::None;
            }
            app.pending_request = None;
            match result {
                Ok(compiled) => {
                    info!("Compile #{} succeeded", seq);
                    app.compiled_pdf = Some(compiled.pdf);
                    app.artifact_revision += 1;
                    app.status_message = STATUS_SUCCESS.to_string();
                }
                Err(e) => {
                    warn!("Compile #{} failed: {}", seq, e);
                    app.status_message = error_status(&e.user_message());
                }
            }
            Effect::None
        }
        Action::SaveRequested => match &app.document_path {
            Some(path) => Effect::SaveSource(path.clone()),
            None => {
                app.status_message = error_status("no file to save to (start texide with a path)");
                Effect::None
            }
        },
        Action::SourceSaved(result) => {
            match result {
                Ok(path) => {
                    app.dirty = false;
                    app.status_message = format!("Saved {}", path.display());
                }
                Err(e) => app.status_message = error_status(&e),
            }
            Effect::None
        }
        Action::ExportRequested => {
            if app.compiled_pdf.is_some() {
                Effect::ExportPdf
            } else {
                app.status_message = error_status("nothing to export yet");
                Effect::None
            }
        }
        Action::PdfExported(result) => {
            app.status_message = match result {
                Ok(path) => format!("Exported PDF to {}", path.display()),
                Err(e) => error_status(&e),
            };
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
