//! # Application State
//!
//! Core business state for Texide. Presentation state (cursor, scroll,
//! highlight caches) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn CompileBackend>  // who compiles
//! ├── source: String                    // LaTeX being edited
//! ├── compiled_pdf: Option<String>      // last good PDF, base64
//! ├── artifact_revision: u64            // bumps when compiled_pdf changes
//! ├── status_message: String            // status bar text
//! ├── latest_request: u64               // seq of newest compile issued
//! ├── pending_request: Option<u64>      // newest compile, until it resolves
//! ├── document_path: Option<PathBuf>    // where Ctrl+S writes
//! ├── line_ending: LineEnding           // restored on save
//! ├── dirty: bool                       // unsaved edits
//! ├── export_dir: PathBuf               // where Ctrl+E writes
//! └── viewer: Option<String>            // external PDF viewer command
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::path::PathBuf;
use std::sync::Arc;

use crate::compile::CompileBackend;
use crate::core::config::ResolvedConfig;
use crate::core::document::LineEnding;

pub struct App {
    pub backend: Arc<dyn CompileBackend>,
    pub source: String,
    pub compiled_pdf: Option<String>,
    pub artifact_revision: u64,
    pub status_message: String,
    pub latest_request: u64,
    pub pending_request: Option<u64>,
    pub document_path: Option<PathBuf>,
    pub line_ending: LineEnding,
    pub dirty: bool,
    pub export_dir: PathBuf,
    pub viewer: Option<String>,
}

impl App {
    pub fn new(backend: Arc<dyn CompileBackend>) -> Self {
        Self {
            backend,
            source: String::new(),
            compiled_pdf: None,
            artifact_revision: 0,
            status_message: String::new(),
            latest_request: 0,
            pending_request: None,
            document_path: None,
            line_ending: LineEnding::default(),
            dirty: false,
            export_dir: PathBuf::from(crate::core::config::DEFAULT_EXPORT_DIR),
            viewer: None,
        }
    }

    pub fn from_config(backend: Arc<dyn CompileBackend>, config: &ResolvedConfig) -> Self {
        Self {
            export_dir: config.export_dir.clone(),
            viewer: config.viewer.clone(),
            ..Self::new(backend)
        }
    }

    /// True while the most recently issued compile has not come back.
    pub fn is_compiling(&self) -> bool {
        self.pending_request.is_some()
    }

    /// File name shown in the editor title, if a document is open.
    pub fn document_name(&self) -> Option<String> {
        self.document_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }
}
