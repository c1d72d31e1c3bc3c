//! # Documents on Disk
//!
//! Loading/saving the `.tex` source and exporting compiled PDFs.
//!
//! Saves use atomic rename (write `.tmp`, then `rename()`) so a crash never
//! leaves a half-written source file. Exports are named
//! `latex_output_<unix-millis>.pdf`, matching the backend's download names.
//!
//! The editor only ever sees `\n` line breaks. A file that arrives with
//! `\r\n` is normalised on load and written back with `\r\n` on save.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use chrono::Utc;
use log::{debug, info, warn};

use crate::core::artifact::PdfArtifact;

/// Line break convention of a source file on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// The first line break decides.
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(i) if text[..i].ends_with('\r') => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }

    /// Convert LF-only text back to this convention.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            LineEnding::Lf => Cow::Borrowed(text),
            LineEnding::CrLf => Cow::Owned(text.replace('\n', "\r\n")),
        }
    }
}

/// Fold `\r\n` and bare `\r` into `\n`.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Read the source file, normalised to `\n` line breaks.
///
/// A missing file is not an error: it yields `None` so the path can still be
/// used as the save target for a new document.
pub fn load_source(path: &Path) -> io::Result<Option<(String, LineEnding)>> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let line_ending = LineEnding::detect(&contents);
            info!(
                "Loaded {} ({} bytes, {:?})",
                path.display(),
                contents.len(),
                line_ending
            );
            Ok(Some((normalize_newlines(&contents), line_ending)))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("{} does not exist yet, starting empty", path.display());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Write the source atomically, restoring the file's line endings.
pub fn save_source(path: &Path, contents: &str, line_ending: LineEnding) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let contents = line_ending.apply(contents);
    fs::write(&tmp, contents.as_bytes())?;
    fs::rename(&tmp, path)?;
    debug!("Saved {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Write the decoded PDF into `dir`, creating it if needed.
pub fn export_pdf(artifact: &PdfArtifact, dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("latex_output_{}.pdf", Utc::now().timestamp_millis()));
    fs::write(&path, artifact.bytes())?;
    info!("Exported {} to {}", artifact.size_label(), path.display());
    Ok(path)
}

/// Launch `viewer` on `path`, detached from the terminal.
///
/// `viewer` may carry arguments (`"zathura --fork"`); it is split on whitespace.
pub fn open_in_viewer(viewer: &str, path: &Path) -> io::Result<()> {
    let mut parts = viewer.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty viewer command"))?;

    let mut child = Command::new(program)
        .args(parts)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    info!("Opened {} with {}", path.display(), program);

    // Reap the viewer when it exits
    thread::spawn(move || match child.wait() {
        Ok(status) => debug!("Viewer exited with {}", status),
        Err(e) => warn!("Failed to wait for viewer: {}", e),
    });
    Ok(())
}
