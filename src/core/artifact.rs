//! Decoding and inspecting the compiled PDF payload.
//!
//! The backend ships the PDF as standard base64. We decode it once per
//! compile and pull out the few facts the preview shows: version, page
//! count, size. Actual page rasterisation is left to an external viewer.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug)]
pub enum ArtifactError {
    InvalidBase64(base64::DecodeError),
    NotPdf,
}

impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactError::InvalidBase64(e) => write!(f, "payload is not valid base64: {e}"),
            ArtifactError::NotPdf => write!(f, "payload is not a PDF document"),
        }
    }
}

impl std::error::Error for ArtifactError {}

/// A decoded PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfArtifact {
    bytes: Vec<u8>,
}

impl PdfArtifact {
    /// Decode a base64 payload. ASCII whitespace (line-wrapped base64) is ignored.
    pub fn decode(encoded: &str) -> Result<Self, ArtifactError> {
        let compact: String = encoded
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let bytes = STANDARD
            .decode(compact.as_bytes())
            .map_err(ArtifactError::InvalidBase64)?;

        if !bytes.starts_with(PDF_MAGIC) {
            return Err(ArtifactError::NotPdf);
        }
        Ok(Self { bytes })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Header version, e.g. `"1.4"` for `%PDF-1.4`.
    pub fn version(&self) -> Option<&str> {
        let rest = &self.bytes[PDF_MAGIC.len()..];
        let end = rest
            .iter()
            .position(|b| !(b.is_ascii_digit() || *b == b'.'))
            .unwrap_or(rest.len());
        std::str::from_utf8(&rest[..end])
            .ok()
            .filter(|v| !v.is_empty())
    }

    /// Number of `/Type /Page` objects (not `/Pages`). Objects inside
    /// compressed object streams aren't visible to this scan, so the
    /// count is a lower bound.
    pub fn page_count(&self) -> usize {
        let mut count = 0;
        let mut rest = self.bytes.as_slice();
        while let Some(idx) = find(rest, b"/Type") {
            rest = &rest[idx + b"/Type".len()..];
            let value = trim_pdf_whitespace(rest);
            if let Some(after) = value.strip_prefix(b"/Page")
                && !after.first().is_some_and(|b| b.is_ascii_alphanumeric())
            {
                count += 1;
            }
        }
        count
    }

    /// Human-readable size, e.g. `"12.3 KiB"`.
    pub fn size_label(&self) -> String {
        let len = self.len() as f64;
        if len < 1024.0 {
            format!("{} B", self.len())
        } else if len < 1024.0 * 1024.0 {
            format!("{:.1} KiB", len / 1024.0)
        } else {
            format!("{:.1} MiB", len / (1024.0 * 1024.0))
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn trim_pdf_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'\x0c' | b'\0'))
        .unwrap_or(bytes.len());
    &bytes[start..]
}
