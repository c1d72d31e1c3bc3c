//! Wire types for the `/compile` endpoint.
//!
//! ```text
//! → POST /compile   {"latex": "..."}
//! ← 200             {"pdf": "<base64>", "downloadUrl": "/download/latex_output_<n>.pdf"}
//! ← 4xx/5xx         {"error": "LaTeX compilation failed: ..."}
//! ```

use serde::{Deserialize, Serialize};

/// Request body. Borrowed so the source isn't cloned just to serialize it.
#[derive(Serialize, Debug)]
pub struct CompileRequest<'a> {
    pub latex: &'a str,
}

/// Response body. Every field is optional; which ones are present decides
/// whether the compile succeeded.
#[derive(Deserialize, Debug, Default)]
pub struct CompileResponse {
    #[serde(default)]
    pub pdf: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, rename = "downloadUrl")]
    pub download_url: Option<String>,
}

impl CompileResponse {
    /// The backend's error message, if it reported one.
    /// An empty string counts as no error.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

/// A successfully compiled document, still base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPdf {
    pub pdf: String,
    pub download_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_latex_field() {
        let body = serde_json::to_value(CompileRequest { latex: "\\section{A}" }).unwrap();
        assert_eq!(body, serde_json::json!({"latex": "\\section{A}"}));
    }

    #[test]
    fn test_response_with_download_url() {
        let resp: CompileResponse = serde_json::from_str(
            r#"{"pdf":"JVBERi0xLjQK","downloadUrl":"/download/latex_output_1.pdf"}"#,
        )
        .unwrap();
        assert_eq!(resp.pdf.as_deref(), Some("JVBERi0xLjQK"));
        assert_eq!(resp.download_url.as_deref(), Some("/download/latex_output_1.pdf"));
        assert!(resp.error_message().is_none());
    }

    #[test]
    fn test_empty_error_is_not_an_error() {
        let resp: CompileResponse = serde_json::from_str(r#"{"error":"","pdf":"x"}"#).unwrap();
        assert!(resp.error_message().is_none());

        let resp: CompileResponse = serde_json::from_str(r#"{"error":null}"#).unwrap();
        assert!(resp.error_message().is_none());
    }
}
