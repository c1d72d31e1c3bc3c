use std::fmt;

/// Everything that can go wrong between pressing compile and holding a PDF.
///
/// Every variant ends up in the status bar as `"Error: " + user_message()`.
/// `Display` adds a category prefix and is meant for the log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Transport failure (connection refused, DNS, timeout, body read).
    Network(String),
    /// The backend answered, but not with the JSON we expect.
    Parse(String),
    /// The backend reported a compilation failure via the `error` field.
    Backend(String),
    /// Non-2xx status with no `error` field in the body.
    Api { status: u16 },
    /// 2xx JSON response that carried neither `pdf` nor `error`.
    MissingPdf,
}

impl CompileError {
    /// The bare message shown to the user after the `"Error: "` prefix.
    pub fn user_message(&self) -> String {
        match self {
            CompileError::Network(msg) | CompileError::Parse(msg) | CompileError::Backend(msg) => {
                msg.clone()
            }
            CompileError::Api { status } => format!("HTTP error! status: {status}"),
            CompileError::MissingPdf => "response did not include a PDF".to_string(),
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Network(msg) => write!(f, "network error: {msg}"),
            CompileError::Parse(msg) => write!(f, "parse error: {msg}"),
            CompileError::Backend(msg) => write!(f, "backend error: {msg}"),
            CompileError::Api { status } => write!(f, "API error (HTTP {status})"),
            CompileError::MissingPdf => write!(f, "parse error: response did not include a PDF"),
        }
    }
}

impl std::error::Error for CompileError {}
