//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::compile::{CompileBackend, CompileError, CompiledPdf};

/// A backend that answers every compile with the same canned result and
/// remembers the sources it was asked to compile.
pub struct StubBackend {
    result: Result<CompiledPdf, CompileError>,
    pub received: Mutex<Vec<String>>,
}

impl StubBackend {
    pub fn succeeding(pdf: &str) -> Self {
        Self {
            result: Ok(CompiledPdf {
                pdf: pdf.to_string(),
                download_url: None,
            }),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: CompileError) -> Self {
        Self {
            result: Err(error),
            received: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CompileBackend for StubBackend {
    fn name(&self) -> &str {
        "stub"
    }

    async fn compile(&self, latex: &str) -> Result<CompiledPdf, CompileError> {
        if let Ok(mut received) = self.received.lock() {
            received.push(latex.to_string());
        }
        self.result.clone()
    }
}

/// Creates a test App with a StubBackend that returns a one-line PDF.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(StubBackend::succeeding("JVBERi0xLjQK")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_records_sources() {
        let stub = StubBackend::failing(CompileError::Backend("boom".into()));
        let result = tokio_test::block_on(stub.compile("\\LaTeX"));
        assert_eq!(result, Err(CompileError::Backend("boom".into())));
        assert_eq!(*stub.received.lock().unwrap(), vec!["\\LaTeX".to_string()]);
    }
}
