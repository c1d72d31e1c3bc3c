use async_trait::async_trait;

use super::error::CompileError;
use super::types::CompiledPdf;

/// Something that turns LaTeX source into a PDF.
///
/// The real implementation talks HTTP ([`super::HttpBackend`]); tests swap in
/// a stub so the reducer and UI can be exercised without a server.
#[async_trait]
pub trait CompileBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Compile `latex` and return the base64-encoded PDF.
    async fn compile(&self, latex: &str) -> Result<CompiledPdf, CompileError>;
}
