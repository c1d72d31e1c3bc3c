pub mod backend;
pub mod error;
pub mod http;
pub mod types;

pub use backend::CompileBackend;
pub use error::CompileError;
pub use http::HttpBackend;
pub use types::{CompileRequest, CompileResponse, CompiledPdf};
