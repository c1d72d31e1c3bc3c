//! HTTP implementation of [`CompileBackend`].
//!
//! One POST per compile, no retries. Status handling is unified: an `error`
//! field in the body always wins (so a 500 carrying a LaTeX log is reported
//! as that log), then non-2xx statuses, then the `pdf` field.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::{CompileBackend, CompileError, CompileRequest, CompileResponse, CompiledPdf};

pub struct HttpBackend {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// `base_url` like `http://localhost:8080`, `compile_path` like `/compile`.
    /// `timeout` of `None` means a hung backend leaves the request pending forever.
    pub fn new(
        base_url: &str,
        compile_path: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            endpoint: join_endpoint(base_url, compile_path),
            client: builder.build()?,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn join_endpoint(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

#[async_trait]
impl CompileBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn compile(&self, latex: &str) -> Result<CompiledPdf, CompileError> {
        info!("POST {} ({} bytes of source)", self.endpoint, latex.len());

        let response = self
            .client
            .post(&self.endpoint)
            .json(&CompileRequest { latex })
            .send()
            .await
            .map_err(|e| CompileError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Compile response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| CompileError::Network(e.to_string()))?;

        let parsed: CompileResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) if !status.is_success() => {
                warn!("Compile failed with HTTP {} and a non-JSON body: {}", status, e);
                return Err(CompileError::Api {
                    status: status.as_u16(),
                });
            }
            Err(e) => {
                warn!("Compile response was not valid JSON: {}", e);
                return Err(CompileError::Parse(e.to_string()));
            }
        };

        if let Some(message) = parsed.error_message() {
            warn!("Backend reported compile error (HTTP {}): {}", status, message);
            return Err(CompileError::Backend(message.to_string()));
        }

        if !status.is_success() {
            warn!("Compile failed with HTTP {} and no error message", status);
            return Err(CompileError::Api {
                status: status.as_u16(),
            });
        }

        let pdf = parsed.pdf.ok_or(CompileError::MissingPdf)?;
        if let Some(url) = &parsed.download_url {
            debug!("Backend also offers the PDF at {}", url);
        }
        info!("Compile succeeded: {} bytes of base64", pdf.len());

        Ok(CompiledPdf {
            pdf,
            download_url: parsed.download_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_endpoint_normalizes_slashes() {
        assert_eq!(
            join_endpoint("http://localhost:8080", "/compile"),
            "http://localhost:8080/compile"
        );
        assert_eq!(
            join_endpoint("http://localhost:8080/", "compile"),
            "http://localhost:8080/compile"
        );
        assert_eq!(
            join_endpoint("http://host/api/", "/v1/compile"),
            "http://host/api/v1/compile"
        );
    }

    #[test]
    fn test_new_with_timeout() {
        let backend =
            HttpBackend::new("http://localhost:8080", "/compile", Some(Duration::from_secs(5)))
                .unwrap();
        assert_eq!(backend.endpoint(), "http://localhost:8080/compile");
        assert_eq!(backend.name(), "http");
    }
}
