//! Remote LaTeX compile service client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::PreviewQuality;
use crate::utils::error::{PreviewError, PreviewResult};

/// What the compile service answered, before validation.
///
/// The facade only accepts `data` when it is a JSON string.
#[derive(Debug, Clone, PartialEq)]
pub struct RemotePayload {
    pub data: Value,
    /// Quality declared by the service, if any
    pub quality: Option<PreviewQuality>,
}

impl RemotePayload {
    pub fn html(html: impl Into<String>) -> Self {
        Self {
            data: Value::String(html.into()),
            quality: None,
        }
    }

    pub fn with_quality(mut self, quality: PreviewQuality) -> Self {
        self.quality = Some(quality);
        self
    }
}

/// A single compile request to a LaTeX backend.
#[async_trait]
pub trait RemoteCompiler: Send + Sync {
    async fn compile(&self, source: &str) -> PreviewResult<RemotePayload>;
}

#[derive(Debug, Serialize)]
struct CompileRequest<'a> {
    latex_content: &'a str,
    quality: PreviewQuality,
}

#[derive(Debug, Deserialize)]
struct CompileResponse {
    #[serde(default)]
    data: Value,
    #[serde(default, alias = "previewQuality", alias = "quality")]
    preview_quality: Option<String>,
}

/// Decode a compile service response body.
///
/// Accepts either a bare JSON string or an object with a `data` field. The
/// declared quality is optional and ignored when unrecognized or `fallback`.
pub fn parse_compile_response(body: &str) -> PreviewResult<RemotePayload> {
    let value: Value = serde_json::from_str(body)?;
    match value {
        Value::String(_) => Ok(RemotePayload {
            data: value,
            quality: None,
        }),
        Value::Object(_) => {
            let response: CompileResponse = serde_json::from_value(value)?;
            Ok(RemotePayload {
                data: response.data,
                quality: response
                    .preview_quality
                    .and_then(|q| q.parse::<PreviewQuality>().ok())
                    .filter(|q| q.is_remote()),
            })
        }
        other => Err(PreviewError::malformed(format!(
            "expected object or string, got {}",
            json_kind(&other)
        ))),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(feature = "remote")]
pub use http_client::HttpRemoteCompiler;

#[cfg(feature = "remote")]
mod http_client {
    use std::time::Duration;

    use async_trait::async_trait;
    use reqwest::{Client, Url};
    use tracing::debug;

    use super::{parse_compile_response, CompileRequest, RemoteCompiler, RemotePayload};
    use crate::compiler::config::PreviewConfig;
    use crate::compiler::types::PreviewQuality;
    use crate::utils::error::{PreviewError, PreviewResult};

    /// Compile service reached over HTTP: `POST {endpoint}` with
    /// `{"latex_content": ..., "quality": ...}`.
    #[derive(Debug, Clone)]
    pub struct HttpRemoteCompiler {
        client: Client,
        endpoint: Url,
        api_token: Option<String>,
        quality: PreviewQuality,
    }

    impl HttpRemoteCompiler {
        pub fn new(endpoint: &str) -> PreviewResult<Self> {
            Self::build(endpoint, None)
        }

        pub fn from_config(config: &PreviewConfig) -> PreviewResult<Self> {
            let endpoint = config
                .endpoint
                .as_deref()
                .ok_or_else(|| PreviewError::config("no compile endpoint configured"))?;
            let timeout = config.timeout_secs.map(Duration::from_secs);
            let quality = config.quality.requestable()?;
            let compiler = Self::build(endpoint, timeout)?.with_quality(quality);
            Ok(match config.api_token.clone() {
                Some(token) => compiler.with_token(token),
                None => compiler,
            })
        }

        fn build(endpoint: &str, timeout: Option<Duration>) -> PreviewResult<Self> {
            let endpoint = Url::parse(endpoint).map_err(|e| {
                PreviewError::config(format!("invalid endpoint '{}': {}", endpoint, e))
            })?;
            let mut builder = Client::builder();
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
            Ok(Self {
                client: builder.build()?,
                endpoint,
                api_token: None,
                quality: PreviewQuality::Fast,
            })
        }

        pub fn with_token(mut self, token: impl Into<String>) -> Self {
            self.api_token = Some(token.into());
            self
        }

        pub fn with_quality(mut self, quality: PreviewQuality) -> Self {
            self.quality = quality;
            self
        }

        pub fn endpoint(&self) -> &Url {
            &self.endpoint
        }
    }

    #[async_trait]
    impl RemoteCompiler for HttpRemoteCompiler {
        async fn compile(&self, source: &str) -> PreviewResult<RemotePayload> {
            let mut request = self.client.post(self.endpoint.clone()).json(&CompileRequest {
                latex_content: source,
                quality: self.quality,
            });
            if let Some(token) = &self.api_token {
                request = request.bearer_auth(token);
            }

            let response = request.send().await?;
            let status = response.status();
            debug!(endpoint = %self.endpoint, status = status.as_u16(), "compile response");
            if !status.is_success() {
                return Err(PreviewError::status(status.as_u16()));
            }
            let body = response.text().await?;
            parse_compile_response(&body)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_rejects_invalid_endpoint() {
            let err = HttpRemoteCompiler::new("not a url").unwrap_err();
            assert!(matches!(err, PreviewError::Config { .. }));
        }

        #[test]
        fn test_from_config_requires_endpoint() {
            let err = HttpRemoteCompiler::from_config(&PreviewConfig::default()).unwrap_err();
            assert!(err.to_string().contains("no compile endpoint"));
        }

        #[test]
        fn test_from_config_rejects_fallback_quality() {
            let config = PreviewConfig {
                endpoint: Some("http://localhost:8080/compile".to_string()),
                quality: PreviewQuality::Fallback,
                ..PreviewConfig::default()
            };
            let err = HttpRemoteCompiler::from_config(&config).unwrap_err();
            assert!(matches!(err, PreviewError::Config { .. }));
        }

        #[test]
        fn test_from_config() {
            let config = PreviewConfig {
                endpoint: Some("http://localhost:8080/api/latex/compile".to_string()),
                quality: PreviewQuality::Accurate,
                timeout_secs: Some(30),
                ..PreviewConfig::default()
            };
            let compiler = HttpRemoteCompiler::from_config(&config).unwrap();
            assert_eq!(compiler.endpoint().path(), "/api/latex/compile");
            assert_eq!(compiler.quality, PreviewQuality::Accurate);
        }
    }
}
