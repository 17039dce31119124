//! Preview compiler facade
//!
//! [`PreviewCompiler::compile_latex`] is the single entry point for preview
//! rendering. It tries the remote compile service once and, on any failure,
//! renders locally with the fallback converter. Callers never see an error:
//! a degraded preview is reported through `metadata.preview_quality`.
//!
//! Results are cached by [`ContentHash`] of the source. Concurrent calls for
//! the same content are not coalesced; both will reach the remote service.

pub mod cache;
pub mod config;
pub mod remote;
pub mod types;

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::core::enhance::HtmlEnhancer;
use crate::core::latex2html::LatexToHtml;
use crate::utils::clock::Clock;
use crate::utils::hash::ContentHash;
use crate::utils::latex_analysis::analyze_source;

pub use cache::{CompilationStore, MemoryStore};
pub use config::{PartialPreviewConfig, PreviewConfig};
pub use remote::{parse_compile_response, RemoteCompiler, RemotePayload};
pub use types::{CompilationMetadata, CompilationResult, PreviewQuality};

#[cfg(feature = "remote")]
pub use remote::HttpRemoteCompiler;

/// Behavior switches for [`PreviewCompiler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Cache fallback renders. When off, content that fell back is retried
    /// against the remote service on the next call.
    pub cache_fallback: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            cache_fallback: true,
        }
    }
}

/// LaTeX preview service: remote compile, local fallback, shared cache.
///
/// A remote answer counts only when it is a non-empty HTML string. The
/// `fallback` quality is reserved for local renders.
pub struct PreviewCompiler {
    remote: Option<Arc<dyn RemoteCompiler>>,
    store: Arc<dyn CompilationStore>,
    converter: LatexToHtml,
    enhancer: HtmlEnhancer,
    options: CompilerOptions,
}

impl PreviewCompiler {
    pub fn new(remote: Arc<dyn RemoteCompiler>) -> Self {
        Self {
            remote: Some(remote),
            ..Self::offline()
        }
    }

    /// Compiler that always renders with the local fallback.
    pub fn offline() -> Self {
        Self {
            remote: None,
            store: Arc::new(MemoryStore::new()),
            converter: LatexToHtml::default(),
            enhancer: HtmlEnhancer::new(),
            options: CompilerOptions::default(),
        }
    }

    /// HTTP-backed compiler, or an offline one when no endpoint is configured.
    #[cfg(feature = "remote")]
    pub fn from_config(config: &PreviewConfig) -> crate::utils::error::PreviewResult<Self> {
        let compiler = match config.endpoint {
            Some(_) => Self::new(Arc::new(HttpRemoteCompiler::from_config(config)?)),
            None => Self::offline(),
        };
        Ok(compiler.with_options(config.compiler_options()))
    }

    pub fn with_store(mut self, store: Arc<dyn CompilationStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.converter = LatexToHtml::new(clock);
        self
    }

    pub fn with_options(mut self, options: CompilerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> CompilerOptions {
        self.options
    }

    pub fn is_offline(&self) -> bool {
        self.remote.is_none()
    }

    /// Render a preview for `source`. Never fails.
    pub async fn compile_latex(&self, source: &str) -> CompilationResult {
        let key = ContentHash::of(source);
        if let Some(hit) = self.store.get(key) {
            debug!(%key, "preview cache hit");
            return hit;
        }
        debug!(%key, bytes = source.len(), "preview cache miss");

        let result = match self.compile_remote(source).await {
            Some(result) => result,
            None => self.compile_fallback(source),
        };

        if !result.is_fallback() || self.options.cache_fallback {
            self.store.insert(key, result.clone());
        }
        result
    }

    /// Render locally, bypassing both the remote service and the cache.
    pub fn compile_fallback(&self, source: &str) -> CompilationResult {
        let html = self.converter.convert(source);
        CompilationResult {
            html: self.enhancer.enhance(&html, source),
            metadata: CompilationMetadata::from_analysis(
                analyze_source(source),
                PreviewQuality::Fallback,
            ),
        }
    }

    /// Drop every cached preview.
    pub fn clear_cache(&self) {
        self.store.clear();
        debug!("preview cache cleared");
    }

    pub fn cached_entries(&self) -> usize {
        self.store.len()
    }

    async fn compile_remote(&self, source: &str) -> Option<CompilationResult> {
        let remote = self.remote.as_ref()?;
        match remote.compile(source).await {
            Ok(RemotePayload {
                data: Value::String(html),
                quality,
            }) if !html.is_empty() => Some(CompilationResult {
                html: self.enhancer.enhance(&html, source),
                metadata: CompilationMetadata::from_analysis(
                    analyze_source(source),
                    quality.filter(|q| q.is_remote()).unwrap_or_default(),
                ),
            }),
            Ok(payload) => {
                warn!(
                    payload = remote::json_kind(&payload.data),
                    empty = payload.data.as_str().map_or(false, str::is_empty),
                    "compile service returned no HTML, rendering fallback"
                );
                None
            }
            Err(err) => {
                warn!(error = %err, transient = err.is_transient(), "remote compile failed, rendering fallback");
                None
            }
        }
    }
}

impl Default for PreviewCompiler {
    fn default() -> Self {
        Self::offline()
    }
}
