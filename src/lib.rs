//! # scholar-preview
//!
//! LaTeX preview pipeline for a research writing editor.
//!
//! A preview is produced by asking a remote LaTeX compile service for HTML.
//! When that fails, a local regex-based converter renders a best-effort HTML
//! version instead. Either way the HTML is enhanced with a MathJax bootstrap
//! and a print-like stylesheet, and the source is analyzed for math, tables,
//! figures and algorithms.
//!
//! ## Quick Start
//!
//! ```rust
//! use scholar_preview::{latex_to_html, analyze_latex};
//!
//! let html = latex_to_html(r"\section{Intro}Hello \textbf{world}");
//! assert!(html.contains("<h2>Intro</h2>"));
//!
//! let analysis = analyze_latex(r"\begin{table}\begin{tabular}{c}x\end{tabular}\end{table}");
//! assert!(analysis.has_tables);
//! ```
//!
//! For the full facade (remote compile, fallback, cache) see
//! [`compiler::PreviewCompiler`].

pub mod compiler;
pub mod core;
pub mod utils;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use compiler::{
    CompilationMetadata, CompilationResult, CompilationStore, CompilerOptions, MemoryStore,
    PartialPreviewConfig, PreviewCompiler, PreviewConfig, PreviewQuality, RemoteCompiler,
    RemotePayload,
};
pub use core::enhance::{enhance_html, HtmlEnhancer};
pub use core::latex2html::{latex_to_html, LatexToHtml};
pub use utils::{ContentHash, PreviewError, PreviewResult};

#[cfg(feature = "remote")]
pub use compiler::HttpRemoteCompiler;

/// Capability flags and required packages for a LaTeX source.
pub fn analyze_latex(source: &str) -> utils::ContentAnalysis {
    utils::analyze_source(source)
}
