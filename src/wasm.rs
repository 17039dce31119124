//! WASM bindings for scholar-preview
//!
//! This module exposes the local preview pipeline to JavaScript. Remote
//! compilation stays on the JS side; these functions cover the fallback path,
//! enhancement and analysis.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::compiler::PreviewCompiler;

/// Options accepted by `previewFallback`
#[derive(Serialize, Deserialize, Default)]
pub struct PreviewOptions {
    /// Skip the enhancer and return the bare converted HTML
    #[serde(default)]
    pub raw: bool,
}

/// Error payload returned when a value cannot cross the JS boundary
#[derive(Serialize)]
struct BindingError {
    success: bool,
    error: String,
}

/// Safely serialize a value to JsValue, returning an error object on failure.
fn to_js_value<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or_else(|e| {
        let error_obj = BindingError {
            success: false,
            error: format!("Serialization error: {}", e),
        };
        serde_wasm_bindgen::to_value(&error_obj).unwrap_or(JsValue::NULL)
    })
}

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert LaTeX to bare HTML with the fallback converter
#[wasm_bindgen(js_name = "latexToHtml")]
pub fn latex_to_html_wasm(input: &str) -> String {
    crate::latex_to_html(input)
}

/// Enhance an HTML fragment for preview
///
/// # Arguments
/// * `html` - HTML from the compile service or the fallback converter
/// * `source` - the LaTeX the HTML was produced from
#[wasm_bindgen(js_name = "enhanceHtml")]
pub fn enhance_html_wasm(html: &str, source: &str) -> String {
    crate::enhance_html(html, source)
}

/// Analyze LaTeX source; returns `{hasMath, hasTables, hasFigures, hasAlgorithms, requiresPackages}`
#[wasm_bindgen(js_name = "analyzeLatex")]
pub fn analyze_latex_wasm(input: &str) -> JsValue {
    to_js_value(&crate::analyze_latex(input))
}

/// Full fallback preview; returns a `CompilationResult` object
#[wasm_bindgen(js_name = "previewFallback")]
pub fn preview_fallback_wasm(input: &str, options: JsValue) -> JsValue {
    let opts: PreviewOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();
    let mut result = PreviewCompiler::offline().compile_fallback(input);
    if opts.raw {
        result.html = crate::latex_to_html(input);
    }
    to_js_value(&result)
}

/// Cache key the compiler uses for `input`
#[wasm_bindgen(js_name = "contentHash")]
pub fn content_hash_wasm(input: &str) -> i32 {
    crate::ContentHash::of(input).value()
}
