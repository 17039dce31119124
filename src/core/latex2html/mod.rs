//! LaTeX to HTML fallback converter
//!
//! A best-effort structural translation used when the remote compiler is
//! unavailable. There is no parser: the input runs through a fixed sequence
//! of regex substitution passes (see [`passes`]). The converter never fails,
//! and the HTML it produces is not guaranteed to be well-formed:
//!
//! - list items are opened but never closed;
//! - the first row of a `tabular` has no opening `<tr><td>`.

pub mod passes;


use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::utils::clock::{format_today, Clock, SystemClock};

use passes::{
    convert_abstract, convert_figures, convert_headings, convert_inline_styles,
    convert_line_breaks, convert_lists, convert_tables, convert_title_block, convert_whitespace,
    normalize_math_delimiters, strip_scaffolding, unescape_specials,
};

/// Logs conversions that take noticeably long.
struct ProfileGuard {
    bytes: usize,
    start: Instant,
}

impl ProfileGuard {
    fn new(bytes: usize) -> Self {
        ProfileGuard {
            bytes,
            start: Instant::now(),
        }
    }
}

impl Drop for ProfileGuard {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed().as_secs_f64();
        if elapsed >= 0.05 {
            debug!(bytes = self.bytes, elapsed, "slow fallback conversion");
        }
    }
}

/// Regex-driven LaTeX → HTML converter.
#[derive(Clone)]
pub struct LatexToHtml {
    clock: Arc<dyn Clock>,
}

impl Default for LatexToHtml {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for LatexToHtml {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatexToHtml")
            .field("today", &self.clock.today())
            .finish()
    }
}

impl LatexToHtml {
    /// `\today` expands to the date reported by `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn convert(&self, input: &str) -> String {
        let _guard = ProfileGuard::new(input.len());
        let today = format_today(self.clock.as_ref());

        let out = strip_scaffolding(input);
        let out = convert_title_block(&out, &today);
        let out = convert_headings(&out);
        let out = convert_abstract(&out);
        let out = convert_inline_styles(&out);
        let out = convert_line_breaks(&out);
        let out = convert_lists(&out);
        let out = normalize_math_delimiters(&out);
        let out = convert_tables(&out);
        let out = convert_figures(&out);
        let out = unescape_specials(&out);
        convert_whitespace(&out)
    }
}

/// Convert with the wall-clock date.
pub fn latex_to_html(input: &str) -> String {
    LatexToHtml::default().convert(input)
}
