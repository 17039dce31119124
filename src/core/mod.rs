//! Core conversion stages
//!
//! - [`latex2html`]: regex-driven LaTeX → HTML fallback converter
//! - [`enhance`]: HTML post-processing for in-browser preview

pub mod enhance;
pub mod latex2html;
