//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Content analysis of LaTeX sources
//! - Content hashing for the compilation cache
//! - Date source for `\today`
//! - Error types and result types

pub mod clock;
pub mod error;
pub mod hash;
pub mod latex_analysis;

// Re-export commonly used items
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{PreviewError, PreviewResult};
pub use hash::ContentHash;
pub use latex_analysis::{analyze_source, metrics_source, ContentAnalysis, LatexMetrics};
