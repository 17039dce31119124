//! Result types returned by the preview compiler.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::utils::error::PreviewError;
use crate::utils::latex_analysis::ContentAnalysis;

/// Where a preview came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewQuality {
    /// Remote compile, fast mode
    #[default]
    Fast,
    /// Remote compile, accurate mode
    Accurate,
    /// Produced locally by the fallback converter
    Fallback,
}

impl PreviewQuality {
    pub fn as_str(self) -> &'static str {
        match self {
            PreviewQuality::Fast => "fast",
            PreviewQuality::Accurate => "accurate",
            PreviewQuality::Fallback => "fallback",
        }
    }

    /// Whether the compile service can produce this quality.
    pub fn is_remote(self) -> bool {
        !matches!(self, PreviewQuality::Fallback)
    }

    /// `self` if it can be requested from the compile service.
    pub fn requestable(self) -> Result<Self, PreviewError> {
        if self.is_remote() {
            Ok(self)
        } else {
            Err(PreviewError::config(
                "quality 'fallback' cannot be requested from the compile service",
            ))
        }
    }
}

impl fmt::Display for PreviewQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreviewQuality {
    type Err = PreviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(PreviewQuality::Fast),
            "accurate" => Ok(PreviewQuality::Accurate),
            "fallback" => Ok(PreviewQuality::Fallback),
            other => Err(PreviewError::config(format!(
                "unknown preview quality '{}' (expected fast, accurate or fallback)",
                other
            ))),
        }
    }
}

/// Facts about the source plus the provenance of the HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationMetadata {
    pub has_math: bool,
    pub has_tables: bool,
    pub has_figures: bool,
    pub has_algorithms: bool,
    pub requires_packages: IndexSet<String>,
    pub preview_quality: PreviewQuality,
}

impl CompilationMetadata {
    pub fn from_analysis(analysis: ContentAnalysis, preview_quality: PreviewQuality) -> Self {
        Self {
            has_math: analysis.has_math,
            has_tables: analysis.has_tables,
            has_figures: analysis.has_figures,
            has_algorithms: analysis.has_algorithms,
            requires_packages: analysis.requires_packages,
            preview_quality,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationResult {
    pub html: String,
    pub metadata: CompilationMetadata,
}

impl CompilationResult {
    pub fn is_fallback(&self) -> bool {
        self.metadata.preview_quality == PreviewQuality::Fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::latex_analysis::analyze_source;

    #[test]
    fn test_quality_parse() {
        assert_eq!("Accurate".parse::<PreviewQuality>().unwrap(), PreviewQuality::Accurate);
        assert_eq!(" fast ".parse::<PreviewQuality>().unwrap(), PreviewQuality::Fast);
        assert!("best".parse::<PreviewQuality>().is_err());
    }

    #[test]
    fn test_fallback_not_requestable() {
        assert_eq!(PreviewQuality::Accurate.requestable().unwrap(), PreviewQuality::Accurate);
        assert!(PreviewQuality::Fallback.requestable().is_err());
        assert!(!PreviewQuality::Fallback.is_remote());
    }

    #[test]
    fn test_metadata_json_shape() {
        let metadata =
            CompilationMetadata::from_analysis(analyze_source("$x$"), PreviewQuality::Fallback);
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["hasMath"], true);
        assert_eq!(json["hasTables"], false);
        assert_eq!(json["previewQuality"], "fallback");
        assert_eq!(json["requiresPackages"][0], "amsmath");
    }
}
