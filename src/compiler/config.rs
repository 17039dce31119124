//! Preview compiler configuration.
//!
//! Values come from the environment, optionally overlaid by a TOML file and
//! finally by CLI flags. Overlays are [`PartialPreviewConfig`]s, so a key that
//! is present always wins, even when it repeats the default.

use serde::{Deserialize, Serialize};

use super::types::PreviewQuality;
use super::CompilerOptions;
use crate::utils::error::{PreviewError, PreviewResult};

pub const ENV_ENDPOINT: &str = "SCHOLAR_PREVIEW_ENDPOINT";
pub const ENV_TOKEN: &str = "SCHOLAR_PREVIEW_TOKEN";
pub const ENV_QUALITY: &str = "SCHOLAR_PREVIEW_QUALITY";
pub const ENV_TIMEOUT_SECS: &str = "SCHOLAR_PREVIEW_TIMEOUT_SECS";
pub const ENV_CACHE_FALLBACK: &str = "SCHOLAR_PREVIEW_CACHE_FALLBACK";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Remote compile endpoint; no endpoint means local-only previews
    pub endpoint: Option<String>,
    /// Bearer token sent with compile requests
    pub api_token: Option<String>,
    /// Quality requested from the compile service
    pub quality: PreviewQuality,
    /// Request timeout; unset means wait indefinitely
    pub timeout_secs: Option<u64>,
    /// Whether fallback renders are cached like remote ones
    pub cache_fallback: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_token: None,
            quality: PreviewQuality::Fast,
            timeout_secs: None,
            cache_fallback: true,
        }
    }
}

impl PreviewConfig {
    pub fn from_env() -> PreviewResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> PreviewResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.endpoint = lookup(ENV_ENDPOINT).filter(|v| !v.trim().is_empty());
        config.api_token = lookup(ENV_TOKEN).filter(|v| !v.trim().is_empty());
        if let Some(quality) = lookup(ENV_QUALITY) {
            config.quality = quality.parse::<PreviewQuality>()?.requestable()?;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = Some(timeout.trim().parse().map_err(|_| {
                PreviewError::config(format!("{} must be a number, got '{}'", ENV_TIMEOUT_SECS, timeout))
            })?);
        }
        if let Some(flag) = lookup(ENV_CACHE_FALLBACK) {
            config.cache_fallback = parse_bool(&flag).ok_or_else(|| {
                PreviewError::config(format!("{} must be true or false, got '{}'", ENV_CACHE_FALLBACK, flag))
            })?;
        }
        Ok(config)
    }

    /// Defaults overlaid with a TOML document.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(input: &str) -> PreviewResult<Self> {
        Ok(Self::default().merge(PartialPreviewConfig::from_toml_str(input)?))
    }

    #[cfg(feature = "config-file")]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> PreviewResult<Self> {
        Ok(Self::default().merge(PartialPreviewConfig::from_file(path)?))
    }

    /// Every field set in `overlay` replaces the current value.
    pub fn merge(mut self, overlay: PartialPreviewConfig) -> Self {
        if overlay.endpoint.is_some() {
            self.endpoint = overlay.endpoint;
        }
        if overlay.api_token.is_some() {
            self.api_token = overlay.api_token;
        }
        if let Some(quality) = overlay.quality {
            self.quality = quality;
        }
        if overlay.timeout_secs.is_some() {
            self.timeout_secs = overlay.timeout_secs;
        }
        if let Some(cache_fallback) = overlay.cache_fallback {
            self.cache_fallback = cache_fallback;
        }
        self
    }

    pub fn compiler_options(&self) -> CompilerOptions {
        CompilerOptions {
            cache_fallback: self.cache_fallback,
        }
    }
}

/// Configuration layer where only the keys actually present are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialPreviewConfig {
    pub endpoint: Option<String>,
    pub api_token: Option<String>,
    pub quality: Option<PreviewQuality>,
    pub timeout_secs: Option<u64>,
    pub cache_fallback: Option<bool>,
}

impl PartialPreviewConfig {
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(input: &str) -> PreviewResult<Self> {
        let overlay: Self = toml::from_str(input).map_err(|e| PreviewError::config(e.to_string()))?;
        if let Some(quality) = overlay.quality {
            quality.requestable()?;
        }
        Ok(overlay)
    }

    #[cfg(feature = "config-file")]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> PreviewResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
