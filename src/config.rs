//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! are overridden by an optional `config.toml` in the content directory.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! assets_dir = "assets"       # Copied verbatim to the output root
//!
//! [site]
//! title = "DAO, DTO, Entity 패턴 가이드"
//! description = "계층화된 아키텍처에서 데이터가 어떻게 이동하고 변환되는지 이해하세요"
//! lang = "ko"
//! reference_url = "https://gmlwjd9405.github.io/2018/12/25/difference-dao-dto-entity.html"
//!
//! [download]
//! artifact_path = "/dao-dto-reference.pdf"
//!
//! [search]
//! fields = ["term", "term_en", "definition"]
//! placeholder = "용어 검색... (예: DAO, Entity, Repository)"
//!
//! [colors.light]
//! background = "#ffffff"
//! surface = "#f6f8fa"
//! text = "#1f2328"
//! text_muted = "#59636e"
//! border = "#d1d9e0"
//! primary = "#2563eb"
//! secondary = "#9333ea"
//!
//! [colors.dark]
//! background = "#0d1117"
//! surface = "#161b22"
//! text = "#e6edf3"
//! text_muted = "#9198a1"
//! border = "#3d444d"
//! primary = "#60a5fa"
//! secondary = "#c084fc"
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::search::{DEFAULT_GLOSSARY_FIELDS, GlossaryField};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory (relative to the content root) copied to the output root.
    pub assets_dir: String,
    /// Page titles and header text.
    pub site: SiteInfo,
    /// The downloadable reference document.
    pub download: DownloadConfig,
    /// Glossary search behaviour.
    pub search: SearchConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            assets_dir: "assets".to_string(),
            site: SiteInfo::default(),
            download: DownloadConfig::default(),
            search: SearchConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation("site.title must not be empty".into()));
        }
        if self.site.lang.trim().is_empty() {
            return Err(ConfigError::Validation("site.lang must not be empty".into()));
        }
        let artifact = &self.download.artifact_path;
        if artifact.trim().is_empty() {
            return Err(ConfigError::Validation(
                "download.artifact_path must not be empty".into(),
            ));
        }
        if !artifact.starts_with('/')
            || artifact.starts_with("//")
            || self.download.artifact_relative_path().trim().is_empty()
        {
            return Err(ConfigError::Validation(format!(
                "download.artifact_path must be a site-absolute file path like '/guide.pdf', got '{}'",
                artifact
            )));
        }
        if self.search.fields.is_empty() {
            return Err(ConfigError::Validation(
                "search.fields must name at least one field".into(),
            ));
        }
        let assets = Path::new(&self.assets_dir);
        if self.assets_dir.trim().is_empty()
            || assets.is_absolute()
            || assets.components().any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(ConfigError::Validation(format!(
                "assets_dir must be a relative path inside the content directory, got '{}'",
                self.assets_dir
            )));
        }
        Ok(())
    }
}

/// Header, footer and document metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Site title, shown in the home page header and every `<title>`.
    pub title: String,
    /// Tagline under the home page title.
    pub description: String,
    /// `<html lang>` attribute.
    pub lang: String,
    /// Source article credited in the home page footer. Empty hides the credit.
    pub reference_url: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "DAO, DTO, Entity 패턴 가이드".to_string(),
            description: "계층화된 아키텍처에서 데이터가 어떻게 이동하고 변환되는지 이해하세요"
                .to_string(),
            lang: "ko".to_string(),
            reference_url:
                "https://gmlwjd9405.github.io/2018/12/25/difference-dao-dto-entity.html"
                    .to_string(),
        }
    }
}

/// The reference document offered on the download page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DownloadConfig {
    /// Site-absolute path the download button links to. The file itself is
    /// expected in the assets directory and is never generated.
    pub artifact_path: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            artifact_path: "/dao-dto-reference.pdf".to_string(),
        }
    }
}

impl DownloadConfig {
    /// Artifact location relative to the assets directory / output root.
    pub fn artifact_relative_path(&self) -> &str {
        self.artifact_path.trim_start_matches('/')
    }
}

/// Glossary search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Entry fields the query is matched against.
    pub fields: Vec<GlossaryField>,
    /// Placeholder text of the search box.
    pub placeholder: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fields: DEFAULT_GLOSSARY_FIELDS.to_vec(),
            placeholder: "용어 검색... (예: DAO, Entity, Repository)".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Card and panel background.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Muted/secondary text color (subtitles, captions, counters).
    pub text_muted: String,
    /// Border color.
    pub border: String,
    /// Accent for links, diagram arrows, active nodes and progress.
    pub primary: String,
    /// Accent for the dashed cross-reference lines and code badges.
    pub secondary: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f6f8fa".to_string(),
            text: "#1f2328".to_string(),
            text_muted: "#59636e".to_string(),
            border: "#d1d9e0".to_string(),
            primary: "#2563eb".to_string(),
            secondary: "#9333ea".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0d1117".to_string(),
            surface: "#161b22".to_string(),
            text: "#e6edf3".to_string(),
            text_muted: "#9198a1".to_string(),
            border: "#3d444d".to_string(),
            primary: "#60a5fa".to_string(),
            secondary: "#c084fc".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Layer Guide Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at the root of the content directory (--source).
# Unknown keys will cause an error.

# Directory (inside the content directory) copied verbatim to the output
# root. Put the downloadable reference document here.
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Shown in the home page header and in every page title.
title = "DAO, DTO, Entity 패턴 가이드"

# Tagline under the home page title.
description = "계층화된 아키텍처에서 데이터가 어떻게 이동하고 변환되는지 이해하세요"

# <html lang> attribute.
lang = "ko"

# Source article credited in the footer. Set to "" to hide the credit.
reference_url = "https://gmlwjd9405.github.io/2018/12/25/difference-dao-dto-entity.html"

# ---------------------------------------------------------------------------
# Download page
# ---------------------------------------------------------------------------
[download]
# Site-absolute path (leading '/') the download button links to. The file
# is copied from assets_dir and is never generated.
artifact_path = "/dao-dto-reference.pdf"

# ---------------------------------------------------------------------------
# Glossary search
# ---------------------------------------------------------------------------
[search]
# Entry fields matched by the search box: term, term_en, definition, example.
fields = ["term", "term_en", "definition"]

placeholder = "용어 검색... (예: DAO, Entity, Repository)"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
surface = "#f6f8fa"       # Cards, panels, code blocks
text = "#1f2328"
text_muted = "#59636e"    # Subtitles, captions, counters
border = "#d1d9e0"
primary = "#2563eb"       # Links, arrows, active node, progress
secondary = "#9333ea"     # Dashed cross-references, layer badges

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0d1117"
surface = "#161b22"
text = "#e6edf3"
text_muted = "#9198a1"
border = "#3d444d"
primary = "#60a5fa"
secondary = "#c084fc"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

@media (prefers-color-scheme: dark) {{
    :root {{
{dark}
    }}
}}"#,
        light = color_vars(&colors.light, "    "),
        dark = color_vars(&colors.dark, "        "),
    )
}

fn color_vars(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("--color-bg", &scheme.background),
        ("--color-surface", &scheme.surface),
        ("--color-text", &scheme.text),
        ("--color-text-muted", &scheme.text_muted),
        ("--color-border", &scheme.border),
        ("--color-primary", &scheme.primary),
        ("--color-secondary", &scheme.secondary),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}
