//! Content records shared by the loader, the view-models and the renderer.
//!
//! All of these are deserialized once from TOML at startup and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

/// A glossary term with its English name, definition and optional example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlossaryEntry {
    /// Display term (Korean or English). Unique within the glossary.
    pub term: String,
    /// English name shown next to the term.
    pub term_en: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// One stage of a scenario walkthrough.
///
/// `layer` is an open set (`Controller`, `Service`, `Repository/DAO`,
/// `Entity`, `Database`, `Mapper`, `Response`, ...). Unknown layers render
/// with a neutral badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioStep {
    pub layer: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// A stepped walkthrough of one request through the layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// URL-safe identifier, unique within the scenario list.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Ordered, non-empty.
    pub steps: Vec<ScenarioStep>,
}

/// The downloadable reference document described on the download page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Artifact {
    pub title: String,
    pub description: String,
    /// Bullet list of what the document covers.
    #[serde(default)]
    pub contents: Vec<String>,
}

/// An outbound link to third-party reading material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resource {
    pub title: String,
    pub description: String,
    pub url: String,
    pub link_label: String,
}

/// Everything the download page shows apart from site chrome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DownloadContent {
    pub artifact: Artifact,
    #[serde(default)]
    pub resources: Vec<Resource>,
    /// Markdown, rendered into the tips box.
    #[serde(default)]
    pub tips: String,
}
