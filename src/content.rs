//! Content loading and validation.
//!
//! Stage 1 of the build. Produces the [`ContentStore`]: the glossary, the
//! scenario walkthroughs and the download page text. The diagram is not
//! content; its nodes and edges are fixed in [`crate::diagram`].
//!
//! ## Sources
//!
//! Each collection ships as a TOML document compiled into the binary. A
//! content directory may replace any of them file by file:
//!
//! ```text
//! content/
//! ├── config.toml        # Site config (see config module)
//! ├── glossary.toml      # [[entries]] term, term_en, definition, example?
//! ├── scenarios.toml     # [[scenarios]] id, title, description, [[scenarios.steps]]
//! ├── download.toml      # [artifact], [[resources]], tips (markdown)
//! └── assets/            # Copied verbatim to the output root
//! ```
//!
//! Missing files fall back to the built-in copy, so an empty (or absent)
//! content directory builds the stock site.
//!
//! ## Validation
//!
//! - Glossary terms and scenario ids are non-empty and unique.
//! - Every scenario has at least one step.
//! - Required text fields are non-empty.
//!
//! The loaded store is never mutated.

use crate::types::{DownloadContent, GlossaryEntry, Scenario};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUILTIN_GLOSSARY: &str = include_str!("../content/glossary.toml");
const BUILTIN_SCENARIOS: &str = include_str!("../content/scenarios.toml");
const BUILTIN_DOWNLOAD: &str = include_str!("../content/download.toml");

pub const GLOSSARY_FILE: &str = "glossary.toml";
pub const SCENARIOS_FILE: &str = "scenarios.toml";
pub const DOWNLOAD_FILE: &str = "download.toml";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error in {origin}: {source}")]
    Toml {
        origin: Origin,
        source: toml::de::Error,
    },
    #[error("{origin}: {what} must not be empty")]
    EmptyField { origin: Origin, what: String },
    #[error("{origin}: duplicate glossary term '{term}'")]
    DuplicateTerm { origin: Origin, term: String },
    #[error("{origin}: duplicate scenario id '{id}'")]
    DuplicateScenario { origin: Origin, id: String },
    #[error("{origin}: scenario '{id}' has no steps")]
    EmptyScenario { origin: Origin, id: String },
    #[error("{origin}: scenario id '{id}' must contain only a-z, 0-9 and '-'")]
    InvalidScenarioId { origin: Origin, id: String },
}

/// Where one content document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Builtin(&'static str),
    File(PathBuf),
}

impl Origin {
    pub fn is_builtin(&self) -> bool {
        matches!(self, Origin::Builtin(_))
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Builtin(name) => write!(f, "built-in {name}"),
            Origin::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Origins of the three documents that make up a [`ContentStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentOrigins {
    pub glossary: Origin,
    pub scenarios: Origin,
    pub download: Origin,
}

/// All site content, loaded once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ContentStore {
    pub glossary: Vec<GlossaryEntry>,
    pub scenarios: Vec<Scenario>,
    pub download: DownloadContent,
    pub origins: ContentOrigins,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct GlossaryDoc {
    #[serde(default)]
    entries: Vec<GlossaryEntry>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenariosDoc {
    #[serde(default)]
    scenarios: Vec<Scenario>,
}

impl ContentStore {
    /// The stock content compiled into the binary.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_documents(
            (Origin::Builtin(GLOSSARY_FILE), BUILTIN_GLOSSARY.to_string()),
            (Origin::Builtin(SCENARIOS_FILE), BUILTIN_SCENARIOS.to_string()),
            (Origin::Builtin(DOWNLOAD_FILE), BUILTIN_DOWNLOAD.to_string()),
        )
    }

    /// Load content from `source`, falling back to the built-in document for
    /// every file the directory does not provide.
    pub fn load(source: &Path) -> Result<Self, ContentError> {
        Self::from_documents(
            read_document(source, GLOSSARY_FILE, BUILTIN_GLOSSARY)?,
            read_document(source, SCENARIOS_FILE, BUILTIN_SCENARIOS)?,
            read_document(source, DOWNLOAD_FILE, BUILTIN_DOWNLOAD)?,
        )
    }

    fn from_documents(
        glossary: (Origin, String),
        scenarios: (Origin, String),
        download: (Origin, String),
    ) -> Result<Self, ContentError> {
        let glossary_doc: GlossaryDoc = parse(&glossary)?;
        let scenarios_doc: ScenariosDoc = parse(&scenarios)?;
        let download_doc: DownloadContent = parse(&download)?;

        validate_glossary(&glossary_doc.entries, &glossary.0)?;
        validate_scenarios(&scenarios_doc.scenarios, &scenarios.0)?;
        validate_download(&download_doc, &download.0)?;

        Ok(Self {
            glossary: glossary_doc.entries,
            scenarios: scenarios_doc.scenarios,
            download: download_doc,
            origins: ContentOrigins {
                glossary: glossary.0,
                scenarios: scenarios.0,
                download: download.0,
            },
        })
    }

    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn step_count(&self) -> usize {
        self.scenarios.iter().map(|s| s.steps.len()).sum()
    }
}

fn read_document(
    source: &Path,
    name: &'static str,
    builtin: &str,
) -> Result<(Origin, String), ContentError> {
    let path = source.join(name);
    if !path.is_file() {
        return Ok((Origin::Builtin(name), builtin.to_string()));
    }
    let text = fs::read_to_string(&path)?;
    Ok((Origin::File(path), text))
}

fn parse<T: for<'de> Deserialize<'de>>(doc: &(Origin, String)) -> Result<T, ContentError> {
    toml::from_str(&doc.1).map_err(|source| ContentError::Toml {
        origin: doc.0.clone(),
        source,
    })
}

fn require(value: &str, what: impl FnOnce() -> String, origin: &Origin) -> Result<(), ContentError> {
    if value.trim().is_empty() {
        return Err(ContentError::EmptyField {
            origin: origin.clone(),
            what: what(),
        });
    }
    Ok(())
}

fn validate_glossary(entries: &[GlossaryEntry], origin: &Origin) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for (i, entry) in entries.iter().enumerate() {
        require(&entry.term, || format!("term of glossary entry {}", i + 1), origin)?;
        require(&entry.term_en, || format!("term_en of '{}'", entry.term), origin)?;
        require(&entry.definition, || format!("definition of '{}'", entry.term), origin)?;
        if !seen.insert(entry.term.as_str()) {
            return Err(ContentError::DuplicateTerm {
                origin: origin.clone(),
                term: entry.term.clone(),
            });
        }
    }
    Ok(())
}

/// Scenario ids become URL path segments.
fn is_valid_scenario_id(id: &str) -> bool {
    id.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn validate_scenarios(scenarios: &[Scenario], origin: &Origin) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for (i, scenario) in scenarios.iter().enumerate() {
        require(&scenario.id, || format!("id of scenario {}", i + 1), origin)?;
        if !is_valid_scenario_id(&scenario.id) {
            return Err(ContentError::InvalidScenarioId {
                origin: origin.clone(),
                id: scenario.id.clone(),
            });
        }
        if !seen.insert(scenario.id.as_str()) {
            return Err(ContentError::DuplicateScenario {
                origin: origin.clone(),
                id: scenario.id.clone(),
            });
        }
        require(&scenario.title, || format!("title of scenario '{}'", scenario.id), origin)?;
        if scenario.steps.is_empty() {
            return Err(ContentError::EmptyScenario {
                origin: origin.clone(),
                id: scenario.id.clone(),
            });
        }
        for (n, step) in scenario.steps.iter().enumerate() {
            require(
                &step.layer,
                || format!("layer of step {} in '{}'", n + 1, scenario.id),
                origin,
            )?;
            require(
                &step.description,
                || format!("description of step {} in '{}'", n + 1, scenario.id),
                origin,
            )?;
        }
    }
    Ok(())
}

fn validate_download(download: &DownloadContent, origin: &Origin) -> Result<(), ContentError> {
    require(&download.artifact.title, || "artifact.title".to_string(), origin)?;
    for (i, resource) in download.resources.iter().enumerate() {
        require(&resource.url, || format!("url of resource {}", i + 1), origin)?;
        require(&resource.title, || format!("title of resource {}", i + 1), origin)?;
    }
    Ok(())
}
