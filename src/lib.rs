//! # Layer Guide
//!
//! A static learning site generator for the DAO / DTO / Entity layering
//! pattern. It builds a handful of plain HTML pages: an interactive layer
//! diagram, stepped request walkthroughs, a searchable glossary and a
//! reference download page.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Load      content/ (+ built-in TOML)  →  ContentStore   (validated, read-only)
//! 2. Generate  ContentStore + SiteConfig   →  dist/          (final HTML site)
//! ```
//!
//! Every interactive widget is backed by a small view-model with pure
//! transitions: [`search::ContentSearch`], [`diagram::DiagramSelection`] and
//! [`stepper::ScenarioStepper`]. The generator renders each reachable state
//! as its own page, so the site works with JavaScript disabled. The embedded
//! scripts only add live glossary filtering and keyboard shortcuts.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Stage 1: loads glossary, scenarios and download text; validates them |
//! | [`generate`] | Stage 2: renders the site with Maud and copies assets |
//! | [`config`] | `config.toml` loading over stock defaults, validation, CSS color generation |
//! | [`search`] | Case-insensitive substring filter and its view-model |
//! | [`diagram`] | Fixed layer nodes, edges, layout and selection state |
//! | [`stepper`] | Scenario step navigation and progress |
//! | [`router`] | Page URLs and output paths |
//! | [`types`] | Content records deserialized from TOML |
//! | [`output`] | CLI output formatting for every command |
//!
//! # Design Decisions
//!
//! ## Pre-rendered States Over Client Logic
//!
//! Selecting a diagram node or moving a stepper is a link to a page that
//! already shows the result. Browser history, bookmarks and keyboard focus
//! behave as users expect, and the Rust view-models stay the one place the
//! behavior is defined and tested.
//!
//! ## Content as Built-in TOML
//!
//! The stock glossary, scenarios and download text are compiled into the
//! binary. A content directory overrides them one file at a time, so a
//! translation or a different pattern guide needs no code changes.

pub mod config;
pub mod content;
pub mod diagram;
pub mod generate;
pub mod output;
pub mod router;
pub mod search;
pub mod stepper;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
