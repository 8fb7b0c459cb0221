//! Shared test utilities for the layer-guide test suite.
//!
//! Lookup helpers panic with the list of known keys, so a renamed term or
//! scenario fails with a readable message instead of an `unwrap` on `None`.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let store = builtin_store();
//! let scenario = find_scenario(&store, "user-update");
//! assert_eq!(scenario.steps.len(), 4);
//!
//! let tmp = setup_content(&[("glossary.toml", "entries = []")]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::content::ContentStore;
use crate::types::{GlossaryEntry, Scenario};

// =========================================================================
// Fixture setup
// =========================================================================

/// The stock content compiled into the binary.
pub fn builtin_store() -> ContentStore {
    ContentStore::builtin().expect("built-in content must load")
}

/// Write `files` (name, contents) into a fresh temp content directory.
pub fn setup_content(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (name, contents) in files {
        write_file(tmp.path(), name, contents);
    }
    tmp
}

/// Write `contents` to `root/name`, creating parent directories.
pub fn write_file(root: &Path, name: &str, contents: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

// =========================================================================
// Lookup helpers
// =========================================================================

/// Find a glossary entry by term. Panics with the available terms.
pub fn find_entry<'a>(store: &'a ContentStore, term: &str) -> &'a GlossaryEntry {
    store
        .glossary
        .iter()
        .find(|e| e.term == term)
        .unwrap_or_else(|| {
            let terms: Vec<_> = store.glossary.iter().map(|e| e.term.as_str()).collect();
            panic!("term '{}' not found. Available: {:?}", term, terms)
        })
}

/// Find a scenario by id. Panics with the available ids.
pub fn find_scenario<'a>(store: &'a ContentStore, id: &str) -> &'a Scenario {
    store.scenario(id).unwrap_or_else(|| {
        panic!(
            "scenario '{}' not found. Available: {:?}",
            id,
            scenario_ids(store)
        )
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Scenario ids in content order.
pub fn scenario_ids(store: &ContentStore) -> Vec<&str> {
    store.scenarios.iter().map(|s| s.id.as_str()).collect()
}

/// Terms of a (filtered) entry list, in order.
pub fn entry_terms<'a>(entries: &[&'a GlossaryEntry]) -> Vec<&'a str> {
    entries.iter().map(|e| e.term.as_str()).collect()
}
