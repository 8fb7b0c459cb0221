//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every entity (term,
//! scenario, concept, page) leads with its positional index and title.
//! Where the data came from is secondary context on indented `Source:`
//! lines, so `check` reads as a content inventory that can still be traced
//! back to files.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Glossary (8 terms)
//!     Source: built-in glossary.toml
//!     001 DAO (Data Access Object)
//!         Data Access Object
//!
//! Scenarios (3 scenarios, 14 steps)
//!     Source: content/scenarios.toml
//!     001 사용자 등록 시나리오 (5 steps)
//!         Id: user-registration
//!
//! Concepts (6 nodes)
//!     001 Controller (Presentation Layer)
//!
//! Download
//!     Source: built-in download.toml
//!     Artifact: /dao-dto-reference.pdf
//!     Resources: 3
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Download → download/index.html
//!
//! Concepts
//!     001 Controller → concepts/controller/index.html
//!
//! Scenario steps
//!     001 사용자 등록 시나리오 (Controller) → scenarios/user-registration/1/index.html
//!
//! Generated 2 screens, 6 concept pages, 14 scenario step pages, 1 asset in dist
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions do no output of their own.

use crate::config::SiteConfig;
use crate::content::{ContentStore, Origin};
use crate::diagram::{ConceptNode, NODES};
use crate::generate::{self, GenerateReport, PageKind};
use crate::router;
use crate::search::{ContentSearch, Searchable};
use crate::stepper::ScenarioStepper;
use crate::types::{GlossaryEntry, Scenario};
use serde::Serialize;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

/// `1 term`, `3 terms`.
fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{} {}", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

fn source_line(depth: usize, origin: &Origin) -> String {
    format!("{}Source: {}", indent(depth), origin)
}

fn glossary_lines(index: usize, entry: &GlossaryEntry, lines: &mut Vec<String>) {
    lines.push(format!("{}{} {}", indent(1), format_index(index), entry.term));
    if entry.term_en != entry.term {
        lines.push(format!("{}{}", indent(2), entry.term_en));
    }
}

fn concept_header(index: usize, node: &ConceptNode) -> String {
    format!("{} {} ({})", format_index(index), node.label, node.label_en)
}

// ============================================================================
// check
// ============================================================================

/// Format the content inventory printed by `check`.
///
/// Notes the optional `config.toml` and assets directory when present, and
/// ends with a warning when the download artifact is missing from assets.
pub fn format_check_output(
    store: &ContentStore,
    config: &SiteConfig,
    source_root: &Path,
) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("Glossary ({})", plural(store.glossary.len(), "term")));
    lines.push(source_line(1, &store.origins.glossary));
    for (i, entry) in store.glossary.iter().enumerate() {
        glossary_lines(i + 1, entry, &mut lines);
    }

    lines.push(String::new());
    lines.push(format!(
        "Scenarios ({}, {})",
        plural(store.scenarios.len(), "scenario"),
        plural(store.step_count(), "step")
    ));
    lines.push(source_line(1, &store.origins.scenarios));
    for (i, scenario) in store.scenarios.iter().enumerate() {
        lines.push(format!(
            "{}{} {} ({})",
            indent(1),
            format_index(i + 1),
            scenario.title,
            plural(scenario.steps.len(), "step")
        ));
        lines.push(format!("{}Id: {}", indent(2), scenario.id));
    }

    lines.push(String::new());
    lines.push(format!("Concepts ({})", plural(NODES.len(), "node")));
    for (i, node) in NODES.iter().enumerate() {
        lines.push(format!("{}{}", indent(1), concept_header(i + 1, node)));
    }

    lines.push(String::new());
    lines.push("Download".to_string());
    lines.push(source_line(1, &store.origins.download));
    lines.push(format!("{}Artifact: {}", indent(1), config.download.artifact_path));
    lines.push(format!("{}Resources: {}", indent(1), store.download.resources.len()));

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").is_file() {
        lines.push(format!("{}config.toml", indent(1)));
    }
    if source_root.join(&config.assets_dir).is_dir() {
        lines.push(format!("{}{}/", indent(1), config.assets_dir));
    }

    if !generate::artifact_source_path(config, source_root).is_file() {
        lines.push(String::new());
        lines.push(missing_artifact_warning(config));
    }

    lines
}

fn missing_artifact_warning(config: &SiteConfig) -> String {
    format!(
        "Warning: {} not found in {}/; the download link will be broken",
        config.download.artifact_relative_path(),
        config.assets_dir
    )
}

pub fn print_check_output(store: &ContentStore, config: &SiteConfig, source_root: &Path) {
    for line in format_check_output(store, config, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

/// Format the generated-files report printed by `build`.
pub fn format_generate_output(report: &GenerateReport, config: &SiteConfig) -> Vec<String> {
    let mut lines = Vec::new();

    for page in report.pages.iter().filter(|p| p.kind == PageKind::Screen) {
        lines.push(format!("{} \u{2192} {}", page.title, page.path));
    }

    let sections = [
        (PageKind::Concept, "Concepts"),
        (PageKind::ScenarioStep, "Scenario steps"),
    ];
    for (kind, heading) in sections {
        let pages: Vec<_> = report.pages.iter().filter(|p| p.kind == kind).collect();
        if pages.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(heading.to_string());
        for (i, page) in pages.iter().enumerate() {
            lines.push(format!(
                "{}{} {} \u{2192} {}",
                indent(1),
                format_index(i + 1),
                page.title,
                page.path
            ));
        }
    }

    if !report.assets.is_empty() {
        lines.push(String::new());
        lines.push("Assets".to_string());
        for asset in &report.assets {
            lines.push(format!("{}{}", indent(1), asset));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}, {} in {}",
        plural(report.count(PageKind::Screen), "screen"),
        plural(report.count(PageKind::Concept), "concept page"),
        plural(report.count(PageKind::ScenarioStep), "scenario step page"),
        plural(report.assets.len(), "asset"),
        report.output_dir.display()
    ));

    if !report.artifact_present {
        lines.push(missing_artifact_warning(config));
    }

    lines
}

pub fn print_generate_output(report: &GenerateReport, config: &SiteConfig) {
    for line in format_generate_output(report, config) {
        println!("{}", line);
    }
}

// ============================================================================
// search
// ============================================================================

fn search_summary<T: Searchable>(search: &ContentSearch<'_, T>, noun: &str) -> String {
    if !search.is_filtering() {
        return plural(search.total_count(), noun);
    }
    if !search.has_results() {
        return format!("No {}s match \"{}\"", noun, search.query());
    }
    format!(
        "{} of {} match \"{}\"",
        search.filtered_count(),
        plural(search.total_count(), noun),
        search.query()
    )
}

/// Format glossary search results.
pub fn format_glossary_search(search: &ContentSearch<'_, GlossaryEntry>) -> Vec<String> {
    let mut lines = vec![search_summary(search, "term")];
    for (i, entry) in search.filtered_items().iter().enumerate() {
        lines.push(format!("{} {} ({})", format_index(i + 1), entry.term, entry.term_en));
        lines.push(format!("{}{}", indent(1), truncate_desc(&entry.definition, 60)));
        if let Some(example) = &entry.example {
            lines.push(format!("{}Example: {}", indent(1), example));
        }
    }
    lines
}

/// Format scenario search results.
pub fn format_scenario_search(search: &ContentSearch<'_, Scenario>) -> Vec<String> {
    let mut lines = vec![search_summary(search, "scenario")];
    for (i, scenario) in search.filtered_items().iter().enumerate() {
        lines.push(format!("{} {} ({})", format_index(i + 1), scenario.title, scenario.id));
        lines.push(format!("{}{}", indent(1), truncate_desc(&scenario.description, 60)));
    }
    lines
}

#[derive(Serialize)]
struct SearchJson<'s, 'a, T> {
    query: &'s str,
    total: usize,
    count: usize,
    results: &'s [&'a T],
}

/// Search results as a JSON document: query, counts and matching records.
pub fn format_search_json<T: Searchable + Serialize>(
    search: &ContentSearch<'_, T>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&SearchJson {
        query: search.query(),
        total: search.total_count(),
        count: search.filtered_count(),
        results: search.filtered_items(),
    })
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// scenario / concept
// ============================================================================

/// Format one scenario step the way the stepper shows it.
pub fn format_scenario_step(stepper: &ScenarioStepper<'_>) -> Vec<String> {
    let scenario = stepper.scenario();
    let step = stepper.current_step();
    let mut lines = vec![
        format!("{} ({})", scenario.title, scenario.id),
        format!("{}{}", indent(1), stepper.progress()),
        format!("{}Layer: {}", indent(1), step.layer),
        format!("{}{}", indent(1), step.description),
    ];
    if let Some(code) = &step.code {
        lines.push(format!("{}Code:", indent(1)));
        for code_line in code.lines() {
            lines.push(format!("{}{}", indent(2), code_line).trim_end().to_string());
        }
    }
    let prev = stepper
        .previous_index()
        .map(|i| format!("\u{2190} --step {}", i + 1));
    let next = stepper
        .next_index()
        .map(|i| format!("--step {} \u{2192}", i + 1));
    let nav: Vec<String> = prev.into_iter().chain(next).collect();
    if !nav.is_empty() {
        lines.push(format!("{}{}", indent(1), nav.join("  ")));
    }
    lines.push(format!(
        "{}Page: {}",
        indent(1),
        router::scenario_step_href(&scenario.id, stepper.current_index())
    ));
    lines
}

/// Format a diagram node's info panel.
pub fn format_concept(node: &ConceptNode) -> Vec<String> {
    vec![
        format!("{} ({})", node.label, node.label_en),
        format!("{}{}", indent(1), node.description),
        format!("{}Page: {}", indent(1), router::concept_href(node.id)),
    ]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::NodeId;
    use crate::generate::GeneratedPage;
    use crate::search::{DEFAULT_GLOSSARY_FIELDS, DEFAULT_SCENARIO_FIELDS};
    use crate::test_helpers::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn truncate_desc_short() {
        assert_eq!(truncate_desc("Short text", 40), "Short text");
    }

    #[test]
    fn truncate_desc_exact() {
        let text = "a".repeat(40);
        assert_eq!(truncate_desc(&text, 40), text);
    }

    #[test]
    fn truncate_desc_long() {
        let text = "a".repeat(50);
        let expected = format!("{}...", "a".repeat(40));
        assert_eq!(truncate_desc(&text, 40), expected);
    }

    #[test]
    fn truncate_desc_counts_chars_not_bytes() {
        assert_eq!(truncate_desc("영속성 컨텍스트", 3), "영속성...");
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "term"), "1 term");
        assert_eq!(plural(0, "term"), "0 terms");
        assert_eq!(plural(14, "step"), "14 steps");
    }

    // =========================================================================
    // check
    // =========================================================================

    #[test]
    fn check_lists_builtin_inventory() {
        let store = builtin_store();
        let tmp = TempDir::new().unwrap();
        let lines = format_check_output(&store, &SiteConfig::default(), tmp.path());

        assert_eq!(lines[0], "Glossary (8 terms)");
        assert_eq!(lines[1], "    Source: built-in glossary.toml");
        assert_eq!(lines[2], "    001 DAO (Data Access Object)");
        assert!(lines.contains(&"Scenarios (3 scenarios, 14 steps)".to_string()));
        assert!(lines.contains(&"    001 사용자 등록 시나리오 (5 steps)".to_string()));
        assert!(lines.contains(&"        Id: user-registration".to_string()));
        assert!(lines.contains(&"    006 Database (Persistence)".to_string()));
        assert!(lines.contains(&"    Artifact: /dao-dto-reference.pdf".to_string()));
        assert!(lines.last().unwrap().starts_with("Warning: dao-dto-reference.pdf not found"));
    }

    #[test]
    fn check_shows_files_and_no_warning_when_artifact_present() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "").unwrap();
        fs::create_dir_all(tmp.path().join("assets")).unwrap();
        fs::write(tmp.path().join("assets/dao-dto-reference.pdf"), b"%PDF").unwrap();

        let store = builtin_store();
        let lines = format_check_output(&store, &SiteConfig::default(), tmp.path());

        assert!(lines.contains(&"    config.toml".to_string()));
        assert!(lines.contains(&"    assets/".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("Warning")));
    }

    // =========================================================================
    // build
    // =========================================================================

    fn page(kind: PageKind, title: &str, path: &str) -> GeneratedPage {
        GeneratedPage {
            kind,
            title: title.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn generate_report_groups_pages() {
        let report = GenerateReport {
            output_dir: PathBuf::from("dist"),
            pages: vec![
                page(PageKind::Screen, "Home", "index.html"),
                page(PageKind::Screen, "Download", "download/index.html"),
                page(PageKind::Concept, "DTO", "concepts/dto/index.html"),
                page(PageKind::ScenarioStep, "조회 (Controller)", "scenarios/q/1/index.html"),
            ],
            assets: vec!["dao-dto-reference.pdf".to_string()],
            artifact_path: "/dao-dto-reference.pdf".to_string(),
            artifact_present: true,
        };
        let lines = format_generate_output(&report, &SiteConfig::default());
        assert_eq!(
            lines,
            vec![
                "Home \u{2192} index.html",
                "Download \u{2192} download/index.html",
                "",
                "Concepts",
                "    001 DTO \u{2192} concepts/dto/index.html",
                "",
                "Scenario steps",
                "    001 조회 (Controller) \u{2192} scenarios/q/1/index.html",
                "",
                "Assets",
                "    dao-dto-reference.pdf",
                "",
                "Generated 2 screens, 1 concept page, 1 scenario step page, 1 asset in dist",
            ]
        );
    }

    #[test]
    fn generate_report_warns_on_missing_artifact() {
        let report = GenerateReport {
            output_dir: PathBuf::from("public/site"),
            pages: vec![page(PageKind::Screen, "Home", "index.html")],
            assets: vec![],
            artifact_path: "/dao-dto-reference.pdf".to_string(),
            artifact_present: false,
        };
        let lines = format_generate_output(&report, &SiteConfig::default());
        assert!(lines.contains(&"Generated 1 screen, 0 concept pages, 0 scenario step pages, 0 assets in public/site".to_string()));
        assert!(lines.last().unwrap().starts_with("Warning:"));
    }

    // =========================================================================
    // search
    // =========================================================================

    #[test]
    fn glossary_search_lists_matches() {
        let store = builtin_store();
        let mut search = ContentSearch::new(&store.glossary, &DEFAULT_GLOSSARY_FIELDS);
        search.set_query("Entity");
        let lines = format_glossary_search(&search);
        assert_eq!(lines[0], "4 of 8 terms match \"Entity\"");
        assert_eq!(lines[1], "001 Entity (Entity)");
        assert!(lines[2].starts_with("    실제 데이터베이스 테이블과"));
        assert!(lines[3].starts_with("    Example: @Entity"));
    }

    #[test]
    fn glossary_search_blank_query_lists_all() {
        let store = builtin_store();
        let mut search = ContentSearch::new(&store.glossary, &DEFAULT_GLOSSARY_FIELDS);
        search.set_query("   ");
        let lines = format_glossary_search(&search);
        assert_eq!(lines[0], "8 terms");
    }

    #[test]
    fn glossary_search_no_results() {
        let store = builtin_store();
        let mut search = ContentSearch::new(&store.glossary, &DEFAULT_GLOSSARY_FIELDS);
        search.set_query("kafka");
        assert_eq!(format_glossary_search(&search), vec!["No terms match \"kafka\""]);
    }

    #[test]
    fn scenario_search_matches_title() {
        let store = builtin_store();
        let mut search = ContentSearch::new(&store.scenarios, &DEFAULT_SCENARIO_FIELDS);
        search.set_query("수정");
        let lines = format_scenario_search(&search);
        assert_eq!(lines[0], "1 of 3 scenarios match \"수정\"");
        assert_eq!(lines[1], "001 사용자 정보 수정 시나리오 (user-update)");
    }

    #[test]
    fn search_json_shape() {
        let store = builtin_store();
        let mut search = ContentSearch::new(&store.glossary, &DEFAULT_GLOSSARY_FIELDS);
        search.set_query("mapper");
        let json = format_search_json(&search).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["query"], "mapper");
        assert_eq!(value["total"], 8);
        assert_eq!(value["count"], value["results"].as_array().unwrap().len());
        assert_eq!(value["results"][0]["term"], "Mapper");
    }

    // =========================================================================
    // scenario / concept
    // =========================================================================

    #[test]
    fn scenario_step_first() {
        let store = builtin_store();
        let stepper = ScenarioStepper::new(find_scenario(&store, "user-update")).unwrap();
        let lines = format_scenario_step(&stepper);
        assert_eq!(lines[0], "사용자 정보 수정 시나리오 (user-update)");
        assert_eq!(lines[1], "    단계 1 / 4");
        assert_eq!(lines[2], "    Layer: Controller");
        assert!(lines.contains(&"    --step 2 \u{2192}".to_string()));
        assert_eq!(lines.last().unwrap(), "    Page: /scenarios/user-update/1/");
    }

    #[test]
    fn scenario_step_middle_shows_both_directions() {
        let store = builtin_store();
        let stepper = ScenarioStepper::at(find_scenario(&store, "user-update"), 1).unwrap();
        let lines = format_scenario_step(&stepper);
        assert!(lines.contains(&"    \u{2190} --step 1  --step 3 \u{2192}".to_string()));
        assert!(lines.contains(&"    Code:".to_string()));
    }

    #[test]
    fn concept_panel() {
        let lines = format_concept(NodeId::Database.node());
        assert_eq!(
            lines,
            vec![
                "Database (Persistence)",
                "    실제 데이터가 저장되는 곳입니다. 테이블, 컬럼, 관계 등으로 구성됩니다.",
                "    Page: /concepts/database/",
            ]
        );
    }
}
