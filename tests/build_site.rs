//! End-to-end build: load content from a source directory, generate into a
//! temp output directory, and inspect the written pages.
//!
//! Run with: cargo test --test build_site

use layer_guide::config::load_config;
use layer_guide::content::ContentStore;
use layer_guide::generate::{PageKind, generate};
use layer_guide::output::format_generate_output;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn build(source: &Path) -> (TempDir, layer_guide::generate::GenerateReport) {
    let config = load_config(source).unwrap();
    let store = ContentStore::load(source).unwrap();
    let out = TempDir::new().unwrap();
    let report = generate(&store, &config, source, out.path()).unwrap();
    (out, report)
}

fn read(out: &TempDir, rel: &str) -> String {
    fs::read_to_string(out.path().join(rel))
        .unwrap_or_else(|e| panic!("failed to read {}: {}", rel, e))
}

#[test]
fn stock_site_has_every_page() {
    let source = TempDir::new().unwrap();
    let (out, report) = build(source.path());

    let expected = [
        "index.html",
        "download/index.html",
        "concepts/controller/index.html",
        "concepts/dto/index.html",
        "concepts/service/index.html",
        "concepts/entity/index.html",
        "concepts/dao/index.html",
        "concepts/database/index.html",
        "scenarios/user-registration/1/index.html",
        "scenarios/user-registration/5/index.html",
        "scenarios/user-query/5/index.html",
        "scenarios/user-update/4/index.html",
    ];
    for rel in expected {
        assert!(out.path().join(rel).is_file(), "{} was not generated", rel);
    }
    assert!(!out.path().join("scenarios/user-update/5").exists());
    assert_eq!(report.count(PageKind::ScenarioStep), 14);
}

#[test]
fn home_page_links_resolve_to_generated_pages() {
    let source = TempDir::new().unwrap();
    let (out, _) = build(source.path());
    let home = read(&out, "index.html");

    for href in ["/download/", "/concepts/entity/", "/scenarios/user-query/2/"] {
        assert!(home.contains(&format!("href=\"{}\"", href)), "missing link {}", href);
        let rel = format!("{}index.html", href.trim_start_matches('/'));
        assert!(out.path().join(&rel).is_file(), "{} does not exist", rel);
    }
}

#[test]
fn last_step_page_has_no_next_link() {
    let source = TempDir::new().unwrap();
    let (out, _) = build(source.path());

    let last = read(&out, "scenarios/user-update/4/index.html");
    assert!(last.contains("단계 4 / 4"));
    assert!(last.contains(r#"data-nav="prev""#));
    assert!(!last.contains(r#"data-nav="next""#));
    assert!(last.contains("UPDATE users"));

    let first = read(&out, "scenarios/user-update/1/index.html");
    assert!(!first.contains(r#"data-nav="prev""#));
    assert!(first.contains(r#"href="/scenarios/user-update/2/" data-nav="next""#));
}

#[test]
fn concept_page_shows_selected_node_panel() {
    let source = TempDir::new().unwrap();
    let (out, _) = build(source.path());

    let page = read(&out, "concepts/entity/index.html");
    assert!(page.contains(r#"<aside class="concept-info""#));
    assert!(page.contains("JPA가 관리합니다"));
    assert_eq!(page.matches(r#"class="concept-node is-active""#).count(), 1);
    assert!(!read(&out, "index.html").contains(r#"<aside class="concept-info""#));
}

#[test]
fn content_overrides_and_config_flow_into_output() {
    let source = TempDir::new().unwrap();
    fs::write(
        source.path().join("config.toml"),
        r##"
[site]
title = "Layering 101"
lang = "en"

[search]
fields = ["term", "example"]

[colors.light]
primary = "#ff0066"
"##,
    )
    .unwrap();
    fs::write(
        source.path().join("glossary.toml"),
        r#"
[[entries]]
term = "Value <Object>"
term_en = "VO"
definition = "Compared by value."
example = "Money.of(10)"
"#,
    )
    .unwrap();
    fs::create_dir_all(source.path().join("assets")).unwrap();
    fs::write(source.path().join("assets/dao-dto-reference.pdf"), b"%PDF-1.4").unwrap();

    let (out, report) = build(source.path());
    let home = read(&out, "index.html");

    assert!(home.contains("<title>Layering 101</title>"));
    assert!(home.contains(r#"<html lang="en">"#));
    assert!(home.contains("--color-primary: #ff0066;"));
    assert!(home.contains(r#"data-search-fields="term example""#));
    assert!(home.contains("Value &lt;Object&gt;"));
    assert_eq!(home.matches("<article class=\"glossary-card\"").count(), 1);

    assert!(report.artifact_present);
    assert!(out.path().join("dao-dto-reference.pdf").is_file());
    let config = load_config(source.path()).unwrap();
    let lines = format_generate_output(&report, &config);
    assert!(!lines.iter().any(|l| l.starts_with("Warning")));
    let summary = lines.iter().find(|l| l.starts_with("Generated ")).unwrap();
    assert!(summary.ends_with(&format!(" in {}", out.path().display())));
}

#[test]
fn empty_scenario_is_rejected_on_load() {
    let source = TempDir::new().unwrap();
    fs::write(
        source.path().join("scenarios.toml"),
        "[[scenarios]]\nid = \"x\"\ntitle = \"t\"\ndescription = \"d\"\nsteps = []\n",
    )
    .unwrap();
    let err = ContentStore::load(source.path()).unwrap_err();
    assert!(err.to_string().contains("scenario 'x' has no steps"));
}
