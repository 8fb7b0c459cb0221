//! HTML site generation.
//!
//! Stage 2 of the build. Takes the loaded [`ContentStore`] and the
//! [`SiteConfig`] and writes the static site.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): layer diagram, every scenario at step 1, and
//!   the searchable glossary
//! - **Download** (`/download/index.html`): reference document, further
//!   reading and study tips
//! - **Concept pages** (`/concepts/<node>/index.html`): the diagram with one
//!   node selected and its info panel open
//! - **Scenario step pages** (`/scenarios/<id>/<n>/index.html`): one
//!   scenario stepper positioned at step *n*
//!
//! Interactive state is rendered from the view-models in [`crate::diagram`],
//! [`crate::stepper`] and [`crate::search`], so every state a visitor can
//! reach by clicking is also a plain HTML page.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: base styles (colors injected from config)
//! - `static/search.js`: in-browser glossary filter
//! - `static/nav.js`: ←/→ for scenario steps, Escape to close the panel
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::{self, ConfigError, SiteConfig};
use crate::content::{ContentError, ContentStore};
use crate::diagram::{self, DiagramSelection, EDGES, EdgeKind, NODES};
use crate::router::{self, Screen};
use crate::search::{ContentSearch, GlossaryField};
use crate::stepper::ScenarioStepper;
use crate::types::{DownloadContent, GlossaryEntry, Scenario};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk assets: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const SEARCH_JS: &str = include_str!("../static/search.js");
const NAV_JS: &str = include_str!("../static/nav.js");

/// What kind of page a [`GeneratedPage`] is, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Screen,
    Concept,
    ScenarioStep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub kind: PageKind,
    pub title: String,
    /// Path relative to the output directory.
    pub path: String,
}

/// Summary of a generate run, consumed by the output module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    pub pages: Vec<GeneratedPage>,
    /// Asset files copied, relative to the output directory.
    pub assets: Vec<String>,
    /// Site path of the download artifact and whether it was found.
    pub artifact_path: String,
    pub artifact_present: bool,
}

impl GenerateReport {
    pub fn count(&self, kind: PageKind) -> usize {
        self.pages.iter().filter(|p| p.kind == kind).count()
    }
}

/// Where the download artifact is expected inside the content directory.
pub fn artifact_source_path(config: &SiteConfig, source: &Path) -> PathBuf {
    source
        .join(&config.assets_dir)
        .join(config.download.artifact_relative_path())
}

pub fn generate(
    store: &ContentStore,
    config: &SiteConfig,
    source: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    config.validate()?;
    let css = format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC);
    let mut pages = Vec::new();

    fs::create_dir_all(output_dir)?;

    // Pages are written after assets and win on a path collision
    let assets = copy_assets(&source.join(&config.assets_dir), output_dir)?;

    let home = render_home(store, config, &css)?;
    write_page(output_dir, Screen::Home.output_path(), home)?;
    pages.push(GeneratedPage {
        kind: PageKind::Screen,
        title: "Home".to_string(),
        path: Screen::Home.output_path().to_string(),
    });

    let download = render_download_page(&store.download, config, &css);
    write_page(output_dir, Screen::Download.output_path(), download)?;
    pages.push(GeneratedPage {
        kind: PageKind::Screen,
        title: "Download".to_string(),
        path: Screen::Download.output_path().to_string(),
    });

    for node in &NODES {
        let path = router::concept_output_path(node.id);
        let selection = DiagramSelection::with_selected(node.id);
        write_page(output_dir, &path, render_concept_page(&selection, config, &css))?;
        pages.push(GeneratedPage {
            kind: PageKind::Concept,
            title: node.label.to_string(),
            path,
        });
    }

    for scenario in &store.scenarios {
        let mut stepper = first_step(store, scenario)?;
        loop {
            let path = router::scenario_step_output_path(&scenario.id, stepper.current_index());
            write_page(output_dir, &path, render_scenario_page(&stepper, config, &css))?;
            pages.push(GeneratedPage {
                kind: PageKind::ScenarioStep,
                title: format!("{} ({})", scenario.title, stepper.current_step().layer),
                path,
            });
            if !stepper.next() {
                break;
            }
        }
    }

    let artifact_present = artifact_source_path(config, source).is_file();

    Ok(GenerateReport {
        output_dir: output_dir.to_path_buf(),
        pages,
        assets,
        artifact_path: config.download.artifact_path.clone(),
        artifact_present,
    })
}

/// Stepper at step 1. Validated content never has empty scenarios, but a
/// hand-built store can.
fn first_step<'a>(
    store: &ContentStore,
    scenario: &'a Scenario,
) -> Result<ScenarioStepper<'a>, GenerateError> {
    ScenarioStepper::new(scenario).ok_or_else(|| {
        GenerateError::Content(ContentError::EmptyScenario {
            origin: store.origins.scenarios.clone(),
            id: scenario.id.clone(),
        })
    })
}

fn write_page(output_dir: &Path, rel_path: &str, markup: Markup) -> std::io::Result<()> {
    let path = output_dir.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, markup.into_string())
}

/// Copy every file under `src` into `dst`, preserving relative paths.
///
/// A missing assets directory is not an error.
fn copy_assets(src: &Path, dst: &Path) -> Result<Vec<String>, GenerateError> {
    let mut copied = Vec::new();
    if !src.is_dir() {
        return Ok(copied);
    }
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied.push(rel.to_string_lossy().replace('\\', "/"));
        }
    }
    Ok(copied)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    title: &str,
    config: &SiteConfig,
    css: &str,
    body_class: Option<&str>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(config.site.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// Header for secondary pages: a way home plus a page heading.
fn back_header(heading: &str) -> Markup {
    html! {
        header.page-header {
            div.container {
                a.back-link href=(Screen::Home.href()) { "← 홈으로 돌아가기" }
                h1.page-title { (heading) }
            }
        }
    }
}

fn page_title(page: &str, config: &SiteConfig) -> String {
    format!("{} · {}", page, config.site.title)
}

/// CSS modifier for a layer badge. Unknown layers share a neutral style.
pub fn layer_badge_class(layer: &str) -> &'static str {
    let lower = layer.to_lowercase();
    if lower.contains("controller") {
        "layer-controller"
    } else if lower.contains("service") {
        "layer-service"
    } else if lower.contains("repository") || lower.contains("dao") {
        "layer-dao"
    } else if lower.contains("entity") {
        "layer-entity"
    } else if lower.contains("database") {
        "layer-database"
    } else if lower.contains("mapper") || lower.contains("dto") {
        "layer-dto"
    } else {
        "layer-other"
    }
}

/// Renders the layer diagram in the given selection state.
///
/// Each node is an SVG link to its concept page, which makes both pointer
/// clicks and Enter on a focused node select it. The info panel is only
/// present while a node is selected.
pub fn render_concept_graph(selection: &DiagramSelection) -> Markup {
    html! {
        div.concept-graph id=(router::DIAGRAM_ANCHOR) {
            header.concept-graph-header {
                h3.concept-graph-title { "계층 간 관계도" }
                p.concept-graph-subtitle { "각 계층을 클릭하여 자세한 설명을 확인하세요" }
            }
            div.concept-graph-container {
                svg.concept-graph-svg
                    viewBox=(format!("0 0 {} {}", diagram::VIEW_WIDTH, diagram::VIEW_HEIGHT))
                    role="group"
                    aria-label="DAO, DTO, Entity 관계도" {
                    defs {
                        marker id="arrowhead" markerWidth="10" markerHeight="10" refX="9" refY="3" orient="auto" {
                            polygon.arrowhead points="0 0, 10 3, 0 6" {}
                        }
                    }
                    g.connections {
                        @for edge in &EDGES {
                            @let seg = diagram::edge_segment(edge);
                            @match edge.kind {
                                EdgeKind::Flow => {
                                    line.edge-flow x1=(seg.x1) y1=(seg.y1) x2=(seg.x2) y2=(seg.y2)
                                        marker-end="url(#arrowhead)" {}
                                }
                                EdgeKind::CrossReference => {
                                    line.edge-cross x1=(seg.x1) y1=(seg.y1) x2=(seg.x2) y2=(seg.y2)
                                        stroke-dasharray="5,5" {}
                                }
                            }
                        }
                    }
                    @for node in &NODES {
                        @let rect = diagram::node_box(node.id);
                        @let active = selection.is_selected(node.id);
                        a.concept-node.is-active[active]
                            href=(router::concept_href(node.id))
                            aria-label=(node.label)
                            aria-current=[active.then_some("true")] {
                            rect x=(rect.x) y=(rect.y) width=(rect.width) height=(rect.height) rx="8" {}
                            text.node-label x=(rect.center_x()) y=(rect.y + 25) text-anchor="middle" {
                                (node.label)
                            }
                            text.node-caption x=(rect.center_x()) y=(rect.y + 45) text-anchor="middle" {
                                (node.caption)
                            }
                        }
                    }
                }
                @if let Some(node) = selection.selected() {
                    aside.concept-info role="complementary" {
                        div.concept-info-header {
                            h4.concept-info-title { (node.label) }
                            span.concept-info-subtitle { (node.label_en) }
                        }
                        p.concept-info-description { (node.description) }
                        a.concept-info-close href=(router::diagram_close_href())
                            data-nav="close" aria-label="설명 닫기" {
                            "닫기"
                        }
                    }
                }
            }
        }
    }
}

/// Renders one glossary entry.
///
/// The `data-*` attributes carry the raw field text for `search.js`.
pub fn render_glossary_card(entry: &GlossaryEntry) -> Markup {
    html! {
        article.glossary-card
            data-term=(entry.term)
            data-term-en=(entry.term_en)
            data-definition=(entry.definition)
            data-example=[entry.example.as_deref()] {
            header.glossary-card-header {
                h3.glossary-card-term { (entry.term) }
                span.glossary-card-term-en title=(entry.term_en) { (entry.term_en) }
            }
            div.glossary-card-content {
                p.glossary-card-definition { (entry.definition) }
                @if let Some(example) = &entry.example {
                    div.glossary-card-example {
                        span.glossary-card-example-label { "예제:" }
                        code { (example) }
                    }
                }
            }
        }
    }
}

fn search_fields_attr(fields: &[GlossaryField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the glossary search box and the cards visible for the current
/// query. The count shows for any non-empty query, whitespace included; the
/// empty-state message needs a query with no matches. `search.js` keeps both
/// in sync in the browser.
pub fn render_glossary_section(
    search: &ContentSearch<'_, GlossaryEntry>,
    placeholder: &str,
) -> Markup {
    let has_query = !search.query().is_empty();
    html! {
        div.glossary-search {
            input.glossary-search-input
                type="search"
                id="glossary-search"
                placeholder=(placeholder)
                value=(search.query())
                aria-label="용어 검색"
                aria-controls="glossary-list";
            p.glossary-search-results id="glossary-results" aria-live="polite" hidden[!has_query] {
                span.glossary-results-count { (search.filtered_count()) }
                "개의 결과를 찾았습니다"
            }
        }
        div.glossary-list
            id="glossary-list"
            data-search-fields=(search_fields_attr(search.fields())) {
            @for entry in search.filtered_items() {
                (render_glossary_card(entry))
            }
        }
        p.glossary-no-results id="glossary-empty" hidden[!(has_query && !search.has_results())] {
            "검색 결과가 없습니다. 다른 검색어를 시도해보세요."
        }
    }
}

/// Renders a scenario stepper at its current position.
///
/// Previous/next and the position dots link to the pre-rendered page for
/// the target step; at either end the control is rendered disabled.
pub fn render_stepper(stepper: &ScenarioStepper<'_>) -> Markup {
    let scenario = stepper.scenario();
    let step = stepper.current_step();
    let progress = stepper.progress();
    let current = stepper.current_index();

    html! {
        div.scenario-stepper id=(router::scenario_anchor(&scenario.id)) {
            header.scenario-stepper-header {
                h3.scenario-stepper-title { (scenario.title) }
                p.scenario-stepper-description { (scenario.description) }
            }
            div.scenario-stepper-progress {
                div.scenario-stepper-progress-bar {
                    div.scenario-stepper-progress-fill
                        style=(format!("width: {}%", progress.percent()))
                        role="progressbar"
                        aria-valuenow=(progress.position)
                        aria-valuemin="1"
                        aria-valuemax=(progress.total) {}
                }
                span.scenario-stepper-progress-text { (progress) }
            }
            div.scenario-stepper-step {
                div.scenario-stepper-step-header {
                    span class={ "layer-badge " (layer_badge_class(&step.layer)) } { (step.layer) }
                }
                p.scenario-stepper-step-description { (step.description) }
                @if let Some(code) = &step.code {
                    pre.scenario-stepper-code { code { (code) } }
                }
            }
            nav.scenario-stepper-controls aria-label="시나리오 단계 탐색" {
                @match stepper.previous_index() {
                    Some(prev) => {
                        a.stepper-button.stepper-prev
                            href=(router::scenario_step_href(&scenario.id, prev))
                            data-nav="prev"
                            aria-label="이전 단계" { "← 이전" }
                    }
                    None => {
                        span.stepper-button.stepper-prev.is-disabled aria-disabled="true" { "← 이전" }
                    }
                }
                div.scenario-stepper-dots {
                    @for index in 0..stepper.step_count() {
                        @let is_current = index == current;
                        a.stepper-dot.is-active[is_current]
                            href=(router::scenario_step_href(&scenario.id, index))
                            aria-label=(format!("단계 {}로 이동", index + 1))
                            aria-current=[is_current.then_some("step")] {}
                    }
                }
                @match stepper.next_index() {
                    Some(next) => {
                        a.stepper-button.stepper-next
                            href=(router::scenario_step_href(&scenario.id, next))
                            data-nav="next"
                            aria-label="다음 단계" { "다음 →" }
                    }
                    None => {
                        span.stepper-button.stepper-next.is-disabled aria-disabled="true" { "다음 →" }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home screen: diagram, scenarios at step 1, glossary.
fn render_home(store: &ContentStore, config: &SiteConfig, css: &str) -> Result<Markup, GenerateError> {
    let mut steppers = Vec::with_capacity(store.scenarios.len());
    for scenario in &store.scenarios {
        steppers.push(first_step(store, scenario)?);
    }
    let search = ContentSearch::new(&store.glossary, &config.search.fields);

    let content = html! {
        header.home-header {
            div.container {
                h1.home-title { (config.site.title) }
                p.home-description { (config.site.description) }
                nav.home-nav aria-label="주요 네비게이션" {
                    a.home-nav-link href=(Screen::Download.href()) { "📥 참고 자료 다운로드" }
                }
            }
        }
        main.home-main {
            div.container {
                section.home-section {
                    h2.section-title { "계층 구조 이해하기" }
                    (render_concept_graph(&DiagramSelection::new()))
                }
                section.home-section {
                    h2.section-title { "시나리오로 배우기" }
                    div.scenario-list {
                        @for stepper in &steppers {
                            (render_stepper(stepper))
                        }
                    }
                }
                section.home-section id=(router::GLOSSARY_ANCHOR) {
                    h2.section-title { "용어 사전" }
                    (render_glossary_section(&search, &config.search.placeholder))
                }
            }
        }
        (site_footer(config))
        script { (PreEscaped(SEARCH_JS)) }
    };

    Ok(base_document(&config.site.title, config, css, Some("home"), content))
}

fn site_footer(config: &SiteConfig) -> Markup {
    html! {
        footer.site-footer {
            div.container {
                @if !config.site.reference_url.is_empty() {
                    p {
                        "학습 자료는 "
                        a href=(config.site.reference_url) target="_blank" rel="noopener noreferrer" {
                            "이 블로그 글"
                        }
                        "을 참고하여 제작되었습니다."
                    }
                }
            }
        }
    }
}

/// Renders the download screen.
fn render_download_page(download: &DownloadContent, config: &SiteConfig, css: &str) -> Markup {
    let parser = Parser::new(&download.tips);
    let mut tips_html = String::new();
    md_html::push_html(&mut tips_html, parser);

    let content = html! {
        (back_header("참고 자료 다운로드"))
        main.download-main {
            div.container {
                section.download-section {
                    div.download-card {
                        div.download-card-icon { "📄" }
                        h2.download-card-title { (download.artifact.title) }
                        p.download-card-description { (download.artifact.description) }
                        @if !download.artifact.contents.is_empty() {
                            div.download-card-details {
                                strong { "포함 내용:" }
                                ul.download-detail-list {
                                    @for item in &download.artifact.contents {
                                        li { (item) }
                                    }
                                }
                            }
                        }
                        a.download-button
                            href=(config.download.artifact_path)
                            download
                            aria-label="PDF 참고 자료 다운로드" {
                            "📥 PDF 다운로드"
                        }
                    }
                }
                @if !download.resources.is_empty() {
                    section.download-section {
                        h2.section-title { "추가 학습 자료" }
                        div.download-resources {
                            @for resource in &download.resources {
                                article.download-resource {
                                    h3.download-resource-title { (resource.title) }
                                    p.download-resource-description { (resource.description) }
                                    a.download-resource-link
                                        href=(resource.url)
                                        target="_blank"
                                        rel="noopener noreferrer" {
                                        (resource.link_label) " →"
                                    }
                                }
                            }
                        }
                    }
                }
                @if !tips_html.trim().is_empty() {
                    section.download-section {
                        div.download-info-box {
                            h2.download-info-title { "💡 학습 팁" }
                            div.download-info-body { (PreEscaped(tips_html)) }
                        }
                    }
                }
            }
        }
        footer.site-footer {
            div.container {
                p { "궁금한 점이 있으시면 언제든지 질문해주세요!" }
            }
        }
    };

    base_document(
        &page_title("참고 자료 다운로드", config),
        config,
        css,
        Some("download"),
        content,
    )
}

/// Renders the diagram with a node selected.
fn render_concept_page(selection: &DiagramSelection, config: &SiteConfig, css: &str) -> Markup {
    let heading = selection.selected().map(|n| n.label).unwrap_or("계층 구조");
    let content = html! {
        (back_header(heading))
        main.concept-main {
            div.container {
                (render_concept_graph(selection))
            }
        }
        script { (PreEscaped(NAV_JS)) }
    };
    base_document(&page_title(heading, config), config, css, Some("concept"), content)
}

/// Renders a single scenario stepper at its current step.
fn render_scenario_page(stepper: &ScenarioStepper<'_>, config: &SiteConfig, css: &str) -> Markup {
    let scenario = stepper.scenario();
    let content = html! {
        (back_header(&scenario.title))
        main.scenario-main {
            div.container {
                (render_stepper(stepper))
            }
        }
        script { (PreEscaped(NAV_JS)) }
    };
    let title = format!("{} ({})", scenario.title, stepper.progress());
    base_document(&page_title(&title, config), config, css, Some("scenario"), content)
}

// ============================================================================
// Tests
// ============================================================================
