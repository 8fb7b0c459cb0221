//! URL routing for the generated site.
//!
//! Two screens are reachable by path: home at `/` and the reference
//! download page at `/download`. The remaining generated pages are
//! pre-rendered UI states of the home screen: a selected diagram node, or a
//! scenario at step *n*. They live under `/concepts/` and `/scenarios/`.
//!
//! Every page is written as `<dir>/index.html` so URLs need no extension.

use crate::diagram::NodeId;

/// A top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Download,
}

impl Screen {
    pub const ALL: [Screen; 2] = [Screen::Home, Screen::Download];

    /// Site-absolute URL.
    pub fn href(self) -> &'static str {
        match self {
            Screen::Home => "/",
            Screen::Download => "/download/",
        }
    }

    /// Output file path relative to the site root.
    pub fn output_path(self) -> &'static str {
        match self {
            Screen::Home => "index.html",
            Screen::Download => "download/index.html",
        }
    }

    /// Resolve a request path. Trailing slashes and `index.html` are
    /// accepted; anything else is `None`.
    pub fn from_path(path: &str) -> Option<Screen> {
        let trimmed = path
            .strip_suffix("index.html")
            .unwrap_or(path)
            .trim_matches('/');
        match trimmed {
            "" => Some(Screen::Home),
            "download" => Some(Screen::Download),
            _ => None,
        }
    }
}

/// Element id of the diagram section on the home page.
pub const DIAGRAM_ANCHOR: &str = "concept-graph";

/// Element id of the glossary section on the home page.
pub const GLOSSARY_ANCHOR: &str = "glossary";

/// Closing the diagram info panel returns to the home diagram.
pub fn diagram_close_href() -> String {
    format!("{}#{}", Screen::Home.href(), DIAGRAM_ANCHOR)
}

/// Page showing the diagram with `node` selected.
pub fn concept_href(node: NodeId) -> String {
    format!("/concepts/{}/", node.as_str())
}

pub fn concept_output_path(node: NodeId) -> String {
    format!("concepts/{}/index.html", node.as_str())
}

/// Page showing scenario `id` at zero-based `step`. Paths are 1-based.
pub fn scenario_step_href(id: &str, step: usize) -> String {
    format!("/scenarios/{}/{}/", id, step + 1)
}

pub fn scenario_step_output_path(id: &str, step: usize) -> String {
    format!("scenarios/{}/{}/index.html", id, step + 1)
}

/// Element id of a scenario's stepper on the home page.
pub fn scenario_anchor(id: &str) -> String {
    format!("scenario-{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_screens_resolve() {
        assert_eq!(Screen::from_path("/"), Some(Screen::Home));
        assert_eq!(Screen::from_path(""), Some(Screen::Home));
        assert_eq!(Screen::from_path("/index.html"), Some(Screen::Home));
        assert_eq!(Screen::from_path("/download"), Some(Screen::Download));
        assert_eq!(Screen::from_path("/download/"), Some(Screen::Download));
        assert_eq!(Screen::from_path("/download/index.html"), Some(Screen::Download));
    }

    #[test]
    fn unknown_paths_do_not_resolve() {
        assert_eq!(Screen::from_path("/about"), None);
        assert_eq!(Screen::from_path("/download/extra"), None);
    }

    #[test]
    fn hrefs_round_trip_through_from_path() {
        for screen in Screen::ALL {
            assert_eq!(Screen::from_path(screen.href()), Some(screen));
            assert_eq!(Screen::from_path(screen.output_path()), Some(screen));
        }
    }

    #[test]
    fn concept_paths() {
        assert_eq!(concept_href(NodeId::Database), "/concepts/database/");
        assert_eq!(concept_output_path(NodeId::Dto), "concepts/dto/index.html");
        assert_eq!(diagram_close_href(), "/#concept-graph");
    }

    #[test]
    fn scenario_step_paths_are_one_based() {
        assert_eq!(scenario_step_href("user-query", 0), "/scenarios/user-query/1/");
        assert_eq!(scenario_step_href("user-query", 1), "/scenarios/user-query/2/");
        assert_eq!(
            scenario_step_output_path("user-query", 4),
            "scenarios/user-query/5/index.html"
        );
        assert_eq!(scenario_anchor("user-query"), "scenario-user-query");
    }
}
