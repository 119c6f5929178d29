use tracing::{debug, warn};

use crate::models::ProjectCatalog;
use crate::sections::LandingSection;

/// Where unknown project ids are sent.
pub const PROJECTS_ANCHOR: &str = "/#projects";

/// A resolved page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Landing page, optionally scrolled to a section anchor.
    Landing { section: Option<String> },
    Project(String),
    Redirect(String),
}

/// Maps a request path to a page.
///
/// `/projects/<id>` and `/project/<id>` open a project when the catalog knows
/// the id and redirect to the landing projects section otherwise. Everything
/// else is the landing page.
pub fn resolve_route(path: &str, catalog: &ProjectCatalog) -> Route {
    let (path, fragment) = match path.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (path, None),
    };
    let path = path.split('?').next().unwrap_or_default();

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        ["projects" | "project", id] => {
            if catalog.get(id).is_some() {
                debug!(id, "Routing to project");
                Route::Project((*id).to_string())
            } else {
                warn!(id, "Unknown project, redirecting");
                Route::Redirect(PROJECTS_ANCHOR.to_string())
            }
        }
        _ => Route::Landing {
            section: fragment.filter(|f| !f.is_empty()).map(str::to_string),
        },
    }
}

/// Where the landing page scrolls once shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingScroll {
    Section(LandingSection),
    Top,
    Stay,
}

/// A known anchor wins over `scroll_to_top`; unknown anchors count as none.
pub fn landing_scroll(section: Option<&str>, scroll_to_top: bool) -> LandingScroll {
    match section.and_then(LandingSection::from_anchor) {
        Some(section) => LandingScroll::Section(section),
        None if scroll_to_top => LandingScroll::Top,
        None => LandingScroll::Stay,
    }
}
