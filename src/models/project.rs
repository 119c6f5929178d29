use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::ContentItem;
use crate::error::CatalogError;
use crate::layout::{GridPlan, LayoutSelection};

const BUILTIN_CATALOG: &str = include_str!("../../data/projects.json");

/// A case-study page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(alias = "heroImage")]
    pub hero_media: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub about_title: String,
    #[serde(default)]
    pub about_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_image: Option<String>,
    #[serde(default)]
    pub feature_title: String,
    #[serde(default)]
    pub feature_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bento_layout: Option<String>,
    /// Picks the template by seed; wins over `bento_layout`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_seed: Option<u64>,
    #[serde(default)]
    pub bento_items: Vec<ContentItem>,
}

impl Project {
    pub fn url(&self) -> String {
        format!("/projects/{}", self.id)
    }

    pub fn layout_selection(&self) -> LayoutSelection {
        match (self.layout_seed, &self.bento_layout) {
            (Some(seed), _) => LayoutSelection::Seeded(seed),
            (None, Some(key)) => LayoutSelection::Named(key.clone()),
            (None, None) => LayoutSelection::default(),
        }
    }

    pub fn grid_plan(&self) -> Option<GridPlan<'_>> {
        GridPlan::build(&self.bento_items, &self.layout_selection())
    }
}

/// Ordered, id-indexed set of projects.
#[derive(Debug, Clone)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
    by_id: HashMap<String, usize>,
}

impl ProjectCatalog {
    /// Catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let projects: Vec<Project> = serde_json::from_str(json)?;
        Self::from_projects(projects)
    }

    /// Rejects empty and duplicate ids.
    pub fn from_projects(projects: Vec<Project>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(projects.len());
        for (position, project) in projects.iter().enumerate() {
            if project.id.trim().is_empty() {
                return Err(CatalogError::EmptyId(position));
            }
            if by_id.insert(project.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(project.id.clone()));
            }
        }
        Ok(Self { projects, by_id })
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        info!(?path, projects = catalog.len(), "Loaded project catalog");
        Ok(catalog)
    }

    /// Loads `path` when it exists, otherwise the built-in catalog.
    ///
    /// A present but unreadable or invalid override is logged and skipped.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        if let Some(path) = path.filter(|p| p.exists()) {
            match Self::load(path) {
                Ok(catalog) => return Ok(catalog),
                Err(e) => warn!(?path, "Ignoring catalog override: {}", e),
            }
        } else {
            debug!("No catalog override, using built-in projects");
        }
        Self::builtin()
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.by_id.get(id).map(|&i| &self.projects[i])
    }

    #[cfg(test)]
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.projects.iter().map(|p| p.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// One card per project for the landing page grid.
    pub fn landing_items(&self) -> Vec<ContentItem> {
        self.projects
            .iter()
            .map(|p| {
                ContentItem::new(p.hero_media.clone(), p.title.clone())
                    .with_description(p.description.clone())
                    .with_project_url(p.url())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = ProjectCatalog::builtin().unwrap();
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["1700-spot", "shoquba"]);

        let spot = catalog.get("1700-spot").unwrap();
        assert_eq!(spot.bento_layout.as_deref(), Some("layout3"));
        assert_eq!(spot.bento_items.len(), 6);
        assert!(spot.bento_items.iter().any(|item| item.use_hover_effect));

        let shoquba = catalog.get("shoquba").unwrap();
        assert!(shoquba.bento_items.last().unwrap().coming_soon);
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_grid_plan_prefers_seed() {
        let catalog = ProjectCatalog::builtin().unwrap();
        let mut project = catalog.get("1700-spot").unwrap().clone();
        assert_eq!(project.grid_plan().unwrap().layout.key, "layout3");

        project.layout_seed = Some(1);
        assert_eq!(project.grid_plan().unwrap().layout.key, "layout2");

        project.layout_seed = None;
        project.bento_layout = None;
        assert_eq!(project.layout_selection(), LayoutSelection::default());

        project.bento_items.clear();
        assert!(project.grid_plan().is_none());
    }

    #[test]
    fn test_landing_items_link_to_projects() {
        let catalog = ProjectCatalog::builtin().unwrap();
        let items = catalog.landing_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].project_url.as_deref(), Some("/projects/1700-spot"));
        assert!(items[0].is_video());
    }

    #[test]
    fn test_rejects_bad_ids() {
        let dup = r#"[
            {"id": "a", "title": "A", "heroMedia": "/videos/hero-1.mp4"},
            {"id": "a", "title": "B", "heroMedia": "/videos/hero-2.mp4"}
        ]"#;
        assert!(matches!(
            ProjectCatalog::from_json(dup),
            Err(CatalogError::DuplicateId(id)) if id == "a"
        ));

        let empty = r#"[{"id": " ", "title": "A", "heroImage": "/img/a.jpg"}]"#;
        assert!(matches!(
            ProjectCatalog::from_json(empty),
            Err(CatalogError::EmptyId(0))
        ));

        assert!(matches!(
            ProjectCatalog::from_json("{"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "pavilion", "title": "Pavilion",
                "heroImage": "/img/pavilion.jpg", "layoutSeed": 2}}]"#
        )
        .unwrap();

        let catalog = ProjectCatalog::load_or_builtin(Some(file.path())).unwrap();
        assert_eq!(catalog.len(), 1);
        let pavilion = catalog.get("pavilion").unwrap();
        assert_eq!(pavilion.hero_media, "/img/pavilion.jpg");
        assert_eq!(pavilion.layout_selection(), LayoutSelection::Seeded(2));
    }

    #[test]
    fn test_invalid_override_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        std::fs::write(&path, "not json").unwrap();

        let catalog = ProjectCatalog::load_or_builtin(Some(&path)).unwrap();
        assert!(catalog.get("shoquba").is_some());

        let missing = dir.path().join("absent.json");
        assert!(ProjectCatalog::load_or_builtin(Some(&missing)).is_ok());
        assert!(matches!(
            ProjectCatalog::load(&missing),
            Err(CatalogError::Io { .. })
        ));
    }
}
