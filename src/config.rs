//! Runtime settings from `THIRDSPACE_*` environment variables.
//!
//! Parsing is lenient: a malformed value is logged and the default is used.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::warn;

use crate::card::state::DEFAULT_VISIBILITY_THRESHOLD;
use crate::device::DeviceClass;

const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
const CATALOG_FILE: &str = "projects.json";
const OUTBOX_DIR: &str = "outbox";
const DEFAULT_ASSET_ROOT: &str = "public";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub device_override: Option<DeviceClass>,
    pub viewport_width: u32,
    pub user_agent: Option<String>,
    pub visibility_threshold: f32,
    pub layout_seed: Option<u64>,
    pub catalog_path: Option<PathBuf>,
    pub outbox_dir: Option<PathBuf>,
    /// Directory that site-relative media paths resolve against.
    pub asset_root: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device_override: None,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            user_agent: None,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            layout_seed: None,
            catalog_path: None,
            outbox_dir: None,
            asset_root: PathBuf::from(DEFAULT_ASSET_ROOT),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let device_override = var("THIRDSPACE_DEVICE").and_then(|v| match v.parse() {
            Ok(device) => Some(device),
            Err(e) => {
                warn!("Ignoring THIRDSPACE_DEVICE: {}", e);
                None
            }
        });

        let viewport_width = parse_or(
            "THIRDSPACE_VIEWPORT_WIDTH",
            var("THIRDSPACE_VIEWPORT_WIDTH"),
            defaults.viewport_width,
        );

        let visibility_threshold = var("THIRDSPACE_VISIBILITY_THRESHOLD")
            .and_then(|v| v.parse::<f32>().ok())
            .filter(|t| (0.0..=1.0).contains(t))
            .unwrap_or(defaults.visibility_threshold);

        let layout_seed = var("THIRDSPACE_LAYOUT_SEED").and_then(|v| match v.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(_) => {
                warn!(value = %v, "Ignoring THIRDSPACE_LAYOUT_SEED");
                None
            }
        });

        Self {
            device_override,
            viewport_width,
            user_agent: var("THIRDSPACE_USER_AGENT"),
            visibility_threshold,
            layout_seed,
            catalog_path: var("THIRDSPACE_CATALOG").map(PathBuf::from),
            outbox_dir: var("THIRDSPACE_OUTBOX").map(PathBuf::from),
            asset_root: var("THIRDSPACE_ASSETS")
                .map(PathBuf::from)
                .unwrap_or(defaults.asset_root),
        }
    }

    /// Explicit override first, then viewport and user-agent detection.
    pub fn device_class(&self) -> DeviceClass {
        self.device_override.unwrap_or_else(|| {
            DeviceClass::detect(self.viewport_width, self.user_agent.as_deref())
        })
    }

    /// Catalog override path, defaulting to `projects.json` in the config dir.
    pub fn catalog_path(&self) -> Result<PathBuf> {
        match &self.catalog_path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.config_dir().join(CATALOG_FILE)),
        }
    }

    /// Outbox directory, defaulting to `outbox/` in the data dir.
    pub fn outbox_dir(&self) -> Result<PathBuf> {
        match &self.outbox_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().join(OUTBOX_DIR)),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "thirdspace").context("Failed to determine project directories")
}

fn parse_or<T: std::str::FromStr + Copy>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        Some(v) => v.parse().unwrap_or_else(|_| {
            warn!(key, value = %v, "Invalid value, using default");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]);
        assert_eq!(s, Settings::default());
        assert_eq!(s.device_class(), DeviceClass::Desktop);
        assert_eq!(s.visibility_threshold, 0.5);
    }

    #[test]
    fn test_overrides() {
        let s = settings(&[
            ("THIRDSPACE_DEVICE", "Mobile"),
            ("THIRDSPACE_VISIBILITY_THRESHOLD", "0.25"),
            ("THIRDSPACE_LAYOUT_SEED", "7"),
            ("THIRDSPACE_CATALOG", "/tmp/projects.json"),
            ("THIRDSPACE_OUTBOX", "/tmp/outbox"),
            ("THIRDSPACE_ASSETS", "/srv/site/public"),
        ]);
        assert_eq!(s.device_class(), DeviceClass::Mobile);
        assert_eq!(s.visibility_threshold, 0.25);
        assert_eq!(s.layout_seed, Some(7));
        assert_eq!(
            s.catalog_path().unwrap(),
            PathBuf::from("/tmp/projects.json")
        );
        assert_eq!(s.outbox_dir().unwrap(), PathBuf::from("/tmp/outbox"));
        assert_eq!(s.asset_root, PathBuf::from("/srv/site/public"));
    }

    #[test]
    fn test_detection_from_viewport_and_agent() {
        let narrow = settings(&[("THIRDSPACE_VIEWPORT_WIDTH", "600")]);
        assert_eq!(narrow.device_class(), DeviceClass::Mobile);

        let phone = settings(&[
            ("THIRDSPACE_VIEWPORT_WIDTH", "1024"),
            ("THIRDSPACE_USER_AGENT", "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)"),
        ]);
        assert_eq!(phone.device_class(), DeviceClass::Mobile);

        let forced = settings(&[
            ("THIRDSPACE_VIEWPORT_WIDTH", "600"),
            ("THIRDSPACE_DEVICE", "desktop"),
        ]);
        assert_eq!(forced.device_class(), DeviceClass::Desktop);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let s = settings(&[
            ("THIRDSPACE_DEVICE", "fridge"),
            ("THIRDSPACE_VIEWPORT_WIDTH", "wide"),
            ("THIRDSPACE_VISIBILITY_THRESHOLD", "1.5"),
            ("THIRDSPACE_LAYOUT_SEED", "-3"),
            ("THIRDSPACE_CATALOG", "   "),
        ]);
        assert_eq!(s, Settings::default());
    }
}
