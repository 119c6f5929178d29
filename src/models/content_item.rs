use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::card::IdleAnimation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "webp" | "gif" | "bmp" | "avif" => Some(Self::Image),
            "mp4" | "webm" | "mov" | "mkv" | "avi" => Some(Self::Video),
            _ => None,
        }
    }

    /// Classifies a media reference by its file extension.
    pub fn from_source(src: &str) -> Option<Self> {
        Path::new(src)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

fn default_show_button() -> bool {
    true
}

/// One tile of content as authored by the page that assembles a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub src: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_url: Option<String>,
    /// Explicit media kind; falls back to the file extension when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_video: Option<bool>,
    #[serde(default = "default_show_button")]
    pub show_button: bool,
    #[serde(default)]
    pub use_hover_effect: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_animation: Option<IdleAnimation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_src: Option<String>,
    #[serde(default, rename = "isComingSoon")]
    pub coming_soon: bool,
}

impl ContentItem {
    pub fn new(src: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            title: title.into(),
            description: None,
            project_url: None,
            is_video: None,
            show_button: true,
            use_hover_effect: false,
            idle_animation: None,
            logo_src: None,
            coming_soon: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_project_url(mut self, url: impl Into<String>) -> Self {
        self.project_url = Some(url.into());
        self
    }

    #[cfg(test)]
    pub fn with_hover_effect(
        mut self,
        logo_src: Option<&str>,
        idle: Option<IdleAnimation>,
    ) -> Self {
        self.use_hover_effect = true;
        self.logo_src = logo_src.map(str::to_string);
        self.idle_animation = idle;
        self
    }

    #[cfg(test)]
    pub fn with_show_button(mut self, show_button: bool) -> Self {
        self.show_button = show_button;
        self
    }

    #[cfg(test)]
    pub fn coming_soon(mut self) -> Self {
        self.coming_soon = true;
        self
    }

    /// Explicit flag first, then extension. Unclassifiable sources are treated
    /// as video, the default card medium.
    pub fn media_kind(&self) -> MediaKind {
        match self.is_video {
            Some(true) => MediaKind::Video,
            Some(false) => MediaKind::Image,
            None => MediaKind::from_source(&self.src).unwrap_or(MediaKind::Video),
        }
    }

    #[cfg(test)]
    pub fn is_video(&self) -> bool {
        self.media_kind() == MediaKind::Video
    }

    pub fn has_logo(&self) -> bool {
        self.logo_src.as_deref().is_some_and(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_from_extension() {
        assert_eq!(MediaKind::from_source("/videos/a.MP4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_source("img/b.webp"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_source("img/b"), None);
    }

    #[test]
    fn test_explicit_flag_wins() {
        let mut item = ContentItem::new("/img/bento-1.jpg", "Photoreal");
        assert_eq!(item.media_kind(), MediaKind::Image);
        item.is_video = Some(true);
        assert!(item.is_video());
        let unknown = ContentItem::new("stream", "Live");
        assert_eq!(unknown.media_kind(), MediaKind::Video);
    }

    #[test]
    fn test_deserialize_site_shape() {
        let json = r#"{
            "src": "/videos/Russell-Heights/rh_features-3.mp4",
            "title": "Displace Building Elements",
            "description": "Quickly break apart your models",
            "isVideo": true,
            "useHoverEffect": true,
            "logoSrc": "/img/Russell-Heights/displace.png",
            "idleAnimation": 2
        }"#;
        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert!(item.use_hover_effect);
        assert!(item.show_button);
        assert!(item.has_logo());
        assert_eq!(item.idle_animation, Some(IdleAnimation::Float));
        assert!(!item.coming_soon);
    }

    #[test]
    fn test_empty_logo_is_no_logo() {
        let item = ContentItem::new("videos/a.mp4", "A").with_hover_effect(Some(""), None);
        assert!(!item.has_logo());
    }
}
