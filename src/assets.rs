//! Static asset naming conventions.
//!
//! Content authors ship every video as `videos/<name>.mp4`, with a still
//! `img/<name>-mobile.webp` for mobile and an `img/<name>-poster.jpg` poster
//! frame. `<name>` may contain subdirectories and the whole path may be rooted
//! (`/videos/...`); both are carried over unchanged.

use serde::Serialize;
use tracing::debug;

use crate::device::DeviceClass;
use crate::models::MediaKind;

const VIDEO_DIR: &str = "videos/";
const IMAGE_DIR: &str = "img/";
const VIDEO_EXT: &str = ".mp4";
const MOBILE_SUFFIX: &str = "-mobile.webp";
const POSTER_SUFFIX: &str = "-poster.jpg";

/// A media reference ready to hand to a picture or video element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaSource {
    pub src: String,
    pub kind: MediaKind,
    pub poster: Option<String>,
}

/// Splits a conventional video path into its root prefix and `<name>`.
fn video_name(src: &str) -> Option<(&str, &str)> {
    let (root, rest) = match src.strip_prefix('/') {
        Some(rest) => ("/", rest),
        None => ("", src),
    };
    let name = rest.strip_prefix(VIDEO_DIR)?.strip_suffix(VIDEO_EXT)?;
    if name.is_empty() {
        None
    } else {
        Some((root, name))
    }
}

pub fn video_path(name: &str) -> String {
    format!("{VIDEO_DIR}{name}{VIDEO_EXT}")
}

pub fn mobile_image_path(name: &str) -> String {
    format!("{IMAGE_DIR}{name}{MOBILE_SUFFIX}")
}

pub fn poster_path(name: &str) -> String {
    format!("{IMAGE_DIR}{name}{POSTER_SUFFIX}")
}

/// `videos/<name>.mp4` -> `img/<name>-mobile.webp`; `None` off-convention.
pub fn mobile_image_for(src: &str) -> Option<String> {
    video_name(src).map(|(root, name)| format!("{root}{}", mobile_image_path(name)))
}

/// `videos/<name>.mp4` -> `img/<name>-poster.jpg`; `None` off-convention.
pub fn poster_for(src: &str) -> Option<String> {
    video_name(src).map(|(root, name)| format!("{root}{}", poster_path(name)))
}

/// Picks what a card actually loads for `src` on `device`.
///
/// Mobile never autoplays video: conventional video paths become their still
/// image. A video outside the convention is kept as-is.
pub fn resolve_media(src: &str, kind: MediaKind, device: DeviceClass) -> MediaSource {
    if kind != MediaKind::Video {
        return MediaSource {
            src: src.to_string(),
            kind,
            poster: None,
        };
    }

    if device.is_mobile() {
        if let Some(still) = mobile_image_for(src) {
            return MediaSource {
                src: still,
                kind: MediaKind::Image,
                poster: None,
            };
        }
        debug!(src, "Video does not follow the asset convention, keeping it on mobile");
    }

    MediaSource {
        src: src.to_string(),
        kind: MediaKind::Video,
        poster: poster_for(src),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_substitution() {
        assert_eq!(
            mobile_image_for("videos/hero-1.mp4").as_deref(),
            Some("img/hero-1-mobile.webp")
        );
        assert_eq!(
            mobile_image_for("/videos/Russell-Heights/rh_features-2.mp4").as_deref(),
            Some("/img/Russell-Heights/rh_features-2-mobile.webp")
        );
    }

    #[test]
    fn test_poster() {
        assert_eq!(
            poster_for("videos/hero-3.mp4").as_deref(),
            Some("img/hero-3-poster.jpg")
        );
        assert_eq!(poster_path("hero-2"), "img/hero-2-poster.jpg");
    }

    #[test]
    fn test_off_convention_sources() {
        assert_eq!(mobile_image_for("clips/hero-1.mp4"), None);
        assert_eq!(mobile_image_for("videos/hero-1.webm"), None);
        assert_eq!(mobile_image_for("videos/.mp4"), None);
        assert_eq!(poster_for("/img/bento-1.jpg"), None);
    }

    #[test]
    fn test_resolve_media_by_device() {
        let desktop = resolve_media("videos/hero-1.mp4", MediaKind::Video, DeviceClass::Desktop);
        assert_eq!(desktop.src, "videos/hero-1.mp4");
        assert_eq!(desktop.kind, MediaKind::Video);
        assert_eq!(desktop.poster.as_deref(), Some("img/hero-1-poster.jpg"));

        let mobile = resolve_media("videos/hero-1.mp4", MediaKind::Video, DeviceClass::Mobile);
        assert_eq!(mobile.src, "img/hero-1-mobile.webp");
        assert_eq!(mobile.kind, MediaKind::Image);

        let image = resolve_media("/img/bento-1.jpg", MediaKind::Image, DeviceClass::Mobile);
        assert_eq!(image.src, "/img/bento-1.jpg");

        let odd = resolve_media("/media/loop.webm", MediaKind::Video, DeviceClass::Mobile);
        assert_eq!(odd.kind, MediaKind::Video);
        assert_eq!(odd.poster, None);
    }

    #[test]
    fn test_path_builders() {
        assert_eq!(video_path("hero-2"), "videos/hero-2.mp4");
        assert_eq!(mobile_image_path("hero-2"), "img/hero-2-mobile.webp");
    }
}
