//! Landing-page hero carousel: a background video plus a mini preview of the
//! next one, behind a loading screen that lifts once enough media is ready.

use std::time::Duration;

use tracing::{debug, info};

use crate::assets::{self, MediaSource};
use crate::device::DeviceClass;
use crate::models::MediaKind;

pub const HERO_SLIDES: usize = 3;

/// The loading screen never stays up longer than this.
pub const LOADING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct HeroCarousel {
    total: usize,
    current: usize,
    device: DeviceClass,
    has_clicked: bool,
    loaded: usize,
    loading: bool,
}

impl HeroCarousel {
    pub fn new(total: usize, device: DeviceClass) -> Self {
        let mut carousel = Self {
            total: total.max(1),
            current: 1,
            device,
            has_clicked: false,
            loaded: 0,
            loading: true,
        };
        carousel.loading = carousel.required_loads() > 0;
        carousel
    }

    /// 1-based index of the slide in the background.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// 1-based index shown in the mini preview; wraps to 1.
    pub fn upcoming_index(&self) -> usize {
        self.current % self.total + 1
    }

    /// Whether the desktop expand transition should play.
    pub fn has_clicked(&self) -> bool {
        self.has_clicked
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Preview click. Mobile just swaps the background image.
    pub fn advance(&mut self) -> usize {
        if !self.device.is_mobile() {
            self.has_clicked = true;
        }
        self.current = self.upcoming_index();
        debug!(current = self.current, "Hero advanced");
        self.current
    }

    /// Media loads needed before the loading screen lifts: the main and
    /// preview stills on mobile, all but one video on desktop.
    pub fn required_loads(&self) -> usize {
        if self.device.is_mobile() {
            2
        } else {
            self.total - 1
        }
    }

    /// Counts one finished load. Returns true when this load lifted the
    /// loading screen.
    pub fn media_loaded(&mut self) -> bool {
        self.loaded += 1;
        if self.loading && self.loaded >= self.required_loads() {
            self.loading = false;
            debug!(loaded = self.loaded, "Hero media ready");
            return true;
        }
        false
    }

    /// Fired after [`LOADING_TIMEOUT`]; lifts the screen regardless of loads.
    pub fn loading_timed_out(&mut self) {
        if self.loading {
            info!(
                loaded = self.loaded,
                required = self.required_loads(),
                "Hero loading timed out, showing content"
            );
            self.loading = false;
        }
    }

    /// Source for slide `index` (1-based) on this device.
    pub fn slide(&self, index: usize) -> MediaSource {
        let name = format!("hero-{index}");
        if self.device.is_mobile() {
            MediaSource {
                src: assets::mobile_image_path(&name),
                kind: MediaKind::Image,
                poster: None,
            }
        } else {
            MediaSource {
                src: assets::video_path(&name),
                kind: MediaKind::Video,
                poster: Some(assets::poster_path(&name)),
            }
        }
    }

    pub fn current_media(&self) -> MediaSource {
        self.slide(self.current)
    }

    pub fn upcoming_media(&self) -> MediaSource {
        self.slide(self.upcoming_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps() {
        let mut hero = HeroCarousel::new(HERO_SLIDES, DeviceClass::Desktop);
        assert_eq!(hero.current_index(), 1);
        assert_eq!(hero.upcoming_index(), 2);
        assert!(!hero.has_clicked());
        assert_eq!(hero.advance(), 2);
        assert!(hero.has_clicked());
        assert_eq!(hero.advance(), 3);
        assert_eq!(hero.upcoming_index(), 1);
        assert_eq!(hero.advance(), 1);
    }

    #[test]
    fn test_mobile_never_marks_clicked() {
        let mut hero = HeroCarousel::new(HERO_SLIDES, DeviceClass::Mobile);
        hero.advance();
        assert_eq!(hero.current_index(), 2);
        assert!(!hero.has_clicked());
    }

    #[test]
    fn test_loading_gate_desktop() {
        let mut hero = HeroCarousel::new(HERO_SLIDES, DeviceClass::Desktop);
        assert_eq!(hero.required_loads(), 2);
        assert!(hero.is_loading());
        assert!(!hero.media_loaded());
        assert!(hero.media_loaded());
        assert!(!hero.is_loading());
        assert!(!hero.media_loaded());
    }

    #[test]
    fn test_loading_gate_mobile_and_timeout() {
        let mut hero = HeroCarousel::new(5, DeviceClass::Mobile);
        assert_eq!(hero.required_loads(), 2);
        hero.media_loaded();
        assert!(hero.is_loading());
        hero.loading_timed_out();
        assert!(!hero.is_loading());
    }

    #[test]
    fn test_single_slide_needs_no_loads() {
        let hero = HeroCarousel::new(1, DeviceClass::Desktop);
        assert!(!hero.is_loading());
        assert_eq!(hero.upcoming_index(), 1);
    }

    #[test]
    fn test_slide_sources() {
        let desktop = HeroCarousel::new(HERO_SLIDES, DeviceClass::Desktop);
        let media = desktop.upcoming_media();
        assert_eq!(media.src, "videos/hero-2.mp4");
        assert_eq!(media.poster.as_deref(), Some("img/hero-2-poster.jpg"));

        let mobile = HeroCarousel::new(HERO_SLIDES, DeviceClass::Mobile);
        let media = mobile.current_media();
        assert_eq!(media.src, "img/hero-1-mobile.webp");
        assert_eq!(media.kind, MediaKind::Image);
    }
}
