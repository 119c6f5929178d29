use serde::Serialize;
use tracing::{debug, trace, warn};

use super::action::{ActionButton, Navigation};
use super::idle::IdleAnimation;
use crate::assets::{self, MediaSource};
use crate::device::DeviceClass;
use crate::models::ContentItem;

/// Share of a card that must be on screen before mobile reveals its media.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.5;

/// What a card is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    FullMedia,
    PlaceholderWithLogo,
    PlaceholderBlurred,
    /// Media failed to load; a neutral placeholder is shown.
    MediaError,
}

/// Ephemeral per-card input, reset whenever the card mounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    pub device: DeviceClass,
    pub hovered: bool,
    pub intersection_ratio: f32,
    pub media_ready: bool,
}

impl InteractionState {
    pub fn new(device: DeviceClass) -> Self {
        Self {
            device,
            hovered: false,
            intersection_ratio: 0.0,
            media_ready: false,
        }
    }

    pub fn in_view(&self, threshold: f32) -> bool {
        self.intersection_ratio > 0.0 && self.intersection_ratio >= threshold
    }
}

/// Share of a box `[top, top + height)` inside a viewport `[0, viewport_height)`.
pub fn visible_ratio(top: f32, height: f32, viewport_height: f32) -> f32 {
    if !(height.is_finite() && height > 0.0 && viewport_height > 0.0) {
        return 0.0;
    }
    let visible = (top + height).min(viewport_height) - top.max(0.0);
    (visible / height).clamp(0.0, 1.0)
}

/// Instruction for whoever drives the logo's idle loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleCommand {
    /// Start from phase zero.
    Start(IdleAnimation),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: CardState,
    pub to: CardState,
    pub idle: Option<IdleCommand>,
}

/// Render snapshot of a card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub state: CardState,
    pub media: MediaSource,
    pub media_ready: bool,
    pub logo_src: Option<String>,
    pub idle_animation: Option<IdleAnimation>,
    pub button: Option<ActionButton>,
}

/// Presentation state machine for one content item.
///
/// Without the hover effect a card always shows its media. With it, the card
/// rests on a placeholder (logo or blurred) and reveals the media while the
/// trigger holds: pointer hover on desktop, viewport intersection on mobile.
/// Each device class listens to its own trigger only, so synthetic pointer
/// events on touch screens never race the intersection signal.
#[derive(Debug, Clone)]
pub struct MediaCard {
    item: ContentItem,
    interaction: InteractionState,
    visibility_threshold: f32,
    media: MediaSource,
    state: CardState,
}

impl MediaCard {
    pub fn new(item: ContentItem, device: DeviceClass) -> Self {
        let media = assets::resolve_media(&item.src, item.media_kind(), device);
        let mut card = Self {
            item,
            interaction: InteractionState::new(device),
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            media,
            state: CardState::FullMedia,
        };
        card.state = card.presentation_target();
        card
    }

    pub fn with_visibility_threshold(mut self, threshold: f32) -> Self {
        self.visibility_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn item(&self) -> &ContentItem {
        &self.item
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn media(&self) -> &MediaSource {
        &self.media
    }

    /// Idle loop that should be running right now, if any.
    pub fn idle_animation(&self) -> Option<IdleAnimation> {
        (self.state == CardState::PlaceholderWithLogo)
            .then(|| self.item.idle_animation.unwrap_or_default())
    }

    /// Command to issue when the card is first shown.
    pub fn mount(&self) -> Option<IdleCommand> {
        self.idle_animation().map(IdleCommand::Start)
    }

    /// Command to issue when the card goes away.
    pub fn unmount(&self) -> Option<IdleCommand> {
        self.idle_animation().map(|_| IdleCommand::Cancel)
    }

    pub fn pointer_enter(&mut self) -> Option<Transition> {
        if self.interaction.device.is_mobile() {
            trace!(title = %self.item.title, "Ignoring pointer enter on mobile");
            return None;
        }
        self.interaction.hovered = true;
        self.settle()
    }

    pub fn pointer_leave(&mut self) -> Option<Transition> {
        if self.interaction.device.is_mobile() {
            return None;
        }
        self.interaction.hovered = false;
        self.settle()
    }

    /// New share of the card inside the viewport, 0.0..=1.0.
    pub fn intersection_changed(&mut self, ratio: f32) -> Option<Transition> {
        self.interaction.intersection_ratio = if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if !self.interaction.device.is_mobile() {
            return None;
        }
        self.settle()
    }

    pub fn media_loaded(&mut self) {
        self.interaction.media_ready = true;
    }

    pub fn media_failed(&mut self, reason: &str) -> Option<Transition> {
        warn!(src = %self.media.src, reason, "Card media failed to load");
        self.interaction.media_ready = false;
        self.transition_to(CardState::MediaError)
    }

    /// Leaves the error state after the media source was retried.
    pub fn media_reloaded(&mut self) -> Option<Transition> {
        if self.state != CardState::MediaError {
            return None;
        }
        self.interaction.media_ready = false;
        self.transition_to(self.presentation_target())
    }

    pub fn button(&self) -> Option<ActionButton> {
        self.item
            .show_button
            .then(|| ActionButton::new(self.item.coming_soon))
    }

    /// Navigation for a click on the action control, if it leads anywhere.
    pub fn activate(&self) -> Option<Navigation> {
        let button = self.button()?;
        if !button.enabled {
            return None;
        }
        let target = self.item.project_url.as_deref()?.trim();
        if target.is_empty() {
            return None;
        }
        let navigation = Navigation::for_target(target);
        debug!(title = %self.item.title, ?navigation, "Card activated");
        Some(navigation)
    }

    pub fn view(&self) -> CardView {
        CardView {
            state: self.state,
            media: self.media.clone(),
            media_ready: self.interaction.media_ready,
            logo_src: self.item.logo_src.clone().filter(|s| !s.is_empty()),
            idle_animation: self.idle_animation(),
            button: self.button(),
        }
    }

    fn rest_state(&self) -> CardState {
        if self.item.has_logo() {
            CardState::PlaceholderWithLogo
        } else {
            CardState::PlaceholderBlurred
        }
    }

    fn wants_full_media(&self) -> bool {
        match self.interaction.device {
            DeviceClass::Desktop => self.interaction.hovered,
            DeviceClass::Mobile => self.interaction.in_view(self.visibility_threshold),
        }
    }

    /// State the inputs ask for, ignoring any load error.
    fn presentation_target(&self) -> CardState {
        if !self.item.use_hover_effect || self.wants_full_media() {
            CardState::FullMedia
        } else {
            self.rest_state()
        }
    }

    fn settle(&mut self) -> Option<Transition> {
        if self.state == CardState::MediaError {
            return None;
        }
        self.transition_to(self.presentation_target())
    }

    fn transition_to(&mut self, to: CardState) -> Option<Transition> {
        let from = self.state;
        if from == to {
            return None;
        }
        self.state = to;

        let idle = match (from, to) {
            (CardState::PlaceholderWithLogo, _) => Some(IdleCommand::Cancel),
            (_, CardState::PlaceholderWithLogo) => Some(IdleCommand::Start(
                self.item.idle_animation.unwrap_or_default(),
            )),
            _ => None,
        };
        trace!(title = %self.item.title, ?from, ?to, "Card transition");
        Some(Transition { from, to, idle })
    }
}
