// Bento card widget: an Overlay driven by the MediaCard state machine.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use gtk4::prelude::*;
use gtk4::{
    glib, Align, Box as GtkBox, Button, ContentFit, EventControllerMotion, Label, Orientation,
    Overlay, Picture, Video, Widget,
};

use super::style::CardStyle;
use crate::animation::{AnimationHandle, AnimationRegistry};
use crate::assets::MediaSource;
use crate::card::{
    visible_ratio, CardState, IdleAnimation, IdleCommand, LogoTransform, MediaCard, Navigation,
    Tilt, Transition,
};
use crate::device::DeviceClass;
use crate::models::{ContentItem, MediaKind};

const IDLE_TICK: Duration = Duration::from_millis(16);
const IDLE_LABEL: &str = "idle";
const LOGO_SIZE_PX: i32 = 96;
const RETRY_LABEL: &str = "media unavailable, retry";

static NEXT_CARD_ID: AtomicU64 = AtomicU64::new(1);

impl AnimationHandle for glib::SourceId {
    fn cancel(self) {
        self.remove();
    }
}

/// Maps a site path (`/videos/a.mp4`) onto the local asset tree.
pub fn asset_path(root: &Path, src: &str) -> PathBuf {
    root.join(src.trim_start_matches('/'))
}

/// Picture or looping muted video for `source`.
///
/// Returns the widget and whether the file was found.
pub fn media_widget(source: &MediaSource, root: &Path) -> (Widget, bool) {
    let path = asset_path(root, &source.src);
    let exists = path.is_file();

    match source.kind {
        MediaKind::Image => {
            let picture = Picture::new();
            picture.set_can_shrink(true);
            picture.set_content_fit(ContentFit::Cover);
            if exists {
                picture.set_filename(Some(&path));
            }
            (picture.upcast(), exists)
        }
        MediaKind::Video => {
            let video = Video::new();
            video.set_autoplay(true);
            video.set_loop(true);
            if exists {
                video.set_filename(Some(&path));
                if let Some(stream) = video.media_stream() {
                    stream.set_muted(true);
                }
            }
            (video.upcast(), exists)
        }
    }
}

pub struct CardWidget {
    root: Overlay,
    media: RefCell<Widget>,
    asset_root: PathBuf,
    logo: Option<Picture>,
    retry: Button,
    card: RefCell<MediaCard>,
    tilt: Cell<Tilt>,
    logo_transform: Cell<LogoTransform>,
    animations: RefCell<AnimationRegistry<glib::SourceId>>,
    style: CardStyle,
    on_navigate: Rc<dyn Fn(Navigation)>,
}

impl CardWidget {
    pub fn new(
        item: ContentItem,
        device: DeviceClass,
        visibility_threshold: f32,
        asset_root: &Path,
        on_navigate: Rc<dyn Fn(Navigation)>,
    ) -> Rc<Self> {
        let id = NEXT_CARD_ID.fetch_add(1, Ordering::Relaxed);
        let style = CardStyle::new(format!("bento-card-{id}"));
        let card = MediaCard::new(item, device).with_visibility_threshold(visibility_threshold);
        let view = card.view();
        let owner = card.item().title.clone();

        let root = Overlay::new();
        root.set_widget_name(style.name());
        root.add_css_class("bento-card");
        root.set_overflow(gtk4::Overflow::Hidden);
        root.set_hexpand(true);
        root.set_vexpand(true);

        let (media, media_found) = media_widget(&view.media, asset_root);
        media.add_css_class("card-media");
        root.set_child(Some(&media));

        let logo = view.logo_src.as_deref().map(|src| {
            let logo = Picture::for_filename(asset_path(asset_root, src));
            logo.set_content_fit(ContentFit::Contain);
            logo.set_size_request(LOGO_SIZE_PX, LOGO_SIZE_PX);
            logo.set_halign(Align::Center);
            logo.set_valign(Align::Center);
            logo.set_can_target(false);
            logo.add_css_class("card-logo");
            root.add_overlay(&logo);
            logo
        });

        let retry = Button::with_label(RETRY_LABEL);
        retry.set_halign(Align::Center);
        retry.set_valign(Align::Center);
        retry.add_css_class("card-error");
        root.add_overlay(&retry);

        let text = GtkBox::new(Orientation::Vertical, 4);
        text.set_halign(Align::Start);
        text.set_valign(Align::Start);
        text.set_margin_start(20);
        text.set_margin_top(20);
        text.set_can_target(false);
        let title = Label::new(Some(&card.item().title));
        title.set_halign(Align::Start);
        title.set_wrap(true);
        title.add_css_class("card-title");
        text.append(&title);
        if let Some(description) = card.item().description.as_deref() {
            let label = Label::new(Some(description));
            label.set_halign(Align::Start);
            label.set_wrap(true);
            label.set_max_width_chars(40);
            label.add_css_class("card-description");
            text.append(&label);
        }
        root.add_overlay(&text);

        let widget = Rc::new(Self {
            root,
            media: RefCell::new(media),
            asset_root: asset_root.to_path_buf(),
            logo,
            retry,
            animations: RefCell::new(AnimationRegistry::new(owner)),
            card: RefCell::new(card),
            tilt: Cell::new(Tilt::IDENTITY),
            logo_transform: Cell::new(LogoTransform::IDENTITY),
            style,
            on_navigate,
        });

        widget.setup_button();
        widget.setup_retry();
        widget.setup_pointer();
        widget.watch_media(media_found);
        widget.apply_view();
        widget.refresh_style();
        widget
    }

    pub fn widget(&self) -> &Overlay {
        &self.root
    }

    /// Starts the idle loop if the card rests on its logo.
    pub fn mount(self: &Rc<Self>) {
        let command = self.card.borrow().mount();
        self.run_idle(command);
    }

    /// Stops everything the card scheduled.
    pub fn unmount(&self) {
        let command = self.card.borrow().unmount();
        let cancelled = self.animations.borrow_mut().cancel_all();
        tracing::trace!(?command, cancelled, "Card unmounted");
    }

    /// Feeds the card's on-screen share within a scrolled viewport.
    pub fn update_intersection(self: &Rc<Self>, viewport: &impl IsA<Widget>) {
        let viewport_height = viewport.as_ref().height() as f32;
        let ratio = self
            .root
            .compute_bounds(viewport)
            .map(|bounds| visible_ratio(bounds.y(), bounds.height(), viewport_height))
            .unwrap_or(0.0);
        let transition = self.card.borrow_mut().intersection_changed(ratio);
        self.handle(transition);
    }

    fn setup_button(self: &Rc<Self>) {
        let Some(spec) = self.card.borrow().button() else {
            return;
        };
        let button = Button::with_label(spec.label);
        button.set_sensitive(spec.enabled);
        button.set_halign(Align::Start);
        button.set_valign(Align::End);
        button.set_margin_start(20);
        button.set_margin_bottom(20);
        button.add_css_class("card-button");

        let weak: Weak<Self> = Rc::downgrade(self);
        button.connect_clicked(move |_| {
            let Some(card) = weak.upgrade() else {
                return;
            };
            let navigation = card.card.borrow().activate();
            if let Some(navigation) = navigation {
                (card.on_navigate)(navigation);
            }
        });
        self.root.add_overlay(&button);
    }

    fn setup_pointer(self: &Rc<Self>) {
        let motion = EventControllerMotion::new();

        let weak = Rc::downgrade(self);
        motion.connect_enter(move |_, x, y| {
            if let Some(card) = weak.upgrade() {
                let transition = card.card.borrow_mut().pointer_enter();
                card.handle(transition);
                card.tilt_towards(x, y);
            }
        });

        let weak = Rc::downgrade(self);
        motion.connect_motion(move |_, x, y| {
            if let Some(card) = weak.upgrade() {
                card.tilt_towards(x, y);
            }
        });

        let weak = Rc::downgrade(self);
        motion.connect_leave(move |_| {
            if let Some(card) = weak.upgrade() {
                let transition = card.card.borrow_mut().pointer_leave();
                card.handle(transition);
                card.tilt.set(Tilt::IDENTITY);
                card.refresh_style();
            }
        });

        self.root.add_controller(motion);
    }

    fn setup_retry(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        self.retry.connect_clicked(move |_| {
            if let Some(card) = weak.upgrade() {
                card.retry_media();
            }
        });
    }

    /// Rebuilds the media widget from disk and leaves the error state if the
    /// file is there now.
    fn retry_media(self: &Rc<Self>) {
        let source = self.card.borrow().media().clone();
        let (media, found) = media_widget(&source, &self.asset_root);
        if !found {
            tracing::debug!(src = %source.src, "Media still missing");
            return;
        }
        media.add_css_class("card-media");
        self.root.set_child(Some(&media));
        *self.media.borrow_mut() = media;

        let transition = self.card.borrow_mut().media_reloaded();
        self.handle(transition);
        self.watch_media(true);
    }

    fn watch_media(self: &Rc<Self>, media_found: bool) {
        if !media_found {
            let src = self.card.borrow().media().src.clone();
            let transition = self
                .card
                .borrow_mut()
                .media_failed(&format!("{src} not found"));
            self.handle(transition);
            return;
        }

        let media = self.media.borrow().clone();
        let Some(video) = media.downcast_ref::<Video>() else {
            self.card.borrow_mut().media_loaded();
            self.apply_view();
            return;
        };
        let Some(stream) = video.media_stream() else {
            return;
        };

        let weak = Rc::downgrade(self);
        stream.connect_prepared_notify(move |stream| {
            if let Some(card) = weak.upgrade() {
                if stream.is_prepared() {
                    card.card.borrow_mut().media_loaded();
                    card.apply_view();
                }
            }
        });

        let weak = Rc::downgrade(self);
        stream.connect_error_notify(move |stream| {
            let (Some(card), Some(error)) = (weak.upgrade(), stream.error()) else {
                return;
            };
            let transition = card.card.borrow_mut().media_failed(error.message());
            card.handle(transition);
        });
    }

    fn tilt_towards(&self, x: f64, y: f64) {
        if self.card.borrow().interaction().device.is_mobile() {
            return;
        }
        let tilt = Tilt::from_pointer(x, y, self.root.width() as f64, self.root.height() as f64);
        self.tilt.set(tilt);
        self.refresh_style();
    }

    fn handle(self: &Rc<Self>, transition: Option<Transition>) {
        let Some(transition) = transition else {
            return;
        };
        tracing::trace!(from = ?transition.from, to = ?transition.to, "Card transition");
        self.run_idle(transition.idle);
        self.apply_view();
    }

    fn run_idle(self: &Rc<Self>, command: Option<IdleCommand>) {
        match command {
            Some(IdleCommand::Start(kind)) => self.start_idle(kind),
            Some(IdleCommand::Cancel) => {
                self.animations.borrow_mut().cancel_label(IDLE_LABEL);
                self.logo_transform.set(LogoTransform::IDENTITY);
                self.refresh_style();
            }
            None => {}
        }
    }

    fn start_idle(self: &Rc<Self>, kind: IdleAnimation) {
        self.animations.borrow_mut().cancel_label(IDLE_LABEL);

        let started = Instant::now();
        let weak = Rc::downgrade(self);
        let source = glib::timeout_add_local(IDLE_TICK, move || {
            let Some(card) = weak.upgrade() else {
                return glib::ControlFlow::Break;
            };
            card.logo_transform.set(kind.frame(started.elapsed()));
            card.refresh_style();
            glib::ControlFlow::Continue
        });
        self.animations.borrow_mut().register(IDLE_LABEL, source);
    }

    fn apply_view(&self) {
        let view = self.card.borrow().view();
        for class in [
            "state-full",
            "state-logo",
            "state-blurred",
            "state-error",
            "media-loading",
        ] {
            self.root.remove_css_class(class);
        }
        self.root.add_css_class(match view.state {
            CardState::FullMedia => "state-full",
            CardState::PlaceholderWithLogo => "state-logo",
            CardState::PlaceholderBlurred => "state-blurred",
            CardState::MediaError => "state-error",
        });

        // Media is on screen but the stream has not produced a frame yet
        if view.state == CardState::FullMedia && !view.media_ready {
            self.root.add_css_class("media-loading");
        }

        if let Some(logo) = &self.logo {
            logo.set_visible(view.state == CardState::PlaceholderWithLogo);
        }
        self.retry.set_visible(view.state == CardState::MediaError);
    }

    fn refresh_style(&self) {
        self.style.apply(self.tilt.get(), self.logo_transform.get());
    }
}
