// Main window: landing page (hero, about, projects grid, services, testimonials,
// contact) and project pages in a Stack, each inside its own ScrolledWindow.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gtk4::prelude::*;
use gtk4::{
    gio, glib, Align, Application, ApplicationWindow, Box as GtkBox, Button, ContentFit, Grid,
    HeaderBar, Label, Orientation, Overlay, Picture, ScrolledWindow, Stack, StackTransitionType,
    UriLauncher, Widget,
};

use super::card_widget::{asset_path, media_widget, CardWidget};
use super::contact_panel::ContactPanel;
use super::style::load_css;
use crate::assets::resolve_media;
use crate::card::Navigation;
use crate::config::Settings;
use crate::device::DeviceClass;
use crate::hero::{HeroCarousel, HERO_SLIDES, LOADING_TIMEOUT};
use crate::layout::{GridPlan, LayoutSelection};
use crate::models::{ContentItem, Project, ProjectCatalog};
use crate::routes::{landing_scroll, resolve_route, LandingScroll, Route, PROJECTS_ANCHOR};
use crate::sections::{self, LandingSection};

const WINDOW_WIDTH: i32 = 1280;
const WINDOW_HEIGHT: i32 = 860;
const PAGE_MARGIN: i32 = 40;
const GRID_SPACING: u32 = 28;
const PREVIEW_SIZE_PX: i32 = 256;
const SECTION_IMAGE_HEIGHT: i32 = 480;
/// Crossfade for a desktop preview click growing into the background.
const HERO_EXPAND_MS: u32 = 700;

/// Pixel height of `vh` viewport-height units in a window `window_height` tall.
fn vh_to_px(vh: u32, window_height: i32) -> i32 {
    (vh as i64 * window_height.max(1) as i64 / 100) as i32
}

pub struct MainWindow {
    self_weak: RefCell<Weak<MainWindow>>,
    window: ApplicationWindow,
    stack: Stack,
    landing_scroller: ScrolledWindow,
    landing_content: GtkBox,
    sections: RefCell<HashMap<LandingSection, Widget>>,
    project_scroller: ScrolledWindow,
    project_content: GtkBox,
    landing_cards: RefCell<Vec<Rc<CardWidget>>>,
    project_cards: RefCell<Vec<Rc<CardWidget>>>,
    hero: RefCell<HeroCarousel>,
    hero_background: Stack,
    hero_preview: Button,
    loading_label: Label,
    contact: Rc<ContactPanel>,
    catalog: Rc<ProjectCatalog>,
    settings: Settings,
    device: DeviceClass,
}

impl MainWindow {
    pub fn new(app: &Application, settings: Settings, catalog: Rc<ProjectCatalog>) -> Rc<Self> {
        load_css();

        let device = settings.device_class();
        tracing::info!(%device, projects = catalog.len(), "Opening window");

        let window = ApplicationWindow::builder()
            .application(app)
            .title("Third Space Interactive")
            .default_width(WINDOW_WIDTH)
            .default_height(WINDOW_HEIGHT)
            .build();

        let stack = Stack::new();
        stack.set_transition_type(StackTransitionType::Crossfade);
        stack.set_transition_duration(150);

        let landing_content = GtkBox::new(Orientation::Vertical, 0);
        let landing_scroller = ScrolledWindow::builder()
            .hscrollbar_policy(gtk4::PolicyType::Never)
            .vscrollbar_policy(gtk4::PolicyType::Automatic)
            .child(&landing_content)
            .build();

        let project_content = GtkBox::new(Orientation::Vertical, 16);
        let project_scroller = ScrolledWindow::builder()
            .hscrollbar_policy(gtk4::PolicyType::Never)
            .vscrollbar_policy(gtk4::PolicyType::Automatic)
            .child(&project_content)
            .build();

        stack.add_named(&landing_scroller, Some("landing"));
        stack.add_named(&project_scroller, Some("project"));
        stack.set_visible_child_name("landing");
        window.set_child(Some(&stack));

        let hero_frame = Overlay::new();
        hero_frame.add_css_class("hero");
        hero_frame.set_size_request(-1, WINDOW_HEIGHT);

        let hero_background = Stack::new();
        hero_background.set_transition_duration(HERO_EXPAND_MS);
        hero_frame.set_child(Some(&hero_background));

        let hero_title = Label::new(Some("THIRD SPACE"));
        hero_title.set_halign(Align::Start);
        hero_title.set_valign(Align::End);
        hero_title.set_margin_start(PAGE_MARGIN);
        hero_title.set_margin_bottom(PAGE_MARGIN);
        hero_title.set_can_target(false);
        hero_title.add_css_class("hero-title");
        hero_frame.add_overlay(&hero_title);

        let hero_preview = Button::new();
        hero_preview.set_halign(Align::Center);
        hero_preview.set_valign(Align::Center);
        hero_preview.set_size_request(PREVIEW_SIZE_PX, PREVIEW_SIZE_PX);
        hero_preview.add_css_class("hero-preview");
        hero_frame.add_overlay(&hero_preview);

        let loading_label = Label::new(Some("Loading..."));
        loading_label.set_hexpand(true);
        loading_label.set_vexpand(true);
        loading_label.add_css_class("loading-screen");
        hero_frame.add_overlay(&loading_label);

        landing_content.append(&hero_frame);

        let outbox = settings
            .outbox_dir()
            .unwrap_or_else(|_| std::env::temp_dir().join("thirdspace-outbox"));
        let contact = ContactPanel::new(outbox);

        let main_window = Rc::new(Self {
            self_weak: RefCell::new(Weak::new()),
            window,
            stack,
            landing_scroller,
            landing_content,
            sections: RefCell::new(HashMap::new()),
            project_scroller,
            project_content,
            landing_cards: RefCell::new(Vec::new()),
            project_cards: RefCell::new(Vec::new()),
            hero: RefCell::new(HeroCarousel::new(HERO_SLIDES, device)),
            hero_background,
            hero_preview,
            loading_label,
            contact,
            catalog,
            settings,
            device,
        });
        *main_window.self_weak.borrow_mut() = Rc::downgrade(&main_window);

        main_window.build_nav();
        main_window.build_landing();
        main_window.setup_hero();
        main_window.setup_intersection();
        main_window
    }

    pub fn present(&self) {
        self.window.present();
    }

    /// Applies a card's navigation.
    pub fn navigate(&self, navigation: Navigation) {
        match navigation {
            Navigation::External { url } => {
                tracing::info!(%url, "Opening external link");
                UriLauncher::new(&url).launch(
                    Some(&self.window),
                    None::<&gio::Cancellable>,
                    |result| {
                        if let Err(e) = result {
                            tracing::warn!("Failed to open link: {}", e);
                        }
                    },
                );
            }
            Navigation::Internal {
                path,
                scroll_to_top,
            } => self.open_route(&path, scroll_to_top),
        }
    }

    pub fn open_route(&self, path: &str, scroll_to_top: bool) {
        match resolve_route(path, &self.catalog) {
            Route::Landing { section } => {
                self.unmount_project();
                self.stack.set_visible_child_name("landing");
                match landing_scroll(section.as_deref(), scroll_to_top) {
                    LandingScroll::Section(target) => self.scroll_to_section(target),
                    LandingScroll::Top => self.landing_scroller.vadjustment().set_value(0.0),
                    LandingScroll::Stay => {}
                }
                tracing::debug!(?section, "Showing landing page");
            }
            Route::Project(id) => {
                let Some(project) = self.catalog.get(&id).cloned() else {
                    return;
                };
                self.show_project(&project);
                if scroll_to_top {
                    self.project_scroller.vadjustment().set_value(0.0);
                }
            }
            Route::Redirect(target) => self.open_route(&target, true),
        }
        self.schedule_intersection_refresh();
    }

    /// Scrolls the landing page so `section` sits at the top, once the page
    /// has been laid out.
    fn scroll_to_section(&self, section: LandingSection) {
        let weak = self.self_weak.borrow().clone();
        glib::idle_add_local_once(move || {
            let Some(window) = weak.upgrade() else {
                return;
            };
            let Some(anchor) = window.sections.borrow().get(&section).cloned() else {
                return;
            };
            match anchor.compute_bounds(&window.landing_content) {
                Some(bounds) => {
                    window
                        .landing_scroller
                        .vadjustment()
                        .set_value(f64::from(bounds.y()));
                }
                None => tracing::debug!(%section, "Section has no bounds yet"),
            }
        });
    }

    fn navigator(&self) -> Rc<dyn Fn(Navigation)> {
        let weak = self.self_weak.borrow().clone();
        Rc::new(move |navigation: Navigation| {
            if let Some(window) = weak.upgrade() {
                window.navigate(navigation);
            }
        })
    }

    fn build_nav(&self) {
        let header = HeaderBar::new();
        let brand = Label::new(Some("THIRD SPACE"));
        brand.add_css_class("card-title");
        header.pack_start(&brand);

        let nav = GtkBox::new(Orientation::Horizontal, 4);
        for section in LandingSection::ALL {
            let button = Button::with_label(section.title());
            button.add_css_class("flat");
            let navigate = self.navigator();
            button.connect_clicked(move |_| {
                navigate(Navigation::for_target(&section.href()));
            });
            nav.append(&button);
        }
        header.set_title_widget(Some(&nav));
        self.window.set_titlebar(Some(&header));
    }

    fn build_landing(&self) {
        for section in LandingSection::ALL {
            let widget = match section {
                LandingSection::About => self.build_about(),
                LandingSection::Projects => self.build_projects(),
                LandingSection::Services => self.build_services(),
                LandingSection::Testimonials => build_testimonials(),
                LandingSection::Contact => self.contact.widget().clone().upcast(),
            };
            self.landing_content.append(&widget);
            self.sections.borrow_mut().insert(section, widget);
        }
    }

    fn build_about(&self) -> Widget {
        let about = section_box(LandingSection::About);
        about.append(&section_label(sections::ABOUT_HEADLINE, "section-title"));
        about.append(&section_label(sections::ABOUT_LEAD, "section-body"));
        about.append(&section_label(sections::ABOUT_BODY, "section-kicker"));
        about.append(&self.section_image(sections::ABOUT_IMAGE));
        about.upcast()
    }

    fn build_projects(&self) -> Widget {
        let projects = section_box(LandingSection::Projects);
        projects.append(&section_label(LandingSection::Projects.title(), "section-title"));
        projects.append(&section_label(sections::PROJECTS_KICKER, "section-body"));
        projects.append(&section_label(sections::PROJECTS_INTRO, "section-kicker"));

        let items = self.catalog.landing_items();
        let selection = self
            .settings
            .layout_seed
            .map(LayoutSelection::Seeded)
            .unwrap_or_default();
        if let Some((grid, cards)) = self.build_grid(&items, &selection) {
            projects.append(&grid);
            *self.landing_cards.borrow_mut() = cards;
        }
        projects.upcast()
    }

    fn build_services(&self) -> Widget {
        let services = section_box(LandingSection::Services);
        services.add_css_class("services");
        services.append(&section_label(sections::SERVICES_KICKER, "section-kicker"));
        services.append(&section_label(sections::SERVICES_HEADLINE, "section-title"));
        services.append(&self.section_image(sections::SERVICES_IMAGE));

        let names = GtkBox::new(Orientation::Horizontal, 24);
        names.set_halign(Align::Center);
        for name in sections::SERVICES {
            let label = Label::new(Some(name));
            label.add_css_class("service-name");
            names.append(&label);
        }
        services.append(&names);
        services.append(&section_label(sections::SERVICES_PITCH, "section-body"));

        let call = Button::with_label(sections::SERVICES_CALL_TO_ACTION);
        call.set_halign(Align::Start);
        call.add_css_class("card-button");
        let navigate = self.navigator();
        call.connect_clicked(move |_| {
            navigate(Navigation::for_target(&LandingSection::Contact.href()));
        });
        services.append(&call);
        services.upcast()
    }

    fn section_image(&self, src: &str) -> Picture {
        let picture = Picture::for_filename(asset_path(&self.settings.asset_root, src));
        picture.set_content_fit(ContentFit::Cover);
        picture.set_can_shrink(true);
        picture.set_size_request(-1, SECTION_IMAGE_HEIGHT);
        picture
    }

    fn show_project(&self, project: &Project) {
        self.unmount_project();
        while let Some(child) = self.project_content.first_child() {
            self.project_content.remove(&child);
        }

        let hero_item = ContentItem::new(project.hero_media.clone(), project.title.clone());
        let hero_source = resolve_media(&hero_item.src, hero_item.media_kind(), self.device);
        let (hero, _) = media_widget(&hero_source, &self.settings.asset_root);
        hero.set_size_request(-1, WINDOW_HEIGHT * 3 / 4);
        self.project_content.append(&hero);

        let back = Button::with_label("back to projects");
        back.set_halign(Align::Start);
        back.set_margin_start(PAGE_MARGIN);
        back.add_css_class("card-button");
        let navigate = self.navigator();
        back.connect_clicked(move |_| {
            navigate(Navigation::for_target(PROJECTS_ANCHOR));
        });
        self.project_content.append(&back);

        for (text, class) in [
            (project.title.as_str(), "section-title"),
            (project.description.as_str(), "card-description"),
            (project.about_title.as_str(), "section-title"),
            (project.about_text.as_str(), ""),
            (project.feature_title.as_str(), "section-title"),
            (project.feature_description.as_str(), ""),
        ] {
            if text.is_empty() {
                continue;
            }
            let label = Label::new(Some(text));
            label.set_halign(Align::Start);
            label.set_wrap(true);
            label.set_margin_start(PAGE_MARGIN);
            label.set_margin_end(PAGE_MARGIN);
            if !class.is_empty() {
                label.add_css_class(class);
            }
            self.project_content.append(&label);
        }

        let mut selection = project.layout_selection();
        if let Some(seed) = self.settings.layout_seed {
            selection = LayoutSelection::Seeded(seed);
        }
        if let Some((grid, cards)) = self.build_grid(&project.bento_items, &selection) {
            self.project_content.append(&grid);
            *self.project_cards.borrow_mut() = cards;
        }

        self.stack.set_visible_child_name("project");
        tracing::info!(id = %project.id, "Showing project");
    }

    fn unmount_project(&self) {
        for card in self.project_cards.borrow_mut().drain(..) {
            card.unmount();
        }
    }

    fn build_grid(
        &self,
        items: &[ContentItem],
        selection: &LayoutSelection,
    ) -> Option<(Grid, Vec<Rc<CardWidget>>)> {
        let plan = GridPlan::build(items, selection)?;
        tracing::debug!("{}", plan.summary());

        let grid = Grid::new();
        grid.set_column_homogeneous(true);
        grid.set_row_homogeneous(true);
        grid.set_column_spacing(GRID_SPACING);
        grid.set_row_spacing(GRID_SPACING);
        grid.set_margin_start(PAGE_MARGIN);
        grid.set_margin_end(PAGE_MARGIN);
        grid.set_margin_bottom(PAGE_MARGIN);
        grid.set_size_request(-1, vh_to_px(plan.container_height_vh(), WINDOW_HEIGHT));

        let navigate = self.navigator();
        let mut cards = Vec::with_capacity(plan.cells.len());
        for (cell, position) in plan.cells.iter().zip(plan.positions()) {
            let card = CardWidget::new(
                cell.item.clone(),
                self.device,
                self.settings.visibility_threshold,
                &self.settings.asset_root,
                navigate.clone(),
            );
            card.widget()
                .add_css_class(&format!("size-{}", cell.placement.size().as_str()));
            grid.attach(
                card.widget(),
                position.column as i32,
                position.row as i32,
                position.col_span as i32,
                position.row_span as i32,
            );
            card.mount();
            cards.push(card);
        }
        Some((grid, cards))
    }

    fn setup_hero(&self) {
        self.refresh_hero();

        let weak = self.self_weak.borrow().clone();
        self.hero_preview.connect_clicked(move |_| {
            if let Some(window) = weak.upgrade() {
                window.hero.borrow_mut().advance();
                window.refresh_hero();
            }
        });

        let weak = self.self_weak.borrow().clone();
        glib::timeout_add_local_once(LOADING_TIMEOUT, move || {
            if let Some(window) = weak.upgrade() {
                window.hero.borrow_mut().loading_timed_out();
                window.loading_label.set_visible(false);
            }
        });
    }

    fn refresh_hero(&self) {
        let (index, current, upcoming, expand) = {
            let hero = self.hero.borrow();
            (
                hero.current_index(),
                hero.current_media(),
                hero.upcoming_media(),
                hero.has_clicked(),
            )
        };

        let mut loads = Vec::with_capacity(2);
        let page = format!("slide-{index}");
        if self.hero_background.child_by_name(&page).is_none() {
            let (background, found) = media_widget(&current, &self.settings.asset_root);
            self.hero_background.add_named(&background, Some(&page));
            loads.push(found);
        }
        // Only a desktop preview click grows into the background; first paint
        // and mobile swaps are instant.
        self.hero_background.set_transition_type(if expand {
            StackTransitionType::Crossfade
        } else {
            StackTransitionType::None
        });
        self.hero_background.set_visible_child_name(&page);

        let (preview, preview_found) = media_widget(&upcoming, &self.settings.asset_root);
        self.hero_preview.set_child(Some(&preview));
        loads.push(preview_found);
        tracing::debug!(slide = index, expand, "Hero slide shown");

        let mut hero = self.hero.borrow_mut();
        for found in loads {
            if found {
                hero.media_loaded();
            }
        }
        self.loading_label.set_visible(hero.is_loading());
    }

    /// Mobile cards reveal media by scroll position instead of hover.
    fn setup_intersection(&self) {
        if !self.device.is_mobile() {
            return;
        }
        for scroller in [&self.landing_scroller, &self.project_scroller] {
            let adjustment = scroller.vadjustment();
            let weak = self.self_weak.borrow().clone();
            adjustment.connect_value_changed(move |_| {
                if let Some(window) = weak.upgrade() {
                    window.refresh_intersections();
                }
            });
            // Fires once a freshly built page gets its size.
            let weak = self.self_weak.borrow().clone();
            adjustment.connect_changed(move |_| {
                if let Some(window) = weak.upgrade() {
                    window.refresh_intersections();
                }
            });
        }

        let weak = self.self_weak.borrow().clone();
        self.window.connect_map(move |_| {
            if let Some(window) = weak.upgrade() {
                window.schedule_intersection_refresh();
            }
        });
    }

    /// Re-measures cards after the next layout pass rather than now, when a
    /// page that was just built has no bounds yet.
    fn schedule_intersection_refresh(&self) {
        if !self.device.is_mobile() {
            return;
        }
        let weak = self.self_weak.borrow().clone();
        glib::idle_add_local_once(move || {
            if let Some(window) = weak.upgrade() {
                window.refresh_intersections();
            }
        });
    }

    fn refresh_intersections(&self) {
        if !self.device.is_mobile() {
            return;
        }
        let (cards, scroller) = match self.stack.visible_child_name().as_deref() {
            Some("project") => (&self.project_cards, &self.project_scroller),
            _ => (&self.landing_cards, &self.landing_scroller),
        };
        for card in cards.borrow().iter() {
            card.update_intersection(scroller);
        }
    }
}

fn section_box(section: LandingSection) -> GtkBox {
    let container = GtkBox::new(Orientation::Vertical, 12);
    container.set_widget_name(section.anchor());
    container.set_margin_start(PAGE_MARGIN);
    container.set_margin_end(PAGE_MARGIN);
    container.set_margin_top(PAGE_MARGIN);
    container
}

fn section_label(text: &str, class: &str) -> Label {
    let label = Label::new(Some(text));
    label.set_halign(Align::Start);
    label.set_wrap(true);
    label.add_css_class(class);
    label
}

fn build_testimonials() -> Widget {
    let testimonials = section_box(LandingSection::Testimonials);
    testimonials.append(&section_label(
        LandingSection::Testimonials.title(),
        "section-title",
    ));

    let row = GtkBox::new(Orientation::Horizontal, 24);
    row.set_homogeneous(true);
    for testimonial in &sections::TESTIMONIALS {
        let card = GtkBox::new(Orientation::Vertical, 12);
        card.add_css_class("testimonial");
        card.append(&section_label(testimonial.quote, "section-body"));
        card.append(&section_label(
            &format!("{}, {}", testimonial.name, testimonial.company),
            "testimonial-author",
        ));
        row.append(&card);
    }
    testimonials.append(&row);
    testimonials.upcast()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vh_to_px() {
        assert_eq!(vh_to_px(80, 1000), 800);
        assert_eq!(vh_to_px(40, 860), 344);
        assert_eq!(vh_to_px(120, 0), 1);
    }
}
