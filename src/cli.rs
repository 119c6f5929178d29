//! Headless commands: print render plans and queue contact messages.

use std::fmt::Write as _;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::card::MediaCard;
use crate::config::Settings;
use crate::contact::{self, ContactField, ContactForm, OutboxTransport};
use crate::device::DeviceClass;
use crate::hero::{HeroCarousel, HERO_SLIDES};
use crate::layout::{resolve_layout, GridPlan, LayoutSelection, CATALOG};
use crate::models::ProjectCatalog;
use crate::routes::{self, LandingScroll, Route};
use crate::sections::{self, LandingSection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the layout templates.
    Layouts,
    /// Print the render plan for a path.
    Plan { route: String },
    /// Validate and queue a contact message.
    Contact {
        name: String,
        email: String,
        message: String,
    },
    /// Open the window, or print the landing plan in a headless build.
    Default,
}

pub const USAGE: &str =
    "usage: thirdspace [layouts | plan <route> | contact --name N --email E --message M]";

pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command> {
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        return Ok(Command::Default);
    };

    match command.as_str() {
        "layouts" => Ok(Command::Layouts),
        "plan" => {
            let route = args.next().unwrap_or_else(|| "/".to_string());
            Ok(Command::Plan { route })
        }
        "contact" => {
            let mut name = None;
            let mut email = None;
            let mut message = None;
            while let Some(arg) = args.next() {
                let slot = match arg.as_str() {
                    "--name" => &mut name,
                    "--email" => &mut email,
                    "--message" => &mut message,
                    other => bail!("Unknown contact option {other:?}\n{USAGE}"),
                };
                let value = args
                    .next()
                    .with_context(|| format!("Missing value for {arg}"))?;
                *slot = Some(value);
            }
            Ok(Command::Contact {
                name: name.unwrap_or_default(),
                email: email.unwrap_or_default(),
                message: message.unwrap_or_default(),
            })
        }
        "-h" | "--help" | "help" => bail!("{USAGE}"),
        other => bail!("Unknown command {other:?}\n{USAGE}"),
    }
}

/// Runs a headless command, printing to stdout.
pub fn run(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Layouts => print!("{}", render_layouts()),
        Command::Plan { route } => {
            let catalog = load_catalog(settings)?;
            print!("{}", render_route(&route, &catalog, settings));
        }
        Command::Default => {
            let catalog = load_catalog(settings)?;
            print!("{}", render_route("/", &catalog, settings));
        }
        Command::Contact {
            name,
            email,
            message,
        } => {
            let outbox = settings.outbox_dir()?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("Failed to start async runtime")?;

            let mut form = ContactForm::new();
            for (field, value) in ContactField::ALL.into_iter().zip([name, email, message]) {
                form.set(field, value);
            }
            let transport = OutboxTransport::new(outbox);
            let notice = runtime
                .block_on(contact::submit(&mut form, &transport))
                .context("Contact form is incomplete")?;
            info!(outbox = ?transport.dir(), %notice, "Contact form settled");
            println!("{notice}");
        }
    }
    Ok(())
}

pub fn load_catalog(settings: &Settings) -> Result<ProjectCatalog> {
    let path = settings.catalog_path().ok();
    let catalog = ProjectCatalog::load_or_builtin(path.as_deref())
        .context("Failed to load project catalog")?;
    info!(projects = catalog.len(), "Catalog ready");
    Ok(catalog)
}

pub fn render_layouts() -> String {
    let mut out = String::new();
    for (seed, spec) in CATALOG.iter().enumerate() {
        let _ = writeln!(
            out,
            "{} ({}) seed%3={} items {}-{}: {}",
            spec.key, spec.name, seed, spec.min_items, spec.max_items, spec.description
        );
        for count in spec.defined_counts() {
            let cells: Vec<String> = resolve_layout(spec.key, count)
                .iter()
                .map(ToString::to_string)
                .collect();
            let _ = writeln!(out, "  {count}: {}", cells.join(" "));
        }
    }
    out
}

pub fn render_route(path: &str, catalog: &ProjectCatalog, settings: &Settings) -> String {
    let device = settings.device_class();
    let mut out = String::new();

    match routes::resolve_route(path, catalog) {
        Route::Redirect(target) => {
            let _ = writeln!(out, "redirect -> {target}");
            let section = target.split_once('#').map(|(_, anchor)| anchor);
            render_landing(&mut out, catalog, settings, device, section);
        }
        Route::Landing { section } => {
            render_landing(&mut out, catalog, settings, device, section.as_deref());
        }
        Route::Project(id) => {
            if let Some(project) = catalog.get(&id) {
                let _ = writeln!(out, "project: {} ({})", project.title, project.id);
                let _ = writeln!(out, "hero: {}", project.hero_media);
                let mut project = project.clone();
                if let Some(seed) = settings.layout_seed {
                    project.layout_seed = Some(seed);
                }
                render_grid(&mut out, project.grid_plan(), device, settings);
            }
        }
    }
    out
}

fn render_landing(
    out: &mut String,
    catalog: &ProjectCatalog,
    settings: &Settings,
    device: DeviceClass,
    section: Option<&str>,
) {
    if let LandingScroll::Section(target) = routes::landing_scroll(section, false) {
        let _ = writeln!(out, "scroll: #{target}");
    }

    let hero = HeroCarousel::new(HERO_SLIDES, device);
    let _ = writeln!(out, "device: {device}");
    let _ = writeln!(
        out,
        "hero: slide {} {} (next {}, waits for {} loads)",
        hero.current_index(),
        hero.current_media().src,
        hero.upcoming_media().src,
        hero.required_loads()
    );

    for section in LandingSection::ALL {
        let _ = writeln!(out, "[{}] {}", section.anchor(), section.title());
        match section {
            LandingSection::About => {
                let _ = writeln!(out, "  {}", sections::ABOUT_HEADLINE);
                let _ = writeln!(out, "  {} {}", sections::ABOUT_LEAD, sections::ABOUT_BODY);
                let _ = writeln!(out, "  image: {}", sections::ABOUT_IMAGE);
            }
            LandingSection::Projects => {
                let _ = writeln!(out, "  {}", sections::PROJECTS_KICKER);
                let _ = writeln!(out, "  {}", sections::PROJECTS_INTRO);
                let items = catalog.landing_items();
                let selection = settings
                    .layout_seed
                    .map(LayoutSelection::Seeded)
                    .unwrap_or_default();
                render_grid(out, GridPlan::build(&items, &selection), device, settings);
            }
            LandingSection::Services => {
                let _ = writeln!(out, "  {}", sections::SERVICES_KICKER);
                let _ = writeln!(
                    out,
                    "  {}: {}",
                    sections::SERVICES_HEADLINE,
                    sections::SERVICES.join(" | ")
                );
                let _ = writeln!(
                    out,
                    "  {} [{}]",
                    sections::SERVICES_PITCH,
                    sections::SERVICES_CALL_TO_ACTION
                );
                let _ = writeln!(out, "  image: {}", sections::SERVICES_IMAGE);
            }
            LandingSection::Testimonials => {
                for testimonial in &sections::TESTIMONIALS {
                    let _ = writeln!(
                        out,
                        "  \"{}\" - {}, {}",
                        testimonial.quote, testimonial.name, testimonial.company
                    );
                }
            }
            LandingSection::Contact => {
                let _ = writeln!(out, "  {}", sections::CONTACT_KICKER);
                let _ = writeln!(out, "  {}", sections::CONTACT_HEADLINE);
                let _ = writeln!(out, "  to: {} <{}>", contact::STUDIO_NAME, contact::STUDIO_INBOX);
            }
        }
    }
}

fn render_grid(
    out: &mut String,
    plan: Option<GridPlan<'_>>,
    device: DeviceClass,
    settings: &Settings,
) {
    let Some(plan) = plan else {
        let _ = writeln!(out, "grid: empty");
        return;
    };

    let _ = writeln!(out, "{}", plan.summary());
    let _ = writeln!(out, "height: {}vh", plan.container_height_vh());
    for (cell, position) in plan.cells.iter().zip(plan.positions()) {
        let card = MediaCard::new(cell.item.clone(), device)
            .with_visibility_threshold(settings.visibility_threshold);
        let view = card.view();
        let button = view.button.map(|b| b.label).unwrap_or("-");
        let local = settings.asset_root.join(view.media.src.trim_start_matches('/'));
        let missing = if local.is_file() { "" } else { " missing" };
        let _ = writeln!(
            out,
            "  [{},{}] {:<22} {:<20} {:<30} {}{} ({})",
            position.row,
            position.column,
            cell.placement.span_class(),
            format!("{:?}", card.state()),
            cell.item.title,
            view.media.src,
            missing,
            button
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_args(args(&[])).unwrap(), Command::Default);
        assert_eq!(parse_args(args(&["layouts"])).unwrap(), Command::Layouts);
        assert_eq!(
            parse_args(args(&["plan", "/projects/shoquba"])).unwrap(),
            Command::Plan {
                route: "/projects/shoquba".into()
            }
        );
        assert_eq!(
            parse_args(args(&["plan"])).unwrap(),
            Command::Plan { route: "/".into() }
        );
    }

    #[test]
    fn test_parse_contact() {
        let command = parse_args(args(&[
            "contact", "--email", "ada@example.com", "--name", "Ada", "--message", "Hi",
        ]))
        .unwrap();
        assert_eq!(
            command,
            Command::Contact {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                message: "Hi".into()
            }
        );

        assert!(parse_args(args(&["contact", "--name"])).is_err());
        assert!(parse_args(args(&["contact", "--phone", "1"])).is_err());
        assert!(parse_args(args(&["deploy"])).is_err());
    }

    #[test]
    fn test_render_layouts_lists_catalog() {
        let text = render_layouts();
        assert!(text.contains("layout1 (Hero Focus)"));
        assert!(text.contains("  4: hero(2x2) square(1x1) square(1x1) wide(2x1)"));
        assert!(text.contains("layout3 (Mosaic)"));
    }

    #[test]
    fn test_render_project_route() {
        let catalog = ProjectCatalog::builtin().unwrap();
        let assets = tempfile::tempdir().unwrap();
        let settings = Settings {
            asset_root: assets.path().to_path_buf(),
            ..Settings::default()
        };
        let text = render_route("/projects/1700-spot", &catalog, &settings);
        assert!(text.contains("project: 1700 Spot (1700-spot)"));
        assert!(text.contains("Layout: layout3 | Items: 6 | Grid: 2x2"));
        assert!(text.contains("PlaceholderWithLogo"));
        assert!(text.contains("col-span-1 row-span-2"));
        assert!(text.contains(" missing"));
    }

    #[test]
    fn test_render_mobile_landing_and_redirect() {
        let catalog = ProjectCatalog::builtin().unwrap();
        let settings = Settings {
            device_override: Some(DeviceClass::Mobile),
            ..Settings::default()
        };
        let text = render_route("/projects/nowhere", &catalog, &settings);
        assert!(text.starts_with("redirect -> /#projects\nscroll: #projects\n"));
        assert!(text.contains("device: mobile"));
        assert!(text.contains("img/hero-1-mobile.webp"));
        assert!(text.contains("Layout: layout1 | Items: 2"));
    }

    #[test]
    fn test_seed_overrides_project_layout() {
        let catalog = ProjectCatalog::builtin().unwrap();
        let settings = Settings {
            layout_seed: Some(3),
            ..Settings::default()
        };
        let text = render_route("/projects/1700-spot", &catalog, &settings);
        assert!(text.contains("Layout: layout1 | Items: 6"));
    }

    #[test]
    fn test_landing_sections_in_page_order() {
        let catalog = ProjectCatalog::builtin().unwrap();
        let text = render_route("/", &catalog, &Settings::default());
        assert!(!text.contains("scroll:"));

        let offsets: Vec<usize> = LandingSection::ALL
            .iter()
            .map(|section| text.find(&format!("[{}]", section.anchor())).unwrap())
            .collect();
        assert!(offsets.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(text.contains("Your Gateway to Immersion: XR | VR | Deployment"));
        assert!(text.contains("- Emily Davis, Digital Dynamics"));
        assert!(text.contains("hero: slide 1 videos/hero-1.mp4"));
    }
}
