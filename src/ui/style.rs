use gdk4::Display;
use gtk4::{CssProvider, STYLE_PROVIDER_PRIORITY_APPLICATION, STYLE_PROVIDER_PRIORITY_USER};

use crate::card::{LogoTransform, Tilt};

const SITE_CSS: &str = r#"
window {
    background-color: #dfdff0;
    color: #000000;
}

.hero {
    background-color: #000000;
}

.hero-title {
    font-size: 64px;
    font-weight: 900;
    color: #dfdff0;
}

.hero-preview {
    border: 2px solid #dfdff0;
    border-radius: 12px;
    padding: 0;
}

.loading-screen {
    background-color: #dfdff0;
    color: #000000;
    font-weight: bold;
}

.section-title {
    font-size: 32px;
    font-weight: 900;
    margin: 24px 0 12px 0;
}

.section-kicker {
    font-size: 11px;
    letter-spacing: 2px;
    opacity: 0.7;
}

.section-body {
    font-size: 15px;
}

.services {
    background-color: #000000;
    color: #dfdff0;
    padding: 40px;
}

.service-name {
    font-size: 48px;
    font-weight: 900;
}

.testimonial {
    background-color: #000000;
    color: #dfdff0;
    border-radius: 8px;
    padding: 24px;
}

.testimonial-author {
    font-weight: bold;
    opacity: 0.7;
}

.bento-card {
    background-color: #000000;
    border: 1px solid rgba(255, 255, 255, 0.2);
    border-radius: 8px;
    color: #dfdff0;
}

.bento-card .card-media {
    transition: filter 300ms ease;
}

.bento-card.state-blurred .card-media {
    filter: blur(16px);
}

.bento-card.state-logo .card-media {
    filter: blur(16px) brightness(0.5);
}

.bento-card.state-error .card-media {
    opacity: 0;
}

.bento-card.media-loading .card-media {
    opacity: 0.4;
}

.card-title {
    font-size: 22px;
    font-weight: 900;
}

.card-description {
    font-size: 13px;
    opacity: 0.8;
}

.card-button {
    border-radius: 999px;
    background-color: #000000;
    color: rgba(255, 255, 255, 0.6);
    border: 1px solid rgba(255, 255, 255, 0.2);
}

.card-error {
    background: none;
    border: 1px dashed rgba(255, 255, 255, 0.3);
    color: rgba(255, 255, 255, 0.5);
}

.contact {
    background-color: #000000;
    color: #dfdff0;
    border-radius: 8px;
    padding: 24px;
}

.contact-notice {
    font-weight: bold;
}
"#;

/// Installs the site stylesheet on the default display.
pub fn load_css() {
    let provider = CssProvider::new();
    provider.load_from_string(SITE_CSS);

    if let Some(display) = Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
        tracing::debug!("Loaded site CSS");
    }
}

/// Per-card stylesheet carrying the live tilt and logo transforms.
///
/// Scoped by widget name, so each card only ever restyles itself.
pub struct CardStyle {
    name: String,
    provider: CssProvider,
}

impl CardStyle {
    pub fn new(name: impl Into<String>) -> Self {
        let provider = CssProvider::new();
        if let Some(display) = Display::default() {
            gtk4::style_context_add_provider_for_display(
                &display,
                &provider,
                STYLE_PROVIDER_PRIORITY_USER,
            );
        }
        Self {
            name: name.into(),
            provider,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, tilt: Tilt, logo: LogoTransform) {
        let tilt_css = tilt.css();
        let tilt_css = if tilt_css.is_empty() { "none" } else { tilt_css.as_str() };
        self.provider.load_from_string(&format!(
            "#{name} {{ transform: {tilt_css}; }}\n#{name} .card-logo {{ transform: {logo}; }}",
            name = self.name,
            logo = logo.css(),
        ));
    }
}

impl Drop for CardStyle {
    fn drop(&mut self) {
        if let Some(display) = Display::default() {
            gtk4::style_context_remove_provider_for_display(&display, &self.provider);
        }
    }
}
