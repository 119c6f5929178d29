use serde::Serialize;

pub const SEE_PROJECT_LABEL: &str = "see project";
pub const COMING_SOON_LABEL: &str = "coming soon";

/// Where activating a card's action control takes the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Navigation {
    /// Full top-level navigation away from the site.
    External { url: String },
    /// In-app route change, followed by a scroll to the top of the new view.
    Internal { path: String, scroll_to_top: bool },
}

impl Navigation {
    pub fn for_target(target: &str) -> Self {
        let target = target.trim();
        if is_external(target) {
            Self::External {
                url: target.to_string(),
            }
        } else {
            Self::Internal {
                path: target.to_string(),
                scroll_to_top: true,
            }
        }
    }
}

/// Scheme-prefixed (`https:`, `mailto:` ...) or protocol-relative (`//host`).
fn is_external(target: &str) -> bool {
    if target.starts_with("//") {
        return true;
    }
    let Some((scheme, _)) = target.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// The card's action control as rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionButton {
    pub label: &'static str,
    pub enabled: bool,
}

impl ActionButton {
    pub fn new(coming_soon: bool) -> Self {
        if coming_soon {
            Self {
                label: COMING_SOON_LABEL,
                enabled: false,
            }
        } else {
            Self {
                label: SEE_PROJECT_LABEL,
                enabled: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_targets() {
        for url in [
            "https://example.com/tour",
            "http://example.com",
            "mailto:studio@example.com",
            "//cdn.example.com/v.mp4",
        ] {
            assert!(
                matches!(Navigation::for_target(url), Navigation::External { .. }),
                "{url}"
            );
        }
    }

    #[test]
    fn test_internal_targets() {
        assert_eq!(
            Navigation::for_target("/projects/shoquba"),
            Navigation::Internal {
                path: "/projects/shoquba".to_string(),
                scroll_to_top: true
            }
        );
        assert!(matches!(
            Navigation::for_target("projects/1700-spot?tab=a:b"),
            Navigation::Internal { .. }
        ));
        assert!(matches!(
            Navigation::for_target("/#contact"),
            Navigation::Internal { .. }
        ));
    }

    #[test]
    fn test_button_labels() {
        assert_eq!(ActionButton::new(false).label, "see project");
        assert!(ActionButton::new(false).enabled);
        assert_eq!(ActionButton::new(true).label, "coming soon");
        assert!(!ActionButton::new(true).enabled);
    }
}
