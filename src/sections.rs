//! Landing page sections below the hero, in page order, with their static copy.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandingSection {
    About,
    Projects,
    Services,
    Testimonials,
    Contact,
}

impl LandingSection {
    /// Page order.
    pub const ALL: [Self; 5] = [
        Self::About,
        Self::Projects,
        Self::Services,
        Self::Testimonials,
        Self::Contact,
    ];

    /// Fragment that scrolls to the section, e.g. `projects` in `/#projects`.
    pub fn anchor(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Projects => "projects",
            Self::Services => "services",
            Self::Testimonials => "testimonials",
            Self::Contact => "contact",
        }
    }

    /// Case-insensitive, as the navbar lowercases its labels.
    pub fn from_anchor(anchor: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|section| section.anchor().eq_ignore_ascii_case(anchor.trim()))
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::About => "About",
            Self::Projects => "Projects",
            Self::Services => "Services",
            Self::Testimonials => "Testimonials",
            Self::Contact => "Contact",
        }
    }

    /// Internal link for the navbar.
    pub fn href(self) -> String {
        format!("/#{}", self.anchor())
    }
}

impl fmt::Display for LandingSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}

pub const ABOUT_HEADLINE: &str = "Show communities the future and bring them on board";
pub const ABOUT_LEAD: &str = "Spark excitement, build trust, and gain support for your projects.";
pub const ABOUT_BODY: &str = "Our real-time visual experiences make it easy for communities and \
stakeholders to explore, connect with, and believe in your vision.";
pub const ABOUT_IMAGE: &str = "img/hero-3-mobile.webp";

pub const PROJECTS_KICKER: &str = "Interactivity like you've never seen before.";
pub const PROJECTS_INTRO: &str = "Step inside your designs and explore every detail in real \
time - giving stakeholders a true sense of place before it's built. Check out our completed \
projects below.";

pub const SERVICES_IMAGE: &str = "/img/entrance.png";
pub const SERVICES_KICKER: &str = "Discover What We Can Build Together";
pub const SERVICES_HEADLINE: &str = "Your Gateway to Immersion";
pub const SERVICES: [&str; 3] = ["XR", "VR", "Deployment"];
pub const SERVICES_PITCH: &str = "It has never been easier to bring your vision to life. \
Get in touch and let's bring your idea into reality!";
pub const SERVICES_CALL_TO_ACTION: &str = "Get In Touch!";

pub const CONTACT_KICKER: &str = "Work with Third Space Interactive";
pub const CONTACT_HEADLINE: &str = "Together, we can turn ideas into Reality.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Testimonial {
    pub quote: &'static str,
    pub name: &'static str,
    pub company: &'static str,
}

pub const TESTIMONIALS: [Testimonial; 3] = [
    Testimonial {
        quote: "Working with Third Space Interactive was an incredible experience. They \
delivered exactly what we needed and exceeded our expectations.",
        name: "Sarah Johnson",
        company: "Tech Innovations Inc",
    },
    Testimonial {
        quote: "Their attention to detail and creative approach made our project stand out. \
Highly recommend their services!",
        name: "Michael Chen",
        company: "Creative Solutions LLC",
    },
    Testimonial {
        quote: "Professional, reliable, and innovative. Third Space Interactive transformed \
our vision into reality.",
        name: "Emily Davis",
        company: "Digital Dynamics",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_lookup() {
        assert_eq!(LandingSection::from_anchor("projects"), Some(LandingSection::Projects));
        assert_eq!(LandingSection::from_anchor("Testimonials"), Some(LandingSection::Testimonials));
        assert_eq!(LandingSection::from_anchor("pricing"), None);
        for section in LandingSection::ALL {
            assert_eq!(LandingSection::from_anchor(section.anchor()), Some(section));
        }
    }

    #[test]
    fn test_projects_follow_about() {
        assert_eq!(LandingSection::ALL[0], LandingSection::About);
        assert_eq!(LandingSection::ALL[1], LandingSection::Projects);
        assert_eq!(LandingSection::Services.href(), "/#services");
        assert_eq!(LandingSection::Contact.to_string(), "contact");
    }
}
