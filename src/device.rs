use std::fmt;
use std::str::FromStr;

/// Viewports at or below this width are treated as mobile.
pub const MOBILE_MAX_WIDTH: u32 = 768;

const MOBILE_UA_TOKENS: &[&str] = &[
    "android",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Device class a render context is resolved for.
///
/// Mobile has no pointer: viewport intersection stands in for hover and video
/// sources are swapped for still images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceClass {
    Mobile,
    #[default]
    Desktop,
}

impl DeviceClass {
    /// Classifies a render context from its viewport width and user agent.
    pub fn detect(viewport_width: u32, user_agent: Option<&str>) -> Self {
        if viewport_width <= MOBILE_MAX_WIDTH {
            return Self::Mobile;
        }
        let ua_is_mobile = user_agent
            .map(|ua| {
                let ua = ua.to_ascii_lowercase();
                MOBILE_UA_TOKENS.iter().any(|token| ua.contains(token))
            })
            .unwrap_or(false);
        if ua_is_mobile {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    pub fn is_mobile(&self) -> bool {
        *self == Self::Mobile
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mobile => f.write_str("mobile"),
            Self::Desktop => f.write_str("desktop"),
        }
    }
}

impl FromStr for DeviceClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobile" | "phone" | "touch" => Ok(Self::Mobile),
            "desktop" | "pointer" => Ok(Self::Desktop),
            other => Err(format!("unknown device class: {other}")),
        }
    }
}
