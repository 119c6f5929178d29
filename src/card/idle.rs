use std::f32::consts::PI;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Looping logo motion shown while a card rests on its logo placeholder.
///
/// Content files refer to these by name or by their 1-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "IdleAnimationRepr", rename_all = "lowercase")]
pub enum IdleAnimation {
    #[default]
    Rotate,
    Float,
    Wiggle,
    Pulse,
    Bounce,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdleAnimationRepr {
    Index(u8),
    Name(String),
}

impl TryFrom<IdleAnimationRepr> for IdleAnimation {
    type Error = String;

    fn try_from(repr: IdleAnimationRepr) -> Result<Self, Self::Error> {
        match repr {
            IdleAnimationRepr::Index(index) => Self::from_index(index)
                .ok_or_else(|| format!("idle animation index {index} is out of range 1..=5")),
            IdleAnimationRepr::Name(name) => Self::from_name(&name)
                .ok_or_else(|| format!("unknown idle animation: {name}")),
        }
    }
}

/// Transform applied to the logo for one animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoTransform {
    pub rotate_deg: f32,
    pub translate_y: f32,
    pub scale: f32,
}

impl LogoTransform {
    pub const IDENTITY: Self = Self {
        rotate_deg: 0.0,
        translate_y: 0.0,
        scale: 1.0,
    };

    /// CSS transform form, `none` at rest.
    pub fn css(&self) -> String {
        if *self == Self::IDENTITY {
            return "none".to_string();
        }
        format!(
            "rotate({:.2}deg) translateY({:.2}px) scale({:.3})",
            self.rotate_deg, self.translate_y, self.scale
        )
    }
}

impl IdleAnimation {
    pub const ALL: [Self; 5] = [
        Self::Rotate,
        Self::Float,
        Self::Wiggle,
        Self::Pulse,
        Self::Bounce,
    ];

    /// 1 = rotate, 2 = float, 3 = wiggle, 4 = pulse, 5 = bounce.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1..=5 => Some(Self::ALL[(index - 1) as usize]),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "rotate" | "spin" => Some(Self::Rotate),
            "float" => Some(Self::Float),
            "wiggle" => Some(Self::Wiggle),
            "pulse" => Some(Self::Pulse),
            "bounce" => Some(Self::Bounce),
            _ => None,
        }
    }

    /// Length of one loop.
    pub fn period(&self) -> Duration {
        match self {
            Self::Rotate => Duration::from_secs(8),
            Self::Float => Duration::from_secs(3),
            Self::Wiggle => Duration::from_millis(1200),
            Self::Pulse => Duration::from_secs(2),
            Self::Bounce => Duration::from_secs(1),
        }
    }

    /// Logo transform `elapsed` after the animation (re)started.
    ///
    /// Every kind is at [`LogoTransform::IDENTITY`] at phase zero.
    pub fn frame(&self, elapsed: Duration) -> LogoTransform {
        let period = self.period().as_secs_f32();
        let phase = (elapsed.as_secs_f32() % period) / period;
        let wave = (phase * 2.0 * PI).sin();

        let mut t = LogoTransform::IDENTITY;
        match self {
            Self::Rotate => t.rotate_deg = phase * 360.0,
            Self::Float => t.translate_y = -10.0 * wave,
            Self::Wiggle => t.rotate_deg = 8.0 * wave,
            Self::Pulse => t.scale = 1.0 + 0.08 * wave,
            Self::Bounce => t.translate_y = -16.0 * (phase * PI).sin().abs(),
        }
        t
    }
}

impl fmt::Display for IdleAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rotate => "rotate",
            Self::Float => "float",
            Self::Wiggle => "wiggle",
            Self::Pulse => "pulse",
            Self::Bounce => "bounce",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_logo_transform_css() {
        assert_eq!(LogoTransform::IDENTITY.css(), "none");
        let t = LogoTransform {
            rotate_deg: 90.0,
            translate_y: -4.5,
            scale: 1.05,
        };
        assert_eq!(t.css(), "rotate(90.00deg) translateY(-4.50px) scale(1.050)");
    }

    #[test]
    fn test_index_mapping() {
        assert_eq!(IdleAnimation::from_index(1), Some(IdleAnimation::Rotate));
        assert_eq!(IdleAnimation::from_index(3), Some(IdleAnimation::Wiggle));
        assert_eq!(IdleAnimation::from_index(5), Some(IdleAnimation::Bounce));
        assert_eq!(IdleAnimation::from_index(0), None);
        assert_eq!(IdleAnimation::from_index(6), None);
    }

    #[test]
    fn test_all_kinds_start_at_identity() {
        for kind in IdleAnimation::ALL {
            assert_eq!(kind.frame(Duration::ZERO), LogoTransform::IDENTITY, "{kind}");
        }
    }

    #[test]
    fn test_frames_loop() {
        for kind in IdleAnimation::ALL {
            let quarter = kind.period() / 4;
            let a = kind.frame(quarter);
            let b = kind.frame(kind.period() * 3 + quarter);
            assert!(close(a.rotate_deg, b.rotate_deg), "{kind}");
            assert!(close(a.translate_y, b.translate_y), "{kind}");
            assert!(close(a.scale, b.scale), "{kind}");
        }
    }

    #[test]
    fn test_kind_moves_expected_channel() {
        let quarter = |k: IdleAnimation| k.frame(k.period() / 4);
        assert!(close(quarter(IdleAnimation::Rotate).rotate_deg, 90.0));
        assert!(close(quarter(IdleAnimation::Float).translate_y, -10.0));
        assert!(close(quarter(IdleAnimation::Wiggle).rotate_deg, 8.0));
        assert!(close(quarter(IdleAnimation::Pulse).scale, 1.08));
        assert!(quarter(IdleAnimation::Bounce).translate_y < 0.0);
    }

    #[test]
    fn test_deserialize_index_or_name() {
        let parsed: Vec<IdleAnimation> = serde_json::from_str(r#"[2, "pulse", 5]"#).unwrap();
        assert_eq!(
            parsed,
            vec![IdleAnimation::Float, IdleAnimation::Pulse, IdleAnimation::Bounce]
        );
        assert!(serde_json::from_str::<IdleAnimation>("9").is_err());
        assert!(serde_json::from_str::<IdleAnimation>(r#""spiral""#).is_err());
    }
}
