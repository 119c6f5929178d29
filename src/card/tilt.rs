/// Maximum tilt in degrees across the full card width or height.
const TILT_DEGREES: f64 = 5.0;
const TILT_SCALE: f64 = 0.95;
const PERSPECTIVE_PX: u32 = 700;

/// 3D tilt that follows the pointer across a card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub scale: f64,
}

impl Tilt {
    /// Resting pose, used on pointer leave.
    pub const IDENTITY: Self = Self {
        rotate_x: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
    };

    /// Tilt for a pointer at `(x, y)` inside a `width` x `height` card.
    pub fn from_pointer(x: f64, y: f64, width: f64, height: f64) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::IDENTITY;
        }
        let rel_x = (x / width).clamp(0.0, 1.0);
        let rel_y = (y / height).clamp(0.0, 1.0);

        Self {
            rotate_x: (rel_y - 0.5) * TILT_DEGREES,
            rotate_y: (rel_x - 0.5) * -TILT_DEGREES,
            scale: TILT_SCALE,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// CSS transform form, empty at rest.
    pub fn css(&self) -> String {
        if self.is_identity() {
            return String::new();
        }
        format!(
            "perspective({PERSPECTIVE_PX}px) rotateX({:.2}deg) rotateY({:.2}deg) \
             scale3d({s}, {s}, {s})",
            self.rotate_x,
            self.rotate_y,
            s = self.scale
        )
    }
}

impl Default for Tilt {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_flat() {
        let tilt = Tilt::from_pointer(50.0, 50.0, 100.0, 100.0);
        assert_eq!(tilt.rotate_x, 0.0);
        assert_eq!(tilt.rotate_y, 0.0);
        assert_eq!(tilt.scale, TILT_SCALE);
    }

    #[test]
    fn test_corners() {
        let top_left = Tilt::from_pointer(0.0, 0.0, 200.0, 100.0);
        assert_eq!(top_left.rotate_x, -2.5);
        assert_eq!(top_left.rotate_y, 2.5);

        let bottom_right = Tilt::from_pointer(200.0, 100.0, 200.0, 100.0);
        assert_eq!(bottom_right.rotate_x, 2.5);
        assert_eq!(bottom_right.rotate_y, -2.5);
    }

    #[test]
    fn test_degenerate_size() {
        assert!(Tilt::from_pointer(10.0, 10.0, 0.0, 100.0).is_identity());
        assert_eq!(Tilt::IDENTITY.css(), "");
    }

    #[test]
    fn test_css() {
        let css = Tilt::from_pointer(0.0, 0.0, 100.0, 100.0).css();
        assert_eq!(
            css,
            "perspective(700px) rotateX(-2.50deg) rotateY(2.50deg) scale3d(0.95, 0.95, 0.95)"
        );
    }
}
