//! Maps iteration counts to colors.  Points that exhaust the budget
//! are painted black; escaping points get a ramp that runs from blue
//! for points that escape immediately toward red and green for points
//! that linger near the set boundary.

use num::clamp;

/// One opaque pixel.  Alpha is not stored; every pixel the renderer
/// emits is fully opaque.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PixelColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl PixelColor {
    /// The color of every in-set pixel.
    pub const BLACK: PixelColor = PixelColor { r: 0, g: 0, b: 0 };
}

fn channel(value: f64) -> u8 {
    clamp(value.round(), 0.0, 255.0) as u8
}

/// Maps an iteration count and its budget to a color.  A count equal
/// to the budget means the point never escaped and is treated as in
/// the set.  Otherwise the normalized count t in [0, 1) drives the
/// ramp: red rises linearly, green as sqrt(t), blue falls linearly.
/// The formulas cannot leave [0, 255] for t in [0, 1), but each
/// channel clamps anyway so a stray rounding cannot wrap a byte.
pub fn color_for(iteration: usize, max_iterations: usize) -> PixelColor {
    if iteration >= max_iterations {
        return PixelColor::BLACK;
    }

    let t = (iteration as f64) / (max_iterations as f64);
    PixelColor {
        r: channel(255.0 * t),
        g: channel(255.0 * t.sqrt()),
        b: channel(255.0 * (1.0 - t)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_budget_is_black() {
        assert_eq!(color_for(200, 200), PixelColor::BLACK);
    }

    #[test]
    fn instant_escape_is_pure_blue() {
        assert_eq!(color_for(0, 200), PixelColor { r: 0, g: 0, b: 255 });
    }

    #[test]
    fn near_budget_escape_is_nearly_red() {
        let c = color_for(199, 200);
        assert!(c.r > 250);
        assert!(c.b < 5);
        assert_ne!(c, PixelColor::BLACK);
    }

    #[test]
    fn red_rises_and_blue_falls_with_t() {
        let slow = color_for(150, 200);
        let fast = color_for(10, 200);
        assert!(slow.r > fast.r);
        assert!(slow.b < fast.b);
    }

    #[test]
    fn midpoint_matches_the_ramp_formulas() {
        let c = color_for(100, 200);
        assert_eq!(c.r, 128); // round(255 * 0.5)
        assert_eq!(c.g, 180); // round(255 * sqrt(0.5))
        assert_eq!(c.b, 128); // round(255 * 0.5)
    }
}
