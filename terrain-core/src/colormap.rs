/// 16-bit RGB triple as stored in a colored point record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u16,
    pub g: u16,
    pub b: u16,
}

/// Anchor colors of the elevation ramp at t = 0, 0.25, 0.5, 0.75, 1.
const ANCHORS: [[f64; 3]; 5] = [
    [0.267, 0.004, 0.329],
    [0.282, 0.141, 0.435],
    [0.127, 0.570, 0.704],
    [0.267, 0.678, 0.653],
    [0.993, 0.906, 0.569],
];

/// Map a normalized elevation in [0, 1] to a 16-bit RGB triple.
///
/// Four linear segments between the ramp anchors; each channel is
/// interpolated on the segment-local fraction and scaled to u16 by
/// rounding. Inputs outside [0, 1] are clamped.
pub fn elevation_color(t: f64) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

    let segment = ((t * 4.0) as usize).min(3);
    let local = t * 4.0 - segment as f64;
    let lo = ANCHORS[segment];
    let hi = ANCHORS[segment + 1];

    let channel = |a: f64, b: f64| ((a + local * (b - a)) * 65535.0).round() as u16;

    Color {
        r: channel(lo[0], hi[0]),
        g: channel(lo[1], hi[1]),
        b: channel(lo[2], hi[2]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaled(anchor: [f64; 3]) -> Color {
        Color {
            r: (anchor[0] * 65535.0).round() as u16,
            g: (anchor[1] * 65535.0).round() as u16,
            b: (anchor[2] * 65535.0).round() as u16,
        }
    }

    #[test]
    fn endpoints_hit_the_anchor_colors() {
        assert_eq!(elevation_color(0.0), scaled(ANCHORS[0]));
        assert_eq!(elevation_color(1.0), scaled(ANCHORS[4]));
    }

    #[test]
    fn breakpoints_hit_the_interior_anchors() {
        assert_eq!(elevation_color(0.25), scaled(ANCHORS[1]));
        assert_eq!(elevation_color(0.5), scaled(ANCHORS[2]));
        assert_eq!(elevation_color(0.75), scaled(ANCHORS[3]));
    }

    #[test]
    fn clamps_outside_the_unit_interval() {
        assert_eq!(elevation_color(-0.5), elevation_color(0.0));
        assert_eq!(elevation_color(1.5), elevation_color(1.0));
        assert_eq!(elevation_color(f64::NAN), elevation_color(0.0));
    }

    #[test]
    fn midpoint_interpolates_within_a_segment() {
        // halfway through the first segment
        let c = elevation_color(0.125);
        let expected = Color {
            r: ((0.267_f64 + 0.5 * (0.282 - 0.267)) * 65535.0).round() as u16,
            g: ((0.004_f64 + 0.5 * (0.141 - 0.004)) * 65535.0).round() as u16,
            b: ((0.329_f64 + 0.5 * (0.435 - 0.329)) * 65535.0).round() as u16,
        };
        assert_eq!(c, expected);
    }
}
