//! Height-to-color mapping and small color helpers.

use crate::constants::{COLOR_LIGHTNESS, COLOR_MAX_Z, COLOR_MIN_Z, COLOR_SATURATION};

pub type Rgb = [f32; 3];

pub const BLACK: Rgb = [0.0, 0.0, 0.0];

/// Hue gradient endpoints (fractions of a turn) for the height ramp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorTheme {
    pub hue_start: f32,
    pub hue_end: f32,
}

impl ColorTheme {
    /// Violet lowlands to red peaks.
    pub const RETRO: ColorTheme = ColorTheme {
        hue_start: 0.7,
        hue_end: 0.0,
    };
    /// Deep red to amber.
    pub const SUNSET: ColorTheme = ColorTheme {
        hue_start: 0.02,
        hue_end: 0.14,
    };
    /// Cyan to magenta.
    pub const NEON: ColorTheme = ColorTheme {
        hue_start: 0.5,
        hue_end: 0.85,
    };

    #[inline]
    pub fn hue_for(&self, normalized_height: f32) -> f32 {
        lerp(self.hue_start, self.hue_end, normalized_height)
    }

    pub fn color_for_height(&self, z: f32) -> Rgb {
        let hue = self.hue_for(normalize_height(z));
        hsl_to_rgb(hue, COLOR_SATURATION, COLOR_LIGHTNESS)
    }
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self::RETRO
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Map a vertex height onto \[0, 1\]; non-finite heights read as the floor.
#[inline]
pub fn normalize_height(z: f32) -> f32 {
    let n = (z - COLOR_MIN_Z) / (COLOR_MAX_Z - COLOR_MIN_Z);
    if n.is_nan() {
        0.0
    } else {
        n.clamp(0.0, 1.0)
    }
}

pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        return [l, l, l];
    }
    let hi = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let lo = 2.0 * l - hi;
    [
        hue_channel(lo, hi, h + 1.0 / 3.0),
        hue_channel(lo, hi, h),
        hue_channel(lo, hi, h - 1.0 / 3.0),
    ]
}

fn hue_channel(lo: f32, hi: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        lo + (hi - lo) * 6.0 * t
    } else if t < 0.5 {
        hi
    } else if t < 2.0 / 3.0 {
        lo + (hi - lo) * 6.0 * (2.0 / 3.0 - t)
    } else {
        lo
    }
}

/// `0xRRGGBB` to normalized RGB.
pub const fn rgb_from_hex(hex: u32) -> Rgb {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgb, b: Rgb) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn primary_hues() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
        assert!(close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
        assert!(close(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
    }

    #[test]
    fn hue_wraps_and_grey_when_unsaturated() {
        assert!(close(hsl_to_rgb(1.25, 1.0, 0.5), hsl_to_rgb(0.25, 1.0, 0.5)));
        assert!(close(hsl_to_rgb(-0.75, 1.0, 0.5), hsl_to_rgb(0.25, 1.0, 0.5)));
        assert!(close(hsl_to_rgb(0.4, 0.0, 0.3), [0.3, 0.3, 0.3]));
    }

    #[test]
    fn retro_ramp_endpoints() {
        let low = ColorTheme::RETRO.color_for_height(-3.0);
        let high = ColorTheme::RETRO.color_for_height(42.0);
        assert!(close(low, hsl_to_rgb(0.7, 1.0, 0.5)));
        assert!(close(high, [1.0, 0.0, 0.0]));
    }

    #[test]
    fn hex_unpacks_channels() {
        let c = rgb_from_hex(0x0f0f1c);
        assert!((c[0] - 15.0 / 255.0).abs() < 1e-6);
        assert!((c[2] - 28.0 / 255.0).abs() < 1e-6);
    }
}
