//! Procedural colour cycling
//!
//! Colours are rotated through HLS space: every score cadence step the base
//! colour's hue advances by a fixed fraction of the circle and the score
//! colours are re-derived as darker/lighter shades of it. Channel values are
//! truncated back to `u8` after each conversion, so a rotation is only
//! approximately reversible.

use serde::{Deserialize, Serialize};

use crate::consts::{CADENCE_SHADE, HUE_STEP, START_COLOR, START_SHADE};

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn to_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    fn from_unit(r: f64, g: f64, b: f64) -> Self {
        // Truncate like an integer cast; inputs are already in [0, 1]
        let channel = |c: f64| (c * 255.0).clamp(0.0, 255.0) as u8;
        Self::new(channel(r), channel(g), channel(b))
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// Hue, lightness, saturation, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hls {
    pub h: f64,
    pub l: f64,
    pub s: f64,
}

/// Convert unit RGB to HLS
pub fn rgb_to_hls(r: f64, g: f64, b: f64) -> Hls {
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let sumc = maxc + minc;
    let rangec = maxc - minc;
    let l = sumc / 2.0;

    if minc == maxc {
        return Hls { h: 0.0, l, s: 0.0 };
    }

    let s = if l <= 0.5 {
        rangec / sumc
    } else {
        rangec / (2.0 - sumc)
    };

    let rc = (maxc - r) / rangec;
    let gc = (maxc - g) / rangec;
    let bc = (maxc - b) / rangec;

    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    Hls {
        h: (h / 6.0).rem_euclid(1.0),
        l,
        s,
    }
}

/// Convert HLS back to unit RGB
pub fn hls_to_rgb(hls: Hls) -> (f64, f64, f64) {
    let Hls { h, l, s } = hls;
    if s == 0.0 {
        return (l, l, l);
    }

    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;

    (
        hue_channel(m1, m2, h + 1.0 / 3.0),
        hue_channel(m1, m2, h),
        hue_channel(m1, m2, h - 1.0 / 3.0),
    )
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

/// Rotate a colour's hue by `step` (fraction of a full turn)
pub fn rotate_hue(color: Rgb, step: f64) -> Rgb {
    let (r, g, b) = color.to_unit();
    let mut hls = rgb_to_hls(r, g, b);
    hls.h = (hls.h + step).rem_euclid(1.0);
    let (r, g, b) = hls_to_rgb(hls);
    Rgb::from_unit(r, g, b)
}

/// Next base colour in the cycle
pub fn advance_palette(color: Rgb) -> Rgb {
    rotate_hue(color, HUE_STEP)
}

/// Shift lightness by `delta`, clamping to [0, 1]
pub fn lighten(color: Rgb, delta: f64) -> Rgb {
    let (r, g, b) = color.to_unit();
    let mut hls = rgb_to_hls(r, g, b);
    hls.l = (hls.l + delta).clamp(0.0, 1.0);
    let (r, g, b) = hls_to_rgb(hls);
    Rgb::from_unit(r, g, b)
}

/// Background colour plus the two score text shades derived from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub base: Rgb,
    pub score: Rgb,
    pub high_score: Rgb,
}

impl Palette {
    /// Palette at the start of a session
    pub fn start() -> Self {
        Self::derive(Rgb::from(START_COLOR), START_SHADE)
    }

    fn derive(base: Rgb, shade: f64) -> Self {
        Self {
            base,
            score: lighten(base, -shade),
            high_score: lighten(base, shade),
        }
    }

    /// Rotate the base hue one step and re-derive the score shades
    pub fn advance(&mut self) {
        *self = Self::derive(advance_palette(self.base), CADENCE_SHADE);
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_grey_has_no_hue() {
        let hls = rgb_to_hls(0.5, 0.5, 0.5);
        assert_eq!(hls.h, 0.0);
        assert_eq!(hls.s, 0.0);
        assert!((hls.l - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_pure_red_hls() {
        let hls = rgb_to_hls(1.0, 0.0, 0.0);
        assert!(hls.h.abs() < 1e-12);
        assert!((hls.l - 0.5).abs() < 1e-12);
        assert!((hls.s - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_red_by_third_is_green() {
        let green = rotate_hue(Rgb::new(255, 0, 0), 1.0 / 3.0);
        assert_eq!(green.r, 0);
        assert!(green.g >= 254);
        assert_eq!(green.b, 0);
    }

    #[test]
    fn test_advance_palette_is_deterministic() {
        let a = advance_palette(Rgb::from(START_COLOR));
        let b = advance_palette(Rgb::from(START_COLOR));
        assert_eq!(a, b);
        assert_ne!(a, Rgb::from(START_COLOR));
    }

    #[test]
    fn test_lighten_clamps() {
        assert_eq!(lighten(Rgb::new(200, 10, 10), 2.0), Rgb::WHITE);
        assert_eq!(lighten(Rgb::new(200, 10, 10), -2.0), Rgb::BLACK);
    }

    #[test]
    fn test_start_palette_shades() {
        let palette = Palette::start();
        assert_eq!(palette.base, Rgb::from(START_COLOR));
        let sum = |c: Rgb| u32::from(c.r) + u32::from(c.g) + u32::from(c.b);
        assert!(sum(palette.score) < sum(palette.base));
        assert!(sum(palette.high_score) > sum(palette.base));
    }

    #[test]
    fn test_palette_advance_rederives_shades() {
        let mut palette = Palette::start();
        palette.advance();
        assert_eq!(palette.base, advance_palette(Rgb::from(START_COLOR)));
        assert_eq!(palette.score, lighten(palette.base, -CADENCE_SHADE));
        assert_eq!(palette.high_score, lighten(palette.base, CADENCE_SHADE));
    }

    proptest! {
        #[test]
        fn prop_hls_round_trip_close(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
            let color = Rgb::new(r, g, b);
            let back = rotate_hue(color, 0.0);
            prop_assert!((i16::from(back.r) - i16::from(r)).abs() <= 1);
            prop_assert!((i16::from(back.g) - i16::from(g)).abs() <= 1);
            prop_assert!((i16::from(back.b) - i16::from(b)).abs() <= 1);
        }

        #[test]
        fn prop_lighten_zero_keeps_lightness(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
            let color = Rgb::new(r, g, b);
            let (ur, ug, ub) = color.to_unit();
            let before = rgb_to_hls(ur, ug, ub).l;
            let (lr, lg, lb) = lighten(color, 0.0).to_unit();
            let after = rgb_to_hls(lr, lg, lb).l;
            prop_assert!((before - after).abs() <= 1.0 / 255.0 + 1e-9);
        }
    }
}
