//! Perceptual color model
//!
//! Hue/saturation/perceived-brightness ("HSP") conversion using the
//! ITU-R BT.709 luma weights, and the faint-segment opacity derived from it.
//! See http://alienryderflex.com/hsp.html for the underlying model.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use libm::{roundf, sqrtf};

mod palette;

pub use palette::{theme_color, AMBIENT_BACKGROUND, AMBIENT_FOREGROUND};

/// Red luma weight
const PR: f32 = 0.2126;
/// Green luma weight
const PG: f32 = 0.7152;
/// Blue luma weight
const PB: f32 = 0.0722;

/// Faint segments should end up about as bright as this dark red once
/// their transparency is applied.
pub const FAINT_REFERENCE: Rgb888 = Rgb888::new(0x44, 0x00, 0x00);

/// Upper bound on faint-segment opacity over a lit background.
const BACKGROUND_FAINT_CEILING: f32 = 0.05;

/// A color expressed as hue, saturation and perceived brightness, each in
/// `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HspColor {
    h: f32,
    s: f32,
    p: f32,
}

impl HspColor {
    /// Create from HSP components, clamping each to `0.0..=1.0`.
    pub fn new(h: f32, s: f32, p: f32) -> Self {
        Self {
            h: window(h),
            s: window(s),
            p: window(p),
        }
    }

    /// Create from integer HSP components in `0..=255`.
    pub fn from_hsp8(h: i32, s: i32, p: i32) -> Self {
        Self::new(window8(h) / 255.0, window8(s) / 255.0, window8(p) / 255.0)
    }

    /// Convert RGB channels (clamped to `0.0..=1.0`) to HSP.
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        let (r, g, b) = (window(r), window(g), window(b));
        let p = sqrtf(r * r * PR + g * g * PG + b * b * PB);

        // Achromatic: hue and saturation are undefined, pin them to zero
        if r == g && r == b {
            return Self { h: 0.0, s: 0.0, p };
        }

        let (h, s) = if r >= g && r >= b {
            if b >= g {
                (1.0 - 1.0 / 6.0 * (b - g) / (r - g), 1.0 - g / r)
            } else {
                (1.0 / 6.0 * (g - b) / (r - b), 1.0 - b / r)
            }
        } else if g >= r && g >= b {
            if r >= b {
                (2.0 / 6.0 - 1.0 / 6.0 * (r - b) / (g - b), 1.0 - b / g)
            } else {
                (2.0 / 6.0 + 1.0 / 6.0 * (b - r) / (g - r), 1.0 - r / g)
            }
        } else if g >= r {
            (4.0 / 6.0 - 1.0 / 6.0 * (g - r) / (b - r), 1.0 - r / b)
        } else {
            (4.0 / 6.0 + 1.0 / 6.0 * (r - g) / (b - g), 1.0 - g / b)
        };

        Self { h, s, p }
    }

    /// Convert an 8-bit color to HSP.
    pub fn from_rgb888(color: Rgb888) -> Self {
        Self::from_rgb(
            color.r() as f32 / 255.0,
            color.g() as f32 / 255.0,
            color.b() as f32 / 255.0,
        )
    }

    pub fn hue(&self) -> f32 {
        self.h
    }

    pub fn saturation(&self) -> f32 {
        self.s
    }

    pub fn perceived_brightness(&self) -> f32 {
        self.p
    }

    /// Return a copy with a different perceived brightness, keeping hue and
    /// saturation.
    pub fn with_perceived_brightness(self, p: f32) -> Self {
        Self::new(self.h, self.s, p)
    }

    /// Convert back to RGB channels in `0.0..=1.0`.
    pub fn to_rgb(&self) -> [f32; 3] {
        let p = self.p;
        let min_over_max = 1.0 - self.s;
        let h = self.h;

        let (r, g, b) = if min_over_max > 0.0 {
            // `part` scales the middle channel between min and max
            let part = |h: f32| 1.0 + h * (1.0 / min_over_max - 1.0);
            let m2 = min_over_max * min_over_max;
            if h < 1.0 / 6.0 {
                // R > G > B
                let h = 6.0 * h;
                let part = part(h);
                let b = p / sqrtf(PR / m2 + PG * part * part + PB);
                let r = b / min_over_max;
                (r, b + h * (r - b), b)
            } else if h < 2.0 / 6.0 {
                // G > R > B
                let h = 6.0 * (2.0 / 6.0 - h);
                let part = part(h);
                let b = p / sqrtf(PG / m2 + PR * part * part + PB);
                let g = b / min_over_max;
                (b + h * (g - b), g, b)
            } else if h < 3.0 / 6.0 {
                // G > B > R
                let h = 6.0 * (h - 2.0 / 6.0);
                let part = part(h);
                let r = p / sqrtf(PG / m2 + PB * part * part + PR);
                let g = r / min_over_max;
                (r, g, r + h * (g - r))
            } else if h < 4.0 / 6.0 {
                // B > G > R
                let h = 6.0 * (4.0 / 6.0 - h);
                let part = part(h);
                let r = p / sqrtf(PB / m2 + PG * part * part + PR);
                let b = r / min_over_max;
                (r, r + h * (b - r), b)
            } else if h < 5.0 / 6.0 {
                // B > R > G
                let h = 6.0 * (h - 4.0 / 6.0);
                let part = part(h);
                let g = p / sqrtf(PB / m2 + PR * part * part + PG);
                let b = g / min_over_max;
                (g + h * (b - g), g, b)
            } else {
                // R > B > G
                let h = 6.0 * (1.0 - h);
                let part = part(h);
                let g = p / sqrtf(PR / m2 + PB * part * part + PG);
                let r = g / min_over_max;
                (r, g, g + h * (r - g))
            }
        } else if h < 1.0 / 6.0 {
            let h = 6.0 * h;
            let r = sqrtf(p * p / (PR + PG * h * h));
            (r, r * h, 0.0)
        } else if h < 2.0 / 6.0 {
            let h = 6.0 * (2.0 / 6.0 - h);
            let g = sqrtf(p * p / (PG + PR * h * h));
            (g * h, g, 0.0)
        } else if h < 3.0 / 6.0 {
            let h = 6.0 * (h - 2.0 / 6.0);
            let g = sqrtf(p * p / (PG + PB * h * h));
            (0.0, g, g * h)
        } else if h < 4.0 / 6.0 {
            let h = 6.0 * (4.0 / 6.0 - h);
            let b = sqrtf(p * p / (PB + PG * h * h));
            (0.0, b * h, b)
        } else if h < 5.0 / 6.0 {
            let h = 6.0 * (h - 4.0 / 6.0);
            let b = sqrtf(p * p / (PB + PR * h * h));
            (b * h, 0.0, b)
        } else {
            let h = 6.0 * (1.0 - h);
            let r = sqrtf(p * p / (PR + PB * h * h));
            (r, 0.0, r * h)
        };

        [window(r), window(g), window(b)]
    }

    /// Convert back to an 8-bit color.
    pub fn to_rgb888(&self) -> Rgb888 {
        let [r, g, b] = self.to_rgb();
        Rgb888::new(to_byte(r), to_byte(g), to_byte(b))
    }
}

impl From<Rgb888> for HspColor {
    fn from(color: Rgb888) -> Self {
        Self::from_rgb888(color)
    }
}

/// Perceived brightness of an 8-bit color, in `0.0..=1.0`.
pub fn perceived_brightness(color: Rgb888) -> f32 {
    HspColor::from_rgb888(color).perceived_brightness()
}

/// Perceived brightness of [`FAINT_REFERENCE`].
pub fn faint_reference_brightness() -> f32 {
    perceived_brightness(FAINT_REFERENCE)
}

/// Opacity (0–255) for faint segments painted in `foreground` over black.
///
/// Darker foregrounds get a higher alpha so the ghost segments stay about as
/// visible as [`FAINT_REFERENCE`]. Saturates at 255.
pub fn faint_alpha_from_foreground(foreground: Rgb888) -> u8 {
    let brightness = perceived_brightness(foreground);
    if brightness <= 0.0 {
        return u8::MAX;
    }
    let alpha = roundf(faint_reference_brightness() / brightness * 255.0);
    alpha.clamp(0.0, 255.0) as u8
}

/// Opacity (0–255) for faint black segments over a lit `background`.
///
/// Never more than 5% opacity.
pub fn faint_alpha_from_background(background: Rgb888) -> u8 {
    let brightness = perceived_brightness(background);
    let faint = faint_reference_brightness() / 3.0;
    let alpha = if brightness <= 0.0 {
        BACKGROUND_FAINT_CEILING
    } else {
        let dimmed = brightness - faint;
        ((brightness - dimmed) / brightness).min(BACKGROUND_FAINT_CEILING)
    };
    roundf(alpha * 255.0).clamp(0.0, 255.0) as u8
}

/// Blend `over` at `alpha` onto `under`.
pub fn blend(under: Rgb888, over: Rgb888, alpha: u8) -> Rgb888 {
    let mix = |u: u8, o: u8| -> u8 {
        let a = alpha as u32;
        ((o as u32 * a + u as u32 * (255 - a) + 127) / 255) as u8
    };
    Rgb888::new(
        mix(under.r(), over.r()),
        mix(under.g(), over.g()),
        mix(under.b(), over.b()),
    )
}

fn window(x: f32) -> f32 {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(0.0, 1.0)
}

fn window8(x: i32) -> f32 {
    x.clamp(0, 255) as f32
}

fn to_byte(x: f32) -> u8 {
    roundf(window(x) * 255.0) as u8
}
