//! Accent color palette
//!
//! LED-style modes use the accent as the glyph color on black; LCD uses it
//! as the backlit plate behind black glyphs, so it gets paler tints.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use crate::theme::{AccentColor, ColorRole, ThemeMode};

pub const AMBIENT_FOREGROUND: Rgb888 = Rgb888::WHITE;
pub const AMBIENT_BACKGROUND: Rgb888 = Rgb888::BLACK;

/// Glyph colors, indexed by [`AccentColor`] order
const LED_FOREGROUND: [Rgb888; AccentColor::COUNT] = [
    Rgb888::new(0xd0, 0x10, 0x10), // red
    Rgb888::new(0xff, 0x30, 0x30), // bright red
    Rgb888::new(0xff, 0x70, 0x00), // orange
    Rgb888::new(0xff, 0xb0, 0x00), // amber
    Rgb888::new(0xff, 0xe8, 0x20), // yellow
    Rgb888::new(0x30, 0xff, 0x50), // green
    Rgb888::new(0x30, 0xe8, 0xff), // cyan
    Rgb888::new(0x40, 0x80, 0xff), // blue
    Rgb888::new(0xff, 0xff, 0xff), // white
];

/// Glyph colors for vintage faces: dimmer, warmer phosphor tones
const VINTAGE_FOREGROUND: [Rgb888; AccentColor::COUNT] = [
    Rgb888::new(0xe0, 0x18, 0x08), // red
    Rgb888::new(0xff, 0x40, 0x20), // bright red
    Rgb888::new(0xf0, 0x68, 0x00), // orange
    Rgb888::new(0xf0, 0xa0, 0x00), // amber
    Rgb888::new(0xf0, 0xd8, 0x10), // yellow
    Rgb888::new(0x48, 0xe8, 0x30), // green
    Rgb888::new(0x40, 0xd8, 0xd0), // cyan
    Rgb888::new(0x50, 0x78, 0xe8), // blue
    Rgb888::new(0xff, 0xf0, 0xd8), // white
];

/// Plate colors, indexed by [`AccentColor`] order
const LCD_BACKGROUND: [Rgb888; AccentColor::COUNT] = [
    Rgb888::new(0xe8, 0x70, 0x70),
    Rgb888::new(0xff, 0x90, 0x90),
    Rgb888::new(0xff, 0xb0, 0x70),
    Rgb888::new(0xff, 0xd0, 0x70),
    Rgb888::new(0xf0, 0xf0, 0x90),
    Rgb888::new(0xa0, 0xe8, 0x98),
    Rgb888::new(0x90, 0xe0, 0xf0),
    Rgb888::new(0x90, 0xb0, 0xff),
    Rgb888::new(0xd8, 0xdc, 0xd0),
];

/// Color the accent resolves to in `mode`.
///
/// This is the glyph color when the mode's [`ColorRole`] is foreground and
/// the plate color otherwise.
pub fn theme_color(mode: ThemeMode, accent: AccentColor) -> Rgb888 {
    let table = match (mode, mode.color_role()) {
        (ThemeMode::VintageLed, _) => &VINTAGE_FOREGROUND,
        (_, ColorRole::Foreground) => &LED_FOREGROUND,
        (_, ColorRole::Background) => &LCD_BACKGROUND,
    };
    table[accent.index()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::perceived_brightness;

    #[test]
    fn lcd_plates_are_light() {
        for accent in AccentColor::ALL {
            assert!(perceived_brightness(theme_color(ThemeMode::Lcd, accent)) > 0.5);
        }
    }

    #[test]
    fn vintage_glyphs_are_warmer_than_led() {
        for accent in AccentColor::ALL {
            let led = theme_color(ThemeMode::Led, accent);
            let vintage = theme_color(ThemeMode::VintageLed, accent);
            assert_ne!(led, vintage);
            assert!(vintage.b() <= led.b());
        }
    }
}
