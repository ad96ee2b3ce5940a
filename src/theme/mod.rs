//! Theme state
//!
//! The display style family ([`ThemeMode`]) and the accent color remembered
//! separately for each mode.

use core::fmt;
use core::str::FromStr;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use serde::{Deserialize, Serialize};

use crate::color::{self, AMBIENT_BACKGROUND, AMBIENT_FOREGROUND};
use crate::error::Error;

pub mod font;
mod store;

pub use font::{
    FontAssets, FontFamily, FontSize, FontStyle, FontWeight, SegmentFont, Segments, Typeface,
};
pub use store::{accent_key, MemoryStore, PreferenceStore, THEME_MODE_KEY};

/// Display style family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    Led,
    Lcd,
    VintageLed,
}

/// Whether the accent paints the glyphs or the plate behind them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    Foreground,
    Background,
}

impl ThemeMode {
    pub const COUNT: usize = 3;
    pub const ALL: [ThemeMode; Self::COUNT] = [ThemeMode::Led, ThemeMode::Lcd, ThemeMode::VintageLed];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Persisted name
    pub fn name(self) -> &'static str {
        match self {
            ThemeMode::Led => "led",
            ThemeMode::Lcd => "lcd",
            ThemeMode::VintageLed => "vintage_led",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.name() == name)
    }

    /// Next mode in enumeration order, wrapping.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    pub fn color_role(self) -> ColorRole {
        match self {
            ThemeMode::Led | ThemeMode::VintageLed => ColorRole::Foreground,
            ThemeMode::Lcd => ColorRole::Background,
        }
    }

    /// Accent used until the user picks one for this mode
    pub fn default_accent(self) -> AccentColor {
        match self {
            ThemeMode::Led => AccentColor::Blue,
            ThemeMode::Lcd => AccentColor::White,
            ThemeMode::VintageLed => AccentColor::Red,
        }
    }

    /// Fixed rendering recipe for this mode.
    pub fn recipe(self) -> RenderRecipe {
        match self {
            ThemeMode::Led => RenderRecipe {
                font_family: FontFamily::Classic,
                font_weight: FontWeight::Regular,
                font_style: FontStyle::Italic,
                font_size: FontSize::Normal,
                letter_spacing_primary: 0,
                letter_spacing_secondary: 0,
                line_spacing_ratio: 0.25,
                smaller_text_ratio: 0.5,
                faint_segments: true,
                full_width_colon: false,
                text_skew: 0.04,
                text_size_ratio: 1.0,
            },
            ThemeMode::Lcd => RenderRecipe {
                font_family: FontFamily::Classic,
                font_weight: FontWeight::Bold,
                font_style: FontStyle::Italic,
                font_size: FontSize::Normal,
                letter_spacing_primary: 0,
                letter_spacing_secondary: 0,
                line_spacing_ratio: 0.25,
                smaller_text_ratio: 0.5,
                faint_segments: true,
                full_width_colon: false,
                text_skew: 0.04,
                text_size_ratio: 1.0,
            },
            ThemeMode::VintageLed => RenderRecipe {
                font_family: FontFamily::Modern,
                font_weight: FontWeight::Light,
                font_style: FontStyle::Italic,
                font_size: FontSize::Normal,
                letter_spacing_primary: 2,
                letter_spacing_secondary: 4,
                line_spacing_ratio: 1.0,
                smaller_text_ratio: 0.5,
                faint_segments: true,
                full_width_colon: true,
                text_skew: 0.0,
                // Leaves room for the glow
                text_size_ratio: 0.875,
            },
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThemeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or(Error::InvalidPreference)
    }
}

/// User-selectable hue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum AccentColor {
    Red,
    BrightRed,
    Orange,
    Amber,
    Yellow,
    Green,
    Cyan,
    Blue,
    White,
}

impl AccentColor {
    pub const COUNT: usize = 9;
    pub const ALL: [AccentColor; Self::COUNT] = [
        AccentColor::Red,
        AccentColor::BrightRed,
        AccentColor::Orange,
        AccentColor::Amber,
        AccentColor::Yellow,
        AccentColor::Green,
        AccentColor::Cyan,
        AccentColor::Blue,
        AccentColor::White,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Persisted name
    pub fn name(self) -> &'static str {
        match self {
            AccentColor::Red => "red",
            AccentColor::BrightRed => "bright_red",
            AccentColor::Orange => "orange",
            AccentColor::Amber => "amber",
            AccentColor::Yellow => "yellow",
            AccentColor::Green => "green",
            AccentColor::Cyan => "cyan",
            AccentColor::Blue => "blue",
            AccentColor::White => "white",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|color| color.name() == name)
    }

    /// Next color in enumeration order, wrapping.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AccentColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or(Error::InvalidPreference)
    }
}

/// Per-mode rendering recipe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRecipe {
    pub font_family: FontFamily,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub font_size: FontSize,
    /// Spaces inserted between time-of-day glyphs
    pub letter_spacing_primary: u8,
    /// Spaces inserted between day, date, battery and seconds glyphs
    pub letter_spacing_secondary: u8,
    /// Gap between the time row and the rows above and below, as a
    /// multiple of the time text size
    pub line_spacing_ratio: f32,
    /// Secondary text size as a multiple of the time text size
    pub smaller_text_ratio: f32,
    pub faint_segments: bool,
    /// Colon occupies a full digit cell
    pub full_width_colon: bool,
    /// Horizontal shear applied on top of the font's own slant
    pub text_skew: f32,
    /// Extra shrink applied to the fitted time text size
    pub text_size_ratio: f32,
}

impl RenderRecipe {
    pub fn segment_font(&self, segments: Segments) -> SegmentFont {
        SegmentFont {
            segments,
            family: self.font_family,
            size: self.font_size,
            weight: self.font_weight,
            style: self.font_style,
        }
    }
}

/// Current theme mode plus the accent remembered for every mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    mode: ThemeMode,
    accents: [AccentColor; ThemeMode::COUNT],
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new(ThemeMode::Led)
    }
}

impl ThemeState {
    /// Start in `mode` with every mode on its default accent.
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            mode,
            accents: ThemeMode::ALL.map(ThemeMode::default_accent),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
    }

    /// Accent of the current mode
    pub fn accent(&self) -> AccentColor {
        self.accents[self.mode.index()]
    }

    pub fn accent_for(&self, mode: ThemeMode) -> AccentColor {
        self.accents[mode.index()]
    }

    pub fn set_accent_for(&mut self, mode: ThemeMode, accent: AccentColor) {
        self.accents[mode.index()] = accent;
    }

    /// Cycle the current mode's accent and return the new one.
    pub fn advance_accent_color(&mut self) -> AccentColor {
        let next = self.accent().next();
        self.set_accent_for(self.mode, next);
        crate::info!("{} accent is now {}", self.mode, next);
        next
    }

    /// Cycle the theme mode and return the new one.
    ///
    /// The new mode keeps whatever accent was last chosen for it.
    pub fn advance_theme_mode(&mut self) -> ThemeMode {
        self.mode = self.mode.next();
        crate::info!("theme mode is now {}", self.mode);
        self.mode
    }

    pub fn current_render_recipe(&self) -> RenderRecipe {
        self.mode.recipe()
    }

    /// Glyph color. Ambient mode always draws white.
    pub fn foreground_color(&self, ambient: bool) -> Rgb888 {
        if ambient {
            return AMBIENT_FOREGROUND;
        }
        match self.mode.color_role() {
            ColorRole::Foreground => color::theme_color(self.mode, self.accent()),
            ColorRole::Background => Rgb888::BLACK,
        }
    }

    /// Plate color. Ambient mode always draws black.
    pub fn background_color(&self, ambient: bool) -> Rgb888 {
        if ambient {
            return AMBIENT_BACKGROUND;
        }
        match self.mode.color_role() {
            ColorRole::Foreground => Rgb888::BLACK,
            ColorRole::Background => color::theme_color(self.mode, self.accent()),
        }
    }

    /// Opacity of the ghost segments for the current colors.
    pub fn faint_alpha(&self, ambient: bool) -> u8 {
        match self.mode.color_role() {
            ColorRole::Foreground => color::faint_alpha_from_foreground(self.foreground_color(ambient)),
            ColorRole::Background => color::faint_alpha_from_background(self.background_color(ambient)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_mode_advances_return_to_start() {
        for mode in ThemeMode::ALL {
            let mut theme = ThemeState::new(mode);
            for _ in 0..ThemeMode::COUNT {
                theme.advance_theme_mode();
            }
            assert_eq!(theme.mode(), mode);
        }
    }

    #[test]
    fn nine_accent_advances_return_to_start() {
        for accent in AccentColor::ALL {
            let mut theme = ThemeState::default();
            theme.set_accent_for(ThemeMode::Led, accent);
            for _ in 0..AccentColor::COUNT {
                theme.advance_accent_color();
            }
            assert_eq!(theme.accent(), accent);
        }
    }

    #[test]
    fn every_mode_starts_on_its_default_accent() {
        let theme = ThemeState::default();
        assert_eq!(theme.accent_for(ThemeMode::Led), AccentColor::Blue);
        assert_eq!(theme.accent_for(ThemeMode::VintageLed), AccentColor::Red);
        assert_eq!(theme.accent_for(ThemeMode::Lcd), AccentColor::White);
    }

    #[test]
    fn accent_is_remembered_per_mode() {
        let mut theme = ThemeState::default();
        assert_eq!(theme.advance_accent_color(), AccentColor::White);
        theme.advance_theme_mode();
        assert_eq!(theme.mode(), ThemeMode::Lcd);
        assert_eq!(theme.accent(), AccentColor::White);
        theme.advance_accent_color();
        assert_eq!(theme.accent(), AccentColor::Red);
        theme.advance_theme_mode();
        theme.advance_theme_mode();
        assert_eq!(theme.mode(), ThemeMode::Led);
        assert_eq!(theme.accent(), AccentColor::White);
    }

    #[test]
    fn ambient_forces_white_on_black() {
        for mode in ThemeMode::ALL {
            let theme = ThemeState::new(mode);
            assert_eq!(theme.foreground_color(true), Rgb888::WHITE);
            assert_eq!(theme.background_color(true), Rgb888::BLACK);
        }
    }

    #[test]
    fn lcd_accent_paints_the_plate() {
        let theme = ThemeState::new(ThemeMode::Lcd);
        assert_eq!(theme.foreground_color(false), Rgb888::BLACK);
        assert_eq!(
            theme.background_color(false),
            color::theme_color(ThemeMode::Lcd, AccentColor::White)
        );
        assert!(theme.faint_alpha(false) <= 13);
    }

    #[test]
    fn recipe_table() {
        let led = ThemeMode::Led.recipe();
        assert_eq!(led.font_weight, FontWeight::Regular);
        assert_eq!((led.letter_spacing_primary, led.letter_spacing_secondary), (0, 0));
        assert!(!led.full_width_colon);

        let lcd = ThemeMode::Lcd.recipe();
        assert_eq!(lcd.font_weight, FontWeight::Bold);
        assert_eq!(lcd.line_spacing_ratio, 0.25);

        let vintage = ThemeMode::VintageLed.recipe();
        assert_eq!(vintage.font_weight, FontWeight::Light);
        assert_eq!((vintage.letter_spacing_primary, vintage.letter_spacing_secondary), (2, 4));
        assert_eq!(vintage.line_spacing_ratio, 1.0);
        assert!(vintage.full_width_colon);
        for mode in ThemeMode::ALL {
            assert_eq!(mode.recipe().font_style, FontStyle::Italic);
            assert!(mode.recipe().faint_segments);
        }
    }

    #[test]
    fn names_round_trip() {
        for mode in ThemeMode::ALL {
            assert_eq!(ThemeMode::from_name(mode.name()), Some(mode));
        }
        for color in AccentColor::ALL {
            assert_eq!(AccentColor::from_name(color.name()), Some(color));
        }
        assert_eq!(ThemeMode::from_name("plasma"), None);
        assert_eq!("vintage_led".parse::<ThemeMode>(), Ok(ThemeMode::VintageLed));
        assert_eq!("mauve".parse::<AccentColor>(), Err(Error::InvalidPreference));
    }
}
