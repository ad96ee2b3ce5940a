//! Layout engine
//!
//! [`compute_layout`] turns theme, geometry and mode flags into a
//! [`RenderState`]: typefaces, text sizes, anchor points, colors and paint
//! effects. It is pure; anything that changes an input gets a fresh
//! `RenderState` rather than a patched one.

use alloc::string::String;

use embedded_graphics::pixelcolor::Rgb888;

use super::glyphs;
use super::metrics::TextMeasure;
use super::spacing::add_letter_spacing;
use super::{DisplayGeometry, PointF, Shadow, TextAlign};
use crate::theme::{AccentColor, FontAssets, Segments, ThemeMode, ThemeState, Typeface};

/// Point size used to measure the sample before scaling
const REFERENCE_SIZE: f32 = 1000.0;
/// AM/PM glyph cap height as a fraction of its text size
const AM_PM_CAP_RATIO: f32 = 0.7;
/// Screen size dp values are scaled against in demo mode
const DEMO_REFERENCE_DP: f32 = 320.0;

/// Typefaces a layout draws with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSet {
    pub seven_segment: Typeface,
    pub fourteen_segment: Typeface,
    pub pie: Typeface,
    pub am_pm: Typeface,
}

impl FontSet {
    /// Typefaces named by `mode`'s recipe, before loading.
    pub fn for_mode(mode: ThemeMode) -> Self {
        let recipe = mode.recipe();
        Self {
            seven_segment: Typeface::Segment(recipe.segment_font(Segments::Seven)),
            fourteen_segment: Typeface::Segment(recipe.segment_font(Segments::Fourteen)),
            pie: Typeface::SixthsOfAPie,
            am_pm: Typeface::SansSerif,
        }
    }

    /// Load every face, substituting the system typeface for failures.
    pub fn resolve<A: FontAssets + ?Sized>(self, assets: &mut A) -> Self {
        Self {
            seven_segment: assets.resolve(self.seven_segment),
            fourteen_segment: assets.resolve(self.fourteen_segment),
            pie: assets.resolve(self.pie),
            am_pm: assets.resolve(self.am_pm),
        }
    }
}

/// Inputs of one layout pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInput {
    pub mode: ThemeMode,
    pub accent: AccentColor,
    pub geometry: DisplayGeometry,
    pub ambient: bool,
    /// Device can only show a few colors while ambient
    pub low_bit_ambient: bool,
    pub demo: bool,
    /// Padding left and right of the time, in dp
    pub edge_padding_dp: u32,
    pub fonts: FontSet,
}

/// Everything a frame is drawn from
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub mode: ThemeMode,
    pub accent: AccentColor,
    pub geometry: DisplayGeometry,
    pub ambient: bool,
    /// Low-bit ambient rendering is in effect right now
    pub low_bit: bool,
    pub demo: bool,
    pub fonts: FontSet,

    /// Time text size in pixels
    pub text_size: f32,
    /// Day, date, battery and seconds text size
    pub smaller_text_size: f32,
    pub am_pm_text_size: f32,

    pub left: PointF,
    pub right: PointF,
    pub middle: PointF,
    pub top_left: PointF,
    pub top_right: PointF,
    pub bottom_left: PointF,
    pub bottom_right: PointF,
    /// Anchor of the ambient seconds icon
    pub bottom_icon: PointF,
    pub am: PointF,
    pub pm: PointF,

    /// Taps above this line hit the top row
    pub top_middle_y: f32,
    /// Taps below this line hit the bottom row
    pub middle_bottom_y: f32,

    pub foreground: Rgb888,
    pub background: Rgb888,
    pub faint_alpha: u8,
    pub faint_segments: bool,
    pub full_width_colon: bool,
    pub letter_spacing_primary: u8,
    pub letter_spacing_secondary: u8,
    pub line_spacing_ratio: f32,
    pub smaller_text_ratio: f32,
    pub skew: f32,
    pub shadow: Option<Shadow>,
    pub anti_alias: bool,
}

impl RenderState {
    /// Ghost segments are drawn at all.
    pub fn has_ghost_layer(&self) -> bool {
        self.faint_segments && !self.low_bit && self.faint_alpha > 0
    }

    /// Sample the time size is fitted to.
    pub fn time_sample(&self) -> String {
        time_sample(self.full_width_colon, self.letter_spacing_primary)
    }
}

fn time_sample(full_width_colon: bool, spacing: u8) -> String {
    let sample = if full_width_colon { "88888" } else { "88:88" };
    add_letter_spacing(sample, spacing, TextAlign::Center)
}

/// Compute the layout for one combination of theme, geometry and mode.
pub fn compute_layout<M: TextMeasure + ?Sized>(input: &LayoutInput, measure: &M) -> RenderState {
    let geometry = input.geometry;
    let (width, height) = (geometry.width, geometry.height);
    let recipe = input.mode.recipe();
    let fonts = input.fonts;
    let low_bit = input.low_bit_ambient && input.ambient;

    let mut theme = ThemeState::new(input.mode);
    theme.set_accent_for(input.mode, input.accent);
    let foreground = theme.foreground_color(input.ambient);
    let background = theme.background_color(input.ambient);

    let dp = |value: f32| {
        let px = value * geometry.density;
        if input.demo {
            px * width.min(height) / DEMO_REFERENCE_DP
        } else {
            px
        }
    };

    // Fit the time sample to the padded width
    let mut text_width = width - dp(2.0 * input.edge_padding_dp as f32);
    let sample = time_sample(recipe.full_width_colon, recipe.letter_spacing_primary);
    let raw_width = measure
        .advance(fonts.seven_segment, REFERENCE_SIZE, &sample)
        .max(1.0);
    let raw_height = measure
        .bounds(fonts.seven_segment, REFERENCE_SIZE, "8")
        .height;
    let mut text_size = REFERENCE_SIZE / raw_width * text_width;

    let mut multiplier = 1.0;
    if geometry.round || input.demo {
        // Widest row must fit the circle's inscribed rectangle
        multiplier = libm::cosf(libm::atan2f(raw_height, raw_width));
    }
    multiplier *= recipe.text_size_ratio;
    text_size *= multiplier;
    text_width *= multiplier;

    let skew = recipe.text_skew;
    let skew_shift = |typeface: Typeface, size: f32| {
        measure.bounds(typeface, size, "E").height / 2.0 * skew
    };

    let shift = skew_shift(fonts.seven_segment, text_size);
    let x_left = width / 2.0 - text_width / 2.0 + shift;
    let x_right = width / 2.0 + text_width / 2.0 + shift;
    let x_middle = width / 2.0 + shift;

    let am_pm_text_size = text_size / 4.0 / AM_PM_CAP_RATIO;
    let smaller_text_size = text_size * recipe.smaller_text_ratio;

    // Top row: day of week and day of month meet in the middle
    let top_sample = add_letter_spacing(
        &[glyphs::top_left_segments(), glyphs::top_right_segments()].concat(),
        recipe.letter_spacing_secondary,
        TextAlign::Center,
    );
    let top_width = measure.advance(fonts.fourteen_segment, smaller_text_size, &top_sample);
    let top_shift = skew_shift(fonts.fourteen_segment, smaller_text_size);
    let x_top_left = width / 2.0 - top_width / 2.0 + top_shift;
    let x_top_right = width / 2.0 + top_width / 2.0 + top_shift;

    // Bottom row: battery and seconds
    let bottom_sample = add_letter_spacing(
        &[
            glyphs::bottom_left_segments(input.mode),
            glyphs::bottom_right_segments(input.mode),
        ]
        .concat(),
        recipe.letter_spacing_secondary,
        TextAlign::Center,
    );
    let mut bottom_width =
        measure.advance(fonts.fourteen_segment, smaller_text_size, &bottom_sample);
    // A leading "1" cell only lights its right edge; center on the ink
    let one_inset = if bottom_sample.starts_with('1') {
        let eight = measure.bounds(fonts.fourteen_segment, smaller_text_size, "8");
        let one = measure.bounds(fonts.fourteen_segment, smaller_text_size, "1");
        eight.width - one.width
    } else {
        0.0
    };
    bottom_width -= one_inset;
    let bottom_shift = skew_shift(fonts.fourteen_segment, smaller_text_size);
    let x_bottom_right = width / 2.0 + bottom_width / 2.0 + bottom_shift;
    let x_bottom_left = width / 2.0 - bottom_width / 2.0 - one_inset + bottom_shift;

    // Vertical: baseline anchors, ascent taken as the full text size
    let line_spacing = text_size * recipe.line_spacing_ratio;
    let y_middle = height / 2.0 + text_size / 2.0;
    let y_top = y_middle - text_size - line_spacing;
    let y_bottom = y_middle + text_size * recipe.smaller_text_ratio + line_spacing;
    let am_pm_half_cap = am_pm_text_size * AM_PM_CAP_RATIO / 2.0;
    let y_am = height / 2.0 - text_size / 4.0 + am_pm_half_cap;
    let y_pm = height / 2.0 + text_size / 4.0 + am_pm_half_cap;

    let shadow = match (input.mode, input.ambient) {
        (ThemeMode::Lcd, false) => Some(Shadow {
            radius: dp(2.0),
            dx: dp(2.0),
            dy: dp(4.0),
            color: foreground,
            alpha: 0x33,
        }),
        (ThemeMode::VintageLed, false) => Some(Shadow {
            radius: dp(6.0),
            dx: 0.0,
            dy: 0.0,
            color: foreground,
            alpha: 0xff,
        }),
        _ => None,
    };

    crate::debug!(
        "layout {} {}x{}: text size {}, small {}",
        input.mode,
        width,
        height,
        text_size,
        smaller_text_size
    );

    RenderState {
        mode: input.mode,
        accent: input.accent,
        geometry,
        ambient: input.ambient,
        low_bit,
        demo: input.demo,
        fonts,
        text_size,
        smaller_text_size,
        am_pm_text_size,
        left: PointF::new(x_left, y_middle),
        right: PointF::new(x_right, y_middle),
        middle: PointF::new(x_middle, y_middle),
        top_left: PointF::new(x_top_left, y_top),
        top_right: PointF::new(x_top_right, y_top),
        bottom_left: PointF::new(x_bottom_left, y_bottom),
        bottom_right: PointF::new(x_bottom_right, y_bottom),
        bottom_icon: PointF::new(x_bottom_right, y_bottom),
        am: PointF::new(x_left, y_am),
        pm: PointF::new(x_left, y_pm),
        top_middle_y: y_middle - text_size - line_spacing / 2.0,
        middle_bottom_y: y_middle + line_spacing / 2.0,
        foreground,
        background,
        faint_alpha: theme.faint_alpha(input.ambient),
        faint_segments: recipe.faint_segments,
        full_width_colon: recipe.full_width_colon,
        letter_spacing_primary: recipe.letter_spacing_primary,
        letter_spacing_secondary: recipe.letter_spacing_secondary,
        line_spacing_ratio: recipe.line_spacing_ratio,
        smaller_text_ratio: recipe.smaller_text_ratio,
        skew,
        shadow,
        anti_alias: !low_bit,
    }
}
