use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use super::format;
use super::glyphs::{self, PIE_FULL};
use super::layout::RenderState;
use super::spacing::add_letter_spacing;
use super::{DisplayGeometry, Frame, GhostLayer, Paint, PointF, Slot, TextAlign, TextDraw};
use crate::system::{ClockSample, FaceConfig};
use crate::theme::{AccentColor, ThemeMode, Typeface};

/// Colon is hidden from this millisecond of every second
const COLON_BLINK_MS: u32 = 400;

/// Values shown by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameFields<'a> {
    pub sample: ClockSample,
    /// `None` when the battery could not be read
    pub battery_percent: Option<i32>,
    /// Locale short name of `sample.weekday`
    pub day_name: &'a str,
    pub is_24_hour: bool,
}

/// Everything the ghost layer depends on
#[derive(Debug, Clone, Copy, PartialEq)]
struct GhostKey {
    mode: ThemeMode,
    accent: AccentColor,
    geometry: DisplayGeometry,
    ambient: bool,
    is_24_hour: bool,
    demo: bool,
}

impl GhostKey {
    fn new(state: &RenderState, is_24_hour: bool) -> Self {
        Self {
            mode: state.mode,
            accent: state.accent,
            geometry: state.geometry,
            ambient: state.ambient,
            is_24_hour,
            demo: state.demo,
        }
    }
}

/// Composes frames and owns the cached ghost layer
#[derive(Debug, Default)]
pub struct FrameRenderer {
    ghost: Option<(GhostKey, Rc<GhostLayer>)>,
}

impl FrameRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the ghost layer; the next frame rebuilds it.
    pub fn invalidate(&mut self) {
        self.ghost = None;
    }

    pub fn has_cached_ghost(&self) -> bool {
        self.ghost.is_some()
    }

    pub fn render_frame(
        &mut self,
        fields: &FrameFields<'_>,
        state: &RenderState,
        config: &FaceConfig,
    ) -> Frame {
        let background = if state.low_bit {
            Rgb888::BLACK
        } else {
            state.background
        };
        let ghost = self.ghost_layer(state, fields.is_24_hour);

        let mut text = Vec::with_capacity(8);
        let sample = &fields.sample;
        let primary = state.letter_spacing_primary;
        let secondary = state.letter_spacing_secondary;

        let hours = format::hour_text(sample, fields.is_24_hour);
        text.push(live(
            Slot::Left,
            add_letter_spacing(&hours, primary, TextAlign::Center),
            state.left,
            time_paint(state, TextAlign::Left),
        ));
        let minutes = format::minute_text(sample);
        text.push(live(
            Slot::Right,
            add_letter_spacing(&minutes, primary, TextAlign::Center),
            state.right,
            time_paint(state, TextAlign::Right),
        ));
        if is_colon_visible(sample, state, config) {
            text.push(live(
                Slot::Colon,
                String::from(glyphs::COLON),
                state.middle,
                time_paint(state, TextAlign::Center),
            ));
        }

        if !fields.is_24_hour {
            let anchor = if sample.is_pm() { state.pm } else { state.am };
            let marker = if sample.is_pm() { "P" } else { "A" };
            text.push(live(
                Slot::AmPm,
                String::from(marker),
                anchor,
                am_pm_paint(state),
            ));
        }

        if config.show_day_of_week {
            let day = format::day_of_week_text(fields.day_name);
            text.push(live(
                Slot::TopLeft,
                add_letter_spacing(&day, secondary, TextAlign::Right),
                state.top_left,
                small_paint(state, state.fonts.fourteen_segment, TextAlign::Left),
            ));
        }
        if config.show_day_of_month {
            let date = format::day_of_month_text(sample.day_of_month);
            text.push(live(
                Slot::TopRight,
                add_letter_spacing(&date, secondary, TextAlign::Left),
                state.top_right,
                small_paint(state, state.fonts.seven_segment, TextAlign::Right),
            ));
        }
        if config.show_battery_level {
            let battery = format::battery_text(
                fields.battery_percent,
                config.hundred_sans_percent,
                state.mode == ThemeMode::VintageLed,
            );
            text.push(live(
                Slot::BottomLeft,
                add_letter_spacing(&battery, secondary, TextAlign::Right),
                state.bottom_left,
                small_paint(state, state.fonts.fourteen_segment, TextAlign::Left),
            ));
        }
        if config.show_seconds {
            text.push(if state.ambient {
                live(
                    Slot::BottomRight,
                    format::ambient_seconds_text(sample.second),
                    state.bottom_icon,
                    small_paint(state, state.fonts.pie, TextAlign::Right),
                )
            } else {
                let width = glyphs::bottom_right_segments(state.mode).chars().count();
                let seconds = format::seconds_text(sample.second, width);
                live(
                    Slot::BottomRight,
                    add_letter_spacing(&seconds, secondary, TextAlign::Left),
                    state.bottom_right,
                    small_paint(state, state.fonts.seven_segment, TextAlign::Right),
                )
            });
        }

        Frame {
            background,
            ghost,
            text,
        }
    }

    fn ghost_layer(&mut self, state: &RenderState, is_24_hour: bool) -> Option<Rc<GhostLayer>> {
        if !state.has_ghost_layer() {
            return None;
        }
        let key = GhostKey::new(state, is_24_hour);
        if let Some((cached, layer)) = &self.ghost {
            if *cached == key {
                return Some(layer.clone());
            }
        }
        crate::debug!("rebuilding ghost layer for {} {}", state.mode, state.accent);
        let layer = Rc::new(build_ghost_layer(state, is_24_hour));
        self.ghost = Some((key, layer.clone()));
        Some(layer)
    }
}

/// Hidden during the tail of each second, unless ambient, low-bit or demo.
fn is_colon_visible(sample: &ClockSample, state: &RenderState, config: &FaceConfig) -> bool {
    let blinks = config.blinking_colon && !state.ambient && !state.low_bit && !state.demo;
    !(blinks && sample.millisecond >= COLON_BLINK_MS)
}

fn build_ghost_layer(state: &RenderState, is_24_hour: bool) -> GhostLayer {
    let primary = state.letter_spacing_primary;
    let secondary = state.letter_spacing_secondary;
    let mut draws = Vec::with_capacity(10);
    let mut ghost = |slot, text: String, position, paint: Paint| {
        draws.push(TextDraw {
            slot,
            text,
            position,
            paint: Paint {
                alpha: state.faint_alpha,
                shadow: None,
                ..paint
            },
        });
    };

    ghost(
        Slot::Left,
        add_letter_spacing(glyphs::left_segments(is_24_hour), primary, TextAlign::Center),
        state.left,
        time_paint(state, TextAlign::Left),
    );
    ghost(
        Slot::Right,
        add_letter_spacing(glyphs::right_segments(), primary, TextAlign::Center),
        state.right,
        time_paint(state, TextAlign::Right),
    );
    if state.full_width_colon {
        ghost(
            Slot::Colon,
            String::from(glyphs::ALL_ON_DIGIT),
            state.middle,
            time_paint(state, TextAlign::Center),
        );
    }
    ghost(
        Slot::Colon,
        String::from(glyphs::COLON),
        state.middle,
        time_paint(state, TextAlign::Center),
    );
    ghost(
        Slot::TopLeft,
        add_letter_spacing(glyphs::top_left_segments(), secondary, TextAlign::Right),
        state.top_left,
        small_paint(state, state.fonts.fourteen_segment, TextAlign::Left),
    );
    ghost(
        Slot::TopRight,
        add_letter_spacing(glyphs::top_right_segments(), secondary, TextAlign::Left),
        state.top_right,
        small_paint(state, state.fonts.seven_segment, TextAlign::Right),
    );
    ghost(
        Slot::BottomLeft,
        add_letter_spacing(glyphs::bottom_left_segments(state.mode), secondary, TextAlign::Right),
        state.bottom_left,
        small_paint(state, state.fonts.fourteen_segment, TextAlign::Left),
    );
    if state.ambient {
        ghost(
            Slot::BottomRight,
            String::from(PIE_FULL),
            state.bottom_icon,
            small_paint(state, state.fonts.pie, TextAlign::Right),
        );
    } else {
        ghost(
            Slot::BottomRight,
            add_letter_spacing(
                glyphs::bottom_right_segments(state.mode),
                secondary,
                TextAlign::Left,
            ),
            state.bottom_right,
            small_paint(state, state.fonts.seven_segment, TextAlign::Right),
        );
    }
    if !is_24_hour {
        ghost(Slot::AmPm, String::from("A"), state.am, am_pm_paint(state));
        ghost(Slot::AmPm, String::from("P"), state.pm, am_pm_paint(state));
    }

    GhostLayer { draws }
}

fn live(slot: Slot, text: String, position: PointF, paint: Paint) -> TextDraw {
    TextDraw {
        slot,
        text,
        position,
        paint,
    }
}

fn base_paint(state: &RenderState, typeface: Typeface, size: f32, align: TextAlign) -> Paint {
    Paint {
        typeface,
        size,
        align,
        color: state.foreground,
        alpha: 0xff,
        skew: state.skew,
        shadow: state.shadow,
        anti_alias: state.anti_alias,
    }
}

fn time_paint(state: &RenderState, align: TextAlign) -> Paint {
    base_paint(state, state.fonts.seven_segment, state.text_size, align)
}

fn small_paint(state: &RenderState, typeface: Typeface, align: TextAlign) -> Paint {
    base_paint(state, typeface, state.smaller_text_size, align)
}

fn am_pm_paint(state: &RenderState) -> Paint {
    Paint {
        skew: 0.0,
        ..base_paint(state, state.fonts.am_pm, state.am_pm_text_size, TextAlign::Left)
    }
}
