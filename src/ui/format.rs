//! Field formatting
//!
//! Every field is rendered at a fixed width, padding with the blank glyph
//! rather than spaces so the live text lines up with its ghost.

use alloc::format;
use alloc::string::String;

use chrono::Weekday;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use super::glyphs::{self, BLANK, UNKNOWN};
use crate::system::ClockSample;

/// Short day names, Monday first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayNames {
    names: [String; 7],
}

impl Default for DayNames {
    fn default() -> Self {
        Self::new(["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"])
    }
}

impl DayNames {
    /// Locale day names, Monday first.
    pub fn new(names: [&str; 7]) -> Self {
        Self {
            names: names.map(String::from),
        }
    }

    pub fn short_name(&self, weekday: Weekday) -> &str {
        &self.names[weekday.num_days_from_monday() as usize]
    }
}

/// Hours; a 12-hour clock blanks the leading zero.
pub fn hour_text(sample: &ClockSample, is_24_hour: bool) -> String {
    if is_24_hour {
        return format!("{:02}", sample.hour);
    }
    let text = format!("{:02}", sample.hour12());
    match text.strip_prefix('0') {
        Some(rest) => format!("{BLANK}{rest}"),
        None => text,
    }
}

pub fn minute_text(sample: &ClockSample) -> String {
    format!("{:02}", sample.minute)
}

/// Seconds, blank-padded on the left to `width` cells.
pub fn seconds_text(second: u32, width: usize) -> String {
    pad_left(&format!("{second:02}"), width)
}

/// Pie icon for ambient mode: one sixth per ten seconds.
pub fn ambient_seconds_text(second: u32) -> String {
    String::from(glyphs::pie(second / 10))
}

/// Day of month in three cells, e.g. `!30` or `!!5`.
pub fn day_of_month_text(day: u32) -> String {
    pad_left(&format!("{day}"), 3)
}

/// Upper-case, accent-free, at most three letters.
pub fn day_of_week_text(name: &str) -> String {
    let stripped: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .take(3)
        .collect();
    stripped.to_uppercase().replace(',', "")
}

/// Battery level.
///
/// `percent` of `None`, below zero or above 100 renders the error
/// placeholder. With `hundred_sans_percent` a full battery reads "100" so it
/// fits three cells. LED faces pad to three digits, vintage faces to two.
pub fn battery_text(percent: Option<i32>, hundred_sans_percent: bool, vintage: bool) -> String {
    let unknown = if hundred_sans_percent { 3 } else { 4 };
    match percent {
        Some(100) if hundred_sans_percent => String::from("100"),
        Some(p @ 0..=100) => {
            let digits = if vintage { 2 } else { 3 };
            format!("{}%", pad_left(&format!("{p}"), digits))
        }
        _ => core::iter::repeat(UNKNOWN).take(unknown).collect(),
    }
}

fn pad_left(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let mut out: String = core::iter::repeat(BLANK)
        .take(width.saturating_sub(len))
        .collect();
    out.push_str(text);
    out
}
