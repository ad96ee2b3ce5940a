//! Segment font glyph conventions
//!
//! The DSEG fonts map two printable characters to whole-cell patterns: `!`
//! lights no segments and `~` lights every segment. `8` is the all-on digit
//! of the seven-segment face. The sixths-of-a-pie icon font draws
//! `U+F000 + n` as a circle with `n` of six sectors filled.

use crate::theme::ThemeMode;

/// All segments off, same width as a digit
pub const BLANK: char = '!';
/// All segments on (fourteen-segment)
pub const ALL_ON: char = '~';
/// All segments on (seven-segment)
pub const ALL_ON_DIGIT: char = '8';
pub const COLON: char = ':';
/// Decimal point; kept attached to the digit that follows it
pub const DECIMAL_POINT: char = '.';
/// Stand-in for a value that cannot be read
pub const UNKNOWN: char = '?';

const PIE_BASE: u32 = 0xf000;
/// Fully filled pie
pub const PIE_FULL: char = '\u{f006}';

/// Pie glyph with `sixths` sectors filled, saturating at six.
pub fn pie(sixths: u32) -> char {
    char::from_u32(PIE_BASE + sixths.min(6)).unwrap_or(PIE_FULL)
}

/// Ghost for the hour digits; a 12-hour clock only ever lights the `1`.
pub fn left_segments(is_24_hour: bool) -> &'static str {
    if is_24_hour {
        "88"
    } else {
        "18"
    }
}

pub fn right_segments() -> &'static str {
    "88"
}

/// Day of week (fourteen-segment)
pub fn top_left_segments() -> &'static str {
    "~~~"
}

/// Day of month
pub fn top_right_segments() -> &'static str {
    "888"
}

/// Battery level (fourteen-segment). LED faces reserve a leading `1` cell
/// for "100%".
pub fn bottom_left_segments(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::VintageLed => "~~~~",
        ThemeMode::Led | ThemeMode::Lcd => "1~~~",
    }
}

/// Seconds
pub fn bottom_right_segments(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::VintageLed => "88",
        ThemeMode::Led | ThemeMode::Lcd => "888",
    }
}
