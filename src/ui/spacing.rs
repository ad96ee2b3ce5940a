//! Letter spacing
//!
//! Segment fonts have no tracking control, so spacing is added by inserting
//! narrow space characters between glyphs.

use alloc::string::String;

use super::glyphs::DECIMAL_POINT;
use super::TextAlign;

/// Insert `spacing` spaces between every pair of characters.
///
/// `Left` also pads the start and `Right` the end with half the spacing
/// (rounded), so a left and a right field meeting in the middle keep the
/// same gap as the characters inside them. Nothing is inserted on either
/// side of a decimal point, which stays attached to its digits.
pub fn add_letter_spacing(text: &str, spacing: u8, align: TextAlign) -> String {
    if spacing == 0 {
        return String::from(text);
    }
    let spacing = usize::from(spacing);
    let half = (spacing + 1) / 2;
    let mut out = String::with_capacity(text.len() * (spacing + 1) + half);

    if align == TextAlign::Left {
        out.extend(core::iter::repeat(' ').take(half));
    }
    let mut previous: Option<char> = None;
    for c in text.chars() {
        if previous.is_some_and(|p| p != DECIMAL_POINT) && c != DECIMAL_POINT {
            out.extend(core::iter::repeat(' ').take(spacing));
        }
        out.push(c);
        previous = Some(c);
    }
    if align == TextAlign::Right {
        out.extend(core::iter::repeat(' ').take(half));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_spacing_is_identity() {
        assert_eq!(add_letter_spacing("88:88", 0, TextAlign::Left), "88:88");
    }

    #[test]
    fn center_spaces_between_only() {
        assert_eq!(add_letter_spacing("88:88", 2, TextAlign::Center), "8  8  :  8  8");
        assert_eq!(add_letter_spacing("", 2, TextAlign::Center), "");
        assert_eq!(add_letter_spacing("8", 4, TextAlign::Center), "8");
    }

    #[test]
    fn aligned_fields_pad_inner_edge() {
        assert_eq!(add_letter_spacing("SUN", 4, TextAlign::Left), "  S    U    N");
        assert_eq!(add_letter_spacing("SUN", 4, TextAlign::Right), "S    U    N  ");
        // Odd spacing rounds the half pad up
        assert_eq!(add_letter_spacing("12", 3, TextAlign::Right), "1   2  ");
    }

    #[test]
    fn decimal_point_stays_attached() {
        assert_eq!(add_letter_spacing("1.5", 2, TextAlign::Center), "1.5");
        assert_eq!(add_letter_spacing("12.5", 2, TextAlign::Center), "1  2.5");
    }
}
