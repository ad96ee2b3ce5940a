//! Fallback rasteriser
//!
//! Paints a [`Frame`] onto any `embedded-graphics` target with ProFont. The
//! segment look is lost, but the layout, colours and ghost blending are kept,
//! which is enough for a display without a vector text engine. Skew and
//! shadow blur are not rendered; a shadow becomes a hard offset copy.

use alloc::string::String;

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use profont::{
    PROFONT_10_POINT, PROFONT_12_POINT, PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT,
    PROFONT_7_POINT, PROFONT_9_POINT,
};

use super::glyphs::{ALL_ON, BLANK, PIE_FULL};
use super::{Frame, TextAlign, TextDraw};
use crate::color::blend;

/// Smallest first
const FONTS: [&MonoFont<'static>; 7] = [
    &PROFONT_7_POINT,
    &PROFONT_9_POINT,
    &PROFONT_10_POINT,
    &PROFONT_12_POINT,
    &PROFONT_14_POINT,
    &PROFONT_18_POINT,
    &PROFONT_24_POINT,
];

/// Largest font whose cell fits `size` pixels.
pub fn font_for_size(size: f32) -> &'static MonoFont<'static> {
    FONTS
        .iter()
        .rev()
        .find(|font| font.character_size.height as f32 <= size)
        .copied()
        .unwrap_or(FONTS[0])
}

/// Map segment sentinels and pie glyphs to printable stand-ins.
pub fn printable(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            BLANK => ' ',
            ALL_ON => '8',
            '\u{f000}'..=PIE_FULL => {
                char::from_digit(c as u32 - 0xf000, 10).unwrap_or('?')
            }
            c => c,
        })
        .collect()
}

/// Paint `frame`: background, then the ghost layer, then live text.
pub fn draw_frame<D>(frame: &Frame, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    target.clear(frame.background)?;
    if let Some(ghost) = &frame.ghost {
        for draw in &ghost.draws {
            draw_text(draw, frame.background, target)?;
        }
    }
    for draw in &frame.text {
        draw_text(draw, frame.background, target)?;
    }
    Ok(())
}

fn draw_text<D>(draw: &TextDraw, background: Rgb888, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let paint = &draw.paint;
    let font = font_for_size(paint.size);
    let text = printable(&draw.text);
    let text_style = TextStyleBuilder::new()
        .alignment(match paint.align {
            TextAlign::Left => Alignment::Left,
            TextAlign::Center => Alignment::Center,
            TextAlign::Right => Alignment::Right,
        })
        .baseline(Baseline::Alphabetic)
        .build();
    let position = Point::new(
        libm::roundf(draw.position.x) as i32,
        libm::roundf(draw.position.y) as i32,
    );

    if let Some(shadow) = paint.shadow {
        let color = blend(background, shadow.color, shadow.alpha);
        let offset = Point::new(libm::roundf(shadow.dx) as i32, libm::roundf(shadow.dy) as i32);
        Text::with_text_style(
            &text,
            position + offset,
            MonoTextStyle::new(font, color),
            text_style,
        )
        .draw(target)?;
    }

    let color = blend(background, paint.color, paint.alpha);
    Text::with_text_style(&text, position, MonoTextStyle::new(font, color), text_style)
        .draw(target)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Typeface;
    use crate::ui::{GhostLayer, Paint, PointF, Slot};
    use alloc::rc::Rc;
    use alloc::vec;
    use embedded_graphics::mock_display::MockDisplay;

    fn draw(text: &str, alpha: u8) -> TextDraw {
        TextDraw {
            slot: Slot::Left,
            text: String::from(text),
            position: PointF::new(4.0, 30.0),
            paint: Paint {
                typeface: Typeface::System,
                size: 14.0,
                align: TextAlign::Left,
                color: Rgb888::WHITE,
                alpha,
                skew: 0.0,
                shadow: None,
                anti_alias: true,
            },
        }
    }

    fn display() -> MockDisplay<Rgb888> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        display
    }

    fn has_pixel(display: &MockDisplay<Rgb888>, color: Rgb888) -> bool {
        display.bounding_box().points().any(|p| display.get_pixel(p) == Some(color))
    }

    #[test]
    fn sentinels_become_printable() {
        assert_eq!(printable("!5~"), " 58");
        assert_eq!(printable("\u{f003}"), "3");
        assert_eq!(printable("\u{f006}"), "6");
    }

    #[test]
    fn picks_font_by_size() {
        assert_eq!(font_for_size(1.0).character_size, PROFONT_7_POINT.character_size);
        assert_eq!(font_for_size(200.0).character_size, PROFONT_24_POINT.character_size);
        let mid = font_for_size(20.0);
        assert!(mid.character_size.height <= 20);
    }

    #[test]
    fn live_text_paints_over_background() {
        let frame = Frame {
            background: Rgb888::BLUE,
            ghost: None,
            text: vec![draw("88", 0xff)],
        };
        let mut display = display();
        draw_frame(&frame, &mut display).unwrap();
        assert_eq!(display.get_pixel(Point::new(63, 0)), Some(Rgb888::BLUE));
        assert!(has_pixel(&display, Rgb888::WHITE));
    }

    #[test]
    fn ghost_is_blended() {
        let frame = Frame {
            background: Rgb888::BLACK,
            ghost: Some(Rc::new(GhostLayer {
                draws: vec![draw("~~", 0x40)],
            })),
            text: vec![],
        };
        let mut display = display();
        draw_frame(&frame, &mut display).unwrap();
        assert!(has_pixel(&display, blend(Rgb888::BLACK, Rgb888::WHITE, 0x40)));
        assert!(!has_pixel(&display, Rgb888::WHITE));
    }
}
