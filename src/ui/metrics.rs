//! Text measurement
//!
//! Layout only needs advances and ink bounds. Hosts with a real font engine
//! implement [`TextMeasure`] over it; [`SegmentMetrics`] is a built-in
//! table that approximates the DSEG faces closely enough for the fallback
//! rasteriser and for tests.

use crate::error::Result;
use crate::theme::{FontAssets, Typeface};

/// Ink extent of a text run
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBounds {
    pub width: f32,
    pub height: f32,
}

pub trait TextMeasure {
    /// Horizontal advance of `text` set at `size` pixels.
    fn advance(&self, typeface: Typeface, size: f32, text: &str) -> f32;

    /// Ink bounds of `text` set at `size` pixels.
    fn bounds(&self, typeface: Typeface, size: f32, text: &str) -> TextBounds;
}

/// Per-glyph metrics in em
#[derive(Debug, Clone, Copy)]
struct Glyph {
    advance: f32,
    ink_left: f32,
    ink_width: f32,
    ink_height: f32,
}

impl Glyph {
    const fn new(advance: f32, ink_left: f32, ink_width: f32, ink_height: f32) -> Self {
        Self {
            advance,
            ink_left,
            ink_width,
            ink_height,
        }
    }

    const fn blank(advance: f32) -> Self {
        Self::new(advance, 0.0, 0.0, 0.0)
    }
}

const CELL: Glyph = Glyph::new(0.8, 0.07, 0.66, 0.7);
/// Only the right-hand vertical segments
const ONE: Glyph = Glyph::new(0.8, 0.61, 0.12, 0.7);
const COLON: Glyph = Glyph::new(0.2, 0.05, 0.1, 0.45);
const POINT: Glyph = Glyph::new(0.2, 0.05, 0.1, 0.1);
const PIE: Glyph = Glyph::new(1.0, 0.05, 0.9, 0.9);
const SANS: Glyph = Glyph::new(0.6, 0.05, 0.5, 0.7);

/// Built-in metrics for the segment, pie and sans faces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentMetrics;

impl SegmentMetrics {
    fn glyph(typeface: Typeface, c: char) -> Glyph {
        match typeface {
            Typeface::Segment(_) => match c {
                '1' => ONE,
                ':' => COLON,
                '.' | ',' => POINT,
                ' ' => Glyph::blank(0.2),
                '!' => Glyph::blank(CELL.advance),
                _ => CELL,
            },
            Typeface::SixthsOfAPie => PIE,
            Typeface::SansSerif | Typeface::System => match c {
                ' ' => Glyph::blank(SANS.advance / 2.0),
                _ => SANS,
            },
        }
    }
}

impl TextMeasure for SegmentMetrics {
    fn advance(&self, typeface: Typeface, size: f32, text: &str) -> f32 {
        text.chars()
            .map(|c| Self::glyph(typeface, c).advance)
            .sum::<f32>()
            * size
    }

    fn bounds(&self, typeface: Typeface, size: f32, text: &str) -> TextBounds {
        let mut pen = 0.0;
        let mut ink: Option<(f32, f32)> = None;
        let mut height: f32 = 0.0;
        for c in text.chars() {
            let glyph = Self::glyph(typeface, c);
            if glyph.ink_width > 0.0 {
                let left = pen + glyph.ink_left;
                let right = left + glyph.ink_width;
                ink = Some(match ink {
                    Some((l, r)) => (l.min(left), r.max(right)),
                    None => (left, right),
                });
                height = height.max(glyph.ink_height);
            }
            pen += glyph.advance;
        }
        let width = ink.map_or(0.0, |(l, r)| r - l);
        TextBounds {
            width: width * size,
            height: height * size,
        }
    }
}

impl FontAssets for SegmentMetrics {
    /// Every face is built in.
    fn load(&mut self, _typeface: Typeface) -> Result<()> {
        Ok(())
    }
}
