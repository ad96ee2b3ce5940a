//! UI definitions module
//!
//! A face produces a [`Frame`]: a background color, an optional cached layer
//! of ghost segments and the live text draws on top. Hosts either paint the
//! draws with their own text engine or hand the frame to [`raster`].

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use chrono::NaiveDateTime;
use embedded_graphics::pixelcolor::Rgb888;

use crate::error::{Error, Result};
use crate::system::BatteryStatus;
use crate::theme::Typeface;

pub mod format;
pub mod glyphs;
pub mod layout;
pub mod metrics;
pub mod raster;
mod renderer;
pub mod spacing;

pub use layout::{compute_layout, FontSet, LayoutInput, RenderState};
pub use metrics::{SegmentMetrics, TextMeasure};
pub use renderer::{FrameFields, FrameRenderer};

pub trait WatchFace {
    /// Update watchface with state
    fn update(&mut self, state: WatchFaceState) -> Frame;
}

/// State for the watch face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchFaceState {
    /// Local time
    pub time: NaiveDateTime,
    pub battery: BatteryStatus,
}

/// Drawable surface geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayGeometry {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
    /// Pixels per dp
    pub density: f32,
    pub round: bool,
}

impl DisplayGeometry {
    /// Validated geometry; every dimension must be finite and positive.
    pub fn new(width: f32, height: f32, density: f32, round: bool) -> Result<Self> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if usable(width) && usable(height) && usable(density) {
            Ok(Self {
                width,
                height,
                density,
                round,
            })
        } else {
            Err(Error::InvalidGeometry)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Which side of the anchor the text extends from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Blurred drop shadow or glow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub radius: f32,
    pub dx: f32,
    pub dy: f32,
    pub color: Rgb888,
    pub alpha: u8,
}

/// Paint attributes for one text draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub typeface: Typeface,
    /// Text size in pixels
    pub size: f32,
    pub align: TextAlign,
    pub color: Rgb888,
    pub alpha: u8,
    /// Horizontal shear, positive leans right
    pub skew: f32,
    pub shadow: Option<Shadow>,
    pub anti_alias: bool,
}

/// Face region a text draw belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Hours
    Left,
    /// Minutes
    Right,
    Colon,
    /// Day of week
    TopLeft,
    /// Day of month
    TopRight,
    /// Battery level
    BottomLeft,
    /// Seconds, or the pie icon in ambient mode
    BottomRight,
    AmPm,
}

/// Positioned text run; `position` is the baseline anchor
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw {
    pub slot: Slot,
    pub text: String,
    pub position: PointF,
    pub paint: Paint,
}

/// Ghost segments painted over the background, shared between frames
#[derive(Debug, Clone, PartialEq)]
pub struct GhostLayer {
    pub draws: Vec<TextDraw>,
}

/// Everything needed to paint one tick
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub background: Rgb888,
    pub ghost: Option<Rc<GhostLayer>>,
    pub text: Vec<TextDraw>,
}

impl Frame {
    /// Live text drawn in `slot`, if any.
    pub fn text_in(&self, slot: Slot) -> Option<&str> {
        self.text
            .iter()
            .find(|draw| draw.slot == slot)
            .map(|draw| draw.text.as_str())
    }

    pub fn is_colon_visible(&self) -> bool {
        self.text_in(Slot::Colon).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_must_have_area() {
        assert!(DisplayGeometry::new(400.0, 400.0, 2.0, true).is_ok());
        assert_eq!(
            DisplayGeometry::new(0.0, 400.0, 2.0, false),
            Err(Error::InvalidGeometry)
        );
        assert_eq!(
            DisplayGeometry::new(400.0, 400.0, f32::NAN, false),
            Err(Error::InvalidGeometry)
        );
    }
}
