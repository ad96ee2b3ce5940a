//! Typeface descriptors and asset loading

use alloc::format;
use alloc::string::String;

use crate::error::Result;

/// Seven-segment glyphs for digits, fourteen-segment for letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segments {
    Seven,
    Fourteen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Classic,
    Modern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontSize {
    Mini,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Light,
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Normal,
    Italic,
}

/// One face of the DSEG segment font family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentFont {
    pub segments: Segments,
    pub family: FontFamily,
    pub size: FontSize,
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl SegmentFont {
    /// Asset path, e.g. `fonts/DSEG7Classic-RegularItalic.ttf`.
    pub fn filename(&self) -> String {
        let segments = match self.segments {
            Segments::Seven => "7",
            Segments::Fourteen => "14",
        };
        let family = match self.family {
            FontFamily::Classic => "Classic",
            FontFamily::Modern => "Modern",
        };
        let size = match self.size {
            FontSize::Mini => "Mini-",
            FontSize::Normal => "-",
        };
        let weight = match self.weight {
            FontWeight::Light => "Light",
            FontWeight::Regular => "Regular",
            FontWeight::Bold => "Bold",
        };
        let style = match self.style {
            FontStyle::Normal => "",
            FontStyle::Italic => "Italic",
        };
        format!("fonts/DSEG{segments}{family}{size}{weight}{style}.ttf")
    }
}

/// Typeface a text run is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Typeface {
    Segment(SegmentFont),
    /// Icon font whose glyphs U+F000..U+F006 show zero to six filled
    /// sixths of a circle
    SixthsOfAPie,
    /// Platform sans-serif, used for the AM/PM marks and placeholders
    SansSerif,
    /// Platform default, substituted when an asset fails to load
    System,
}

pub const SIXTHS_OF_A_PIE_FILENAME: &str = "fonts/sixths-of-a-pie.ttf";

impl Typeface {
    /// Bundled asset backing this typeface, if any.
    pub fn asset_path(&self) -> Option<String> {
        match self {
            Typeface::Segment(font) => Some(font.filename()),
            Typeface::SixthsOfAPie => Some(String::from(SIXTHS_OF_A_PIE_FILENAME)),
            Typeface::SansSerif | Typeface::System => None,
        }
    }
}

/// Loads bundled font assets
pub trait FontAssets {
    /// Make `typeface` available for measuring and drawing.
    fn load(&mut self, typeface: Typeface) -> Result<()>;

    /// Load `typeface`, substituting [`Typeface::System`] on failure.
    fn resolve(&mut self, typeface: Typeface) -> Typeface {
        if typeface.asset_path().is_none() {
            return typeface;
        }
        match self.load(typeface) {
            Ok(()) => typeface,
            Err(_) => {
                crate::warn!("font asset unavailable, using system typeface");
                Typeface::System
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn led_font(segments: Segments) -> SegmentFont {
        SegmentFont {
            segments,
            family: FontFamily::Classic,
            size: FontSize::Normal,
            weight: FontWeight::Regular,
            style: FontStyle::Italic,
        }
    }

    #[test]
    fn filenames() {
        assert_eq!(
            led_font(Segments::Seven).filename(),
            "fonts/DSEG7Classic-RegularItalic.ttf"
        );
        let vintage = SegmentFont {
            segments: Segments::Fourteen,
            family: FontFamily::Modern,
            size: FontSize::Mini,
            weight: FontWeight::Light,
            style: FontStyle::Normal,
        };
        assert_eq!(vintage.filename(), "fonts/DSEG14ModernMini-Light.ttf");
    }

    struct Missing;

    impl FontAssets for Missing {
        fn load(&mut self, _typeface: Typeface) -> Result<()> {
            Err(Error::FontUnavailable)
        }
    }

    #[test]
    fn missing_asset_falls_back_to_system() {
        let mut assets = Missing;
        let face = Typeface::Segment(led_font(Segments::Seven));
        assert_eq!(assets.resolve(face), Typeface::System);
        assert_eq!(assets.resolve(Typeface::SansSerif), Typeface::SansSerif);
    }
}
