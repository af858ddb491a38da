use crate::error::{LayoutError, PDFError};
use crate::style::{FontFamily, FontVariant, ResolvedTextStyle};
use crate::units::Pt;
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use std::collections::HashMap;

/// Font measurement used by layout. Implementations must be deterministic: the same
/// text and style always measure the same.
pub trait FontMetrics {
    /// Horizontal advance of `text` set in `style`
    fn measure_text_width(&self, text: &str, style: &ResolvedTextStyle) -> Result<Pt, LayoutError>;

    /// Base vertical advance between two lines of `style`, before line spacing
    fn line_height(&self, style: &ResolvedTextStyle) -> Pt;

    /// Distance from the top of a line to its baseline
    fn ascent(&self, style: &ResolvedTextStyle) -> Pt {
        style.size * 0.8
    }
}

/// Metrics where every character advances by the same fraction of an em, and the line
/// height equals the font size.
///
/// The default advance is Courier's. [PdfSink](crate::PdfSink) draws each family with
/// its own standard face, so text in any other family renders at widths these metrics
/// did not lay it out with; pair them with [LayoutOptions::monospace](crate::LayoutOptions::monospace)
/// or Courier styles.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MonospaceMetrics {
    pub advance_em: f32,
}

impl Default for MonospaceMetrics {
    /// The advance of the standard Courier faces (600 units per 1000)
    fn default() -> Self {
        MonospaceMetrics { advance_em: 0.6 }
    }
}

impl FontMetrics for MonospaceMetrics {
    fn measure_text_width(&self, text: &str, style: &ResolvedTextStyle) -> Result<Pt, LayoutError> {
        Ok(style.size * (self.advance_em * text.chars().count() as f32))
    }

    fn line_height(&self, style: &ResolvedTextStyle) -> Pt {
        style.size
    }
}

/// A parsed TrueType / OpenType face used to measure text.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face.as_face_ref().units_per_em() as f32
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().ascender() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().descender() as f32
    }

    /// Calculate the default line height of the font for the given size. The returned value is
    /// how much to vertically offset a second row of text below a first row of text.
    pub fn line_height(&self, size: Pt) -> Pt {
        let leading = self.scaling(size) * self.face.as_face_ref().line_gap() as f32;
        leading + self.ascent(size) - self.descent(size)
    }

    /// Calculate the width of a given string of text given the font size. Characters
    /// missing from the face measure as the replacement glyph, if any.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let face = self.face.as_face_ref();
        let fallback = face.glyph_index('\u{FFFD}').or_else(|| face.glyph_index('?'));
        let scaling = self.scaling(size);
        text.chars()
            .filter_map(|ch| face.glyph_index(ch).or(fallback))
            .map(|gid: GlyphId| scaling * face.glyph_hor_advance(gid).unwrap_or_default() as f32)
            .sum()
    }
}

/// Metrics backed by real font files, registered per family and variant.
#[derive(Default)]
pub struct TtfMetrics {
    fonts: HashMap<(FontFamily, FontVariant), Font>,
}

impl TtfMetrics {
    pub fn new() -> TtfMetrics {
        TtfMetrics::default()
    }

    /// Use `font` to measure text in the given family and variant
    pub fn register(&mut self, family: FontFamily, variant: FontVariant, font: Font) -> &mut Self {
        self.fonts.insert((family, variant), font);
        self
    }

    fn font(&self, style: &ResolvedTextStyle) -> Result<&Font, LayoutError> {
        self.fonts
            .get(&(style.family, style.variant))
            .ok_or(LayoutError::MissingFont {
                family: style.family,
                variant: style.variant,
            })
    }
}

impl FontMetrics for TtfMetrics {
    fn measure_text_width(&self, text: &str, style: &ResolvedTextStyle) -> Result<Pt, LayoutError> {
        Ok(self.font(style)?.width_of_text(text, style.size))
    }

    fn line_height(&self, style: &ResolvedTextStyle) -> Pt {
        self.font(style)
            .map(|font| font.line_height(style.size))
            .unwrap_or(style.size)
    }

    fn ascent(&self, style: &ResolvedTextStyle) -> Pt {
        self.font(style)
            .map(|font| font.ascent(style.size))
            .unwrap_or(style.size * 0.8)
    }
}
