//! Style records for text, paragraphs and table cells.
//!
//! Styles are layered overrides rather than an inheritance chain: every optional field
//! left unset falls through to the next, less specific layer when the effective style
//! is resolved:
//!
//! * text: document default → [ParagraphStyle] → [TextStyle]
//! * table cells: [TableCellStyle] of the cell → row default → table default → built-in
//!
//! Styles are validated once when they are built and never change afterwards.

use crate::colour::{colours, Colour};
use crate::error::ConfigError;
use crate::layout::Margins;
use crate::units::Pt;

/// The standard PDF font families
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    TimesRoman,
    Helvetica,
    Courier,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum FontVariant {
    #[default]
    Plain,
    Bold,
    Italic,
    BoldItalic,
}

impl FontFamily {
    /// The PostScript name of the standard font for this family and variant
    pub fn base_font_name(self, variant: FontVariant) -> &'static str {
        use FontFamily::*;
        use FontVariant::*;
        match (self, variant) {
            (TimesRoman, Plain) => "Times-Roman",
            (TimesRoman, Bold) => "Times-Bold",
            (TimesRoman, Italic) => "Times-Italic",
            (TimesRoman, BoldItalic) => "Times-BoldItalic",
            (Helvetica, Plain) => "Helvetica",
            (Helvetica, Bold) => "Helvetica-Bold",
            (Helvetica, Italic) => "Helvetica-Oblique",
            (Helvetica, BoldItalic) => "Helvetica-BoldOblique",
            (Courier, Plain) => "Courier",
            (Courier, Bold) => "Courier-Bold",
            (Courier, Italic) => "Courier-Oblique",
            (Courier, BoldItalic) => "Courier-BoldOblique",
        }
    }
}

/// Horizontal placement of each finished line within the paragraph's box
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
    Justify,
}

/// A fully resolved text style, with every field known
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResolvedTextStyle {
    pub family: FontFamily,
    pub variant: FontVariant,
    pub size: Pt,
    pub colour: Colour,
    pub underline: bool,
}

impl Default for ResolvedTextStyle {
    fn default() -> Self {
        ResolvedTextStyle {
            family: FontFamily::TimesRoman,
            variant: FontVariant::Plain,
            size: Pt(12.0),
            colour: colours::BLACK,
            underline: false,
        }
    }
}

/// Optional font overrides. Any field left as [None] inherits from the enclosing layer.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct TextStyle {
    family: Option<FontFamily>,
    variant: Option<FontVariant>,
    size: Option<Pt>,
    colour: Option<Colour>,
    underline: Option<bool>,
}

impl TextStyle {
    pub fn builder() -> TextStyleBuilder {
        TextStyleBuilder::default()
    }

    /// A style overriding only the font variant
    pub fn with_variant(variant: FontVariant) -> TextStyle {
        TextStyle {
            variant: Some(variant),
            ..TextStyle::default()
        }
    }

    /// A style overriding only the font colour
    pub fn with_colour(colour: Colour) -> TextStyle {
        TextStyle {
            colour: Some(colour),
            ..TextStyle::default()
        }
    }

    pub fn family(&self) -> Option<FontFamily> {
        self.family
    }

    pub fn variant(&self) -> Option<FontVariant> {
        self.variant
    }

    pub fn size(&self) -> Option<Pt> {
        self.size
    }

    pub fn colour(&self) -> Option<Colour> {
        self.colour
    }

    pub fn underline(&self) -> Option<bool> {
        self.underline
    }

    /// Apply the fields set on `self` on top of `base`
    pub fn resolve_over(&self, base: &ResolvedTextStyle) -> ResolvedTextStyle {
        ResolvedTextStyle {
            family: self.family.unwrap_or(base.family),
            variant: self.variant.unwrap_or(base.variant),
            size: self.size.unwrap_or(base.size),
            colour: self.colour.unwrap_or(base.colour),
            underline: self.underline.unwrap_or(base.underline),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct TextStyleBuilder {
    style: TextStyle,
}

impl TextStyleBuilder {
    pub fn family(mut self, family: FontFamily) -> Self {
        self.style.family = Some(family);
        self
    }

    pub fn variant(mut self, variant: FontVariant) -> Self {
        self.style.variant = Some(variant);
        self
    }

    pub fn size<P: Into<Pt>>(mut self, size: P) -> Self {
        self.style.size = Some(size.into());
        self
    }

    pub fn colour(mut self, colour: Colour) -> Self {
        self.style.colour = Some(colour);
        self
    }

    pub fn underline(mut self, underline: bool) -> Self {
        self.style.underline = Some(underline);
        self
    }

    pub fn build(self) -> Result<TextStyle, ConfigError> {
        if let Some(size) = self.style.size {
            check_positive("font size", size)?;
        }
        Ok(self.style)
    }
}

/// Style of a whole paragraph: font defaults for its text runs plus the geometry
/// of its box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParagraphStyle {
    font: TextStyle,
    margins: Margins,
    first_line_margin: Pt,
    alignment: Alignment,
    line_spacing: f32,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        ParagraphStyle {
            font: TextStyle::default(),
            margins: Margins::empty(),
            first_line_margin: Pt::ZERO,
            alignment: Alignment::Left,
            line_spacing: 1.0,
        }
    }
}

impl ParagraphStyle {
    pub fn builder() -> ParagraphStyleBuilder {
        ParagraphStyleBuilder::default()
    }

    pub fn font(&self) -> &TextStyle {
        &self.font
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Extra indentation of the paragraph's first line only
    pub fn first_line_margin(&self) -> Pt {
        self.first_line_margin
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Multiplier applied to the base line height of every line of the paragraph
    pub fn line_spacing(&self) -> f32 {
        self.line_spacing
    }

    /// The paragraph's own text style, resolved over the document default
    pub fn resolve_font(&self, document_default: &ResolvedTextStyle) -> ResolvedTextStyle {
        self.font.resolve_over(document_default)
    }

    /// Effective style of a text run: document default, then this paragraph, then the
    /// run's own overrides
    pub fn resolve_text(
        &self,
        document_default: &ResolvedTextStyle,
        text: Option<&TextStyle>,
    ) -> ResolvedTextStyle {
        let paragraph = self.resolve_font(document_default);
        match text {
            Some(text) => text.resolve_over(&paragraph),
            None => paragraph,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ParagraphStyleBuilder {
    style: ParagraphStyle,
}

impl ParagraphStyleBuilder {
    pub fn family(mut self, family: FontFamily) -> Self {
        self.style.font.family = Some(family);
        self
    }

    pub fn variant(mut self, variant: FontVariant) -> Self {
        self.style.font.variant = Some(variant);
        self
    }

    pub fn size<P: Into<Pt>>(mut self, size: P) -> Self {
        self.style.font.size = Some(size.into());
        self
    }

    pub fn colour(mut self, colour: Colour) -> Self {
        self.style.font.colour = Some(colour);
        self
    }

    pub fn underline(mut self, underline: bool) -> Self {
        self.style.font.underline = Some(underline);
        self
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.style.margins = margins;
        self
    }

    pub fn first_line_margin<P: Into<Pt>>(mut self, margin: P) -> Self {
        self.style.first_line_margin = margin.into();
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.style.alignment = alignment;
        self
    }

    pub fn line_spacing(mut self, ratio: f32) -> Self {
        self.style.line_spacing = ratio;
        self
    }

    pub fn build(self) -> Result<ParagraphStyle, ConfigError> {
        let style = self.style;
        if let Some(size) = style.font.size {
            check_positive("font size", size)?;
        }
        style.margins.validate("paragraph margins")?;
        check_non_negative("first line margin", style.first_line_margin)?;
        if !style.line_spacing.is_finite() || style.line_spacing < 0.0 {
            return Err(ConfigError::NegativeLineSpacing(style.line_spacing));
        }
        Ok(style)
    }
}

/// The stroke drawn along one edge of a table cell
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum BorderStyle {
    #[default]
    None,
    Solid { width: Pt, colour: Colour },
}

impl BorderStyle {
    /// A 1pt black line
    pub const THIN_SOLID: BorderStyle = BorderStyle::Solid {
        width: Pt(1.0),
        colour: colours::BLACK,
    };

    pub fn solid<P: Into<Pt>>(width: P, colour: Colour) -> Result<BorderStyle, ConfigError> {
        let width = width.into();
        check_positive("border width", width)?;
        Ok(BorderStyle::Solid { width, colour })
    }

    pub fn width(&self) -> Pt {
        match self {
            BorderStyle::None => Pt::ZERO,
            BorderStyle::Solid { width, .. } => *width,
        }
    }
}

/// Optional cell decoration overrides; unset fields fall back to the row default,
/// then the table default, then the built-in defaults (no background, thin solid
/// borders, 2pt padding).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct TableCellStyle {
    background: Option<Colour>,
    top: Option<BorderStyle>,
    right: Option<BorderStyle>,
    bottom: Option<BorderStyle>,
    left: Option<BorderStyle>,
    padding: Option<Margins>,
}

/// A fully resolved cell style
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResolvedCellStyle {
    pub background: Option<Colour>,
    pub top: BorderStyle,
    pub right: BorderStyle,
    pub bottom: BorderStyle,
    pub left: BorderStyle,
    pub padding: Margins,
}

impl Default for ResolvedCellStyle {
    fn default() -> Self {
        ResolvedCellStyle {
            background: None,
            top: BorderStyle::THIN_SOLID,
            right: BorderStyle::THIN_SOLID,
            bottom: BorderStyle::THIN_SOLID,
            left: BorderStyle::THIN_SOLID,
            padding: Margins::all(Pt(2.0)),
        }
    }
}

impl TableCellStyle {
    pub fn builder() -> TableCellStyleBuilder {
        TableCellStyleBuilder::default()
    }

    /// A style setting only the background colour
    pub fn with_background(colour: Colour) -> TableCellStyle {
        TableCellStyle {
            background: Some(colour),
            ..TableCellStyle::default()
        }
    }

    /// Fill every field unset on `self` from `fallback`
    pub fn or(&self, fallback: &TableCellStyle) -> TableCellStyle {
        TableCellStyle {
            background: self.background.or(fallback.background),
            top: self.top.or(fallback.top),
            right: self.right.or(fallback.right),
            bottom: self.bottom.or(fallback.bottom),
            left: self.left.or(fallback.left),
            padding: self.padding.or(fallback.padding),
        }
    }

    pub fn resolve(&self) -> ResolvedCellStyle {
        let defaults = ResolvedCellStyle::default();
        ResolvedCellStyle {
            background: self.background.or(defaults.background),
            top: self.top.unwrap_or(defaults.top),
            right: self.right.unwrap_or(defaults.right),
            bottom: self.bottom.unwrap_or(defaults.bottom),
            left: self.left.unwrap_or(defaults.left),
            padding: self.padding.unwrap_or(defaults.padding),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct TableCellStyleBuilder {
    style: TableCellStyle,
}

impl TableCellStyleBuilder {
    pub fn background(mut self, colour: Colour) -> Self {
        self.style.background = Some(colour);
        self
    }

    /// Set all four borders, clockwise from the top
    pub fn borders(
        mut self,
        top: BorderStyle,
        right: BorderStyle,
        bottom: BorderStyle,
        left: BorderStyle,
    ) -> Self {
        self.style.top = Some(top);
        self.style.right = Some(right);
        self.style.bottom = Some(bottom);
        self.style.left = Some(left);
        self
    }

    pub fn border_top(mut self, border: BorderStyle) -> Self {
        self.style.top = Some(border);
        self
    }

    pub fn border_right(mut self, border: BorderStyle) -> Self {
        self.style.right = Some(border);
        self
    }

    pub fn border_bottom(mut self, border: BorderStyle) -> Self {
        self.style.bottom = Some(border);
        self
    }

    pub fn border_left(mut self, border: BorderStyle) -> Self {
        self.style.left = Some(border);
        self
    }

    pub fn padding(mut self, padding: Margins) -> Self {
        self.style.padding = Some(padding);
        self
    }

    pub fn build(self) -> Result<TableCellStyle, ConfigError> {
        if let Some(padding) = self.style.padding {
            padding.validate("cell padding")?;
        }
        Ok(self.style)
    }
}

pub(crate) fn check_positive(what: &'static str, value: Pt) -> Result<(), ConfigError> {
    if value.is_finite() && value > Pt::ZERO {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveLength { what, value })
    }
}

pub(crate) fn check_non_negative(what: &'static str, value: Pt) -> Result<(), ConfigError> {
    if value.is_finite() && value >= Pt::ZERO {
        Ok(())
    } else {
        Err(ConfigError::NegativeLength { what, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_specific_layer_wins() {
        let document = ResolvedTextStyle::default();
        let paragraph = ParagraphStyle::builder()
            .family(FontFamily::Helvetica)
            .size(Pt(14.0))
            .colour(colours::RED)
            .build()
            .unwrap();
        let text = TextStyle::builder()
            .variant(FontVariant::Bold)
            .colour(colours::BLUE)
            .build()
            .unwrap();

        let resolved = paragraph.resolve_text(&document, Some(&text));
        assert_eq!(resolved.family, FontFamily::Helvetica);
        assert_eq!(resolved.variant, FontVariant::Bold);
        assert_eq!(resolved.size, Pt(14.0));
        assert_eq!(resolved.colour, colours::BLUE);
        assert!(!resolved.underline);
    }

    #[test]
    fn unset_text_fields_never_reset_the_paragraph() {
        let document = ResolvedTextStyle::default();
        let paragraph = ParagraphStyle::builder().underline(true).build().unwrap();
        let resolved = paragraph.resolve_text(&document, Some(&TextStyle::default()));
        assert!(resolved.underline);
        assert_eq!(resolved.size, Pt(12.0));
    }

    #[test]
    fn paragraph_style_validation() {
        assert!(ParagraphStyle::builder().line_spacing(-0.5).build().is_err());
        assert!(ParagraphStyle::builder()
            .margins(Margins::trbl(Pt(0.0), Pt(0.0), Pt(-1.0), Pt(0.0)))
            .build()
            .is_err());
        assert!(ParagraphStyle::builder().first_line_margin(Pt(-3.0)).build().is_err());
        assert!(ParagraphStyle::builder().size(Pt(0.0)).build().is_err());
        assert!(ParagraphStyle::builder().line_spacing(0.0).build().is_ok());
    }

    #[test]
    fn cell_style_falls_back_through_layers() {
        let cell = TableCellStyle::builder()
            .border_top(BorderStyle::None)
            .build()
            .unwrap();
        let row = TableCellStyle::with_background(colours::GREY);
        let table = TableCellStyle::builder()
            .padding(Margins::all(Pt(5.0)))
            .border_top(BorderStyle::THIN_SOLID)
            .build()
            .unwrap();

        let resolved = cell.or(&row).or(&table).resolve();
        assert_eq!(resolved.top, BorderStyle::None);
        assert_eq!(resolved.background, Some(colours::GREY));
        assert_eq!(resolved.padding, Margins::all(Pt(5.0)));
        assert_eq!(resolved.left, BorderStyle::THIN_SOLID);
    }

    #[test]
    fn border_width_must_be_positive() {
        assert!(BorderStyle::solid(Pt(0.0), colours::BLACK).is_err());
        assert_eq!(BorderStyle::solid(Pt(4.0), colours::RED).unwrap().width(), Pt(4.0));
    }
}
