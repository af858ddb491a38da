use crate::error::ConfigError;
use crate::image::ImageId;
use crate::layout::Margins;
use crate::pagesize::{self, Orientation, PageFormat, PageSize};
use crate::rect::Rect;
use crate::style::{check_positive, ResolvedCellStyle, ResolvedTextStyle};
use crate::units::*;

/// Margins applied to every preset page style
pub const DEFAULT_PAGE_MARGINS: Margins = Margins::trbl(Pt(60.0), Pt(60.0), Pt(60.0), Pt(60.0));

/// The geometry of a page: its size, orientation and margins. The area inside the
/// margins is the content box that layout flows into.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageStyle {
    width: Pt,
    height: Pt,
    margins: Margins,
    orientation: Orientation,
}

const fn preset(size: PageSize, orientation: Orientation) -> PageStyle {
    let (width, height) = match orientation {
        Orientation::Portrait => (size.0, size.1),
        Orientation::Landscape => (size.1, size.0),
    };
    PageStyle {
        width,
        height,
        margins: DEFAULT_PAGE_MARGINS,
        orientation,
    }
}

impl PageStyle {
    pub const A3_PORTRAIT: PageStyle = preset(pagesize::A3, Orientation::Portrait);
    pub const A3_LANDSCAPE: PageStyle = preset(pagesize::A3, Orientation::Landscape);
    pub const A4_PORTRAIT: PageStyle = preset(pagesize::A4, Orientation::Portrait);
    pub const A4_LANDSCAPE: PageStyle = preset(pagesize::A4, Orientation::Landscape);
    pub const A5_PORTRAIT: PageStyle = preset(pagesize::A5, Orientation::Portrait);
    pub const A5_LANDSCAPE: PageStyle = preset(pagesize::A5, Orientation::Landscape);
    pub const A8_PORTRAIT: PageStyle = preset(pagesize::A8, Orientation::Portrait);
    pub const A8_LANDSCAPE: PageStyle = preset(pagesize::A8, Orientation::Landscape);
    pub const LETTER_PORTRAIT: PageStyle = preset(pagesize::LETTER, Orientation::Portrait);
    pub const LETTER_LANDSCAPE: PageStyle = preset(pagesize::LETTER, Orientation::Landscape);

    /// A named paper format in the given orientation, with the default margins
    pub fn preset(format: PageFormat, orientation: Orientation) -> PageStyle {
        let (width, height) = format.oriented(orientation);
        PageStyle {
            width,
            height,
            margins: DEFAULT_PAGE_MARGINS,
            orientation,
        }
    }

    /// A page of arbitrary size. The orientation is derived from the dimensions.
    pub fn custom<W: Into<Pt>, H: Into<Pt>>(
        width: W,
        height: H,
        margins: Margins,
    ) -> Result<PageStyle, ConfigError> {
        let width: Pt = width.into();
        let height: Pt = height.into();
        check_positive("page width", width)?;
        check_positive("page height", height)?;
        let orientation = if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        };
        PageStyle {
            width,
            height,
            margins: Margins::empty(),
            orientation,
        }
        .with_margins(margins)
    }

    /// The same page with different margins
    pub fn with_margins(self, margins: Margins) -> Result<PageStyle, ConfigError> {
        margins.validate("page margins")?;
        if margins.horizontal() >= self.width || margins.vertical() >= self.height {
            return Err(ConfigError::NoContentArea {
                width: self.width,
                height: self.height,
            });
        }
        Ok(PageStyle { margins, ..self })
    }

    pub fn width(&self) -> Pt {
        self.width
    }

    pub fn height(&self) -> Pt {
        self.height
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Where content can live, i.e. within the margins
    pub fn content_box(&self) -> Rect {
        Rect {
            x1: self.margins.left,
            y1: self.margins.top,
            x2: self.width - self.margins.right,
            y2: self.height - self.margins.bottom,
        }
    }

    pub fn content_width(&self) -> Pt {
        self.width - self.margins.horizontal()
    }

    pub fn content_height(&self) -> Pt {
        self.height - self.margins.vertical()
    }
}

impl Default for PageStyle {
    fn default() -> Self {
        PageStyle::A4_PORTRAIT
    }
}

/// A run of text positioned on a page. `origin` is the top-left corner of the run's
/// line box; glyphs sit on `baseline`.
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub style: ResolvedTextStyle,
    pub origin: (Pt, Pt),
    pub width: Pt,
    pub baseline: Pt,
    /// Extra space added to every space character, used by justified lines
    pub word_spacing: Pt,
}

#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image: ImageId,
    pub position: Rect,
}

/// The rectangle of one table cell, with the decoration to draw for it
#[derive(Clone, PartialEq, Debug)]
pub struct CellLayout {
    pub position: Rect,
    pub style: ResolvedCellStyle,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(SpanLayout),
    Image(ImageLayout),
    Cell(CellLayout),
}

/// A finished page: a snapshot of the page style it was created with and the
/// positioned content placed onto it, in drawing order.
#[derive(Clone, PartialEq, Debug)]
pub struct Page {
    pub style: PageStyle,
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(style: PageStyle) -> Page {
        Page {
            style,
            contents: Vec::default(),
        }
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(span));
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    pub fn add_cell(&mut self, cell: CellLayout) {
        self.contents.push(PageContents::Cell(cell));
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// All text spans on the page, in placement order
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Text(span) => Some(span),
            _ => None,
        })
    }

    /// The text of the page, one line per distinct baseline
    pub fn text(&self) -> String {
        let mut out = String::new();
        let mut last_baseline: Option<Pt> = None;
        for span in self.spans() {
            if let Some(baseline) = last_baseline {
                if baseline != span.baseline {
                    out.push('\n');
                }
            }
            out.push_str(&span.text);
            last_baseline = Some(span.baseline);
        }
        out
    }
}
