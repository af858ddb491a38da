use crate::units::*;

/// A rectangle on a page, specified by two opposite corners. Layout coordinates start
/// at the top-left corner of the page and grow to the right and downwards.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the left edge.
    pub x1: Pt,
    /// The y-coordinate of the top edge.
    pub y1: Pt,
    /// The x-coordinate of the right edge.
    pub x2: Pt,
    /// The y-coordinate of the bottom edge.
    pub y2: Pt,
}

impl Rect {
    pub fn from_origin(x: Pt, y: Pt, width: Pt, height: Pt) -> Rect {
        Rect {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }

    /// Convert into PDF user space, whose origin is the bottom-left corner of a page
    /// `page_height` tall
    pub(crate) fn to_pdf(self, page_height: Pt) -> pdf_writer::Rect {
        pdf_writer::Rect::new(
            self.x1.into(),
            (page_height - self.y2).into(),
            self.x2.into(),
            (page_height - self.y1).into(),
        )
    }
}
