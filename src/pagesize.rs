//! Pre-defined page sizes for common paper formats.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height.
//! Use the [`PageOrientation`](crate::pagesize::PageOrientation) trait to convert between
//! portrait and landscape, or [`PageFormat`](crate::pagesize::PageFormat) to name a size
//! in a [`PageStyle`](crate::PageStyle).

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

// north american sizes
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const HALF_LETTER: PageSize = (Pt(5.5 * 72.0), Pt(8.5 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));
pub const TABLOID: PageSize = (Pt(11.0 * 72.0), Pt(17.0 * 72.0));

// iso a-series (converted from mm to points)
pub const A0: PageSize = (Pt(841.0 * 72.0 / 25.4), Pt(1189.0 * 72.0 / 25.4));
pub const A1: PageSize = (Pt(594.0 * 72.0 / 25.4), Pt(841.0 * 72.0 / 25.4));
pub const A2: PageSize = (Pt(420.0 * 72.0 / 25.4), Pt(594.0 * 72.0 / 25.4));
pub const A3: PageSize = (Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));
pub const A6: PageSize = (Pt(105.0 * 72.0 / 25.4), Pt(148.0 * 72.0 / 25.4));
pub const A7: PageSize = (Pt(74.0 * 72.0 / 25.4), Pt(105.0 * 72.0 / 25.4));
pub const A8: PageSize = (Pt(52.0 * 72.0 / 25.4), Pt(74.0 * 72.0 / 25.4));

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// The closed set of named paper formats usable as page style presets
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PageFormat {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    A7,
    A8,
    Letter,
    HalfLetter,
    Legal,
    Tabloid,
}

impl PageFormat {
    /// The portrait size of the format
    pub const fn size(self) -> PageSize {
        match self {
            PageFormat::A0 => A0,
            PageFormat::A1 => A1,
            PageFormat::A2 => A2,
            PageFormat::A3 => A3,
            PageFormat::A4 => A4,
            PageFormat::A5 => A5,
            PageFormat::A6 => A6,
            PageFormat::A7 => A7,
            PageFormat::A8 => A8,
            PageFormat::Letter => LETTER,
            PageFormat::HalfLetter => HALF_LETTER,
            PageFormat::Legal => LEGAL,
            PageFormat::Tabloid => TABLOID,
        }
    }

    pub fn oriented(self, orientation: Orientation) -> PageSize {
        match orientation {
            Orientation::Portrait => self.size().portrait(),
            Orientation::Landscape => self.size().landscape(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_swaps_dimensions() {
        let (w, h) = PageFormat::A8.oriented(Orientation::Landscape);
        assert!(w > h);
        assert_eq!((h, w), A8);
        assert_eq!(LETTER.landscape().portrait(), LETTER);
    }
}
