use crate::error::ConfigError;
use crate::units::Pt;

/// Space kept free around a page's content area, a paragraph, or a table cell's content.
/// Margins are plain values; the styles that hold them check they are not negative
/// when they are built.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub const fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric<V: Into<Pt>, H: Into<Pt>>(vertical: V, horizontal: H) -> Margins {
        let vertical: Pt = vertical.into();
        let horizontal: Pt = horizontal.into();
        Margins::trbl(vertical, horizontal, vertical, horizontal)
    }

    /// Create margins where all values are 0.0
    pub const fn empty() -> Margins {
        Margins::trbl(Pt(0.0), Pt(0.0), Pt(0.0), Pt(0.0))
    }

    /// Sum of the left and right components
    pub fn horizontal(&self) -> Pt {
        self.left + self.right
    }

    /// Sum of the top and bottom components
    pub fn vertical(&self) -> Pt {
        self.top + self.bottom
    }

    /// Fails if any component is negative or not a finite number
    pub fn validate(&self, what: &'static str) -> Result<(), ConfigError> {
        for value in [self.top, self.right, self.bottom, self.left] {
            if !value.is_finite() || value < Pt::ZERO {
                return Err(ConfigError::NegativeLength { what, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::In;

    #[test]
    fn builds_from_mixed_units() {
        let m = Margins::symmetric(In(1.0), Pt(10.0));
        assert_eq!(m.top, Pt(72.0));
        assert_eq!(m.horizontal(), Pt(20.0));
        assert_eq!(m.vertical(), Pt(144.0));
    }

    #[test]
    fn negative_components_are_rejected() {
        let m = Margins::trbl(Pt(1.0), Pt(-2.0), Pt(0.0), Pt(0.0));
        assert_eq!(
            m.validate("paragraph margins"),
            Err(ConfigError::NegativeLength {
                what: "paragraph margins",
                value: Pt(-2.0)
            })
        );
        assert!(Margins::all(Pt(20.0)).validate("page margins").is_ok());
    }
}
