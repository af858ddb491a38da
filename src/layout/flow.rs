use crate::page::{Page, PageStyle};
use crate::rect::Rect;
use crate::units::Pt;

/// Tolerance on the bottom edge, absorbing rounding in accumulated line heights
const FIT_EPSILON: Pt = Pt(1e-3);

/// Returned when a block is taller than a whole page's content area, so no amount
/// of new pages could make it fit
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Overflow {
    pub height: Pt,
    pub available: Pt,
}

/// Vertical flow of content down a sequence of pages.
///
/// Tracks the page being filled and the cursor on it. Placing a block that would
/// cross the bottom margin finishes the page and continues at the top margin of a
/// new page with the current page style. A block that ends exactly on the bottom
/// margin still fits.
#[derive(Debug, Clone)]
pub struct PageFlow {
    pages: Vec<Page>,
    current: Page,
    cursor_y: Pt,
    /// Style given to pages created from here on
    style: PageStyle,
}

impl PageFlow {
    pub fn new(style: PageStyle) -> PageFlow {
        PageFlow {
            pages: Vec::new(),
            current: Page::new(style),
            cursor_y: style.content_box().y1,
            style,
        }
    }

    /// Style of the page currently being filled
    pub fn page_style(&self) -> &PageStyle {
        &self.current.style
    }

    pub fn content_box(&self) -> Rect {
        self.current.style.content_box()
    }

    pub fn cursor_y(&self) -> Pt {
        self.cursor_y
    }

    /// Space left between the cursor and the bottom margin
    pub fn remaining(&self) -> Pt {
        self.content_box().y2 - self.cursor_y
    }

    /// Whether a block of `height` fits below the cursor on the current page
    pub fn fits(&self, height: Pt) -> bool {
        self.cursor_y + height <= self.content_box().y2 + FIT_EPSILON
    }

    /// Whether a block of `height` would fit on an empty page of the current style
    pub fn fits_on_empty_page(&self, height: Pt) -> bool {
        height <= self.style.content_height() + FIT_EPSILON
    }

    /// Nothing has been placed on the current page yet
    pub fn at_page_top(&self) -> bool {
        self.current.is_empty() && self.cursor_y <= self.content_box().y1
    }

    /// Make room for a block of `height`, starting a new page if it doesn't fit on
    /// this one. Returns whether a page was started.
    pub fn reserve(&mut self, height: Pt) -> Result<bool, Overflow> {
        if self.fits(height) {
            return Ok(false);
        }
        if !self.fits_on_empty_page(height) {
            return Err(Overflow {
                height,
                available: self.style.content_height(),
            });
        }
        self.new_page();
        Ok(true)
    }

    /// Place a block of `height`, returning the y of its top edge and moving the
    /// cursor below it
    pub fn place(&mut self, height: Pt) -> Result<Pt, Overflow> {
        self.reserve(height)?;
        let y = self.cursor_y;
        self.cursor_y += height;
        Ok(y)
    }

    /// Move the cursor down without placing anything. Space past the bottom margin is
    /// not carried over to the next page.
    pub fn advance(&mut self, dy: Pt) {
        self.cursor_y += dy;
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.current
    }

    /// Finish the current page and continue on a new one with the current style
    pub fn new_page(&mut self) {
        let next = Page::new(self.style);
        let finished = std::mem::replace(&mut self.current, next);
        self.pages.push(finished);
        self.cursor_y = self.style.content_box().y1;
        log::debug!(
            "started page {} ({} x {})",
            self.pages.len() + 1,
            self.style.width(),
            self.style.height()
        );
    }

    /// An explicit page break. A given style applies to this and every later page
    /// until changed again. Every break starts a page, even after an empty one, except
    /// on the untouched first page of the document, which is restyled in place.
    pub fn request_new_page(&mut self, style: Option<PageStyle>) {
        if let Some(style) = style {
            self.style = style;
        }
        if self.pages.is_empty() && self.at_page_top() {
            self.current.style = self.style;
            self.cursor_y = self.style.content_box().y1;
        } else {
            self.new_page();
        }
    }

    /// Number of pages so far, including the one being filled
    pub fn page_count(&self) -> usize {
        self.pages.len() + 1
    }

    pub fn finish(mut self) -> Vec<Page> {
        self.pages.push(self.current);
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Margins;

    // 100pt of content height
    fn style() -> PageStyle {
        PageStyle::custom(Pt(200.0), Pt(120.0), Margins::all(Pt(10.0))).unwrap()
    }

    #[test]
    fn places_blocks_down_the_page() {
        let mut flow = PageFlow::new(style());
        assert_eq!(flow.place(Pt(30.0)), Ok(Pt(10.0)));
        assert_eq!(flow.place(Pt(30.0)), Ok(Pt(40.0)));
        assert_eq!(flow.remaining(), Pt(40.0));
        assert_eq!(flow.page_count(), 1);
    }

    #[test]
    fn exact_fit_stays_on_page() {
        let mut flow = PageFlow::new(style());
        flow.place(Pt(60.0)).unwrap();
        assert_eq!(flow.place(Pt(40.0)), Ok(Pt(70.0)));
        assert_eq!(flow.page_count(), 1);
    }

    #[test]
    fn overflow_starts_one_page_with_the_same_style() {
        let mut flow = PageFlow::new(style());
        flow.place(Pt(60.0)).unwrap();
        assert_eq!(flow.place(Pt(41.0)), Ok(Pt(10.0)));
        let pages = flow.finish();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].style, pages[0].style);
    }

    #[test]
    fn block_taller_than_a_page_is_refused() {
        let mut flow = PageFlow::new(style());
        assert_eq!(
            flow.place(Pt(101.0)),
            Err(Overflow {
                height: Pt(101.0),
                available: Pt(100.0)
            })
        );
        assert_eq!(flow.page_count(), 1);
    }

    #[test]
    fn explicit_style_sticks_for_later_pages() {
        let mut flow = PageFlow::new(style());
        flow.place(Pt(10.0)).unwrap();
        flow.request_new_page(Some(PageStyle::A8_LANDSCAPE));
        assert_eq!(flow.page_style(), &PageStyle::A8_LANDSCAPE);
        flow.new_page();
        let pages = flow.finish();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[2].style, PageStyle::A8_LANDSCAPE);
    }

    #[test]
    fn break_on_untouched_page_restyles_it() {
        let mut flow = PageFlow::new(style());
        flow.request_new_page(Some(PageStyle::A4_LANDSCAPE));
        let pages = flow.finish();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].style, PageStyle::A4_LANDSCAPE);
    }

    #[test]
    fn consecutive_breaks_leave_a_blank_page() {
        let mut flow = PageFlow::new(style());
        flow.place(Pt(10.0)).unwrap();
        flow.request_new_page(None);
        flow.request_new_page(Some(PageStyle::A8_LANDSCAPE));
        flow.place(Pt(10.0)).unwrap();
        let pages = flow.finish();
        assert_eq!(pages.len(), 3);
        assert!(pages[1].is_empty());
        assert_eq!(pages[1].style, style());
        assert_eq!(pages[2].style, PageStyle::A8_LANDSCAPE);
    }
}
