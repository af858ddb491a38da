//! Turning document content into positioned page contents.
//!
//! Layout runs in three stages:
//!
//! - [`wrap_lines`](crate::layout::wrap_lines) breaks a paragraph's inline stream
//!   into lines, greedily and at spaces, falling back to character breaks for
//!   words wider than a line
//! - [`PageFlow`](crate::layout::PageFlow) tracks the cursor down the current page
//!   and starts new pages when a line, image, or row group would cross the bottom
//!   margin
//! - [`layout_paragraph`](crate::layout::layout_paragraph),
//!   [`layout_image`](crate::layout::layout_image) and
//!   [`layout_table`](crate::layout::layout_table) place content through the flow
//!
//! # Example
//!
//! ```
//! use pdf_flow::{Document, Paragraph, MonospaceMetrics};
//!
//! let mut doc = Document::default();
//! doc.add_paragraph(Paragraph::text("Hello, world!"));
//!
//! let pages = doc.layout(&MonospaceMetrics::default()).expect("can lay out");
//! assert_eq!(pages.len(), 1);
//! assert_eq!(pages[0].text(), "Hello, world!");
//! ```

use crate::image::ImageData;
use crate::metrics::FontMetrics;
use crate::options::LayoutOptions;
use id_arena::Arena;

mod flow;
mod image;
mod margins;
mod paragraph;
mod table;
mod text;

pub use self::image::*;
pub use flow::*;
pub use margins::*;
pub use paragraph::*;
pub use table::*;
pub use text::*;

/// Everything layout reads besides the content itself
pub struct LayoutContext<'a, M: FontMetrics + ?Sized> {
    pub metrics: &'a M,
    pub images: &'a Arena<ImageData>,
    pub options: &'a LayoutOptions,
}
