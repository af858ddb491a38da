//! Style-driven flow layout of paragraphs, images and tables onto fixed-size pages.
//!
//! A [Document] holds an ordered list of content. [Document::layout] flows that
//! content down the pages, wrapping text at the content width and starting new pages
//! whenever something no longer fits; [Document::write] hands the finished pages to
//! a [PageSink] such as [PdfSink].
//!
//! ```
//! use pdf_flow::{
//!     Alignment, Document, LayoutOptions, MonospaceMetrics, Paragraph, ParagraphStyle, PdfSink, Pt,
//! };
//!
//! let style = ParagraphStyle::builder()
//!     .alignment(Alignment::Center)
//!     .size(Pt(18.0))
//!     .build()
//!     .expect("valid style");
//!
//! // monospace metrics measure Courier, so lay the document out in Courier
//! let mut doc = Document::new(LayoutOptions::monospace());
//! doc.add_paragraph(Paragraph::styled_text(style, "A centred title"))
//!     .add_paragraph(Paragraph::text("Body text"));
//!
//! let mut sink = PdfSink::new(Vec::new());
//! doc.write(&MonospaceMetrics::default(), &mut sink).expect("can write document");
//! ```

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Line wrapping, page flow, and table layout
pub mod layout;

mod metrics;
pub use metrics::*;

mod options;
pub use options::*;

mod page;
pub use page::*;

/// Standard page sizes
pub mod pagesize;

mod paragraph;
pub use paragraph::*;

mod pdf;
pub use pdf::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod style;
pub use style::*;

mod table;
pub use table::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
