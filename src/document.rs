use crate::{
    error::{ConfigError, LayoutError},
    image::{Image, ImageData, ImageId},
    info::Info,
    layout::{layout_image, layout_paragraph, layout_table, LayoutContext, PageFlow},
    metrics::FontMetrics,
    options::LayoutOptions,
    page::{Page, PageStyle},
    paragraph::Paragraph,
    table::{Table, TableGrid},
    PDFError,
};
use id_arena::Arena;
use std::path::Path;

/// One entry of the document's content list
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Paragraph(Paragraph),
    /// An image placed as a block of its own
    Image(Image),
    Table(Table, TableGrid),
    /// Start a new page, switching to the given style for it and every page after
    PageBreak(Option<PageStyle>),
}

/// The finished pages of a document, with everything needed to serialize them
pub struct PageSequence<'a> {
    pub pages: Vec<Page>,
    pub images: &'a Arena<ImageData>,
    pub info: Option<&'a Info>,
}

/// Receives a document's laid-out pages, e.g. to serialize them
pub trait PageSink {
    fn write_pages(&mut self, sequence: PageSequence<'_>) -> Result<(), PDFError>;
}

/// A document is an ordered list of paragraphs, images, tables and page breaks.
/// Nothing is positioned until [Document::layout] or [Document::write] is called,
/// so content can be added in any amount before then.
#[derive(Default)]
pub struct Document {
    pub options: LayoutOptions,
    pub info: Option<Info>,
    images: Arena<ImageData>,
    content: Vec<Content>,
}

impl Document {
    pub fn new(options: LayoutOptions) -> Document {
        Document {
            options,
            ..Document::default()
        }
    }

    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Store decoded image data in the document, returning the handle [Image] elements
    /// refer to it by. The same data can be placed any number of times.
    pub fn add_image_data(&mut self, data: ImageData) -> ImageId {
        self.images.alloc(data)
    }

    /// Decode and store an image
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<ImageId, PDFError> {
        Ok(self.add_image_data(ImageData::from_bytes(bytes)?))
    }

    pub fn load_image_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<ImageId, PDFError> {
        Ok(self.add_image_data(ImageData::from_path(path)?))
    }

    pub fn image_data(&self, id: ImageId) -> Option<&ImageData> {
        self.images.get(id)
    }

    pub fn add_paragraph(&mut self, paragraph: Paragraph) -> &mut Self {
        self.content.push(Content::Paragraph(paragraph));
        self
    }

    /// Add an image as a block of its own at the left edge of the content area
    pub fn add_image(&mut self, image: Image) -> &mut Self {
        self.content.push(Content::Image(image));
        self
    }

    /// Add a table, checking its spans and column widths against its bounds first
    pub fn add_table(&mut self, table: Table) -> Result<&mut Self, ConfigError> {
        let grid = table.validate()?;
        self.content.push(Content::Table(table, grid));
        Ok(self)
    }

    /// Start a new page. With a style, it applies to the new page and to every page
    /// created after it until the next styled page break.
    pub fn add_page(&mut self, style: Option<PageStyle>) -> &mut Self {
        self.content.push(Content::PageBreak(style));
        self
    }

    pub fn content(&self) -> &[Content] {
        &self.content
    }

    /// Lay the content out onto pages in insertion order.
    ///
    /// Layout has no side effects: the document is left as it was, and running it
    /// again with the same metrics gives the same pages. There is always at least
    /// one page.
    pub fn layout<M: FontMetrics + ?Sized>(&self, metrics: &M) -> Result<Vec<Page>, LayoutError> {
        let ctx = LayoutContext {
            metrics,
            images: &self.images,
            options: &self.options,
        };
        let mut flow = PageFlow::new(self.options.default_page_style);

        for content in self.content.iter() {
            match content {
                Content::Paragraph(paragraph) => layout_paragraph(paragraph, &mut flow, &ctx)?,
                Content::Image(image) => layout_image(image, &mut flow, &ctx)?,
                Content::Table(table, grid) => layout_table(table, grid, &mut flow, &ctx)?,
                Content::PageBreak(style) => flow.request_new_page(*style),
            }
        }

        let pages = flow.finish();
        log::debug!(
            "laid out {} content items onto {} pages",
            self.content.len(),
            pages.len()
        );
        Ok(pages)
    }

    /// Lay the document out and hand the pages to `sink`. Nothing reaches the sink
    /// if layout fails.
    pub fn write<M: FontMetrics + ?Sized, S: PageSink + ?Sized>(
        &self,
        metrics: &M,
        sink: &mut S,
    ) -> Result<(), PDFError> {
        let pages = self.layout(metrics)?;
        sink.write_pages(PageSequence {
            pages,
            images: &self.images,
            info: self.info.as_ref(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Margins;
    use crate::metrics::MonospaceMetrics;
    use crate::units::Pt;

    struct Collect(Vec<Page>);

    impl PageSink for Collect {
        fn write_pages(&mut self, sequence: PageSequence<'_>) -> Result<(), PDFError> {
            self.0 = sequence.pages;
            Ok(())
        }
    }

    #[test]
    fn empty_document_has_one_page() {
        let doc = Document::default();
        let pages = doc.layout(&MonospaceMetrics::default()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].style, PageStyle::A4_PORTRAIT);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn styled_page_break_applies_to_later_pages() {
        let mut doc = Document::default();
        doc.add_paragraph(Paragraph::text("portrait"))
            .add_page(Some(PageStyle::A8_LANDSCAPE))
            .add_paragraph(Paragraph::text("landscape"));
        let pages = doc.layout(&MonospaceMetrics::default()).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].style, PageStyle::A4_PORTRAIT);
        assert_eq!(pages[1].style, PageStyle::A8_LANDSCAPE);
        assert_eq!(pages[1].text(), "landscape");
    }

    #[test]
    fn every_explicit_break_starts_a_page() {
        let mut doc = Document::default();
        doc.add_paragraph(Paragraph::text("one"))
            .add_page(None)
            .add_page(None)
            .add_paragraph(Paragraph::text("three"));
        let pages = doc.layout(&MonospaceMetrics::default()).unwrap();
        assert_eq!(pages.len(), 3);
        assert!(pages[1].is_empty());
        assert_eq!(pages[2].text(), "three");
    }

    #[test]
    fn failed_layout_writes_nothing() {
        let mut doc = Document::default();
        doc.options.default_page_style =
            PageStyle::custom(Pt(100.0), Pt(40.0), Margins::all(Pt(10.0))).unwrap();
        let id = doc.add_image_data(
            ImageData::from_dynamic(image::DynamicImage::new_rgb8(10, 50)).unwrap(),
        );
        doc.add_paragraph(Paragraph::text("before"))
            .add_image(Image::new(id));

        let mut sink = Collect(Vec::new());
        let result = doc.write(&MonospaceMetrics::default(), &mut sink);
        assert!(matches!(
            result,
            Err(PDFError::Layout(LayoutError::ImageTooTall { .. }))
        ));
        assert!(sink.0.is_empty());
        assert_eq!(doc.content().len(), 2);
    }

    #[test]
    fn invalid_tables_are_rejected_when_added() {
        let mut doc = Document::default();
        let table = Table::new().add_row(crate::table::TableRow::new([
            crate::table::TableCell::text("x").with_row_span(3).unwrap(),
        ]));
        assert!(matches!(
            doc.add_table(table),
            Err(ConfigError::RowSpanOutOfBounds { .. })
        ));
        assert!(doc.content().is_empty());
    }
}
