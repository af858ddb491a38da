//! End-to-end layout of documents onto pages.

use pdf_flow::layout::Margins;
use pdf_flow::*;

// ─── Helpers ────────────────────────────────────────────────────

/// 10pt monospace text: 6pt per character, 10pt lines
fn options(page: PageStyle) -> LayoutOptions {
    let mut options = LayoutOptions {
        default_page_style: page,
        ..LayoutOptions::default()
    };
    options.default_text_style.size = Pt(10.0);
    options
}

/// A page with 400pt of usable width and 100pt of usable height
fn small_page() -> PageStyle {
    PageStyle::custom(Pt(440.0), Pt(140.0), Margins::all(Pt(20.0))).unwrap()
}

fn metrics() -> MonospaceMetrics {
    MonospaceMetrics::default()
}

fn cells(page: &Page) -> Vec<&CellLayout> {
    page.contents
        .iter()
        .filter_map(|c| match c {
            PageContents::Cell(cell) => Some(cell),
            _ => None,
        })
        .collect()
}

// ─── Paragraphs ─────────────────────────────────────────────────

#[test]
fn right_aligned_paragraph_with_first_line_margin() {
    let style = ParagraphStyle::builder()
        .alignment(Alignment::Right)
        .first_line_margin(Pt(50.0))
        .margins(Margins::trbl(Pt(0.0), Pt(20.0), Pt(0.0), Pt(20.0)))
        .build()
        .unwrap();
    // two lines' worth of text
    let text = vec!["word"; 22].join(" ");

    let mut doc = Document::new(options(small_page()));
    doc.add_paragraph(Paragraph::styled_text(style, text));
    let pages = doc.layout(&metrics()).unwrap();

    let spans: Vec<&SpanLayout> = pages[0].spans().collect();
    assert_eq!(spans.len(), 2);
    let left = small_page().content_box().x1;
    for span in spans.iter() {
        assert_eq!(span.origin.0 + span.width, left + Pt(380.0));
    }
    // the first line starts at least the first-line margin in from the paragraph edge
    assert!(spans[0].origin.0 >= left + Pt(70.0));
    assert!(spans[1].width > Pt(310.0));
}

#[test]
fn overflowing_paragraph_continues_on_exactly_one_new_page() {
    let mut doc = Document::new(options(small_page()));
    // 9 of the 10 lines a page holds
    for i in 0..9 {
        doc.add_paragraph(Paragraph::text(format!("filler {i}")));
    }
    doc.add_paragraph(Paragraph::text("first\nsecond\nthird"));
    let pages = doc.layout(&metrics()).unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].style, pages[0].style);
    let continued: Vec<&SpanLayout> = pages[1].spans().collect();
    assert_eq!(continued[0].text, "second");
    assert_eq!(continued[0].origin.1, small_page().content_box().y1);
    assert_eq!(pages[1].text(), "second\nthird");
}

#[test]
fn line_ending_exactly_on_the_bottom_margin_stays() {
    let mut doc = Document::new(options(small_page()));
    for i in 0..10 {
        doc.add_paragraph(Paragraph::text(format!("line {i}")));
    }
    let pages = doc.layout(&metrics()).unwrap();
    assert_eq!(pages.len(), 1);
}

#[test]
fn styled_runs_keep_their_own_style() {
    let bold = TextStyle::with_variant(FontVariant::Bold);
    let paragraph = Paragraph::text("plain ")
        .with(Text::styled(bold, "bold"))
        .with(" plain");
    let mut doc = Document::new(options(small_page()));
    doc.add_paragraph(paragraph);
    let pages = doc.layout(&metrics()).unwrap();

    let variants: Vec<FontVariant> = pages[0].spans().map(|s| s.style.variant).collect();
    assert_eq!(
        variants,
        vec![FontVariant::Plain, FontVariant::Bold, FontVariant::Plain]
    );
    assert_eq!(pages[0].text(), "plain bold plain");
}

#[test]
fn word_wider_than_the_page_can_be_refused() {
    let mut options = options(small_page());
    options.word_overflow = WordOverflow::Fail;
    let mut doc = Document::new(options);
    doc.add_paragraph(Paragraph::text("x".repeat(100)));
    assert!(matches!(
        doc.layout(&metrics()),
        Err(LayoutError::WordTooWide { .. })
    ));
}

// ─── Images ─────────────────────────────────────────────────────

#[test]
fn image_height_with_kept_ratio_derives_width() {
    let mut doc = Document::new(options(small_page()));
    let id = doc.add_image_data(
        ImageData::from_dynamic(image::DynamicImage::new_rgb8(300, 100)).unwrap(),
    );
    let image = Image::new(id).with_height(Pt(12.0), true).unwrap();
    doc.add_image(image);
    doc.add_paragraph(Paragraph::text("inline ").with(image));
    let pages = doc.layout(&metrics()).unwrap();

    let placed: Vec<Rect> = pages[0]
        .contents
        .iter()
        .filter_map(|c| match c {
            PageContents::Image(image) => Some(image.position),
            _ => None,
        })
        .collect();
    assert_eq!(placed.len(), 2);
    for rect in placed {
        assert_eq!(rect.width(), Pt(36.0));
        assert_eq!(rect.height(), Pt(12.0));
    }
}

// ─── Tables ─────────────────────────────────────────────────────

#[test]
fn header_rows_repeat_on_every_page_of_the_table() {
    let header = TableCellStyle::builder()
        .background(colours::GREY)
        .build()
        .unwrap();
    let mut table = Table::new().add_row(
        TableRow::header([TableCell::text("Name"), TableCell::text("Value")]).with_style(header),
    );
    for i in 0..30 {
        table = table.add_row(TableRow::new([
            TableCell::text(format!("row {i}")),
            TableCell::text(lipsum::lipsum_words(3)),
        ]));
    }
    table.set_repeat_header(true);

    let mut doc = Document::new(options(small_page()));
    doc.add_table(table).unwrap();
    let pages = doc.layout(&metrics()).unwrap();

    assert!(pages.len() > 1);
    let top = small_page().content_box().y1;
    for page in pages.iter() {
        let first = cells(page)[0];
        assert_eq!(first.position.y1, top);
        assert_eq!(first.style.background, Some(colours::GREY));
        assert!(page.text().starts_with("NameValue"));
    }
}

#[test]
fn row_span_leaves_the_slot_below_empty() {
    let table = Table::new()
        .add_row(TableRow::new([
            TableCell::text("spans").with_row_span(2).unwrap(),
            TableCell::text("a"),
            TableCell::text("b"),
        ]))
        .add_row(TableRow::new([TableCell::text("c"), TableCell::text("d")]));
    let mut doc = Document::new(options(small_page()));
    doc.add_table(table).unwrap();
    let pages = doc.layout(&metrics()).unwrap();

    let cells = cells(&pages[0]);
    assert_eq!(cells.len(), 5);
    let spanning = cells[0].position;
    // nothing but the spanning cell covers its column in the second row
    for cell in cells.iter().skip(1) {
        assert!(cell.position.x1 >= spanning.x2);
    }
    assert_eq!(pages[0].text(), "spansab\ncd");
}

#[test]
fn column_span_width_is_the_sum_of_its_columns() {
    let mut table = Table::with_column_count(3)
        .add_row(TableRow::new([
            TableCell::text("a"),
            TableCell::text("bc").with_column_span(2).unwrap(),
        ]))
        .add_row(TableRow::new([
            TableCell::text("a"),
            TableCell::text("b"),
            TableCell::text("c"),
        ]));
    table.set_column_width(0, Pt(100.0)).unwrap();
    table.set_column_width(2, Pt(50.0)).unwrap();

    let mut doc = Document::new(options(small_page()));
    doc.add_table(table).unwrap();
    let pages = doc.layout(&metrics()).unwrap();

    let cells = cells(&pages[0]);
    // the unset middle column takes what is left of 400pt
    assert_eq!(cells[1].position.width(), Pt(250.0 + 50.0));
    assert_eq!(cells[3].position.width(), Pt(250.0));
}

#[test]
fn column_span_past_a_fixed_column_count_is_refused() {
    let table = Table::with_column_count(2).add_row(TableRow::new([
        TableCell::text("a"),
        TableCell::text("b").with_column_span(2).unwrap(),
    ]));
    let mut doc = Document::default();
    assert!(matches!(
        doc.add_table(table),
        Err(ConfigError::ColumnSpanOutOfBounds { .. })
    ));
}

#[test]
fn row_taller_than_a_page_fails_instead_of_looping() {
    let tall = TableCell::new((0..20).map(|i| Paragraph::text(format!("paragraph {i}"))));
    let table = Table::new().add_row(TableRow::new([tall]));
    let mut doc = Document::new(options(small_page()));
    doc.add_table(table).unwrap();
    assert!(matches!(
        doc.layout(&metrics()),
        Err(LayoutError::RowTooTall { row: 0, .. })
    ));
}

// ─── Whole documents ────────────────────────────────────────────

#[test]
fn layout_is_repeatable() {
    let mut doc = Document::new(options(small_page()));
    for _ in 0..5 {
        doc.add_paragraph(Paragraph::text(lipsum::lipsum(40)));
    }
    doc.add_table(
        Table::new()
            .add_row(TableRow::new([TableCell::text("a"), TableCell::text("b")]))
            .add_row(TableRow::new([TableCell::text(lipsum::lipsum(20))])),
    )
    .unwrap();

    let first = doc.layout(&metrics()).unwrap();
    let second = doc.layout(&metrics()).unwrap();
    assert!(first.len() > 1);
    assert_eq!(first, second);
}

#[test]
fn writes_pdf_through_a_sink() {
    let mut doc = Document::new(options(small_page()));
    doc.add_paragraph(Paragraph::text(lipsum::lipsum(200)));
    let mut sink = PdfSink::new(Vec::new());
    doc.write(&metrics(), &mut sink).unwrap();
    let bytes = sink.into_inner();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(bytes.ends_with(b"%%EOF") || bytes.ends_with(b"%%EOF\n"));
}
