//! Builds a short guide to the library, laid out by the library itself, and writes it
//! to `documentation.pdf`.
//!
//! Text is set in Courier so that the monospace metrics match the glyphs the PDF
//! viewer draws.

use pdf_flow::layout::Margins;
use pdf_flow::*;
use std::io::Write;

fn colour(r: u8, g: u8, b: u8) -> Colour {
    Colour::new_rgb_bytes(r, g, b)
}

/// A 3:1 gradient standing in for a logo
fn badge() -> Result<ImageData, ConfigError> {
    let image = image::RgbaImage::from_fn(300, 100, |x, y| {
        let shade = (x * 255 / 300) as u8;
        let alpha = if (y / 10 + x / 10) % 2 == 0 { 255 } else { 160 };
        image::Rgba([shade, 80, 255 - shade, alpha])
    });
    ImageData::from_dynamic(image::DynamicImage::ImageRgba8(image))
}

fn main() -> Result<(), PDFError> {
    let code_colour = colour(128, 80, 128);
    let light_code_colour = colour(255, 250, 255);
    let dark_code_colour = colour(100, 0, 100);
    let title_colour = colour(204, 85, 89);
    let emphasis_colour = colour(128, 128, 60);
    let light_emphasis_colour = colour(250, 250, 240);
    let dark_emphasis_colour = colour(100, 100, 0);

    let code = TextStyle::builder()
        .variant(FontVariant::Italic)
        .size(Pt(10.0))
        .colour(code_colour)
        .build()?;
    let code_paragraph = ParagraphStyle::builder()
        .variant(FontVariant::Italic)
        .size(Pt(10.0))
        .colour(code_colour)
        .build()?;
    let title = ParagraphStyle::builder()
        .variant(FontVariant::Bold)
        .size(Pt(14.0))
        .colour(title_colour)
        .margins(Margins::trbl(Pt(10.0), Pt(0.0), Pt(0.0), Pt(20.0)))
        .build()?;
    let emphasis = ParagraphStyle::builder().colour(emphasis_colour).build()?;

    let mut doc = Document::new(LayoutOptions::monospace());
    let mut info = Info::new();
    info.title("pdf-flow documentation")
        .subject("Paragraph, image and table layout");
    doc.set_info(info);

    doc.add_paragraph(Paragraph::styled_text(title, "Creating a document"));
    doc.add_paragraph(
        Paragraph::text("A PDF is created with:")
            .line_break()
            .with(Text::styled(code, "let mut doc = Document::default();"))
            .line_break()
            .with("and written with:")
            .line_break()
            .with(Text::styled(code, "doc.write(&metrics, &mut PdfSink::new(out))?;")),
    );

    doc.add_paragraph(Paragraph::styled_text(title, "Adding text, paragraphs and pages"));
    doc.add_paragraph(
        Paragraph::text("A document created without a page style uses the default one: A4 portrait.")
            .line_break()
            .with("There is no need to add pages: when an element does not fit onto the page, a new page with the same style as the previous one is created.")
            .line_break()
            .with("The same goes for lines. When a line does not fit into the page width, the text is split at the last space that fits and the rest wraps onto a new line, as many times as needed.")
            .line_break()
            .with("New lines and new pages can of course be started at any time."),
    );

    doc.add_paragraph(Paragraph::styled_text(title, "Adding images"));
    let badge = doc.add_image_data(badge()?);
    let inline = Image::new(badge).with_height(Pt(12.0), true)?;
    doc.add_paragraph(
        Paragraph::text("A paragraph can hold images as well as text, like this one: ").with(inline),
    );

    doc.add_paragraph(Paragraph::styled_text(title, "Text styles"));
    doc.add_paragraph(
        Paragraph::new(emphasis)
            .with("A colour can be set for a whole paragraph but also for ")
            .with(Text::styled(code, "a subset "))
            .with("of it."),
    );
    let underlined = TextStyle::builder()
        .colour(emphasis_colour)
        .underline(true)
        .build()?;
    let italic_underlined = TextStyle::builder()
        .variant(FontVariant::Italic)
        .underline(true)
        .build()?;
    let bold_italic = ParagraphStyle::builder()
        .variant(FontVariant::BoldItalic)
        .build()?;
    doc.add_paragraph(
        Paragraph::new(bold_italic)
            .with("Text can be set in ")
            .with(Text::styled(TextStyle::with_variant(FontVariant::Bold), "bold,"))
            .with(Text::styled(italic_underlined, " italic"))
            .with(Text::styled(underlined, " and underlined."))
            .with(Text::styled(
                TextStyle::builder().size(Pt(14.0)).build()?,
                " The size can change within a paragraph too.",
            )),
    );

    doc.add_paragraph(Paragraph::styled_text(title, "Paragraph styles"));
    let indented = ParagraphStyle::builder()
        .size(Pt(14.0))
        .margins(Margins::all(Pt(20.0)))
        .first_line_margin(Pt(20.0))
        .build()?;
    doc.add_paragraph(
        Paragraph::new(indented)
            .with("This paragraph has a margin of 20 on each side plus a first line margin of 20.")
            .line_break()
            .with("Only the very first line is shifted by 40 from the left; every other line, including these ones after explicit breaks, is shifted by 20."),
    );
    let right = ParagraphStyle::builder()
        .alignment(Alignment::Right)
        .margins(Margins::trbl(Pt(0.0), Pt(20.0), Pt(0.0), Pt(20.0)))
        .first_line_margin(Pt(50.0))
        .build()?;
    doc.add_paragraph(Paragraph::styled_text(
        right,
        "This paragraph is aligned to the right. The first line margin still counts, so the first line stops short of the paragraph start by the size of that margin. The other lines use the plain paragraph margins.",
    ));
    let centred = ParagraphStyle::builder()
        .alignment(Alignment::Center)
        .margins(Margins::trbl(Pt(0.0), Pt(50.0), Pt(0.0), Pt(50.0)))
        .first_line_margin(Pt(50.0))
        .build()?;
    doc.add_paragraph(Paragraph::styled_text(
        centred,
        "This paragraph is centred with a first line margin, following the same rules as the previous one.",
    ));
    let justified = ParagraphStyle::builder()
        .alignment(Alignment::Justify)
        .build()?;
    doc.add_paragraph(Paragraph::styled_text(justified, lipsum::lipsum(60)));
    let spaced = ParagraphStyle::builder().line_spacing(1.5).build()?;
    doc.add_paragraph(
        Paragraph::new(spaced)
            .with("A line spacing ratio multiplies the line height of every line of the paragraph, both the ones wrapped automatically and")
            .line_break()
            .with("the ones started explicitly."),
    );

    doc.add_page(Some(PageStyle::A8_LANDSCAPE.with_margins(Margins::all(Pt(10.0)))?));
    doc.add_paragraph(Paragraph::styled_text(title, "Page styles"));
    doc.add_paragraph(
        Paragraph::text("A page of another size and orientation.")
            .line_break()
            .with("Use the presets or define your own."),
    );
    doc.add_page(Some(PageStyle::A4_PORTRAIT));

    doc.add_paragraph(Paragraph::styled_text(title, "Adding tables"));
    let header_cell = TableCellStyle::builder()
        .borders(
            BorderStyle::solid(Pt(4.0), dark_emphasis_colour)?,
            BorderStyle::THIN_SOLID,
            BorderStyle::THIN_SOLID,
            BorderStyle::THIN_SOLID,
        )
        .background(light_emphasis_colour)
        .build()?;
    let footer_cell = TableCellStyle::builder()
        .background(light_code_colour)
        .border_bottom(BorderStyle::solid(Pt(2.0), dark_code_colour)?)
        .build()?;
    let header_text = ParagraphStyle::builder().colour(title_colour).build()?;

    let how = |what: &str, snippet: &str| {
        TableRow::new([
            TableCell::new([Paragraph::styled_text(emphasis, what)]),
            TableCell::new([Paragraph::styled_text(code_paragraph, snippet)]),
        ])
    };
    let mut table = Table::new()
        .add_row(TableRow::header([
            TableCell::styled(header_cell, [Paragraph::styled_text(header_text, "How to ...")]),
            TableCell::styled(header_cell, [Paragraph::styled_text(header_text, "Code")]),
        ]))
        .add_row(how("Create a table", "let table = Table::new();"))
        .add_row(how("Add a row", "table.add_row(TableRow::new(cells))"))
        .add_row(how("Add a cell to a row", "TableCell::text(\"text of cell\")"))
        .add_row(how("Control column width", "table.set_column_width(column, width)?;"))
        .add_row(how("Add the table to the document", "doc.add_table(table)?;"))
        .add_row(TableRow::new([
            TableCell::new([Paragraph::styled_text(emphasis, "Merge rows")]).with_row_span(2)?,
            TableCell::new([Paragraph::styled_text(code_paragraph, "cell.with_row_span(rows)?")]),
        ]))
        .add_row(TableRow::new([TableCell::default()]))
        .add_row(TableRow::new([TableCell::new([
            Paragraph::styled_text(emphasis, "Merge columns"),
            Paragraph::styled_text(code_paragraph, "cell.with_column_span(columns)?"),
        ])
        .with_column_span(2)?]))
        .add_row(how("Repeat the header on new pages", "table.set_repeat_header(true)"))
        .add_row(how("Create a cell style", "TableCellStyle::builder().build()?"))
        .add_row(how("Give a cell a style", "TableCell::styled(style, paragraphs)"))
        .add_row(
            TableRow::new([
                TableCell::text("Add a footer"),
                TableCell::new([Paragraph::styled_text(
                    code_paragraph,
                    "Add a last row with a different style.",
                )]),
            ])
            .with_style(footer_cell),
        );
    table.set_column_width(0, Pt(237.5))?;
    table.set_column_width(1, Pt(237.5))?;
    table.set_repeat_header(true);
    doc.add_table(table)?;

    doc.add_paragraph(Paragraph::default().line_break().with("That's all there is to it."));

    let out = std::fs::File::create("documentation.pdf")?;
    let mut sink = PdfSink::new(std::io::BufWriter::new(out));
    doc.write(&MonospaceMetrics::default(), &mut sink)?;
    sink.into_inner().flush()?;
    Ok(())
}
