//! Content stream rendering for laid-out pages.

use crate::colour::Colour;
use crate::page::{CellLayout, ImageLayout, Page, PageContents, SpanLayout};
use crate::style::{BorderStyle, FontFamily, FontVariant};
use crate::units::Pt;
use std::io::Write;

/// Thickness of the underline stroke, relative to the font size
const UNDERLINE_THICKNESS: f32 = 0.05;
/// Distance of the underline below the baseline, relative to the font size
const UNDERLINE_OFFSET: f32 = 0.1;

/// Resource names used while rendering a page
pub(crate) trait Resources {
    /// Index of the font resource `/F{index}` for a family and variant
    fn font_index(&self, family: FontFamily, variant: FontVariant) -> usize;
}

/// Renders a page's contents to a PDF content stream. Layout coordinates run down
/// from the top of the page; they are flipped here.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_page<R: Resources>(page: &Page, resources: &R) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();
    let height = page.style.height();

    // backgrounds and borders first so cell content is drawn on top
    for cell in page.contents.iter().filter_map(|c| match c {
        PageContents::Cell(cell) => Some(cell),
        _ => None,
    }) {
        render_cell(&mut content, cell, height)?;
    }

    for page_content in page.contents.iter() {
        match page_content {
            PageContents::Text(span) => render_span(&mut content, span, height, resources)?,
            PageContents::Image(image) => render_image(&mut content, image, height)?,
            PageContents::Cell(_) => {}
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_span<R: Resources>(
    content: &mut Vec<u8>,
    span: &SpanLayout,
    page_height: Pt,
    resources: &R,
) -> Result<(), std::io::Error> {
    let style = &span.style;
    let font = resources.font_index(style.family, style.variant);
    let x = span.origin.0.0;
    let y = (page_height - span.baseline).0;

    write!(content, "BT\n")?;
    write!(content, "/F{} {} Tf\n", font, style.size.0)?;
    write_fill(content, style.colour)?;
    if span.word_spacing != Pt::ZERO {
        write!(content, "{} Tw\n", span.word_spacing.0)?;
    }
    write!(content, "{x} {y} Td\n")?;
    write!(content, "<")?;
    for ch in span.text.chars() {
        write!(content, "{:02x}", win_ansi(ch))?;
    }
    write!(content, "> Tj\n")?;
    write!(content, "ET\n")?;

    if style.underline {
        let size = style.size.0;
        let y = y - size * UNDERLINE_OFFSET;
        write!(content, "q\n")?;
        write_stroke(content, style.colour)?;
        write!(content, "{} w\n", size * UNDERLINE_THICKNESS)?;
        write!(content, "{x} {y} m {} {y} l S\n", x + span.width.0)?;
        write!(content, "Q\n")?;
    }
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_image(content: &mut Vec<u8>, image: &ImageLayout, page_height: Pt) -> Result<(), std::io::Error> {
    let position = image.position.to_pdf(page_height);
    write!(content, "q\n")?;
    write!(
        content,
        "{} 0 0 {} {} {} cm\n",
        position.x2 - position.x1,
        position.y2 - position.y1,
        position.x1,
        position.y1
    )?;
    write!(content, "/I{} Do\n", image.image.index())?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_cell(content: &mut Vec<u8>, cell: &CellLayout, page_height: Pt) -> Result<(), std::io::Error> {
    let r = cell.position.to_pdf(page_height);
    let style = &cell.style;

    if let Some(background) = style.background {
        write!(content, "q\n")?;
        write_fill(content, background)?;
        write!(content, "{} {} {} {} re f\n", r.x1, r.y1, r.x2 - r.x1, r.y2 - r.y1)?;
        write!(content, "Q\n")?;
    }

    // in PDF space y1 is the bottom edge; each stroke lies wholly inside the cell
    let edges: [(BorderStyle, fn(&pdf_writer::Rect, f32) -> ((f32, f32), (f32, f32))); 4] = [
        (style.top, |r, h| ((r.x1, r.y2 - h), (r.x2, r.y2 - h))),
        (style.right, |r, h| ((r.x2 - h, r.y2), (r.x2 - h, r.y1))),
        (style.bottom, |r, h| ((r.x2, r.y1 + h), (r.x1, r.y1 + h))),
        (style.left, |r, h| ((r.x1 + h, r.y1), (r.x1 + h, r.y2))),
    ];
    for (border, line) in edges {
        if let BorderStyle::Solid { width, colour } = border {
            let (from, to) = line(&r, width.0 * 0.5);
            write!(content, "q\n")?;
            write_stroke(content, colour)?;
            write!(content, "{} w\n", width.0)?;
            write!(content, "{} {} m {} {} l S\n", from.0, from.1, to.0, to.1)?;
            write!(content, "Q\n")?;
        }
    }
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_fill(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    let (r, g, b) = colour.to_unit();
    write!(content, "{r} {g} {b} rg\n")
}

#[allow(clippy::write_with_newline)]
fn write_stroke(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    let (r, g, b) = colour.to_unit();
    write!(content, "{r} {g} {b} RG\n")
}

/// Code of a character in WinAnsiEncoding, `?` for anything it can't represent
pub(crate) fn win_ansi(ch: char) -> u8 {
    match ch {
        ' '..='~' | '\u{a0}'..='\u{ff}' => ch as u8,
        '€' => 0x80,
        '‚' => 0x82,
        '„' => 0x84,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageStyle;
    use crate::rect::Rect;
    use crate::style::{ResolvedCellStyle, ResolvedTextStyle};

    struct OneFont;

    impl Resources for OneFont {
        fn font_index(&self, _: FontFamily, _: FontVariant) -> usize {
            0
        }
    }

    fn render(page: &Page) -> String {
        String::from_utf8(render_page(page, &OneFont).unwrap()).unwrap()
    }

    #[test]
    fn text_is_placed_on_a_flipped_baseline() {
        let style = PageStyle::custom(Pt(200.0), Pt(100.0), crate::layout::Margins::empty()).unwrap();
        let mut page = Page::new(style);
        page.add_span(SpanLayout {
            text: "Hi".to_string(),
            style: ResolvedTextStyle::default(),
            origin: (Pt(10.0), Pt(20.0)),
            width: Pt(12.0),
            baseline: Pt(30.0),
            word_spacing: Pt::ZERO,
        });
        let rendered = render(&page);
        assert!(rendered.contains("/F0 12 Tf\n"));
        assert!(rendered.contains("10 70 Td\n"));
        assert!(rendered.contains("<4869> Tj\n"));
        assert!(!rendered.contains("Tw"));
    }

    #[test]
    fn cells_are_drawn_before_their_content() {
        let mut page = Page::new(PageStyle::default());
        page.add_span(SpanLayout {
            text: "x".to_string(),
            style: ResolvedTextStyle::default(),
            origin: (Pt(0.0), Pt(0.0)),
            width: Pt(6.0),
            baseline: Pt(10.0),
            word_spacing: Pt(1.5),
        });
        page.add_cell(CellLayout {
            position: Rect::from_origin(Pt(0.0), Pt(0.0), Pt(50.0), Pt(20.0)),
            style: ResolvedCellStyle {
                background: Some(crate::colours::GREY),
                ..ResolvedCellStyle::default()
            },
        });
        let rendered = render(&page);
        let fill = rendered.find(" re f").unwrap();
        let text = rendered.find("BT").unwrap();
        assert!(fill < text);
        assert_eq!(rendered.matches(" l S").count(), 4);
        assert!(rendered.contains("1.5 Tw\n"));
    }

    #[test]
    fn borders_stay_inside_the_cell() {
        let page_style =
            PageStyle::custom(Pt(100.0), Pt(100.0), crate::layout::Margins::all(Pt(10.0)))
                .unwrap();
        let mut page = Page::new(page_style);
        let thick = BorderStyle::solid(Pt(4.0), crate::colours::BLACK).unwrap();
        page.add_cell(CellLayout {
            position: Rect::from_origin(Pt(0.0), Pt(0.0), Pt(50.0), Pt(20.0)),
            style: ResolvedCellStyle {
                top: thick,
                right: BorderStyle::None,
                bottom: BorderStyle::None,
                left: thick,
                ..ResolvedCellStyle::default()
            },
        });
        let rendered = render(&page);
        // the cell spans y 80..100 once flipped into PDF space
        assert!(rendered.contains("0 98 m 50 98 l S\n"));
        assert!(rendered.contains("2 80 m 2 100 l S\n"));
        assert_eq!(rendered.matches(" l S").count(), 2);
    }

    #[test]
    fn maps_characters_to_win_ansi() {
        assert_eq!(win_ansi('A'), 0x41);
        assert_eq!(win_ansi('é'), 0xe9);
        assert_eq!(win_ansi('—'), 0x97);
        assert_eq!(win_ansi('漢'), b'?');
    }
}
