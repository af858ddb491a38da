use super::flow::PageFlow;
use super::image::resolve_image_size;
use super::text::{wrap_lines, FlowItem, FlowParams, FragmentContent, Line};
use super::LayoutContext;
use crate::error::LayoutError;
use crate::metrics::FontMetrics;
use crate::page::{ImageLayout, Page, SpanLayout};
use crate::paragraph::{Element, Paragraph};
use crate::rect::Rect;
use crate::style::{Alignment, ParagraphStyle};
use crate::units::Pt;

/// A paragraph wrapped to a given width, not yet positioned
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphLines {
    pub style: ParagraphStyle,
    pub lines: Vec<Line>,
    /// Width of the box the paragraph was wrapped into, margins included
    pub width: Pt,
}

impl ParagraphLines {
    /// Wrap `paragraph` into a box `width` wide
    pub fn wrap<M: FontMetrics + ?Sized>(
        paragraph: &Paragraph,
        width: Pt,
        ctx: &LayoutContext<'_, M>,
    ) -> Result<ParagraphLines, LayoutError> {
        let style = paragraph.style;
        let items = flow_items(paragraph, ctx)?;
        let line_width = (width - style.margins().horizontal()).max(Pt::ZERO);
        let params = FlowParams {
            first_line_width: (line_width - style.first_line_margin()).max(Pt::ZERO),
            width: line_width,
            line_spacing: style.line_spacing(),
            base_style: style.resolve_font(&ctx.options.default_text_style),
            word_overflow: ctx.options.word_overflow,
            tab_size: ctx.options.tab_size,
        };
        let lines = wrap_lines(&items, &params, ctx.metrics)?;
        Ok(ParagraphLines {
            style,
            lines,
            width,
        })
    }

    /// Total height, vertical margins included
    pub fn height(&self) -> Pt {
        let margins = self.style.margins();
        margins.top + self.lines.iter().map(|l| l.height).sum::<Pt>() + margins.bottom
    }

    /// Draw every line onto `page` inside the box whose top-left corner is
    /// (`left`, `top`), returning the y just below the paragraph
    pub fn draw(&self, page: &mut Page, left: Pt, top: Pt) -> Pt {
        let mut y = top + self.style.margins().top;
        for line in self.lines.iter() {
            draw_line(page, line, &self.style, left, self.width, y);
            y += line.height;
        }
        y + self.style.margins().bottom
    }
}

/// Resolve the paragraph's elements into the inline stream the text flow consumes
pub fn flow_items<M: FontMetrics + ?Sized>(
    paragraph: &Paragraph,
    ctx: &LayoutContext<'_, M>,
) -> Result<Vec<FlowItem>, LayoutError> {
    let defaults = &ctx.options.default_text_style;
    paragraph
        .elements
        .iter()
        .map(|element| match element {
            Element::Text(text) => Ok(FlowItem::Text {
                text: text.text.clone(),
                style: paragraph.style.resolve_text(defaults, text.style.as_ref()),
            }),
            Element::Image(image) => {
                let data = ctx
                    .images
                    .get(image.id)
                    .ok_or(LayoutError::UnknownImage(image.id.index()))?;
                let (width, height) = resolve_image_size(image, data);
                Ok(FlowItem::Image {
                    image: image.id,
                    width,
                    height,
                })
            }
            Element::LineBreak => Ok(FlowItem::Break),
        })
        .collect()
}

/// Flow a paragraph down the pages, one line at a time. Lines are never split;
/// a line that does not fit moves whole to the next page.
pub fn layout_paragraph<M: FontMetrics + ?Sized>(
    paragraph: &Paragraph,
    flow: &mut PageFlow,
    ctx: &LayoutContext<'_, M>,
) -> Result<(), LayoutError> {
    let content = flow.content_box();
    let wrapped = ParagraphLines::wrap(paragraph, content.width(), ctx)?;

    flow.advance(wrapped.style.margins().top);
    for line in wrapped.lines.iter() {
        let y = flow
            .place(line.height)
            .map_err(|o| LayoutError::LineTooTall {
                height: o.height,
                available: o.available,
            })?;
        let left = flow.content_box().x1;
        draw_line(flow.page_mut(), line, &wrapped.style, left, wrapped.width, y);
    }
    flow.advance(wrapped.style.margins().bottom);
    Ok(())
}

/// Horizontal start of a line and the extra spacing per space character, given the
/// paragraph box's left edge and width
pub fn align_line(line: &Line, style: &ParagraphStyle, left: Pt, width: Pt) -> (Pt, Pt) {
    let margins = style.margins();
    let indent = if line.first {
        style.first_line_margin()
    } else {
        Pt::ZERO
    };
    let start = left + margins.left + indent;
    let available = width - margins.horizontal() - indent;
    let slack = available - line.width;

    match style.alignment() {
        Alignment::Left => (start, Pt::ZERO),
        Alignment::Right => (start + slack, Pt::ZERO),
        Alignment::Center => (start + slack / 2.0, Pt::ZERO),
        Alignment::Justify => {
            let spaces = line.spaces();
            if line.hard_end || spaces == 0 || slack <= Pt::ZERO {
                (start, Pt::ZERO)
            } else {
                (start, slack / spaces as f32)
            }
        }
    }
}

fn draw_line(page: &mut Page, line: &Line, style: &ParagraphStyle, left: Pt, width: Pt, y: Pt) {
    let (x0, word_spacing) = align_line(line, style, left, width);
    let baseline = y + line.ascent;
    let mut spaces_before = 0usize;

    for fragment in line.fragments.iter() {
        let x = x0 + fragment.x + word_spacing * spaces_before as f32;
        match &fragment.content {
            FragmentContent::Text { text, style } => page.add_span(SpanLayout {
                text: text.clone(),
                style: *style,
                origin: (x, y),
                width: fragment.width + word_spacing * fragment.spaces as f32,
                baseline,
                word_spacing,
            }),
            FragmentContent::Image {
                image,
                width,
                height,
            } => page.add_image(ImageLayout {
                image: *image,
                position: Rect::from_origin(x, baseline - *height, *width, *height),
            }),
        }
        spaces_before += fragment.spaces;
    }
    log::trace!("placed line at y={} x={}", y, x0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Margins;
    use crate::metrics::MonospaceMetrics;
    use crate::options::LayoutOptions;
    use crate::page::{PageContents, PageStyle};
    use crate::paragraph::Text;
    use id_arena::Arena;

    // 10pt default text: 6pt per character, 10pt lines
    fn options() -> LayoutOptions {
        let mut options = LayoutOptions::default();
        options.default_text_style.size = Pt(10.0);
        options
    }

    fn wrap(paragraph: &Paragraph, width: f32) -> ParagraphLines {
        let images = Arena::new();
        let options = options();
        let metrics = MonospaceMetrics::default();
        let ctx = LayoutContext {
            metrics: &metrics,
            images: &images,
            options: &options,
        };
        ParagraphLines::wrap(paragraph, Pt(width), &ctx).unwrap()
    }

    #[test]
    fn right_aligned_first_line_respects_first_line_margin() {
        let style = ParagraphStyle::builder()
            .alignment(Alignment::Right)
            .first_line_margin(Pt(50.0))
            .margins(Margins::trbl(Pt(0.0), Pt(20.0), Pt(0.0), Pt(20.0)))
            .build()
            .unwrap();
        // 60 words of 5 characters: wraps into several lines
        let text = vec!["abcde"; 60].join(" ");
        let wrapped = wrap(&Paragraph::styled_text(style, text), 400.0);
        assert!(wrapped.lines.len() >= 2);

        let first = &wrapped.lines[0];
        let (x, _) = align_line(first, &style, Pt(0.0), Pt(400.0));
        assert_eq!(x + first.width, Pt(380.0));
        assert!(first.width <= Pt(310.0));

        let second = &wrapped.lines[1];
        let (x, _) = align_line(second, &style, Pt(0.0), Pt(400.0));
        assert_eq!(x + second.width, Pt(380.0));
        assert!(second.width > Pt(310.0));
        assert!(second.width <= Pt(360.0));
    }

    #[test]
    fn center_alignment_splits_the_slack() {
        let style = ParagraphStyle::builder()
            .alignment(Alignment::Center)
            .build()
            .unwrap();
        let wrapped = wrap(&Paragraph::styled_text(style, "abcde"), 100.0);
        let (x, spacing) = align_line(&wrapped.lines[0], &style, Pt(10.0), Pt(100.0));
        assert_eq!(x, Pt(45.0));
        assert_eq!(spacing, Pt::ZERO);
    }

    #[test]
    fn justify_stretches_all_but_the_last_line() {
        let style = ParagraphStyle::builder()
            .alignment(Alignment::Justify)
            .build()
            .unwrap();
        let wrapped = wrap(&Paragraph::styled_text(style, "aa bb cc dd ee"), 60.0);
        assert_eq!(wrapped.lines.len(), 2);
        // "aa bb cc" is 48 wide with 2 spaces
        let (_, spacing) = align_line(&wrapped.lines[0], &style, Pt(0.0), Pt(60.0));
        assert_eq!(spacing, Pt(6.0));
        let (_, spacing) = align_line(&wrapped.lines[1], &style, Pt(0.0), Pt(60.0));
        assert_eq!(spacing, Pt::ZERO);

        let mut page = Page::new(PageStyle::default());
        wrapped.draw(&mut page, Pt(0.0), Pt(0.0));
        let last_span_end = page
            .spans()
            .take_while(|s| s.baseline == Pt(8.0))
            .map(|s| s.origin.0 + s.width)
            .last();
        assert_eq!(last_span_end, Some(Pt(60.0)));
    }

    #[test]
    fn paragraph_height_includes_margins_and_spacing() {
        let style = ParagraphStyle::builder()
            .margins(Margins::trbl(Pt(5.0), Pt(0.0), Pt(7.0), Pt(0.0)))
            .line_spacing(2.0)
            .build()
            .unwrap();
        let paragraph = Paragraph::new(style)
            .with("one")
            .line_break()
            .with(Text::new("two"));
        let wrapped = wrap(&paragraph, 100.0);
        assert_eq!(wrapped.height(), Pt(5.0 + 20.0 + 20.0 + 7.0));

        let mut page = Page::new(PageStyle::default());
        let bottom = wrapped.draw(&mut page, Pt(0.0), Pt(100.0));
        assert_eq!(bottom, Pt(152.0));
        let baselines: Vec<Pt> = page.spans().map(|s| s.baseline).collect();
        assert_eq!(baselines, vec![Pt(113.0), Pt(133.0)]);
    }

    #[test]
    fn inline_image_sits_on_the_baseline() {
        let mut images = Arena::new();
        let id = images.alloc(
            crate::image::ImageData::from_dynamic(image::DynamicImage::new_rgb8(300, 100))
                .unwrap(),
        );
        let options = options();
        let metrics = MonospaceMetrics::default();
        let ctx = LayoutContext {
            metrics: &metrics,
            images: &images,
            options: &options,
        };
        let image = crate::image::Image::new(id).with_height(Pt(12.0), true).unwrap();
        let paragraph = Paragraph::text("see ").with(image);
        let wrapped = ParagraphLines::wrap(&paragraph, Pt(400.0), &ctx).unwrap();

        let mut page = Page::new(PageStyle::default());
        wrapped.draw(&mut page, Pt(0.0), Pt(0.0));
        let placed = page
            .contents
            .iter()
            .find_map(|c| match c {
                PageContents::Image(image) => Some(image.position),
                _ => None,
            })
            .unwrap();
        assert_eq!(placed, Rect::from_origin(Pt(24.0), Pt(0.0), Pt(36.0), Pt(12.0)));
    }

    #[test]
    fn unknown_images_are_reported() {
        let mut other: Arena<crate::image::ImageData> = Arena::new();
        let id = other.alloc(
            crate::image::ImageData::from_dynamic(image::DynamicImage::new_rgb8(1, 1)).unwrap(),
        );
        let images = Arena::new();
        let options = options();
        let metrics = MonospaceMetrics::default();
        let ctx = LayoutContext {
            metrics: &metrics,
            images: &images,
            options: &options,
        };
        let paragraph = Paragraph::default().with(crate::image::Image::new(id));
        assert_eq!(
            ParagraphLines::wrap(&paragraph, Pt(100.0), &ctx),
            Err(LayoutError::UnknownImage(0))
        );
    }
}
