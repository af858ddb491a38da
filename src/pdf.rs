use crate::content::{render_page, Resources};
use crate::document::{PageSequence, PageSink};
use crate::image::ImageData;
use crate::page::PageContents;
use crate::refs::{ObjectReferences, RefType};
use crate::style::{FontFamily, FontVariant};
use crate::PDFError;
use image::GenericImageView;
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Name, Pdf};
use std::io::Write;

/// Serializes a page sequence as a PDF file using the standard Type1 fonts.
///
/// Glyphs come from the viewer's copy of each standard face, so lines are only drawn
/// where layout put them when the [FontMetrics](crate::FontMetrics) used for layout
/// measure those same faces.
pub struct PdfSink<W: Write> {
    writer: W,
}

impl<W: Write> PdfSink<W> {
    pub fn new(writer: W) -> PdfSink<W> {
        PdfSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// The fonts used anywhere in the document, in order of first use
struct FontTable {
    fonts: Vec<(FontFamily, FontVariant)>,
}

impl FontTable {
    fn collect(sequence: &PageSequence<'_>) -> FontTable {
        let mut fonts = Vec::new();
        for page in sequence.pages.iter() {
            for span in page.spans() {
                let font = (span.style.family, span.style.variant);
                if !fonts.contains(&font) {
                    fonts.push(font);
                }
            }
        }
        FontTable { fonts }
    }
}

impl Resources for FontTable {
    fn font_index(&self, family: FontFamily, variant: FontVariant) -> usize {
        self.fonts
            .iter()
            .position(|&f| f == (family, variant))
            .unwrap_or_default()
    }
}

struct EncodeOutput {
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

fn encode_raster(data: &ImageData) -> EncodeOutput {
    let image = &data.image;
    let level = CompressionLevel::DefaultLevel as u8;

    let mask = image.color().has_alpha().then(|| {
        let alphas: Vec<u8> = image.pixels().map(|p| (p.2).0[3]).collect();
        compress_to_vec_zlib(&alphas, level)
    });
    let bytes = compress_to_vec_zlib(image.to_rgb8().as_raw(), level);

    EncodeOutput { bytes, mask }
}

fn write_image(refs: &mut ObjectReferences, index: usize, data: &ImageData, writer: &mut Pdf) {
    let id = refs.get_or_gen(RefType::Image(index));
    let encoded = encode_raster(data);
    let (width, height) = data.image.dimensions();

    let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
    image.filter(Filter::FlateDecode);
    image.width(width as i32);
    image.height(height as i32);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    let mask_id = encoded
        .mask
        .as_ref()
        .map(|_| refs.get_or_gen(RefType::ImageMask(index)));
    if let Some(mask_id) = mask_id {
        image.s_mask(mask_id);
    }
    image.finish();

    if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
        let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
        s_mask.filter(Filter::FlateDecode);
        s_mask.width(width as i32);
        s_mask.height(height as i32);
        s_mask.color_space().device_gray();
        s_mask.bits_per_component(8);
    }
}

impl<W: Write> PageSink for PdfSink<W> {
    fn write_pages(&mut self, sequence: PageSequence<'_>) -> Result<(), PDFError> {
        let mut refs = ObjectReferences::new();
        let catalog_id = refs.get_or_gen(RefType::Catalog);
        let page_tree_id = refs.get_or_gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = sequence.info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<_> = (0..sequence.pages.len())
            .map(|i| refs.get_or_gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().copied());

        let fonts = FontTable::collect(&sequence);
        for (i, (family, variant)) in fonts.fonts.iter().enumerate() {
            let id = refs.get_or_gen(RefType::Font(i));
            writer
                .type1_font(id)
                .base_font(Name(family.base_font_name(*variant).as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        // only images some page actually shows are embedded
        let mut used: Vec<usize> = sequence
            .pages
            .iter()
            .flat_map(|page| page.contents.iter())
            .filter_map(|c| match c {
                PageContents::Image(image) => Some(image.image.index()),
                _ => None,
            })
            .collect();
        used.sort_unstable();
        used.dedup();
        for (id, data) in sequence.images.iter() {
            if used.binary_search(&id.index()).is_ok() {
                write_image(&mut refs, id.index(), data, &mut writer);
            }
        }

        for (i, page) in sequence.pages.iter().enumerate() {
            let content_id = refs.get_or_gen(RefType::ContentForPage(i));
            let page_height = page.style.height();

            let mut pdf_page = writer.page(page_refs[i]);
            pdf_page.media_box(pdf_writer::Rect::new(
                0.0,
                0.0,
                page.style.width().0,
                page_height.0,
            ));
            pdf_page.art_box(page.style.content_box().to_pdf(page_height));
            pdf_page.parent(page_tree_id);

            let mut resources = pdf_page.resources();
            let mut resource_fonts = resources.fonts();
            for f in 0..fonts.fonts.len() {
                if let Some(id) = refs.get(RefType::Font(f)) {
                    resource_fonts.pair(Name(format!("F{f}").as_bytes()), id);
                }
            }
            resource_fonts.finish();
            let mut resource_xobjects = resources.x_objects();
            for &image in used.iter() {
                if let Some(id) = refs.get(RefType::Image(image)) {
                    resource_xobjects.pair(Name(format!("I{image}").as_bytes()), id);
                }
            }
            resource_xobjects.finish();
            resources.finish();

            pdf_page.contents(content_id);
            pdf_page.finish();

            let rendered = render_page(page, &fonts)?;
            let compressed =
                compress_to_vec_zlib(&rendered, CompressionLevel::DefaultLevel as u8);
            writer
                .stream(content_id, compressed.as_slice())
                .filter(Filter::FlateDecode);
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        log::debug!("writing pdf of {} pages", sequence.pages.len());
        self.writer
            .write_all(writer.finish().as_slice())
            .map_err(Into::into)
    }
}
