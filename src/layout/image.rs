use super::flow::PageFlow;
use super::LayoutContext;
use crate::error::LayoutError;
use crate::image::{Image, ImageData};
use crate::metrics::FontMetrics;
use crate::page::ImageLayout;
use crate::rect::Rect;
use crate::units::Pt;

/// The size an image is drawn at.
///
/// Both requested dimensions are used as-is. A single requested dimension derives the
/// other as `given × (intrinsic other / intrinsic given)` when the image keeps its
/// ratio, or takes the intrinsic size otherwise. With nothing requested the image is
/// drawn at its intrinsic size, one point per pixel.
pub fn resolve_image_size(image: &Image, data: &ImageData) -> (Pt, Pt) {
    let intrinsic_width = Pt(data.width);
    let intrinsic_height = Pt(data.height);
    match (image.requested_width(), image.requested_height()) {
        (Some(width), Some(height)) => (width, height),
        (Some(width), None) if image.keep_ratio() => {
            (width, width * data.height / data.width)
        }
        (None, Some(height)) if image.keep_ratio() => {
            (height * data.width / data.height, height)
        }
        (Some(width), None) => (width, intrinsic_height),
        (None, Some(height)) => (intrinsic_width, height),
        (None, None) => (intrinsic_width, intrinsic_height),
    }
}

/// Place an image as a block of its own at the left edge of the content area
pub fn layout_image<M: FontMetrics + ?Sized>(
    image: &Image,
    flow: &mut PageFlow,
    ctx: &LayoutContext<'_, M>,
) -> Result<(), LayoutError> {
    let data = ctx
        .images
        .get(image.id)
        .ok_or(LayoutError::UnknownImage(image.id.index()))?;
    let (width, height) = resolve_image_size(image, data);
    let top = flow
        .place(height)
        .map_err(|o| LayoutError::ImageTooTall {
            height: o.height,
            available: o.available,
        })?;
    let left = flow.content_box().x1;
    flow.page_mut().add_image(ImageLayout {
        image: image.id,
        position: Rect::from_origin(left, top, width, height),
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use id_arena::Arena;
    use image::DynamicImage;

    fn fixture() -> (Arena<ImageData>, Image) {
        let mut arena = Arena::new();
        let data = ImageData::from_dynamic(DynamicImage::new_rgb8(300, 100)).unwrap();
        let id = arena.alloc(data);
        (arena, Image::new(id))
    }

    #[test]
    fn height_derives_width_from_ratio() {
        let (arena, image) = fixture();
        let image = image.with_height(Pt(12.0), true).unwrap();
        assert_eq!(resolve_image_size(&image, &arena[image.id]), (Pt(36.0), Pt(12.0)));
    }

    #[test]
    fn width_derives_height_from_ratio() {
        let (arena, image) = fixture();
        let image = image.with_width(Pt(60.0), true).unwrap();
        assert_eq!(resolve_image_size(&image, &arena[image.id]), (Pt(60.0), Pt(20.0)));
    }

    #[test]
    fn explicit_sizes_may_distort() {
        let (arena, image) = fixture();
        let image = image
            .with_width(Pt(10.0), false)
            .and_then(|i| i.with_height(Pt(10.0), false))
            .unwrap();
        assert_eq!(resolve_image_size(&image, &arena[image.id]), (Pt(10.0), Pt(10.0)));
    }

    #[test]
    fn unconstrained_dimension_keeps_intrinsic_size() {
        let (arena, image) = fixture();
        let stretched = image.with_height(Pt(12.0), false).unwrap();
        assert_eq!(
            resolve_image_size(&stretched, &arena[image.id]),
            (Pt(300.0), Pt(12.0))
        );
        assert_eq!(
            resolve_image_size(&image, &arena[image.id]),
            (Pt(300.0), Pt(100.0))
        );
    }

    #[test]
    fn block_images_flow_like_lines() {
        let (arena, image) = fixture();
        let options = crate::options::LayoutOptions::default();
        let metrics = crate::metrics::MonospaceMetrics::default();
        let ctx = LayoutContext {
            metrics: &metrics,
            images: &arena,
            options: &options,
        };
        let style = crate::page::PageStyle::custom(
            Pt(400.0),
            Pt(160.0),
            crate::layout::Margins::all(Pt(10.0)),
        )
        .unwrap();
        let mut flow = PageFlow::new(style);
        layout_image(&image, &mut flow, &ctx).unwrap();
        layout_image(&image, &mut flow, &ctx).unwrap();
        let pages = flow.finish();
        assert_eq!(pages.len(), 2);
        assert_eq!(
            pages[1].contents,
            vec![crate::page::PageContents::Image(ImageLayout {
                image: image.id,
                position: Rect::from_origin(Pt(10.0), Pt(10.0), Pt(300.0), Pt(100.0)),
            })]
        );

        let huge = image.with_height(Pt(500.0), true).unwrap();
        let mut flow = PageFlow::new(style);
        assert_eq!(
            layout_image(&huge, &mut flow, &ctx),
            Err(LayoutError::ImageTooTall {
                height: Pt(500.0),
                available: Pt(140.0)
            })
        );
    }

    #[test]
    fn non_positive_requests_are_rejected() {
        let (_, image) = fixture();
        assert!(image.with_height(Pt(0.0), true).is_err());
        assert!(image.with_width(Pt(-5.0), true).is_err());
    }
}
