use crate::error::{ConfigError, PDFError};
use crate::style::check_positive;
use crate::units::Pt;
use image::DynamicImage;
use std::path::Path;

/// Handle to an image stored in a [Document](crate::Document)
pub type ImageId = id_arena::Id<ImageData>;

/// A decoded bitmap. Images are stored once in the document and referenced by
/// [ImageId] from any number of [Image] elements.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub(crate) image: DynamicImage,
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl ImageData {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ImageData, PDFError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Decode an image in any format supported by the [image] crate
    pub fn from_bytes(data: &[u8]) -> Result<ImageData, PDFError> {
        let image = image::load_from_memory(data)?;
        Ok(Self::from_dynamic(image)?)
    }

    /// Wrap an already decoded image. Images without pixels have no size to scale
    /// from and are refused.
    pub fn from_dynamic(image: DynamicImage) -> Result<ImageData, ConfigError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ConfigError::EmptyImage {
                width: image.width(),
                height: image.height(),
            });
        }
        let width = image.width() as f32;
        let height = image.height() as f32;
        Ok(ImageData {
            image,
            width,
            height,
        })
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Intrinsic width in pixels
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Intrinsic height in pixels
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

/// A placement of a stored image, with an optional requested size.
///
/// With `keep_ratio` set (the default), a single requested dimension derives the
/// other from the intrinsic aspect ratio; otherwise the missing dimension keeps its
/// intrinsic size. Giving both dimensions uses them as-is, even if that distorts.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Image {
    pub id: ImageId,
    width: Option<Pt>,
    height: Option<Pt>,
    keep_ratio: bool,
}

impl Image {
    pub fn new(id: ImageId) -> Image {
        Image {
            id,
            width: None,
            height: None,
            keep_ratio: true,
        }
    }

    pub fn with_width<P: Into<Pt>>(self, width: P, keep_ratio: bool) -> Result<Image, ConfigError> {
        let width = width.into();
        check_positive("image width", width)?;
        Ok(Image {
            width: Some(width),
            keep_ratio,
            ..self
        })
    }

    pub fn with_height<P: Into<Pt>>(
        self,
        height: P,
        keep_ratio: bool,
    ) -> Result<Image, ConfigError> {
        let height = height.into();
        check_positive("image height", height)?;
        Ok(Image {
            height: Some(height),
            keep_ratio,
            ..self
        })
    }

    pub fn requested_width(&self) -> Option<Pt> {
        self.width
    }

    pub fn requested_height(&self) -> Option<Pt> {
        self.height
    }

    pub fn keep_ratio(&self) -> bool {
        self.keep_ratio
    }
}
