use std::{path::Path, sync::Arc};

use image::{ImageFormat, RgbaImage};

use crate::NaturalSize;

const UNKNOWN_MIME: &str = "application/octet-stream";

/// A user supplied file, either picked, dropped or fetched as placeholder
#[derive(Clone)]
pub struct ImageFile {
    pub name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageFile {
    pub fn new(
        name: impl Into<String>,
        mime: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime)
    }
}

pub fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Native file systems don't report a MIME type, the extension has to do.
pub fn mime_from_path(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|f| f.to_mime_type())
        .unwrap_or(UNKNOWN_MIME)
}

pub fn mime_from_bytes(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .map(|f| f.to_mime_type())
        .unwrap_or(UNKNOWN_MIME)
}

#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("Not an image: {mime:?}")]
    InvalidImageType { mime: String },
    #[error("Cannot decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Image has no pixels")]
    EmptyImage,
}

/// Decoded image with its pixel dimensions
#[derive(Clone)]
pub struct LoadedImage {
    pub natural: NaturalSize,
    pub pixels: Arc<RgbaImage>,
}

impl std::fmt::Debug for LoadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedImage")
            .field("natural", &self.natural)
            .finish_non_exhaustive()
    }
}

impl LoadedImage {
    pub fn from_rgba(pixels: RgbaImage) -> Result<Self, ImageLoadError> {
        let natural =
            NaturalSize::new(pixels.width(), pixels.height()).ok_or(ImageLoadError::EmptyImage)?;
        Ok(Self {
            natural,
            pixels: Arc::new(pixels),
        })
    }

    /// Pixels for uploading as texture. Images with a side above `max_side`
    /// are scaled down, the natural size stays untouched.
    pub fn to_color_image(&self, max_side: usize) -> egui::ColorImage {
        let (width, height) = self.pixels.dimensions();
        let longest = width.max(height) as usize;
        let display = if longest > max_side {
            let scale = max_side as f32 / longest as f32;
            let w = ((width as f32 * scale) as u32).max(1);
            let h = ((height as f32 * scale) as u32).max(1);
            log::debug!("Downscale {width}x{height} to {w}x{h} for display");
            std::borrow::Cow::Owned(image::imageops::resize(
                &*self.pixels,
                w,
                h,
                image::imageops::FilterType::Triangle,
            ))
        } else {
            std::borrow::Cow::Borrowed(&*self.pixels)
        };
        egui::ColorImage::from_rgba_unmultiplied(
            [display.width() as usize, display.height() as usize],
            display.as_raw(),
        )
    }
}

/// Checks the MIME type, then decodes. Nothing is decoded for non-image files.
pub fn decode_image(file: &ImageFile) -> Result<LoadedImage, ImageLoadError> {
    if !file.is_image() {
        return Err(ImageLoadError::InvalidImageType {
            mime: file.mime.clone(),
        });
    }
    let decoded = image::load_from_memory(&file.bytes)?;
    LoadedImage::from_rgba(decoded.into_rgba8())
}
