use image::{ImageFormat, Pixel, Rgba, RgbaImage};

use crate::{DisplaySize, NaturalSize, Stroke};

pub const MASK_FILE_NAME: &str = "mask.png";

/// `rgba(255, 255, 255, 0.5)`
pub const MASK_FILL: Rgba<u8> = Rgba([255, 255, 255, 128]);

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Cannot encode mask: {0}")]
    Encode(#[source] image::ImageError),
    #[error("Cannot write mask: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot start download: {0}")]
    Download(String),
}

/// A rasterized mask at the image's natural resolution
#[derive(Debug, Clone)]
pub struct MaskExport {
    pub image: RgbaImage,
}

impl MaskExport {
    pub fn file_name(&self) -> &'static str {
        MASK_FILE_NAME
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(ExportError::Encode)?;
        Ok(bytes)
    }
}

/// Paints all strokes onto a transparent surface of `natural` size.
///
/// Positions are scaled per axis, but the radius only uses the horizontal
/// scale, so non-uniform scaling yields circles rather than ellipses.
/// Returns `None` when the display has no area yet.
pub fn rasterize_mask(
    strokes: &[Stroke],
    display: DisplaySize,
    natural: NaturalSize,
) -> Option<RgbaImage> {
    if display.is_empty() {
        return None;
    }
    let (width, height) = (natural.width.get(), natural.height.get());
    let mut surface = RgbaImage::new(width, height);

    let scale_x = width as f32 / display.width;
    let scale_y = height as f32 / display.height;

    for stroke in strokes {
        let cx = stroke.x * scale_x;
        let cy = stroke.y * scale_y;
        let radius = stroke.size * scale_x / 2.0;
        fill_circle(&mut surface, cx, cy, radius, MASK_FILL);
    }
    Some(surface)
}

/// Source-over fill of every pixel whose center lies within `radius`.
fn fill_circle(surface: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    if radius <= 0.0 {
        return;
    }
    let (width, height) = surface.dimensions();
    let clamp = |v: f32, max: u32| v.clamp(0.0, max as f32) as u32;
    let x_start = clamp((cx - radius).floor(), width);
    let x_end = clamp((cx + radius).ceil(), width);
    let y_start = clamp((cy - radius).floor(), height);
    let y_end = clamp((cy + radius).ceil(), height);
    let r2 = radius * radius;

    for y in y_start..y_end {
        let dy = y as f32 + 0.5 - cy;
        for x in x_start..x_end {
            let dx = x as f32 + 0.5 - cx;
            if dx * dx + dy * dy <= r2 {
                let pixel = surface.get_pixel_mut(x, y);
                if pixel.0[3] == 0 {
                    *pixel = color;
                } else {
                    pixel.blend(&color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;

    fn stroke(x: f32, y: f32, size: f32) -> Stroke {
        Stroke::new(Pos2::new(x, y), size)
    }

    fn natural(w: u32, h: u32) -> NaturalSize {
        NaturalSize::new(w, h).unwrap()
    }

    fn display(width: f32, height: f32) -> DisplaySize {
        DisplaySize { width, height }
    }

    fn is_filled(img: &RgbaImage, x: u32, y: u32) -> bool {
        img.get_pixel(x, y).0[3] > 0
    }

    #[test]
    fn scales_stroke_into_natural_space() {
        let img = rasterize_mask(
            &[stroke(100.0, 100.0, 20.0)],
            display(400.0, 300.0),
            natural(800, 600),
        )
        .unwrap();
        assert_eq!(img.dimensions(), (800, 600));
        assert_eq!(*img.get_pixel(200, 200), MASK_FILL);

        // radius 20 around (200, 200)
        assert!(is_filled(&img, 219, 200));
        assert!(is_filled(&img, 180, 200));
        assert!(is_filled(&img, 200, 219));
        assert!(!is_filled(&img, 220, 200));
        assert!(!is_filled(&img, 200, 221));
        assert!(!is_filled(&img, 215, 215));
        assert!(!is_filled(&img, 0, 0));
    }

    #[test]
    fn background_stays_transparent() {
        let img = rasterize_mask(&[], display(400.0, 300.0), natural(80, 60)).unwrap();
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn radius_uses_horizontal_scale_only() {
        // scale_x = 1, scale_y = 4
        let img = rasterize_mask(
            &[stroke(50.0, 10.0, 20.0)],
            display(100.0, 25.0),
            natural(100, 100),
        )
        .unwrap();
        assert!(is_filled(&img, 50, 40));
        assert!(is_filled(&img, 50, 49));
        assert!(!is_filled(&img, 50, 51));
        assert!(!is_filled(&img, 50, 29));
    }

    #[test]
    fn overlapping_strokes_accumulate_alpha() {
        let img = rasterize_mask(
            &[stroke(10.0, 10.0, 10.0), stroke(12.0, 10.0, 10.0)],
            display(40.0, 40.0),
            natural(40, 40),
        )
        .unwrap();
        let single = img.get_pixel(6, 10).0[3];
        let overlap = img.get_pixel(11, 10).0[3];
        assert_eq!(single, 128);
        assert!(overlap > 128 && overlap < 255, "alpha {overlap}");
    }

    #[test]
    fn zero_area_display_is_a_no_op() {
        let strokes = [stroke(1.0, 1.0, 10.0)];
        assert!(rasterize_mask(&strokes, display(0.0, 300.0), natural(800, 600)).is_none());
        assert!(rasterize_mask(&strokes, display(400.0, 0.0), natural(800, 600)).is_none());
    }

    #[test]
    fn strokes_partly_off_surface_are_clipped() {
        let img = rasterize_mask(
            &[stroke(-2.0, 5.0, 10.0), stroke(300.0, 300.0, 10.0)],
            display(10.0, 10.0),
            natural(10, 10),
        )
        .unwrap();
        assert!(is_filled(&img, 0, 5));
        assert!(!is_filled(&img, 9, 9));
    }

    #[test]
    fn encodes_png_with_natural_dimensions() {
        let export = MaskExport {
            image: rasterize_mask(
                &[stroke(5.0, 5.0, 4.0)],
                display(10.0, 10.0),
                natural(30, 20),
            )
            .unwrap(),
        };
        let bytes = export.encode_png().unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (30, 20));
        assert_eq!(export.file_name(), "mask.png");
    }
}
