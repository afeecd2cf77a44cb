//! Image decoding, EXIF orientation and encoding for the demo.

use std::io::Cursor;
use std::path::Path;

use glint_core::error::BufferError;
use glint_core::image::{Pixel, PixelBuffer};
use glint_core::orientation::Orientation;

/// A decoded image plus the orientation read from its metadata.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub buffer: PixelBuffer,
    pub orientation: Orientation,
}

/// Load an image from disk and convert it to an ARGB `PixelBuffer`.
///
/// Supports the formats enabled in the `image` crate (PNG, JPEG, TIFF, ...).
/// A file without EXIF orientation gets [`Orientation::Undefined`].
pub fn load_image(path: &Path) -> Result<LoadedImage, ImageLoadError> {
    let bytes = std::fs::read(path)?;
    load_image_from_bytes(&bytes)
}

/// Decode an in-memory image file.
pub fn load_image_from_bytes(bytes: &[u8]) -> Result<LoadedImage, ImageLoadError> {
    let img = image::load_from_memory(bytes).map_err(ImageLoadError::Decode)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let pixels: Vec<Pixel> = rgba
        .pixels()
        .map(|p| Pixel::new(p.0[3], p.0[0], p.0[1], p.0[2]))
        .collect();

    let exif_code = read_exif_orientation(bytes);
    let orientation = Orientation::from_exif_opt(exif_code);
    tracing::debug!("decoded {width}x{height}, exif orientation {exif_code:?} -> {orientation}");

    Ok(LoadedImage {
        buffer: PixelBuffer::new(width, height, pixels)?,
        orientation,
    })
}

/// Read the EXIF orientation tag. `None` if there is no EXIF block or no tag.
pub fn read_exif_orientation(bytes: &[u8]) -> Option<u32> {
    let mut cursor = Cursor::new(bytes);
    let exif = exif::Reader::new().read_from_container(&mut cursor).ok()?;
    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    field.value.get_uint(0)
}

/// Convert back to RGBA and write to `path`. Format follows the extension.
pub fn save_image(buffer: &PixelBuffer, path: &Path) -> Result<(), ImageLoadError> {
    to_rgba_image(buffer)
        .save(path)
        .map_err(ImageLoadError::Encode)
}

fn to_rgba_image(buffer: &PixelBuffer) -> image::RgbaImage {
    let (width, height) = buffer.dimensions();
    image::RgbaImage::from_fn(width, height, |x, y| {
        let px = buffer.get(x, y).unwrap_or_default();
        image::Rgba([px.r, px.g, px.b, px.a])
    })
}

/// Errors that can occur while loading or saving an image.
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x * 40) as u8, (y * 60) as u8, 90, 200])
        });
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)
            .expect("encode test png");
        out.into_inner()
    }

    #[test]
    fn test_png_decodes_to_argb() {
        let loaded = load_image_from_bytes(&make_test_png(3, 2)).unwrap();
        assert_eq!(loaded.buffer.dimensions(), (3, 2));
        assert_eq!(loaded.buffer.get(2, 1), Some(Pixel::new(200, 80, 60, 90)));
    }

    #[test]
    fn test_png_without_exif_is_undefined() {
        let png = make_test_png(2, 2);
        assert_eq!(read_exif_orientation(&png), None);
        assert_eq!(load_image_from_bytes(&png).unwrap().orientation, Orientation::Undefined);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = load_image_from_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, ImageLoadError::Decode(_)));
    }

    #[test]
    fn test_rgba_conversion_keeps_channels() {
        let buffer = PixelBuffer::new(
            2,
            1,
            vec![Pixel::new(10, 20, 30, 40), Pixel::new(50, 60, 70, 80)],
        )
        .unwrap();
        let img = to_rgba_image(&buffer);
        assert_eq!(img.get_pixel(0, 0).0, [20, 30, 40, 10]);
        assert_eq!(img.get_pixel(1, 0).0, [60, 70, 80, 50]);
    }
}
