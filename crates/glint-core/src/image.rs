//! Image representation for the adaptation pipeline.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BufferError;

/// A single 8-bit ARGB pixel.
///
/// Field order matches the packed `0xAARRGGBB` layout, so a pixel slice can
/// be viewed directly as ARGB bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct Pixel {
    /// Alpha. Passed through every operation untouched.
    pub a: u8,
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Pixel {
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Fully opaque pixel.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(255, r, g, b)
    }

    /// Unpack a `0xAARRGGBB` word.
    pub const fn from_argb_u32(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Pack into a `0xAARRGGBB` word.
    pub const fn to_argb_u32(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Mean of the three color channels, truncated.
    pub const fn average(self) -> u8 {
        ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8
    }

    /// `true` when every color channel is strictly above `255 - threshold`.
    pub const fn is_near_white(self, threshold: u8) -> bool {
        let floor = 255 - threshold;
        self.r > floor && self.g > floor && self.b > floor
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.to_argb_u32())
    }
}

/// Row-major 8-bit ARGB image.
///
/// Invariant: `pixels.len() == width * height`. Construct through
/// [`PixelBuffer::new`] or the other constructors; fields are read-only
/// outside the crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// Wrap a flat pixel vector, checking it matches `width × height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, BufferError> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(BufferError::SizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// A `width × height` buffer where every pixel is `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self, BufferError> {
        let count = pixel_count(width, height)?;
        Ok(Self { width, height, pixels: vec![pixel; count] })
    }

    /// The 0×0 buffer.
    pub const fn empty() -> Self {
        Self { width: 0, height: 0, pixels: Vec::new() }
    }

    /// Build from packed ARGB bytes (4 bytes per pixel, row-major).
    pub fn from_argb_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, BufferError> {
        let expected = pixel_count(width, height)?;
        let expected_bytes = expected
            .checked_mul(4)
            .ok_or(BufferError::TooLarge { width, height })?;
        if bytes.len() != expected_bytes {
            return Err(BufferError::SizeMismatch {
                width,
                height,
                expected,
                actual: bytes.len() / 4,
            });
        }
        let pixels = bytemuck::cast_slice::<u8, Pixel>(bytes).to_vec();
        Ok(Self { width, height, pixels })
    }

    /// Construct without re-checking the length. Callers in this crate
    /// derive `pixels` from an already-valid buffer.
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<Pixel>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self { width, height, pixels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// `true` when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    /// Bounds-checked pixel lookup.
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Iterate over rows, top to bottom. Yields nothing for an empty buffer.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Pixel]> + '_ {
        // chunks_exact panics on a zero chunk size; a zero-width buffer has no pixels anyway.
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }

    /// Iterate over `(x, y, pixel)` in row-major order.
    pub fn enumerate_pixels(&self) -> impl Iterator<Item = (u32, u32, Pixel)> + '_ {
        self.rows().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, px)| (x as u32, y as u32, *px))
        })
    }

    /// View the pixel data as packed ARGB bytes.
    pub fn as_argb_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

/// Pixel count for `width × height`, rejecting sizes whose pixel storage
/// could not be allocated (`Vec` caps allocations at `isize::MAX` bytes).
fn pixel_count(width: u32, height: u32) -> Result<usize, BufferError> {
    (width as usize)
        .checked_mul(height as usize)
        .filter(|count| {
            count
                .checked_mul(size_of::<Pixel>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or(BufferError::TooLarge { width, height })
}
