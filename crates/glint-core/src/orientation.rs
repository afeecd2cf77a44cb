//! Rotating a buffer into upright presentation.
//!
//! Rotations are clockwise. For a `W×H` source:
//!
//! ```text
//! Rotate90:  out(x', y') = in(y', H-1-x')    output H×W
//! Rotate180: out(x,  y ) = in(W-1-x, H-1-y)  output W×H
//! Rotate270: out(x', y') = in(W-1-y', x')    output H×W
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::image::PixelBuffer;

/// Clockwise rotation needed to present a buffer upright.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// No orientation metadata. Treated as [`Orientation::Normal`].
    #[default]
    Undefined,
    Normal,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Orientation {
    /// Map an EXIF orientation tag (0x0112) value.
    ///
    /// Only the pure rotations are recognized. Mirrored codes (2, 4, 5, 7)
    /// and anything out of range become [`Orientation::Undefined`].
    pub const fn from_exif(code: u32) -> Self {
        match code {
            1 => Self::Normal,
            3 => Self::Rotate180,
            6 => Self::Rotate90,
            8 => Self::Rotate270,
            _ => Self::Undefined,
        }
    }

    /// Like [`Orientation::from_exif`], with absent metadata as `Undefined`.
    pub const fn from_exif_opt(code: Option<u32>) -> Self {
        match code {
            Some(code) => Self::from_exif(code),
            None => Self::Undefined,
        }
    }

    /// Whether applying this orientation swaps width and height.
    pub const fn swaps_dimensions(self) -> bool {
        matches!(self, Self::Rotate90 | Self::Rotate270)
    }

    /// Clockwise rotation in degrees.
    pub const fn degrees(self) -> u32 {
        match self {
            Self::Undefined | Self::Normal => 0,
            Self::Rotate90 => 90,
            Self::Rotate180 => 180,
            Self::Rotate270 => 270,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            other => write!(f, "{}°", other.degrees()),
        }
    }
}

/// Return `buffer` rotated into upright presentation.
///
/// `Undefined` and `Normal` return an equal copy. The input is never modified.
pub fn normalize(buffer: &PixelBuffer, orientation: Orientation) -> PixelBuffer {
    let (w, h) = buffer.dimensions();
    match orientation {
        Orientation::Undefined | Orientation::Normal => buffer.clone(),
        Orientation::Rotate180 => {
            let mut pixels = buffer.pixels().to_vec();
            pixels.reverse();
            PixelBuffer::from_parts(w, h, pixels)
        }
        Orientation::Rotate90 => remap(buffer, h, w, |x, y| (y, h - 1 - x)),
        Orientation::Rotate270 => remap(buffer, h, w, |x, y| (w - 1 - y, x)),
    }
}

/// Build an `out_w × out_h` buffer where `out(x, y) = in(source(x, y))`.
fn remap(
    buffer: &PixelBuffer,
    out_w: u32,
    out_h: u32,
    source: impl Fn(u32, u32) -> (u32, u32),
) -> PixelBuffer {
    let src = buffer.pixels();
    let src_w = buffer.width() as usize;
    let mut pixels = Vec::with_capacity(src.len());
    for y in 0..out_h {
        for x in 0..out_w {
            let (sx, sy) = source(x, y);
            pixels.push(src[sy as usize * src_w + sx as usize]);
        }
    }
    PixelBuffer::from_parts(out_w, out_h, pixels)
}
