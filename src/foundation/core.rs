use crate::foundation::error::{PngStackError, PngStackResult};

/// Caller-supplied tile placement.
///
/// Fields are signed because they arrive unchecked from the caller; [`crate::PixelCanvas::blit`]
/// rejects negative and out-of-range values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TileRect {
    /// Left edge in canvas pixels.
    pub x: i32,
    /// Top edge in canvas pixels.
    pub y: i32,
    /// Tile width in pixels.
    pub w: i32,
    /// Tile height in pixels.
    pub h: i32,
}

impl TileRect {
    /// Construct a rectangle from origin and size.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// Fixed canvas dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasSize {
    /// Validate and build a size; both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> PngStackResult<Self> {
        if width == 0 || height == 0 {
            return Err(PngStackError::validation(format!(
                "canvas width/height must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Byte length of a buffer with `bytes_per_pixel` bytes per pixel, if it fits in `usize`.
    pub fn byte_len(self, bytes_per_pixel: usize) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(bytes_per_pixel)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
