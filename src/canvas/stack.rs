use crate::{
    encode::png::{EncodedImage, ImageCodec, PngCodec},
    foundation::core::{CanvasSize, TileRect},
    foundation::error::{GeometryError, PngStackError, PngStackResult},
    pixel::{convert::PixelMapping, format::PixelFormat},
};

/// Byte value every canvas byte starts at (opaque white).
pub const CLEAR_BYTE: u8 = 0xFF;

/// Fixed-size 4-channel canvas that tiles are blitted into before encoding.
///
/// Pixels are stored row-major, top to bottom, 4 bytes each in [`PixelCanvas::encoding_format`]
/// order. There is no internal locking; share a canvas across threads only behind a mutex.
#[derive(Clone, Debug)]
pub struct PixelCanvas {
    size: CanvasSize,
    encoding_format: PixelFormat,
    pixels: Vec<u8>,
}

/// A blit request that passed validation, in unsigned canvas coordinates.
#[derive(Clone, Copy, Debug)]
struct CheckedTile {
    x: usize,
    y: usize,
    w: usize,
    h: usize,
}

impl PixelCanvas {
    /// Allocate a `width` x `height` canvas filled with opaque white.
    ///
    /// `format` only selects the stored channel order: red-first formats store RGBA,
    /// blue-first formats store BGRA.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> PngStackResult<Self> {
        let size = CanvasSize::new(width, height)?;
        let len = size.byte_len(4).ok_or_else(|| {
            PngStackError::allocation(format!("{width}x{height} canvas exceeds addressable memory"))
        })?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|e| {
            PngStackError::allocation(format!("failed to reserve {len} bytes for canvas: {e}"))
        })?;
        pixels.resize(len, CLEAR_BYTE);

        Ok(Self {
            size,
            encoding_format: format.encoding_format(),
            pixels,
        })
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Stored (and encoded) layout: [`PixelFormat::Rgba`] or [`PixelFormat::Bgra`].
    pub fn encoding_format(&self) -> PixelFormat {
        self.encoding_format
    }

    /// The whole buffer, `width * height * 4` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The 4 stored bytes of pixel `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let off = self.offset(x as usize, y as usize);
        let px = &self.pixels[off..off + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy `source` pixels in `format` into `rect`, converting to the stored layout.
    ///
    /// The whole request is validated first; on error the canvas is untouched. Bytes outside
    /// `rect` are never written, and later blits overwrite earlier ones.
    pub fn blit(
        &mut self,
        source: &[u8],
        format: PixelFormat,
        rect: TileRect,
    ) -> PngStackResult<()> {
        let tile = self.check(source, format, rect)?;
        tracing::debug!(?rect, %format, "blit tile");

        let mapping = PixelMapping::new(format, self.encoding_format.order());
        let src_row = tile.w * format.channels();
        if src_row == 0 {
            return Ok(());
        }
        for (i, src) in source.chunks_exact(src_row).take(tile.h).enumerate() {
            let start = self.offset(tile.x, tile.y + i);
            let dst = &mut self.pixels[start..start + tile.w * 4];
            mapping.apply_row(src, dst);
        }
        Ok(())
    }

    /// Encode the current contents as PNG with default settings.
    pub fn finish(&self) -> PngStackResult<EncodedImage> {
        self.finish_with(&PngCodec::default())
    }

    /// Encode the current contents with `codec`.
    ///
    /// Does not modify the canvas; repeated calls re-encode whatever is there now.
    #[tracing::instrument(skip_all, fields(width = self.size.width, height = self.size.height))]
    pub fn finish_with<C: ImageCodec + ?Sized>(&self, codec: &C) -> PngStackResult<EncodedImage> {
        codec.encode(
            &self.pixels,
            self.size.width,
            self.size.height,
            self.encoding_format,
        )
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.size.width as usize + x) * 4
    }

    fn check(
        &self,
        source: &[u8],
        format: PixelFormat,
        rect: TileRect,
    ) -> Result<CheckedTile, GeometryError> {
        let (x, y, w, h) = (
            i64::from(rect.x),
            i64::from(rect.y),
            i64::from(rect.w),
            i64::from(rect.h),
        );
        let (width, height) = (self.size.width, self.size.height);

        if x < 0 {
            return Err(GeometryError::NegativeX);
        }
        if y < 0 {
            return Err(GeometryError::NegativeY);
        }
        if w < 0 {
            return Err(GeometryError::NegativeWidth);
        }
        if h < 0 {
            return Err(GeometryError::NegativeHeight);
        }
        if x >= i64::from(width) {
            return Err(GeometryError::XOutOfRange { x, width });
        }
        if y >= i64::from(height) {
            return Err(GeometryError::YOutOfRange { y, height });
        }
        if x + w > i64::from(width) {
            return Err(GeometryError::ExceedsWidth {
                right: x + w,
                width,
            });
        }
        if y + h > i64::from(height) {
            return Err(GeometryError::ExceedsHeight {
                bottom: y + h,
                height,
            });
        }

        // All four values are now within [0, canvas dimension], so they fit in usize.
        let tile = CheckedTile {
            x: x as usize,
            y: y as usize,
            w: w as usize,
            h: h as usize,
        };
        let expected = tile.w * tile.h * format.channels();
        if source.len() < expected {
            return Err(GeometryError::ShortSource {
                expected,
                actual: source.len(),
            });
        }
        Ok(tile)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/stack.rs"]
mod tests;
