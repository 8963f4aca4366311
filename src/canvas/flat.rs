use crate::{
    encode::png::{EncodedImage, ImageCodec, PngCodec},
    foundation::error::PngStackResult,
    pixel::format::PixelFormat,
};

/// A caller-owned buffer encoded as-is, without compositing or conversion.
///
/// The declared dimensions are trusted here; the codec rejects a buffer whose length does not
/// match `width * height * channels`.
#[derive(Clone, Copy, Debug)]
pub struct FlatImage<'a> {
    pixels: &'a [u8],
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl<'a> FlatImage<'a> {
    /// Wrap `pixels`, laid out row-major in `format`.
    pub fn new(pixels: &'a [u8], width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            pixels,
            width,
            height,
            format,
        }
    }

    /// Declared width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Declared height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Declared layout.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Encode as PNG with default settings.
    pub fn encode(&self) -> PngStackResult<EncodedImage> {
        self.encode_with(&PngCodec::default())
    }

    /// Encode with `codec`, passing the buffer and its format through unchanged.
    pub fn encode_with<C: ImageCodec + ?Sized>(&self, codec: &C) -> PngStackResult<EncodedImage> {
        codec.encode(self.pixels, self.width, self.height, self.format)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/flat.rs"]
mod tests;
