use std::borrow::Cow;

use image::{
    ExtendedColorType, ImageEncoder,
    codecs::png::{CompressionType, FilterType, PngEncoder},
};

use crate::{
    foundation::error::{PngStackError, PngStackResult},
    pixel::{
        convert::swap_rb_in_place,
        format::{ChannelOrder, PixelFormat},
    },
};

/// zlib effort used by [`PngCodec`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Balanced speed and size.
    #[default]
    Default,
    /// Fastest encode, larger files.
    Fast,
    /// Smallest files, slowest encode.
    Best,
}

impl From<Compression> for CompressionType {
    fn from(c: Compression) -> Self {
        match c {
            Compression::Default => CompressionType::Default,
            Compression::Fast => CompressionType::Fast,
            Compression::Best => CompressionType::Best,
        }
    }
}

/// PNG encoder settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeConfig {
    /// zlib effort.
    pub compression: Compression,
}

impl EncodeConfig {
    /// Replace the compression level.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }
}

/// Bytes produced by a codec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    bytes: Vec<u8>,
}

impl EncodedImage {
    /// Wrap already-encoded bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the codec produced nothing.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take ownership of the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Compresses a finished pixel buffer into an image file.
///
/// Implementations report failures as [`PngStackError::Encoding`].
pub trait ImageCodec {
    /// Encode `pixels`, laid out row-major in `format`, as a `width` x `height` image.
    fn encode(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> PngStackResult<EncodedImage>;
}

/// PNG codec backed by the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngCodec {
    cfg: EncodeConfig,
}

impl PngCodec {
    /// Codec with the given settings.
    pub fn new(cfg: EncodeConfig) -> Self {
        Self { cfg }
    }

    /// Current settings.
    pub fn config(&self) -> EncodeConfig {
        self.cfg
    }
}

impl ImageCodec for PngCodec {
    fn encode(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> PngStackResult<EncodedImage> {
        if width == 0 || height == 0 {
            return Err(PngStackError::encoding(format!(
                "png width/height must be non-zero, got {width}x{height}"
            )));
        }
        let channels = format.channels();
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| PngStackError::encoding("png dimensions overflow"))?;
        if pixels.len() != expected {
            return Err(PngStackError::encoding(format!(
                "pixel buffer holds {} bytes, {width}x{height} {format} needs {expected}",
                pixels.len()
            )));
        }

        // PNG only stores red-first samples.
        let data: Cow<'_, [u8]> = match format.order() {
            ChannelOrder::Rgb => Cow::Borrowed(pixels),
            ChannelOrder::Bgr => {
                let mut scratch = pixels.to_vec();
                swap_rb_in_place(&mut scratch, channels);
                Cow::Owned(scratch)
            }
        };
        let color = if format.has_alpha() {
            ExtendedColorType::Rgba8
        } else {
            ExtendedColorType::Rgb8
        };

        let mut out = Vec::new();
        PngEncoder::new_with_quality(&mut out, self.cfg.compression.into(), FilterType::Adaptive)
            .write_image(&data, width, height, color)
            .map_err(|e| PngStackError::encoding(e.to_string()))?;

        tracing::debug!(width, height, %format, png_len = out.len(), "encoded png");
        Ok(EncodedImage::new(out))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
