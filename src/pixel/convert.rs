use crate::pixel::format::{ChannelOrder, PixelFormat};

/// Alpha written for 3-channel sources.
pub const SYNTHETIC_ALPHA: u8 = 0x00;

/// How the destination alpha byte is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlphaPolicy {
    /// Copy the source alpha byte through.
    Carry,
    /// Write a fixed value; the source has no alpha.
    Fill(u8),
}

/// Per-pixel mapping from a source layout onto a 4-channel target order.
///
/// Only [`PixelMapping::new`] builds one, so the channel count and alpha policy always agree
/// with the source format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelMapping {
    src_channels: usize,
    swap_rb: bool,
    alpha: AlphaPolicy,
}

impl PixelMapping {
    /// Mapping for `source` pixels written in `target` channel order.
    pub fn new(source: PixelFormat, target: ChannelOrder) -> Self {
        Self {
            src_channels: source.channels(),
            swap_rb: source.order() != target,
            alpha: if source.has_alpha() {
                AlphaPolicy::Carry
            } else {
                AlphaPolicy::Fill(SYNTHETIC_ALPHA)
            },
        }
    }

    /// Source bytes consumed per pixel.
    pub fn src_channels(self) -> usize {
        self.src_channels
    }

    /// Whether the first and third colour channels are swapped.
    pub fn swap_rb(self) -> bool {
        self.swap_rb
    }

    /// Destination alpha policy.
    pub fn alpha(self) -> AlphaPolicy {
        self.alpha
    }

    /// Convert one source pixel into 4 destination bytes.
    ///
    /// Returns `None` when `src` is shorter than one source pixel; extra bytes are ignored.
    pub fn apply(self, src: &[u8]) -> Option<[u8; 4]> {
        (src.len() >= self.src_channels).then(|| self.convert(src))
    }

    /// Convert a run of source pixels into `dst`, 4 bytes per pixel.
    ///
    /// `src` must hold exactly `dst.len() / 4` pixels.
    pub(crate) fn apply_row(self, src: &[u8], dst: &mut [u8]) {
        debug_assert_eq!(src.len() / self.src_channels, dst.len() / 4);
        for (s, d) in src
            .chunks_exact(self.src_channels)
            .zip(dst.chunks_exact_mut(4))
        {
            d.copy_from_slice(&self.convert(s));
        }
    }

    #[inline]
    fn convert(self, src: &[u8]) -> [u8; 4] {
        let (c0, c1, c2) = if self.swap_rb {
            (src[2], src[1], src[0])
        } else {
            (src[0], src[1], src[2])
        };
        let a = match self.alpha {
            AlphaPolicy::Carry => src[3],
            AlphaPolicy::Fill(v) => v,
        };
        [c0, c1, c2, a]
    }
}

/// Reorder a packed buffer between RGB and BGR order in place, leaving alpha untouched.
pub fn swap_rb_in_place(buf: &mut [u8], channels: usize) {
    for px in buf.chunks_exact_mut(channels) {
        px.swap(0, 2);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/convert.rs"]
mod tests;
