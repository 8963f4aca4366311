use std::{fmt, str::FromStr};

use crate::foundation::error::{PngStackError, PngStackResult};

/// Order of the colour channels within one pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelOrder {
    /// Red first: R, G, B.
    Rgb,
    /// Blue first: B, G, R.
    Bgr,
}

/// Recognized 8-bit source pixel layouts.
///
/// Every tag fixes both the channel count and the channel order.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// Three channels, red first.
    #[default]
    Rgb,
    /// Three channels, blue first.
    Bgr,
    /// Four channels, red first, alpha last.
    Rgba,
    /// Four channels, blue first, alpha last.
    Bgra,
}

impl PixelFormat {
    /// All formats, in token order.
    pub const ALL: [PixelFormat; 4] = [Self::Rgb, Self::Bgr, Self::Rgba, Self::Bgra];

    /// Bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::Rgb | Self::Bgr => 3,
            Self::Rgba | Self::Bgra => 4,
        }
    }

    /// Order of the colour channels.
    pub fn order(self) -> ChannelOrder {
        match self {
            Self::Rgb | Self::Rgba => ChannelOrder::Rgb,
            Self::Bgr | Self::Bgra => ChannelOrder::Bgr,
        }
    }

    /// Whether the layout carries an alpha byte.
    pub fn has_alpha(self) -> bool {
        self.channels() == 4
    }

    /// The 4-channel layout a canvas initialized with this format stores and encodes.
    pub fn encoding_format(self) -> PixelFormat {
        match self.order() {
            ChannelOrder::Rgb => Self::Rgba,
            ChannelOrder::Bgr => Self::Bgra,
        }
    }

    /// Lowercase name as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Bgr => "bgr",
            Self::Rgba => "rgba",
            Self::Bgra => "bgra",
        }
    }
}

impl FromStr for PixelFormat {
    type Err = PngStackError;

    fn from_str(s: &str) -> PngStackResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| {
                PngStackError::format(format!(
                    "'{s}' is not one of 'rgb', 'bgr', 'rgba' or 'bgra'"
                ))
            })
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/format.rs"]
mod tests;
