/// Convenience result type used across pngstack.
pub type PngStackResult<T> = Result<T, PngStackError>;

/// Top-level error taxonomy used by canvas, codec and manifest APIs.
#[derive(thiserror::Error, Debug)]
pub enum PngStackError {
    /// The canvas buffer could not be sized or reserved.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// A tile write request violated the canvas bounds.
    #[error("invalid geometry: {0}")]
    Geometry(#[from] GeometryError),

    /// Unrecognized pixel format token.
    #[error("invalid format: {0}")]
    Format(String),

    /// The codec failed to produce an image; the message is the codec's own.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Invalid user-provided dimensions, manifests or paths.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PngStackError {
    /// Build a [`PngStackError::Allocation`] value.
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build a [`PngStackError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Build a [`PngStackError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build a [`PngStackError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Returns the geometry violation if this is a [`PngStackError::Geometry`].
    pub fn as_geometry(&self) -> Option<&GeometryError> {
        match self {
            Self::Geometry(g) => Some(g),
            _ => None,
        }
    }
}

/// The specific bounds constraint a blit violated.
///
/// Checks run in declaration order, so the first violated constraint is the one reported.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// `x < 0`.
    #[error("coordinate x smaller than 0")]
    NegativeX,
    /// `y < 0`.
    #[error("coordinate y smaller than 0")]
    NegativeY,
    /// `w < 0`.
    #[error("width smaller than 0")]
    NegativeWidth,
    /// `h < 0`.
    #[error("height smaller than 0")]
    NegativeHeight,
    /// `x >= canvas width`.
    #[error("coordinate x {x} exceeds canvas width {width}")]
    XOutOfRange {
        /// Requested x.
        x: i64,
        /// Canvas width.
        width: u32,
    },
    /// `y >= canvas height`.
    #[error("coordinate y {y} exceeds canvas height {height}")]
    YOutOfRange {
        /// Requested y.
        y: i64,
        /// Canvas height.
        height: u32,
    },
    /// `x + w > canvas width`.
    #[error("tile right edge {right} exceeds canvas width {width}")]
    ExceedsWidth {
        /// `x + w`.
        right: i64,
        /// Canvas width.
        width: u32,
    },
    /// `y + h > canvas height`.
    #[error("tile bottom edge {bottom} exceeds canvas height {height}")]
    ExceedsHeight {
        /// `y + h`.
        bottom: i64,
        /// Canvas height.
        height: u32,
    },
    /// The source slice holds fewer bytes than `w * h * channels`.
    #[error("source buffer holds {actual} bytes, tile needs {expected}")]
    ShortSource {
        /// Bytes required by the tile.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
