//! JSON description of a canvas and the raw tiles to blit into it.
//!
//! ```json
//! {
//!   "width": 64, "height": 64, "format": "rgb",
//!   "tiles": [{ "source": "tiles/a.raw", "format": "rgba", "x": 0, "y": 0, "w": 8, "h": 8 }]
//! }
//! ```
//!
//! Tile sources are raw packed pixel files, resolved relative to the manifest directory.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    canvas::stack::PixelCanvas,
    encode::png::{Compression, EncodeConfig, EncodedImage, PngCodec},
    foundation::core::TileRect,
    foundation::error::{PngStackError, PngStackResult},
    pixel::format::PixelFormat,
};

/// Canvas plus the ordered list of tiles painted onto it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StackManifest {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Initial format; picks the encoding channel order and is the default tile format.
    #[serde(default)]
    pub format: PixelFormat,
    /// PNG compression effort.
    #[serde(default)]
    pub compression: Compression,
    /// Tiles, blitted in order.
    #[serde(default)]
    pub tiles: Vec<TileSpec>,
}

/// One raw tile file and where it lands.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TileSpec {
    /// Relative path of the raw pixel file.
    pub source: String,
    /// Pixel layout of `source`; defaults to the manifest format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<PixelFormat>,
    /// Placement on the canvas.
    #[serde(flatten)]
    pub rect: TileRect,
}

impl StackManifest {
    /// Read and parse a manifest file.
    pub fn from_path(path: &Path) -> PngStackResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open manifest '{}'", path.display()))?;
        let manifest: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse manifest '{}'", path.display()))?;
        Ok(manifest)
    }

    /// Check canvas dimensions and tile paths; tile geometry is checked when blitting.
    pub fn validate(&self) -> PngStackResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PngStackError::validation(
                "manifest width/height must be > 0",
            ));
        }
        for tile in &self.tiles {
            normalize_rel_path(&tile.source)?;
        }
        Ok(())
    }

    /// Format a tile is read in.
    pub fn tile_format(&self, tile: &TileSpec) -> PixelFormat {
        tile.format.unwrap_or(self.format)
    }
}

/// Normalize a tile path to forward slashes so it stays under the manifest directory.
///
/// Rejects absolute paths, Windows drive or stream prefixes (any `:`), and `..` components,
/// all of which would let `Path::join` leave the root.
pub fn normalize_rel_path(source: &str) -> PngStackResult<String> {
    if source.is_empty() {
        return Err(PngStackError::validation("tile path must be non-empty"));
    }
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(PngStackError::validation(format!(
            "tile path '{source}' must be relative"
        )));
    }
    if s.contains(':') {
        return Err(PngStackError::validation(format!(
            "tile path '{source}' must not contain a drive or stream prefix"
        )));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(PngStackError::validation(format!(
                "tile path '{source}' must not contain '..'"
            )));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(PngStackError::validation(
            "tile path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

/// Blit every tile of `manifest` (paths relative to `root`) and return the canvas.
#[tracing::instrument(skip(manifest), fields(tiles = manifest.tiles.len()))]
pub fn build_canvas(manifest: &StackManifest, root: &Path) -> PngStackResult<PixelCanvas> {
    manifest.validate()?;
    let mut canvas = PixelCanvas::new(manifest.width, manifest.height, manifest.format)?;

    for (idx, tile) in manifest.tiles.iter().enumerate() {
        let path: PathBuf = root.join(normalize_rel_path(&tile.source)?);
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read tile {idx} '{}'", path.display()))?;
        tracing::debug!(idx, source = %tile.source, len = bytes.len(), "read tile");
        canvas.blit(&bytes, manifest.tile_format(tile), tile.rect)?;
    }
    Ok(canvas)
}

/// [`build_canvas`] followed by PNG encoding with the manifest's compression.
pub fn compose_manifest(manifest: &StackManifest, root: &Path) -> PngStackResult<EncodedImage> {
    let canvas = build_canvas(manifest, root)?;
    let codec = PngCodec::new(EncodeConfig::default().with_compression(manifest.compression));
    canvas.finish_with(&codec)
}

#[cfg(test)]
#[path = "../tests/unit/manifest.rs"]
mod tests;
