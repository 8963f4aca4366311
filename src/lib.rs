//! pngstack assembles PNG images from rectangular tiles.
//!
//! A [`PixelCanvas`] is a fixed-size 4-channel pixel buffer. Callers [`blit`](PixelCanvas::blit)
//! tiles of raw pixels into it in any of the four supported layouts ([`PixelFormat`]), and the
//! canvas converts each pixel into its own stored order. [`PixelCanvas::finish`] hands the
//! assembled buffer to an [`ImageCodec`] (PNG by default) and returns the encoded bytes.
//!
//! # Conversion rules
//!
//! - The stored order is fixed at construction: red-first formats store RGBA, blue-first BGRA.
//! - 4-channel tiles keep their alpha byte; 3-channel tiles are written with alpha `0x00`.
//! - Red and blue are swapped when the tile order differs from the stored order.
//!
//! # Guarantees
//!
//! - Every blit is validated in full before any byte is written; a rejected blit changes nothing.
//! - `unsafe` is forbidden in this crate.
//!
//! [`FlatImage`] is the non-compositing sibling that encodes one caller buffer as-is, and the
//! [`manifest`] module drives a canvas from a JSON tile list (used by the `pngstack` binary).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod canvas;
mod encode;
mod foundation;
mod pixel;

pub mod manifest;

pub use canvas::flat::FlatImage;
pub use canvas::stack::{CLEAR_BYTE, PixelCanvas};
pub use encode::png::{Compression, EncodeConfig, EncodedImage, ImageCodec, PngCodec};
pub use foundation::core::{CanvasSize, TileRect};
pub use foundation::error::{GeometryError, PngStackError, PngStackResult};
pub use manifest::{StackManifest, TileSpec, build_canvas, compose_manifest, normalize_rel_path};
pub use pixel::convert::{AlphaPolicy, PixelMapping, SYNTHETIC_ALPHA, swap_rb_in_place};
pub use pixel::format::{ChannelOrder, PixelFormat};
