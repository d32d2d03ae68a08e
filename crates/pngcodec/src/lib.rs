//! Minimal PNG codec for generated artwork.
//!
//! The encoder writes the smallest stream a PNG reader accepts: the
//! signature, one `IHDR`, a single zlib-compressed `IDAT` holding
//! unfiltered scanlines, and an empty `IEND`. The read side only understands
//! what the encoder writes, which is enough to verify output and to sample an
//! existing icon for transparency.
//!
//! Types:
//!
//! - `ColorType` selects 8-bit truecolour (`Rgb`) or truecolour with alpha
//!   (`Rgba`).
//! - `Chunk`, `ChunkType` and `ChunkReader` frame and walk the chunk stream;
//!   `Header` is the decoded `IHDR` payload.
//! - `Encoder` and `Compression` turn a pixel buffer into PNG bytes.
//! - `DecodedImage` is the result of the strict filter-0 reader.
//! - `SampleGrid`, `TransparencyReport` and `Finding` describe a
//!   transparency scan.
//!
//! Functions:
//!
//! - `encode` / `Encoder::encode` serialize a buffer; `write_png` stores the
//!   bytes all-or-nothing.
//! - `decode` recovers the buffer from a stream this crate produced.
//! - `scan_transparency` / `scan_file` look for any alpha below 255 in a
//!   coarse sample of rows.
mod chunk;
mod decode;
mod encode;
mod header;
mod inspect;

pub use chunk::{crc32, Chunk, ChunkReader, ChunkType, Crc32, RawChunk};
pub use decode::{decode, DecodedImage};
pub use encode::{encode, write_png, Compression, Encoder};
pub use header::Header;
pub use inspect::{scan_file, scan_transparency, Finding, SampleGrid, TransparencyReport};

use serde::Serialize;
use thiserror::Error;

/// Eight-byte magic that opens every PNG stream.
pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Largest width or height the format allows (2^31 - 1).
pub const MAX_DIMENSION: u32 = i32::MAX as u32;

#[derive(Debug, Error)]
pub enum PngError {
    #[error("not a PNG stream (signature mismatch)")]
    Signature,

    #[error("stream truncated while reading {0}")]
    Truncated(&'static str),

    #[error("chunk {kind} failed CRC check (stored {stored:#010x}, computed {computed:#010x})")]
    Crc {
        kind: ChunkType,
        stored: u32,
        computed: u32,
    },

    #[error("invalid chunk layout: {0}")]
    Layout(String),

    #[error("unsupported image header: {0}")]
    Unsupported(String),

    #[error("scanline {row} uses filter type {filter}; only filter 0 is supported")]
    Filter { row: u32, filter: u8 },

    #[error("failed to inflate image data: {0}")]
    Inflate(String),

    #[error("invalid image dimensions {width}x{height}")]
    Dimensions { width: u32, height: u32 },

    #[error("pixel buffer holds {actual} bytes; expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Pixel layouts the encoder emits. Bit depth is always 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorType {
    /// Truecolour, colour type 2, three bytes per pixel.
    Rgb,
    /// Truecolour with alpha, colour type 6, four bytes per pixel.
    Rgba,
}

impl ColorType {
    /// Colour type code stored in `IHDR`.
    pub const fn code(self) -> u8 {
        match self {
            ColorType::Rgb => 2,
            ColorType::Rgba => 6,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            2 => Some(ColorType::Rgb),
            6 => Some(ColorType::Rgba),
            _ => None,
        }
    }

    /// Bytes per pixel.
    pub const fn channels(self) -> usize {
        match self {
            ColorType::Rgb => 3,
            ColorType::Rgba => 4,
        }
    }
}

impl std::fmt::Display for ColorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorType::Rgb => f.write_str("rgb"),
            ColorType::Rgba => f.write_str("rgba"),
        }
    }
}
