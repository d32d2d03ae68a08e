use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::chunk::{Chunk, ChunkType};
use crate::header::Header;
use crate::{ColorType, PngError, MAX_DIMENSION, SIGNATURE};

/// zlib effort used for the `IDAT` payload. Output is valid at every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    Fast,
    #[default]
    Default,
    Best,
    /// Explicit level, clamped to 0..=9.
    Level(u8),
}

impl Compression {
    pub fn level(self) -> u8 {
        match self {
            Compression::Fast => 1,
            Compression::Default => 6,
            Compression::Best => 9,
            Compression::Level(level) => level.min(9),
        }
    }
}

/// Serializes pixel buffers into minimal PNG streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder {
    compression: Compression,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Encodes a row-major buffer of `width * height` pixels.
    ///
    /// `pixels` must hold exactly `color.channels()` bytes per pixel in
    /// R, G, B(, A) order.
    pub fn encode(
        &self,
        width: u32,
        height: u32,
        color: ColorType,
        pixels: &[u8],
    ) -> Result<Vec<u8>, PngError> {
        let expected = buffer_len(width, height, color)?;
        if pixels.len() != expected {
            return Err(PngError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }

        let raw = scanlines(width as usize * color.channels(), pixels);
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, self.compression.level());
        debug!(
            width,
            height,
            color = %color,
            raw = raw.len(),
            compressed = compressed.len(),
            "encoded image data"
        );

        let chunks = [
            Header::new(width, height, color).to_chunk(),
            Chunk::new(ChunkType::IDAT, compressed),
            Chunk::new(ChunkType::IEND, Vec::new()),
        ];
        let total = SIGNATURE.len() + chunks.iter().map(Chunk::framed_len).sum::<usize>();
        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(&SIGNATURE);
        for chunk in &chunks {
            chunk.write_to(&mut out)?;
        }
        Ok(out)
    }
}

/// Encodes with default compression.
pub fn encode(width: u32, height: u32, color: ColorType, pixels: &[u8]) -> Result<Vec<u8>, PngError> {
    Encoder::default().encode(width, height, color, pixels)
}

/// Writes `bytes` to `path` so that the target is either the complete new
/// file or untouched. Missing parent directories are created.
pub fn write_png(path: &Path, bytes: &[u8]) -> Result<(), PngError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let staging = staging_path(path);
    if let Err(err) = fs::write(&staging, bytes).and_then(|_| fs::rename(&staging, path)) {
        let _ = fs::remove_file(&staging);
        return Err(err.into());
    }
    debug!(path = %path.display(), bytes = bytes.len(), "wrote png");
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".partial");
    PathBuf::from(name)
}

pub(crate) fn buffer_len(width: u32, height: u32, color: ColorType) -> Result<usize, PngError> {
    let invalid = || PngError::Dimensions { width, height };
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(invalid());
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(color.channels()))
        .ok_or_else(invalid)
}

/// Prefixes every row with filter type 0 ("None").
fn scanlines(row_bytes: usize, pixels: &[u8]) -> Vec<u8> {
    let rows = pixels.len() / row_bytes;
    let mut raw = Vec::with_capacity(rows * (row_bytes + 1));
    for row in pixels.chunks_exact(row_bytes) {
        raw.push(0);
        raw.extend_from_slice(row);
    }
    raw
}
