use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::decode::{inflate, read_stream};
use crate::{ColorType, PngError};

/// Which part of an image the transparency scan looks at.
///
/// The scan visits every `row_step`-th scanline starting at row 0 and the
/// first `columns` pixels of each visited row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleGrid {
    pub row_step: u32,
    pub columns: u32,
}

impl SampleGrid {
    pub fn new(row_step: u32, columns: u32) -> Self {
        Self {
            row_step: row_step.max(1),
            columns,
        }
    }

    /// Every pixel of every row.
    pub fn full() -> Self {
        Self {
            row_step: 1,
            columns: u32::MAX,
        }
    }
}

impl Default for SampleGrid {
    fn default() -> Self {
        Self {
            row_step: 100,
            columns: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "finding", rename_all = "snake_case")]
pub enum Finding {
    /// First sampled pixel whose alpha is below 255.
    Transparent { x: u32, y: u32, alpha: u8 },
    /// Every sampled pixel was fully opaque.
    Opaque { rows: u32, pixels: u64 },
    /// The image has no alpha channel to inspect.
    NotRgba { color_type: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransparencyReport {
    pub width: u32,
    pub height: u32,
    pub color_type: u8,
    pub grid: SampleGrid,
    #[serde(flatten)]
    pub finding: Finding,
}

impl TransparencyReport {
    pub fn has_transparency(&self) -> bool {
        matches!(self.finding, Finding::Transparent { .. })
    }
}

impl std::fmt::Display for TransparencyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{}, colour type {}: ",
            self.width, self.height, self.color_type
        )?;
        match &self.finding {
            Finding::Transparent { x, y, alpha } => {
                write!(f, "transparent pixels found (first at {x},{y} alpha {alpha})")
            }
            Finding::Opaque { rows, pixels } => write!(
                f,
                "no transparent pixels found in sample ({rows} rows, {pixels} pixels)"
            ),
            Finding::NotRgba { .. } => f.write_str("not an RGBA image"),
        }
    }
}

/// Samples an RGBA stream for any alpha value below 255.
///
/// Scanlines are read as if every filter byte were 0, so the answer is only
/// exact for images written by [`crate::Encoder`]. Non-RGBA images are
/// reported, not rejected.
pub fn scan_transparency(bytes: &[u8], grid: SampleGrid) -> Result<TransparencyReport, PngError> {
    let stream = read_stream(bytes)?;
    let header = stream.header;
    let report = |finding| TransparencyReport {
        width: header.width,
        height: header.height,
        color_type: header.color_code,
        grid,
        finding,
    };

    if header.color_type() != Some(ColorType::Rgba) {
        return Ok(report(Finding::NotRgba {
            color_type: header.color_code,
        }));
    }
    if header.bit_depth != 8 {
        return Err(PngError::Unsupported(format!(
            "bit depth {} (only 8 is supported)",
            header.bit_depth
        )));
    }

    let raw = inflate(&stream.compressed)?;
    let line = header.scanline_len(4);
    let columns = grid.columns.min(header.width) as usize;
    let mut rows = 0u32;
    let mut pixels = 0u64;

    for y in (0..header.height).step_by(grid.row_step.max(1) as usize) {
        let start = y as usize * line + 1;
        let Some(row) = raw.get(start..start + columns * 4) else {
            debug!(row = y, "scanline data ends early; stopping scan");
            break;
        };
        rows += 1;
        for (x, pixel) in row.chunks_exact(4).enumerate() {
            pixels += 1;
            if pixel[3] < u8::MAX {
                return Ok(report(Finding::Transparent {
                    x: x as u32,
                    y,
                    alpha: pixel[3],
                }));
            }
        }
    }

    Ok(report(Finding::Opaque { rows, pixels }))
}

pub fn scan_file(path: &Path, grid: SampleGrid) -> Result<TransparencyReport, PngError> {
    let bytes = fs::read(path)?;
    scan_transparency(&bytes, grid)
}
