use crate::chunk::{read_u32, Chunk, ChunkType};
use crate::{ColorType, PngError, MAX_DIMENSION};

/// Decoded `IHDR` payload.
///
/// Fields are kept as stored so the transparency sampler can describe images
/// this crate would never write; `color_type` and `ensure_supported` apply
/// the encoder's own restrictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_code: u8,
    pub compression: u8,
    pub filter: u8,
    pub interlace: u8,
}

impl Header {
    pub const LEN: usize = 13;

    pub fn new(width: u32, height: u32, color: ColorType) -> Self {
        Self {
            width,
            height,
            bit_depth: 8,
            color_code: color.code(),
            compression: 0,
            filter: 0,
            interlace: 0,
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        out[0..4].copy_from_slice(&self.width.to_be_bytes());
        out[4..8].copy_from_slice(&self.height.to_be_bytes());
        out[8] = self.bit_depth;
        out[9] = self.color_code;
        out[10] = self.compression;
        out[11] = self.filter;
        out[12] = self.interlace;
        out
    }

    pub fn to_chunk(&self) -> Chunk {
        Chunk::new(ChunkType::IHDR, self.to_bytes().to_vec())
    }

    pub fn parse(data: &[u8]) -> Result<Self, PngError> {
        if data.len() != Self::LEN {
            return Err(PngError::Layout(format!(
                "IHDR payload is {} bytes; expected {}",
                data.len(),
                Self::LEN
            )));
        }
        let header = Self {
            width: read_u32(&data[0..4]),
            height: read_u32(&data[4..8]),
            bit_depth: data[8],
            color_code: data[9],
            compression: data[10],
            filter: data[11],
            interlace: data[12],
        };
        if header.width == 0
            || header.height == 0
            || header.width > MAX_DIMENSION
            || header.height > MAX_DIMENSION
        {
            return Err(PngError::Dimensions {
                width: header.width,
                height: header.height,
            });
        }
        Ok(header)
    }

    pub fn color_type(&self) -> Option<ColorType> {
        ColorType::from_code(self.color_code)
    }

    /// Rejects anything outside 8-bit, non-interlaced RGB/RGBA.
    pub fn ensure_supported(&self) -> Result<ColorType, PngError> {
        if self.bit_depth != 8 {
            return Err(PngError::Unsupported(format!(
                "bit depth {} (only 8 is supported)",
                self.bit_depth
            )));
        }
        if self.compression != 0 || self.filter != 0 {
            return Err(PngError::Unsupported(format!(
                "compression method {} / filter method {}",
                self.compression, self.filter
            )));
        }
        if self.interlace != 0 {
            return Err(PngError::Unsupported("interlaced images".to_string()));
        }
        self.color_type().ok_or_else(|| {
            PngError::Unsupported(format!("colour type {}", self.color_code))
        })
    }

    /// Length of one raw scanline including its filter byte.
    pub(crate) fn scanline_len(&self, channels: usize) -> usize {
        1 + self.width as usize * channels
    }
}
