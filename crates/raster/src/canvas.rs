use pngcodec::{ColorType, Encoder, MAX_DIMENSION};

use crate::types::Rgba;
use crate::RasterError;

/// Row-major pixel buffer, top-to-bottom and left-to-right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    color: ColorType,
    data: Vec<u8>,
}

impl Canvas {
    /// Allocates a canvas with every byte zeroed.
    ///
    /// Sizes a PNG header cannot carry are rejected before allocating.
    pub fn new(width: u32, height: u32, color: ColorType) -> Result<Self, RasterError> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(RasterError::Dimensions { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(color.channels()))
            .ok_or(RasterError::Dimensions { width, height })?;
        Ok(Self {
            width,
            height,
            color,
            data: vec![0; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn color(&self) -> ColorType {
        self.color
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * self.color.channels())
    }

    /// Stores `pixel` at `(x, y)`; out-of-range coordinates are ignored.
    pub fn put(&mut self, x: u32, y: u32, pixel: Rgba) {
        let Some(start) = self.offset(x, y) else {
            return;
        };
        let channels = self.color.channels();
        self.data[start..start + channels].copy_from_slice(&pixel.to_array()[..channels]);
    }

    /// Reads back a pixel; RGB canvases report alpha 255.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let start = self.offset(x, y)?;
        let bytes = &self.data[start..start + self.color.channels()];
        Some(match self.color {
            ColorType::Rgb => Rgba::rgb(bytes[0], bytes[1], bytes[2]),
            ColorType::Rgba => Rgba::new(bytes[0], bytes[1], bytes[2], bytes[3]),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Serializes the canvas as a PNG stream.
    pub fn encode(&self, encoder: &Encoder) -> Result<Vec<u8>, RasterError> {
        Ok(encoder.encode(self.width, self.height, self.color, &self.data)?)
    }
}
