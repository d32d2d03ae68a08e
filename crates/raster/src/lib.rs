//! CPU rasterizer for procedural icon artwork.
//!
//! A [`Shader`] is asked for the colour of each sample; [`rasterize`] walks
//! the canvas row by row and stores the result in a [`Canvas`], which the
//! `pngcodec` encoder turns into bytes:
//!
//! ```text
//!   RasterConfig + Shader
//!          │
//!          ▼
//!   rasterize ──▶ per pixel: s×s samples ──▶ resolve_samples ──▶ Canvas
//!                                                                  │
//!                                                  Canvas::encode ─┘──▶ PNG bytes
//! ```
//!
//! Shapes are described with [`shape::LayeredShader`], an ordered list of
//! implicit regions where the first match decides the colour.

mod canvas;
mod rasterize;
mod shader;
pub mod shape;
mod types;

pub use canvas::Canvas;
pub use rasterize::{rasterize, render_png, resolve_samples};
pub use shader::Shader;
pub use shape::{circle, conic, Axis, Conic, Layer, LayeredShader, Point, Region, Transform};
pub use types::{RasterConfig, Rgba, SamplePosition, Supersample};

pub use pngcodec::{ColorType, Compression, Encoder};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("invalid canvas dimensions {width}x{height}")]
    Dimensions { width: u32, height: u32 },

    #[error(transparent)]
    Encode(#[from] pngcodec::PngError),
}
