use pngcodec::ColorType;

/// An 8-bit RGBA sample produced by a shader.
///
/// RGB canvases drop the alpha channel when the pixel is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<[u8; 3]> for Rgba {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

/// Sub-pixel sampling grid used for anti-aliasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Supersample {
    /// One sample per pixel at the pixel origin.
    #[default]
    Off,
    /// 2×2 samples per pixel.
    X2,
    /// 4×4 samples per pixel.
    X4,
}

impl Supersample {
    /// Samples per axis.
    pub const fn factor(self) -> u32 {
        match self {
            Self::Off => 1,
            Self::X2 => 2,
            Self::X4 => 4,
        }
    }
}

/// Where the sub-samples of a supersampled pixel sit.
///
/// Both layouts keep every sample inside `[x, x + 1)`. Without
/// supersampling the single sample is always taken at the pixel origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplePosition {
    /// `x + i/s`: the first sample lands on the pixel origin.
    #[default]
    Corner,
    /// `x + (i + 0.5)/s`: samples sit in the middle of their sub-cells.
    Centre,
}

impl SamplePosition {
    /// Offset of the `index`-th sample along one axis of a `factor`-wide grid.
    pub fn offset(self, index: u32, factor: u32) -> f64 {
        if factor <= 1 {
            return 0.0;
        }
        let base = match self {
            Self::Corner => index as f64,
            Self::Centre => index as f64 + 0.5,
        };
        base / factor as f64
    }
}

/// Everything the rasterizer needs besides the shader itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterConfig {
    /// Canvas size in pixels.
    pub width: u32,
    pub height: u32,
    /// Channel layout of the produced canvas.
    pub color: ColorType,
    /// Anti-aliasing grid.
    pub supersample: Supersample,
    /// Layout of the anti-aliasing grid inside each pixel.
    pub position: SamplePosition,
    /// Colour written when a supersampled pixel ends up with zero alpha.
    pub clear: Rgba,
}

impl RasterConfig {
    pub fn new(width: u32, height: u32, color: ColorType) -> Self {
        Self {
            width,
            height,
            color,
            ..Self::default()
        }
    }

    pub fn with_supersample(mut self, supersample: Supersample) -> Self {
        self.supersample = supersample;
        self
    }

    pub fn with_position(mut self, position: SamplePosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_clear(mut self, clear: Rgba) -> Self {
        self.clear = clear;
        self
    }
}

impl Default for RasterConfig {
    /// A 1024×1024 RGBA icon canvas without supersampling.
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            color: ColorType::Rgba,
            supersample: Supersample::Off,
            position: SamplePosition::Corner,
            clear: Rgba::TRANSPARENT,
        }
    }
}
