//! Named catalog of procedural icon and splash artwork.
//!
//! Every entry builds a [`raster::LayeredShader`] and carries the render
//! settings it was designed for ([`RenderHints`]), so a caller can render a
//! glyph by name alone:
//!
//! ```no_run
//! let glyph = glyphs::lookup("bean")?;
//! let png = raster::render_png(
//!     &glyph.hints().raster_config(),
//!     &glyph.shader(),
//!     &raster::Encoder::new(),
//! )?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod badge;
mod bean;
mod cup;
pub mod palette;

use raster::{
    ColorType, Compression, LayeredShader, RasterConfig, Rgba, SamplePosition, Supersample,
};
use thiserror::Error;

pub use badge::{checkbox_bean, cup_topdown};
pub use bean::{bean, bean_nib, bean_nib_foreground};
pub use cup::{cup_line, cup_pen, cup_solid, cup_steam};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GlyphError {
    #[error("unknown glyph '{name}' (known glyphs: {known})")]
    Unknown { name: String, known: String },
}

/// Settings a glyph looks right at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderHints {
    pub width: u32,
    pub height: u32,
    pub color: ColorType,
    pub supersample: Supersample,
    pub position: SamplePosition,
    pub clear: Rgba,
    pub compression: Compression,
}

impl RenderHints {
    const fn square(size: u32, color: ColorType) -> Self {
        Self {
            width: size,
            height: size,
            color,
            supersample: Supersample::Off,
            position: SamplePosition::Corner,
            clear: palette::CLEAR,
            compression: Compression::Default,
        }
    }

    const fn supersampled(mut self, supersample: Supersample) -> Self {
        self.supersample = supersample;
        self
    }

    pub fn raster_config(&self) -> RasterConfig {
        RasterConfig::new(self.width, self.height, self.color)
            .with_supersample(self.supersample)
            .with_position(self.position)
            .with_clear(self.clear)
    }
}

/// One catalog entry.
#[derive(Debug)]
pub struct Glyph {
    name: &'static str,
    summary: &'static str,
    hints: RenderHints,
    build: fn() -> LayeredShader,
}

impl Glyph {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn summary(&self) -> &'static str {
        self.summary
    }

    pub fn hints(&self) -> RenderHints {
        self.hints
    }

    /// Builds a fresh shader for this glyph.
    pub fn shader(&self) -> LayeredShader {
        (self.build)()
    }
}

static CATALOG: [Glyph; 9] = [
    Glyph {
        name: "cup-line",
        summary: "line-art cup and saucer, steam curling into a pen nib",
        hints: RenderHints::square(1024, ColorType::Rgba).supersampled(Supersample::X2),
        build: cup_line,
    },
    Glyph {
        name: "cup-solid",
        summary: "filled cup with handle, saucer, steam and nib",
        hints: RenderHints {
            position: SamplePosition::Centre,
            clear: palette::CLEAR_WHITE,
            compression: Compression::Best,
            ..RenderHints::square(1024, ColorType::Rgba).supersampled(Supersample::X4)
        },
        build: cup_solid,
    },
    Glyph {
        name: "cup-steam",
        summary: "open cup outline with steam and nib",
        hints: RenderHints::square(512, ColorType::Rgba),
        build: cup_steam,
    },
    Glyph {
        name: "cup-pen",
        summary: "filled bowl with handle under a slit nib",
        hints: RenderHints::square(512, ColorType::Rgba),
        build: cup_pen,
    },
    Glyph {
        name: "bean",
        summary: "white coffee bean with a wavy crease",
        hints: RenderHints::square(512, ColorType::Rgba),
        build: bean,
    },
    Glyph {
        name: "bean-nib",
        summary: "gold bean nib on dark coffee",
        hints: RenderHints::square(1024, ColorType::Rgb),
        build: bean_nib,
    },
    Glyph {
        name: "bean-nib-foreground",
        summary: "gold bean nib on transparency, adaptive icon foreground",
        hints: RenderHints::square(1024, ColorType::Rgba),
        build: bean_nib_foreground,
    },
    Glyph {
        name: "cup-topdown",
        summary: "cup seen from above with ruled lines, cream on matte black",
        hints: RenderHints::square(1024, ColorType::Rgb),
        build: cup_topdown,
    },
    Glyph {
        name: "checkbox-bean",
        summary: "bean inside a checkbox outline on terracotta",
        hints: RenderHints::square(1024, ColorType::Rgb),
        build: checkbox_bean,
    },
];

/// All glyphs in catalog order.
pub fn catalog() -> &'static [Glyph] {
    &CATALOG
}

pub fn names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(Glyph::name)
}

/// Finds a glyph by name, ignoring ASCII case and surrounding whitespace.
pub fn lookup(name: &str) -> Result<&'static Glyph, GlyphError> {
    let wanted = name.trim();
    CATALOG
        .iter()
        .find(|glyph| glyph.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| GlyphError::Unknown {
            name: wanted.to_string(),
            known: names().collect::<Vec<_>>().join(", "),
        })
}
