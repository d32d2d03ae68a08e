use assetconfig::{
    ClearColor, ColorSetting, CompressionSetting, ResolvedAsset, Size, SupersampleSetting,
};
use glyphs::RenderHints;
use raster::{ColorType, Compression, Rgba, Supersample};

use crate::cli::GlyphArgs;

pub fn map_color(setting: ColorSetting) -> ColorType {
    match setting {
        ColorSetting::Rgb => ColorType::Rgb,
        ColorSetting::Rgba => ColorType::Rgba,
    }
}

pub fn map_supersample(setting: SupersampleSetting) -> Supersample {
    match setting {
        SupersampleSetting::Off => Supersample::Off,
        SupersampleSetting::X2 => Supersample::X2,
        SupersampleSetting::X4 => Supersample::X4,
    }
}

pub fn map_compression(setting: CompressionSetting) -> Compression {
    match setting {
        CompressionSetting::Fast => Compression::Fast,
        CompressionSetting::Default => Compression::Default,
        CompressionSetting::Best => Compression::Best,
        CompressionSetting::Level(level) => Compression::Level(level),
    }
}

pub fn map_clear(ClearColor(rgba): ClearColor) -> Rgba {
    Rgba::from(rgba)
}

/// Settings requested by a manifest entry or the command line; anything left
/// unset keeps the glyph's design value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub size: Option<Size>,
    pub color: Option<ColorSetting>,
    pub supersample: Option<SupersampleSetting>,
    pub compression: Option<CompressionSetting>,
    pub clear: Option<ClearColor>,
}

impl Overrides {
    pub fn apply(&self, hints: RenderHints) -> RenderHints {
        let (width, height) = self
            .size
            .map_or((hints.width, hints.height), |size| (size.width, size.height));
        RenderHints {
            width,
            height,
            color: self.color.map_or(hints.color, map_color),
            supersample: self.supersample.map_or(hints.supersample, map_supersample),
            position: hints.position,
            clear: self.clear.map_or(hints.clear, map_clear),
            compression: self.compression.map_or(hints.compression, map_compression),
        }
    }
}

impl From<&ResolvedAsset> for Overrides {
    fn from(asset: &ResolvedAsset) -> Self {
        Self {
            size: asset.size,
            color: asset.color,
            supersample: asset.supersample,
            compression: asset.compression,
            clear: asset.clear,
        }
    }
}

impl From<&GlyphArgs> for Overrides {
    fn from(args: &GlyphArgs) -> Self {
        Self {
            size: args.size,
            color: args.color,
            supersample: args.supersample,
            compression: args.compression,
            clear: args.clear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster::SamplePosition;

    #[test]
    fn unset_overrides_keep_glyph_hints() {
        let hints = glyphs::lookup("cup-solid").unwrap().hints();
        assert_eq!(Overrides::default().apply(hints), hints);
    }

    #[test]
    fn overrides_replace_individual_fields() {
        let hints = glyphs::lookup("bean-nib").unwrap().hints();
        let overrides = Overrides {
            size: Some(Size::square(48)),
            color: Some(ColorSetting::Rgba),
            clear: Some(ClearColor([1, 2, 3, 0])),
            ..Overrides::default()
        };
        let applied = overrides.apply(hints);
        assert_eq!((applied.width, applied.height), (48, 48));
        assert_eq!(applied.color, ColorType::Rgba);
        assert_eq!(applied.clear, Rgba::new(1, 2, 3, 0));
        assert_eq!(applied.supersample, hints.supersample);
        assert_eq!(applied.compression, hints.compression);
    }

    #[test]
    fn overrides_keep_the_glyph_sample_position() {
        let hints = glyphs::lookup("cup-solid").unwrap().hints();
        let overrides = Overrides {
            supersample: Some(SupersampleSetting::X2),
            ..Overrides::default()
        };
        assert_eq!(overrides.apply(hints).position, SamplePosition::Centre);
    }

    #[test]
    fn compression_levels_pass_through() {
        assert_eq!(
            map_compression(CompressionSetting::Level(3)),
            Compression::Level(3)
        );
        assert_eq!(map_supersample(SupersampleSetting::X2).factor(), 2);
    }
}
