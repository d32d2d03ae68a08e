use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid manifest: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetManifest {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub assets: BTreeMap<String, Asset>,
}

/// Settings shared by every asset unless the asset overrides them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default, deserialize_with = "deserialize_size_opt")]
    pub size: Option<Size>,
    #[serde(default)]
    pub color: Option<ColorSetting>,
    #[serde(default, deserialize_with = "deserialize_supersample_opt")]
    pub supersample: Option<SupersampleSetting>,
    #[serde(default, deserialize_with = "deserialize_compression_opt")]
    pub compression: Option<CompressionSetting>,
    #[serde(default, deserialize_with = "deserialize_clear_opt")]
    pub clear: Option<ClearColor>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Asset {
    pub glyph: String,
    pub output: PathBuf,
    #[serde(default, deserialize_with = "deserialize_size_opt")]
    pub size: Option<Size>,
    #[serde(default)]
    pub color: Option<ColorSetting>,
    #[serde(default, deserialize_with = "deserialize_supersample_opt")]
    pub supersample: Option<SupersampleSetting>,
    #[serde(default, deserialize_with = "deserialize_compression_opt")]
    pub compression: Option<CompressionSetting>,
    #[serde(default, deserialize_with = "deserialize_clear_opt")]
    pub clear: Option<ClearColor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    Rgb,
    Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupersampleSetting {
    Off,
    X2,
    X4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionSetting {
    Fast,
    Default,
    Best,
    Level(u8),
}

/// Colour stored in pixels no supersample covered, as RGBA bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearColor(pub [u8; 4]);

/// An asset with defaults applied. Fields still `None` fall back to the
/// glyph's own render hints.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAsset {
    pub name: String,
    pub glyph: String,
    pub output: PathBuf,
    pub size: Option<Size>,
    pub color: Option<ColorSetting>,
    pub supersample: Option<SupersampleSetting>,
    pub compression: Option<CompressionSetting>,
    pub clear: Option<ClearColor>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Helper {
    Str(String),
    Num(i64),
}

fn deserialize_helper<'de, D, T>(
    deserializer: D,
    parse: fn(&str) -> Result<T, String>,
    what: &str,
) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
{
    let helper: Option<Helper> = Option::deserialize(deserializer)?;
    let result = match helper {
        None => None,
        Some(Helper::Str(raw)) => Some(parse(&raw).map_err(de::Error::custom)?),
        Some(Helper::Num(value)) => {
            if value < 0 {
                return Err(de::Error::custom(format!("{what} must be non-negative")));
            }
            Some(parse(&value.to_string()).map_err(de::Error::custom)?)
        }
    };
    Ok(result)
}

fn deserialize_size_opt<'de, D>(deserializer: D) -> Result<Option<Size>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_helper(deserializer, parse_size, "size")
}

fn deserialize_supersample_opt<'de, D>(
    deserializer: D,
) -> Result<Option<SupersampleSetting>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_helper(deserializer, parse_supersample, "supersample")
}

fn deserialize_compression_opt<'de, D>(
    deserializer: D,
) -> Result<Option<CompressionSetting>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_helper(deserializer, parse_compression, "compression")
}

fn deserialize_clear_opt<'de, D>(deserializer: D) -> Result<Option<ClearColor>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|value| parse_clear(&value).map_err(de::Error::custom))
        .transpose()
}

/// Parses `"512"` or `"1920x1080"`.
pub fn parse_size(raw: &str) -> Result<Size, String> {
    let normalized = raw.trim().to_ascii_lowercase();
    let parse = |part: &str| {
        part.trim()
            .parse::<u32>()
            .map_err(|_| format!("invalid size '{raw}'; expected N or WIDTHxHEIGHT"))
    };
    match normalized.split_once('x') {
        Some((width, height)) => Ok(Size {
            width: parse(width)?,
            height: parse(height)?,
        }),
        None => parse(&normalized).map(Size::square),
    }
}

pub fn parse_color(raw: &str) -> Result<ColorSetting, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "rgb" => Ok(ColorSetting::Rgb),
        "rgba" => Ok(ColorSetting::Rgba),
        other => Err(format!("invalid color mode '{other}'; expected rgb or rgba")),
    }
}

pub fn parse_supersample(raw: &str) -> Result<SupersampleSetting, String> {
    let normalized = raw.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "off" | "none" | "0" | "1" => Ok(SupersampleSetting::Off),
        "2" | "2x" | "x2" => Ok(SupersampleSetting::X2),
        "4" | "4x" | "x4" => Ok(SupersampleSetting::X4),
        other => Err(format!(
            "invalid supersample setting '{other}'; expected 1, 2, 4 or off"
        )),
    }
}

pub fn parse_compression(raw: &str) -> Result<CompressionSetting, String> {
    let normalized = raw.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "fast" => Ok(CompressionSetting::Fast),
        "default" => Ok(CompressionSetting::Default),
        "best" | "max" => Ok(CompressionSetting::Best),
        other => match other.parse::<u8>() {
            Ok(level) if level <= 9 => Ok(CompressionSetting::Level(level)),
            _ => Err(format!(
                "invalid compression '{other}'; expected fast, default, best or 0..9"
            )),
        },
    }
}

/// Parses `#RRGGBB` or `#RRGGBBAA`; the `#` is optional and a missing alpha
/// means opaque.
pub fn parse_clear(raw: &str) -> Result<ClearColor, String> {
    let hex = raw.trim().trim_start_matches('#');
    if !matches!(hex.len(), 6 | 8) || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!(
            "invalid colour '{raw}'; expected #RRGGBB or #RRGGBBAA"
        ));
    }
    let mut rgba = [0, 0, 0, 255];
    for (slot, index) in rgba.iter_mut().zip((0..hex.len()).step_by(2)) {
        *slot = u8::from_str_radix(&hex[index..index + 2], 16)
            .map_err(|err| format!("invalid colour '{raw}': {err}"))?;
    }
    Ok(ClearColor(rgba))
}

impl AssetManifest {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: AssetManifest = toml::from_str(input)?;
        raw.validate()?;
        Ok(raw)
    }

    pub fn asset(&self, name: &str) -> Option<&Asset> {
        self.assets.get(name)
    }

    /// Resolves the named assets, or every asset when `names` is empty.
    pub fn select(&self, names: &[String]) -> Result<Vec<ResolvedAsset>, ConfigError> {
        if names.is_empty() {
            return Ok(self
                .assets
                .iter()
                .map(|(name, asset)| asset.resolve(name, &self.defaults))
                .collect());
        }

        names
            .iter()
            .map(|name| {
                self.asset(name)
                    .map(|asset| asset.resolve(name, &self.defaults))
                    .ok_or_else(|| {
                        ConfigError::Invalid(format!(
                            "unknown asset '{name}'; manifest defines: {}",
                            self.assets.keys().cloned().collect::<Vec<_>>().join(", ")
                        ))
                    })
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != 1 {
            return Err(ConfigError::Invalid(format!(
                "unsupported manifest version {}; expected 1",
                self.version
            )));
        }

        if self.assets.is_empty() {
            return Err(ConfigError::Invalid(
                "manifest must define at least one asset".into(),
            ));
        }

        validate_size("defaults.size", self.defaults.size)?;
        validate_compression("defaults.compression", self.defaults.compression)?;

        let mut outputs = BTreeSet::new();
        for (name, asset) in &self.assets {
            if asset.glyph.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "asset '{name}' must name a glyph"
                )));
            }

            let is_png = asset
                .output
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
            if !is_png {
                return Err(ConfigError::Invalid(format!(
                    "asset '{name}' output '{}' must end in .png",
                    asset.output.display()
                )));
            }

            if !outputs.insert(&asset.output) {
                return Err(ConfigError::Invalid(format!(
                    "asset '{name}' writes '{}', which another asset already writes",
                    asset.output.display()
                )));
            }

            validate_size(&format!("asset '{name}' size"), asset.size)?;
            validate_compression(&format!("asset '{name}' compression"), asset.compression)?;
        }

        Ok(())
    }
}

fn validate_size(field: &str, size: Option<Size>) -> Result<(), ConfigError> {
    match size {
        Some(size) if size.width == 0 || size.height == 0 => Err(ConfigError::Invalid(format!(
            "{field} must be non-zero, got {size}"
        ))),
        _ => Ok(()),
    }
}

fn validate_compression(
    field: &str,
    compression: Option<CompressionSetting>,
) -> Result<(), ConfigError> {
    match compression {
        Some(CompressionSetting::Level(level)) if level > 9 => Err(ConfigError::Invalid(format!(
            "{field} level {level} is out of range 0..9"
        ))),
        _ => Ok(()),
    }
}

impl Asset {
    pub fn resolve(&self, name: &str, defaults: &Defaults) -> ResolvedAsset {
        ResolvedAsset {
            name: name.to_string(),
            glyph: self.glyph.trim().to_string(),
            output: self.output.clone(),
            size: self.size.or(defaults.size),
            color: self.color.or(defaults.color),
            supersample: self.supersample.or(defaults.supersample),
            compression: self.compression.or(defaults.compression),
            clear: self.clear.or(defaults.clear),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
version = 1
out_dir = "assets/images"

[defaults]
size = 1024
color = "rgba"
supersample = 2
compression = "best"

[assets.splash]
glyph = "cup-line"
output = "splash_v4_final_premium.png"

[assets.splash_pro]
glyph = "cup-solid"
output = "splash_v5_pro_transparent.png"
supersample = "4"
clear = "#FFFFFF00"

[assets.app_icon]
glyph = "bean-nib"
output = "app_icon.png"
color = "rgb"
size = "1024x1024"
compression = 6
"##;

    #[test]
    fn parses_sample_manifest() {
        let manifest = AssetManifest::from_toml_str(SAMPLE).expect("parse manifest");
        assert_eq!(manifest.version, 1);
        assert_eq!(manifest.out_dir, Some(PathBuf::from("assets/images")));
        assert_eq!(manifest.assets.len(), 3);
        assert_eq!(manifest.defaults.size, Some(Size::square(1024)));
        assert_eq!(
            manifest.asset("app_icon").and_then(|asset| asset.compression),
            Some(CompressionSetting::Level(6))
        );
    }

    #[test]
    fn resolves_asset_with_defaults() {
        let manifest = AssetManifest::from_toml_str(SAMPLE).unwrap();
        let resolved = manifest
            .asset("splash_pro")
            .unwrap()
            .resolve("splash_pro", &manifest.defaults);
        assert_eq!(resolved.glyph, "cup-solid");
        assert_eq!(resolved.size, Some(Size::square(1024)));
        assert_eq!(resolved.color, Some(ColorSetting::Rgba));
        assert_eq!(resolved.supersample, Some(SupersampleSetting::X4));
        assert_eq!(resolved.compression, Some(CompressionSetting::Best));
        assert_eq!(resolved.clear, Some(ClearColor([255, 255, 255, 0])));
    }

    #[test]
    fn unset_fields_stay_open() {
        let manifest = AssetManifest::from_toml_str(
            r#"
version = 1

[assets.logo]
glyph = "bean"
output = "logo.png"
"#,
        )
        .unwrap();
        let resolved = manifest.select(&[]).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "logo");
        assert_eq!(resolved[0].size, None);
        assert_eq!(resolved[0].supersample, None);
    }

    #[test]
    fn selects_named_assets_in_request_order() {
        let manifest = AssetManifest::from_toml_str(SAMPLE).unwrap();
        let names = vec!["splash".to_string(), "app_icon".to_string()];
        let resolved = manifest.select(&names).unwrap();
        let picked: Vec<_> = resolved.iter().map(|asset| asset.name.as_str()).collect();
        assert_eq!(picked, ["splash", "app_icon"]);

        let err = manifest.select(&["missing".to_string()]).unwrap_err();
        assert!(err.to_string().contains("unknown asset 'missing'"));
    }

    #[test]
    fn rejects_non_png_output() {
        let err = AssetManifest::from_toml_str(
            r#"
version = 1

[assets.logo]
glyph = "bean"
output = "logo.jpg"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unsupported_version_and_empty_manifest() {
        let future = r#"
version = 2
[assets.a]
glyph = "bean"
output = "a.png"
"#;
        let err = AssetManifest::from_toml_str(future).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = AssetManifest::from_toml_str("version = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_duplicate_outputs() {
        let err = AssetManifest::from_toml_str(
            r#"
version = 1

[assets.one]
glyph = "bean"
output = "same.png"

[assets.two]
glyph = "cup-pen"
output = "same.png"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("same.png"));
    }

    #[test]
    fn rejects_zero_size_and_bad_supersample() {
        let zero = r#"
version = 1
[defaults]
size = "0x10"
[assets.a]
glyph = "bean"
output = "a.png"
"#;
        assert!(matches!(
            AssetManifest::from_toml_str(zero),
            Err(ConfigError::Invalid(_))
        ));

        let bad = r#"
version = 1
[assets.a]
glyph = "bean"
output = "a.png"
supersample = 3
"#;
        assert!(matches!(
            AssetManifest::from_toml_str(bad),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn parses_setting_strings() {
        assert_eq!(parse_size("512").unwrap(), Size::square(512));
        assert_eq!(
            parse_size("1920X1080").unwrap(),
            Size {
                width: 1920,
                height: 1080
            }
        );
        assert!(parse_size("wide").is_err());
        assert_eq!(parse_color("RGB").unwrap(), ColorSetting::Rgb);
        assert_eq!(parse_supersample("off").unwrap(), SupersampleSetting::Off);
        assert_eq!(parse_compression("9").unwrap(), CompressionSetting::Level(9));
        assert!(parse_compression("10").is_err());
        assert_eq!(parse_clear("#2B1B17").unwrap(), ClearColor([43, 27, 23, 255]));
        assert_eq!(parse_clear("ffffff00").unwrap(), ClearColor([255, 255, 255, 0]));
        assert!(parse_clear("#12345").is_err());
    }
}
