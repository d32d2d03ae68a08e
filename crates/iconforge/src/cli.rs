use std::path::{Path, PathBuf};

use assetconfig::{
    parse_clear, parse_color, parse_compression, parse_size, parse_supersample, ClearColor,
    ColorSetting, CompressionSetting, Size, SupersampleSetting,
};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "iconforge",
    author,
    version,
    about = "Procedural icon and splash renderer",
    arg_required_else_help = false
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Assets to render (all assets in the manifest when omitted).
    #[arg(value_name = "ASSET")]
    pub assets: Vec<String>,

    /// Asset manifest; defaults to `./iconforge.toml`, then the user config directory.
    #[arg(long, value_name = "FILE", env = "ICONFORGE_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Directory relative outputs are written to; overrides `out_dir` in the manifest.
    #[arg(long, value_name = "DIR", env = "ICONFORGE_OUT_DIR")]
    pub out_dir: Option<PathBuf>,

    /// Print what would be rendered without writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a single glyph to a PNG file.
    Glyph(GlyphArgs),
    /// List the glyph catalog.
    Glyphs,
    /// Sample a PNG for transparent pixels.
    Check(CheckArgs),
    /// Keep bright pixels of an image and make everything else transparent.
    Mask(MaskArgs),
}

#[derive(Parser, Debug)]
pub struct GlyphArgs {
    /// Catalog name (see `iconforge glyphs`).
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Destination PNG path.
    #[arg(long, short, value_name = "PATH", value_parser = parse_png_path)]
    pub output: PathBuf,

    /// Canvas size (`512` or `WIDTHxHEIGHT`); defaults to the glyph's design size.
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    pub size: Option<Size>,

    /// Colour mode: `rgb` or `rgba`.
    #[arg(long, value_name = "MODE", value_parser = parse_color)]
    pub color: Option<ColorSetting>,

    /// Supersampling grid per axis: `1`, `2` or `4`.
    #[arg(long, value_name = "N", value_parser = parse_supersample)]
    pub supersample: Option<SupersampleSetting>,

    /// zlib effort: `fast`, `default`, `best` or a level `0`-`9`.
    #[arg(long, value_name = "LEVEL", value_parser = parse_compression)]
    pub compression: Option<CompressionSetting>,

    /// Colour of uncovered supersampled pixels (`#RRGGBB` or `#RRGGBBAA`).
    #[arg(long, value_name = "HEX", value_parser = parse_clear)]
    pub clear: Option<ClearColor>,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// PNG file to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Sample every N-th row.
    #[arg(long, value_name = "N", default_value_t = 100)]
    pub row_step: u32,

    /// Number of leading pixels sampled in each visited row.
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub columns: u32,

    /// Inspect every pixel instead of the sample grid.
    #[arg(long)]
    pub full: bool,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct MaskArgs {
    /// Source image (PNG, JPEG, BMP or GIF).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Destination PNG path.
    #[arg(value_name = "OUTPUT", value_parser = parse_png_path)]
    pub output: PathBuf,

    /// Pixels keep their colour only if red, green and blue all exceed this.
    #[arg(long, value_name = "0-255", default_value_t = 200)]
    pub threshold: u8,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_png_path(value: &str) -> Result<PathBuf, String> {
    let path = Path::new(value.trim());
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => Ok(path.to_path_buf()),
        None => Err("output path has no extension; expected .png".to_string()),
        Some(other) => Err(format!(
            "unsupported output format '.{other}'; expected .png"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn png_paths_only() {
        assert!(parse_png_path("out/icon.PNG").is_ok());
        assert!(parse_png_path("out/icon.jpg").is_err());
        assert!(parse_png_path("out/icon").is_err());
    }

    #[test]
    fn glyph_subcommand_parses_overrides() {
        let cli = Cli::try_parse_from([
            "iconforge",
            "glyph",
            "bean",
            "--output",
            "bean.png",
            "--size",
            "64x32",
            "--supersample",
            "4",
            "--compression",
            "best",
        ])
        .unwrap();
        let Some(Command::Glyph(args)) = cli.command else {
            panic!("expected glyph subcommand");
        };
        assert_eq!(args.name, "bean");
        assert_eq!(
            args.size,
            Some(Size {
                width: 64,
                height: 32
            })
        );
        assert_eq!(args.supersample, Some(SupersampleSetting::X4));
        assert_eq!(args.compression, Some(CompressionSetting::Best));
        assert_eq!(args.color, None);
    }

    #[test]
    fn bare_invocation_renders_named_assets() {
        let cli = Cli::try_parse_from(["iconforge", "--dry-run", "splash", "app_icon"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.run.dry_run);
        assert_eq!(cli.run.assets, ["splash", "app_icon"]);
    }
}
