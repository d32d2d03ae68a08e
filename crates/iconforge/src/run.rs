use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use assetconfig::AssetManifest;
use glyphs::{Glyph, RenderHints};
use raster::{render_png, Encoder};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::bindings::Overrides;
use crate::cli::{GlyphArgs, RunArgs};
use crate::paths::AppPaths;

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// One manifest entry ready to render.
struct Job {
    name: String,
    glyph: &'static Glyph,
    hints: RenderHints,
    target: PathBuf,
}

pub fn run(args: RunArgs) -> Result<()> {
    let paths = AppPaths::discover()?;
    let manifest_path = paths.locate_manifest(args.manifest.as_deref())?;
    let manifest = load_manifest(&manifest_path)?;
    let out_dir = paths.output_dir(
        args.out_dir.as_deref(),
        &manifest_path,
        manifest.out_dir.as_deref(),
    );
    debug!(
        manifest = %manifest_path.display(),
        out_dir = %out_dir.display(),
        config = %paths.config_dir().display(),
        assets = manifest.assets.len(),
        "resolved iconforge paths"
    );

    // Resolve everything up front so a typo in one entry fails before any file is written.
    let jobs = manifest
        .select(&args.assets)?
        .into_iter()
        .map(|asset| -> Result<Job> {
            let glyph = glyphs::lookup(&asset.glyph)
                .with_context(|| format!("asset '{}' names an unknown glyph", asset.name))?;
            Ok(Job {
                hints: Overrides::from(&asset).apply(glyph.hints()),
                target: out_dir.join(&asset.output),
                name: asset.name,
                glyph,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    for job in &jobs {
        if args.dry_run {
            println!(
                "Dry-run: {} would render {} -> {} ({})",
                job.name,
                job.glyph.name(),
                job.target.display(),
                describe(&job.hints)
            );
            continue;
        }
        let bytes = render(job.glyph, &job.hints)
            .with_context(|| format!("failed to render asset '{}'", job.name))?;
        write(&job.target, &bytes)?;
        info!(
            asset = %job.name,
            glyph = job.glyph.name(),
            path = %job.target.display(),
            bytes = bytes.len(),
            "rendered asset"
        );
        println!(
            "Rendered {} -> {} ({})",
            job.name,
            job.target.display(),
            describe(&job.hints)
        );
    }

    Ok(())
}

pub fn render_glyph(args: GlyphArgs) -> Result<()> {
    let glyph = glyphs::lookup(&args.name)?;
    let hints = Overrides::from(&args).apply(glyph.hints());
    let bytes = render(glyph, &hints)
        .with_context(|| format!("failed to render glyph '{}'", glyph.name()))?;
    write(&args.output, &bytes)?;
    info!(glyph = glyph.name(), path = %args.output.display(), "rendered glyph");
    println!(
        "Rendered {} -> {} ({})",
        glyph.name(),
        args.output.display(),
        describe(&hints)
    );
    Ok(())
}

pub fn list_glyphs() -> Result<()> {
    println!("Glyphs:");
    for glyph in glyphs::catalog() {
        println!(
            "  {:<20} {:<18} {}",
            glyph.name(),
            describe(&glyph.hints()),
            glyph.summary()
        );
    }
    Ok(())
}

fn load_manifest(path: &Path) -> Result<AssetManifest> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    AssetManifest::from_toml_str(&raw)
        .with_context(|| format!("failed to load manifest {}", path.display()))
}

fn render(glyph: &Glyph, hints: &RenderHints) -> Result<Vec<u8>> {
    debug!(
        glyph = glyph.name(),
        width = hints.width,
        height = hints.height,
        color = %hints.color,
        supersample = hints.supersample.factor(),
        "rendering glyph"
    );
    let encoder = Encoder::new().with_compression(hints.compression);
    Ok(render_png(&hints.raster_config(), &glyph.shader(), &encoder)?)
}

fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    pngcodec::write_png(path, bytes)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn describe(hints: &RenderHints) -> String {
    let mut text = format!("{}x{} {}", hints.width, hints.height, hints.color);
    if hints.supersample.factor() > 1 {
        text.push_str(&format!(" {}x aa", hints.supersample.factor()));
    }
    text
}
