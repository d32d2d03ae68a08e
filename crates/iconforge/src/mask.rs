use anyhow::{Context, Result};
use pngcodec::{ColorType, Encoder};
use tracing::info;

use crate::cli::MaskArgs;

pub fn run(args: MaskArgs) -> Result<()> {
    let image = image::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    let mut pixels = image.into_raw();
    let kept = apply_threshold(&mut pixels, args.threshold);

    let bytes = Encoder::new()
        .encode(width, height, ColorType::Rgba, &pixels)
        .context("failed to encode masked image")?;
    pngcodec::write_png(&args.output, &bytes)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        threshold = args.threshold,
        kept,
        "applied brightness mask"
    );
    println!(
        "Transparency applied: {} ({kept} of {} pixels kept)",
        args.output.display(),
        u64::from(width) * u64::from(height)
    );
    Ok(())
}

/// Keeps pixels whose red, green and blue all exceed `threshold`; every
/// other pixel becomes `(0, 0, 0, 0)`. Returns the number of kept pixels.
fn apply_threshold(rgba: &mut [u8], threshold: u8) -> u64 {
    let mut kept = 0;
    for pixel in rgba.chunks_exact_mut(4) {
        if pixel[..3].iter().all(|&channel| channel > threshold) {
            kept += 1;
        } else {
            pixel.fill(0);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bright_pixels_survive_unchanged() {
        let mut pixels = vec![
            255, 255, 255, 255, //
            201, 230, 250, 128, //
            93, 64, 55, 255, //
            255, 255, 200, 255, //
        ];
        let kept = apply_threshold(&mut pixels, 200);
        assert_eq!(kept, 2);
        assert_eq!(
            pixels,
            [
                255, 255, 255, 255, //
                201, 230, 250, 128, //
                0, 0, 0, 0, //
                0, 0, 0, 0, //
            ]
        );
    }
}
