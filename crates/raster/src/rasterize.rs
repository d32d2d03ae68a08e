use pngcodec::Encoder;
use tracing::debug;

use crate::canvas::Canvas;
use crate::shader::Shader;
use crate::types::{RasterConfig, Rgba};
use crate::RasterError;

const PROGRESS_ROWS: u32 = 128;

/// Evaluates `shader` for every pixel of a new canvas.
///
/// Without supersampling the shader is called once at the pixel origin
/// `(x, y)` and its colour is stored unchanged. With an `s×s` grid the shader
/// is called at `(x + i/s, y + j/s)`, or at `(x + (i + ½)/s, y + (j + ½)/s)`
/// for [`crate::SamplePosition::Centre`], and the samples are merged by
/// [`resolve_samples`].
pub fn rasterize<S>(config: &RasterConfig, shader: &S) -> Result<Canvas, RasterError>
where
    S: Shader + ?Sized,
{
    let mut canvas = Canvas::new(config.width, config.height, config.color)?;
    let factor = config.supersample.factor();
    let offsets: Vec<f64> = (0..factor)
        .map(|i| config.position.offset(i, factor))
        .collect();
    let (width, height) = (config.width as f64, config.height as f64);
    let mut samples = Vec::with_capacity((factor * factor) as usize);

    for y in 0..config.height {
        if y % PROGRESS_ROWS == 0 {
            debug!(row = y, rows = config.height, "rasterizing");
        }
        for x in 0..config.width {
            samples.clear();
            for oy in &offsets {
                for ox in &offsets {
                    samples.push(shader.shade(x as f64 + ox, y as f64 + oy, width, height));
                }
            }
            canvas.put(x, y, resolve_samples(&samples, config.clear));
        }
    }

    Ok(canvas)
}

/// Rasterizes and encodes in one step.
pub fn render_png<S>(
    config: &RasterConfig,
    shader: &S,
    encoder: &Encoder,
) -> Result<Vec<u8>, RasterError>
where
    S: Shader + ?Sized,
{
    rasterize(config, shader)?.encode(encoder)
}

/// Merges the sub-samples of one pixel.
///
/// Alpha is the truncated mean of the sample alphas. Colour channels are the
/// alpha-weighted mean `Σ c·a / Σ a`, truncated, so fully transparent
/// samples contribute nothing and edges keep the shape's colour instead of
/// darkening towards the background. A pixel whose mean alpha truncates to
/// zero becomes `clear`. A single sample is returned unchanged.
pub fn resolve_samples(samples: &[Rgba], clear: Rgba) -> Rgba {
    match samples {
        [] => clear,
        [single] => *single,
        _ => {
            let mut alpha_sum = 0u64;
            let mut weighted = [0u64; 3];
            for sample in samples {
                let alpha = u64::from(sample.a);
                alpha_sum += alpha;
                weighted[0] += u64::from(sample.r) * alpha;
                weighted[1] += u64::from(sample.g) * alpha;
                weighted[2] += u64::from(sample.b) * alpha;
            }

            let alpha = alpha_sum / samples.len() as u64;
            if alpha == 0 {
                return clear;
            }
            let channel = |sum: u64| (sum / alpha_sum).min(255) as u8;
            Rgba::new(
                channel(weighted[0]),
                channel(weighted[1]),
                channel(weighted[2]),
                alpha as u8,
            )
        }
    }
}
