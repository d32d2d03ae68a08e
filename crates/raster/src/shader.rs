use crate::types::Rgba;

/// Per-sample colour function evaluated by the rasterizer.
///
/// `x` and `y` are absolute canvas coordinates (fractional when
/// supersampling); `width` and `height` are the canvas size. Implementations
/// must be pure: the rasterizer may call them in any order and any number of
/// times.
pub trait Shader {
    fn shade(&self, x: f64, y: f64, width: f64, height: f64) -> Rgba;
}

impl<F> Shader for F
where
    F: Fn(f64, f64, f64, f64) -> Rgba,
{
    fn shade(&self, x: f64, y: f64, width: f64, height: f64) -> Rgba {
        self(x, y, width, height)
    }
}

