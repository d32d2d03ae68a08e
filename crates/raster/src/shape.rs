//! Implicit shapes composed from strict inequality tests.
//!
//! A glyph is a [`LayeredShader`]: a coordinate [`Transform`] followed by an
//! ordered list of [`Layer`]s. The first layer whose [`Region`] contains the
//! sample decides its colour, so cut-outs are listed before the filled shape
//! they punch through. Samples no layer claims get the fallback colour.
//!
//! Every boundary test is strict (`<`, `>`), so a sample lying exactly on an
//! edge belongs to neither side of it.
use std::ops::Not;

use crate::shader::Shader;
use crate::types::Rgba;

/// A point in glyph-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    fn pick(self, point: Point) -> f64 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
        }
    }
}

/// Maps canvas coordinates into the space a glyph is designed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Canvas pixels, unchanged.
    Identity,
    /// Pixel offsets from an anchor, divided per axis by `stretch`.
    ///
    /// The anchor is a fraction of the canvas size (`(0.5, 0.5)` is the
    /// centre).
    Pixels { anchor: (f64, f64), stretch: (f64, f64) },
    /// Offsets from an anchor in units of half the scaled canvas, so the
    /// glyph spans roughly `-1..1` inside `scale` of the canvas.
    Normalized { anchor: (f64, f64), scale: f64 },
}

impl Transform {
    pub fn apply(&self, x: f64, y: f64, width: f64, height: f64) -> Point {
        match *self {
            Transform::Identity => Point::new(x, y),
            Transform::Pixels { anchor, stretch } => Point::new(
                (x - width * anchor.0) / stretch.0,
                (y - height * anchor.1) / stretch.1,
            ),
            Transform::Normalized { anchor, scale } => Point::new(
                (x - width * anchor.0) / (width * scale / 2.0),
                (y - height * anchor.1) / (height * scale / 2.0),
            ),
        }
    }
}

/// Quadratic form `((x - cx) / ax)² + ((y - cy) / ay)²`.
///
/// Thresholding it gives filled ellipses; a band between two levels gives
/// rings and outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conic {
    pub center: Point,
    pub axes: (f64, f64),
}

impl Conic {
    pub fn level(&self, point: Point) -> f64 {
        let dx = (point.x - self.center.x) / self.axes.0;
        let dy = (point.y - self.center.y) / self.axes.1;
        dx * dx + dy * dy
    }

    /// Points with `level < limit`.
    pub fn below(self, limit: f64) -> Region {
        self.between(f64::NEG_INFINITY, limit)
    }

    /// Points with `low < level < high`.
    pub fn between(self, low: f64, high: f64) -> Region {
        Region::Conic {
            conic: self,
            low,
            high,
        }
    }
}

/// Ellipse-shaped quadratic centred at `(cx, cy)`.
pub fn conic(cx: f64, cy: f64, ax: f64, ay: f64) -> Conic {
    Conic {
        center: Point::new(cx, cy),
        axes: (ax, ay),
    }
}

/// Circular quadratic: `level` is the squared distance from `(cx, cy)`.
pub fn circle(cx: f64, cy: f64) -> Conic {
    conic(cx, cy, 1.0, 1.0)
}

/// Membership test over glyph-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    /// `low < conic.level(p) < high`.
    Conic { conic: Conic, low: f64, high: f64 },
    /// `min < p.axis < max`.
    Span { axis: Axis, min: f64, max: f64 },
    /// Vertical sine stroke: `|x - (center_x + amplitude·sin((y + phase)·frequency))| < half_width`.
    Wave {
        center_x: f64,
        amplitude: f64,
        frequency: f64,
        phase: f64,
        half_width: f64,
    },
    /// Wedge narrowing downwards: `|x - center_x| < half_width·(1 - (y - top) / length)`.
    Taper {
        center_x: f64,
        top: f64,
        length: f64,
        half_width: f64,
    },
    /// Repeating bands: `|p.axis - origin| mod period < thickness`.
    Stripes {
        axis: Axis,
        origin: f64,
        period: f64,
        thickness: f64,
    },
    All(Vec<Region>),
    Any(Vec<Region>),
    Not(Box<Region>),
}

impl Region {
    pub fn x_between(min: f64, max: f64) -> Self {
        Region::Span {
            axis: Axis::X,
            min,
            max,
        }
    }

    pub fn y_between(min: f64, max: f64) -> Self {
        Region::Span {
            axis: Axis::Y,
            min,
            max,
        }
    }

    pub fn x_above(min: f64) -> Self {
        Self::x_between(min, f64::INFINITY)
    }

    pub fn x_below(max: f64) -> Self {
        Self::x_between(f64::NEG_INFINITY, max)
    }

    pub fn y_above(min: f64) -> Self {
        Self::y_between(min, f64::INFINITY)
    }

    pub fn y_below(max: f64) -> Self {
        Self::y_between(f64::NEG_INFINITY, max)
    }

    /// Open rectangle `(x0, x1) × (y0, y1)`.
    pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Region::All(vec![Self::x_between(x0, x1), Self::y_between(y0, y1)])
    }

    /// `|x - center_x| < half_width`.
    pub fn column(center_x: f64, half_width: f64) -> Self {
        Self::x_between(center_x - half_width, center_x + half_width)
    }

    pub fn and(self, other: Region) -> Self {
        match self {
            Region::All(mut parts) => {
                parts.push(other);
                Region::All(parts)
            }
            region => Region::All(vec![region, other]),
        }
    }

    pub fn or(self, other: Region) -> Self {
        match self {
            Region::Any(mut parts) => {
                parts.push(other);
                Region::Any(parts)
            }
            region => Region::Any(vec![region, other]),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        match self {
            Region::Conic { conic, low, high } => {
                let level = conic.level(p);
                *low < level && level < *high
            }
            Region::Span { axis, min, max } => {
                let value = axis.pick(p);
                *min < value && value < *max
            }
            Region::Wave {
                center_x,
                amplitude,
                frequency,
                phase,
                half_width,
            } => {
                let offset = center_x + amplitude * ((p.y + phase) * frequency).sin();
                (p.x - offset).abs() < *half_width
            }
            Region::Taper {
                center_x,
                top,
                length,
                half_width,
            } => {
                let width = half_width * (1.0 - (p.y - top) / length);
                (p.x - center_x).abs() < width
            }
            Region::Stripes {
                axis,
                origin,
                period,
                thickness,
            } => (axis.pick(p) - origin).abs() % period < *thickness,
            Region::All(parts) => parts.iter().all(|part| part.contains(p)),
            Region::Any(parts) => parts.iter().any(|part| part.contains(p)),
            Region::Not(inner) => !inner.contains(p),
        }
    }
}

impl Not for Region {
    type Output = Region;

    fn not(self) -> Region {
        match self {
            Region::Not(inner) => *inner,
            region => Region::Not(Box::new(region)),
        }
    }
}

/// A region painted with one colour.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub label: &'static str,
    pub region: Region,
    pub paint: Rgba,
}

/// Ordered, first-match-wins stack of layers.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredShader {
    transform: Transform,
    layers: Vec<Layer>,
    fallback: Rgba,
}

impl LayeredShader {
    pub fn new(transform: Transform, fallback: Rgba) -> Self {
        Self {
            transform,
            layers: Vec::new(),
            fallback,
        }
    }

    /// Appends a layer below the ones already added.
    pub fn layer(mut self, label: &'static str, region: Region, paint: Rgba) -> Self {
        self.layers.push(Layer {
            label,
            region,
            paint,
        });
        self
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn fallback(&self) -> Rgba {
        self.fallback
    }

    /// The layer that claims `point`, if any.
    pub fn hit(&self, point: Point) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.region.contains(point))
    }

    /// Label of the layer claiming a canvas sample, for debugging designs.
    pub fn probe(&self, x: f64, y: f64, width: f64, height: f64) -> Option<&'static str> {
        self.hit(self.transform.apply(x, y, width, height))
            .map(|layer| layer.label)
    }
}

impl Shader for LayeredShader {
    fn shade(&self, x: f64, y: f64, width: f64, height: f64) -> Rgba {
        let point = self.transform.apply(x, y, width, height);
        self.hit(point).map_or(self.fallback, |layer| layer.paint)
    }
}
