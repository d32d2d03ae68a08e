//! Coffee cup designs used for splash screens.
//!
//! All of them live in normalized space: the origin sits near the middle of
//! the cup and `y` grows downwards, so steam and the pen nib have negative
//! `y`.

use raster::{circle, conic, LayeredShader, Region, Transform};

use crate::palette::{CLEAR, WHITE};

/// Fountain-pen nib drawn above a cup.
///
/// Local nib coordinates are relative to `origin`; `pdy = y - origin`.
struct Nib {
    x: f64,
    origin: f64,
    half_width: f64,
    span: (f64, f64),
    taper_top: f64,
    taper_length: f64,
    taper_width: f64,
    slit: (f64, f64),
    eyelet: Option<(f64, f64)>,
}

impl Nib {
    fn outline(&self) -> Region {
        Region::column(self.x, self.half_width)
            .and(Region::y_between(
                self.origin + self.span.0,
                self.origin + self.span.1,
            ))
            .and(Region::Taper {
                center_x: self.x,
                top: self.origin + self.taper_top,
                length: self.taper_length,
                half_width: self.taper_width,
            })
    }

    fn paint(&self, shader: LayeredShader) -> LayeredShader {
        let outline = self.outline();
        let (slit_half, slit_end) = self.slit;
        let mut shader = shader.layer(
            "nib slit",
            outline
                .clone()
                .and(Region::column(self.x, slit_half))
                .and(Region::y_below(self.origin + slit_end)),
            CLEAR,
        );
        if let Some((offset, radius_sq)) = self.eyelet {
            shader = shader.layer(
                "nib eyelet",
                outline
                    .clone()
                    .and(circle(self.x, self.origin + offset).below(radius_sq)),
                CLEAR,
            );
        }
        shader.layer("nib", outline, WHITE)
    }
}

/// A sine stroke over the vertical `span`.
fn steam(amplitude: f64, frequency: f64, phase: f64, half_width: f64, span: (f64, f64)) -> Region {
    Region::y_between(span.0, span.1).and(Region::Wave {
        center_x: 0.0,
        amplitude,
        frequency,
        phase,
        half_width,
    })
}

/// Line-art cup on a saucer with a single steam stroke ending in a nib.
pub fn cup_line() -> LayeredShader {
    let shader = LayeredShader::new(
        Transform::Normalized {
            anchor: (0.5, 0.56),
            scale: 0.52,
        },
        CLEAR,
    )
    .layer(
        "bowl",
        conic(0.0, 0.0, 1.0, 0.75)
            .between(0.58, 0.65)
            .and(Region::y_above(-0.15)),
        WHITE,
    )
    .layer(
        "bottom",
        Region::column(0.0, 0.45).and(Region::y_between(0.4, 0.48)),
        WHITE,
    )
    .layer(
        "handle",
        conic(0.75, 0.1, 1.2, 1.0)
            .between(0.08, 0.15)
            .and(Region::x_above(0.75)),
        WHITE,
    )
    .layer(
        "saucer",
        conic(0.0, 0.55, 1.2, 0.2)
            .between(0.4, 0.5)
            .and(Region::y_above(0.55)),
        WHITE,
    )
    .layer("steam", steam(0.15, 5.0, 0.55, 0.03, (-1.35, -0.55)), WHITE);

    Nib {
        x: 0.15 * (-4.0f64).sin(),
        origin: -0.95,
        half_width: 0.2,
        span: (-0.15, 0.35),
        taper_top: -0.15,
        taper_length: 0.5,
        taper_width: 0.2,
        slit: (0.012, 0.12),
        eyelet: Some((0.15, 0.0012)),
    }
    .paint(shader)
}

/// Filled cup with a tapered body, saucer, steam and nib.
pub fn cup_solid() -> LayeredShader {
    // The body's lower rim is rounded off by a circle.
    let rim = (!Region::y_above(0.3)).or(circle(0.0, 0.1).below(0.3));
    let shader = LayeredShader::new(
        Transform::Normalized {
            anchor: (0.5, 0.54),
            scale: 0.55,
        },
        CLEAR,
    )
    .layer(
        "body",
        Region::y_between(-0.1, 0.4)
            .and(Region::Taper {
                center_x: 0.0,
                top: 0.0,
                length: 3.5,
                half_width: 0.7,
            })
            .and(rim),
        WHITE,
    )
    .layer(
        "bowl",
        conic(0.0, 0.0, 1.0, 0.8)
            .below(0.45)
            .and(Region::y_between(-0.1, 0.4)),
        WHITE,
    )
    .layer(
        "handle",
        circle(0.65, 0.15)
            .between(0.04, 0.12)
            .and(Region::x_above(0.65)),
        WHITE,
    )
    .layer(
        "saucer",
        conic(0.0, 0.55, 1.1, 0.2)
            .below(0.4)
            .and(Region::y_between(0.55, 0.65)),
        WHITE,
    )
    .layer("steam", steam(0.12, 4.5, 0.5, 0.04, (-1.4, -0.4)), WHITE);

    Nib {
        x: 0.12 * (-4.05f64).sin(),
        origin: -0.95,
        half_width: 0.22,
        span: (-0.15, 0.4),
        taper_top: -0.1,
        taper_length: 0.5,
        taper_width: 0.22,
        slit: (0.015, 0.15),
        eyelet: Some((0.2, 0.0015)),
    }
    .paint(shader)
}

/// Open cup outline with a thicker steam stroke.
pub fn cup_steam() -> LayeredShader {
    let shader = LayeredShader::new(
        Transform::Normalized {
            anchor: (0.5, 0.55),
            scale: 0.55,
        },
        CLEAR,
    )
    .layer(
        "bowl",
        conic(0.0, 0.0, 1.0, 0.7)
            .between(0.5, 0.65)
            .and(Region::y_above(-0.1)),
        WHITE,
    )
    .layer(
        "bottom",
        Region::column(0.0, 0.45).and(Region::y_between(0.4, 0.5)),
        WHITE,
    )
    .layer(
        "handle",
        circle(0.72, 0.15)
            .between(0.08, 0.16)
            .and(Region::x_above(0.72)),
        WHITE,
    )
    .layer("steam", steam(0.15, 4.0, 0.5, 0.04, (-0.9, -0.1)), WHITE);

    Nib {
        x: 0.15 * (-1.6f64).sin(),
        origin: -0.95,
        half_width: 0.2,
        span: (-0.1, 0.3),
        taper_top: -0.1,
        taper_length: 0.45,
        taper_width: 0.18,
        slit: (0.01, 0.1),
        eyelet: Some((0.12, 0.001)),
    }
    .paint(shader)
}

/// Minimal cup with a nib standing in for the steam.
pub fn cup_pen() -> LayeredShader {
    let shader = LayeredShader::new(
        Transform::Normalized {
            anchor: (0.5, 0.5),
            scale: 0.5,
        },
        CLEAR,
    )
    .layer(
        "bowl",
        conic(0.0, 0.0, 1.0, 0.8)
            .below(0.6)
            .and(Region::y_above(-0.1)),
        WHITE,
    )
    .layer(
        "handle",
        circle(0.7, 0.2)
            .between(0.05, 0.15)
            .and(Region::x_above(0.7)),
        WHITE,
    );

    Nib {
        x: 0.0,
        origin: -0.6,
        half_width: 0.15,
        span: (-0.4, 0.2),
        taper_top: -0.4,
        taper_length: 0.6,
        taper_width: 0.15,
        slit: (0.01, 0.0),
        eyelet: None,
    }
    .paint(shader)
}
