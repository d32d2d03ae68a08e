//! Coffee bean marks used for launcher icons.

use raster::{circle, conic, LayeredShader, Region, Rgba, Transform};

use crate::palette::{CLEAR, COFFEE, GOLD, WHITE};

/// White bean with a wavy centre crease, on transparency.
pub fn bean() -> LayeredShader {
    let body = conic(0.0, 0.0, 1.0, 1.5).below(1.0);
    LayeredShader::new(
        Transform::Normalized {
            anchor: (0.5, 0.5),
            scale: 0.45,
        },
        CLEAR,
    )
    .layer(
        "crease",
        body.clone().and(Region::Wave {
            center_x: 0.0,
            amplitude: 0.15,
            frequency: 3.0,
            phase: 0.0,
            half_width: 0.08,
        }),
        CLEAR,
    )
    .layer("bean", body, WHITE)
}

/// Gold bean that doubles as a pen nib: straight slit ending in a breather
/// hole. Measured in pixels of a 1024 canvas.
struct NibBean {
    stretch: (f64, f64),
    radius: f64,
    slit_half: f64,
    slit_end: f64,
    hole_y: f64,
    hole_radius: f64,
}

impl NibBean {
    fn shader(&self, background: Rgba, foreground: Rgba) -> LayeredShader {
        let body = circle(0.0, 0.0).below(self.radius * self.radius);
        LayeredShader::new(
            Transform::Pixels {
                anchor: (0.5, 0.5),
                stretch: self.stretch,
            },
            background,
        )
        .layer(
            "slit",
            body.clone()
                .and(Region::column(0.0, self.slit_half))
                .and(Region::y_below(self.slit_end)),
            background,
        )
        .layer(
            "breather hole",
            body.clone()
                .and(circle(0.0, self.hole_y).below(self.hole_radius * self.hole_radius)),
            background,
        )
        .layer("bean", body, foreground)
    }
}

/// Gold nib-bean on solid dark coffee, for opaque launcher icons.
pub fn bean_nib() -> LayeredShader {
    NibBean {
        stretch: (0.8, 1.2),
        radius: 280.0,
        slit_half: 12.0,
        slit_end: 100.0,
        hole_y: 120.0,
        hole_radius: 30.0,
    }
    .shader(COFFEE, GOLD)
}

/// Smaller nib-bean on transparency, sized for the adaptive icon safe zone.
pub fn bean_nib_foreground() -> LayeredShader {
    NibBean {
        stretch: (0.6, 0.8),
        radius: 250.0,
        slit_half: 15.0,
        slit_end: 80.0,
        hole_y: 100.0,
        hole_radius: 25.0,
    }
    .shader(CLEAR, GOLD)
}
