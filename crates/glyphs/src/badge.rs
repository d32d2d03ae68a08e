//! Flat badge icons drawn directly in canvas pixels of a 1024 square.

use raster::{circle, conic, Axis, LayeredShader, Region, Transform};

use crate::palette::{CREAM, MATTE, TERRACOTTA, WHITE};

/// Cup seen from above: rim ring, side handle and ruled "log" lines inside.
pub fn cup_topdown() -> LayeredShader {
    LayeredShader::new(
        Transform::Pixels {
            anchor: (0.5, 0.5),
            stretch: (1.0, 1.0),
        },
        MATTE,
    )
    .layer(
        "rim",
        circle(0.0, 0.0).between(240.0 * 240.0, 260.0 * 260.0),
        CREAM,
    )
    .layer(
        "handle",
        Region::rect(240.0, -60.0, 320.0, 60.0)
            .and(circle(250.0, 0.0).between(40.0 * 40.0, 70.0 * 70.0)),
        CREAM,
    )
    .layer(
        "log lines",
        circle(0.0, 0.0)
            .below(200.0 * 200.0)
            .and(Region::x_between(-120.0, 120.0))
            .and(Region::Stripes {
                axis: Axis::Y,
                origin: 0.0,
                period: 60.0,
                thickness: 10.0,
            }),
        CREAM,
    )
}

/// Bean ticked inside a checkbox outline.
pub fn checkbox_bean() -> LayeredShader {
    let frame = Region::rect(250.0, 250.0, 774.0, 774.0);
    let body = frame
        .clone()
        .and(conic(512.0, 512.0, 0.5, 0.7).below(150.0 * 150.0));
    LayeredShader::new(Transform::Identity, TERRACOTTA)
        .layer(
            "crease",
            body.clone().and(Region::Wave {
                center_x: 512.0,
                amplitude: 15.0,
                frequency: 1.0 / 35.0,
                phase: -512.0,
                half_width: 5.0,
            }),
            TERRACOTTA,
        )
        .layer("bean", body, WHITE)
        .layer(
            "outline",
            frame.and(!Region::rect(270.0, 270.0, 754.0, 754.0)),
            WHITE,
        )
}
