//! Pure geometry: volume/surface-area formulas and hotspot placement.
//!
//! Both functions here are deterministic functions of their inputs with no
//! hidden state, so zone recreation and analysis stay idempotent.

use std::f64::consts::{FRAC_PI_2, PI};

use solidbuild_data::{PartKind, ShapeType};

/// Computed metrics for one item at its scaled dimensions.
///
/// Volume and surface area are formatted to two decimals, the way the UI
/// displays them; the numeric radius/height actually used ride along.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeMetrics {
    pub volume: String,
    pub surface_area: String,
    pub radius: f64,
    pub height: f64,
}

/// Compute volume and surface area for a shape at the given (already scaled)
/// dimensions. `height` is ignored for spheres and reported back as 0.
pub fn calculate(shape: ShapeType, radius: f64, height: f64) -> ShapeMetrics {
    let (volume, surface_area, height) = match shape {
        ShapeType::Cylinder => (
            PI * radius * radius * height,
            2.0 * PI * radius * (radius + height),
            height,
        ),
        ShapeType::Cone => {
            let slant = (radius * radius + height * height).sqrt();
            (
                PI * radius * radius * height / 3.0,
                PI * radius * (radius + slant),
                height,
            )
        }
        ShapeType::Sphere => (
            4.0 / 3.0 * PI * radius.powi(3),
            4.0 * PI * radius * radius,
            0.0,
        ),
    };

    ShapeMetrics {
        volume: format!("{volume:.2}"),
        surface_area: format!("{surface_area:.2}"),
        radius,
        height,
    }
}

/// Spatial placement of one hotspot zone: position plus Euler rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZonePlacement {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
}

/// Place a hotspot for a part relative to its item's scaled base position.
///
/// Circle slots lie flat (-pi/2 around X) and shift to the top or bottom face
/// when the part id says so; radius/height marker ids shift along the X or Y
/// axis by the scaled dimension. Rectangle (lateral surface) and sphere parts
/// sit at the item base.
pub fn hotspot_placement(
    kind: PartKind,
    part_id: &str,
    scaled_base: [f64; 3],
    radius: f64,
    height: f64,
    scale: f64,
) -> ZonePlacement {
    let id = part_id.to_ascii_lowercase();
    let mut position = scaled_base;
    let mut rotation = [0.0; 3];

    if let PartKind::Circle = kind {
        rotation = [-FRAC_PI_2, 0.0, 0.0];
        if id.contains("atas") || id.contains("top") {
            position[1] += height / 2.0 * scale;
        } else if id.contains("bawah") || id.contains("bottom") || id.contains("alas") {
            position[1] -= height / 2.0 * scale;
        }
    }

    // Measurement-marker ids add their own axis offset.
    if id.contains("jari") || id.contains("radius") {
        position[0] += radius * scale;
    } else if id.contains("tinggi") || id.contains("height") {
        position[1] += height / 2.0 * scale;
    }

    ZonePlacement { position, rotation }
}
