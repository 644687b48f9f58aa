//! Luminance estimation
//!
//! Inverse-square brightness model with a fixed edge falloff.

use glam::DVec2;

use super::coverage::projector_distance;
use super::types::{LuminanceData, ProjectorSettings, SurfaceGeometry};

/// Maps lumens/m² into the display range used by the UI
pub const LUMINANCE_SCALE: f64 = 10_000.0;
/// Edge brightness relative to the center
pub const EDGE_FALLOFF: f64 = 0.75;

pub fn calculate_luminance_map(
    settings: &ProjectorSettings,
    surface: &SurfaceGeometry,
) -> LuminanceData {
    let distance = projector_distance(settings, surface);

    let center_brightness = if distance > 0.0 {
        settings.brightness / (distance * distance) * LUMINANCE_SCALE
    } else {
        0.0
    };
    let edge_brightness = center_brightness * EDGE_FALLOFF;
    let uniformity = if center_brightness != 0.0 && center_brightness.is_finite() {
        edge_brightness / center_brightness
    } else {
        1.0
    };

    // Never true for a positive distance. The intended threshold is unknown,
    // so the check is kept as-is.
    let max_distance = distance * 1.5;
    let mut hotspots = Vec::new();
    if distance < max_distance * 0.5 {
        hotspots.push(DVec2::new(0.5, 0.5));
    }

    LuminanceData {
        center_brightness,
        edge_brightness,
        uniformity,
        hotspots,
    }
}
