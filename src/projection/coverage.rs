//! Coverage estimation and projector recommendations
//!
//! The thresholds below are policy values, not derived optics.

use glam::DVec2;

use super::types::{ProjectorRecommendations, ProjectorSettings, SurfaceGeometry};

/// Assumed ambient light level in lux
pub const AMBIENT_LIGHT_LUX: f64 = 50.0;
/// Multiplier covering projection efficiency losses
pub const EFFICIENCY_MULTIPLIER: f64 = 2.0;
/// Lumen floor regardless of surface size
pub const MIN_BRIGHTNESS_FLOOR: f64 = 3000.0;
/// Fraction of the surface width the image should fill
pub const DESIRED_WIDTH_FRACTION: f64 = 0.9;
/// Lens shift suggestion scale
pub const LENS_SHIFT_SCALE: f64 = 0.1;
/// Surface area (m²) above which edge blending is recommended
pub const EDGE_BLEND_AREA: f64 = 50.0;
/// Surface area (m²) above which several projectors are recommended
pub const MULTI_PROJECTOR_AREA: f64 = 100.0;
/// Surface width (m) above which several projectors are recommended
pub const MULTI_PROJECTOR_WIDTH: f64 = 15.0;

/// Straight-line distance from the projector to the surface center.
pub fn projector_distance(settings: &ProjectorSettings, surface: &SurfaceGeometry) -> f64 {
    settings.position.distance(surface.position)
}

/// Throw distance that fills 90% of the surface width.
pub fn optimal_distance(settings: &ProjectorSettings, surface: &SurfaceGeometry) -> f64 {
    surface.dimensions.width * DESIRED_WIDTH_FRACTION * settings.throw_ratio
}

/// Projected area over surface area, before clamping.
///
/// Returns `0.0` when the surface has no area or the ratio is undefined.
pub fn projected_coverage_ratio(settings: &ProjectorSettings, surface: &SurfaceGeometry) -> f64 {
    let surface_area = surface.dimensions.area();
    if surface_area == 0.0 || !surface_area.is_finite() {
        log::debug!("surface has no usable area, coverage is zero");
        return 0.0;
    }

    let projected_width = projector_distance(settings, surface) / settings.throw_ratio;
    let projected_height = projected_width / settings.resolution.aspect();
    let ratio = projected_width * projected_height / surface_area;

    if ratio.is_nan() {
        0.0
    } else {
        ratio
    }
}

/// Fraction of the surface covered by the projected image, in `[0, 1]`.
pub fn calculate_coverage_area(settings: &ProjectorSettings, surface: &SurfaceGeometry) -> f64 {
    projected_coverage_ratio(settings, surface).clamp(0.0, 1.0)
}

pub fn calculate_recommendations(
    settings: &ProjectorSettings,
    surface: &SurfaceGeometry,
) -> ProjectorRecommendations {
    let surface_area = surface.dimensions.area();
    let required_lumens = surface_area * AMBIENT_LIGHT_LUX * EFFICIENCY_MULTIPLIER;

    let offset = settings.position - surface.position;
    let distance = offset.length();
    let suggested_lens_shift = if distance > 0.0 {
        DVec2::new(offset.x.abs(), offset.y.abs()) / distance * LENS_SHIFT_SCALE
    } else {
        DVec2::ZERO
    };

    ProjectorRecommendations {
        minimum_brightness: required_lumens.max(MIN_BRIGHTNESS_FLOOR),
        optimal_distance: optimal_distance(settings, surface),
        suggested_lens_shift,
        edge_blending_required: surface_area > EDGE_BLEND_AREA,
        multi_projector_setup: surface_area > MULTI_PROJECTOR_AREA
            || surface.dimensions.width > MULTI_PROJECTOR_WIDTH,
    }
}
