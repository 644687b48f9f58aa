//! Projection geometry engine
//!
//! Pure functions over a [`ProjectorSettings`] / [`SurfaceGeometry`] pair.
//! Nothing here holds state; identical inputs give identical outputs.

pub mod camera;
pub mod coverage;
pub mod distortion;
pub mod keystone;
pub mod luminance;
pub mod throw;
pub mod types;

pub use camera::{calculate_projection_matrix, calculate_view_matrix};
pub use coverage::{
    calculate_coverage_area, calculate_recommendations, optimal_distance, projected_coverage_ratio,
    projector_distance,
};
pub use distortion::{calculate_distortion_map, GRID_SIZE};
pub use keystone::calculate_keystone_correction;
pub use luminance::calculate_luminance_map;
pub use throw::{calculate_image_size, calculate_lens_shift, calculate_throw_distance};
pub use types::{
    DistortionPoint, ImageSize, KeystoneCorrection, LensShift, LuminanceData, ProjectionConfig,
    ProjectorRecommendations, ProjectorSettings, Resolution, SurfaceDimensions, SurfaceGeometry,
    SurfaceType, UvMapping,
};

/// Run every calculator and collect the results.
pub fn calculate_projection(
    settings: &ProjectorSettings,
    surface: &SurfaceGeometry,
) -> ProjectionConfig {
    if surface.surface_type.is_curved() {
        log::debug!(
            "{} surface sampled as a plane at z = {}",
            surface.surface_type.display_name(),
            surface.position.z
        );
    }

    let config = ProjectionConfig {
        projector_position: settings.position,
        projection_matrix: calculate_projection_matrix(settings),
        view_matrix: calculate_view_matrix(settings),
        keystone_correction: calculate_keystone_correction(settings, surface),
        distortion_map: calculate_distortion_map(settings, surface),
        coverage_area: calculate_coverage_area(settings, surface),
        recommended_settings: calculate_recommendations(settings, surface),
        luminance_map: calculate_luminance_map(settings, surface),
    };

    log::debug!(
        "projection: coverage {:.1}%, center brightness {:.0}, keystone h {:.2}° v {:.2}°",
        config.coverage_area * 100.0,
        config.luminance_map.center_brightness,
        config.keystone_correction.horizontal_keystone,
        config.keystone_correction.vertical_keystone
    );

    config
}
