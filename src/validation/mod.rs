//! Setup validation
//!
//! Heuristic checks that turn a projector/surface pair into human readable
//! warnings and errors. Every rule runs; none short-circuits.

use serde::{Deserialize, Serialize};

use crate::projection::{
    calculate_recommendations, optimal_distance, projected_coverage_ratio, projector_distance,
    ProjectorSettings, SurfaceGeometry,
};

/// Maximum tilt in degrees before keystone correction is suggested
pub const MAX_TILT_DEG: f64 = 30.0;

/// Outcome of [`validate_projector_setup`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// `true` when there are no errors; warnings never affect validity
    pub is_valid: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_messages(warnings: Vec<String>, errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            warnings,
            errors,
        }
    }
}

pub fn validate_projector_setup(
    settings: &ProjectorSettings,
    surface: &SurfaceGeometry,
) -> ValidationResult {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    let distance = projector_distance(settings, surface);
    let optimal = optimal_distance(settings, surface);

    if distance < optimal * 0.5 {
        errors.push(format!(
            "Projector is too close to the surface ({:.1}m, optimal {:.1}m)",
            distance, optimal
        ));
    }

    if distance > optimal * 2.0 {
        warnings.push(format!(
            "Projector is far from the surface ({:.1}m, optimal {:.1}m); image will be dim and oversized",
            distance, optimal
        ));
    }

    let minimum_brightness = calculate_recommendations(settings, surface).minimum_brightness;
    if settings.brightness < minimum_brightness * 0.8 {
        errors.push(format!(
            "Insufficient brightness: {:.0} lumens, at least {:.0} recommended",
            settings.brightness, minimum_brightness
        ));
    }

    // Unclamped so that oversized images can trip the "extends beyond" rule;
    // the clamped coverage area never exceeds 1.0.
    let coverage = projected_coverage_ratio(settings, surface);
    if coverage < 0.8 {
        warnings.push(format!(
            "Projection does not fully cover the surface ({:.0}% coverage)",
            coverage * 100.0
        ));
    } else if coverage > 1.2 {
        warnings.push(format!(
            "Projection extends beyond the surface ({:.0}% of surface area)",
            coverage * 100.0
        ));
    }

    if settings.rotation.x.abs() > MAX_TILT_DEG {
        warnings.push(format!(
            "Steep tilt angle ({:.0}°) will require keystone correction",
            settings.rotation.x
        ));
    }

    let result = ValidationResult::from_messages(warnings, errors);
    log::debug!(
        "validation: {} error(s), {} warning(s)",
        result.errors.len(),
        result.warnings.len()
    );
    result
}
