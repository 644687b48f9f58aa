//! Keystone estimation
//!
//! Heuristic estimate of trapezoidal distortion from the angle between the
//! projector-to-surface direction and the surface normal.

use glam::{DVec2, DVec3};

use super::types::{KeystoneCorrection, ProjectorSettings, SurfaceGeometry};

/// Fixed surface normal; surfaces are assumed to face +Z
const SURFACE_NORMAL: DVec3 = DVec3::Z;

/// Corner offset per radian of horizontal keystone
const CORNER_SCALE: f64 = 0.1;

pub fn calculate_keystone_correction(
    settings: &ProjectorSettings,
    surface: &SurfaceGeometry,
) -> KeystoneCorrection {
    // Coincident positions give a zero direction, i.e. a 90 degree angle
    let direction = (surface.position - settings.position).normalize_or_zero();
    let angle = direction.dot(SURFACE_NORMAL).clamp(-1.0, 1.0).acos();

    let horizontal = angle.sin() * settings.rotation.y.to_radians();
    let vertical = angle.sin() * settings.rotation.x.to_radians();

    let corner = horizontal.abs() * CORNER_SCALE;

    KeystoneCorrection {
        top_left: DVec2::new(-corner, corner),
        top_right: DVec2::new(corner, corner),
        bottom_left: DVec2::new(-corner, -corner),
        bottom_right: DVec2::new(corner, -corner),
        vertical_keystone: vertical.to_degrees(),
        horizontal_keystone: horizontal.to_degrees(),
    }
}
