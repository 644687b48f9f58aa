//! Projector camera model
//!
//! Builds the projection and view matrices for a projector treated as a
//! pinhole camera looking down its local -Z axis.

use glam::{DMat4, DQuat, DVec3, DVec4};

use super::types::ProjectorSettings;

/// Near clipping plane in meters
pub const NEAR_PLANE: f64 = 0.1;
/// Far clipping plane in meters
pub const FAR_PLANE: f64 = 1000.0;

/// Rotation for Euler angles in degrees, XYZ order (`Rx * Ry * Rz`).
pub fn euler_rotation(rotation_deg: DVec3) -> DQuat {
    DQuat::from_rotation_x(rotation_deg.x.to_radians())
        * DQuat::from_rotation_y(rotation_deg.y.to_radians())
        * DQuat::from_rotation_z(rotation_deg.z.to_radians())
}

/// Perspective projection with the lens shift applied as a view offset.
///
/// The offset sub-window keeps the full frame size, so a lens shift
/// translates the frustum without resizing it. Requires
/// `resolution.height > 0`; otherwise the matrix is non-finite.
pub fn calculate_projection_matrix(settings: &ProjectorSettings) -> DMat4 {
    let full_width = settings.resolution.width as f64;
    let full_height = settings.resolution.height as f64;
    let aspect = settings.resolution.aspect();

    let offset_x = settings.lens_shift.horizontal * full_width;
    let offset_y = settings.lens_shift.vertical * full_height;

    let mut top = NEAR_PLANE * (settings.fov.to_radians() * 0.5).tan();
    let height = 2.0 * top;
    let width = aspect * height;
    let mut left = -0.5 * width;

    // Sub-window is as large as the full frame, only the origin moves
    left += offset_x * width / full_width;
    top -= offset_y * height / full_height;

    frustum(left, left + width, top, top - height, NEAR_PLANE, FAR_PLANE)
}

/// Off-center perspective frustum (OpenGL clip space, depth in [-1, 1]).
fn frustum(left: f64, right: f64, top: f64, bottom: f64, near: f64, far: f64) -> DMat4 {
    let x = 2.0 * near / (right - left);
    let y = 2.0 * near / (top - bottom);
    let a = (right + left) / (right - left);
    let b = (top + bottom) / (top - bottom);
    let c = -(far + near) / (far - near);
    let d = -2.0 * far * near / (far - near);

    DMat4::from_cols(
        DVec4::new(x, 0.0, 0.0, 0.0),
        DVec4::new(0.0, y, 0.0, 0.0),
        DVec4::new(a, b, c, -1.0),
        DVec4::new(0.0, 0.0, d, 0.0),
    )
}

/// Look-from view matrix: rotation taken directly from the settings, then
/// translation by the negated position (`R * T`).
pub fn calculate_view_matrix(settings: &ProjectorSettings) -> DMat4 {
    let rotation = DMat4::from_quat(euler_rotation(settings.rotation));
    let translation = DMat4::from_translation(-settings.position);
    rotation * translation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::types::{LensShift, Resolution};

    fn settings() -> ProjectorSettings {
        ProjectorSettings::default()
    }

    #[test]
    fn test_projection_matches_symmetric_perspective_without_shift() {
        let s = settings();
        let m = calculate_projection_matrix(&s);
        let expected = DMat4::perspective_rh_gl(
            s.fov.to_radians(),
            s.resolution.aspect(),
            NEAR_PLANE,
            FAR_PLANE,
        );
        assert!(m.abs_diff_eq(expected, 1e-9));
    }

    #[test]
    fn test_lens_shift_translates_frustum() {
        let mut s = settings();
        let base = calculate_projection_matrix(&s);

        s.lens_shift = LensShift {
            horizontal: 0.25,
            vertical: -0.1,
        };
        let shifted = calculate_projection_matrix(&s);

        // Scale terms unchanged, only the off-axis terms move
        assert!((base.x_axis.x - shifted.x_axis.x).abs() < 1e-12);
        assert!((base.y_axis.y - shifted.y_axis.y).abs() < 1e-12);
        assert!((shifted.z_axis.x - 0.5).abs() < 1e-9);
        assert!((shifted.z_axis.y - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_extreme_fov_is_finite() {
        let mut s = settings();
        s.fov = 179.0;
        let m = calculate_projection_matrix(&s);
        assert!(m.is_finite());
    }

    #[test]
    fn test_zero_height_does_not_panic() {
        let mut s = settings();
        s.resolution = Resolution::new(1920, 0);
        let m = calculate_projection_matrix(&s);
        assert!(!m.is_finite());
    }

    #[test]
    fn test_view_matrix_moves_projector_to_origin() {
        let s = settings();
        let view = calculate_view_matrix(&s);
        let p = view.transform_point3(s.position);
        assert!(p.abs_diff_eq(DVec3::ZERO, 1e-12));

        let origin = view.transform_point3(DVec3::ZERO);
        assert!(origin.abs_diff_eq(DVec3::new(0.0, 0.0, -10.0), 1e-12));
    }

    #[test]
    fn test_view_matrix_applies_rotation_after_translation() {
        let mut s = settings();
        s.position = DVec3::ZERO;
        s.rotation = DVec3::new(0.0, 90.0, 0.0);
        let view = calculate_view_matrix(&s);
        let p = view.transform_point3(DVec3::new(0.0, 0.0, -1.0));
        assert!(p.abs_diff_eq(DVec3::new(-1.0, 0.0, 0.0), 1e-12));
    }
}
